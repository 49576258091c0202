use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{errors::AppError, models::dto::request::ScoreQuizRequest};

#[post("/api/quizzes/score")]
async fn score_quiz(request: web::Json<ScoreQuizRequest>) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let score = request.quiz.score(&request.selected_answers);
    Ok(HttpResponse::Ok().json(score))
}
