use actix_web::{error::JsonPayloadError, web};

use crate::{auth::AuthMiddleware, errors::AppError};

pub mod flow_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod user_handler;

pub use flow_handler::{
    answer_doubt, generate_quiz, generate_revision_notes, generate_test_from_book,
    generate_test_paper, generate_worksheet, summarize_ncert_question, summarize_ncert_solution,
};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::score_quiz;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(generate_quiz)
        .service(generate_test_from_book)
        .service(generate_worksheet)
        .service(generate_revision_notes)
        .service(answer_doubt)
        .service(summarize_ncert_solution)
        .service(summarize_ncert_question)
        .service(generate_test_paper)
        .service(score_quiz)
        .service(
            web::resource("/api/me")
                .wrap(AuthMiddleware)
                .route(web::get().to(user_handler::me)),
        );
}

/// Body limit plus an error handler that reports bad JSON as a validation
/// failure in the usual error shape.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = match &err {
                JsonPayloadError::OverflowKnownLength { length, limit } => {
                    format!("Request body of {} bytes exceeds the {} byte limit", length, limit)
                }
                JsonPayloadError::Overflow { limit } => {
                    format!("Request body exceeds the {} byte limit", limit)
                }
                other => other.to_string(),
            };
            AppError::ValidationError(message).into()
        })
}
