use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    services::FlowContext,
    models::dto::request::{
        DoubtRequest, NcertQuestionSummaryRequest, NcertSolutionSummaryRequest, QuizRequest,
        RevisionNotesRequest, TestFromBookRequest, TestPaperRequest, WorksheetRequest,
    },
};

/// Builds the run context for one flow request. The token is a child of the
/// shutdown token, and the request id comes from `RequestIdMiddleware`.
fn start_flow(state: &AppState, req: &HttpRequest, flow: &str) -> FlowContext {
    let ctx = match get_request_id(req) {
        Some(request_id) => FlowContext::new(request_id, state.request_token()),
        None => FlowContext {
            cancel: state.request_token(),
            ..FlowContext::detached()
        },
    };
    log::info!("{} requested", ctx.label(flow));
    ctx
}

// Each handler cancels its model work when the client goes away: the drop
// guard fires when actix drops the handler future.

#[post("/api/flows/quiz")]
async fn generate_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "generateQuiz");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state.flow_service.generate_quiz(&request, &ctx).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/test-from-book")]
async fn generate_test_from_book(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<TestFromBookRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "generateTestFromBook");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state
        .flow_service
        .generate_test_from_book(&request, &ctx)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/worksheet")]
async fn generate_worksheet(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<WorksheetRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "generateWorksheet");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state.flow_service.generate_worksheet(&request, &ctx).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/revision-notes")]
async fn generate_revision_notes(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<RevisionNotesRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "generateRevisionNotes");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state
        .flow_service
        .generate_revision_notes(&request, &ctx)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/doubt")]
async fn answer_doubt(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<DoubtRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "solveDoubt");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state.flow_service.answer_doubt(&request, &ctx).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/ncert-solution-summary")]
async fn summarize_ncert_solution(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<NcertSolutionSummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "summarizeNcertSolution");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state
        .flow_service
        .summarize_ncert_solution(&request, &ctx)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/ncert-question-summary")]
async fn summarize_ncert_question(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<NcertQuestionSummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "summarizeNcertQuestion");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state
        .flow_service
        .summarize_ncert_question(&request, &ctx)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/flows/test-paper")]
async fn generate_test_paper(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<TestPaperRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = start_flow(&state, &req, "generateTestPaper");
    let _guard = ctx.cancel.clone().drop_guard();

    let result = state.flow_service.generate_test_paper(&request, &ctx).await?;
    Ok(HttpResponse::Ok().json(result))
}
