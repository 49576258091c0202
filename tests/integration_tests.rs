use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use snaptest_server::{
    app_state::AppState,
    auth::IdentityClaims,
    config::Config,
    errors::{AppError, AppResult},
    handlers::{configure_routes, json_config},
    middleware::RequestIdMiddleware,
    services::{ModelClient, ModelRequest},
};

const IDENTITY_SECRET: &str = "integration_identity_secret";
const TINY_PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Replays canned replies in order and records every request it receives.
struct ScriptedModelClient {
    replies: Mutex<VecDeque<AppResult<Value>>>,
    requests: Mutex<Vec<ModelRequest>>,
    calls: AtomicUsize,
}

impl ScriptedModelClient {
    fn new(replies: Vec<AppResult<Value>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn silent() -> Self {
        Self::new(Vec::new())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn generate(&self, request: ModelRequest) -> AppResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);

        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AppError::ModelError("no scripted reply left".into())))
    }
}

fn config() -> Config {
    Config {
        app_env: "test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        cors_allowed_origin: "http://localhost:9002".to_string(),
        max_payload_bytes: 64 * 1024,
        model_api_base: "http://127.0.0.1:9/v1".to_string(),
        model_api_key: SecretString::from("integration_model_key".to_string()),
        model_name: "test-model".to_string(),
        model_timeout_secs: 5,
        model_max_retries: 1,
        model_retry_backoff_ms: 1,
        identity_jwt_secret: SecretString::from(IDENTITY_SECRET.to_string()),
    }
}

macro_rules! init_app {
    ($client:expr) => {{
        let client: Arc<dyn ModelClient> = $client.clone();
        let config = config();
        let limit = config.max_payload_bytes;
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::with_model_client(config, client)))
                .app_data(json_config(limit))
                .wrap(RequestIdMiddleware)
                .configure(configure_routes),
        )
        .await
    }};
}

fn photosynthesis_quiz() -> Value {
    json!({
        "quiz": [
            {
                "question": "Which pigment absorbs light for photosynthesis?",
                "options": ["Keratin", "Chlorophyll", "Melanin", "Haemoglobin"],
                "answer": 1
            },
            {
                "question": "Which gas do plants release during photosynthesis?",
                "options": ["Nitrogen", "Carbon dioxide", "Hydrogen", "Oxygen"],
                "answer": 3
            }
        ]
    })
}

fn identity_token(expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = IdentityClaims {
        sub: "uid-42".to_string(),
        name: Some("Asha Rao".to_string()),
        email: Some("asha@example.com".to_string()),
        iat: now.timestamp() as usize,
        exp: (now + expires_in).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
    )
    .unwrap()
}

#[actix_web::test]
async fn test_book_test_with_zero_questions_is_rejected_without_model_call() {
    let client = Arc::new(ScriptedModelClient::silent());
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/test-from-book")
        .set_json(json!({ "bookName": "NCERT Science", "chapterName": "Chapter 5", "numberOfQuestions": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "VALIDATION_ERROR");
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("at least 1 question"));
    assert_eq!(client.calls(), 0);
}

#[actix_web::test]
async fn test_book_test_defaults_reach_the_prompt() {
    let client = Arc::new(ScriptedModelClient::new(vec![Ok(json!({
        "testQuestions": [{ "question": "Define osmosis.", "answer": "Movement of water across a membrane." }]
    }))]));
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/test-from-book")
        .set_json(json!({ "bookName": "NCERT Science", "chapterName": "Life Processes" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let requests = client.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("Number of Questions: 10"));
    assert!(requests[0].prompt.contains("Difficulty Level: medium"));
}

#[actix_web::test]
async fn test_short_doubt_is_rejected_without_model_call() {
    let client = Arc::new(ScriptedModelClient::silent());
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/doubt")
        .set_json(json!({ "question": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("question"));
    assert_eq!(client.calls(), 0);
}

#[actix_web::test]
async fn test_test_paper_without_images_is_rejected_without_model_call() {
    let client = Arc::new(ScriptedModelClient::silent());
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/test-paper")
        .set_json(json!({ "photoDataUris": [], "marks": 20, "language": "Hindi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("No images selected"));
    assert_eq!(client.calls(), 0);
}

#[actix_web::test]
async fn test_test_paper_sends_pages_then_format_sample() {
    let client = Arc::new(ScriptedModelClient::new(vec![Ok(
        json!({ "testPaper": "Section A\n1. ... (2 marks)" }),
    )]));
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/test-paper")
        .set_json(json!({
            "photoDataUris": [TINY_PNG_DATA_URI, TINY_PNG_DATA_URI],
            "marks": 40,
            "language": "Tamil",
            "formatPhotoDataUri": TINY_PNG_DATA_URI,
            "questionTypes": ["mcq", "Short Answer"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["testPaper"], "Section A\n1. ... (2 marks)");

    let requests = client.requests.lock().await;
    assert_eq!(requests[0].flow, "generateTestPaper");
    assert_eq!(requests[0].images.len(), 3);
    assert!(requests[0].prompt.contains("The first 2 attached image(s)"));
    assert!(requests[0].prompt.contains("Multiple Choice, Short Answer"));
}

#[actix_web::test]
async fn test_quiz_round_trip_and_scoring() {
    let client = Arc::new(ScriptedModelClient::new(vec![Ok(photosynthesis_quiz())]));
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/quiz")
        .set_json(json!({ "topic": "Photosynthesis", "numberOfQuestions": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let quiz: Value = test::read_body_json(resp).await;
    assert_eq!(quiz, photosynthesis_quiz());

    for (selected, expected) in [
        (json!([1, 3]), 100),
        (json!([0, 3]), 50),
        (json!([null, 3]), 50),
        (json!([1]), 50),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/quizzes/score")
            .set_json(json!({ "quiz": quiz, "selectedAnswers": selected }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let score: Value = test::read_body_json(resp).await;
        assert_eq!(score["roundedPercentage"], expected);
    }
}

#[actix_web::test]
async fn test_out_of_range_answer_is_malformed_output() {
    let client = Arc::new(ScriptedModelClient::new(vec![Ok(json!({
        "quiz": [{ "question": "Q", "options": ["a", "b", "c", "d"], "answer": 7 }]
    }))]));
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/quiz")
        .set_json(json!({ "topic": "Photosynthesis", "numberOfQuestions": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "MALFORMED_OUTPUT");
}

#[actix_web::test]
async fn test_transient_failure_is_retried_then_succeeds() {
    let client = Arc::new(ScriptedModelClient::new(vec![
        Err(AppError::ModelUnavailable("connection reset".into())),
        Ok(json!({ "summary": "Isolate x, then divide." })),
    ]));
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/ncert-solution-summary")
        .set_json(json!({
            "solutionText": "Subtract 3 from both sides to get 2x = 8, then divide by 2 to get x = 4."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(client.calls(), 2);
}

#[actix_web::test]
async fn test_exhausted_retries_surface_as_unavailable() {
    let client = Arc::new(ScriptedModelClient::new(vec![
        Err(AppError::ModelUnavailable("down".into())),
        Err(AppError::ModelUnavailable("still down".into())),
    ]));
    let app = init_app!(client);

    let req = test::TestRequest::post()
        .uri("/api/flows/worksheet")
        .set_json(json!({ "topic": "Fractions", "gradeLevel": "Grade 5", "numberOfQuestions": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(client.calls(), 2);
}

#[actix_web::test]
async fn test_me_requires_valid_identity_token() {
    let client = Arc::new(ScriptedModelClient::silent());
    let app = init_app!(client);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/me").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "UNAUTHORIZED");

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {}", identity_token(Duration::hours(-2)))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {}", identity_token(Duration::hours(1)))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], "uid-42");
    assert_eq!(body["greetingName"], "Asha Rao");
}

#[actix_web::test]
async fn test_every_response_carries_request_id() {
    let client = Arc::new(ScriptedModelClient::silent());
    let app = init_app!(client);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.headers().contains_key("x-request-id"));

    let req = test::TestRequest::post()
        .uri("/api/flows/doubt")
        .set_json(json!({ "question": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let client = Arc::new(ScriptedModelClient::silent());
    let app = init_app!(client);

    let content = "a".repeat(128 * 1024);
    let req = test::TestRequest::post()
        .uri("/api/flows/revision-notes")
        .set_json(json!({ "content": content }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.calls(), 0);
}
