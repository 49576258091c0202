use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_openai::error::{ApiError, OpenAIError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Model service unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model request timed out: {0}")]
    Timeout(String),

    #[error("Model service error: {0}")]
    ModelError(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Request cancelled: {0}")]
    Cancelled(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            AppError::Timeout(_) => "MODEL_TIMEOUT",
            AppError::ModelError(_) => "MODEL_ERROR",
            AppError::MalformedOutput(_) => "MALFORMED_OUTPUT",
            AppError::Cancelled(_) => "CANCELLED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Failures worth another attempt against the model service.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::ModelUnavailable(_) | AppError::Timeout(_))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ModelError(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedOutput(_) => StatusCode::BAD_GATEWAY,
            AppError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

/// validator reports Rust field names; callers see the camelCase wire names.
fn wire_field_name(field: &str) -> String {
    if field.starts_with('_') {
        return field.to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;

    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            name.push(ch);
        }
    }
    name
}

/// Flattens validator output into `field: message` pairs, sorted by field so
/// the text is stable across runs.
pub fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (field, kind) in errors.errors() {
        let field = wire_field_name(field);
        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", error.code));
                    parts.push(format!("{}: {}", field, message));
                }
            }
            validator::ValidationErrorsKind::Struct(nested) => {
                parts.push(format!("{}: {}", field, describe_validation_errors(nested)));
            }
            validator::ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    parts.push(format!(
                        "{}[{}]: {}",
                        field,
                        index,
                        describe_validation_errors(nested)
                    ));
                }
            }
        }
    }

    parts.sort();
    parts.join("; ")
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(describe_validation_errors(&err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON error: {}", err))
    }
}

const TRANSIENT_API_ERRORS: &[&str] = &[
    "server_error",
    "service_unavailable",
    "overloaded_error",
    "rate_limit_exceeded",
    "requests",
    "tokens",
];

/// Upstream overload and rate limits clear up on their own; a spent quota or a
/// rejected request does not.
fn api_error_is_transient(err: &ApiError) -> bool {
    let labels = [err.r#type.as_deref(), err.code.as_deref()];

    if labels.contains(&Some("insufficient_quota")) {
        return false;
    }
    if labels
        .iter()
        .flatten()
        .any(|label| TRANSIENT_API_ERRORS.contains(label))
    {
        return true;
    }

    // 5xx replies are passed through as the raw body with no type or code.
    err.r#type.is_none() && err.code.is_none() && err.param.is_none()
}

impl From<OpenAIError> for AppError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(e) => AppError::ModelUnavailable(e.to_string()),
            OpenAIError::ApiError(api) if api_error_is_transient(&api) => {
                AppError::ModelUnavailable(api.message)
            }
            OpenAIError::ApiError(api) => AppError::ModelError(api.message),
            OpenAIError::InvalidArgument(msg) => AppError::InternalError(msg),
            other => AppError::ModelError(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Topic must be at least 3 characters long."))]
        topic: String,
        #[validate(range(min = 1, max = 10))]
        count: u32,
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MalformedOutput("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Timeout("test".into()).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::Unauthorized("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_only_network_failures_are_transient() {
        assert!(AppError::ModelUnavailable("reset".into()).is_transient());
        assert!(AppError::Timeout("60s".into()).is_transient());
        assert!(!AppError::ModelError("refused".into()).is_transient());
        assert!(!AppError::MalformedOutput("bad".into()).is_transient());
        assert!(!AppError::ValidationError("bad".into()).is_transient());
    }

    fn api_error(r#type: Option<&str>, code: Option<&str>) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: "upstream said no".to_string(),
            r#type: r#type.map(str::to_string),
            param: None,
            code: code.map(str::to_string),
        })
    }

    #[test]
    fn test_server_error_body_is_transient() {
        let err: AppError = api_error(None, None).into();
        assert!(matches!(err, AppError::ModelUnavailable(ref msg) if msg == "upstream said no"));
        assert!(err.is_transient());

        let err: AppError = api_error(Some("server_error"), None).into();
        assert!(err.is_transient());
    }

    #[test]
    fn test_rate_limit_is_transient() {
        let err: AppError = api_error(Some("requests"), Some("rate_limit_exceeded")).into();
        assert!(matches!(err, AppError::ModelUnavailable(_)));

        let err: AppError = api_error(Some("tokens"), None).into();
        assert!(err.is_transient());
    }

    #[test]
    fn test_spent_quota_is_not_transient() {
        let err: AppError = api_error(Some("insufficient_quota"), None).into();
        assert!(matches!(err, AppError::ModelError(_)));

        let err: AppError = api_error(Some("requests"), Some("insufficient_quota")).into();
        assert!(!err.is_transient());
    }

    #[test]
    fn test_rejected_request_is_not_transient() {
        let err: AppError = api_error(Some("invalid_request_error"), Some("model_not_found")).into();
        assert!(matches!(err, AppError::ModelError(_)));

        let err: AppError = OpenAIError::ApiError(ApiError {
            message: "bad schema".to_string(),
            r#type: None,
            param: Some("response_format".to_string()),
            code: None,
        })
        .into();
        assert!(!err.is_transient());
    }

    #[test]
    fn test_undecodable_reply_is_model_error() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AppError = OpenAIError::JSONDeserialize(parse, "not json".to_string()).into();
        assert!(matches!(err, AppError::ModelError(_)));
    }

    #[test]
    fn test_invalid_argument_is_internal() {
        let err: AppError = OpenAIError::InvalidArgument("missing model".to_string()).into();
        assert!(matches!(err, AppError::InternalError(ref msg) if msg == "missing model"));
    }

    #[test]
    fn test_validation_errors_are_field_level_and_sorted() {
        let sample = Sample {
            topic: "ab".to_string(),
            count: 0,
        };
        let err: AppError = sample.validate().unwrap_err().into();

        match err {
            AppError::ValidationError(msg) => {
                assert!(msg.starts_with("count: "), "got: {}", msg);
                assert!(msg.contains("topic: Topic must be at least 3 characters long."));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_wire_field_names() {
        assert_eq!(wire_field_name("number_of_questions"), "numberOfQuestions");
        assert_eq!(wire_field_name("topic"), "topic");
        assert_eq!(wire_field_name("__all__"), "__all__");
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::MalformedOutput("missing field `quiz`".into());
        assert_eq!(err.to_string(), "Malformed model output: missing field `quiz`");
        assert_eq!(err.error_code(), "MALFORMED_OUTPUT");
    }
}
