use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Per-request state threaded through a flow run: the id that ties log lines
/// to one HTTP request, and the token that stops its model work.
#[derive(Debug, Clone)]
pub struct FlowContext {
    pub request_id: String,
    pub cancel: CancellationToken,
}

impl FlowContext {
    pub fn new(request_id: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            request_id: request_id.into(),
            cancel,
        }
    }

    /// For runs outside an HTTP request: a fresh id and a token nobody else holds.
    pub fn detached() -> Self {
        Self::new(Uuid::new_v4().to_string(), CancellationToken::new())
    }

    /// Log prefix for `flow` within this request.
    pub fn label(&self, flow: &str) -> String {
        format!("[{}] {}", self.request_id, flow)
    }
}
