use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::{
    auth::JwtService,
    config::Config,
    services::{FlowService, ModelClient, OpenAiModelClient, RetryPolicy},
};

#[derive(Clone)]
pub struct AppState {
    pub flow_service: Arc<FlowService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    pub shutdown: CancellationToken,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = Arc::new(OpenAiModelClient::new(&config));
        Self::with_model_client(config, client)
    }

    pub fn with_model_client(config: Config, client: Arc<dyn ModelClient>) -> Self {
        let flow_service = Arc::new(FlowService::new(client, RetryPolicy::from_config(&config)));
        let jwt_service = Arc::new(JwtService::new(&config.identity_jwt_secret));

        Self {
            flow_service,
            jwt_service,
            config: Arc::new(config),
            shutdown: CancellationToken::new(),
            started_at: Utc::now(),
        }
    }

    /// Token for one request's model work. Cancelled when the server shuts down.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
