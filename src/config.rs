use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_MODEL_API_KEY: &str = "model_api_key";
const DEFAULT_IDENTITY_SECRET: &str = "dev_identity_secret_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub max_payload_bytes: usize,
    pub model_api_base: String,
    pub model_api_key: SecretString,
    pub model_name: String,
    pub model_timeout_secs: u64,
    pub model_max_retries: u32,
    pub model_retry_backoff_ms: u64,
    pub identity_jwt_secret: SecretString,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:9002".to_string()),
            // Base64 images inflate uploads by a third; leave room for several pages.
            max_payload_bytes: env::var("MAX_PAYLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(25 * 1024 * 1024),
            model_api_base: env::var("MODEL_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model_api_key: SecretString::from(
                env::var("MODEL_API_KEY").unwrap_or_else(|_| DEFAULT_MODEL_API_KEY.to_string()),
            ),
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            model_max_retries: env::var("MODEL_MAX_RETRIES")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(2),
            model_retry_backoff_ms: env::var("MODEL_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|ms| ms.parse().ok())
                .unwrap_or(500),
            identity_jwt_secret: SecretString::from(
                env::var("IDENTITY_JWT_SECRET")
                    .unwrap_or_else(|_| DEFAULT_IDENTITY_SECRET.to_string()),
            ),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    pub fn model_retry_backoff(&self) -> Duration {
        Duration::from_millis(self.model_retry_backoff_ms)
    }

    /// Rejects default secrets. Only enforced when `APP_ENV=production`.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if !self.is_production() {
            return Ok(());
        }

        let identity_secret = self.identity_jwt_secret.expose_secret();

        if identity_secret == DEFAULT_IDENTITY_SECRET {
            return Err(AppError::InternalError(
                "IDENTITY_JWT_SECRET is using its default value".to_string(),
            ));
        }

        if identity_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "IDENTITY_JWT_SECRET is too short ({}); at least 32 characters required",
                identity_secret.len()
            )));
        }

        if self.model_api_key.expose_secret() == DEFAULT_MODEL_API_KEY {
            return Err(AppError::InternalError(
                "MODEL_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:9002".to_string(),
            max_payload_bytes: 1024 * 1024,
            model_api_base: "http://127.0.0.1:9/v1".to_string(),
            model_api_key: SecretString::from("test_model_key".to_string()),
            model_name: "test-model".to_string(),
            model_timeout_secs: 5,
            model_max_retries: 2,
            model_retry_backoff_ms: 1,
            identity_jwt_secret: SecretString::from("test_identity_secret".to_string()),
        }
    }
}
