use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    config::Config,
    errors::{describe_validation_errors, AppError, AppResult},
    services::{
        context::FlowContext,
        flows::RenderedPrompt,
        model_client::{ModelClient, ModelRequest},
    },
};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// How a flow talks to the model service: per-attempt timeout and bounded
/// retries with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub timeout: Duration,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self {
            max_retries: 2,
            timeout: Duration::from_secs(60),
            base_backoff: Duration::from_millis(500),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_max_retries(config.model_max_retries)
            .with_timeout(config.model_timeout())
            .with_backoff(config.model_retry_backoff())
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    /// Delay before retry number `attempt` (1-based): base * 2^(attempt - 1).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_backoff.saturating_mul(factor).min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends a rendered prompt to the model and turns the reply into a checked,
/// typed output.
pub struct StructuredInvoker {
    client: Arc<dyn ModelClient>,
    policy: RetryPolicy,
}

impl StructuredInvoker {
    pub fn new(client: Arc<dyn ModelClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub async fn invoke<O>(
        &self,
        flow: &str,
        prompt: RenderedPrompt,
        ctx: &FlowContext,
    ) -> AppResult<O>
    where
        O: DeserializeOwned + schemars::JsonSchema + Validate,
    {
        let output_schema = serde_json::to_value(schemars::schema_for!(O))?;

        let request = ModelRequest {
            flow: flow.to_string(),
            prompt: prompt.text,
            images: prompt.images,
            output_schema,
        };

        let raw = self.generate_with_retry(request, ctx).await?;
        parse_output(raw)
    }

    async fn generate_with_retry(
        &self,
        request: ModelRequest,
        ctx: &FlowContext,
    ) -> AppResult<serde_json::Value> {
        let label = ctx.label(&request.flow);
        let mut attempt: u32 = 0;

        loop {
            let result = tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => {
                    log::info!("{} cancelled during attempt {}", label, attempt + 1);
                    return Err(AppError::Cancelled(format!("{} was cancelled", request.flow)));
                }
                outcome = tokio::time::timeout(self.policy.timeout, self.client.generate(request.clone())) => {
                    match outcome {
                        Ok(result) => result,
                        Err(_) => Err(AppError::Timeout(format!(
                            "{} did not answer within {}s",
                            request.flow,
                            self.policy.timeout.as_secs_f64()
                        ))),
                    }
                }
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            attempt += 1;
            if !err.is_transient() || attempt > self.policy.max_retries {
                log::error!("{} failed after {} attempt(s): {}", label, attempt, err);
                return Err(err);
            }

            let delay = self.policy.backoff_for(attempt);
            log::warn!(
                "{} attempt {} failed ({}), retrying in {:?}",
                label,
                attempt,
                err,
                delay
            );

            tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => {
                    log::info!("{} cancelled while waiting to retry", label);
                    return Err(AppError::Cancelled(format!("{} was cancelled", request.flow)));
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Deserializes and checks a raw model reply. Any mismatch is reported as
/// malformed output, never passed through.
pub fn parse_output<O>(raw: serde_json::Value) -> AppResult<O>
where
    O: DeserializeOwned + Validate,
{
    let output: O = serde_json::from_value(raw).map_err(|e| {
        AppError::MalformedOutput(format!("reply does not match the output schema: {}", e))
    })?;

    output
        .validate()
        .map_err(|e| AppError::MalformedOutput(describe_validation_errors(&e)))?;

    Ok(output)
}
