use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoff;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::Config,
    constants::prompts::SYSTEM_PROMPT,
    errors::{AppError, AppResult},
    models::domain::EncodedImage,
};

/// One structured-generation call: prompt text, attached images and the JSON
/// schema the reply must follow.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub flow: String,
    pub prompt: String,
    pub images: Vec<EncodedImage>,
    pub output_schema: Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Returns the model's reply parsed as JSON. Shape checks are left to the caller.
    async fn generate(&self, request: ModelRequest) -> AppResult<Value>;
}

/// Talks to any OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiModelClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.model_api_key.expose_secret())
            .with_api_base(&config.model_api_base);

        Self {
            client: Client::with_config(openai_config).with_backoff(single_attempt()),
            model: config.model_name.clone(),
        }
    }
}

/// Retries are owned by `RetryPolicy`. A zero elapsed budget makes the SDK
/// give up after its first attempt.
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::ZERO),
        ..Default::default()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// Builds the chat completions body. Images follow the text as `image_url`
/// parts in the order given.
pub fn chat_completion_body(model: &str, request: &ModelRequest) -> Value {
    let mut content = vec![json!({ "type": "text", "text": request.prompt })];
    content.extend(request.images.iter().map(|image| {
        json!({
            "type": "image_url",
            "image_url": { "url": image.to_data_uri() }
        })
    }));

    json!({
        "model": model,
        "n": 1,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": content }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": request.flow,
                "schema": request.output_schema,
                "strict": false
            }
        }
    })
}

fn extract_structured_content(envelope: ChatCompletionEnvelope) -> AppResult<Value> {
    let choice = envelope.choices.into_iter().next().ok_or_else(|| {
        AppError::MalformedOutput("model returned no choices in its response".to_string())
    })?;

    if let Some(refusal) = choice.message.refusal {
        return Err(AppError::ModelError(format!("model refused: {}", refusal)));
    }

    let content = choice.message.content.ok_or_else(|| {
        AppError::MalformedOutput(format!(
            "model response contained no content (finish reason: {})",
            choice.finish_reason.as_deref().unwrap_or("unknown")
        ))
    })?;

    serde_json::from_str(content.trim())
        .map_err(|e| AppError::MalformedOutput(format!("model reply is not JSON: {}", e)))
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn generate(&self, request: ModelRequest) -> AppResult<Value> {
        let body = chat_completion_body(&self.model, &request);

        let envelope: ChatCompletionEnvelope = self
            .client
            .chat()
            .create_byot(body)
            .await
            .map_err(AppError::from)?;

        extract_structured_content(envelope)
    }
}
