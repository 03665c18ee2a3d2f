use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client as AsyncOpenAiClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::{OpenAiSettings, WorkersAiConfig};
use crate::error::EnrichmentError;

pub type SharedModelRuntime = Arc<dyn ModelRuntime>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Payload accepted by every runtime: `{messages, max_tokens}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelResponse {
    pub response: String,
}

/// A generative model reachable by identifier. Implementations do I/O only; they never
/// interpret the reply.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, model: &str, request: &ModelRequest)
        -> Result<ModelResponse, EnrichmentError>;
}

/// Offline stand-in that answers every request with the same insight object.
#[derive(Debug, Default, Clone)]
pub struct EchoRuntime;

impl EchoRuntime {
    pub fn shared() -> SharedModelRuntime {
        Arc::new(Self)
    }
}

#[async_trait]
impl ModelRuntime for EchoRuntime {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn run(
        &self,
        model: &str,
        request: &ModelRequest,
    ) -> Result<ModelResponse, EnrichmentError> {
        let prompt_chars: usize = request
            .messages
            .iter()
            .map(|m| m.content.chars().count())
            .sum();
        let analysis = format!(
            "[stubbed {model} response] {prompt_chars} prompt characters received; \
             no model was consulted."
        );
        let canned = json!({
            "analysis": analysis,
            "recommendations": [
                "Configure CLOUDFLARE_ACCOUNT_ID and CLOUDFLARE_API_TOKEN for live insights"
            ],
            "risk_factors": [],
            "confidence_score": 0.0
        });
        Ok(ModelResponse {
            response: canned.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WorkersAiEnvelope {
    #[serde(default)]
    success: bool,
    result: Option<WorkersAiResult>,
    #[serde(default)]
    errors: Vec<WorkersAiMessage>,
}

#[derive(Debug, Deserialize)]
struct WorkersAiResult {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkersAiMessage {
    message: String,
}

/// Cloudflare Workers AI over its REST surface.
pub struct WorkersAiRuntime {
    http: reqwest::Client,
    config: WorkersAiConfig,
}

impl fmt::Debug for WorkersAiRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkersAiRuntime")
            .field("base_url", &self.config.base_url)
            .field("account_id", &self.config.account_id)
            .finish_non_exhaustive()
    }
}

impl WorkersAiRuntime {
    pub fn new(config: WorkersAiConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(config.http_timeout_ms.max(1));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Workers AI HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn shared_from_env() -> anyhow::Result<SharedModelRuntime> {
        let config = WorkersAiConfig::from_env()?;
        Ok(Arc::new(Self::new(config)?))
    }

    fn endpoint(&self, model: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let model = model.trim_start_matches('/');
        format!("{base}/accounts/{}/ai/run/{model}", self.config.account_id)
    }

    fn transport_error(&self, err: reqwest::Error) -> EnrichmentError {
        if err.is_timeout() {
            EnrichmentError::Timeout(Duration::from_millis(self.config.http_timeout_ms))
        } else {
            EnrichmentError::Transport(Box::new(err))
        }
    }
}

#[async_trait]
impl ModelRuntime for WorkersAiRuntime {
    fn name(&self) -> &'static str {
        "workers-ai"
    }

    #[instrument(level = "debug", skip_all, fields(model = %model))]
    async fn run(
        &self,
        model: &str,
        request: &ModelRequest,
    ) -> Result<ModelResponse, EnrichmentError> {
        let response = self
            .http
            .post(self.endpoint(model))
            .bearer_auth(&self.config.api_token)
            .json(request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;
        debug!(%status, bytes = body.len(), "Workers AI replied");

        let envelope = serde_json::from_str::<WorkersAiEnvelope>(&body);
        if !status.is_success() {
            // Cloudflare reports quota and auth problems in the error list.
            return Err(match envelope {
                Ok(envelope) if !envelope.errors.is_empty() => {
                    EnrichmentError::Api(join_messages(&envelope.errors))
                }
                _ => EnrichmentError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let envelope =
            envelope.map_err(|err| EnrichmentError::InvalidResponse(err.to_string()))?;
        if !envelope.success {
            return Err(EnrichmentError::Api(if envelope.errors.is_empty() {
                "request was not successful".to_string()
            } else {
                join_messages(&envelope.errors)
            }));
        }

        let result = envelope.result.ok_or_else(|| {
            EnrichmentError::InvalidResponse("missing `result` object".to_string())
        })?;
        Ok(ModelResponse {
            response: result.response.unwrap_or_default(),
        })
    }
}

fn join_messages(errors: &[WorkersAiMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// OpenAI-compatible chat completions: OpenAI, vLLM, or any compatible backend.
pub struct OpenAiRuntime {
    client: AsyncOpenAiClient<OpenAIConfig>,
}

impl OpenAiRuntime {
    pub fn new(settings: OpenAiSettings) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(settings.api_key);
        if let Some(base_url) = settings.base_url {
            config = config.with_api_base(base_url);
        }
        Self {
            client: AsyncOpenAiClient::with_config(config),
        }
    }

    pub fn shared_from_env() -> anyhow::Result<SharedModelRuntime> {
        Ok(Arc::new(Self::new(OpenAiSettings::from_env()?)))
    }

    fn to_openai(message: &ChatMessage) -> Result<ChatCompletionRequestMessage, OpenAIError> {
        let converted: ChatCompletionRequestMessage = match message.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
        };
        Ok(converted)
    }
}

#[async_trait]
impl ModelRuntime for OpenAiRuntime {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(level = "debug", skip_all, fields(model = %model))]
    async fn run(
        &self,
        model: &str,
        request: &ModelRequest,
    ) -> Result<ModelResponse, EnrichmentError> {
        let messages = request
            .messages
            .iter()
            .map(Self::to_openai)
            .collect::<Result<Vec<_>, _>>()
            .map_err(openai_error)?;
        let max_tokens = u16::try_from(request.max_tokens).unwrap_or(u16::MAX);

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .temperature(0.2)
            .max_tokens(max_tokens)
            .messages(messages)
            .build()
            .map_err(openai_error)?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(openai_error)?;
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            EnrichmentError::InvalidResponse("response did not contain any choices".to_string())
        })?;

        Ok(ModelResponse {
            response: choice.message.content.unwrap_or_default(),
        })
    }
}

fn openai_error(err: OpenAIError) -> EnrichmentError {
    match err {
        OpenAIError::ApiError(api) => EnrichmentError::Api(api.message),
        OpenAIError::InvalidArgument(message) => EnrichmentError::Configuration(message),
        other => EnrichmentError::Transport(Box::new(other)),
    }
}

/// Picks a runtime from the environment: Workers AI when Cloudflare credentials are set,
/// otherwise an OpenAI-compatible endpoint, optionally falling back to the echo runtime.
pub fn build_model_runtime_from_env(default_to_echo: bool) -> anyhow::Result<SharedModelRuntime> {
    let workers_err = match WorkersAiRuntime::shared_from_env() {
        Ok(runtime) => return Ok(runtime),
        Err(err) => err,
    };
    match OpenAiRuntime::shared_from_env() {
        Ok(runtime) => Ok(runtime),
        Err(err) if default_to_echo => {
            tracing::warn!(?workers_err, ?err, "Falling back to EchoRuntime");
            Ok(EchoRuntime::shared())
        }
        Err(err) => Err(err.context(format!("Workers AI unavailable: {workers_err:#}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Insights;

    fn request() -> ModelRequest {
        ModelRequest {
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hello")],
            max_tokens: 64,
        }
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
        assert_eq!(value["max_tokens"], 64);
    }

    #[tokio::test]
    async fn echo_runtime_returns_parseable_insights() {
        let reply = EchoRuntime.run("any-model", &request()).await.unwrap();
        match Insights::from_response(&reply.response) {
            Insights::Structured(map) => {
                assert!(map.contains_key("recommendations"));
                assert_eq!(map["confidence_score"], 0.0);
            }
            other => panic!("expected structured insights, got {other:?}"),
        }
    }

    #[test]
    fn workers_endpoint_keeps_model_path() {
        let runtime = WorkersAiRuntime::new(WorkersAiConfig {
            account_id: "acc".into(),
            api_token: "tok".into(),
            base_url: "https://example.test/client/v4/".into(),
            http_timeout_ms: 1000,
        })
        .unwrap();
        assert_eq!(
            runtime.endpoint("@cf/meta/llama-3.3-70b-instruct-fp8-fast"),
            "https://example.test/client/v4/accounts/acc/ai/run/@cf/meta/llama-3.3-70b-instruct-fp8-fast"
        );
    }
}
