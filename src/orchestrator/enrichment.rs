use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::config::EnrichmentConfig;
use crate::error::{EnrichmentError, ExecutionError};
use crate::llm_client::{ModelRequest, ModelResponse, ModelRuntime};

use super::engine::{ExecutionEngine, ExecutionResult};
use super::insights::Insights;
use super::prompt::{build_messages, PromptParts};

/// Optional caller context folded into the prompt.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentContext {
    pub short_term_memory: Option<String>,
    pub user_preferences: Option<Map<String, Value>>,
}

impl EnrichmentContext {
    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.short_term_memory = Some(memory.into());
        self
    }

    pub fn with_preferences(mut self, preferences: Map<String, Value>) -> Self {
        self.user_preferences = Some(preferences);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    Enhanced { insights: Insights, model: String },
    Degraded { error: String },
}

/// Deterministic result plus whatever the model added. Serializes as
/// `{result, ai_enhanced: true, ai_insights, model}` or `{result, ai_enhanced: false, ai_error}`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedResult {
    pub result: ExecutionResult,
    pub enrichment: Enrichment,
}

impl EnrichedResult {
    pub fn ai_enhanced(&self) -> bool {
        matches!(self.enrichment, Enrichment::Enhanced { .. })
    }

    pub fn ai_error(&self) -> Option<&str> {
        match &self.enrichment {
            Enrichment::Degraded { error } => Some(error),
            Enrichment::Enhanced { .. } => None,
        }
    }

    pub fn insights(&self) -> Option<&Insights> {
        match &self.enrichment {
            Enrichment::Enhanced { insights, .. } => Some(insights),
            Enrichment::Degraded { .. } => None,
        }
    }
}

impl Serialize for EnrichedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("result", &self.result)?;
        match &self.enrichment {
            Enrichment::Enhanced { insights, model } => {
                map.serialize_entry("ai_enhanced", &true)?;
                map.serialize_entry("ai_insights", insights)?;
                map.serialize_entry("model", model)?;
            }
            Enrichment::Degraded { error } => {
                map.serialize_entry("ai_enhanced", &false)?;
                map.serialize_entry("ai_error", error)?;
            }
        }
        map.end()
    }
}

/// Runs the engine, then asks a model to annotate the result. Only the engine can fail
/// the call; every model-side failure degrades to `ai_enhanced: false`.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    engine: ExecutionEngine,
    config: EnrichmentConfig,
}

impl EnrichmentPipeline {
    pub fn new(engine: ExecutionEngine, config: EnrichmentConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    pub async fn enhance(
        &self,
        agent_id: &str,
        input: &Value,
        runtime: &dyn ModelRuntime,
        context: &EnrichmentContext,
    ) -> Result<EnrichedResult, ExecutionError> {
        self.enhance_with_cancel(agent_id, input, runtime, context, &CancellationToken::new())
            .await
    }

    #[instrument(skip_all, fields(agent_id = %agent_id, runtime = runtime.name()))]
    pub async fn enhance_with_cancel(
        &self,
        agent_id: &str,
        input: &Value,
        runtime: &dyn ModelRuntime,
        context: &EnrichmentContext,
        cancel: &CancellationToken,
    ) -> Result<EnrichedResult, ExecutionError> {
        let executed = self.engine.run(agent_id, input)?;

        let enrichment = match self.consult(&executed, input, runtime, context, cancel).await {
            Ok(response) => {
                let insights = Insights::from_response(&response.response);
                debug!(
                    structured = matches!(insights, Insights::Structured(_)),
                    "model insights attached"
                );
                Enrichment::Enhanced {
                    insights,
                    model: self.config.model.clone(),
                }
            }
            Err(err) => {
                warn!(error = %err, "enrichment degraded; returning deterministic result");
                Enrichment::Degraded {
                    error: err.to_string(),
                }
            }
        };

        Ok(EnrichedResult {
            result: executed,
            enrichment,
        })
    }

    async fn consult(
        &self,
        executed: &ExecutionResult,
        input: &Value,
        runtime: &dyn ModelRuntime,
        context: &EnrichmentContext,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, EnrichmentError> {
        if cancel.is_cancelled() {
            return Err(EnrichmentError::Cancelled);
        }

        let meta = self
            .engine
            .registry()
            .get_by_id(&executed.agent_id)
            .map(|agent| agent.meta())
            .ok_or_else(|| {
                EnrichmentError::Configuration(format!(
                    "agent {} vanished from the registry",
                    executed.agent_id
                ))
            })?;

        let request = ModelRequest {
            messages: build_messages(
                &PromptParts {
                    meta,
                    input,
                    output: &executed.result,
                    short_term_memory: context.short_term_memory.as_deref(),
                    user_preferences: context.user_preferences.as_ref(),
                },
                self.config.max_section_chars,
            ),
            max_tokens: self.config.max_tokens,
        };

        let call = runtime.run(&self.config.model, &request);
        let bounded = async {
            match self.config.timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(EnrichmentError::Timeout(limit)),
                },
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(EnrichmentError::Cancelled),
            outcome = bounded => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::agents::{Entropy, FixedClock};
    use crate::llm_client::{EchoRuntime, Role};
    use crate::orchestrator::Registry;

    enum Scripted {
        Reply(&'static str),
        Fail(&'static str),
    }

    #[async_trait]
    impl ModelRuntime for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn run(
            &self,
            _model: &str,
            request: &ModelRequest,
        ) -> Result<ModelResponse, EnrichmentError> {
            assert_eq!(request.messages[0].role, Role::System);
            assert_eq!(request.max_tokens, 1024);
            match self {
                Scripted::Reply(text) => Ok(ModelResponse {
                    response: text.to_string(),
                }),
                Scripted::Fail(message) => Err(EnrichmentError::Api(message.to_string())),
            }
        }
    }

    struct Stalled;

    #[async_trait]
    impl ModelRuntime for Stalled {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn run(&self, _: &str, _: &ModelRequest) -> Result<ModelResponse, EnrichmentError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ModelResponse {
                response: String::new(),
            })
        }
    }

    fn pipeline(config: EnrichmentConfig) -> EnrichmentPipeline {
        let engine = ExecutionEngine::new(Registry::builtin().unwrap().shared())
            .with_clock(Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap(),
            )))
            .with_entropy(Entropy::Seeded(9));
        EnrichmentPipeline::new(engine, config)
    }

    fn input() -> Value {
        json!({ "event_id": "evt-1" })
    }

    #[tokio::test]
    async fn failing_model_keeps_the_deterministic_result() {
        let pipeline = pipeline(EnrichmentConfig::default());
        let plain = pipeline.engine().run("PRO-001", &input()).unwrap();
        let failing = Scripted::Fail("quota exceeded");

        let enriched = pipeline
            .enhance("PRO-001", &input(), &failing, &EnrichmentContext::default())
            .await
            .unwrap();

        assert_eq!(enriched.result, plain);
        assert!(!enriched.ai_enhanced());
        assert!(enriched.ai_error().unwrap().contains("quota exceeded"));

        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["ai_enhanced"], false);
        assert!(value.get("ai_insights").is_none());
        assert_eq!(value["result"]["result"]["event_id"], "evt-1");
    }

    #[tokio::test]
    async fn structured_reply_is_attached_with_model() {
        let pipeline = pipeline(EnrichmentConfig::default());
        let runtime =
            Scripted::Reply("Sure! {\"analysis\": \"strong\", \"confidence_score\": 0.9}");
        let context = EnrichmentContext::default().with_memory("previous audit");

        let enriched = pipeline
            .enhance("PRO-001", &input(), &runtime, &context)
            .await
            .unwrap();

        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["ai_enhanced"], true);
        assert_eq!(value["ai_insights"]["analysis"], "strong");
        assert_eq!(value["model"], pipeline.config().model.as_str());
        assert_eq!(pipeline.config().model, EnrichmentConfig::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn raw_and_empty_replies_still_count_as_enhanced() {
        let pipeline = pipeline(EnrichmentConfig::default());

        let raw = pipeline
            .enhance(
                "PRO-002",
                &input(),
                &Scripted::Reply("looks fine"),
                &EnrichmentContext::default(),
            )
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&raw).unwrap()["ai_insights"],
            json!({ "raw": "looks fine" })
        );

        let empty = pipeline
            .enhance("PRO-002", &input(), &Scripted::Reply(""), &EnrichmentContext::default())
            .await
            .unwrap();
        assert!(empty.ai_enhanced());
        assert_eq!(empty.insights(), Some(&Insights::Unavailable));
        assert!(serde_json::to_value(&empty).unwrap()["ai_insights"].is_null());
    }

    #[tokio::test]
    async fn engine_failures_propagate_unchanged() {
        let pipeline = pipeline(EnrichmentConfig::default());
        let err = pipeline
            .enhance("PRO-999", &input(), &EchoRuntime, &EnrichmentContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "agent_not_found");

        let err = pipeline
            .enhance("PRO-001", &json!({}), &EchoRuntime, &EnrichmentContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "input_validation");
    }

    #[tokio::test]
    async fn timeout_degrades() {
        let pipeline = pipeline(EnrichmentConfig {
            timeout: Some(Duration::from_millis(50)),
            ..EnrichmentConfig::default()
        });

        let enriched = pipeline
            .enhance("PRO-003", &input(), &Stalled, &EnrichmentContext::default())
            .await
            .unwrap();
        assert!(!enriched.ai_enhanced());
        assert!(enriched.ai_error().unwrap().contains("timed out"));
        assert_eq!(enriched.result.result["event_id"], "evt-1");
    }

    #[tokio::test]
    async fn cancellation_degrades() {
        let pipeline = pipeline(EnrichmentConfig::default());
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let enriched = pipeline
            .enhance_with_cancel(
                "PRO-004",
                &input(),
                &Stalled,
                &EnrichmentContext::default(),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(enriched.ai_error(), Some("model call cancelled"));
        assert_eq!(enriched.result.agent_id, "PRO-004");
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl ModelRuntime for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self, _: &str, _: &ModelRequest) -> Result<ModelResponse, EnrichmentError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(ModelResponse {
                response: "{}".into(),
            })
        }
    }

    #[tokio::test]
    async fn cancelled_before_the_call_never_reaches_the_model() {
        let pipeline = pipeline(EnrichmentConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        for _ in 0..50 {
            let enriched = pipeline
                .enhance_with_cancel(
                    "PRO-001",
                    &input(),
                    &EchoRuntime,
                    &EnrichmentContext::default(),
                    &cancel,
                )
                .await
                .unwrap();
            assert!(!enriched.ai_enhanced());
            assert_eq!(enriched.ai_error(), Some("model call cancelled"));
        }

        let counting = Counting(AtomicUsize::new(0));
        pipeline
            .enhance_with_cancel(
                "PRO-001",
                &input(),
                &counting,
                &EnrichmentContext::default(),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(counting.0.load(Ordering::SeqCst), 0);
    }
}
