use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::agents::{AgentContext, Entropy, InvocationFailure, SharedClock, SystemClock, TaskType};
use crate::error::ExecutionError;

use super::registry::SharedRegistry;

/// Uniform envelope around a validated agent output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub agent_id: String,
    pub agent_name: String,
    pub task_type: TaskType,
    pub result: Value,
    #[serde(serialize_with = "iso_millis")]
    pub executed_at: DateTime<Utc>,
}

fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Resolves an agent, enforces both of its contracts around the computation and wraps
/// the result. Holds no per-call state, so one engine serves any number of callers.
#[derive(Clone)]
pub struct ExecutionEngine {
    registry: SharedRegistry,
    clock: SharedClock,
    entropy: Entropy,
}

impl ExecutionEngine {
    pub fn new(registry: SharedRegistry) -> Self {
        Self {
            registry,
            clock: Arc::new(SystemClock),
            entropy: Entropy::Os,
        }
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_entropy(mut self, entropy: Entropy) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    #[instrument(skip_all, fields(agent_id = %agent_id))]
    pub fn run(&self, agent_id: &str, input: &Value) -> Result<ExecutionResult, ExecutionError> {
        let Some(agent) = self.registry.get_by_id(agent_id) else {
            debug!("agent not registered");
            return Err(ExecutionError::AgentNotFound {
                agent_id: agent_id.to_string(),
            });
        };
        debug!("resolved");

        let mut ctx = AgentContext::new(self.clock.as_ref(), self.entropy);
        let result = agent.invoke(input, &mut ctx).map_err(|failure| {
            let agent_id = agent_id.to_string();
            match failure {
                InvocationFailure::Input(violations) => {
                    debug!(violations = violations.len(), "input rejected");
                    ExecutionError::InputValidation {
                        agent_id,
                        violations,
                    }
                }
                InvocationFailure::Compute(source) => {
                    warn!(error = %source, "agent computation failed");
                    ExecutionError::AgentExecution { agent_id, source }
                }
                InvocationFailure::Output(violations) => {
                    warn!(violations = violations.len(), "agent output broke its contract");
                    ExecutionError::OutputContractViolation {
                        agent_id,
                        violations,
                    }
                }
            }
        })?;
        debug!("output validated");

        let meta = agent.meta();
        Ok(ExecutionResult {
            agent_id: meta.id.clone(),
            agent_name: meta.name.clone(),
            task_type: meta.task_type,
            result,
            executed_at: self.clock.now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    use crate::agents::{AgentMeta, Descriptor, FixedClock};
    use crate::orchestrator::Registry;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Order {
        quantity: u32,
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Quote {
        total: u32,
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Score {
        #[schemars(range(max = 100))]
        score: u32,
    }

    fn fixed_clock() -> SharedClock {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 5, 4, 12, 0, 0).unwrap()))
    }

    fn builtin_engine() -> ExecutionEngine {
        ExecutionEngine::new(Registry::builtin().unwrap().shared())
            .with_clock(fixed_clock())
            .with_entropy(Entropy::Seeded(42))
    }

    #[test]
    fn runs_builtin_agent_and_wraps_result() {
        let out = builtin_engine().run("PRO-001", &json!({ "event_id": "evt-1" })).unwrap();
        assert_eq!(out.agent_id, "PRO-001");
        assert_eq!(out.agent_name, "Ethics Code Compliance");
        assert_eq!(out.task_type, TaskType::Ai);
        assert_eq!(out.result["event_id"], "evt-1");
        assert!(out.result["ethics_overview"]["overall_compliance_score"].is_number());

        let envelope = serde_json::to_value(&out).unwrap();
        assert_eq!(envelope["executedAt"], "2025-05-04T12:00:00.000Z");
        assert_eq!(envelope["taskType"], "AI");
    }

    #[test]
    fn seeded_engine_is_reproducible() {
        let engine = builtin_engine();
        let input = json!({ "event_id": "evt-1" });
        assert_eq!(engine.run("PRO-001", &input).unwrap(), engine.run("PRO-001", &input).unwrap());
    }

    #[test]
    fn unknown_agent_is_reported_with_its_id() {
        let err = builtin_engine().run("PRO-999", &json!({})).unwrap_err();
        assert!(matches!(err, ExecutionError::AgentNotFound { .. }));
        assert!(err.to_string().contains("PRO-999"));
    }

    #[test]
    fn missing_required_field_is_an_input_failure() {
        let err = builtin_engine().run("PRO-001", &json!({})).unwrap_err();
        assert_eq!(err.kind(), "input_validation");
        assert!(err.violations().iter().any(|v| v.path == "/event_id"));
    }

    #[test]
    fn compute_never_runs_on_rejected_input() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let agent = Descriptor::new(
            AgentMeta::new("SPY-1", "Spy", TaskType::Hybrid),
            move |order: Order, _: &mut AgentContext| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Quote { total: order.quantity * 3 })
            },
        )
        .shared();
        let engine = ExecutionEngine::new(Registry::new(vec![agent]).unwrap().shared());

        assert!(engine.run("SPY-1", &json!({ "quantity": "many" })).is_err());
        assert!(engine.run("SPY-1", &json!([])).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let out = engine.run("SPY-1", &json!({ "quantity": 2 })).unwrap();
        assert_eq!(out.result, json!({ "total": 6 }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_computation_keeps_its_cause() {
        let agent = Descriptor::new(
            AgentMeta::new("ERR-1", "Broken", TaskType::Ai),
            |_: Order, _: &mut AgentContext| -> anyhow::Result<Quote> {
                anyhow::bail!("ledger unavailable")
            },
        )
        .shared();
        let engine = ExecutionEngine::new(Registry::new(vec![agent]).unwrap().shared());

        let err = engine.run("ERR-1", &json!({ "quantity": 1 })).unwrap_err();
        assert_eq!(err.kind(), "agent_execution");
        assert!(err.to_string().contains("ledger unavailable"));
    }

    #[test]
    fn out_of_contract_output_is_never_returned() {
        let agent = Descriptor::new(
            AgentMeta::new("BAD-1", "Overachiever", TaskType::Ai),
            |_: Order, _: &mut AgentContext| Ok(Score { score: 140 }),
        )
        .shared();
        let engine = ExecutionEngine::new(Registry::new(vec![agent]).unwrap().shared());

        let err = engine.run("BAD-1", &json!({ "quantity": 1 })).unwrap_err();
        assert_eq!(err.kind(), "output_contract_violation");
        assert_eq!(err.violations()[0].path, "/score");
    }
}
