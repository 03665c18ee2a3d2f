use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One failed check from a contract, addressed by a JSON-pointer-ish path (`/a/0/b`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures surfaced by [`crate::orchestrator::ExecutionEngine::run`]. All of them are fatal
/// for the call and propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("agent not found: {agent_id}")]
    AgentNotFound { agent_id: String },

    #[error("input rejected by {agent_id}: {}", summarize(.violations))]
    InputValidation {
        agent_id: String,
        violations: Vec<Violation>,
    },

    #[error("agent {agent_id} failed during execution: {source}")]
    AgentExecution {
        agent_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("agent {agent_id} broke its output contract: {}", summarize(.violations))]
    OutputContractViolation {
        agent_id: String,
        violations: Vec<Violation>,
    },
}

impl ExecutionError {
    pub fn agent_id(&self) -> &str {
        match self {
            Self::AgentNotFound { agent_id }
            | Self::InputValidation { agent_id, .. }
            | Self::AgentExecution { agent_id, .. }
            | Self::OutputContractViolation { agent_id, .. } => agent_id,
        }
    }

    /// Violated fields, when the failure came from a contract check.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::InputValidation { violations, .. }
            | Self::OutputContractViolation { violations, .. } => violations,
            _ => &[],
        }
    }

    /// Stable machine-readable tag, handy for transports mapping onto status codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AgentNotFound { .. } => "agent_not_found",
            Self::InputValidation { .. } => "input_validation",
            Self::AgentExecution { .. } => "agent_execution",
            Self::OutputContractViolation { .. } => "output_contract_violation",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate agent id: {0}")]
    DuplicateAgentId(String),
}

/// Failures of the model call inside the enrichment pipeline. These never escape
/// `enhance`; they are folded into `ai_enhanced: false`.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("model transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("model endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model API error: {0}")]
    Api(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model call cancelled")]
    Cancelled,

    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    #[error("model runtime misconfigured: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_validation_message_lists_paths() {
        let err = ExecutionError::InputValidation {
            agent_id: "PRO-001".into(),
            violations: vec![
                Violation::new("/event_id", "missing required field"),
                Violation::new("", "expected object"),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("PRO-001"));
        assert!(message.contains("/event_id: missing required field"));
        assert!(message.contains("(root): expected object"));
        assert_eq!(err.violations().len(), 2);
        assert_eq!(err.kind(), "input_validation");
    }

    #[test]
    fn execution_error_keeps_root_cause() {
        let err = ExecutionError::AgentExecution {
            agent_id: "PRO-002".into(),
            source: anyhow::anyhow!("fixture exploded").into(),
        };

        let source = std::error::Error::source(&err).expect("source retained");
        assert_eq!(source.to_string(), "fixture exploded");
        assert!(err.violations().is_empty());
        assert_eq!(err.agent_id(), "PRO-002");
    }

    #[test]
    fn every_variant_names_its_agent() {
        let errors = [
            ExecutionError::AgentNotFound {
                agent_id: "PRO-404".into(),
            },
            ExecutionError::OutputContractViolation {
                agent_id: "PRO-404".into(),
                violations: vec![Violation::new("/score", "above maximum 100")],
            },
        ];
        for err in errors {
            assert_eq!(err.agent_id(), "PRO-404");
            assert!(err.to_string().contains("PRO-404"));
        }
    }
}
