//! Catalogue of contract-checked agents: a read-only registry, an execution engine that
//! validates input and output around each computation, and an enrichment pipeline that
//! asks a generative model for insights without ever risking the deterministic result.

pub mod agents;
pub mod config;
pub mod error;
pub mod llm_client;
pub mod orchestrator;

pub use agents::{builtin_agents, AgentBehavior, AgentMeta, Descriptor, Entropy, TaskType};
pub use config::{EngineConfig, EnrichmentConfig, WorkersAiConfig};
pub use error::{EnrichmentError, ExecutionError, RegistryError, Violation};
pub use llm_client::{
    build_model_runtime_from_env, EchoRuntime, ModelRequest, ModelResponse, ModelRuntime,
    OpenAiRuntime, SharedModelRuntime, WorkersAiRuntime,
};
pub use orchestrator::{
    EnrichedResult, EnrichmentContext, EnrichmentPipeline, ExecutionEngine, ExecutionResult,
    Insights, Registry,
};
