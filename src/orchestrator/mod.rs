pub mod engine;
pub mod enrichment;
pub mod insights;
pub mod prompt;
pub mod registry;

pub use engine::{ExecutionEngine, ExecutionResult};
pub use enrichment::{EnrichedResult, Enrichment, EnrichmentContext, EnrichmentPipeline};
pub use insights::Insights;
pub use registry::{
    AgentDetail, AgentSummary, CategoryCount, Registry, RegistryStats, SharedRegistry,
    TaskTypeCounts,
};
