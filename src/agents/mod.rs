pub mod context;
pub mod contract;
pub mod pro;
pub mod traits;

pub use context::{AgentContext, Clock, Entropy, FixedClock, SharedClock, SystemClock};
pub use contract::{check_schema, Contract, JsonContract};
pub use traits::{
    AgentBehavior, AgentMeta, Descriptor, DomainProfile, InvocationFailure, SharedAgent, TaskType,
};

/// Every agent bundled with the crate, in registration order.
pub fn builtin_agents() -> Vec<SharedAgent> {
    pro::agents()
}
