use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Violation;

use super::context::AgentContext;
use super::contract::{Contract, JsonContract};

pub type SharedAgent = Arc<dyn AgentBehavior>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "AI")]
    Ai,
    Hybrid,
    Human,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Ai, TaskType::Hybrid, TaskType::Human];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Ai => "AI",
            TaskType::Hybrid => "Hybrid",
            TaskType::Human => "Human",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown task type '{raw}' (expected AI, Hybrid or Human)"))
    }
}

/// The domain an agent belongs to, and how the enrichment prompt should frame it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub cmp_domain: &'static str,
    /// Completes "You are an AI assistant enhancing ... agent outputs."
    pub focus: &'static str,
    /// Completes "Key insights for ..."
    pub insight_topic: &'static str,
    /// Completes "Potential ... to watch for"
    pub watch_for: &'static str,
}

impl DomainProfile {
    pub const GENERAL: DomainProfile = DomainProfile {
        code: "general",
        name: "General",
        cmp_domain: "",
        focus: "event management",
        insight_topic: "event planning and execution",
        watch_for: "risks or issues",
    };
}

/// Declared, code-free facts about an agent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMeta {
    pub id: String,
    pub name: String,
    pub task_type: TaskType,
    pub category: String,
    pub category_title: String,
    pub sub_skill: Option<String>,
    pub cmp_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(skip)]
    pub domain: &'static DomainProfile,
}

impl AgentMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            task_type,
            category: String::new(),
            category_title: String::new(),
            sub_skill: None,
            cmp_reference: None,
            persona: None,
            domain: &DomainProfile::GENERAL,
        }
    }

    pub fn category(mut self, category: impl Into<String>, title: impl Into<String>) -> Self {
        self.category = category.into();
        self.category_title = title.into();
        self
    }

    pub fn sub_skill(mut self, sub_skill: impl Into<String>) -> Self {
        self.sub_skill = Some(sub_skill.into());
        self
    }

    pub fn cmp_reference(mut self, reference: impl Into<String>) -> Self {
        self.cmp_reference = Some(reference.into());
        self
    }

    pub fn persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn domain(mut self, domain: &'static DomainProfile) -> Self {
        self.domain = domain;
        self
    }
}

/// Why a single invocation stopped. The engine attaches the agent id and maps these
/// onto [`crate::error::ExecutionError`].
#[derive(Debug)]
pub enum InvocationFailure {
    Input(Vec<Violation>),
    Compute(Box<dyn std::error::Error + Send + Sync>),
    Output(Vec<Violation>),
}

/// Type-erased agent as held by the registry.
pub trait AgentBehavior: Send + Sync {
    fn meta(&self) -> &AgentMeta;

    fn input_schema(&self) -> &Value;

    fn output_schema(&self) -> &Value;

    /// Validate input, compute, validate output. `compute` only runs once the input
    /// contract holds.
    fn invoke(&self, input: &Value, ctx: &mut AgentContext) -> Result<Value, InvocationFailure>;
}

type ComputeFn<I, O> = dyn Fn(I, &mut AgentContext) -> anyhow::Result<O> + Send + Sync;

/// An agent with typed input `I` and output `O`, both described by their `JsonSchema`.
pub struct Descriptor<I, O> {
    meta: AgentMeta,
    input: JsonContract<I>,
    output: JsonContract<O>,
    compute: Box<ComputeFn<I, O>>,
}

impl<I, O> Descriptor<I, O>
where
    I: DeserializeOwned + JsonSchema + 'static,
    O: Serialize + DeserializeOwned + JsonSchema + 'static,
{
    pub fn new<F>(meta: AgentMeta, compute: F) -> Self
    where
        F: Fn(I, &mut AgentContext) -> anyhow::Result<O> + Send + Sync + 'static,
    {
        Self {
            meta,
            input: JsonContract::new(),
            output: JsonContract::new(),
            compute: Box::new(compute),
        }
    }

    pub fn shared(self) -> SharedAgent {
        Arc::new(self)
    }

    pub fn validate_input(&self, raw: &Value) -> Result<I, Vec<Violation>> {
        self.input.validate(raw)
    }

    pub fn validate_output(&self, produced: &O) -> Result<Value, Vec<Violation>> {
        self.output.conform(produced)
    }

    fn compute(&self, input: I, ctx: &mut AgentContext) -> Result<O, InvocationFailure> {
        match catch_unwind(AssertUnwindSafe(|| (self.compute)(input, ctx))) {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(err)) => Err(InvocationFailure::Compute(err.into())),
            Err(payload) => Err(InvocationFailure::Compute(
                format!("agent panicked: {}", panic_message(payload.as_ref())).into(),
            )),
        }
    }
}

impl<I, O> AgentBehavior for Descriptor<I, O>
where
    I: DeserializeOwned + JsonSchema + 'static,
    O: Serialize + DeserializeOwned + JsonSchema + 'static,
{
    fn meta(&self) -> &AgentMeta {
        &self.meta
    }

    fn input_schema(&self) -> &Value {
        self.input.schema()
    }

    fn output_schema(&self) -> &Value {
        self.output.schema()
    }

    fn invoke(&self, input: &Value, ctx: &mut AgentContext) -> Result<Value, InvocationFailure> {
        let typed = self.validate_input(input).map_err(InvocationFailure::Input)?;
        let produced = self.compute(typed, ctx)?;
        self.validate_output(&produced)
            .map_err(InvocationFailure::Output)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::context::{Entropy, SystemClock};
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Ping {
        n: u32,
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Pong {
        doubled: u32,
    }

    fn ctx() -> AgentContext {
        AgentContext::new(&SystemClock, Entropy::Seeded(0))
    }

    #[test]
    fn task_type_parses_case_insensitively() {
        assert_eq!("ai".parse::<TaskType>().unwrap(), TaskType::Ai);
        assert_eq!(" Hybrid ".parse::<TaskType>().unwrap(), TaskType::Hybrid);
        assert!("robot".parse::<TaskType>().is_err());
        assert_eq!(serde_json::to_value(TaskType::Ai).unwrap(), json!("AI"));
    }

    #[test]
    fn invoke_runs_the_typed_pipeline() {
        let agent = Descriptor::new(
            AgentMeta::new("T-1", "Doubler", TaskType::Ai),
            |input: Ping, _: &mut AgentContext| Ok(Pong { doubled: input.n * 2 }),
        );

        let out = agent.invoke(&json!({ "n": 21 }), &mut ctx()).unwrap();
        assert_eq!(out, json!({ "doubled": 42 }));
    }

    #[test]
    fn invoke_reports_panics_as_compute_failures() {
        let agent = Descriptor::new(
            AgentMeta::new("T-2", "Panicker", TaskType::Human),
            |_: Ping, _: &mut AgentContext| -> anyhow::Result<Pong> { panic!("boom") },
        );

        match agent.invoke(&json!({ "n": 1 }), &mut ctx()) {
            Err(InvocationFailure::Compute(err)) => assert!(err.to_string().contains("boom")),
            other => panic!("expected compute failure, got {other:?}"),
        }
    }

    #[test]
    fn meta_serialization_skips_domain() {
        let meta = AgentMeta::new("T-3", "Meta", TaskType::Hybrid)
            .category("Skill 1", "Testing")
            .persona("You test things.");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["taskType"], "Hybrid");
        assert_eq!(value["categoryTitle"], "Testing");
        assert!(value.get("domain").is_none());
    }
}
