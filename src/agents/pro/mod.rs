//! Professionalism domain (CMP-IS Domain J): ethics, compliance and professional
//! development agents `PRO-001`..`PRO-020`.

mod skill19;
mod skill20;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::traits::{AgentMeta, DomainProfile, SharedAgent, TaskType};

pub static PROFESSIONALISM: DomainProfile = DomainProfile {
    code: "pro",
    name: "Professionalism",
    cmp_domain: "CMP-IS Domain J",
    focus: "professional ethics, compliance, and career development",
    insight_topic: "ethics, compliance, or professional development",
    watch_for: "risks or compliance issues",
};

/// All professionalism agents in registration order.
pub fn agents() -> Vec<SharedAgent> {
    let mut agents = skill19::agents();
    agents.extend(skill20::agents());
    agents
}

fn meta(
    id: &str,
    name: &str,
    skill: (&str, &str),
    sub_skill: &str,
    cmp_reference: &str,
    persona: &str,
) -> AgentMeta {
    AgentMeta::new(id, name, TaskType::Ai)
        .category(skill.0, skill.1)
        .sub_skill(sub_skill)
        .cmp_reference(cmp_reference)
        .persona(persona)
        .domain(&PROFESSIONALISM)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct DateWindow {
    pub start_date: String,
    pub end_date: String,
}

fn rate(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (f64::from(part) / f64::from(whole) * 1000.0).round() / 10.0
}
