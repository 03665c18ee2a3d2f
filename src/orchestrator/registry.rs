use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::agents::{builtin_agents, AgentBehavior, SharedAgent, TaskType};
use crate::error::RegistryError;

pub type SharedRegistry = Arc<Registry>;

/// Immutable agent catalogue. Built once, then only read.
pub struct Registry {
    agents: Vec<SharedAgent>,
    index: HashMap<String, usize>,
}

/// Lightweight projection returned by [`Registry::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: String,
    pub name: String,
    pub task_type: TaskType,
    pub category: String,
}

/// Detail view of one agent: metadata, persona and both contract documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDetail {
    pub id: String,
    pub name: String,
    pub task_type: TaskType,
    pub category: String,
    pub category_title: String,
    pub sub_skill: Option<String>,
    pub cmp_reference: Option<String>,
    pub domain: String,
    pub cmp_domain: Option<String>,
    pub persona: Option<String>,
    pub input_schema: Value,
    pub output_schema: Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskTypeCounts {
    #[serde(rename = "AI")]
    pub ai: usize,
    #[serde(rename = "Hybrid")]
    pub hybrid: usize,
    #[serde(rename = "Human")]
    pub human: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub title: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total_agents: usize,
    /// Categories in first-seen order.
    pub by_category: Vec<CategoryCount>,
    pub by_task_type: TaskTypeCounts,
}

impl Registry {
    pub fn new(agents: Vec<SharedAgent>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(agents.len());
        for (position, agent) in agents.iter().enumerate() {
            let id = agent.meta().id.clone();
            if index.insert(id.clone(), position).is_some() {
                return Err(RegistryError::DuplicateAgentId(id));
            }
        }

        info!(agents = agents.len(), "Agent registry built");
        Ok(Self { agents, index })
    }

    /// Registry over every agent bundled with the crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(builtin_agents())
    }

    pub fn shared(self) -> SharedRegistry {
        Arc::new(self)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&SharedAgent> {
        self.index.get(id).map(|&position| &self.agents[position])
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<&SharedAgent> {
        let category = category.trim();
        self.agents
            .iter()
            .filter(|agent| agent.meta().category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn filter_by_type(&self, task_type: TaskType) -> Vec<&SharedAgent> {
        self.agents
            .iter()
            .filter(|agent| agent.meta().task_type == task_type)
            .collect()
    }

    /// Case-insensitive substring match on name, category and category title.
    pub fn search(&self, query: &str) -> Vec<&SharedAgent> {
        let needle = query.trim().to_lowercase();
        self.agents
            .iter()
            .filter(|agent| {
                let meta = agent.meta();
                needle.is_empty()
                    || [&meta.name, &meta.category, &meta.category_title]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn list(&self) -> Vec<AgentSummary> {
        self.agents.iter().map(|agent| summarize(agent.as_ref())).collect()
    }

    pub fn describe(&self, id: &str) -> Option<AgentDetail> {
        let agent = self.get_by_id(id)?;
        let meta = agent.meta();
        Some(AgentDetail {
            id: meta.id.clone(),
            name: meta.name.clone(),
            task_type: meta.task_type,
            category: meta.category.clone(),
            category_title: meta.category_title.clone(),
            sub_skill: meta.sub_skill.clone(),
            cmp_reference: meta.cmp_reference.clone(),
            domain: meta.domain.name.to_string(),
            cmp_domain: Some(meta.domain.cmp_domain)
                .filter(|domain| !domain.is_empty())
                .map(str::to_string),
            persona: meta.persona.clone(),
            input_schema: agent.input_schema().clone(),
            output_schema: agent.output_schema().clone(),
        })
    }

    pub fn stats(&self) -> RegistryStats {
        let mut by_category: Vec<CategoryCount> = Vec::new();
        let mut by_task_type = TaskTypeCounts::default();

        for agent in &self.agents {
            let meta = agent.meta();
            match by_category.iter_mut().find(|entry| entry.category == meta.category) {
                Some(entry) => entry.count += 1,
                None => by_category.push(CategoryCount {
                    category: meta.category.clone(),
                    title: meta.category_title.clone(),
                    count: 1,
                }),
            }
            match meta.task_type {
                TaskType::Ai => by_task_type.ai += 1,
                TaskType::Hybrid => by_task_type.hybrid += 1,
                TaskType::Human => by_task_type.human += 1,
            }
        }

        RegistryStats {
            total_agents: self.agents.len(),
            by_category,
            by_task_type,
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedAgent> {
        self.agents.iter()
    }
}

pub fn summarize(agent: &dyn AgentBehavior) -> AgentSummary {
    let meta = agent.meta();
    AgentSummary {
        id: meta.id.clone(),
        name: meta.name.clone(),
        task_type: meta.task_type,
        category: meta.category.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentContext, AgentMeta, Descriptor};
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Empty {}

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Done {
        ok: bool,
    }

    fn stub(id: &str, name: &str, category: &str, task_type: TaskType) -> SharedAgent {
        Descriptor::new(
            AgentMeta::new(id, name, task_type).category(category, format!("{category} title")),
            |_: Empty, _: &mut AgentContext| Ok(Done { ok: true }),
        )
        .shared()
    }

    fn builtin() -> Registry {
        Registry::builtin().expect("bundled ids are unique")
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Registry::new(vec![
            stub("X-1", "One", "A", TaskType::Ai),
            stub("X-1", "Again", "B", TaskType::Human),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateAgentId(id)) if id == "X-1"));
    }

    #[test]
    fn lookup_misses_quietly() {
        let registry = builtin();
        assert!(registry.get_by_id("PRO-001").is_some());
        assert!(registry.get_by_id("PRO-999").is_none());
    }

    #[test]
    fn category_filter_preserves_registration_order() {
        let registry = builtin();
        let ids: Vec<_> = registry
            .filter_by_category("Skill 19")
            .into_iter()
            .map(|agent| agent.meta().id.clone())
            .collect();
        let expected: Vec<_> = (1..=10).map(|n| format!("PRO-{n:03}")).collect();
        assert_eq!(ids, expected);
        assert_eq!(registry.filter_by_category("skill 20").len(), 10);
        assert!(registry.filter_by_category("Skill 2").is_empty());
    }

    #[test]
    fn type_filter_matches_exactly() {
        let registry = Registry::new(vec![
            stub("A", "a", "c", TaskType::Ai),
            stub("B", "b", "c", TaskType::Human),
            stub("C", "c", "c", TaskType::Ai),
        ])
        .unwrap();
        let ids: Vec<_> = registry
            .filter_by_type(TaskType::Ai)
            .into_iter()
            .map(|agent| agent.meta().id.as_str())
            .collect();
        assert_eq!(ids, ["A", "C"]);
        assert!(registry.filter_by_type(TaskType::Hybrid).is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let registry = builtin();
        let hits = registry.search("ETHICS");
        assert!(hits.iter().any(|agent| agent.meta().id == "PRO-001"));
        // Every Skill 19 agent matches through its category title.
        assert!(hits.len() >= 10);
        assert_eq!(registry.search("").len(), registry.len());
        assert!(registry.search("no such agent").is_empty());
    }

    #[test]
    fn list_exposes_only_summary_fields() {
        let registry = builtin();
        let listed = serde_json::to_value(registry.list()).unwrap();
        let first = listed[0].as_object().unwrap();
        let mut keys: Vec<_> = first.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["category", "id", "name", "taskType"]);
        assert_eq!(first["taskType"], "AI");
    }

    #[test]
    fn describe_includes_contract_documents() {
        let registry = builtin();
        let detail = registry.describe("PRO-013").expect("known agent");
        assert_eq!(detail.category, "Skill 20");
        assert_eq!(detail.domain, "Professionalism");
        assert_eq!(detail.cmp_domain.as_deref(), Some("CMP-IS Domain J"));
        assert!(detail.persona.is_some());
        assert!(detail.input_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|field| field == "event_id"));
        assert!(registry.describe("PRO-999").is_none());
    }

    #[test]
    fn stats_count_categories_and_types() {
        let stats = builtin().stats();
        assert_eq!(stats.total_agents, 20);
        assert_eq!(stats.by_category.len(), 2);
        assert_eq!(stats.by_category[0].category, "Skill 19");
        assert_eq!(stats.by_category[0].count, 10);
        assert_eq!(stats.by_task_type.ai, 20);

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalAgents"], 20);
        assert_eq!(value["byTaskType"]["Human"], 0);
    }
}
