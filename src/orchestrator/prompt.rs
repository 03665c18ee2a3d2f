use serde_json::{Map, Value};

use crate::agents::AgentMeta;
use crate::llm_client::ChatMessage;

const TRUNCATION_MARKER: &str = "…[truncated]";

const RESPONSE_FORMAT: &str = r#"Provide insights in JSON format:
{
  "analysis": "brief analysis",
  "recommendations": ["rec1", "rec2"],
  "risk_factors": ["risk1", "risk2"],
  "confidence_score": 0.85
}"#;

/// Everything the enrichment prompt is assembled from.
pub struct PromptParts<'a> {
    pub meta: &'a AgentMeta,
    pub input: &'a Value,
    pub output: &'a Value,
    pub short_term_memory: Option<&'a str>,
    pub user_preferences: Option<&'a Map<String, Value>>,
}

/// System + user message pair. Each embedded section is capped at `max_section_chars`.
pub fn build_messages(parts: &PromptParts<'_>, max_section_chars: usize) -> Vec<ChatMessage> {
    let domain = parts.meta.domain;
    let mut system = format!(
        "You are an AI assistant enhancing {} agent outputs.\n{}\n",
        domain.focus,
        truncate(parts.meta.persona.as_deref().unwrap_or_default(), max_section_chars),
    );
    if let Some(memory) = parts.short_term_memory.filter(|m| !m.trim().is_empty()) {
        system.push_str("\nRecent Context:\n");
        system.push_str(truncate(memory, max_section_chars));
        system.push('\n');
    }
    if let Some(preferences) = parts.user_preferences {
        let rendered = serde_json::to_string(preferences).unwrap_or_default();
        system.push_str("\nUser Preferences:\n");
        system.push_str(truncate(&rendered, max_section_chars));
        system.push('\n');
    }
    system.push_str(&format!(
        "\nAnalyze the agent output and provide:\n\
         1. Key insights for {}\n\
         2. Practical recommendations for implementation\n\
         3. Potential {} to watch for\n\
         4. A confidence score (0.0-1.0)",
        domain.insight_topic, domain.watch_for,
    ));

    let input = parts.input.to_string();
    let output = parts.output.to_string();
    let user = format!(
        "Agent: {} ({})\nInput: {}{}\nOutput: {}{}\n\n{RESPONSE_FORMAT}",
        parts.meta.name,
        parts.meta.id,
        truncate(&input, max_section_chars),
        marker(&input, max_section_chars),
        truncate(&output, max_section_chars),
        marker(&output, max_section_chars),
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Longest prefix of at most `max_chars` characters, cut on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

fn marker(text: &str, max_chars: usize) -> &'static str {
    if text.chars().nth(max_chars).is_some() {
        TRUNCATION_MARKER
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::pro::PROFESSIONALISM;
    use crate::agents::TaskType;
    use serde_json::json;

    fn meta() -> AgentMeta {
        AgentMeta::new("PRO-001", "Ethics Code Compliance", TaskType::Ai)
            .persona("You are an expert Ethics & Compliance Officer.")
            .domain(&PROFESSIONALISM)
    }

    #[test]
    fn prompt_carries_domain_persona_and_payloads() {
        let meta = meta();
        let input = json!({ "event_id": "evt-1" });
        let output = json!({ "score": 92 });
        let preferences = json!({ "tone": "formal" });
        let messages = build_messages(
            &PromptParts {
                meta: &meta,
                input: &input,
                output: &output,
                short_term_memory: Some("Last audit flagged vendor gifts."),
                user_preferences: preferences.as_object(),
            },
            4000,
        );

        let system = &messages[0].content;
        assert!(system.starts_with(
            "You are an AI assistant enhancing professional ethics, compliance, and career development agent outputs.\nYou are an expert Ethics & Compliance Officer."
        ));
        assert!(system.contains("Recent Context:\nLast audit flagged vendor gifts."));
        assert!(system.contains("User Preferences:\n{\"tone\":\"formal\"}"));
        assert!(system.contains("3. Potential risks or compliance issues to watch for"));

        let user = &messages[1].content;
        assert!(user.starts_with(
            "Agent: Ethics Code Compliance (PRO-001)\nInput: {\"event_id\":\"evt-1\"}\nOutput: {\"score\":92}"
        ));
        assert!(user.contains("\"confidence_score\": 0.85"));
    }

    #[test]
    fn optional_sections_are_omitted() {
        let meta = meta();
        let value = json!({});
        let messages = build_messages(
            &PromptParts {
                meta: &meta,
                input: &value,
                output: &value,
                short_term_memory: Some("   "),
                user_preferences: None,
            },
            4000,
        );
        assert!(!messages[0].content.contains("Recent Context"));
        assert!(!messages[0].content.contains("User Preferences"));
    }

    #[test]
    fn oversized_sections_are_cut_on_char_boundaries() {
        assert_eq!(truncate("행사관리", 2), "행사");
        assert_eq!(truncate("short", 10), "short");

        let meta = meta();
        let input = json!({ "notes": "x".repeat(50) });
        let output = json!({});
        let messages = build_messages(
            &PromptParts {
                meta: &meta,
                input: &input,
                output: &output,
                short_term_memory: None,
                user_preferences: None,
            },
            20,
        );
        assert!(messages[1]
            .content
            .contains("Input: {\"notes\":\"xxxxxxxxxx…[truncated]\nOutput: {}\n"));
    }
}
