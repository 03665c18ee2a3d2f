use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// What could be recovered from a model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Insights {
    /// The first balanced `{...}` block parsed as a JSON object.
    Structured(Map<String, Value>),
    /// Non-empty reply without a usable object; kept verbatim.
    RawText(String),
    /// Empty reply.
    Unavailable,
}

impl Insights {
    pub fn from_response(text: &str) -> Self {
        if text.trim().is_empty() {
            return Insights::Unavailable;
        }

        match first_object(text).and_then(|candidate| serde_json::from_str::<Value>(candidate).ok())
        {
            Some(Value::Object(map)) => Insights::Structured(map),
            _ => Insights::RawText(text.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Insights::Structured(map) => Value::Object(map.clone()),
            Insights::RawText(raw) => json!({ "raw": raw }),
            Insights::Unavailable => Value::Null,
        }
    }
}

impl Serialize for Insights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Insights::Structured(map) => map.serialize(serializer),
            Insights::RawText(raw) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("raw", raw)?;
                map.end()
            }
            Insights::Unavailable => serializer.serialize_none(),
        }
    }
}

/// Slice of the first brace-balanced block, skipping braces inside JSON strings.
/// Returns `None` if no block closes.
fn first_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_wrapped_in_prose() {
        let reply =
            "Here you go:\n```json\n{\"analysis\": \"solid\", \"confidence_score\": 0.8}\n```\nThanks!";
        match Insights::from_response(reply) {
            Insights::Structured(map) => {
                assert_eq!(map["analysis"], "solid");
                assert_eq!(map["confidence_score"], 0.8);
            }
            other => panic!("expected structured insights, got {other:?}"),
        }
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_block() {
        let reply =
            r#"{"analysis": "use {placeholders} and \"quotes\" }", "recommendations": []} trailing }"#;
        let Insights::Structured(map) = Insights::from_response(reply) else {
            panic!("expected structured insights");
        };
        assert_eq!(map["analysis"], "use {placeholders} and \"quotes\" }");
    }

    #[test]
    fn nested_objects_are_kept_whole() {
        let reply =
            r#"note {"analysis": {"summary": "ok"}, "risk_factors": ["late permits"]} {"second": 1}"#;
        let insights = Insights::from_response(reply);
        assert_eq!(
            insights.to_value(),
            json!({ "analysis": { "summary": "ok" }, "risk_factors": ["late permits"] })
        );
    }

    #[test]
    fn prose_without_braces_falls_back_to_raw() {
        let reply = "The compliance posture looks healthy.";
        assert_eq!(
            Insights::from_response(reply),
            Insights::RawText(reply.to_string())
        );
        assert_eq!(
            serde_json::to_value(Insights::from_response(reply)).unwrap(),
            json!({ "raw": reply })
        );
    }

    #[test]
    fn malformed_or_unclosed_blocks_fall_back_to_raw() {
        for reply in ["{analysis: nope}", "{\"analysis\": \"cut off", "[1, 2]"] {
            assert_eq!(
                Insights::from_response(reply),
                Insights::RawText(reply.to_string()),
                "{reply}"
            );
        }
        assert_eq!(Insights::from_response("{}}{"), Insights::Structured(Map::new()));
    }

    #[test]
    fn empty_reply_is_unavailable() {
        assert_eq!(Insights::from_response(""), Insights::Unavailable);
        assert_eq!(Insights::from_response("  \n"), Insights::Unavailable);
        assert_eq!(serde_json::to_value(Insights::Unavailable).unwrap(), Value::Null);
    }
}
