//! Input/output contracts.
//!
//! A contract is a JSON Schema document generated from a Rust type with `schemars`.
//! Validation walks the document structurally, collecting every violation with its
//! path, and only then deserializes into the typed value. The walker covers the subset
//! of draft-07 that `schemars` emits for plain data types: `$ref`, `allOf`/`anyOf`/`oneOf`,
//! `type`, `enum`/`const`, object `properties`/`required`/`additionalProperties`, array
//! `items`/`minItems`/`maxItems`, numeric bounds and string lengths.

use std::marker::PhantomData;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Violation;

const MAX_DEPTH: usize = 64;

/// Anything able to check an arbitrary JSON value and turn it into a typed value.
pub trait Contract: Send + Sync {
    type Value;

    fn validate(&self, value: &Value) -> Result<Self::Value, Vec<Violation>>;

    /// The schema document, for introspection only.
    fn schema(&self) -> &Value;
}

/// Contract derived from `T`'s `JsonSchema` impl.
pub struct JsonContract<T> {
    schema: Value,
    _marker: PhantomData<fn() -> T>,
}

impl<T: JsonSchema> JsonContract<T> {
    pub fn new() -> Self {
        let root = schemars::schema_for!(T);
        // A RootSchema is plain data; serializing it cannot fail in practice, and an
        // accept-all schema still leaves the serde pass below in charge.
        let schema = serde_json::to_value(root).unwrap_or(Value::Bool(true));
        Self {
            schema,
            _marker: PhantomData,
        }
    }
}

impl<T: JsonSchema> Default for JsonContract<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Contract for JsonContract<T>
where
    T: DeserializeOwned,
{
    type Value = T;

    fn validate(&self, value: &Value) -> Result<T, Vec<Violation>> {
        let violations = check_schema(&self.schema, value);
        if !violations.is_empty() {
            return Err(violations);
        }

        serde_json::from_value(value.clone())
            .map_err(|err| vec![Violation::new("", err.to_string())])
    }

    fn schema(&self) -> &Value {
        &self.schema
    }
}

impl<T> JsonContract<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Serialize a produced value and re-check it, returning the checked JSON form.
    pub fn conform(&self, value: &T) -> Result<Value, Vec<Violation>> {
        let json = serde_json::to_value(value)
            .map_err(|err| vec![Violation::new("", format!("output not serializable: {err}"))])?;
        self.validate(&json)?;
        Ok(json)
    }
}

/// Check `value` against a JSON Schema document and return all violations found.
pub fn check_schema(root: &Value, value: &Value) -> Vec<Violation> {
    let mut walker = Walker {
        root,
        violations: Vec::new(),
    };
    walker.check(root, value, &mut String::new(), 0);
    walker.violations
}

struct Walker<'a> {
    root: &'a Value,
    violations: Vec<Violation>,
}

impl<'a> Walker<'a> {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    fn check(&mut self, schema: &'a Value, value: &Value, path: &mut String, depth: usize) {
        if depth > MAX_DEPTH {
            self.push(path, "schema nesting too deep");
            return;
        }

        let rules = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                self.push(path, "no value is allowed here");
                return;
            }
            Value::Object(rules) => rules,
            _ => return,
        };

        if let Some(Value::String(reference)) = rules.get("$ref") {
            match self.resolve(reference) {
                Some(target) => self.check(target, value, path, depth + 1),
                None => self.push(path, format!("unresolvable schema reference {reference}")),
            }
        }

        if let Some(Value::Array(all)) = rules.get("allOf") {
            for branch in all {
                self.check(branch, value, path, depth + 1);
            }
        }

        for keyword in ["anyOf", "oneOf"] {
            if let Some(Value::Array(branches)) = rules.get(keyword) {
                self.check_branches(branches, value, path, depth);
            }
        }

        if let Some(Value::Array(allowed)) = rules.get("enum") {
            if !allowed.contains(value) {
                let options = allowed.iter().map(ToString::to_string).collect::<Vec<_>>();
                let message = format!("expected one of [{}], got {value}", options.join(", "));
                self.push(path, message);
                return;
            }
        }

        if let Some(expected) = rules.get("const") {
            if expected != value {
                self.push(path, format!("expected {expected}, got {value}"));
                return;
            }
        }

        if let Some(declared) = rules.get("type") {
            if !type_allows(declared, value) {
                self.push(
                    path,
                    format!("expected {}, got {}", describe_type(declared), type_name(value)),
                );
                return;
            }
        }

        match value {
            Value::Object(fields) => self.check_object(rules, fields, path, depth),
            Value::Array(items) => self.check_array(rules, items, path, depth),
            Value::Number(number) => {
                if let Some(n) = number.as_f64() {
                    self.check_bounds(rules, n, path);
                }
            }
            Value::String(text) => self.check_length(rules, text, path),
            _ => {}
        }
    }

    /// Passes when any branch accepts `value`. When the only non-null branch fails (the
    /// `Option<T>` shape), its own violations are reported so nested paths survive.
    fn check_branches(
        &mut self,
        branches: &'a [Value],
        value: &Value,
        path: &mut String,
        depth: usize,
    ) {
        let mut failed = Vec::with_capacity(branches.len());
        for branch in branches {
            let mut trial = Walker {
                root: self.root,
                violations: Vec::new(),
            };
            trial.check(branch, value, path, depth + 1);
            if trial.violations.is_empty() {
                return;
            }
            if !is_null_only(branch) {
                failed.push(trial.violations);
            }
        }

        match failed.pop() {
            Some(violations) if failed.is_empty() => self.violations.extend(violations),
            _ => {
                let message = format!("{} does not match any allowed shape", type_name(value));
                self.push(path, message);
            }
        }
    }

    fn check_object(
        &mut self,
        rules: &'a Map<String, Value>,
        fields: &Map<String, Value>,
        path: &mut String,
        depth: usize,
    ) {
        if let Some(Value::Array(required)) = rules.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !fields.contains_key(name) {
                    let field_path = child(path, name);
                    self.push(&field_path, "missing required field");
                }
            }
        }

        let properties = match rules.get("properties") {
            Some(Value::Object(properties)) => Some(properties),
            _ => None,
        };
        let extra = rules.get("additionalProperties");

        for (name, field_value) in fields {
            let len = path.len();
            push_segment(path, name);
            match properties.and_then(|props| props.get(name)) {
                Some(field_schema) => self.check(field_schema, field_value, path, depth + 1),
                None => match extra {
                    Some(Value::Bool(false)) => self.push(path, "unexpected field"),
                    Some(extra_schema @ Value::Object(_)) => {
                        self.check(extra_schema, field_value, path, depth + 1)
                    }
                    _ => {}
                },
            }
            path.truncate(len);
        }
    }

    fn check_array(
        &mut self,
        rules: &'a Map<String, Value>,
        items: &[Value],
        path: &mut String,
        depth: usize,
    ) {
        if let Some(min) = rules.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                let message = format!("expected at least {min} items, got {}", items.len());
                self.push(path, message);
            }
        }
        if let Some(max) = rules.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                let message = format!("expected at most {max} items, got {}", items.len());
                self.push(path, message);
            }
        }

        match rules.get("items") {
            Some(Value::Array(positional)) => {
                for (index, (item, item_schema)) in items.iter().zip(positional).enumerate() {
                    let len = path.len();
                    push_segment(path, &index.to_string());
                    self.check(item_schema, item, path, depth + 1);
                    path.truncate(len);
                }
            }
            Some(item_schema) => {
                for (index, item) in items.iter().enumerate() {
                    let len = path.len();
                    push_segment(path, &index.to_string());
                    self.check(item_schema, item, path, depth + 1);
                    path.truncate(len);
                }
            }
            None => {}
        }
    }

    fn check_bounds(&mut self, rules: &Map<String, Value>, n: f64, path: &str) {
        if let Some(min) = rules.get("minimum").and_then(Value::as_f64) {
            if n < min {
                self.push(path, format!("must be >= {min}, got {n}"));
            }
        }
        if let Some(max) = rules.get("maximum").and_then(Value::as_f64) {
            if n > max {
                self.push(path, format!("must be <= {max}, got {n}"));
            }
        }
        if let Some(min) = rules.get("exclusiveMinimum").and_then(Value::as_f64) {
            if n <= min {
                self.push(path, format!("must be > {min}, got {n}"));
            }
        }
        if let Some(max) = rules.get("exclusiveMaximum").and_then(Value::as_f64) {
            if n >= max {
                self.push(path, format!("must be < {max}, got {n}"));
            }
        }
    }

    fn check_length(&mut self, rules: &Map<String, Value>, text: &str, path: &str) {
        let chars = text.chars().count() as u64;
        if let Some(min) = rules.get("minLength").and_then(Value::as_u64) {
            if chars < min {
                self.push(path, format!("must be at least {min} characters"));
            }
        }
        if let Some(max) = rules.get("maxLength").and_then(Value::as_u64) {
            if chars > max {
                self.push(path, format!("must be at most {max} characters"));
            }
        }
    }

    fn resolve(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        self.root.pointer(pointer)
    }
}

fn child(path: &str, segment: &str) -> String {
    let mut next = path.to_string();
    push_segment(&mut next, segment);
    next
}

fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    path.push_str(&segment.replace('~', "~0").replace('/', "~1"));
}

fn type_allows(declared: &Value, value: &Value) -> bool {
    match declared {
        Value::String(expected) => type_matches(value, expected),
        Value::Array(options) => options
            .iter()
            .filter_map(Value::as_str)
            .any(|expected| type_matches(value, expected)),
        _ => true,
    }
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn describe_type(declared: &Value) -> String {
    match declared {
        Value::String(name) => name.clone(),
        Value::Array(options) => options
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}

fn is_null_only(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
    #[serde(rename_all = "snake_case")]
    enum Scope {
        Full,
        Vendor,
    }

    #[derive(Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
    struct Window {
        start_date: String,
        end_date: String,
    }

    #[derive(Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
    struct Request {
        event_id: String,
        scope: Option<Scope>,
        window: Option<Window>,
        tags: Option<Vec<String>>,
        attendees: Option<u32>,
    }

    fn contract() -> JsonContract<Request> {
        JsonContract::new()
    }

    #[test]
    fn accepts_minimal_input() {
        let parsed = contract()
            .validate(&json!({ "event_id": "evt-1" }))
            .expect("minimal input is valid");
        assert_eq!(parsed.event_id, "evt-1");
        assert!(parsed.scope.is_none());
    }

    #[test]
    fn reports_missing_required_field() {
        let violations = contract().validate(&json!({})).unwrap_err();
        assert_eq!(violations, vec![Violation::new("/event_id", "missing required field")]);
    }

    #[test]
    fn rejects_non_object_root() {
        let violations = contract().validate(&json!("evt-1")).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "");
        assert!(violations[0].message.contains("expected object"));
    }

    #[test]
    fn collects_nested_violations_with_paths() {
        let violations = contract()
            .validate(&json!({
                "event_id": 42,
                "scope": "everything",
                "window": { "start_date": "2025-01-01" },
                "tags": ["ok", 3],
                "attendees": -5,
            }))
            .unwrap_err();

        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"/event_id"), "{violations:?}");
        assert!(paths.contains(&"/scope"), "{violations:?}");
        assert!(paths.contains(&"/window/end_date"), "{violations:?}");
        assert!(paths.contains(&"/tags/1"), "{violations:?}");
        assert!(paths.contains(&"/attendees"), "{violations:?}");
    }

    #[test]
    fn optional_struct_reports_inner_field_path() {
        let violations = contract()
            .validate(&json!({
                "event_id": "evt-1",
                "window": { "start_date": 1, "end_date": "2025-01-02" },
            }))
            .unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::new("/window/start_date", "expected string, got number")]
        );
    }

    #[test]
    fn ambiguous_alternatives_report_at_the_field() {
        let schema = json!({
            "anyOf": [
                { "type": "string" },
                { "type": "object", "required": ["code"] }
            ]
        });
        let violations = check_schema(&schema, &json!(7));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "");
        assert!(violations[0].message.contains("does not match any allowed shape"));
    }

    #[test]
    fn enum_violation_lists_options() {
        let violations = check_schema(
            &json!({ "type": "string", "enum": ["full", "vendor"] }),
            &json!("staff"),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("\"full\""));
        assert!(violations[0].message.contains("\"staff\""));
    }

    #[test]
    fn array_items_are_addressed_by_index() {
        let schema = json!({
            "type": "array",
            "items": {
                "type": "object",
                "required": ["name"],
                "properties": { "name": { "type": "string" } }
            },
            "maxItems": 2
        });
        let violations = check_schema(&schema, &json!([{ "name": "a" }, {}, { "name": 1 }]));
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&""));
        assert!(paths.contains(&"/1/name"));
        assert!(paths.contains(&"/2/name"));
    }

    #[test]
    fn closed_objects_flag_unknown_fields() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "integer" } },
            "additionalProperties": false
        });
        let violations = check_schema(&schema, &json!({ "a": 1, "b/c": 2 }));
        assert_eq!(violations, vec![Violation::new("/b~1c", "unexpected field")]);
    }

    #[test]
    fn conform_round_trips_produced_values() {
        let value = Request {
            event_id: "evt-9".into(),
            scope: Some(Scope::Vendor),
            window: None,
            tags: Some(vec!["a".into()]),
            attendees: Some(12),
        };
        let json = contract().conform(&value).expect("produced value conforms");
        assert_eq!(json["scope"], "vendor");
    }
}
