use serde_json::{Map, Value};

/// Prefix for API resource names which are not already absolute paths.
pub(crate) const API_PREFIX: &str = "/api/v2/";

/// Fields posted when creating a topic, before the caller's fields are applied.
pub(crate) fn topic_defaults() -> Map<String, Value> {
    let mut fields = Map::with_capacity(3);
    fields.insert("name".to_string(), Value::from(""));
    fields.insert("allow_questions".to_string(), Value::from(false));
    fields.insert("in_support_center".to_string(), Value::from(false));
    fields
}
