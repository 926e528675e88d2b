use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One log-style record reported by an upstream service.
///
/// Only `level` is interpreted; every other field is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricEntry(Map<String, Value>);

impl MetricEntry {
    #[cfg(test)]
    pub(crate) fn with_level(level: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("level".to_string(), Value::String(level.into()));
        Self(fields)
    }

    /// The entry's `level` when present as a string.
    pub fn level(&self) -> Option<&str> {
        self.0.get("level").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_pass_through() {
        let raw = json!([
            {"level": "info", "message": "started", "ts": 1700000000},
            {"level": "error", "code": 42}
        ]);
        let entries: Vec<MetricEntry> = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(entries[0].level(), Some("info"));
        assert_eq!(entries[1].get("code"), Some(&json!(42)));
        assert_eq!(serde_json::to_value(&entries).unwrap(), raw);
    }

    #[test]
    fn test_level_must_be_string() {
        let entry: MetricEntry = serde_json::from_value(json!({"level": 3})).unwrap();
        assert_eq!(entry.level(), None);

        let entry: MetricEntry = serde_json::from_value(json!({"message": "no level"})).unwrap();
        assert_eq!(entry.level(), None);
    }

    #[test]
    fn test_non_object_rejected() {
        let result: Result<Vec<MetricEntry>, _> = serde_json::from_value(json!(["info"]));
        assert!(result.is_err());
    }
}
