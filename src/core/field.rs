//! Write payloads and field value helpers

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field-name to value mapping carried by a write call
///
/// Insertion order is preserved. Presence is explicit: a field set to
/// `null` is present, a field never set is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteData(IndexMap<String, Value>);

impl WriteData {
    /// Create an empty payload
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build a payload from a JSON object
    ///
    /// Returns `None` when `value` is not an object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map.into_iter().collect())),
            _ => None,
        }
    }

    /// Convert the payload back to a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Check whether a field is explicitly present
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Get a field value if present
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`WriteData::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Merge every field of `patch` into this payload
    pub fn merge(&mut self, patch: &WriteData) {
        for (k, v) in patch.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for WriteData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Loose truthiness of a field value
///
/// Absent, `null`, `false`, zero and the empty string are falsy.
/// Everything else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_distinguishes_null_from_absent() {
        let data = WriteData::new().with("email", Value::Null);

        assert!(data.contains_field("email"));
        assert_eq!(data.get("email"), Some(&Value::Null));
        assert!(!data.contains_field("password"));
        assert_eq!(data.get("password"), None);
    }

    #[test]
    fn test_from_json_object() {
        let data = WriteData::from_json(json!({"email": "a@b.c", "age": 3})).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("age"), Some(&json!(3)));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(WriteData::from_json(json!([1, 2])).is_none());
        assert!(WriteData::from_json(json!("x")).is_none());
    }

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut data = WriteData::new().with("a", 1).with("b", 2);
        data.set("a", 10);

        let keys: Vec<&String> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(data.get("a"), Some(&json!(10)));
    }

    #[test]
    fn test_merge_overwrites_and_adds() {
        let mut row = WriteData::new().with("email", "old@x.io").with("name", "Ann");
        row.merge(&WriteData::new().with("email", "new@x.io").with("age", 30));

        assert_eq!(row.get("email"), Some(&json!("new@x.io")));
        assert_eq!(row.get("name"), Some(&json!("Ann")));
        assert_eq!(row.get("age"), Some(&json!(30)));
    }

    #[test]
    fn test_to_json_roundtrip_shape() {
        let data = WriteData::new().with("email", "a@b.c");
        assert_eq!(data.to_json(), json!({"email": "a@b.c"}));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(0.0))));
        assert!(!is_truthy(Some(&json!(""))));

        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(-1))));
        assert!(is_truthy(Some(&json!("x"))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }
}
