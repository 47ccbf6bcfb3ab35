//! Render context handed to the template engine.
//!
//! A context is a flat, string-keyed object whose values are strings,
//! booleans, numbers, sequences or null. It is built fresh for every
//! generation run and discarded after rendering.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// String-keyed values referenced by template markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from any serializable struct or map.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `data` does not serialize to a JSON object
    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self> {
        match serde_json::to_value(data) {
            Ok(Value::Object(values)) => Ok(Self { values }),
            Ok(other) => Err(Error::ConfigError(format!(
                "render context must be an object, got {}",
                other
            ))),
            Err(e) => Err(Error::ConfigError(e.to_string())),
        }
    }

    /// Inserts a value, replacing any previous value under `key`.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Inserts a value only when `key` is not already present.
    pub fn insert_missing<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coerces the value under `key` to a boolean. Absent keys are falsy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).map(is_truthy).unwrap_or(false)
    }

    /// String form of the value under `key`; empty for absent or null values.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(to_display).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Context {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Truthiness rule for conditional blocks.
///
/// `false`, null, numeric zero and the empty string are falsy. Everything
/// else is truthy, including empty sequences and objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Default textual conversion used by interpolation and iteration.
pub fn to_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_display).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_display() {
        assert_eq!(to_display(&json!(null)), "");
        assert_eq!(to_display(&json!(21)), "21");
        assert_eq!(to_display(&json!(true)), "true");
        assert_eq!(to_display(&json!(["a", 1])), "a,1");
    }

    #[test]
    fn test_from_serialize_rejects_scalars() {
        assert!(Context::from_serialize(&42).is_err());
        let ctx = Context::from_serialize(&json!({"name": "demo"})).unwrap();
        assert_eq!(ctx.display("name"), "demo");
    }

    #[test]
    fn test_insert_missing_keeps_existing() {
        let mut ctx = Context::new();
        ctx.insert("appName", "Demo");
        ctx.insert_missing("appName", "Other");
        ctx.insert_missing("extra", true);
        assert_eq!(ctx.display("appName"), "Demo");
        assert!(ctx.is_truthy("extra"));
    }
}
