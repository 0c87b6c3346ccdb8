//! Loosely typed key/value data attached to graph nodes and edges.
//!
//! The editor stores node properties as an open JSON object so that any
//! field a property panel writes survives until save. Reads go through
//! typed accessors which check both presence and primitive type; a value
//! of the wrong type reads as `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open JSON object with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vars {
    inner: Map<String, Value>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn set<K, V>(
        &mut self,
        key: K,
        value: V,
    ) where
        K: Into<String>,
        V: Into<Value>,
    {
        self.inner.insert(key.into(), value.into());
    }

    /// Builder-style [`Vars::set`].
    pub fn with<K, V>(
        mut self,
        key: K,
        value: V,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.set(key, value);
        self
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.inner.contains_key(key)
    }

    pub fn remove(
        &mut self,
        key: &str,
    ) -> Option<Value> {
        self.inner.remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    /// Read a string value.
    pub fn get_str(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.inner.get(key).and_then(Value::as_str)
    }

    /// Read a boolean value.
    pub fn get_bool(
        &self,
        key: &str,
    ) -> Option<bool> {
        self.inner.get(key).and_then(Value::as_bool)
    }

    /// Read any finite number.
    pub fn get_f64(
        &self,
        key: &str,
    ) -> Option<f64> {
        self.inner.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
    }

    /// Read a non-negative integer.
    ///
    /// Floats are accepted when they carry no fractional part (`1000.0`),
    /// since the editor front end does not distinguish integer and float.
    pub fn get_u64(
        &self,
        key: &str,
    ) -> Option<u64> {
        let value = self.inner.get(key)?;
        if let Some(v) = value.as_u64() {
            return Some(v);
        }
        value.as_f64().filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64).map(|v| v as u64)
    }

    /// Read a non-negative integer that fits in `u32`.
    pub fn get_u32(
        &self,
        key: &str,
    ) -> Option<u32> {
        self.get_u64(key).and_then(|v| u32::try_from(v).ok())
    }

    /// Merge another map into this one, key by key.
    ///
    /// Incoming values overwrite existing ones; a JSON `null` removes the key.
    pub fn merge(
        &mut self,
        other: Vars,
    ) {
        for (key, value) in other.inner {
            if value.is_null() {
                self.inner.remove(&key);
            } else {
                self.inner.insert(key, value);
            }
        }
    }
}

impl From<Map<String, Value>> for Vars {
    fn from(inner: Map<String, Value>) -> Self {
        Self {
            inner,
        }
    }
}

impl From<Vars> for Value {
    fn from(vars: Vars) -> Self {
        Value::Object(vars.inner)
    }
}

impl TryFrom<Value> for Vars {
    type Error = crate::StepflowError;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Object(inner) => Ok(Self {
                inner,
            }),
            other => Err(crate::StepflowError::Convert(format!("expected a json object, found: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Vars;

    fn vars(value: serde_json::Value) -> Vars {
        Vars::try_from(value).unwrap()
    }

    #[test]
    fn test_typed_getters_check_type() {
        let v = vars(json!({"delay": "not-a-number", "timeout": 3000, "critical": true, "label": "Wait"}));

        assert_eq!(v.get_u64("delay"), None);
        assert_eq!(v.get_u64("timeout"), Some(3000));
        assert_eq!(v.get_bool("critical"), Some(true));
        assert_eq!(v.get_bool("timeout"), None);
        assert_eq!(v.get_str("label"), Some("Wait"));
        assert_eq!(v.get_str("missing"), None);
    }

    #[test]
    fn test_get_u64_accepts_whole_floats_only() {
        let v = vars(json!({"a": 1000.0, "b": 1.5, "c": -3}));

        assert_eq!(v.get_u64("a"), Some(1000));
        assert_eq!(v.get_u64("b"), None);
        assert_eq!(v.get_u64("c"), None);
    }

    #[test]
    fn test_get_u32_rejects_overflow() {
        let v = vars(json!({"n": 5_000_000_000u64}));
        assert_eq!(v.get_u32("n"), None);
        assert_eq!(v.get_u64("n"), Some(5_000_000_000));
    }

    #[test]
    fn test_merge_overwrites_and_removes() {
        let mut v = vars(json!({"delay": 100, "critical": true}));
        v.merge(vars(json!({"delay": 200, "critical": null, "timeout": 50})));

        assert_eq!(v.get_u64("delay"), Some(200));
        assert!(!v.contains_key("critical"));
        assert_eq!(v.get_u64("timeout"), Some(50));
    }

    #[test]
    fn test_try_from_non_object() {
        assert!(Vars::try_from(json!([1, 2])).is_err());
    }
}
