//! The untyped document representation.
//!
//! Backends traffic in `Value` trees; the typed layer converts them to and
//! from domain types. Document fields are always a `Value::Map` at the top
//! level.

use std::collections::BTreeMap;

/// A tree-shaped untyped value.
///
/// Maps directly to JSON-like data, with two additions JSON lacks:
/// `Integer` is kept separate from `Float`, and `Bytes` carries binary
/// fields for backends that support them.
///
/// `BTreeMap` keeps field ordering deterministic, which matters for
/// comparison in tests and for stable wire output.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value. Distinct from "document doesn't exist".
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Binary field data.
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Field map. Every document's top level has this shape.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// An empty field map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Look up a field by name.
    ///
    /// Returns `None` for non-map values and missing fields alike.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(name),
            _ => None,
        }
    }

    /// Borrow the field map, if this value is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Take the field map out of this value, if it is one.
    pub fn into_map(self) -> Option<BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

// Conversions from common primitives.

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<(String, T)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup() {
        let v: Value = [
            ("name".to_string(), Value::from("Alice")),
            ("age".to_string(), Value::from(30i64)),
        ]
        .into_iter()
        .collect();

        assert_eq!(v.field("name"), Some(&Value::from("Alice")));
        assert_eq!(v.field("missing"), None);
        assert_eq!(Value::from(1i64).field("name"), None);
    }

    #[test]
    fn predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::map().is_map());
        assert!(Value::from(vec![1i64, 2]).is_array());
        assert!(!Value::from("x").is_map());
    }

    #[test]
    fn into_map() {
        assert!(Value::map().into_map().is_some());
        assert!(Value::from(3i64).into_map().is_none());
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i32), Value::Integer(7));
        assert_eq!(Value::from(2.5f64), Value::Float(2.5));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );
    }
}
