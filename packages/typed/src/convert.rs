//! Conversions between the untyped `Value` tree and serde types.
//!
//! The bridge goes through `serde_json::Value`: domain types are serialized
//! with the ordinary serde machinery, then mapped structurally. Binary
//! fields cross the JSON bridge as base64 strings.

use serde::de::DeserializeOwned;
use serde::Serialize;

use docbind_client::Value;

use crate::Error;

/// Deserialize a `Value` into a domain type.
///
/// Decode failures carry the root path; the snapshot extensions relocate
/// them to the document they came from.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::Decode {
        path: docbind_client::Path::root(),
        message: e.to_string(),
    })
}

/// Serialize a domain type into a `Value`.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::Encode {
        message: e.to_string(),
    })?;
    Ok(json_to_value(json))
}

/// Serialize a domain type into document fields.
///
/// Like [`to_value`], but additionally enforces that the result is a field
/// map — the only shape a document can hold. Anything else is an
/// [`Error::InvalidShape`].
pub fn to_document_fields<T: Serialize>(data: &T) -> Result<Value, Error> {
    let value = to_value(data)?;
    if value.is_map() {
        Ok(value)
    } else {
        Err(Error::InvalidShape {
            message: format!("expected a map of named fields, got {:?}", kind_of(&value)),
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Bytes(_) => "bytes",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
    }
}

/// Convert a `Value` to `serde_json::Value`.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Bytes(b) => {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&b);
            serde_json::Value::String(encoded)
        }
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter().map(|(k, v)| (k, value_to_json(v))).collect(),
        ),
    }
}

/// Convert a `serde_json::Value` to a `Value`.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Out-of-range integers survive as strings.
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter().map(|(k, v)| (k, json_to_value(v))).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Account {
        owner: String,
        balance: i64,
        active: bool,
    }

    #[test]
    fn roundtrip_struct() {
        let original = Account {
            owner: "Alice".to_string(),
            balance: 1200,
            active: true,
        };
        let value = to_value(&original).unwrap();
        assert!(value.is_map());
        let recovered: Account = from_value(value).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn document_fields_rejects_non_maps() {
        assert!(matches!(
            to_document_fields(&42i64),
            Err(Error::InvalidShape { .. })
        ));
        assert!(matches!(
            to_document_fields(&vec![1, 2, 3]),
            Err(Error::InvalidShape { .. })
        ));
        assert!(matches!(
            to_document_fields(&"plain string"),
            Err(Error::InvalidShape { .. })
        ));
        assert!(to_document_fields(&Account {
            owner: "a".into(),
            balance: 0,
            active: false
        })
        .is_ok());
    }

    #[test]
    fn numbers_cross_the_bridge() {
        let json = serde_json::json!({"i": 42, "f": 2.75, "neg": -100});
        let value = json_to_value(json);
        assert_eq!(value.field("i"), Some(&Value::Integer(42)));
        assert_eq!(value.field("neg"), Some(&Value::Integer(-100)));
        match value.field("f") {
            Some(Value::Float(f)) => assert!((f - 2.75).abs() < 1e-9),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn nan_becomes_null() {
        assert_eq!(value_to_json(Value::Float(f64::NAN)), serde_json::Value::Null);
    }

    #[test]
    fn bytes_cross_as_base64() {
        let json = value_to_json(Value::Bytes(vec![1, 2, 3, 4]));
        let serde_json::Value::String(s) = json else {
            panic!("expected string");
        };
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD.decode(&s).unwrap();
        assert_eq!(decoded, vec![1, 2, 3, 4]);
    }

    #[test]
    fn decode_failure_reports_serde_message() {
        let value = Value::from("not a struct");
        let err = from_value::<Account>(value).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn option_fields_roundtrip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Sparse {
            required: String,
            optional: Option<i64>,
        }

        let with = Sparse {
            required: "x".into(),
            optional: Some(5),
        };
        let without = Sparse {
            required: "y".into(),
            optional: None,
        };
        let w: Sparse = from_value(to_value(&with).unwrap()).unwrap();
        let wo: Sparse = from_value(to_value(&without).unwrap()).unwrap();
        assert_eq!(w, with);
        assert_eq!(wo, without);
    }
}
