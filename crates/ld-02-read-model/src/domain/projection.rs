//! # Projection
//!
//! Decoding of raw ledger field bags into typed view models. The RPC renders
//! `u64` fields as decimal strings and nested structs as `{ type, fields }`
//! wrappers; both shapes are accepted here so view models never see JSON.

use serde_json::{Map, Value};
use shared_types::LedgerObject;

use super::errors::SchemaError;

/// A view model decodable from one ledger object.
pub trait Projection: Clone + Send + Sync + 'static {
    /// Decode `object`. The struct type has already been checked.
    fn decode(object: &LedgerObject) -> Result<Self, SchemaError>;
}

/// Field bag of a contract struct.
pub fn move_fields(object: &LedgerObject) -> Result<&Map<String, Value>, SchemaError> {
    object
        .move_fields()
        .map(|(_, fields)| fields)
        .ok_or(SchemaError::NotAMoveObject)
}

/// Whether `found` names the same struct as `expected`, comparing the
/// package address in normalized form.
pub fn same_struct_type(expected: &str, found: &str) -> bool {
    fn split(ty: &str) -> Option<(shared_types::ObjectId, &str)> {
        let (package, rest) = ty.split_once("::")?;
        Some((package.parse().ok()?, rest))
    }

    match (split(expected), split(found)) {
        (Some(a), Some(b)) => a == b,
        _ => expected == found,
    }
}

/// Text field. Missing, null or empty yields `default`.
pub fn text_field(
    fields: &Map<String, Value>,
    name: &str,
    default: &str,
) -> Result<String, SchemaError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) if s.is_empty() => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::invalid(
            name,
            format!("expected string, found {}", kind(other)),
        )),
    }
}

/// Unsigned integer field rendered as a number or a decimal string.
/// Missing or null yields `default`.
pub fn u64_field(fields: &Map<String, Value>, name: &str, default: u64) -> Result<u64, SchemaError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| SchemaError::invalid(name, format!("{} is not a u64", n))),
        Some(Value::String(s)) => s
            .parse::<u64>()
            .map_err(|_| SchemaError::invalid(name, format!("{:?} is not a u64", s))),
        Some(other) => Err(SchemaError::invalid(
            name,
            format!("expected integer, found {}", kind(other)),
        )),
    }
}

/// Nested struct field, unwrapping the RPC's `{ type, fields }` wrapper.
pub fn struct_field<'a>(
    fields: &'a Map<String, Value>,
    name: &str,
) -> Result<Option<&'a Map<String, Value>>, SchemaError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => match inner.get("fields") {
            Some(Value::Object(nested)) => Ok(Some(nested)),
            Some(other) => Err(SchemaError::invalid(
                name,
                format!("wrapped fields must be an object, found {}", kind(other)),
            )),
            None => Ok(Some(inner)),
        },
        Some(other) => Err(SchemaError::invalid(
            name,
            format!("expected struct, found {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_text_field_defaults() {
        let fields = bag(json!({ "name": "", "category": null }));
        assert_eq!(text_field(&fields, "name", "Unknown").unwrap(), "Unknown");
        assert_eq!(
            text_field(&fields, "category", "Uncategorized").unwrap(),
            "Uncategorized"
        );
        assert_eq!(text_field(&fields, "missing", "x").unwrap(), "x");
    }

    #[test]
    fn test_text_field_rejects_numbers() {
        let fields = bag(json!({ "name": 5 }));
        assert!(matches!(
            text_field(&fields, "name", "Unknown"),
            Err(SchemaError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_u64_field_accepts_decimal_strings() {
        let fields = bag(json!({ "a": "15000000", "b": 7, "c": "abc", "d": -1 }));
        assert_eq!(u64_field(&fields, "a", 0).unwrap(), 15_000_000);
        assert_eq!(u64_field(&fields, "b", 0).unwrap(), 7);
        assert_eq!(u64_field(&fields, "missing", 0).unwrap(), 0);
        assert!(u64_field(&fields, "c", 0).is_err());
        assert!(u64_field(&fields, "d", 0).is_err());
    }

    #[test]
    fn test_struct_field_unwraps() {
        let wrapped = bag(json!({ "pizza": { "type": "0x1::pizza::Pizza", "fields": { "cheese": 2 } } }));
        let flat = bag(json!({ "pizza": { "cheese": 2 } }));
        for fields in [wrapped, flat] {
            let inner = struct_field(&fields, "pizza").unwrap().unwrap();
            assert_eq!(inner.get("cheese"), Some(&json!(2)));
        }
        assert!(struct_field(&bag(json!({})), "pizza").unwrap().is_none());
        assert!(struct_field(&bag(json!({ "pizza": 1 })), "pizza").is_err());
    }

    #[test]
    fn test_same_struct_type_normalizes_package() {
        let long = format!("0x{}1::pizza::PizzaBox", "0".repeat(63));
        assert!(same_struct_type("0x1::pizza::PizzaBox", &long));
        assert!(!same_struct_type("0x1::pizza::PizzaBox", "0x2::pizza::PizzaBox"));
        assert!(!same_struct_type("0x1::pizza::PizzaBox", "0x1::pizza::Pizza"));
    }
}
