//! Declared field schemas and input coercion.
//!
//! Updates arrive as loosely-typed values (shell tokens or JSON literals). Each
//! record type declares its fields with a [`FieldKind`]; values are coerced to
//! that kind before assignment, and anything outside the schema is rejected.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Storage kind of a declared field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    /// Ordered list of record ids.
    IdList,
}

/// One entry of a record type's field schema.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }

    pub const fn float(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Float,
        }
    }

    pub const fn id_list(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::IdList,
        }
    }
}

/// Fields every record carries and manages itself.
pub const MANAGED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Name of the type discriminator in serialized records.
pub const CLASS_FIELD: &str = "__class__";

pub fn is_read_only(name: &str) -> bool {
    name == CLASS_FIELD || MANAGED_FIELDS.contains(&name)
}

pub fn to_text(field: &str, value: Value) -> DomainResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(DomainError::invalid_value(
            field,
            format!("expected text, got {other}"),
        )),
    }
}

pub fn to_integer(field: &str, value: Value) -> DomainResult<i64> {
    let parsed = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| DomainError::invalid_value(field, format!("expected integer, got {value}")))
}

pub fn to_float(field: &str, value: Value) -> DomainResult<f64> {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(DomainError::invalid_value(
            field,
            format!("expected finite number, got {value}"),
        )),
    }
}

pub fn to_id_list(field: &str, value: Value) -> DomainResult<Vec<String>> {
    let value = match value {
        Value::String(s) => serde_json::from_str::<Value>(&s)
            .map_err(|_| DomainError::invalid_value(field, format!("expected list of ids, got {s:?}")))?,
        other => other,
    };
    let Value::Array(items) = value else {
        return Err(DomainError::invalid_value(
            field,
            format!("expected list of ids, got {value}"),
        ));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(DomainError::invalid_value(
                field,
                format!("list entries must be ids, got {other}"),
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_accepts_scalars() {
        assert_eq!(to_text("name", json!("Betty")).unwrap(), "Betty");
        assert_eq!(to_text("name", json!(42)).unwrap(), "42");
        assert!(to_text("name", json!(["a"])).is_err());
    }

    #[test]
    fn integer_parses_strings() {
        assert_eq!(to_integer("max_guest", json!("7")).unwrap(), 7);
        assert_eq!(to_integer("max_guest", json!(3)).unwrap(), 3);
        assert!(to_integer("max_guest", json!("7.5")).is_err());
        assert!(to_integer("max_guest", json!(7.5)).is_err());
    }

    #[test]
    fn float_rejects_non_finite() {
        assert_eq!(to_float("latitude", json!("37.77")).unwrap(), 37.77);
        assert_eq!(to_float("latitude", json!(1)).unwrap(), 1.0);
        assert!(to_float("latitude", json!("inf")).is_err());
        assert!(to_float("latitude", json!("north")).is_err());
    }

    #[test]
    fn id_list_accepts_array_or_encoded_array() {
        assert_eq!(
            to_id_list("amenity_ids", json!(["a", "b"])).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            to_id_list("amenity_ids", json!("[\"c\"]")).unwrap(),
            vec!["c".to_string()]
        );
        assert!(to_id_list("amenity_ids", json!([1])).is_err());
        assert!(to_id_list("amenity_ids", json!("c")).is_err());
    }

    #[test]
    fn managed_fields_are_read_only() {
        assert!(is_read_only("id"));
        assert!(is_read_only("__class__"));
        assert!(!is_read_only("name"));
    }
}
