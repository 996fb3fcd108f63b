//! Snapshot codec between a [`Registry`] and its JSON document.
//!
//! The document is a single JSON object keyed by composite key, each value the
//! record's serialized field mapping (with `__class__`). Restoring is
//! all-or-nothing: the first bad entry aborts the whole document.

use serde_json::{Map, Value};

use hbnb_core::{split_key, DomainError, DomainResult, CLASS_FIELD};
use hbnb_models::{EntityKind, Record};

use crate::error::StorageResult;
use crate::registry::Registry;

/// Top-level persisted document.
pub type Document = Map<String, Value>;

/// Serialize every record, in registry order.
pub fn dump(registry: &Registry) -> DomainResult<Document> {
    let mut document = Document::new();
    for (key, record) in registry.all() {
        document.insert(key.to_string(), Value::Object(record.to_fields()?));
    }
    Ok(document)
}

/// Build a fresh registry from a document.
pub fn restore(document: Document) -> DomainResult<Registry> {
    let mut registry = Registry::new();
    for (key, value) in document {
        let record = restore_entry(&key, value)?;
        registry.register(record);
    }
    Ok(registry)
}

fn restore_entry(key: &str, value: Value) -> DomainResult<Record> {
    let (type_name, id) = split_key(key)?;

    // A document naming a type we do not know is corrupt, not a caller error.
    let kind = EntityKind::resolve(type_name)
        .map_err(|_| DomainError::format(format!("unknown type {type_name:?} in key {key:?}")))?;

    let Value::Object(fields) = value else {
        return Err(DomainError::format(format!("entry {key:?} is not an object")));
    };

    match fields.get(CLASS_FIELD) {
        Some(Value::String(class)) if class == type_name => {}
        Some(other) => {
            return Err(DomainError::format(format!(
                "entry {key:?} has {CLASS_FIELD} {other}, expected {type_name:?}"
            )));
        }
        None => {
            return Err(DomainError::format(format!("entry {key:?} has no {CLASS_FIELD}")));
        }
    }

    match fields.get("id") {
        Some(Value::String(embedded)) if embedded == id => {}
        other => {
            return Err(DomainError::format(format!(
                "entry {key:?} has id {}, expected {id:?}",
                other.map_or_else(|| "<missing>".to_string(), Value::to_string)
            )));
        }
    }

    kind.reconstruct(fields)
}

/// Render the whole document into one buffer.
pub fn encode(document: &Document) -> StorageResult<Vec<u8>> {
    Ok(serde_json::to_vec(document)?)
}

pub fn decode(bytes: &[u8]) -> DomainResult<Document> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| DomainError::format(format!("invalid JSON document: {e}")))?;
    match value {
        Value::Object(document) => Ok(document),
        other => Err(DomainError::format(format!(
            "document must be a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
