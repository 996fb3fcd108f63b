//! Entity trait: identity, timestamps and schema-restricted fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};
use crate::field::{is_read_only, FieldSpec, CLASS_FIELD, MANAGED_FIELDS};
use crate::id::EntityId;
use crate::timestamp::Timestamp;

/// Identity and timestamps carried by every record.
///
/// Flattened into each record type so the serialized form is a single flat
/// mapping (`id`, `created_at`, `updated_at`, then the type's own fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    id: EntityId,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl EntityMeta {
    /// Fresh identity: new id, both timestamps set to now.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: EntityId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Advance `updated_at`; strictly monotonic.
    pub fn touch(&mut self) -> DomainResult<()> {
        self.updated_at = Timestamp::after(self.updated_at)?;
        Ok(())
    }
}

impl Default for EntityMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite registry key: `"<TypeName>.<id>"`.
pub fn composite_key(type_name: &str, id: &str) -> String {
    format!("{type_name}.{id}")
}

/// Split a composite key at its first `.`.
pub fn split_key(key: &str) -> DomainResult<(&str, &str)> {
    match key.split_once('.') {
        Some((type_name, id)) if !type_name.is_empty() && !id.is_empty() => Ok((type_name, id)),
        _ => Err(DomainError::format(format!("malformed key: {key:?}"))),
    }
}

/// A persisted record type.
///
/// Implementors declare their name and field schema and provide assignment for
/// their own fields; serialization, reconstruction and the restricted setter
/// are shared.
pub trait Entity: Clone + core::fmt::Debug + Serialize + DeserializeOwned {
    /// Discriminator used in composite keys and as `__class__`.
    const TYPE_NAME: &'static str;

    /// Declared fields, excluding the managed `id`/`created_at`/`updated_at`.
    const FIELDS: &'static [FieldSpec];

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Assign an already-resolved schema field. `spec` is always one of
    /// [`Entity::FIELDS`].
    fn assign(&mut self, spec: &FieldSpec, value: Value) -> DomainResult<()>;

    fn id(&self) -> &EntityId {
        self.meta().id()
    }

    fn key(&self) -> String {
        composite_key(Self::TYPE_NAME, self.id().as_str())
    }

    /// Refresh `updated_at` in memory. Persisting is the store's job.
    fn touch(&mut self) -> DomainResult<()> {
        self.meta_mut().touch()
    }

    /// Setter dispatch restricted to the declared schema.
    fn set_field(&mut self, name: &str, value: Value) -> DomainResult<()> {
        if is_read_only(name) {
            return Err(DomainError::ReadOnlyField(name.to_string()));
        }
        let spec = Self::FIELDS
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| DomainError::unknown_field(Self::TYPE_NAME, name))?;
        self.assign(spec, value)
    }

    /// Every field plus the `__class__` discriminator.
    fn to_fields(&self) -> DomainResult<Map<String, Value>> {
        let value = serde_json::to_value(self)
            .map_err(|e| DomainError::format(format!("{} serialization failed: {e}", Self::TYPE_NAME)))?;
        let Value::Object(mut fields) = value else {
            return Err(DomainError::format(format!(
                "{} did not serialize to a mapping",
                Self::TYPE_NAME
            )));
        };
        fields.insert(CLASS_FIELD.to_string(), Value::String(Self::TYPE_NAME.to_string()));
        Ok(fields)
    }

    /// Rebuild from a serialized mapping without generating identity.
    ///
    /// The discriminator is consumed and must name this type. Fields outside
    /// the schema are rejected instead of being dropped.
    fn from_fields(mut fields: Map<String, Value>) -> DomainResult<Self> {
        match fields.remove(CLASS_FIELD) {
            Some(Value::String(class)) if class == Self::TYPE_NAME => {}
            Some(other) => {
                return Err(DomainError::format(format!(
                    "discriminator {other} does not match {}",
                    Self::TYPE_NAME
                )));
            }
            None => {
                return Err(DomainError::format(format!(
                    "{} record has no {CLASS_FIELD}",
                    Self::TYPE_NAME
                )));
            }
        }

        if let Some(unknown) = fields.keys().find(|name| {
            !MANAGED_FIELDS.contains(&name.as_str())
                && !Self::FIELDS.iter().any(|spec| spec.name == name.as_str())
        }) {
            return Err(DomainError::format(format!(
                "{} has no field named '{unknown}'",
                Self::TYPE_NAME
            )));
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| DomainError::format(format!("invalid {} record: {e}", Self::TYPE_NAME)))
    }

    /// `[<TypeName>] (<id>) <field mapping>`, for display only.
    fn describe(&self) -> String {
        describe_as(Self::TYPE_NAME, self)
    }
}

/// Render a description under an explicit type name.
pub fn describe_as<E: Entity>(type_name: &str, entity: &E) -> String {
    // Serializing plain strings and numbers cannot fail; non-finite floats
    // already render as null.
    let fields = serde_json::to_string(entity).unwrap_or_else(|_| "{}".to_string());
    format!("[{type_name}] ({}) {fields}", entity.id())
}
