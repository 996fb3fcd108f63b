//! Record operations consumed by the command shell.
//!
//! Arguments arrive as raw, possibly-absent tokens so that each missing piece
//! is reported precisely. Checks run in a fixed order: type name missing,
//! type unknown, id missing, record missing, field name missing, value
//! missing.

use serde_json::{Map, Value};

use hbnb_core::{Argument, DomainError, DomainResult, EntityId};
use hbnb_models::{EntityKind, Record};

use crate::error::StorageResult;
use crate::store::Store;

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn resolve_kind(type_name: Option<&str>) -> DomainResult<EntityKind> {
    let name = present(type_name).ok_or(DomainError::missing(Argument::TypeName))?;
    EntityKind::resolve(name)
}

fn require_id(id: Option<&str>) -> DomainResult<&str> {
    present(id).ok_or(DomainError::missing(Argument::Id))
}

impl Store {
    /// Create, register and persist a new record. Returns its id.
    ///
    /// If the save fails the record is unregistered again.
    pub fn create(
        &mut self,
        type_name: Option<&str>,
        initial: Map<String, Value>,
    ) -> StorageResult<EntityId> {
        let kind = resolve_kind(type_name)?;
        let id = self.insert_new(kind, initial)?;
        if let Err(e) = self.save() {
            self.remove(kind, id.as_str());
            return Err(e);
        }
        tracing::info!(kind = %kind, id = %id, "created");
        Ok(id)
    }

    pub fn show(&self, type_name: Option<&str>, id: Option<&str>) -> DomainResult<&Record> {
        let kind = resolve_kind(type_name)?;
        let id = require_id(id)?;
        self.find(kind, id)
            .ok_or_else(|| DomainError::not_found(kind.name(), id))
    }

    /// Remove a record and persist.
    pub fn destroy(&mut self, type_name: Option<&str>, id: Option<&str>) -> StorageResult<()> {
        let kind = resolve_kind(type_name)?;
        let id = require_id(id)?;
        self.remove(kind, id)
            .ok_or_else(|| DomainError::not_found(kind.name(), id))?;
        self.save()?;
        tracing::info!(kind = %kind, id = %id, "destroyed");
        Ok(())
    }

    /// Rendered records in listing order, optionally filtered by type.
    pub fn list(&self, type_name: Option<&str>) -> DomainResult<Vec<String>> {
        let filter = present(type_name).map(EntityKind::resolve).transpose()?;
        Ok(self
            .all()
            .map(|(_, record)| record)
            .filter(|record| filter.is_none_or(|kind| record.kind() == kind))
            .map(Record::describe)
            .collect())
    }

    /// Number of live records, optionally of one type.
    pub fn count(&self, type_name: Option<&str>) -> DomainResult<usize> {
        match present(type_name) {
            Some(name) => Ok(self.registry().count(EntityKind::resolve(name)?)),
            None => Ok(self.len()),
        }
    }

    /// Set one declared field, refresh `updated_at` and persist.
    pub fn update(
        &mut self,
        type_name: Option<&str>,
        id: Option<&str>,
        field_name: Option<&str>,
        field_value: Option<Value>,
    ) -> StorageResult<()> {
        let kind = resolve_kind(type_name)?;
        let id = require_id(id)?;
        let record = self
            .find_mut(kind, id)
            .ok_or_else(|| DomainError::not_found(kind.name(), id))?;
        let field_name = present(field_name).ok_or(DomainError::missing(Argument::FieldName))?;
        let value = field_value.ok_or(DomainError::missing(Argument::FieldValue))?;

        record.set_field(field_name, value)?;
        self.touch(kind, id)?;
        tracing::info!(kind = %kind, id = %id, field = field_name, "updated");
        Ok(())
    }

    /// Set several fields at once; either all apply or none do. Touches and
    /// persists once.
    pub fn update_many(
        &mut self,
        type_name: Option<&str>,
        id: Option<&str>,
        fields: Map<String, Value>,
    ) -> StorageResult<()> {
        let kind = resolve_kind(type_name)?;
        let id = require_id(id)?;
        let record = self
            .find_mut(kind, id)
            .ok_or_else(|| DomainError::not_found(kind.name(), id))?;
        if fields.is_empty() {
            return Err(DomainError::missing(Argument::FieldName).into());
        }

        record.set_fields(fields)?;
        self.touch(kind, id)?;
        tracing::info!(kind = %kind, id = %id, "updated");
        Ok(())
    }
}
