//! The record store: registry plus snapshot persistence.

use serde_json::{Map, Value};

use hbnb_core::{DomainError, DomainResult, EntityId};
use hbnb_models::{EntityKind, Record};

use crate::backend::{InMemoryBackend, JsonFileBackend, SnapshotBackend};
use crate::config::StorageConfig;
use crate::engine;
use crate::error::StorageResult;
use crate::registry::Registry;

/// Single source of truth for live records.
///
/// Constructed by the process entry point and passed by reference; there is
/// no global instance. Only [`Store::save`] (and the operations that commit,
/// like [`Store::touch`]) write to the backend.
pub struct Store {
    registry: Registry,
    backend: Box<dyn SnapshotBackend>,
}

impl Store {
    /// An empty store over `backend`. Nothing is read until [`Store::load`].
    pub fn new(backend: impl SnapshotBackend + 'static) -> Self {
        Self {
            registry: Registry::new(),
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }

    /// File-backed store populated from the configured snapshot.
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        let mut store = Self::new(JsonFileBackend::new(&config.file_path));
        store.load()?;
        Ok(store)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Every `(key, record)` pair in listing order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Record)> + '_ {
        self.registry.all()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn find(&self, kind: EntityKind, id: &str) -> Option<&Record> {
        self.registry.find(kind, id)
    }

    pub fn find_mut(&mut self, kind: EntityKind, id: &str) -> Option<&mut Record> {
        self.registry.find_mut(kind, id)
    }

    pub fn register(&mut self, record: Record) -> Option<Record> {
        self.registry.register(record)
    }

    pub fn remove(&mut self, kind: EntityKind, id: &str) -> Option<Record> {
        self.registry.remove(kind, id)
    }

    /// Create a fresh record and register it. Does not persist.
    pub fn insert_new(
        &mut self,
        kind: EntityKind,
        initial: Map<String, Value>,
    ) -> DomainResult<EntityId> {
        let record = Record::create(kind, initial)?;
        let id = record.id().clone();
        self.registry.register(record);
        Ok(id)
    }

    /// Refresh `updated_at` on one record and persist everything.
    pub fn touch(&mut self, kind: EntityKind, id: &str) -> StorageResult<()> {
        let record = self
            .registry
            .find_mut(kind, id)
            .ok_or_else(|| DomainError::not_found(kind.name(), id))?;
        record.touch()?;
        self.save()
    }

    /// Write the full registry as one snapshot.
    pub fn save(&self) -> StorageResult<()> {
        let document = engine::dump(&self.registry)?;
        let snapshot = engine::encode(&document)?;
        self.backend.write(&snapshot)?;
        tracing::info!(records = self.registry.len(), "snapshot saved");
        Ok(())
    }

    /// Replace in-memory contents with the persisted snapshot.
    ///
    /// The new registry is built completely before it replaces the current
    /// one; on error the current contents are left untouched. A missing
    /// snapshot yields an empty registry.
    pub fn load(&mut self) -> StorageResult<()> {
        let restored = match self.backend.read()? {
            Some(snapshot) => engine::restore(engine::decode(&snapshot)?)?,
            None => {
                tracing::warn!("no snapshot found; starting empty");
                Registry::new()
            }
        };
        self.registry = restored;
        tracing::info!(records = self.registry.len(), "snapshot loaded");
        Ok(())
    }
}

impl core::fmt::Debug for Store {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("records", &self.registry.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use hbnb_core::Entity;
    use hbnb_models::{City, User};
    use serde_json::json;

    #[test]
    fn save_then_load_into_fresh_store() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut store = Store::new(backend.clone());

        let mut city = City::new();
        city.name = "San Francisco".to_string();
        city.state_id = "S1".to_string();
        let key = city.key();
        let id = city.id().to_string();
        store.register(city.into());
        store.save().unwrap();

        let mut reloaded = Store::new(backend);
        reloaded.load().unwrap();
        let keys: Vec<&str> = reloaded.all().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![key.as_str()]);

        let city = reloaded
            .find(EntityKind::City, &id)
            .and_then(|r| r.downcast_ref::<City>())
            .unwrap();
        assert_eq!(city.name, "San Francisco");
        assert_eq!(city.state_id, "S1");
    }

    #[test]
    fn load_without_snapshot_empties_the_registry() {
        let mut store = Store::in_memory();
        store.register(User::new().into());

        store.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failed_load_keeps_current_contents() {
        let user = User::new();
        let mut fields = user.to_fields().unwrap();
        fields.insert("__class__".to_string(), json!("State"));
        let mut document = Map::new();
        document.insert(user.key(), Value::Object(fields));
        let backend = InMemoryBackend::with_snapshot(serde_json::to_vec(&document).unwrap());

        let mut store = Store::new(backend);
        let existing = User::new();
        store.register(existing.clone().into());

        let err = store.load().unwrap_err();
        assert!(err.is_format());
        assert_eq!(store.len(), 1);
        assert!(store.find(EntityKind::User, existing.id().as_str()).is_some());
    }

    #[test]
    fn touch_commits_and_advances_updated_at() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut store = Store::new(backend.clone());
        let id = store.insert_new(EntityKind::User, Map::new()).unwrap();
        assert!(backend.snapshot().is_none());

        let before = store.find(EntityKind::User, id.as_str()).unwrap().meta().clone();
        store.touch(EntityKind::User, id.as_str()).unwrap();
        let after = store.find(EntityKind::User, id.as_str()).unwrap().meta().clone();

        assert!(after.updated_at() > before.updated_at());
        assert_eq!(after.created_at(), before.created_at());
        assert!(backend.snapshot().is_some());
    }

    fn snapshot_with_updated_at(user: &User, updated_at: &str) -> InMemoryBackend {
        let mut fields = user.to_fields().unwrap();
        fields.insert("updated_at".to_string(), json!(updated_at));
        let mut document = Map::new();
        document.insert(user.key(), Value::Object(fields));
        InMemoryBackend::with_snapshot(serde_json::to_vec(&document).unwrap())
    }

    #[test]
    fn load_rejects_years_beyond_the_format() {
        let backend = snapshot_with_updated_at(&User::new(), "+262142-12-31T23:59:59.999999");
        let mut store = Store::new(backend);
        assert!(store.load().unwrap_err().is_format());
        assert!(store.is_empty());
    }

    #[test]
    fn touch_past_the_last_instant_is_an_error() {
        let user = User::new();
        let backend = snapshot_with_updated_at(&user, "9999-12-31T23:59:59.999999");
        let mut store = Store::new(backend);
        store.load().unwrap();

        let err = store.touch(EntityKind::User, user.id().as_str()).unwrap_err();
        assert!(err.is_format());
        let stored = store.find(EntityKind::User, user.id().as_str()).unwrap();
        assert_eq!(stored.meta().updated_at().to_string(), "9999-12-31T23:59:59.999999");
    }

    #[test]
    fn touch_on_missing_record_is_not_found() {
        let mut store = Store::in_memory();
        let err = store.touch(EntityKind::User, "nonexistent-id").unwrap_err();
        assert!(err.is_not_found());
    }
}
