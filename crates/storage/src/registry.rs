//! Ordered in-memory registry of live records.

use indexmap::IndexMap;

use hbnb_core::composite_key;
use hbnb_models::{EntityKind, Record};

/// Mapping from composite key (`"<TypeName>.<id>"`) to the live record.
///
/// Listing follows first-insertion order; replacing a key keeps its position.
/// The internal map is never handed out mutably, so every removal goes
/// through [`Registry::remove`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, Record>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(key, record)` pair in listing order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Record)> + '_ {
        self.entries
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.all().map(|(_, record)| record)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Record> + '_ {
        self.records().filter(move |record| record.kind() == kind)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Insert or replace the record at its composite key.
    ///
    /// Returns the record previously stored under that key.
    pub fn register(&mut self, record: Record) -> Option<Record> {
        let key = record.key();
        tracing::debug!(key = %key, "register");
        self.entries.insert(key, record)
    }

    pub fn find(&self, kind: EntityKind, id: &str) -> Option<&Record> {
        self.entries.get(&composite_key(kind.name(), id))
    }

    /// Mutable access to one record. Identity fields stay immutable through
    /// the record's own API.
    pub fn find_mut(&mut self, kind: EntityKind, id: &str) -> Option<&mut Record> {
        self.entries.get_mut(&composite_key(kind.name(), id))
    }

    /// Remove the record if present. Absent keys are not an error.
    pub fn remove(&mut self, kind: EntityKind, id: &str) -> Option<Record> {
        let key = composite_key(kind.name(), id);
        let removed = self.entries.shift_remove(&key)?;
        tracing::debug!(key = %key, "remove");
        Some(removed)
    }
}

/// Equal contents in the same listing order.
impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}
