//! The plain base record: identity and timestamps only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hbnb_core::{DomainError, DomainResult, Entity, EntityMeta, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseModel {
    #[serde(flatten)]
    meta: EntityMeta,
}

impl BaseModel {
    pub fn new() -> Self {
        Self {
            meta: EntityMeta::new(),
        }
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for BaseModel {
    const TYPE_NAME: &'static str = "BaseModel";
    const FIELDS: &'static [FieldSpec] = &[];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn assign(&mut self, spec: &FieldSpec, _value: Value) -> DomainResult<()> {
        Err(DomainError::unknown_field(Self::TYPE_NAME, spec.name))
    }
}

impl core::fmt::Display for BaseModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}
