//! Amenities offered by places.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hbnb_core::field::to_text;
use hbnb_core::{DomainError, DomainResult, Entity, EntityMeta, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    meta: EntityMeta,
    #[serde(default)]
    pub name: String,
}

impl Amenity {
    pub fn new() -> Self {
        Self {
            meta: EntityMeta::new(),
            name: String::new(),
        }
    }
}

impl Default for Amenity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Amenity {
    const TYPE_NAME: &'static str = "Amenity";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::text("name")];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn assign(&mut self, spec: &FieldSpec, value: Value) -> DomainResult<()> {
        match spec.name {
            "name" => self.name = to_text(spec.name, value)?,
            other => return Err(DomainError::unknown_field(Self::TYPE_NAME, other)),
        }
        Ok(())
    }
}

impl core::fmt::Display for Amenity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}
