//! Reviews left by users on places.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hbnb_core::field::to_text;
use hbnb_core::{DomainError, DomainResult, Entity, EntityMeta, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    meta: EntityMeta,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
}

impl Review {
    pub fn new() -> Self {
        Self {
            meta: EntityMeta::new(),
            place_id: String::new(),
            user_id: String::new(),
            text: String::new(),
        }
    }
}

impl Default for Review {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Review {
    const TYPE_NAME: &'static str = "Review";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("place_id"),
        FieldSpec::text("user_id"),
        FieldSpec::text("text"),
    ];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn assign(&mut self, spec: &FieldSpec, value: Value) -> DomainResult<()> {
        let slot = match spec.name {
            "place_id" => &mut self.place_id,
            "user_id" => &mut self.user_id,
            "text" => &mut self.text,
            other => return Err(DomainError::unknown_field(Self::TYPE_NAME, other)),
        };
        *slot = to_text(spec.name, value)?;
        Ok(())
    }
}

impl core::fmt::Display for Review {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}
