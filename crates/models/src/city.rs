//! Cities, each belonging to a state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hbnb_core::field::to_text;
use hbnb_core::{DomainError, DomainResult, Entity, EntityMeta, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    meta: EntityMeta,
    /// Id of the owning `State`. Not checked; may dangle.
    #[serde(default)]
    pub state_id: String,
    #[serde(default)]
    pub name: String,
}

impl City {
    pub fn new() -> Self {
        Self {
            meta: EntityMeta::new(),
            state_id: String::new(),
            name: String::new(),
        }
    }
}

impl Default for City {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for City {
    const TYPE_NAME: &'static str = "City";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::text("state_id"), FieldSpec::text("name")];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn assign(&mut self, spec: &FieldSpec, value: Value) -> DomainResult<()> {
        match spec.name {
            "state_id" => self.state_id = to_text(spec.name, value)?,
            "name" => self.name = to_text(spec.name, value)?,
            other => return Err(DomainError::unknown_field(Self::TYPE_NAME, other)),
        }
        Ok(())
    }
}

impl core::fmt::Display for City {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_fields_includes_discriminator_and_timestamps() {
        let mut city = City::new();
        city.name = "San Francisco".to_string();
        city.state_id = "S1".to_string();

        let fields = city.to_fields().unwrap();
        assert_eq!(fields["__class__"], json!("City"));
        assert_eq!(fields["name"], json!("San Francisco"));
        assert_eq!(fields["state_id"], json!("S1"));
        assert_eq!(fields["id"], json!(city.id().as_str()));
        assert_eq!(fields["created_at"], json!(city.meta().created_at().to_string()));
    }

    #[test]
    fn from_fields_consumes_discriminator() {
        let city = City::new();
        let back = City::from_fields(city.to_fields().unwrap()).unwrap();
        assert_eq!(back, city);
        let again = back.to_fields().unwrap();
        assert_eq!(again.keys().filter(|k| k.as_str() == "__class__").count(), 1);
    }

    #[test]
    fn from_fields_defaults_missing_declared_fields() {
        let city = City::new();
        let mut fields = city.to_fields().unwrap();
        fields.remove("name");
        let back = City::from_fields(fields).unwrap();
        assert_eq!(back.name, "");
    }

    #[test]
    fn from_fields_rejects_unknown_fields_and_bad_timestamps() {
        let city = City::new();

        let mut extra = city.to_fields().unwrap();
        extra.insert("population".to_string(), json!(870_000));
        assert!(matches!(City::from_fields(extra).unwrap_err(), DomainError::Format(_)));

        let mut bad_time = city.to_fields().unwrap();
        bad_time.insert("updated_at".to_string(), json!("2017-09-28 21:03:54"));
        assert!(matches!(City::from_fields(bad_time).unwrap_err(), DomainError::Format(_)));

        let mut wrong_class = city.to_fields().unwrap();
        wrong_class.insert("__class__".to_string(), json!("State"));
        assert!(matches!(City::from_fields(wrong_class).unwrap_err(), DomainError::Format(_)));
    }
}
