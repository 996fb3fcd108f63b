//! User accounts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hbnb_core::field::to_text;
use hbnb_core::{describe_as, DomainError, DomainResult, Entity, EntityMeta, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    meta: EntityMeta,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn new() -> Self {
        Self {
            meta: EntityMeta::new(),
            email: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for User {
    const TYPE_NAME: &'static str = "User";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("email"),
        FieldSpec::text("password"),
        FieldSpec::text("first_name"),
        FieldSpec::text("last_name"),
    ];

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn assign(&mut self, spec: &FieldSpec, value: Value) -> DomainResult<()> {
        let slot = match spec.name {
            "email" => &mut self.email,
            "password" => &mut self.password,
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            other => return Err(DomainError::unknown_field(Self::TYPE_NAME, other)),
        };
        *slot = to_text(spec.name, value)?;
        Ok(())
    }

    // Renders under its own name rather than through the trait constant; the
    // output is the same as the default.
    fn describe(&self) -> String {
        describe_as("User", self)
    }
}

impl core::fmt::Display for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_user_has_empty_fields() {
        let user = User::new();
        assert_eq!(user.email, "");
        assert_eq!(user.password, "");
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "");
    }

    #[test]
    fn set_field_updates_declared_fields() {
        let mut user = User::new();
        user.set_field("first_name", json!("Betty")).unwrap();
        user.set_field("email", json!("airbnb@mail.com")).unwrap();
        assert_eq!(user.first_name, "Betty");
        assert_eq!(user.email, "airbnb@mail.com");
    }

    #[test]
    fn set_field_rejects_undeclared_and_managed_fields() {
        let mut user = User::new();
        assert!(matches!(
            user.set_field("age", json!(89)).unwrap_err(),
            DomainError::UnknownField { .. }
        ));
        assert!(matches!(
            user.set_field("id", json!("other")).unwrap_err(),
            DomainError::ReadOnlyField(_)
        ));
    }

    #[test]
    fn describe_matches_generic_rendering() {
        let user = User::new();
        assert_eq!(user.describe(), describe_as(User::TYPE_NAME, &user));
        assert!(user.to_string().starts_with(&format!("[User] ({})", user.id())));
    }
}
