//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A caller-supplied argument that was required but absent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Argument {
    TypeName,
    Id,
    FieldName,
    FieldValue,
}

impl core::fmt::Display for Argument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Argument::TypeName => "class name",
            Argument::Id => "instance id",
            Argument::FieldName => "attribute name",
            Argument::FieldValue => "value",
        };
        f.write_str(name)
    }
}

/// Domain-level error.
///
/// Every variant is a local, recoverable condition. The caller decides whether
/// to prompt, retry or abort; nothing in the domain layer retries on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No live record exists under the requested type and id.
    #[error("no {kind} found with id {id}")]
    NotFound { kind: String, id: String },

    /// A type name that is not in the registration table.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Malformed persisted data (timestamp, composite key, discriminator).
    #[error("format error: {0}")]
    Format(String),

    /// A required caller input was not supplied.
    #[error("{0} missing")]
    MissingArgument(Argument),

    /// A field name outside the declared schema of the type.
    #[error("{kind} has no field named '{field}'")]
    UnknownField { kind: String, field: String },

    /// A field that is managed by the entity itself.
    #[error("field '{0}' is read-only")]
    ReadOnlyField(String),

    /// A value that cannot be coerced to the field's declared kind.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl DomainError {
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn missing(argument: Argument) -> Self {
        Self::MissingArgument(argument)
    }

    pub fn unknown_field(kind: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            kind: kind.into(),
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
