//! Error types crossing the mapping-layer boundary.
//!
//! [`MappingInvalid`] is the only error a marshal call can return; schema
//! construction problems surface earlier, at startup, as [`SchemaError`].

use std::collections::BTreeMap;

use serde::Serialize;

/// Aggregated validation failure for one marshal call.
///
/// Carries a field name to human-readable message mapping covering every
/// failed field, not just the first. A failed marshal never applies any
/// change to the entity it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("mapping validation failed for {} field(s)", errors.len())]
pub struct MappingInvalid {
    errors: BTreeMap<String, String>,
}

impl MappingInvalid {
    pub(crate) fn new(errors: BTreeMap<String, String>) -> Self {
        Self { errors }
    }

    /// Field name to message mapping, in deterministic field-name order.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Consume the error, yielding the underlying mapping.
    #[must_use]
    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Schema definition errors raised by [`crate::SchemaBuilder::build`].
///
/// These are programming errors in the schema wiring and fail fast at
/// definition time rather than on first use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two fields share the same name.
    #[error("duplicate field name: {name}")]
    DuplicateField {
        /// Offending field name.
        name: String,
    },

    /// Two roles share the same name.
    #[error("duplicate role name: {name}")]
    DuplicateRole {
        /// Offending role name.
        name: String,
    },

    /// A role whitelists a field the schema does not declare.
    #[error("role {role} references unknown field: {name}")]
    UnknownRoleField {
        /// Role carrying the unknown name.
        role: String,
        /// The undeclared field name.
        name: String,
    },

    /// A field default does not match the field's declared type.
    #[error("field {name} declares a default that does not match its type")]
    InvalidDefault {
        /// Offending field name.
        name: String,
    },

    /// A writable field was declared without a setter.
    #[error("field {name} is writable but has no setter")]
    MissingSetter {
        /// Offending field name.
        name: String,
    },
}
