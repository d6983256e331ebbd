//! Validation outcome types.

use serde::Serialize;
use std::collections::BTreeMap;

/// Per-field errors keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<ErrorKind>>;

/// Why a single field's value was not accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field has no value
    #[error("This field is required")]
    Required,

    /// The value has the wrong shape for the field's kind
    #[error("Expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The value has the right shape but breaks a kind-specific rule
    #[error(transparent)]
    Constraint(#[from] Constraint),
}

impl ErrorKind {
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Stable code for clients: `required`, `type_mismatch` or `constraint`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::Constraint(_) => "constraint",
        }
    }
}

/// Kind-specific rule a value broke.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    #[error("'{value}' is not one of the available options")]
    NotAnOption { value: String },

    #[error("'{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("'{value}' is not a valid date and time")]
    InvalidDateTime { value: String },

    #[error("Must be at least {min}")]
    BelowMinimum { min: f64, value: f64 },

    #[error("Must be at most {max}")]
    AboveMaximum { max: f64, value: f64 },

    #[error("Must be at least {min_length} characters")]
    TooShort { min_length: usize, length: usize },

    #[error("Must be at most {max_length} characters")]
    TooLong { max_length: usize, length: usize },

    #[error("Files of type '{extension}' are not accepted (allowed: {})", .accepted.join(", "))]
    ExtensionNotAccepted {
        extension: String,
        accepted: Vec<String>,
    },

    #[error("File is {size_kb} KB, the limit is {max_size_kb} KB")]
    FileTooLarge { size_kb: u64, max_size_kb: u64 },
}

/// Non-fatal observations made while validating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// The response carries a key that matches no field, typically a stale
    /// draft value for a field that has since been removed
    UnknownKey { key: String },

    /// A field's kind is not registered, so its value was not checked
    UnsupportedKind { field: String, kind: String },
}

/// Result of validating a response against a schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationReport {
    field_errors: FieldErrors,
    warnings: Vec<ValidationWarning>,
    is_submittable: bool,
}

impl ValidationReport {
    pub(crate) fn new(field_errors: FieldErrors, warnings: Vec<ValidationWarning>) -> Self {
        let is_submittable = field_errors.is_empty();
        Self {
            field_errors,
            warnings,
            is_submittable,
        }
    }

    /// True iff no field has an error. Warnings never affect this.
    pub fn is_submittable(&self) -> bool {
        self.is_submittable
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Errors for one field; empty when the field is valid.
    pub fn errors_for(&self, name: &str) -> &[ErrorKind] {
        self.field_errors
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Number of fields with at least one error.
    pub fn error_count(&self) -> usize {
        self.field_errors.len()
    }

    pub fn into_field_errors(self) -> FieldErrors {
        self.field_errors
    }
}
