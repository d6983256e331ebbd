//! Error types for form schema operations.
//!
//! Errors are split by the layer that raises them. Structural errors describe a
//! defective schema document and block saving. Builder, response, render and
//! registry errors describe a rejected operation. Per-field validation failures
//! are *not* errors in this sense: they are collected into a
//! [`ValidationReport`](crate::validation::ValidationReport) and never returned
//! as `Err`.

use crate::builder::ElementId;
use crate::validation::ValidationReport;
use serde::Serialize;
use std::fmt;

/// Main error type for the form schema engine.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The schema document is structurally invalid
    #[error("Structural error: {}", join_errors(.0))]
    Structural(Vec<StructuralError>),

    /// A builder operation was rejected
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),

    /// A response document operation was rejected
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// An input event could not be applied to a rendered field
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The field type registry rejected a registration
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A schema file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Position of a field inside a schema, as `sections[section].fields[field]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldLocation {
    pub section: usize,
    pub field: usize,
}

impl FieldLocation {
    pub fn new(section: usize, field: usize) -> Self {
        Self { section, field }
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sections[{}].fields[{}]", self.section, self.field)
    }
}

/// Defects in the schema document itself.
///
/// These are fatal to saving: a schema carrying any of them is never handed to
/// the renderer or validator by a well-behaved caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum StructuralError {
    /// The schema has no sections at all
    #[error("Schema must contain at least one section")]
    NoSections,

    /// A field has an empty machine name
    #[error("Field at {at} has an empty name")]
    EmptyFieldName { at: FieldLocation },

    /// Two fields share a name; response documents are flat, so one would
    /// overwrite the other
    #[error("Field name '{name}' at {second} collides with the field at {first}")]
    DuplicateFieldName {
        name: String,
        first: FieldLocation,
        second: FieldLocation,
    },

    /// A choice field has no options
    #[error("Field '{name}' of type '{kind}' requires at least one option")]
    MissingOptions {
        name: String,
        kind: String,
        at: FieldLocation,
    },

    /// An option string is empty
    #[error("Field '{name}' has a blank option")]
    BlankOption { name: String, at: FieldLocation },

    /// The same option appears twice in one field
    #[error("Field '{name}' lists option '{option}' more than once")]
    DuplicateOption {
        name: String,
        option: String,
        at: FieldLocation,
    },

    /// A field whose kind takes no options carries some
    #[error("Field '{name}' of type '{kind}' does not accept options")]
    UnexpectedOptions {
        name: String,
        kind: String,
        at: FieldLocation,
    },
}

impl StructuralError {
    /// Location of the offending field, if the error is tied to one.
    ///
    /// For name collisions this is the *later* field, which is the one an
    /// editor should be asked to rename.
    pub fn location(&self) -> Option<FieldLocation> {
        match self {
            Self::NoSections => None,
            Self::EmptyFieldName { at }
            | Self::MissingOptions { at, .. }
            | Self::BlankOption { at, .. }
            | Self::DuplicateOption { at, .. }
            | Self::UnexpectedOptions { at, .. } => Some(*at),
            Self::DuplicateFieldName { second, .. } => Some(*second),
        }
    }
}

/// Errors raised by the authoring builder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuilderError {
    /// No section with this id exists in the session
    #[error("Section {0} not found")]
    UnknownSection(ElementId),

    /// No field with this id exists in the session
    #[error("Field {0} not found")]
    UnknownField(ElementId),

    /// The field exists, but not in the section named by the caller
    #[error("Field {field} is not in section {section}")]
    FieldNotInSection {
        field: ElementId,
        section: ElementId,
    },

    /// A list index is outside the list
    #[error("Index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The requested field kind is not registered
    #[error("Field type '{0}' is not supported")]
    UnsupportedKind(String),

    /// A rename would collide with another field's name
    #[error("Field name '{name}' is already in use")]
    NameCollision { name: String },

    /// A rename to an empty name
    #[error("Field name cannot be empty")]
    EmptyName,

    /// The session would serialize to a structurally invalid schema
    #[error("Schema is structurally invalid: {}", join_errors(.0))]
    Structural(Vec<StructuralError>),
}

/// Errors raised when working with response documents.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// A response document must be a JSON object
    #[error("Response document must be a JSON object")]
    NotAnObject,

    /// The response has been finalized and can no longer be edited
    #[error("Response has already been submitted")]
    AlreadySubmitted,

    /// The response was filled against a different schema version
    #[error("Response was filled against schema version {expected}, but the current version is {actual}")]
    SchemaMismatch { expected: String, actual: String },

    /// The authoritative validation pass failed
    #[error("Response rejected: {} field(s) failed validation", .0.error_count())]
    Rejected(Box<ValidationReport>),
}

/// Errors raised when applying an input event through a rendered descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The descriptor was rendered read-only or as a preview
    #[error("Field '{field}' is not interactive")]
    NotInteractive { field: String },

    /// The descriptor's control does not offer this action
    #[error("Field '{field}' does not support '{action}'")]
    UnsupportedAction { field: String, action: String },

    /// The value is not one of the field's options
    #[error("'{value}' is not an option of field '{field}'")]
    UnknownOption { field: String, value: String },
}

/// Errors raised by the field type registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A descriptor for this kind is already registered
    #[error("Field type '{0}' is already registered")]
    DuplicateKind(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

fn join_errors(errors: &[StructuralError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FormError {
    /// Wrap a list of structural errors
    pub fn structural(errors: Vec<StructuralError>) -> Self {
        Self::Structural(errors)
    }
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

// Result type aliases for convenience
pub type FormResult<T> = Result<T, FormError>;
pub type BuilderResult<T> = Result<T, BuilderError>;
pub type ResponseResult<T> = Result<T, ResponseError>;
