//! Dynamic form schema engine for Rust.
//!
//! Describes arbitrary forms as structured data, lets an operator author them
//! interactively, and turns a schema plus a response payload into a validated,
//! submittable record.
//!
//! # Core Components
//!
//! - [`FieldTypeRegistry`] - The open set of field kinds and how each one is
//!   rendered and validated
//! - [`Schema`] - The canonical, persisted form document
//! - [`FormValidator`] - Per-field validation of a response document
//! - [`FormRenderer`] - Toolkit-neutral input descriptors for a schema
//! - [`FormBuilder`] - The authoring state machine
//!
//! # Quick Start
//!
//! ```rust
//! use form_schema::{FormBuilder, FormResponse, FormValidator, Schema};
//! use form_schema::builder::FieldPatch;
//! use form_schema::field_type::FieldKind;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = FormBuilder::standard();
//! let section = builder.sections()[0].id;
//! let email = builder.add_field(section, FieldKind::Email)?;
//! builder.update_field(section, email, FieldPatch::default().name("contact").required(true))?;
//! let schema: Schema = builder.save()?;
//!
//! let mut response = FormResponse::new(&schema)?;
//! response.set_value("contact", json!("ops@example.com"))?;
//! response.submit(&schema, &FormValidator::standard())?;
//! assert!(response.is_submitted());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod field_type;
pub mod render;
pub mod response;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use builder::{ElementId, FormBuilder, SessionState};
pub use config::EngineConfig;
pub use error::{FormError, FormResult, StructuralError};
pub use field_type::{FieldKind, FieldTypeRegistry};
pub use render::{FormRenderer, InputDescriptor, RenderMode};
pub use response::{FormResponse, ResponseDocument};
pub use schema::{Field, Schema, SchemaVersion, Section};
pub use validation::{ErrorKind, FormValidator, ValidationReport};
