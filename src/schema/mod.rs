//! Schema model for dynamic forms.
//!
//! A [`Schema`] is the canonical, persisted description of a form: ordered
//! [`Section`]s, each holding ordered [`Field`]s. The model is pure data; the
//! only operations here are structural checks and iteration, neither of which
//! mutates the schema. Editing is the builder's job.
//!
//! # Key Types
//!
//! - [`Schema`] - The serialization unit
//! - [`Field`] - One input, keyed by a schema-wide unique `name`
//! - [`SchemaVersion`] - Content hash identifying a schema revision
//!
//! # Examples
//!
//! ```rust
//! use form_schema::schema::{Schema, embedded};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::from_json_str(embedded::job_completion_form())?;
//! assert!(schema.validate_structure().is_empty());
//! assert_eq!(schema.flatten_fields().count(), schema.field_count());
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod structure;
pub mod types;
pub mod version;


pub use structure::{FlatField, flatten_fields, validate_structure, validate_structure_with};
pub use types::{Field, FieldValidation, Schema, Section};
pub use version::SchemaVersion;
