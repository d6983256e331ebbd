//! Response validation against a schema.
//!
//! For every field (in [`flatten_fields`](crate::schema::flatten_fields) order)
//! the validator looks up the field's value by name and reports:
//!
//! - [`ErrorKind::Required`] for a blank value on a required field
//! - [`ErrorKind::TypeMismatch`] for a value of the wrong shape
//! - [`ErrorKind::Constraint`] for a well-shaped value that breaks a rule
//!
//! Response keys that match no field, and fields of an unregistered kind, are
//! reported as warnings and never block submission.
//!
//! # Examples
//!
//! ```rust
//! use form_schema::response::ResponseDocument;
//! use form_schema::schema::{Schema, embedded};
//! use form_schema::validation::{ErrorKind, validate};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::from_json_str(embedded::asset_inspection_form())?;
//! let response = ResponseDocument::from_value(json!({
//!     "asset_tag": "PUMP-0042",
//!     "inspection_date": "2024-06-03",
//! }))?;
//!
//! let report = validate(&schema, &response);
//! assert!(!report.is_submittable());
//! assert_eq!(report.errors_for("condition"), &[ErrorKind::Required]);
//! # Ok(())
//! # }
//! ```

pub mod formats;
pub mod report;
pub mod validator;


pub use report::{Constraint, ErrorKind, FieldErrors, ValidationReport, ValidationWarning};
pub use validator::{FormValidator, validate};
