//! Interactive schema authoring.
//!
//! A [`FormBuilder`] is the state machine behind the form editor. It loads a
//! [`Schema`](crate::schema::Schema) (or starts from a single empty section),
//! applies add/remove/reorder/move/duplicate/update operations to an
//! editing-time copy, and commits back to the canonical model through
//! [`FormBuilder::save`], which refuses structurally invalid results.
//!
//! Sections and fields carry an ephemeral [`ElementId`] while they are being
//! edited. Ids exist only within the session and are stripped on output.
//!
//! # Examples
//!
//! ```rust
//! use form_schema::builder::{FieldPatch, FormBuilder};
//! use form_schema::field_type::FieldKind;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = FormBuilder::standard();
//! let section = builder.sections()[0].id;
//!
//! let status = builder.add_field(section, FieldKind::Select)?;
//! assert!(builder.serialize().is_err());
//!
//! builder.update_field(section, status, FieldPatch::default().options(["Open", "Closed"]))?;
//! let schema = builder.save()?;
//! assert_eq!(schema.sections[0].fields[0].name, "select_1");
//! # Ok(())
//! # }
//! ```

pub mod drag;
pub mod notify;
pub mod session;
pub mod types;


pub use drag::{DragState, DropOutcome, DropTarget};
pub use notify::debounced;
pub use session::{ElementError, FormBuilder};
pub use types::{
    BuilderField, BuilderSection, ElementId, FieldPatch, SchemaSnapshot, SectionPatch, Selection,
    SessionState,
};
