//! Field type registry.
//!
//! Declares the supported field kinds and, for each, the attributes the rest of
//! the engine dispatches on: the value shape the validator checks, the control
//! the renderer produces, whether the kind takes options, and the defaults a
//! builder uses when instantiating a new field.
//!
//! # Key Types
//!
//! - [`FieldKind`] - The `type` string of a field
//! - [`KindDescriptor`] - Everything the engine knows about one kind
//! - [`FieldTypeRegistry`] - Ordered set of descriptors (palette order)
//!
//! # Examples
//!
//! ```rust
//! use form_schema::field_type::{FieldKind, FieldTypeRegistry};
//!
//! let registry = FieldTypeRegistry::standard();
//! let select = registry.describe(&FieldKind::Select).unwrap();
//! assert!(select.requires_options);
//! assert_eq!(registry.supported_kinds().len(), 11);
//! ```

pub mod kind;
pub mod registry;

pub use kind::FieldKind;
pub use registry::{ControlKind, FieldDefaults, FieldTypeRegistry, InputType, KindDescriptor, ValueShape};
