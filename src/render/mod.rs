//! Form rendering.
//!
//! The renderer maps each field of a schema, in order, to an
//! [`InputDescriptor`]: a toolkit-neutral description of the control to show,
//! its current value and its validation errors. Drawing the descriptors is left
//! to the host UI.
//!
//! User interaction flows back through [`apply_input`], which writes into the
//! response document under the descriptor's field name. Values are stored raw;
//! the validator decides whether they are acceptable.
//!
//! # Examples
//!
//! ```rust
//! use form_schema::render::{Control, InputEvent, RenderMode, apply_input, render};
//! use form_schema::response::ResponseDocument;
//! use form_schema::schema::{Schema, embedded};
//! use form_schema::validation::FieldErrors;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::from_json_str(embedded::asset_inspection_form())?;
//! let mut response = ResponseDocument::new();
//!
//! let descriptors = render(&schema, &response, &FieldErrors::new(), RenderMode::Edit);
//! let condition = descriptors.iter().find(|d| d.name == "condition").unwrap();
//! apply_input(condition, &mut response, InputEvent::Choose("Fair".into()))?;
//!
//! let descriptors = render(&schema, &response, &FieldErrors::new(), RenderMode::Edit);
//! let condition = descriptors.iter().find(|d| d.name == "condition").unwrap();
//! assert!(matches!(&condition.control, Control::RadioGroup { options }
//!     if options.iter().any(|o| o.value == "Fair" && o.selected)));
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod input;
pub mod renderer;


pub use descriptor::{ChoiceOption, Control, InputAction, InputDescriptor, RenderMode};
pub use input::{InputEvent, apply_input};
pub use renderer::{FormRenderer, render};
