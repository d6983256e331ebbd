//! Response documents and submission.
//!
//! A [`ResponseDocument`] is the flat, per-submission map from field name to
//! value. [`FormResponse`] wraps it with the schema version it was filled
//! against and the submitted/finalized state.

pub mod document;
pub mod submission;

pub use document::{FileReference, ResponseDocument, is_blank};
pub use submission::FormResponse;
