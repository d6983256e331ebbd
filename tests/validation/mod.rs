//! Response validation tests.

pub mod field_rules;
pub mod laws;
pub mod submission;
