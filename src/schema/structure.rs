//! Structural checks and field iteration over a schema.
//!
//! [`flatten_fields`] defines the one iteration order every consumer uses:
//! section order, then field order within the section. [`validate_structure`]
//! finds defects in the document itself, as opposed to defects in a response.

use super::types::{Field, Schema};
use crate::error::{FieldLocation, StructuralError};
use crate::field_type::FieldTypeRegistry;
use std::collections::{HashMap, HashSet};

/// A field together with its position in the schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatField<'a> {
    pub location: FieldLocation,
    pub field: &'a Field,
}

impl FlatField<'_> {
    pub fn section_index(&self) -> usize {
        self.location.section
    }
}

/// Every field of the schema in rendering order.
///
/// Empty sections contribute nothing.
pub fn flatten_fields(schema: &Schema) -> impl Iterator<Item = FlatField<'_>> {
    schema
        .sections
        .iter()
        .enumerate()
        .flat_map(|(section_index, section)| {
            section
                .fields
                .iter()
                .enumerate()
                .map(move |(field_index, field)| FlatField {
                    location: FieldLocation::new(section_index, field_index),
                    field,
                })
        })
}

/// Check a schema against the built-in field types.
pub fn validate_structure(schema: &Schema) -> Vec<StructuralError> {
    validate_structure_with(schema, FieldTypeRegistry::standard())
}

/// Check a schema, consulting `registry` for which kinds take options.
///
/// Fields of a kind the registry does not know are only checked for name
/// rules; they are not structural errors, so documents from newer versions
/// still load.
pub fn validate_structure_with(
    schema: &Schema,
    registry: &FieldTypeRegistry,
) -> Vec<StructuralError> {
    let mut errors = Vec::new();

    if schema.sections.is_empty() {
        errors.push(StructuralError::NoSections);
    }

    let mut seen: HashMap<&str, FieldLocation> = HashMap::new();

    for FlatField { location, field } in flatten_fields(schema) {
        if field.name.trim().is_empty() {
            errors.push(StructuralError::EmptyFieldName { at: location });
        } else if let Some(first) = seen.get(field.name.as_str()) {
            errors.push(StructuralError::DuplicateFieldName {
                name: field.name.clone(),
                first: *first,
                second: location,
            });
        } else {
            seen.insert(field.name.as_str(), location);
        }

        let Some(descriptor) = registry.describe(&field.kind) else {
            log::debug!(
                "Skipping option checks for field '{}' of unsupported type '{}'",
                field.name,
                field.kind
            );
            continue;
        };

        if descriptor.requires_options {
            check_options(field, location, &mut errors);
        } else if !field.options().is_empty() {
            errors.push(StructuralError::UnexpectedOptions {
                name: field.name.clone(),
                kind: field.kind.to_string(),
                at: location,
            });
        }
    }

    errors
}

fn check_options(field: &Field, at: FieldLocation, errors: &mut Vec<StructuralError>) {
    let options = field.options();
    if options.is_empty() {
        errors.push(StructuralError::MissingOptions {
            name: field.name.clone(),
            kind: field.kind.to_string(),
            at,
        });
        return;
    }

    let mut seen = HashSet::new();
    for option in options {
        if option.trim().is_empty() {
            errors.push(StructuralError::BlankOption {
                name: field.name.clone(),
                at,
            });
        } else if !seen.insert(option.as_str()) {
            errors.push(StructuralError::DuplicateOption {
                name: field.name.clone(),
                option: option.clone(),
                at,
            });
        }
    }
}

impl Schema {
    /// See [`validate_structure`].
    pub fn validate_structure(&self) -> Vec<StructuralError> {
        validate_structure(self)
    }

    /// See [`flatten_fields`].
    pub fn flatten_fields(&self) -> impl Iterator<Item = FlatField<'_>> {
        flatten_fields(self)
    }

    pub fn is_structurally_valid(&self) -> bool {
        self.validate_structure().is_empty()
    }
}
