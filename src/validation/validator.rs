//! The response validator.
//!
//! The same [`FormValidator::validate`] call backs both the advisory,
//! per-keystroke check on the interactive side and the authoritative re-check
//! before a response is finalized. It is a pure function of its inputs: it
//! never mutates the schema or the response, and repeated calls with the same
//! inputs produce the same report.

use super::formats::{coerce_number, is_valid_date, is_valid_datetime, is_valid_email, value_type};
use super::report::{Constraint, ErrorKind, FieldErrors, ValidationReport, ValidationWarning};
use crate::config::ValidatorConfig;
use crate::field_type::{FieldTypeRegistry, ValueShape};
use crate::response::{FileReference, ResponseDocument, is_blank};
use crate::schema::{Field, Schema, flatten_fields};
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Validates response documents against schemas.
///
/// Dispatch over field kinds goes through the registry: each kind's
/// [`ValueShape`] selects the checks its values get.
#[derive(Debug, Clone)]
pub struct FormValidator<'r> {
    registry: &'r FieldTypeRegistry,
    config: ValidatorConfig,
}

impl FormValidator<'static> {
    /// Validator over the built-in field types with default settings.
    pub fn standard() -> Self {
        Self::new(FieldTypeRegistry::standard())
    }
}

impl Default for FormValidator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> FormValidator<'r> {
    pub fn new(registry: &'r FieldTypeRegistry) -> Self {
        Self {
            registry,
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &'r FieldTypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate every field of `schema` against `response`.
    pub fn validate(&self, schema: &Schema, response: &ResponseDocument) -> ValidationReport {
        let mut field_errors = FieldErrors::new();
        let mut warnings = Vec::new();
        let mut known = HashSet::new();

        for flat in flatten_fields(schema) {
            let field = flat.field;
            known.insert(field.name.as_str());

            let Some(descriptor) = self.registry.describe(&field.kind) else {
                warn!(
                    "Field '{}' has unsupported type '{}', skipping validation",
                    field.name, field.kind
                );
                warnings.push(ValidationWarning::UnsupportedKind {
                    field: field.name.clone(),
                    kind: field.kind.to_string(),
                });
                continue;
            };

            let errors = self.check_field(field, descriptor.shape, response.get(&field.name));
            if !errors.is_empty() {
                field_errors
                    .entry(field.name.clone())
                    .or_default()
                    .extend(errors);
            }
        }

        if self.config.report_unknown_keys {
            for key in response.keys().filter(|key| !known.contains(key)) {
                debug!("Response key '{key}' matches no field in the schema");
                warnings.push(ValidationWarning::UnknownKey {
                    key: key.to_string(),
                });
            }
        }

        ValidationReport::new(field_errors, warnings)
    }

    /// Validate one field's value in isolation.
    ///
    /// Fields of an unsupported kind always pass.
    pub fn validate_field(&self, field: &Field, value: Option<&Value>) -> Vec<ErrorKind> {
        match self.registry.describe(&field.kind) {
            Some(descriptor) => self.check_field(field, descriptor.shape, value),
            None => Vec::new(),
        }
    }

    fn check_field(&self, field: &Field, shape: ValueShape, value: Option<&Value>) -> Vec<ErrorKind> {
        let value = match value {
            Some(value) if !is_blank(Some(value), self.config.trim_whitespace) => value,
            _ if field.required => return vec![ErrorKind::Required],
            _ => return Vec::new(),
        };

        match self.check_value(field, shape, value) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        }
    }

    fn check_value(
        &self,
        field: &Field,
        shape: ValueShape,
        value: &Value,
    ) -> Result<(), Vec<ErrorKind>> {
        let mismatch = || vec![ErrorKind::type_mismatch(shape.expected(), value_type(value))];

        match shape {
            ValueShape::Text => {
                let text = value.as_str().ok_or_else(mismatch)?;
                into_result(check_length(field, text))
            }
            ValueShape::Email => {
                let text = value.as_str().ok_or_else(mismatch)?;
                let mut errors = check_length(field, text);
                if !is_valid_email(self.candidate(text)) {
                    errors.push(
                        Constraint::InvalidEmail {
                            value: text.to_string(),
                        }
                        .into(),
                    );
                }
                into_result(errors)
            }
            ValueShape::Number => {
                let number = coerce_number(value).ok_or_else(|| {
                    let actual = match value {
                        Value::String(_) => "non-numeric string",
                        other => value_type(other),
                    };
                    vec![ErrorKind::type_mismatch(shape.expected(), actual)]
                })?;
                into_result(check_range(field, number))
            }
            ValueShape::Date => {
                let text = value.as_str().ok_or_else(mismatch)?;
                if is_valid_date(self.candidate(text)) {
                    Ok(())
                } else {
                    Err(vec![
                        Constraint::InvalidDate {
                            value: text.to_string(),
                        }
                        .into(),
                    ])
                }
            }
            ValueShape::DateTime => {
                let text = value.as_str().ok_or_else(mismatch)?;
                if is_valid_datetime(self.candidate(text)) {
                    Ok(())
                } else {
                    Err(vec![
                        Constraint::InvalidDateTime {
                            value: text.to_string(),
                        }
                        .into(),
                    ])
                }
            }
            ValueShape::SingleChoice => {
                let choice = value.as_str().ok_or_else(mismatch)?;
                if field.has_option(choice) {
                    Ok(())
                } else {
                    Err(vec![
                        Constraint::NotAnOption {
                            value: choice.to_string(),
                        }
                        .into(),
                    ])
                }
            }
            ValueShape::MultiChoice => {
                let items = value.as_array().ok_or_else(mismatch)?;
                let choices: Vec<&str> = items
                    .iter()
                    .map(Value::as_str)
                    .collect::<Option<_>>()
                    .ok_or_else(mismatch)?;
                into_result(
                    choices
                        .into_iter()
                        .filter(|choice| !field.has_option(choice))
                        .map(|choice| {
                            Constraint::NotAnOption {
                                value: choice.to_string(),
                            }
                            .into()
                        })
                        .collect(),
                )
            }
            ValueShape::File => {
                let file = FileReference::from_value(value).ok_or_else(mismatch)?;
                into_result(check_file(field, &file))
            }
            // Opaque payload: presence was the only requirement
            ValueShape::Signature => Ok(()),
        }
    }

    /// Text that format checks see: trimmed only when the config says so.
    fn candidate<'t>(&self, text: &'t str) -> &'t str {
        if self.config.trim_whitespace {
            text.trim()
        } else {
            text
        }
    }
}

fn into_result(errors: Vec<ErrorKind>) -> Result<(), Vec<ErrorKind>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_length(field: &Field, text: &str) -> Vec<ErrorKind> {
    let mut errors = Vec::new();
    let Some(rules) = &field.validation else {
        return errors;
    };
    let length = text.chars().count();
    if let Some(min_length) = rules.min_length {
        if length < min_length {
            errors.push(Constraint::TooShort { min_length, length }.into());
        }
    }
    if let Some(max_length) = rules.max_length {
        if length > max_length {
            errors.push(Constraint::TooLong { max_length, length }.into());
        }
    }
    errors
}

fn check_range(field: &Field, value: f64) -> Vec<ErrorKind> {
    let mut errors = Vec::new();
    let Some(rules) = &field.validation else {
        return errors;
    };
    if let Some(min) = rules.min {
        if value < min {
            errors.push(Constraint::BelowMinimum { min, value }.into());
        }
    }
    if let Some(max) = rules.max {
        if value > max {
            errors.push(Constraint::AboveMaximum { max, value }.into());
        }
    }
    errors
}

fn check_file(field: &Field, file: &FileReference) -> Vec<ErrorKind> {
    let mut errors = Vec::new();
    let Some(rules) = &field.validation else {
        return errors;
    };
    if let Some(accepted) = &rules.accept {
        if !rules.accepts_file(&file.name) {
            errors.push(
                Constraint::ExtensionNotAccepted {
                    extension: file.extension().unwrap_or_default(),
                    accepted: accepted.clone(),
                }
                .into(),
            );
        }
    }
    if let (Some(max_size_kb), Some(size_kb)) = (rules.max_size_kb, file.size_kb()) {
        if size_kb > max_size_kb {
            errors.push(Constraint::FileTooLarge {
                size_kb,
                max_size_kb,
            }
            .into());
        }
    }
    errors
}

/// Validate with the built-in field types and default settings.
pub fn validate(schema: &Schema, response: &ResponseDocument) -> ValidationReport {
    FormValidator::standard().validate(schema, response)
}
