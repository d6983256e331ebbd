//! Fluent builders for test schemas and responses.
//!
//! Unlike the authoring builder these construct documents directly, so tests
//! can produce structurally invalid schemas on purpose.

use form_schema::field_type::FieldKind;
use form_schema::response::{FileReference, ResponseDocument};
use form_schema::schema::{Field, FieldValidation, Schema, Section};
use serde_json::{Value, json};

/// Builder for schema documents. Field modifiers apply to the most recently
/// added field.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, title: &str) -> Self {
        self.schema.sections.push(Section::new(title));
        self
    }

    /// Add a field to the last section, creating one if there is none.
    pub fn field(mut self, name: &str, kind: &str) -> Self {
        if self.schema.sections.is_empty() {
            self.schema.sections.push(Section::new("General Information"));
        }
        let label = name.replace('_', " ");
        let field = Field::new(name, FieldKind::from(kind), label);
        if let Some(section) = self.schema.sections.last_mut() {
            section.fields.push(field);
        }
        self
    }

    pub fn required(self) -> Self {
        self.modify(|field| field.required = true)
    }

    pub fn options(self, options: &[&str]) -> Self {
        self.modify(|field| field.options = Some(options.iter().map(|o| o.to_string()).collect()))
    }

    pub fn validation(self, validation: FieldValidation) -> Self {
        self.modify(|field| field.validation = Some(validation))
    }

    pub fn min_max(self, min: f64, max: f64) -> Self {
        self.validation(FieldValidation {
            min: Some(min),
            max: Some(max),
            ..FieldValidation::default()
        })
    }

    pub fn accept(self, extensions: &[&str], max_size_kb: Option<u64>) -> Self {
        self.validation(FieldValidation {
            accept: Some(extensions.iter().map(|e| e.to_string()).collect()),
            max_size_kb,
            ..FieldValidation::default()
        })
    }

    pub fn extra(self, key: &str, value: Value) -> Self {
        self.modify(|field| {
            field.extra.insert(key.to_string(), value);
        })
    }

    pub fn build(self) -> Schema {
        self.schema
    }

    fn modify(mut self, apply: impl FnOnce(&mut Field)) -> Self {
        let field = self
            .schema
            .sections
            .last_mut()
            .and_then(|section| section.fields.last_mut())
            .expect("add a field before modifying it");
        apply(field);
        self
    }
}

/// Builder for response documents.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    document: ResponseDocument,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.document.set(name, value);
        self
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.with(name, json!(value))
    }

    pub fn choices(self, name: &str, values: &[&str]) -> Self {
        self.with(name, json!(values))
    }

    pub fn file(self, name: &str, file: FileReference) -> Self {
        let value = file.to_value();
        self.with(name, value)
    }

    pub fn build(self) -> ResponseDocument {
        self.document
    }
}
