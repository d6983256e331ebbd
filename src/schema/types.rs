//! Core schema type definitions.
//!
//! These structures are the canonical, persisted description of a form. They
//! are pure data: they carry no runtime identity and no behavior beyond
//! (de)serialization and lookup.
//!
//! Properties this build does not recognise are kept in each level's `extra`
//! map so that a document written by a newer version survives a load/save
//! cycle unchanged.

use crate::field_type::FieldKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A complete form document: ordered sections of ordered fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// An ordered group of fields under a title.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Machine identifier, unique across the whole schema. Used as the key in
    /// response documents.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Choices for select, radio and checkbox fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Optional kind-specific constraints on a field's value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldValidation {
    /// Accepted file extensions, with or without a leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<Vec<String>>,
    /// Maximum file size in kilobytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size_kb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Schema {
    /// Parse a schema document from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Convert a JSON value into a schema document.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serialize to a JSON value in the storage shape.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Find a field by name in any section.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter())
            .find(|field| field.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

impl Field {
    /// Create a field with the given name, kind and label and no other
    /// properties set.
    pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            required: false,
            placeholder: None,
            description: None,
            options: None,
            validation: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// The field's options, or an empty slice.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options().iter().any(|option| option == value)
    }
}

impl FieldValidation {
    /// Whether `file_name` has one of the accepted extensions.
    ///
    /// Comparison is case-insensitive and ignores a leading dot on the
    /// accepted entries. With no `accept` list every file is accepted.
    pub fn accepts_file(&self, file_name: &str) -> bool {
        let Some(accept) = &self.accept else {
            return true;
        };
        let Some(extension) = file_extension(file_name) else {
            return false;
        };
        accept
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&extension))
    }
}

/// Lowercased extension of a file name, without the dot.
pub(crate) fn file_extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, extension) = base.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}
