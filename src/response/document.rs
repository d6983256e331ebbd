//! The flat response document and the value shapes stored in it.

use crate::error::{ResponseError, ResponseResult};
use crate::schema::types::file_extension;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat mapping from field name to the value the user supplied.
///
/// The shape of each value depends on the field's kind: a string for text-like
/// and single-choice kinds, an array for checkboxes, a file reference for
/// files and an opaque payload for signatures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseDocument {
    values: Map<String, Value>,
}

impl ResponseDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> ResponseResult<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(ResponseError::NotAnObject),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }

    /// Options currently selected in a multi-choice field.
    ///
    /// Non-string entries and non-array values select nothing.
    pub fn selected_options(&self, name: &str) -> Vec<&str> {
        match self.values.get(name) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Toggle membership of `option` in a multi-choice field.
    ///
    /// Membership is by value, never by position, so other selections are
    /// untouched and keep their order. A missing or non-array value is
    /// replaced by a one-element selection. Returns whether `option` is
    /// selected afterwards.
    pub fn toggle_option(&mut self, name: &str, option: &str) -> bool {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        match entry {
            Value::Array(items) => {
                let before = items.len();
                items.retain(|item| item.as_str() != Some(option));
                if items.len() == before {
                    items.push(Value::String(option.to_string()));
                    true
                } else {
                    false
                }
            }
            other => {
                log::debug!("Replacing non-array value of '{name}' while toggling '{option}'");
                *other = Value::Array(vec![Value::String(option.to_string())]);
                true
            }
        }
    }
}

impl From<Map<String, Value>> for ResponseDocument {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Whether a value counts as "not filled in".
///
/// Absent, `null`, empty strings, empty arrays and empty objects are blank.
/// With `trim_whitespace`, so are whitespace-only strings.
pub fn is_blank(value: Option<&Value>, trim_whitespace: bool) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => {
            if trim_whitespace {
                s.trim().is_empty()
            } else {
                s.is_empty()
            }
        }
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    }
}

/// Reference to a file handed to the attachment collaborator.
///
/// Only the reference lives in the response; the bytes never pass through
/// this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    /// Original file name, including extension
    pub name: String,
    /// Storage path assigned by the attachment collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            mime_type: None,
            size: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Read a file reference from a response value.
    ///
    /// Accepts a bare path string (the name is its last segment) or an object
    /// with at least a string `name`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(path) if !path.trim().is_empty() => {
                let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
                Some(Self::new(name).with_path(path.clone()))
            }
            Value::Object(map) => {
                let name = map.get("name")?.as_str()?;
                Some(Self {
                    name: name.to_string(),
                    path: map.get("path").and_then(Value::as_str).map(String::from),
                    mime_type: map
                        .get("mime_type")
                        .and_then(Value::as_str)
                        .map(String::from),
                    size: map.get("size").and_then(Value::as_u64),
                })
            }
            _ => None,
        }
    }

    /// The reference as a response value.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(path) = &self.path {
            map.insert("path".to_string(), Value::String(path.clone()));
        }
        if let Some(mime_type) = &self.mime_type {
            map.insert("mime_type".to_string(), Value::String(mime_type.clone()));
        }
        if let Some(size) = self.size {
            map.insert("size".to_string(), Value::from(size));
        }
        Value::Object(map)
    }

    /// Lowercased extension, without the dot.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }

    /// Size rounded up to whole kilobytes.
    pub fn size_kb(&self) -> Option<u64> {
        self.size.map(|bytes| bytes.div_ceil(1024))
    }
}
