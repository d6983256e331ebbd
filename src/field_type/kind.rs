//! The field kind identifier carried by every field.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of input a field collects.
///
/// The built-in kinds form a closed set. A `type` string that is not one of
/// them is kept verbatim as [`FieldKind::Other`] so that schemas authored by a
/// newer system still load, round-trip, and render with an "unsupported"
/// placeholder instead of failing outright.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Number,
    Date,
    Datetime,
    Select,
    Radio,
    Checkbox,
    File,
    Signature,
    /// A kind this build does not know about
    Other(String),
}

impl FieldKind {
    /// Built-in kinds in palette order.
    pub const BUILT_IN: [FieldKind; 11] = [
        FieldKind::Text,
        FieldKind::Textarea,
        FieldKind::Email,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Datetime,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::File,
        FieldKind::Signature,
    ];

    /// The wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::File => "file",
            Self::Signature => "signature",
            Self::Other(name) => name,
        }
    }

    pub fn is_built_in(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "email" => Self::Email,
            "number" => Self::Number,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "file" => Self::File,
            "signature" => Self::Signature,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for FieldKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
