//! Kind descriptors and the registry that holds them.
//!
//! The renderer and validator never branch on a kind by name. They look the
//! kind up here and dispatch on the descriptor's [`ControlKind`] and
//! [`ValueShape`], so a new kind is introduced by registering one descriptor.

use super::kind::FieldKind;
use crate::error::RegistryError;
use crate::schema::types::{Field, FieldValidation};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Shape of the value a kind collects, and therefore which checks the
/// validator runs against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    /// Free text
    Text,
    /// Text in `local@domain` form
    Email,
    /// A number, or text that coerces to one
    Number,
    /// A calendar date (`YYYY-MM-DD`)
    Date,
    /// A date and time
    DateTime,
    /// Exactly one member of the field's options
    SingleChoice,
    /// A set of members of the field's options
    MultiChoice,
    /// A reference to an uploaded file
    File,
    /// An opaque captured signature
    Signature,
}

impl ValueShape {
    /// Human-readable name used in type mismatch messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Text | Self::Email | Self::Date | Self::DateTime | Self::SingleChoice => {
                "string"
            }
            Self::Number => "number",
            Self::MultiChoice => "array of strings",
            Self::File => "file reference",
            Self::Signature => "signature",
        }
    }
}

/// HTML-style input type for single-line inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    Text,
    Email,
    Number,
    Date,
    DatetimeLocal,
}

/// Control the renderer produces for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "control", content = "input_type", rename_all = "snake_case")]
pub enum ControlKind {
    Input(InputType),
    TextArea,
    Dropdown,
    RadioGroup,
    CheckboxGroup,
    FilePicker,
    SignaturePad,
}

/// Field properties a builder starts from when a kind is added.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FieldDefaults {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldDefaults {
    /// Build a field of `kind` named `name` from these defaults.
    pub fn instantiate(&self, kind: FieldKind, name: impl Into<String>) -> Field {
        Field {
            name: name.into(),
            kind,
            label: self.label.clone(),
            required: self.required,
            placeholder: self.placeholder.clone(),
            description: None,
            options: self.options.clone(),
            validation: self.validation.clone(),
            extra: BTreeMap::new(),
        }
    }
}

/// Everything the engine knows about one field kind.
///
/// Serializes to the palette entry the authoring UI consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindDescriptor {
    pub kind: FieldKind,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub accepts_multiple: bool,
    pub requires_options: bool,
    pub shape: ValueShape,
    pub control: ControlKind,
    pub default_props: FieldDefaults,
}

impl KindDescriptor {
    /// Create a descriptor with default props derived from the label.
    pub fn new(
        kind: FieldKind,
        label: impl Into<String>,
        shape: ValueShape,
        control: ControlKind,
    ) -> Self {
        let label = label.into();
        let requires_options = matches!(shape, ValueShape::SingleChoice | ValueShape::MultiChoice);
        Self {
            kind,
            default_props: FieldDefaults {
                label: label.clone(),
                options: requires_options.then(Vec::new),
                ..FieldDefaults::default()
            },
            label,
            icon: String::new(),
            description: String::new(),
            accepts_multiple: matches!(shape, ValueShape::MultiChoice),
            requires_options,
            shape,
            control,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.default_props.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.default_props.validation = Some(validation);
        self
    }
}

/// Ordered set of kind descriptors.
///
/// Order is palette display order.
#[derive(Debug, Clone)]
pub struct FieldTypeRegistry {
    descriptors: Vec<KindDescriptor>,
}

impl FieldTypeRegistry {
    /// Create a registry with no kinds.
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Create a registry holding the built-in kinds.
    pub fn with_standard_kinds() -> Self {
        Self {
            descriptors: standard_descriptors(),
        }
    }

    /// Shared registry of the built-in kinds.
    pub fn standard() -> &'static FieldTypeRegistry {
        static STANDARD: OnceLock<FieldTypeRegistry> = OnceLock::new();
        STANDARD.get_or_init(Self::with_standard_kinds)
    }

    /// Look up the descriptor for a kind.
    pub fn describe(&self, kind: &FieldKind) -> Option<&KindDescriptor> {
        self.descriptors.iter().find(|d| &d.kind == kind)
    }

    /// All descriptors in palette order.
    pub fn supported_kinds(&self) -> &[KindDescriptor] {
        &self.descriptors
    }

    pub fn is_supported(&self, kind: &FieldKind) -> bool {
        self.describe(kind).is_some()
    }

    /// Add a kind at the end of the palette.
    pub fn register(&mut self, descriptor: KindDescriptor) -> Result<(), RegistryError> {
        if self.is_supported(&descriptor.kind) {
            return Err(RegistryError::DuplicateKind(descriptor.kind.to_string()));
        }
        log::debug!("Registered field type '{}'", descriptor.kind);
        self.descriptors.push(descriptor);
        Ok(())
    }
}

impl Default for FieldTypeRegistry {
    fn default() -> Self {
        Self::with_standard_kinds()
    }
}

fn standard_descriptors() -> Vec<KindDescriptor> {
    vec![
        KindDescriptor::new(
            FieldKind::Text,
            "Text Input",
            ValueShape::Text,
            ControlKind::Input(InputType::Text),
        )
        .with_icon("type")
        .with_description("Single line of text")
        .with_placeholder("Enter text"),
        KindDescriptor::new(
            FieldKind::Textarea,
            "Text Area",
            ValueShape::Text,
            ControlKind::TextArea,
        )
        .with_icon("align-left")
        .with_description("Multiple lines of text")
        .with_placeholder("Enter details"),
        KindDescriptor::new(
            FieldKind::Email,
            "Email",
            ValueShape::Email,
            ControlKind::Input(InputType::Email),
        )
        .with_icon("mail")
        .with_description("Email address with format validation")
        .with_placeholder("name@example.com"),
        KindDescriptor::new(
            FieldKind::Number,
            "Number",
            ValueShape::Number,
            ControlKind::Input(InputType::Number),
        )
        .with_icon("hash")
        .with_description("Numeric value"),
        KindDescriptor::new(
            FieldKind::Date,
            "Date",
            ValueShape::Date,
            ControlKind::Input(InputType::Date),
        )
        .with_icon("calendar")
        .with_description("Calendar date"),
        KindDescriptor::new(
            FieldKind::Datetime,
            "Date & Time",
            ValueShape::DateTime,
            ControlKind::Input(InputType::DatetimeLocal),
        )
        .with_icon("clock")
        .with_description("Date with time of day"),
        KindDescriptor::new(
            FieldKind::Select,
            "Dropdown",
            ValueShape::SingleChoice,
            ControlKind::Dropdown,
        )
        .with_icon("chevron-down")
        .with_description("Pick one option from a list"),
        KindDescriptor::new(
            FieldKind::Radio,
            "Radio Buttons",
            ValueShape::SingleChoice,
            ControlKind::RadioGroup,
        )
        .with_icon("circle-dot")
        .with_description("Pick one option, all options visible"),
        KindDescriptor::new(
            FieldKind::Checkbox,
            "Checkboxes",
            ValueShape::MultiChoice,
            ControlKind::CheckboxGroup,
        )
        .with_icon("check-square")
        .with_description("Pick any number of options"),
        KindDescriptor::new(
            FieldKind::File,
            "File Upload",
            ValueShape::File,
            ControlKind::FilePicker,
        )
        .with_icon("paperclip")
        .with_description("Attach a document or photo")
        .with_validation(FieldValidation {
            accept: Some(
                ["pdf", "jpg", "jpeg", "png", "doc", "docx"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            max_size_kb: Some(10_240),
            ..FieldValidation::default()
        }),
        KindDescriptor::new(
            FieldKind::Signature,
            "Signature",
            ValueShape::Signature,
            ControlKind::SignaturePad,
        )
        .with_icon("pen-tool")
        .with_description("Captured handwritten signature"),
    ]
}
