//! Input descriptors produced by the renderer.

use crate::field_type::{FieldKind, InputType};
use crate::response::FileReference;
use crate::validation::ErrorKind;
use serde::Serialize;

/// How a form is being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// The user is filling the form in
    #[default]
    Edit,
    /// A stored response shown without editing
    Readonly,
    /// The builder's live preview of a schema
    Preview,
}

impl RenderMode {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Edit)
    }
}

/// One option of a choice control and whether it is currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub selected: bool,
}

/// The control to display for a field, with its current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// Single-line input; `value` is the raw text, uninterpreted
    Input { input_type: InputType, value: String },
    TextArea { value: String },
    /// Only the field's own options are ever listed. A stored value that is
    /// not among them leaves nothing selected.
    Dropdown { options: Vec<ChoiceOption> },
    RadioGroup { options: Vec<ChoiceOption> },
    CheckboxGroup { options: Vec<ChoiceOption> },
    FilePicker {
        accept: Vec<String>,
        file: Option<FileReference>,
    },
    SignaturePad { captured: bool },
    /// The field's kind is not registered; shown as a broken placeholder
    Unsupported { kind: String },
}

impl Control {
    /// Options of a choice control, or an empty slice.
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            Self::Dropdown { options }
            | Self::RadioGroup { options }
            | Self::CheckboxGroup { options } => options,
            _ => &[],
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Mutation an interactive descriptor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    SetText,
    Choose,
    Toggle,
    AttachFile,
    CaptureSignature,
    Clear,
}

impl InputAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetText => "set_text",
            Self::Choose => "choose",
            Self::Toggle => "toggle",
            Self::AttachFile => "attach_file",
            Self::CaptureSignature => "capture_signature",
            Self::Clear => "clear",
        }
    }
}

/// Everything needed to display one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputDescriptor {
    pub section: usize,
    pub section_title: String,
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub control: Control,
    pub errors: Vec<ErrorKind>,
    pub mode: RenderMode,
    /// Accepted mutations; `None` when the form is not interactive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<InputAction>>,
}

impl InputDescriptor {
    pub fn is_interactive(&self) -> bool {
        self.actions.is_some()
    }

    pub fn accepts(&self, action: InputAction) -> bool {
        self.actions
            .as_ref()
            .is_some_and(|actions| actions.contains(&action))
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
