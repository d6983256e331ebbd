//! Schema to descriptor rendering.

use super::descriptor::{ChoiceOption, Control, InputAction, InputDescriptor, RenderMode};
use crate::config::ValidatorConfig;
use crate::field_type::{ControlKind, FieldTypeRegistry};
use crate::response::{FileReference, ResponseDocument, is_blank};
use crate::schema::{Field, Schema, flatten_fields};
use crate::validation::{ErrorKind, FieldErrors};
use log::warn;
use serde_json::Value;

/// Turns a schema plus current values and errors into input descriptors.
///
/// Each field is rendered independently: a field whose kind is not registered
/// becomes an [`Control::Unsupported`] placeholder and the rest of the form
/// renders normally. Every mode goes through the same code path; read-only and
/// preview only withhold the descriptor's actions.
///
/// Whether a value counts as captured follows the same
/// [`ValidatorConfig`] the validator uses, so a whitespace-only signature
/// is shown as missing exactly when it would be reported as missing.
#[derive(Debug, Clone, Copy)]
pub struct FormRenderer<'r> {
    registry: &'r FieldTypeRegistry,
    config: ValidatorConfig,
}

impl FormRenderer<'static> {
    pub fn standard() -> Self {
        Self::new(FieldTypeRegistry::standard())
    }
}

impl Default for FormRenderer<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> FormRenderer<'r> {
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

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Render every field of `schema`, in schema order.
    pub fn render(
        &self,
        schema: &Schema,
        response: &ResponseDocument,
        field_errors: &FieldErrors,
        mode: RenderMode,
    ) -> Vec<InputDescriptor> {
        flatten_fields(schema)
            .map(|flat| {
                let section = flat.section_index();
                let errors = field_errors
                    .get(&flat.field.name)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                self.render_field(
                    section,
                    &schema.sections[section].title,
                    flat.field,
                    response.get(&flat.field.name),
                    errors,
                    mode,
                )
            })
            .collect()
    }

    /// Render a single field.
    pub fn render_field(
        &self,
        section: usize,
        section_title: &str,
        field: &Field,
        value: Option<&Value>,
        errors: &[ErrorKind],
        mode: RenderMode,
    ) -> InputDescriptor {
        let control = match self.registry.describe(&field.kind) {
            Some(descriptor) => {
                build_control(descriptor.control, field, value, self.config.trim_whitespace)
            }
            None => {
                warn!(
                    "Rendering field '{}' of unsupported type '{}' as a placeholder",
                    field.name, field.kind
                );
                Control::Unsupported {
                    kind: field.kind.to_string(),
                }
            }
        };

        let actions = (mode.is_interactive() && !control.is_unsupported())
            .then(|| actions_for(&control));

        InputDescriptor {
            section,
            section_title: section_title.to_string(),
            name: field.name.clone(),
            kind: field.kind.clone(),
            label: field.label.clone(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            description: field.description.clone(),
            control,
            errors: errors.to_vec(),
            mode,
            actions,
        }
    }
}

fn build_control(
    kind: ControlKind,
    field: &Field,
    value: Option<&Value>,
    trim_whitespace: bool,
) -> Control {
    match kind {
        ControlKind::Input(input_type) => Control::Input {
            input_type,
            value: raw_text(value),
        },
        ControlKind::TextArea => Control::TextArea {
            value: raw_text(value),
        },
        ControlKind::Dropdown => Control::Dropdown {
            options: single_choice(field, value),
        },
        ControlKind::RadioGroup => Control::RadioGroup {
            options: single_choice(field, value),
        },
        ControlKind::CheckboxGroup => Control::CheckboxGroup {
            options: multi_choice(field, value),
        },
        ControlKind::FilePicker => Control::FilePicker {
            accept: field
                .validation
                .as_ref()
                .and_then(|rules| rules.accept.clone())
                .unwrap_or_default(),
            file: value.and_then(FileReference::from_value),
        },
        ControlKind::SignaturePad => Control::SignaturePad {
            captured: !is_blank(value, trim_whitespace),
        },
    }
}

fn actions_for(control: &Control) -> Vec<InputAction> {
    let primary = match control {
        Control::Input { .. } | Control::TextArea { .. } => InputAction::SetText,
        Control::Dropdown { .. } | Control::RadioGroup { .. } => InputAction::Choose,
        Control::CheckboxGroup { .. } => InputAction::Toggle,
        Control::FilePicker { .. } => InputAction::AttachFile,
        Control::SignaturePad { .. } => InputAction::CaptureSignature,
        Control::Unsupported { .. } => return Vec::new(),
    };
    vec![primary, InputAction::Clear]
}

/// Text of a value exactly as stored; coercion is the validator's concern.
fn raw_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn single_choice(field: &Field, value: Option<&Value>) -> Vec<ChoiceOption> {
    let current = value.and_then(Value::as_str);
    field
        .options()
        .iter()
        .map(|option| ChoiceOption {
            value: option.clone(),
            selected: current == Some(option.as_str()),
        })
        .collect()
}

fn multi_choice(field: &Field, value: Option<&Value>) -> Vec<ChoiceOption> {
    let selected: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    field
        .options()
        .iter()
        .map(|option| ChoiceOption {
            value: option.clone(),
            selected: selected.contains(&option.as_str()),
        })
        .collect()
}

/// Render with the built-in field types.
pub fn render(
    schema: &Schema,
    response: &ResponseDocument,
    field_errors: &FieldErrors,
    mode: RenderMode,
) -> Vec<InputDescriptor> {
    FormRenderer::standard().render(schema, response, field_errors, mode)
}
