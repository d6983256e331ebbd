//! Applying user input through a rendered descriptor.

use super::descriptor::{InputAction, InputDescriptor};
use crate::error::RenderError;
use crate::response::{FileReference, ResponseDocument};
use log::debug;
use serde_json::Value;

/// A single user interaction with a rendered control.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Replace the raw text of an input or text area
    SetText(String),
    /// Pick one option of a dropdown or radio group
    Choose(String),
    /// Flip one option of a checkbox group
    Toggle(String),
    AttachFile(FileReference),
    /// Store a captured signature payload as-is
    CaptureSignature(Value),
    /// Remove the field's value
    Clear,
}

impl InputEvent {
    pub fn action(&self) -> InputAction {
        match self {
            Self::SetText(_) => InputAction::SetText,
            Self::Choose(_) => InputAction::Choose,
            Self::Toggle(_) => InputAction::Toggle,
            Self::AttachFile(_) => InputAction::AttachFile,
            Self::CaptureSignature(_) => InputAction::CaptureSignature,
            Self::Clear => InputAction::Clear,
        }
    }
}

/// Apply `event` to `response` under the field described by `descriptor`.
///
/// Only the descriptor's own field is touched. Choices are checked against
/// the rendered options; every other value is stored without interpretation
/// and left for the validator to judge. A toggle that deselects a value
/// already in the response is always allowed, even if the schema no longer
/// offers it.
pub fn apply_input(
    descriptor: &InputDescriptor,
    response: &mut ResponseDocument,
    event: InputEvent,
) -> Result<(), RenderError> {
    if !descriptor.is_interactive() {
        return Err(RenderError::NotInteractive {
            field: descriptor.name.clone(),
        });
    }

    let action = event.action();
    if !descriptor.accepts(action) {
        return Err(RenderError::UnsupportedAction {
            field: descriptor.name.clone(),
            action: action.as_str().to_string(),
        });
    }

    let name = descriptor.name.as_str();
    match event {
        InputEvent::SetText(text) => response.set(name, Value::String(text)),
        InputEvent::Choose(value) => {
            ensure_option(descriptor, &value)?;
            response.set(name, Value::String(value));
        }
        InputEvent::Toggle(value) => {
            if !response.selected_options(name).contains(&value.as_str()) {
                ensure_option(descriptor, &value)?;
            }
            let selected = response.toggle_option(name, &value);
            debug!("Toggled '{value}' on '{name}', selected: {selected}");
        }
        InputEvent::AttachFile(file) => response.set(name, file.to_value()),
        InputEvent::CaptureSignature(payload) => response.set(name, payload),
        InputEvent::Clear => {
            response.remove(name);
        }
    }
    Ok(())
}

fn ensure_option(descriptor: &InputDescriptor, value: &str) -> Result<(), RenderError> {
    if descriptor
        .control
        .options()
        .iter()
        .any(|option| option.value == value)
    {
        Ok(())
    } else {
        Err(RenderError::UnknownOption {
            field: descriptor.name.clone(),
            value: value.to_string(),
        })
    }
}
