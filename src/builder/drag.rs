//! Drag-and-drop relocation of fields.
//!
//! A drag is a sequence of discrete transitions on the builder:
//! [`drag_start`](super::FormBuilder::drag_start), any number of
//! [`drag_over`](super::FormBuilder::drag_over), then
//! [`drop`](super::FormBuilder::drop) or
//! [`cancel_drag`](super::FormBuilder::cancel_drag). Nothing is moved until
//! the drop, and a drop whose ids no longer resolve is ignored.

use super::types::ElementId;
use serde::Serialize;

/// Where a dragged field would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropTarget {
    pub section: ElementId,
    /// Position in the target section after the move; `None` appends
    pub index: Option<usize>,
}

impl DropTarget {
    pub fn append_to(section: ElementId) -> Self {
        Self {
            section,
            index: None,
        }
    }

    pub fn at(section: ElementId, index: usize) -> Self {
        Self {
            section,
            index: Some(index),
        }
    }
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub field: ElementId,
    pub target: Option<DropTarget>,
}

/// Result of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    Moved {
        field: ElementId,
        section: ElementId,
        index: usize,
    },
    /// No drag, no target, or the referenced ids are gone
    Ignored,
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}
