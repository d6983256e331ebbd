//! Editing-time wrappers around the schema model.
//!
//! Sections and fields in a [`Schema`](crate::schema::Schema) are anonymous
//! array entries. During an editing session each one is paired with an
//! [`ElementId`] so that drag targets, selection and list diffing have a
//! stable handle. Ids never reach the serialized schema.

use crate::error::StructuralError;
use crate::field_type::{FieldKind, FieldTypeRegistry};
use crate::schema::{Field, FieldValidation, Schema, Section, validate_structure_with};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Session-scoped identifier of a builder section or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A field plus its editing id.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderField {
    pub id: ElementId,
    pub field: Field,
}

impl BuilderField {
    pub(crate) fn new(field: Field) -> Self {
        Self {
            id: ElementId::fresh(),
            field,
        }
    }
}

/// A section plus its editing id, holding builder fields.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderSection {
    pub id: ElementId,
    pub title: String,
    pub fields: Vec<BuilderField>,
    /// Section properties this crate does not model, kept for round-trips
    pub extra: BTreeMap<String, Value>,
}

impl BuilderSection {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            id: ElementId::fresh(),
            title: title.into(),
            fields: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub(crate) fn from_section(section: &Section) -> Self {
        Self {
            id: ElementId::fresh(),
            title: section.title.clone(),
            fields: section.fields.iter().cloned().map(BuilderField::new).collect(),
            extra: section.extra.clone(),
        }
    }

    /// Project back to a canonical section, dropping every id.
    pub(crate) fn to_section(&self) -> Section {
        Section {
            title: self.title.clone(),
            fields: self.fields.iter().map(|f| f.field.clone()).collect(),
            extra: self.extra.clone(),
        }
    }

    pub fn field_position(&self, id: ElementId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn field(&self, id: ElementId) -> Option<&BuilderField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// What the operator currently has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Section(ElementId),
    Field {
        section: ElementId,
        field: ElementId,
    },
}

impl Selection {
    /// Whether removing `id` invalidates this selection.
    pub(crate) fn involves(&self, id: ElementId) -> bool {
        match self {
            Self::None => false,
            Self::Section(section) => *section == id,
            Self::Field { section, field } => *section == id || *field == id,
        }
    }
}

/// Lifecycle of a builder session.
///
/// `Idle` until the operator selects something, `Editing` while nothing has
/// changed since the last save, `Dirty` after any mutation and `Saved` once
/// a structurally valid schema has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "selection", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Editing(Selection),
    Dirty(Selection),
    Saved,
}

impl SessionState {
    pub fn selection(&self) -> Selection {
        match self {
            Self::Editing(selection) | Self::Dirty(selection) => *selection,
            Self::Idle | Self::Saved => Selection::None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, Self::Dirty(_))
    }
}

/// Partial update of a field's properties.
///
/// `None` leaves a property unchanged. For optional properties the inner
/// `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub kind: Option<FieldKind>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub options: Option<Option<Vec<String>>>,
    pub validation: Option<Option<FieldValidation>>,
    /// Merged into the field's unmodelled properties; `null` removes a key
    pub extra: Map<String, Value>,
}

impl FieldPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(Some(options.into_iter().map(Into::into).collect()));
        self
    }

    pub fn validation(mut self, validation: Option<FieldValidation>) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update of a section's properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPatch {
    pub title: Option<String>,
}

impl SectionPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// A serialized schema as published to change subscribers.
///
/// The schema is published whatever its state; `errors` carries the result of
/// the structural check so a consumer such as autosave can tell a document
/// that [`FormBuilder::save`](super::FormBuilder::save) would accept from one
/// it would refuse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSnapshot {
    /// Mutation counter of the session when the snapshot was taken
    pub revision: u64,
    pub schema: Schema,
    pub errors: Vec<StructuralError>,
}

impl SchemaSnapshot {
    pub(crate) fn checked(revision: u64, schema: Schema, registry: &FieldTypeRegistry) -> Self {
        let errors = validate_structure_with(&schema, registry);
        Self {
            revision,
            schema,
            errors,
        }
    }

    /// True iff the schema passed the structural check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The schema, provided it is structurally valid.
    pub fn valid_schema(&self) -> Option<&Schema> {
        self.is_valid().then_some(&self.schema)
    }
}
