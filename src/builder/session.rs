//! The authoring session.

use super::drag::{DragState, DropOutcome, DropTarget};
use super::types::{
    BuilderField, BuilderSection, ElementId, FieldPatch, SchemaSnapshot, SectionPatch, Selection,
    SessionState,
};
use crate::config::BuilderConfig;
use crate::error::{BuilderError, BuilderResult, StructuralError};
use crate::field_type::{FieldKind, FieldTypeRegistry};
use crate::schema::{Field, Schema, validate_structure_with};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::watch;

/// A structural error resolved to the builder elements it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementError {
    pub error: StructuralError,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<ElementId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<ElementId>,
}

/// Interactive, mutable projection of a [`Schema`].
///
/// The builder owns its [`BuilderSection`]s and [`BuilderField`]s; the
/// canonical schema is derived from them on demand by [`snapshot`] or
/// [`serialize`], never the reverse. All mutations run synchronously to
/// completion. Each one bumps [`revision`], moves the session to
/// [`SessionState::Dirty`] and publishes a [`SchemaSnapshot`] to subscribers.
///
/// Abandoning a session simply drops it: nothing reaches the canonical schema
/// until [`save`] succeeds.
///
/// [`snapshot`]: FormBuilder::snapshot
/// [`serialize`]: FormBuilder::serialize
/// [`revision`]: FormBuilder::revision
/// [`save`]: FormBuilder::save
#[derive(Debug)]
pub struct FormBuilder<'r> {
    registry: &'r FieldTypeRegistry,
    config: BuilderConfig,
    sections: Vec<BuilderSection>,
    extra: BTreeMap<String, Value>,
    state: SessionState,
    revision: u64,
    drag: Option<DragState>,
    changes: watch::Sender<SchemaSnapshot>,
}

impl FormBuilder<'static> {
    /// Fresh session over the built-in field types: one empty section.
    pub fn standard() -> Self {
        Self::new(FieldTypeRegistry::standard(), BuilderConfig::default())
    }

    /// Session editing `schema` with the built-in field types.
    pub fn load(schema: &Schema) -> Self {
        Self::from_schema(FieldTypeRegistry::standard(), BuilderConfig::default(), schema)
    }
}

impl Default for FormBuilder<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> FormBuilder<'r> {
    /// Fresh session with a single empty section titled per `config`.
    pub fn new(registry: &'r FieldTypeRegistry, config: BuilderConfig) -> Self {
        let sections = vec![BuilderSection::new(config.default_section_title.clone())];
        Self::with_sections(registry, config, sections, BTreeMap::new())
    }

    /// Session editing an existing schema.
    ///
    /// Every section and field receives a fresh [`ElementId`]. The schema is
    /// taken as-is, structural problems included; they surface through
    /// [`structural_errors`](Self::structural_errors) and block saving.
    pub fn from_schema(registry: &'r FieldTypeRegistry, config: BuilderConfig, schema: &Schema) -> Self {
        let sections = schema.sections.iter().map(BuilderSection::from_section).collect();
        Self::with_sections(registry, config, sections, schema.extra.clone())
    }

    fn with_sections(
        registry: &'r FieldTypeRegistry,
        config: BuilderConfig,
        sections: Vec<BuilderSection>,
        extra: BTreeMap<String, Value>,
    ) -> Self {
        let schema = Schema {
            sections: sections.iter().map(BuilderSection::to_section).collect(),
            extra: extra.clone(),
        };
        let initial = SchemaSnapshot::checked(0, schema, registry);
        let (changes, _) = watch::channel(initial);
        Self {
            registry,
            config,
            sections,
            extra,
            state: SessionState::Idle,
            revision: 0,
            drag: None,
            changes,
        }
    }

    pub fn registry(&self) -> &'r FieldTypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn sections(&self) -> &[BuilderSection] {
        &self.sections
    }

    pub fn section(&self, id: ElementId) -> Option<&BuilderSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// A field and the section currently holding it.
    pub fn field(&self, id: ElementId) -> Option<(&BuilderSection, &BuilderField)> {
        self.sections
            .iter()
            .find_map(|section| section.field(id).map(|field| (section, field)))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self) -> Selection {
        self.state.selection()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Number of mutations applied in this session.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // Sections

    /// Append an empty section and return its id.
    pub fn add_section(&mut self) -> ElementId {
        let section = BuilderSection::new(format!("Section {}", self.sections.len() + 1));
        let id = section.id;
        debug!("Adding section {} '{}'", id, section.title);
        self.sections.push(section);
        self.touch();
        id
    }

    /// Remove a section with all its fields.
    pub fn remove_section(&mut self, id: ElementId) -> BuilderResult<BuilderSection> {
        let index = self.section_index(id)?;
        let section = self.sections.remove(index);
        debug!(
            "Removed section {} '{}' with {} field(s)",
            id,
            section.title,
            section.fields.len()
        );
        self.forget(id);
        for field in &section.fields {
            self.forget(field.id);
        }
        self.touch();
        Ok(section)
    }

    pub fn update_section(&mut self, id: ElementId, patch: SectionPatch) -> BuilderResult<()> {
        let index = self.section_index(id)?;
        if let Some(title) = patch.title {
            debug!("Retitling section {id} to '{title}'");
            self.sections[index].title = title;
        }
        self.touch();
        Ok(())
    }

    /// Move the section at `from` so that it ends up at `to`.
    pub fn reorder_sections(&mut self, from: usize, to: usize) -> BuilderResult<()> {
        move_within(&mut self.sections, from, to)?;
        if from != to {
            debug!("Moved section from position {from} to {to}");
            self.touch();
        }
        Ok(())
    }

    // Fields

    /// Append a new field of `kind` to a section.
    ///
    /// The field starts from the kind's registered defaults with a generated
    /// `<kind>_<n>` name unique in the session. Defaults are not assumed to be
    /// structurally complete: a new choice field has no options yet and will
    /// block saving until some are added.
    ///
    /// # Errors
    ///
    /// [`BuilderError::UnsupportedKind`] if `kind` is not registered, or
    /// [`BuilderError::UnknownSection`].
    pub fn add_field(&mut self, section: ElementId, kind: FieldKind) -> BuilderResult<ElementId> {
        let descriptor = self
            .registry
            .describe(&kind)
            .ok_or_else(|| BuilderError::UnsupportedKind(kind.to_string()))?;
        let index = self.section_index(section)?;

        let name = self.generate_name(&kind);
        let field = BuilderField::new(descriptor.default_props.instantiate(kind, name));
        let id = field.id;
        debug!("Adding field {} '{}' to section {}", id, field.field.name, section);
        self.sections[index].fields.push(field);
        self.touch();
        Ok(id)
    }

    pub fn remove_field(&mut self, section: ElementId, field: ElementId) -> BuilderResult<Field> {
        let (s, f) = self.field_in_section(section, field)?;
        let removed = self.sections[s].fields.remove(f);
        debug!("Removed field {} '{}'", field, removed.field.name);
        self.forget(field);
        self.touch();
        Ok(removed.field)
    }

    /// Apply a partial update to a field.
    ///
    /// The patch is applied all-or-nothing. Changing the kind drops `options`
    /// when the new kind takes none, and seeds an empty list when it needs
    /// some, unless the same patch also sets them.
    ///
    /// # Errors
    ///
    /// - [`BuilderError::EmptyName`] or [`BuilderError::NameCollision`] for a
    ///   bad rename
    /// - [`BuilderError::UnsupportedKind`] for an unregistered kind
    /// - [`BuilderError::UnknownField`] / [`BuilderError::FieldNotInSection`]
    pub fn update_field(
        &mut self,
        section: ElementId,
        field: ElementId,
        patch: FieldPatch,
    ) -> BuilderResult<()> {
        let (s, f) = self.field_in_section(section, field)?;
        let mut updated = self.sections[s].fields[f].field.clone();

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(BuilderError::EmptyName);
            }
            if name != updated.name && self.name_taken(&name, Some(field)) {
                return Err(BuilderError::NameCollision { name });
            }
            updated.name = name;
        }

        if let Some(kind) = patch.kind {
            let descriptor = self
                .registry
                .describe(&kind)
                .ok_or_else(|| BuilderError::UnsupportedKind(kind.to_string()))?;
            if kind != updated.kind && patch.options.is_none() {
                if !descriptor.requires_options {
                    updated.options = None;
                } else if updated.options.is_none() {
                    updated.options = Some(Vec::new());
                }
            }
            updated.kind = kind;
        }

        if let Some(label) = patch.label {
            updated.label = label;
        }
        if let Some(required) = patch.required {
            updated.required = required;
        }
        if let Some(placeholder) = patch.placeholder {
            updated.placeholder = placeholder;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(options) = patch.options {
            updated.options = options;
        }
        if let Some(validation) = patch.validation {
            updated.validation = validation;
        }
        for (key, value) in patch.extra {
            if value.is_null() {
                updated.extra.remove(&key);
            } else {
                updated.extra.insert(key, value);
            }
        }

        debug!("Updated field {} '{}'", field, updated.name);
        self.sections[s].fields[f].field = updated;
        self.touch();
        Ok(())
    }

    /// Insert a copy of a field right after it.
    ///
    /// The copy gets a new id, the configured name suffix (numbered further if
    /// that name is taken) and the configured label suffix.
    pub fn duplicate_field(&mut self, section: ElementId, field: ElementId) -> BuilderResult<ElementId> {
        let (s, f) = self.field_in_section(section, field)?;
        let original = &self.sections[s].fields[f].field;

        let mut copy = original.clone();
        copy.name = self.copy_name(&original.name);
        copy.label = format!("{}{}", original.label, self.config.duplicate_label_suffix);

        let duplicate = BuilderField::new(copy);
        let id = duplicate.id;
        debug!("Duplicated field {} as {} '{}'", field, id, duplicate.field.name);
        self.sections[s].fields.insert(f + 1, duplicate);
        self.touch();
        Ok(id)
    }

    /// Move the field at `from` so that it ends up at `to` within one section.
    ///
    /// Field identities are preserved; nothing is re-created.
    pub fn reorder_fields(&mut self, section: ElementId, from: usize, to: usize) -> BuilderResult<()> {
        let index = self.section_index(section)?;
        move_within(&mut self.sections[index].fields, from, to)?;
        if from != to {
            debug!("Moved field in section {section} from position {from} to {to}");
            self.touch();
        }
        Ok(())
    }

    /// Move a field into another section.
    ///
    /// The field lands at `to_index` in the target section, or at its end.
    /// Every precondition is checked before anything changes, so a failed
    /// move leaves the field exactly where it was. Moving within the same
    /// section behaves like [`reorder_fields`](Self::reorder_fields).
    ///
    /// Returns the field's final position in the target section. A move that
    /// lands the field where it already is changes nothing.
    pub fn move_field_between_sections(
        &mut self,
        field: ElementId,
        from_section: ElementId,
        to_section: ElementId,
        to_index: Option<usize>,
    ) -> BuilderResult<usize> {
        let (s, f) = self.field_in_section(from_section, field)?;
        let target = self.section_index(to_section)?;

        let len = if s == target {
            self.sections[target].fields.len() - 1
        } else {
            self.sections[target].fields.len()
        };
        let index = match to_index {
            Some(index) if index > len => {
                return Err(BuilderError::IndexOutOfBounds { index, len });
            }
            Some(index) => index,
            None => len,
        };
        if s == target && f == index {
            return Ok(index);
        }

        let moved = self.sections[s].fields.remove(f);
        self.sections[target].fields.insert(index, moved);

        if let Selection::Field { section, field: selected } = self.selection() {
            if selected == field && section != to_section {
                self.set_selection(Selection::Field {
                    section: to_section,
                    field,
                });
            }
        }

        debug!("Moved field {field} from section {from_section} to section {to_section} at {index}");
        self.touch();
        Ok(index)
    }

    // Selection

    /// Select a section or field.
    ///
    /// Selecting never marks the session dirty.
    pub fn select(&mut self, selection: Selection) -> BuilderResult<()> {
        match selection {
            Selection::None => {}
            Selection::Section(id) => {
                self.section_index(id)?;
            }
            Selection::Field { section, field } => {
                self.field_in_section(section, field)?;
            }
        }
        self.set_selection(selection);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::None);
    }

    fn set_selection(&mut self, selection: Selection) {
        self.state = if self.state.is_dirty() {
            SessionState::Dirty(selection)
        } else {
            SessionState::Editing(selection)
        };
    }

    fn forget(&mut self, id: ElementId) {
        if self.selection().involves(id) {
            self.set_selection(Selection::None);
        }
        if self.drag.is_some_and(|drag| drag.field == id) {
            self.drag = None;
        }
    }

    // Drag and drop

    /// Begin dragging a field.
    pub fn drag_start(&mut self, field: ElementId) -> BuilderResult<()> {
        if self.field(field).is_none() {
            return Err(BuilderError::UnknownField(field));
        }
        self.drag = Some(DragState {
            field,
            target: None,
        });
        Ok(())
    }

    /// Record where the dragged field would land. Ignored when no drag is
    /// in progress; returns whether the target was recorded.
    pub fn drag_over(&mut self, target: DropTarget) -> bool {
        match &mut self.drag {
            Some(drag) => {
                drag.target = Some(target);
                true
            }
            None => false,
        }
    }

    /// Finish the drag, moving the field to the last recorded target.
    ///
    /// A drop whose field or target section no longer exists, or with no
    /// target at all, changes nothing. A target index past the end of the
    /// section appends.
    pub fn drop(&mut self) -> DropOutcome {
        let Some(DragState {
            field,
            target: Some(target),
        }) = self.drag.take()
        else {
            return DropOutcome::Ignored;
        };

        let Some(from) = self.field(field).map(|(section, _)| section.id) else {
            debug!("Ignoring drop of field {field}: no longer in the session");
            return DropOutcome::Ignored;
        };
        let Some(to) = self.section(target.section) else {
            debug!("Ignoring drop onto section {}: no longer in the session", target.section);
            return DropOutcome::Ignored;
        };

        let capacity = if from == to.id {
            to.fields.len() - 1
        } else {
            to.fields.len()
        };
        let index = target.index.map(|index| index.min(capacity));

        match self.move_field_between_sections(field, from, target.section, index) {
            Ok(index) => DropOutcome::Moved {
                field,
                section: target.section,
                index,
            },
            Err(e) => {
                debug!("Ignoring drop of field {field}: {e}");
                DropOutcome::Ignored
            }
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn dragging(&self) -> Option<DragState> {
        self.drag
    }

    // Output

    /// The current canonical schema, without structural checks.
    ///
    /// Always reflects the latest mutation, whatever the state of any
    /// debounced notification.
    pub fn snapshot(&self) -> Schema {
        Schema {
            sections: self.sections.iter().map(BuilderSection::to_section).collect(),
            extra: self.extra.clone(),
        }
    }

    /// The current canonical schema, provided it is structurally valid.
    ///
    /// # Errors
    ///
    /// [`BuilderError::Structural`] listing every structural problem.
    pub fn serialize(&self) -> BuilderResult<Schema> {
        let schema = self.snapshot();
        let errors = validate_structure_with(&schema, self.registry);
        if errors.is_empty() {
            Ok(schema)
        } else {
            Err(BuilderError::Structural(errors))
        }
    }

    /// Commit the session: serialize and move to [`SessionState::Saved`].
    ///
    /// A structurally invalid session is refused and stays as it was.
    pub fn save(&mut self) -> BuilderResult<Schema> {
        match self.serialize() {
            Ok(schema) => {
                self.state = SessionState::Saved;
                info!(
                    "Saved form schema at revision {} ({} section(s), {} field(s))",
                    self.revision,
                    schema.sections.len(),
                    schema.field_count()
                );
                Ok(schema)
            }
            Err(e) => {
                warn!("Refusing to save form schema: {e}");
                Err(e)
            }
        }
    }

    /// Structural problems of the current state, located by element id.
    pub fn structural_errors(&self) -> Vec<ElementError> {
        validate_structure_with(&self.snapshot(), self.registry)
            .into_iter()
            .map(|error| {
                let location = error.location();
                let section = location.and_then(|at| self.sections.get(at.section));
                let field = location
                    .zip(section)
                    .and_then(|(at, section)| section.fields.get(at.field));
                ElementError {
                    section: section.map(|s| s.id),
                    field: field.map(|f| f.id),
                    error,
                }
            })
            .collect()
    }

    // Change notification

    /// Receive a [`SchemaSnapshot`] after every mutation.
    ///
    /// Feed the receiver to [`debounced`](super::notify::debounced) for
    /// settled notifications.
    pub fn subscribe(&self) -> watch::Receiver<SchemaSnapshot> {
        self.changes.subscribe()
    }

    /// Quiet period configured for debounced notification.
    pub fn notify_debounce(&self) -> Duration {
        self.config.notify_debounce()
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.state = SessionState::Dirty(self.state.selection());
        let snapshot = SchemaSnapshot::checked(self.revision, self.snapshot(), self.registry);
        if !snapshot.is_valid() {
            debug!(
                "Revision {} has {} structural error(s)",
                self.revision,
                snapshot.errors.len()
            );
        }
        self.changes.send_replace(snapshot);
    }

    // Lookup

    fn section_index(&self, id: ElementId) -> BuilderResult<usize> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(BuilderError::UnknownSection(id))
    }

    fn field_in_section(&self, section: ElementId, field: ElementId) -> BuilderResult<(usize, usize)> {
        let s = self.section_index(section)?;
        if let Some(f) = self.sections[s].field_position(field) {
            return Ok((s, f));
        }
        if self.field(field).is_some() {
            Err(BuilderError::FieldNotInSection { field, section })
        } else {
            Err(BuilderError::UnknownField(field))
        }
    }

    fn name_taken(&self, name: &str, except: Option<ElementId>) -> bool {
        self.sections
            .iter()
            .flat_map(|s| &s.fields)
            .any(|f| Some(f.id) != except && f.field.name == name)
    }

    fn generate_name(&self, kind: &FieldKind) -> String {
        (1..)
            .map(|n| format!("{}_{}", kind.as_str(), n))
            .find(|name| !self.name_taken(name, None))
            .unwrap_or_else(|| kind.as_str().to_string())
    }

    fn copy_name(&self, base: &str) -> String {
        let first = format!("{}{}", base, self.config.duplicate_name_suffix);
        if !self.name_taken(&first, None) {
            return first;
        }
        (2..)
            .map(|n| format!("{first}_{n}"))
            .find(|name| !self.name_taken(name, None))
            .unwrap_or(first)
    }
}

/// Stable list move: remove at `from`, insert at `to`.
fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> BuilderResult<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(BuilderError::IndexOutOfBounds { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}
