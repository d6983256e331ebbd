//! Response envelope and the submit transition.

use super::document::ResponseDocument;
use crate::error::{FormResult, ResponseError, ResponseResult};
use crate::schema::{Schema, SchemaVersion};
use crate::validation::{FormValidator, ValidationReport};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A response document bound to the schema version it is filled against,
/// plus its submission state.
///
/// Drafts are mutated field by field. [`FormResponse::submit`] runs the
/// authoritative validation pass and finalizes the response; after that every
/// mutation is refused until the owner explicitly calls
/// [`FormResponse::reopen`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    schema_version: SchemaVersion,
    data: ResponseDocument,
    is_submitted: bool,
    submitted_at: Option<DateTime<Utc>>,
}

impl FormResponse {
    /// Start an empty draft for `schema`.
    pub fn new(schema: &Schema) -> FormResult<Self> {
        Ok(Self::from_draft(SchemaVersion::of(schema)?, ResponseDocument::new()))
    }

    /// Resume a draft previously stored against `schema_version`.
    pub fn from_draft(schema_version: SchemaVersion, data: ResponseDocument) -> Self {
        Self {
            schema_version,
            data,
            is_submitted: false,
            submitted_at: None,
        }
    }

    pub fn schema_version(&self) -> &SchemaVersion {
        &self.schema_version
    }

    pub fn data(&self) -> &ResponseDocument {
        &self.data
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Mutable access to the draft document.
    pub fn data_mut(&mut self) -> ResponseResult<&mut ResponseDocument> {
        if self.is_submitted {
            return Err(ResponseError::AlreadySubmitted);
        }
        Ok(&mut self.data)
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: Value) -> ResponseResult<()> {
        self.data_mut()?.set(name, value);
        Ok(())
    }

    pub fn clear_value(&mut self, name: &str) -> ResponseResult<Option<Value>> {
        Ok(self.data_mut()?.remove(name))
    }

    /// See [`ResponseDocument::toggle_option`].
    pub fn toggle_option(&mut self, name: &str, option: &str) -> ResponseResult<bool> {
        Ok(self.data_mut()?.toggle_option(name, option))
    }

    /// Advisory validation of the current draft.
    pub fn check(&self, schema: &Schema, validator: &FormValidator<'_>) -> ValidationReport {
        validator.validate(schema, &self.data)
    }

    /// Validate against `schema` and finalize the response.
    pub fn submit(
        &mut self,
        schema: &Schema,
        validator: &FormValidator<'_>,
    ) -> FormResult<ValidationReport> {
        self.submit_at(schema, validator, Utc::now())
    }

    /// [`submit`](Self::submit) with an explicit submission time.
    pub fn submit_at(
        &mut self,
        schema: &Schema,
        validator: &FormValidator<'_>,
        at: DateTime<Utc>,
    ) -> FormResult<ValidationReport> {
        if self.is_submitted {
            return Err(ResponseError::AlreadySubmitted.into());
        }

        let current = SchemaVersion::of(schema)?;
        if current != self.schema_version {
            warn!(
                "Refusing submission filled against schema {} (current {})",
                self.schema_version, current
            );
            return Err(ResponseError::SchemaMismatch {
                expected: self.schema_version.to_string(),
                actual: current.to_string(),
            }
            .into());
        }

        let report = validator.validate(schema, &self.data);
        if !report.is_submittable() {
            warn!(
                "Refusing submission with {} invalid field(s)",
                report.error_count()
            );
            return Err(ResponseError::Rejected(Box::new(report)).into());
        }

        self.is_submitted = true;
        self.submitted_at = Some(at);
        info!(
            "Response against schema {} submitted with {} value(s)",
            self.schema_version,
            self.data.len()
        );
        Ok(report)
    }

    /// Allow edits to a submitted response again.
    ///
    /// Whether finalized responses may be amended is the caller's policy; this
    /// crate only provides the transition.
    pub fn reopen(&mut self) {
        self.is_submitted = false;
        self.submitted_at = None;
    }
}
