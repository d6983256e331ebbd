//! Content-derived schema versions.
//!
//! A schema's version is a hash of its canonical JSON, so two equal schemas
//! always share a version and any edit produces a new one. Responses record
//! the version they were filled against, which lets a submission detect that
//! the form changed underneath a draft.
//!
//! ```rust
//! use form_schema::schema::{Schema, SchemaVersion};
//!
//! let schema = Schema::from_json_str(r#"{"sections":[{"title":"A","fields":[]}]}"#).unwrap();
//! let version = SchemaVersion::of(&schema).unwrap();
//! assert_eq!(version, SchemaVersion::of(&schema.clone()).unwrap());
//! ```

use super::types::Schema;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque version identifier of a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion {
    opaque: String,
}

impl SchemaVersion {
    /// Version of a schema, computed from its canonical JSON.
    pub fn of(schema: &Schema) -> Result<Self, serde_json::Error> {
        let content = serde_json::to_vec(schema)?;
        Ok(Self::from_content(&content))
    }

    /// Version of arbitrary content bytes.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        let hash = hasher.finalize();

        Self {
            opaque: BASE64.encode(&hash[..12]),
        }
    }

    /// Wrap a version string obtained elsewhere, e.g. from storage.
    pub fn from_opaque(opaque: impl Into<String>) -> Self {
        Self {
            opaque: opaque.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.opaque
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opaque)
    }
}
