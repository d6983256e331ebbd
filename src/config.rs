//! Engine configuration.
//!
//! All knobs have defaults; a deployment may override any subset from a JSON
//! document:
//!
//! ```rust
//! use form_schema::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{"builder": {"notify_debounce_ms": 50}}"#).unwrap();
//! assert_eq!(config.builder.notify_debounce_ms, 50);
//! assert_eq!(config.builder.default_section_title, "General Information");
//! assert!(config.validator.trim_whitespace);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub builder: BuilderConfig,
    pub validator: ValidatorConfig,
}

/// Authoring session behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Title of the section a fresh session starts with
    pub default_section_title: String,
    /// Appended to a field's name when it is duplicated
    pub duplicate_name_suffix: String,
    /// Appended to a field's label when it is duplicated
    pub duplicate_label_suffix: String,
    /// Quiet period before a change notification is delivered
    pub notify_debounce_ms: u64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_section_title: "General Information".to_string(),
            duplicate_name_suffix: "_copy".to_string(),
            duplicate_label_suffix: " (Copy)".to_string(),
            notify_debounce_ms: 300,
        }
    }
}

impl BuilderConfig {
    pub fn notify_debounce(&self) -> Duration {
        Duration::from_millis(self.notify_debounce_ms)
    }
}

/// Response validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Treat whitespace-only strings as empty
    pub trim_whitespace: bool,
    /// Emit warnings for response keys that match no field
    pub report_unknown_keys: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            report_unknown_keys: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.builder.duplicate_name_suffix.is_empty() {
            return Err(ConfigError::invalid(
                "builder.duplicate_name_suffix cannot be empty",
            ));
        }
        Ok(())
    }
}
