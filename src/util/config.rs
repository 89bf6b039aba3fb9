//! Mock configuration.
//!
//! Defaults can be kept in a TOML file shared by a test suite:
//!
//! ```toml
//! behavior = "strict"
//! exact_parameter_match = true
//! sequence_exhausted = "error"
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::diagnostic::Diagnostic;

/// How a mock answers calls that match no setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockBehavior {
    /// Return the default value of the member type.
    #[default]
    Loose,
    /// Fail the call.
    Strict,
}

/// What a sequence does once every step has been consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceExhausted {
    #[default]
    Default,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub behavior: MockBehavior,

    /// Start every `protected()` facade in exact-match mode.
    pub exact_parameter_match: bool,

    pub sequence_exhausted: SequenceExhausted,
}

impl MockConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse mock config")
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read mock config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse mock config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{}", fallback_diagnostic(path, &e));
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).context("failed to serialize mock config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write mock config: {}", path.display()))?;

        Ok(())
    }
}

fn fallback_diagnostic(path: &Path, error: &anyhow::Error) -> Diagnostic {
    Diagnostic::warning(format!("ignoring mock config at {}", path.display()))
        .with_context(format!("{:#}", error))
        .with_suggestion("help: fix the file, or delete it to use the defaults")
}
