//! Core runtime configuration.
//!
//! Configuration is resolved once at startup and handed to the session. Report generation never
//! reads the environment or the filesystem.

use crate::error::{ReportError, ReportResult};
use crate::preview::HighlightMarkup;
use crate::stains::StainConfig;
use serde::Deserialize;
use std::path::Path;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct ReportConfig {
    stain_config: StainConfig,
    markup: HighlightMarkup,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportConfigWire {
    #[serde(default)]
    stains: Option<StainConfig>,
    #[serde(default)]
    highlight: Option<HighlightWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HighlightWire {
    open: String,
    close: String,
}

impl ReportConfig {
    pub fn new(stain_config: StainConfig, markup: HighlightMarkup) -> Self {
        Self {
            stain_config,
            markup,
        }
    }

    pub fn stain_config(&self) -> &StainConfig {
        &self.stain_config
    }

    pub fn markup(&self) -> &HighlightMarkup {
        &self.markup
    }

    /// Parse configuration from YAML text.
    ///
    /// Missing sections fall back to the built-in defaults. A present `stains` section replaces
    /// the default table entirely.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Translation` naming the failing path when the YAML does not match
    /// the schema, and `ReportError::InvalidInput` for unusable highlight tokens.
    pub fn from_yaml(yaml_text: &str) -> ReportResult<Self> {
        if yaml_text.trim().is_empty() {
            return Ok(Self::default());
        }

        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire: ReportConfigWire = match serde_path_to_error::deserialize(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() { "<root>" } else { path.as_str() };
                return Err(ReportError::Translation(format!(
                    "report configuration schema mismatch at {path}: {source}"
                )));
            }
        };

        let markup = match wire.highlight {
            Some(h) => HighlightMarkup::new(h.open, h.close)?,
            None => HighlightMarkup::default(),
        };

        Ok(Self {
            stain_config: wire.stains.unwrap_or_default(),
            markup,
        })
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> ReportResult<Self> {
        let text = std::fs::read_to_string(path).map_err(ReportError::FileRead)?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded report configuration from {}", path.display());
        Ok(config)
    }
}

/// Resolve configuration from an optional file path; `None` gives the built-in defaults.
pub fn resolve_config(path: Option<&Path>) -> ReportResult<ReportConfig> {
    match path {
        Some(path) => ReportConfig::load(path),
        None => Ok(ReportConfig::default()),
    }
}
