//! Configuration settings
//!
//! Defines the `leafconf.toml` structures and how they shape the published
//! diagnostics.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use leafconf_core::diagnostics::{Diagnostic, Severity};
use leafconf_validate::codes;

/// Name of the settings file looked up in the workspace root
pub const CONFIG_FILE: &str = "leafconf.toml";

/// Severity override for a configurable diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Report as an error
    Error,
    /// Report as a warning (default)
    #[default]
    Warning,
    /// Report as an informational note
    Info,
    /// Do not report
    Ignore,
}

impl RuleSeverity {
    /// Convert to a diagnostic severity, returns None if Ignore
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            RuleSeverity::Error => Some(Severity::Error),
            RuleSeverity::Warning => Some(Severity::Warning),
            RuleSeverity::Info => Some(Severity::Info),
            RuleSeverity::Ignore => None,
        }
    }

    /// Check if this severity means the diagnostic is reported
    pub fn is_enabled(self) -> bool {
        self != RuleSeverity::Ignore
    }
}

/// Errors raised while loading `leafconf.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Diagnostic publishing settings
    pub diagnostics: DiagnosticSettings,
    /// Completion settings
    pub completion: CompletionSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load `leafconf.toml` from `root`
    ///
    /// A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Load `leafconf.toml` from `root`, falling back to defaults on error
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Filter and adjust validator output according to these settings
    pub fn apply(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        if !self.diagnostics.enabled {
            return Vec::new();
        }

        diagnostics
            .into_iter()
            .filter_map(|mut diag| {
                if diag.code.as_deref() == Some(codes::MISSING_FINAL) {
                    diag.severity = self.diagnostics.missing_final.to_severity()?;
                }
                if diag.severity == Severity::Info && !self.diagnostics.info_notes {
                    return None;
                }
                Some(diag)
            })
            .collect()
    }
}

/// Diagnostic publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticSettings {
    /// Publish diagnostics at all
    pub enabled: bool,
    /// Severity of the missing `FINAL` rule warning
    pub missing_final: RuleSeverity,
    /// Publish informational notes such as the `tun-fd` hint
    pub info_notes: bool,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            missing_final: RuleSeverity::Warning,
            info_notes: true,
        }
    }
}

/// Completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Offer snippet completions with tab stops
    pub snippets: bool,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self { snippets: true }
    }
}
