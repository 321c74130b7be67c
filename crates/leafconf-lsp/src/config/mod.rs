//! Configuration for leafconf-lsp
//!
//! # Configuration File
//!
//! Settings are loaded from `leafconf.toml` in the workspace root:
//!
//! ```toml
//! [diagnostics]
//! enabled = true
//! missing_final = "error"
//! info_notes = false
//!
//! [completion]
//! snippets = true
//! ```
//!
//! A missing file means defaults. A file that cannot be parsed is reported
//! in the log and also falls back to defaults.

mod settings;


pub use settings::{
    CompletionSettings, ConfigError, DiagnosticSettings, RuleSeverity, Settings, CONFIG_FILE,
};
