//! Diagnostics for configuration documents
//!
//! This module provides structures for reporting errors, warnings and
//! informational messages found while validating a configuration.

use serde::{Deserialize, Serialize};

use crate::position::Range;

/// A diagnostic message attached to a source range
///
/// # Example
///
/// ```
/// use leafconf_core::diagnostics::{Diagnostic, Severity};
/// use leafconf_core::position::Range;
///
/// let diag = Diagnostic::error(Range::on_line(3, 1, 5), "Duplicate setting \"port\".")
///     .with_code("LC102")
///     .with_related(Range::on_line(2, 1, 4), "First definition of \"port\" is here.");
///
/// assert!(diag.is_error());
/// assert_eq!(diag.related.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level of the diagnostic
    pub severity: Severity,

    /// The diagnostic message
    pub message: String,

    /// Stable diagnostic code (e.g., "LC201")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Source range the diagnostic applies to
    pub range: Range,

    /// Optional file path where the issue occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Additional help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Secondary locations, such as the first of two duplicate definitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<RelatedInformation>,
}

/// A secondary location of a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedInformation {
    pub range: Range,
    pub message: String,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning, indicates a potential issue
    Warning,

    /// Error, indicates a problem that should be fixed
    Error,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, range: Range, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            range,
            file: None,
            help: None,
            related: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, range, message)
    }

    /// Create a warning diagnostic
    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, range, message)
    }

    /// Create an info diagnostic
    pub fn info(range: Range, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, range, message)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a related location
    pub fn with_related(mut self, range: Range, message: impl Into<String>) -> Self {
        self.related.push(RelatedInformation {
            range,
            message: message.into(),
        });
        self
    }

    /// Check if this is an error-level diagnostic
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: severity[code]: message
        write!(f, "{}", self.severity)?;
        if let Some(ref code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;

        match self.file {
            Some(ref file) => write!(f, "\n  --> {}:{}", file, self.range.start)?,
            None => write!(f, "\n  --> {}", self.range.start)?,
        }

        if let Some(ref help) = self.help {
            write!(f, "\n  = help: {}", help)?;
        }

        for related in &self.related {
            write!(f, "\n  = note: {} ({})", related.message, related.range.start)?;
        }

        Ok(())
    }
}
