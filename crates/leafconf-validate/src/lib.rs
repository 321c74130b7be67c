//! leafconf-validate - Validation engine for Leaf configuration files
//!
//! This crate provides a pluggable validation engine that checks a
//! configuration against the Leaf schema and reports every problem it finds.
//! Validation never stops at the first error.
//!
//! # Architecture
//!
//! Individual validators implement the `Validator` trait, one per section
//! family. The `ValidationEngine` runs all registered validators over one
//! parsed [`ConfDocument`] and collects their diagnostics.
//!
//! # Example
//!
//! ```
//! use leafconf_validate::validate;
//!
//! let diagnostics = validate("[Proxy]\nDirect = direct\n\n[Rule]\nFINAL, Direct\n");
//! assert!(diagnostics.is_empty());
//!
//! let diagnostics = validate("[Rule]\nFINAL, Nowhere\n");
//! assert_eq!(diagnostics.len(), 1);
//! assert!(diagnostics[0].is_error());
//! ```

pub mod actors;
pub mod codes;
pub mod env;
pub mod general;
pub mod hosts;
pub mod properties;
pub mod rules;
pub mod sections;
pub mod values;

use serde::Serialize;

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::ConfDocument;

// Re-export validators
pub use actors::ActorValidator;
pub use env::EnvValidator;
pub use general::GeneralValidator;
pub use hosts::HostValidator;
pub use rules::RuleValidator;
pub use sections::SectionValidator;

/// Trait for configuration validators
///
/// Validators inspect a parsed document and return a list of diagnostics
/// for any issues found. Each validator owns one code family.
pub trait Validator: Send + Sync {
    /// Get the validator's code family (e.g., "LC2" for proxies)
    fn code(&self) -> &'static str;

    /// Get a human-readable name for this validator
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Validate the document and return any diagnostics
    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic>;
}

/// Validation engine that orchestrates multiple validators
pub struct ValidationEngine {
    /// Registered validators
    validators: Vec<Box<dyn Validator>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// Create a new empty validation engine
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Create an engine with every built-in validator
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_validator(Box::new(SectionValidator));
        engine.add_validator(Box::new(GeneralValidator));
        engine.add_validator(Box::new(HostValidator));
        engine.add_validator(Box::new(ActorValidator));
        engine.add_validator(Box::new(RuleValidator));
        engine.add_validator(Box::new(EnvValidator));
        engine
    }

    /// Add a validator to the engine
    pub fn add_validator(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Get the number of registered validators
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Get the names of all registered validators
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Validate a document using all registered validators
    ///
    /// Returns the diagnostics of every validator, in registration order.
    pub fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for validator in &self.validators {
            diagnostics.extend(validator.validate(doc));
        }

        diagnostics
    }

    /// Check if a document has any errors
    pub fn has_errors(&self, doc: &ConfDocument) -> bool {
        self.validate(doc).iter().any(|d| d.is_error())
    }

    /// Validate and summarize
    pub fn report(&self, doc: &ConfDocument) -> ValidationReport {
        ValidationReport::new(self.validate(doc))
    }
}

/// Validate `text` with every built-in validator
pub fn validate(text: &str) -> Vec<Diagnostic> {
    ValidationEngine::with_defaults().validate(&ConfDocument::parse(text))
}

/// Diagnostics of one document with their counts
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            errors: diagnostics.iter().filter(|d| d.is_error()).count(),
            warnings: diagnostics.iter().filter(|d| d.is_warning()).count(),
            diagnostics,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
