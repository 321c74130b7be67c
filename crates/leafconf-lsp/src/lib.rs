//! leafconf Language Server Protocol implementation
//!
//! This library provides LSP support for Leaf proxy configuration files,
//! including:
//! - Validation diagnostics from leafconf's native validators
//! - Completion for section headers, settings, protocols, group types,
//!   property keys, values and actor names
//! - Hover documentation and declaration summaries
//! - Document symbols for navigation
//! - Go to definition, find references and rename for proxies and groups
//! - Load/save of a current file through `workspace/executeCommand`
//!
//! # Library Usage
//!
//! ```ignore
//! use leafconf_lsp::{run_server, structural::SymbolAnalyzer};
//!
//! // Run the LSP server
//! run_server().await;
//!
//! // Or query a document directly
//! let symbols = SymbolAnalyzer::extract_symbols("[Proxy]\nDirect = direct\n");
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! leafconf-lsp
//!
//! # With debug logging
//! RUST_LOG=debug leafconf-lsp
//! ```

pub mod config;
pub mod convert;
pub mod domain;
pub mod encoding;
pub mod intelligence;
pub mod server;
pub mod session;
pub mod structural;

// Re-export main entry point
pub use server::run_server;

// Re-export commonly used types
pub use config::{RuleSeverity, Settings};
pub use domain::completion::CompletionEngine;
pub use encoding::PositionEncoding;
pub use session::{CurrentFile, SessionError};
pub use intelligence::{NavigationAnalyzer, RenameAnalyzer};
pub use structural::SymbolAnalyzer;
