//! Structural intelligence for leafconf LSP
//!
//! This module provides document structure analysis for the outline view:
//! sections and the declarations inside them.

pub mod symbols;

pub use symbols::SymbolAnalyzer;
