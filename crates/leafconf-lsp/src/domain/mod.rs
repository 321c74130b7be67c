//! Domain intelligence for leafconf LSP
//!
//! Provides context-aware assistance:
//! - Completion (headers, settings, protocols, group types, properties,
//!   actors, rules)
//! - Hover (schema documentation and declaration summaries)

pub mod completion;
pub mod hover;

#[cfg(test)]
mod tests;

pub use completion::CompletionEngine;
pub use hover::{HoverAnalyzer, HoverInfo};
