//! Intelligence module for leafconf LSP
//!
//! This module provides cross-reference features over proxy and group names:
//! - Go to definition (first declaration wins)
//! - Find references (group members, last-resort values, rule targets)
//! - Rename refactoring

pub mod navigation;
pub mod rename;


pub use navigation::NavigationAnalyzer;
pub use rename::{RenameAnalyzer, RenameResult};
