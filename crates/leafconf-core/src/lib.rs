//! leafconf-core - Language model for Leaf proxy configuration files
//!
//! Parses the line-oriented Leaf configuration format into a
//! position-annotated section model, provides the static schema of
//! sections, protocols, group types and rules, and resolves proxy and
//! group names across sections.
//!
//! # Example
//!
//! ```
//! use leafconf_core::{name_at, ConfDocument, Position, SectionName};
//!
//! let doc = ConfDocument::parse("[Proxy]\nDirect = direct\n\n[Rule]\nFINAL, Direct\n");
//! assert_eq!(doc.sections().len(), 2);
//! assert!(doc.has_section(SectionName::Rule));
//!
//! let site = name_at(&doc, Position::new(5, 9)).unwrap();
//! assert_eq!(site.name, "Direct");
//! ```

pub mod diagnostics;
pub mod document;
pub mod grammar;
pub mod lexical;
pub mod position;
pub mod resolve;
pub mod schema;
pub mod structure;

// Re-export main types and functions
pub use diagnostics::{Diagnostic, RelatedInformation, Severity};
pub use document::ConfDocument;
pub use grammar::{parse_key_value, KeyValue};
pub use lexical::{split_top_level_comma, strip_comment, trim_with_pos, TextSpan};
pub use position::{Position, Range};
pub use resolve::{
    name_at, plan_rename, resolve_declaration, resolve_references, ActorKind, Declaration,
    NameRole, NameSite, Namespace, RenameError, RenamePlan,
};
pub use schema::{Keyword, SectionName};
pub use structure::{parse_sections, section_index_at, Section};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
