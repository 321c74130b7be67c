//! Rename refactoring for Leaf configuration files
//!
//! Renames a proxy or group everywhere it appears: its declaration, group
//! member lists, `last-resort` values and rule targets.

use tower_lsp::lsp_types::{self as lsp, TextEdit};

use leafconf_core::{name_at, plan_rename, ConfDocument, RenameError};

use crate::encoding::{PositionEncoding, PositionMapper};

/// Result of a rename operation
#[derive(Debug, Clone)]
pub struct RenameResult {
    pub edits: Vec<TextEdit>,
    pub old_name: String,
    pub new_name: String,
}

/// Analyzer for rename refactoring
pub struct RenameAnalyzer {
    doc: ConfDocument,
    encoding: PositionEncoding,
}

impl RenameAnalyzer {
    /// Create a new rename analyzer
    pub fn new(text: &str) -> Self {
        Self::with_encoding(text, PositionEncoding::default())
    }

    /// Analyzer for a client counting columns in `encoding`
    pub fn with_encoding(text: &str, encoding: PositionEncoding) -> Self {
        Self {
            doc: ConfDocument::parse(text),
            encoding,
        }
    }

    fn mapper(&self) -> PositionMapper<'_> {
        PositionMapper::new(&self.doc, self.encoding)
    }

    /// Range and current text of the renameable name at `position`
    pub fn can_rename_at(&self, position: lsp::Position) -> Option<(lsp::Range, String)> {
        let mapper = self.mapper();
        let site = name_at(&self.doc, mapper.position(position))?;
        Some((mapper.lsp_range(site.range), site.name))
    }

    /// Edits renaming the name at `position` to `new_name`
    pub fn rename_at_position(
        &self,
        position: lsp::Position,
        new_name: &str,
    ) -> Result<RenameResult, RenameError> {
        let mapper = self.mapper();
        let plan = plan_rename(&self.doc, mapper.position(position), new_name)?;

        let edits = plan
            .ranges
            .into_iter()
            .map(|range| TextEdit {
                range: mapper.lsp_range(range),
                new_text: plan.new_name.clone(),
            })
            .collect();

        Ok(RenameResult {
            edits,
            old_name: plan.old_name,
            new_name: plan.new_name,
        })
    }
}
