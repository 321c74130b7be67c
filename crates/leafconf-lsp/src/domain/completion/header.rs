//! Section header completion
//!
//! Provides completion for `[Name]` headers, offering the known sections the
//! document does not have yet.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use leafconf_core::lexical::trim_with_pos;
use leafconf_core::position::Range;
use leafconf_core::schema::{Keyword, SectionName};

use super::{documented, edit_item, CursorContext};

/// Section header completer
pub struct HeaderCompleter;

impl HeaderCompleter {
    /// Complete the section name after `[`
    pub fn complete(&self, ctx: &CursorContext<'_>) -> Vec<CompletionItem> {
        let trimmed = trim_with_pos(ctx.content, 1);
        // Replace everything after the bracket, a closing bracket included
        let start = trimmed.column + 1;
        let range = Range::between(ctx.line, start, trimmed.end_column().max(start));

        SectionName::ALL
            .iter()
            .copied()
            .filter(|kind| !ctx.doc.has_section(*kind))
            .map(|kind| {
                let item = edit_item(
                    format!("[{}]", kind.as_str()),
                    CompletionItemKind::MODULE,
                    range,
                    format!("{}]", kind.as_str()),
                );
                let mut item = documented(item, kind.description());
                item.filter_text = Some(kind.as_str().to_string());
                item
            })
            .collect()
    }
}
