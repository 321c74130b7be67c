//! `[General]` completion
//!
//! Provides completion for setting keys and for the values of `tun`,
//! `loglevel` and bool-like settings.

use std::collections::HashSet;

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use leafconf_core::lexical::{take_chars, trim_with_pos};
use leafconf_core::schema::{Keyword, SectionName, SettingKey, SettingKind, LOG_LEVELS};

use super::{as_snippet, bool_items, keyword_item, value_items, CursorContext};

/// General settings completer
pub struct GeneralCompleter;

impl GeneralCompleter {
    pub fn complete(&self, ctx: &CursorContext<'_>, snippets: bool) -> Vec<CompletionItem> {
        match ctx.equals_column() {
            Some(eq) if ctx.column > eq => self.complete_value(ctx),
            Some(_) => self.complete_key(ctx, true, snippets),
            None => self.complete_key(ctx, false, snippets),
        }
    }

    /// Keys not set on any other line
    fn complete_key(
        &self,
        ctx: &CursorContext<'_>,
        has_equals: bool,
        snippets: bool,
    ) -> Vec<CompletionItem> {
        let present: HashSet<String> = ctx
            .doc
            .key_values(SectionName::General)
            .into_iter()
            .filter(|kv| kv.line != ctx.line)
            .map(|kv| kv.key)
            .collect();

        let key_text = match ctx.content.find('=') {
            Some(idx) => &ctx.content[..idx],
            None => ctx.content,
        };
        let range = ctx.word_range(&trim_with_pos(key_text, 1));

        SettingKey::ALL
            .iter()
            .copied()
            .filter(|key| !present.contains(key.as_str()))
            .map(|key| {
                let name = key.as_str();
                if has_equals {
                    return keyword_item(key, CompletionItemKind::PROPERTY, range, name);
                }
                match (key.kind(), snippets) {
                    (SettingKind::Tun, _) => {
                        keyword_item(key, CompletionItemKind::PROPERTY, range, "tun = auto")
                    }
                    (SettingKind::LogLevel, true) => as_snippet(keyword_item(
                        key,
                        CompletionItemKind::PROPERTY,
                        range,
                        format!("{} = ${{1|{}|}}", name, LOG_LEVELS.join(",")),
                    )),
                    (SettingKind::BoolLike, true) => as_snippet(keyword_item(
                        key,
                        CompletionItemKind::PROPERTY,
                        range,
                        format!("{} = ${{1|true,false|}}", name),
                    )),
                    _ => keyword_item(
                        key,
                        CompletionItemKind::PROPERTY,
                        range,
                        format!("{} = ", name),
                    ),
                }
            })
            .collect()
    }

    fn complete_value(&self, ctx: &CursorContext<'_>) -> Vec<CompletionItem> {
        let Some(item) = ctx.key_value() else {
            return Vec::new();
        };
        // Completed values are single words
        let args = item.value_args();
        if take_chars(&item.value, ctx.column.saturating_sub(item.value_column)).contains(',') {
            return Vec::new();
        }
        let range = ctx.word_range(&args[0]);

        match SettingKey::parse(&item.key).map(SettingKey::kind) {
            Some(SettingKind::Tun) => value_items(&["auto"], range),
            Some(SettingKind::LogLevel) => value_items(LOG_LEVELS, range),
            Some(SettingKind::BoolLike) => bool_items(range),
            _ => Vec::new(),
        }
    }
}
