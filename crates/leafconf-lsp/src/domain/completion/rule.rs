//! `[Rule]` completion
//!
//! Provides completion for rule types, `NETWORK` and `EXTERNAL` matchers and
//! rule targets.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use leafconf_core::lexical::split_top_level_comma;
use leafconf_core::schema::{ExternalSource, Keyword, RuleType, NETWORKS};

use super::{actor_items, keyword_item, value_items, CursorContext};

/// Rule line completer
pub struct RuleCompleter;

impl RuleCompleter {
    pub fn complete(&self, ctx: &CursorContext<'_>) -> Vec<CompletionItem> {
        let args = split_top_level_comma(ctx.content, 1);
        let idx = ctx.arg_index(ctx.content, 1);
        let Some(arg) = args.get(idx) else {
            return Vec::new();
        };
        let range = ctx.word_range(arg);

        if idx == 0 {
            return RuleType::ALL
                .iter()
                .copied()
                .map(|rule| keyword_item(rule, CompletionItemKind::KEYWORD, range, rule.as_str()))
                .collect();
        }

        let Some(rule) = RuleType::parse(&args[0].text) else {
            return Vec::new();
        };
        if idx == rule.target_index() {
            return actor_items(ctx.doc, range, None);
        }

        match rule {
            RuleType::Network if idx == 1 => value_items(NETWORKS, range),
            RuleType::External if idx == 1 && !arg.text.contains(':') => ExternalSource::ALL
                .iter()
                .copied()
                .map(|source| {
                    keyword_item(
                        source,
                        CompletionItemKind::VALUE,
                        range,
                        format!("{}:", source.as_str()),
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
