//! `[Proxy Group]` completion
//!
//! Provides completion for group types, member actors, property keys and
//! property values. Values are chosen by the property key: `method` offers
//! the selection methods, bool-like keys offer true/false and
//! `last-resort` offers actors.

use tower_lsp::lsp_types::CompletionItem;

use leafconf_core::grammar::first_property_index;
use leafconf_core::schema::{GroupProperty, GroupType, Keyword, ValueKind, GROUP_METHODS};

use super::{
    actor_items, bool_items, key_items, property_slot, type_items, used_keys, value_items,
    CursorContext, PropertySlot,
};

/// Proxy group declaration completer
pub struct GroupCompleter;

impl GroupCompleter {
    pub fn complete(&self, ctx: &CursorContext<'_>, snippets: bool) -> Vec<CompletionItem> {
        match ctx.equals_column() {
            Some(eq) if ctx.column > eq => {}
            _ => return Vec::new(),
        }
        let Some(item) = ctx.key_value() else {
            return Vec::new();
        };

        let args = item.value_args();
        let idx = ctx.arg_index(&item.value, item.value_column);
        if idx == 0 {
            return type_items(ctx, &args, snippets, GroupType::snippet);
        }

        let Some(group_type) = GroupType::parse(&args[0].text) else {
            return Vec::new();
        };
        let Some(arg) = args.get(idx) else {
            return Vec::new();
        };
        let first_property = first_property_index(&args);
        let own_name = Some(item.key.as_str());

        match property_slot(ctx, arg) {
            PropertySlot::Value(prop) => {
                let range = ctx.word_range(&prop.value_span());
                let kind = GroupProperty::parse(&prop.key)
                    .filter(|key| group_type.accepts(*key))
                    .map(GroupProperty::value_kind);
                match kind {
                    Some(ValueKind::GroupMethod) => value_items(GROUP_METHODS, range),
                    Some(ValueKind::BoolLike) => bool_items(range),
                    Some(ValueKind::Actor) => actor_items(ctx.doc, range, own_name),
                    _ => Vec::new(),
                }
            }
            PropertySlot::Key(key, true) => key_items(
                group_type.required_keys(),
                group_type.allowed_keys(),
                &used_keys(&args, idx, ctx.line),
                ctx.word_range(&key),
                true,
            ),
            // More members follow, so this one is a member too
            PropertySlot::Key(member, false) if idx + 1 < first_property => {
                actor_items(ctx.doc, ctx.word_range(&member), own_name)
            }
            PropertySlot::Key(word, false) => {
                let range = ctx.word_range(&word);
                let mut items = key_items(
                    group_type.required_keys(),
                    group_type.allowed_keys(),
                    &used_keys(&args, idx, ctx.line),
                    range,
                    false,
                );
                // Members cannot follow properties
                if idx < first_property {
                    items.extend(actor_items(ctx.doc, range, own_name));
                }
                items
            }
        }
    }
}
