//! `[Proxy]` completion
//!
//! Provides completion for protocols, property keys not used yet, and the
//! values of `encrypt-method` and bool-like properties.

use tower_lsp::lsp_types::CompletionItem;

use leafconf_core::schema::{Keyword, Protocol, ProxyProperty, ValueKind, AEAD_CIPHERS};

use super::{
    bool_items, key_items, property_slot, type_items, used_keys, value_items, CursorContext,
    PropertySlot,
};

/// Proxy declaration completer
pub struct ProxyCompleter;

impl ProxyCompleter {
    pub fn complete(&self, ctx: &CursorContext<'_>, snippets: bool) -> Vec<CompletionItem> {
        // Proxy names are chosen by the user
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
            return type_items(ctx, &args, snippets, Protocol::snippet);
        }

        let Some(protocol) = Protocol::parse(&args[0].text) else {
            return Vec::new();
        };
        // Host and port are free-form
        let positional = if protocol.requires_host() { 3 } else { 1 };
        let Some(arg) = args.get(idx).filter(|_| idx >= positional) else {
            return Vec::new();
        };

        match property_slot(ctx, arg) {
            PropertySlot::Key(key, has_equals) => key_items(
                protocol.required_keys(),
                protocol.allowed_keys(),
                &used_keys(&args, idx, ctx.line),
                ctx.word_range(&key),
                has_equals,
            ),
            PropertySlot::Value(prop) => {
                let range = ctx.word_range(&prop.value_span());
                let kind = ProxyProperty::parse(&prop.key)
                    .filter(|key| protocol.accepts(*key))
                    .map(ProxyProperty::value_kind);
                match kind {
                    Some(ValueKind::Cipher) => value_items(AEAD_CIPHERS, range),
                    Some(ValueKind::BoolLike) => bool_items(range),
                    _ => Vec::new(),
                }
            }
        }
    }
}
