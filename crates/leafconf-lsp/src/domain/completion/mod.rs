//! Completion engine for Leaf configuration files
//!
//! Provides completions for:
//! - Section headers: [Proxy Group]
//! - General settings and their values: loglevel = warn
//! - Proxy protocols, property keys and values
//! - Proxy group types, actors, property keys and values
//! - Rule types, network values and rule targets
//!
//! Every item carries a text edit with the exact range it replaces, so
//! clients filter on the text already typed.

mod general;
mod group;
mod header;
mod proxy;
mod rule;

pub use general::GeneralCompleter;
pub use group::GroupCompleter;
pub use header::HeaderCompleter;
pub use proxy::ProxyCompleter;
pub use rule::RuleCompleter;

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tower_lsp::lsp_types::{
    self as lsp, CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation,
    InsertTextFormat, MarkupContent, MarkupKind, TextEdit,
};

use leafconf_core::grammar::{parse_key_value, parse_property, KeyValue};
use leafconf_core::lexical::{char_len, strip_comment, take_chars, TextSpan};
use leafconf_core::position::{Position, Range};
use leafconf_core::schema::{Keyword, SectionName};
use leafconf_core::{ActorKind, ConfDocument, Namespace};

use crate::convert::to_lsp_range;
use crate::encoding::{PositionEncoding, PositionMapper};

/// Context detected for completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside a `[...]` header
    Header,
    /// Inside the body of a known section
    Section(SectionName),
    /// Inside a comment, an unknown section or before the first header
    None,
}

/// The line under the cursor
pub struct CursorContext<'a> {
    pub doc: &'a ConfDocument,
    /// Line number (1-indexed)
    pub line: usize,
    /// Cursor column (1-indexed)
    pub column: usize,
    /// Line content with the comment removed
    pub content: &'a str,
}

impl<'a> CursorContext<'a> {
    pub fn new(doc: &'a ConfDocument, pos: Position) -> Self {
        Self {
            doc,
            line: pos.line,
            column: pos.column,
            content: strip_comment(doc.line(pos.line)),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The line as a `key = value` item
    pub fn key_value(&self) -> Option<KeyValue> {
        parse_key_value(self.content, self.line, 1)
    }

    /// Column of the first `=` of the line
    pub fn equals_column(&self) -> Option<usize> {
        self.content
            .find('=')
            .map(|idx| char_len(&self.content[..idx]) + 1)
    }

    /// Index of the comma-separated argument of `text` under the cursor
    ///
    /// `text` starts at `start_column`.
    pub fn arg_index(&self, text: &str, start_column: usize) -> usize {
        take_chars(text, self.column.saturating_sub(start_column))
            .matches(',')
            .count()
    }

    /// Range replaced when completing `span`
    ///
    /// An empty span is completed at the cursor. Otherwise the range covers
    /// the span and extends to the cursor when it sits past the end.
    pub fn word_range(&self, span: &TextSpan) -> Range {
        if span.is_empty() {
            return Range::point(self.position());
        }
        Range::between(self.line, span.column, span.end_column().max(self.column))
    }
}

/// Main completion engine
pub struct CompletionEngine {
    snippets: bool,
    encoding: PositionEncoding,
    header_completer: HeaderCompleter,
    general_completer: GeneralCompleter,
    proxy_completer: ProxyCompleter,
    group_completer: GroupCompleter,
    rule_completer: RuleCompleter,
}

impl CompletionEngine {
    /// Create a new completion engine
    pub fn new() -> Self {
        Self::with_snippets(true)
    }

    /// Create an engine that offers snippets only when `snippets` is set
    pub fn with_snippets(snippets: bool) -> Self {
        Self {
            snippets,
            encoding: PositionEncoding::default(),
            header_completer: HeaderCompleter,
            general_completer: GeneralCompleter,
            proxy_completer: ProxyCompleter,
            group_completer: GroupCompleter,
            rule_completer: RuleCompleter,
        }
    }

    /// Count client columns in `encoding`
    pub fn with_encoding(mut self, encoding: PositionEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Get completions at the given position (static method for tests)
    pub fn complete(text: &str, position: lsp::Position) -> Vec<CompletionItem> {
        Self::new().get_completions(text, position)
    }

    /// Get completions at the given position
    pub fn get_completions(&self, text: &str, position: lsp::Position) -> Vec<CompletionItem> {
        let doc = ConfDocument::parse(text);
        let mapper = PositionMapper::new(&doc, self.encoding);
        let pos = mapper.position(position);
        if pos.column > char_len(doc.line(pos.line)) + 1 {
            return Vec::new();
        }
        let ctx = CursorContext::new(&doc, pos);

        let mut items = match self.detect_context(&doc, pos) {
            CompletionContext::Header => self.header_completer.complete(&ctx),
            CompletionContext::Section(SectionName::General) => {
                self.general_completer.complete(&ctx, self.snippets)
            }
            CompletionContext::Section(SectionName::Proxy) => {
                self.proxy_completer.complete(&ctx, self.snippets)
            }
            CompletionContext::Section(SectionName::ProxyGroup) => {
                self.group_completer.complete(&ctx, self.snippets)
            }
            CompletionContext::Section(SectionName::Rule) => self.rule_completer.complete(&ctx),
            CompletionContext::Section(_) | CompletionContext::None => Vec::new(),
        };

        if self.encoding != PositionEncoding::Utf32 {
            for item in &mut items {
                if let Some(CompletionTextEdit::Edit(edit)) = item.text_edit.as_mut() {
                    edit.range = mapper.encode_range(edit.range);
                }
            }
        }
        items
    }

    /// Detect the completion context at the given position
    pub fn detect_context(&self, doc: &ConfDocument, pos: Position) -> CompletionContext {
        let line_before = take_chars(doc.line(pos.line), pos.column.saturating_sub(1));

        if line_before.contains('#') {
            return CompletionContext::None;
        }

        static HEADER_RE: OnceLock<Regex> = OnceLock::new();
        let re = HEADER_RE.get_or_init(|| Regex::new(r"^\s*\[").unwrap());
        if re.is_match(line_before) {
            return CompletionContext::Header;
        }

        match doc.section_kind_at(pos.line) {
            Some(kind) => CompletionContext::Section(kind),
            None => CompletionContext::None,
        }
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== ITEM BUILDERS ====================

/// Completion item replacing `range` with `new_text`
pub(crate) fn edit_item(
    label: impl Into<String>,
    kind: CompletionItemKind,
    range: Range,
    new_text: impl Into<String>,
) -> CompletionItem {
    let label = label.into();
    CompletionItem {
        filter_text: Some(label.clone()),
        label,
        kind: Some(kind),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(
            to_lsp_range(range),
            new_text.into(),
        ))),
        ..Default::default()
    }
}

/// Completion item for a schema keyword, documented with its description
pub(crate) fn keyword_item<K: Keyword>(
    keyword: K,
    kind: CompletionItemKind,
    range: Range,
    new_text: impl Into<String>,
) -> CompletionItem {
    documented(edit_item(keyword.as_str(), kind, range, new_text), keyword.description())
}

pub(crate) fn documented(mut item: CompletionItem, description: &str) -> CompletionItem {
    item.documentation = Some(Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value: description.to_string(),
    }));
    item
}

pub(crate) fn with_detail(mut item: CompletionItem, detail: impl Into<String>) -> CompletionItem {
    item.detail = Some(detail.into());
    item
}

pub(crate) fn as_snippet(mut item: CompletionItem) -> CompletionItem {
    item.insert_text_format = Some(InsertTextFormat::SNIPPET);
    item
}

/// Plain value items
pub(crate) fn value_items(values: &[&str], range: Range) -> Vec<CompletionItem> {
    values
        .iter()
        .map(|value| edit_item(*value, CompletionItemKind::VALUE, range, *value))
        .collect()
}

pub(crate) fn bool_items(range: Range) -> Vec<CompletionItem> {
    value_items(&["true", "false"], range)
}

/// Protocol or group type items for the first argument of a declaration
///
/// When the value holds nothing but the type, a snippet with the whole
/// declaration template is offered instead of the bare name.
pub(crate) fn type_items<K: Keyword>(
    ctx: &CursorContext<'_>,
    args: &[TextSpan],
    snippets: bool,
    template: fn(K) -> &'static str,
) -> Vec<CompletionItem> {
    let range = ctx.word_range(&args[0]);
    let whole_value = snippets && args.len() == 1;

    K::ALL
        .iter()
        .copied()
        .map(|kind| {
            if whole_value {
                as_snippet(keyword_item(
                    kind,
                    CompletionItemKind::SNIPPET,
                    range,
                    template(kind),
                ))
            } else {
                keyword_item(kind, CompletionItemKind::KEYWORD, range, kind.as_str())
            }
        })
        .collect()
}

/// Part of a property argument the cursor is in
pub(crate) enum PropertySlot {
    /// The key, with whether the argument already has an `=`
    Key(TextSpan, bool),
    /// The value of a complete `key=value` pair
    Value(KeyValue),
}

pub(crate) fn property_slot(ctx: &CursorContext<'_>, arg: &TextSpan) -> PropertySlot {
    let Some(eq) = arg.text.find('=') else {
        return PropertySlot::Key(arg.clone(), false);
    };
    let eq_column = arg.column + char_len(&arg.text[..eq]);
    match parse_property(arg, ctx.line) {
        Some(prop) if ctx.column > eq_column => PropertySlot::Value(prop),
        Some(prop) => PropertySlot::Key(prop.key_span(), true),
        None => PropertySlot::Key(arg.clone(), true),
    }
}

/// Keys of the property arguments other than the one at `skip`
pub(crate) fn used_keys(args: &[TextSpan], skip: usize, line: usize) -> HashSet<String> {
    args.iter()
        .enumerate()
        .filter(|(idx, _)| *idx != skip)
        .filter_map(|(_, arg)| parse_property(arg, line))
        .map(|prop| prop.key)
        .collect()
}

/// Property key items
///
/// `required` keys are marked as such. Keys without an `=` yet get one
/// appended.
pub(crate) fn key_items<K: Keyword>(
    required: &[K],
    allowed: &[K],
    used: &HashSet<String>,
    range: Range,
    has_equals: bool,
) -> Vec<CompletionItem> {
    required
        .iter()
        .map(|key| (*key, "required"))
        .chain(allowed.iter().map(|key| (*key, "optional")))
        .filter(|(key, _)| !used.contains(key.as_str()))
        .map(|(key, detail)| {
            let new_text = if has_equals {
                key.as_str().to_string()
            } else {
                format!("{}=", key.as_str())
            };
            with_detail(
                keyword_item(key, CompletionItemKind::PROPERTY, range, new_text),
                detail,
            )
        })
        .collect()
}

/// Every declared proxy and group name except `exclude`
pub(crate) fn actor_items(
    doc: &ConfDocument,
    range: Range,
    exclude: Option<&str>,
) -> Vec<CompletionItem> {
    let namespace = Namespace::collect(doc);
    namespace
        .names()
        .into_iter()
        .filter(|name| Some(*name) != exclude)
        .filter_map(|name| namespace.get(name))
        .map(|decl| {
            let detail = match decl.kind {
                ActorKind::Proxy => "proxy",
                ActorKind::Group => "proxy group",
            };
            let item = edit_item(decl.name(), CompletionItemKind::REFERENCE, range, decl.name());
            documented(
                with_detail(item, detail),
                &format!("`{} = {}`", decl.name(), decl.item.value),
            )
        })
        .collect()
}
