//! Hover documentation for Leaf configuration files
//!
//! Hovering a schema keyword shows its description. Hovering a proxy or
//! group name, either where it is declared or where it is referenced, shows
//! a summary of the declaration.

use tower_lsp::lsp_types::{self as lsp, Hover, HoverContents, MarkupContent, MarkupKind};

use leafconf_core::grammar::{
    first_property_index, parse_key_value_line, parse_property, KeyValue,
};
use leafconf_core::lexical::{char_len, split_top_level_comma, strip_comment, TextSpan};
use leafconf_core::position::{Position, Range};
use leafconf_core::schema::{
    GroupProperty, GroupType, Keyword, Protocol, ProxyProperty, RuleType, SectionName, SettingKey,
};
use leafconf_core::{resolve_declaration, ActorKind, ConfDocument, Declaration};

use crate::encoding::{PositionEncoding, PositionMapper};

/// Hover content before conversion to LSP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    /// Signature line, shown as code
    pub title: String,
    /// Markdown shown below the title
    pub description: Option<String>,
    /// The hovered token
    pub range: Range,
}

impl HoverInfo {
    fn new(title: impl Into<String>, description: Option<String>, range: Range) -> Self {
        Self {
            title: title.into(),
            description,
            range,
        }
    }

    fn keyword<K: Keyword>(label: &str, keyword: K, range: Range) -> Self {
        Self::new(
            format!("({}) {}", label, keyword.as_str()),
            Some(keyword.description().to_string()),
            range,
        )
    }

    /// Markdown rendering
    pub fn markdown(&self) -> String {
        let mut value = format!("```leafconf\n{}\n```", self.title);
        if let Some(description) = &self.description {
            value.push_str("\n\n");
            value.push_str(description);
        }
        value
    }

    pub fn to_hover(&self, mapper: &PositionMapper<'_>) -> Hover {
        Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: self.markdown(),
            }),
            range: Some(mapper.lsp_range(self.range)),
        }
    }
}

/// Analyzer for hover requests
pub struct HoverAnalyzer;

impl HoverAnalyzer {
    /// Hover for an LSP position counted in UTF-16 units
    pub fn hover(text: &str, position: lsp::Position) -> Option<Hover> {
        Self::hover_with_encoding(text, position, PositionEncoding::default())
    }

    pub fn hover_with_encoding(
        text: &str,
        position: lsp::Position,
        encoding: PositionEncoding,
    ) -> Option<Hover> {
        let doc = ConfDocument::parse(text);
        let mapper = PositionMapper::new(&doc, encoding);
        Self::hover_at(&doc, mapper.position(position)).map(|info| info.to_hover(&mapper))
    }

    /// Hover for a document position
    pub fn hover_at(doc: &ConfDocument, pos: Position) -> Option<HoverInfo> {
        let content = strip_comment(doc.line(pos.line));
        if pos.column > char_len(content) + 1 {
            return None;
        }

        match doc.section_kind_at(pos.line)? {
            SectionName::General => Self::hover_general(content, pos),
            SectionName::Proxy => Self::hover_proxy(content, pos),
            SectionName::ProxyGroup => Self::hover_group(doc, content, pos),
            SectionName::Rule => Self::hover_rule(doc, content, pos),
            _ => None,
        }
    }

    fn hover_general(content: &str, pos: Position) -> Option<HoverInfo> {
        let item = parse_key_value_line(content, pos.line)?;
        if !item.key_range().touches(pos) {
            return None;
        }
        let key = SettingKey::parse(&item.key)?;
        Some(HoverInfo::keyword("setting", key, item.key_range()))
    }

    fn hover_proxy(content: &str, pos: Position) -> Option<HoverInfo> {
        let item = parse_key_value_line(content, pos.line)?;
        if !item.key.is_empty() && item.key_range().touches(pos) {
            let (title, description) = proxy_summary(&item);
            return Some(HoverInfo::new(title, description, item.key_range()));
        }

        let args = item.value_args();
        let (idx, arg) = arg_at(&args, pos.column)?;
        let range = arg.range(pos.line);
        if idx == 0 {
            return Protocol::parse(&arg.text).map(|p| HoverInfo::keyword("protocol", p, range));
        }

        let protocol = Protocol::parse(&args[0].text)?;
        match parse_property(arg, pos.line) {
            Some(prop) if prop.key_range().touches(pos) => ProxyProperty::parse(&prop.key)
                .map(|key| HoverInfo::keyword("property", key, prop.key_range())),
            Some(_) => None,
            None if protocol.requires_host() && idx == 1 => {
                Some(HoverInfo::new(format!("(host) {}", arg.text), None, range))
            }
            None if protocol.requires_host() && idx == 2 => {
                Some(HoverInfo::new(format!("(port) {}", arg.text), None, range))
            }
            None => None,
        }
    }

    fn hover_group(doc: &ConfDocument, content: &str, pos: Position) -> Option<HoverInfo> {
        let item = parse_key_value_line(content, pos.line)?;
        if !item.key.is_empty() && item.key_range().touches(pos) {
            let (title, description) = group_summary(&item);
            return Some(HoverInfo::new(title, description, item.key_range()));
        }

        let args = item.value_args();
        let (idx, arg) = arg_at(&args, pos.column)?;
        if idx == 0 {
            return GroupType::parse(&arg.text)
                .map(|t| HoverInfo::keyword("group type", t, arg.range(pos.line)));
        }

        match parse_property(arg, pos.line) {
            None => reference_hover(doc, arg, pos.line),
            Some(prop) if prop.key_range().touches(pos) => GroupProperty::parse(&prop.key)
                .map(|key| HoverInfo::keyword("property", key, prop.key_range())),
            Some(prop) => {
                let value = prop.value_span();
                let is_last_resort =
                    GroupProperty::parse(&prop.key) == Some(GroupProperty::LastResort);
                if is_last_resort && value.touches(pos.column) {
                    reference_hover(doc, &value, pos.line)
                } else {
                    None
                }
            }
        }
    }

    fn hover_rule(doc: &ConfDocument, content: &str, pos: Position) -> Option<HoverInfo> {
        let args = split_top_level_comma(content, 1);
        let (idx, arg) = arg_at(&args, pos.column)?;
        if idx == 0 {
            return RuleType::parse(&arg.text)
                .map(|r| HoverInfo::keyword("rule type", r, arg.range(pos.line)));
        }

        let rule = RuleType::parse(&args[0].text)?;
        if idx == rule.target_index() {
            reference_hover(doc, arg, pos.line)
        } else {
            None
        }
    }
}

/// The non-empty argument touching `column`, with its index
fn arg_at(args: &[TextSpan], column: usize) -> Option<(usize, &TextSpan)> {
    args.iter()
        .enumerate()
        .find(|(_, arg)| !arg.is_empty() && arg.touches(column))
}

/// Summary of the declaration `span` refers to
fn reference_hover(doc: &ConfDocument, span: &TextSpan, line: usize) -> Option<HoverInfo> {
    let decl = resolve_declaration(doc, &span.text)?;
    let (title, description) = declaration_summary(&decl);
    Some(HoverInfo::new(title, description, span.range(line)))
}

fn declaration_summary(decl: &Declaration) -> (String, Option<String>) {
    match decl.kind {
        ActorKind::Proxy => proxy_summary(&decl.item),
        ActorKind::Group => group_summary(&decl.item),
    }
}

fn bullet_list(lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn property_bullets(args: &[TextSpan], line: usize) -> Vec<String> {
    args.iter()
        .filter_map(|arg| parse_property(arg, line))
        .map(|prop| format!("- {}: `{}`", prop.key, prop.value))
        .collect()
}

fn proxy_summary(item: &KeyValue) -> (String, Option<String>) {
    let args = item.value_args();
    let title = format!("(proxy) {} = {}", item.key, args[0].text);
    let first_property = first_property_index(&args);

    let mut lines = Vec::new();
    let requires_host = Protocol::parse(&args[0].text).is_some_and(Protocol::requires_host);
    if requires_host {
        let positional = args.get(1..first_property).unwrap_or(&[]);
        if let Some(host) = positional.first() {
            lines.push(format!("- host: `{}`", host.text));
        }
        if let Some(port) = positional.get(1) {
            lines.push(format!("- port: `{}`", port.text));
        }
    }
    lines.extend(property_bullets(
        args.get(first_property..).unwrap_or(&[]),
        item.line,
    ));

    (title, bullet_list(lines))
}

fn group_summary(item: &KeyValue) -> (String, Option<String>) {
    let args = item.value_args();
    let title = format!("(proxy group) {} = {}", item.key, args[0].text);
    let first_property = first_property_index(&args);

    let actors: Vec<String> = args
        .get(1..first_property)
        .unwrap_or(&[])
        .iter()
        .filter(|a| !a.is_empty())
        .map(|a| format!("`{}`", a.text))
        .collect();

    let mut lines = vec![format!("- actors ({}): {}", actors.len(), actors.join(", "))];
    lines.extend(property_bullets(
        args.get(first_property..).unwrap_or(&[]),
        item.line,
    ));

    (title, bullet_list(lines))
}
