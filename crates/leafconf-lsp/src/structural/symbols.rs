//! Document symbol generation for Leaf configuration files
//!
//! Generates the LSP DocumentSymbol hierarchy for the outline view:
//! - Known sections → NAMESPACE
//! - General settings and Env variables → KEY
//! - Proxies → VARIABLE with PROPERTY children
//! - Proxy groups → VARIABLE with actor and PROPERTY children
//! - Rules → FUNCTION with the outbound as child
//! - Hosts → STRING with NUMBER address children

use tower_lsp::lsp_types::{DocumentSymbol, SymbolKind};

use leafconf_core::grammar::{
    first_property_index, parse_key_value_line, parse_property, KeyValue,
};
use leafconf_core::lexical::{char_len, split_top_level_comma, strip_comment, trim_with_pos, TextSpan};
use leafconf_core::position::{Position, Range};
use leafconf_core::schema::{Keyword, RuleType, SectionName};
use leafconf_core::{ConfDocument, Section};

use crate::convert::to_lsp_range;
use crate::encoding::{PositionEncoding, PositionMapper};

/// Main analyzer for extracting document symbols
pub struct SymbolAnalyzer;

impl SymbolAnalyzer {
    /// Extract symbols from document text
    pub fn extract_symbols(text: &str) -> Vec<DocumentSymbol> {
        Self::extract_symbols_with_encoding(text, PositionEncoding::default())
    }

    /// Extract symbols with ranges counted in `encoding`
    pub fn extract_symbols_with_encoding(
        text: &str,
        encoding: PositionEncoding,
    ) -> Vec<DocumentSymbol> {
        let doc = ConfDocument::parse(text);
        let mut symbols = Self::document_symbols(&doc);
        if encoding != PositionEncoding::Utf32 {
            encode_symbols(&mut symbols, &PositionMapper::new(&doc, encoding));
        }
        symbols
    }

    /// One symbol per known section, in document order
    ///
    /// Ranges count characters.
    pub fn document_symbols(doc: &ConfDocument) -> Vec<DocumentSymbol> {
        doc.sections()
            .iter()
            .filter_map(|section| {
                let kind = section.kind().filter(|k| *k != SectionName::OnDemand)?;
                let children = match kind {
                    SectionName::General => Self::entries(doc, section, "setting"),
                    SectionName::Env => Self::entries(doc, section, "variable"),
                    SectionName::Proxy => Self::proxies(doc, section),
                    SectionName::ProxyGroup => Self::groups(doc, section),
                    SectionName::Rule => Self::rules(doc, section),
                    SectionName::Host => Self::hosts(doc, section),
                    SectionName::OnDemand => Vec::new(),
                };
                Some(symbol(
                    kind.as_str(),
                    "section",
                    SymbolKind::NAMESPACE,
                    Self::section_range(doc, section),
                    section.name_range(),
                    children,
                ))
            })
            .collect()
    }

    /// From the header to the end of the last line the section owns
    fn section_range(doc: &ConfDocument, section: &Section) -> Range {
        let end_column = char_len(doc.line(section.end_line)) + 1;
        Range::new(
            Position::new(section.start_line, 1),
            Position::new(section.end_line, end_column),
        )
    }

    /// `key = value` items of one section
    fn items(doc: &ConfDocument, section: &Section) -> Vec<KeyValue> {
        doc.body(section)
            .filter_map(|(line_no, line)| parse_key_value_line(line, line_no))
            .filter(|item| !item.key.is_empty())
            .collect()
    }

    fn entries(doc: &ConfDocument, section: &Section, detail: &str) -> Vec<DocumentSymbol> {
        Self::items(doc, section)
            .into_iter()
            .map(|item| {
                leaf(
                    &item.key,
                    detail,
                    SymbolKind::KEY,
                    item.full_range(),
                    item.key_range(),
                )
            })
            .collect()
    }

    fn proxies(doc: &ConfDocument, section: &Section) -> Vec<DocumentSymbol> {
        Self::items(doc, section)
            .into_iter()
            .map(|item| {
                let args = item.value_args();
                let first_property = first_property_index(&args);
                let properties = property_symbols(
                    args.get(first_property..).unwrap_or(&[]),
                    item.line,
                );
                symbol(
                    &item.key,
                    "proxy",
                    SymbolKind::VARIABLE,
                    item.full_range(),
                    item.key_range(),
                    properties,
                )
            })
            .collect()
    }

    fn groups(doc: &ConfDocument, section: &Section) -> Vec<DocumentSymbol> {
        Self::items(doc, section)
            .into_iter()
            .map(|item| {
                let args = item.value_args();
                let first_property = first_property_index(&args);

                let mut children: Vec<DocumentSymbol> = args
                    .get(1..first_property)
                    .unwrap_or(&[])
                    .iter()
                    .filter(|actor| !actor.is_empty())
                    .map(|actor| span_symbol(actor, item.line, "actor", SymbolKind::VARIABLE))
                    .collect();
                children.extend(property_symbols(
                    args.get(first_property..).unwrap_or(&[]),
                    item.line,
                ));

                symbol(
                    &item.key,
                    "proxy group",
                    SymbolKind::VARIABLE,
                    item.full_range(),
                    item.key_range(),
                    children,
                )
            })
            .collect()
    }

    /// Rules with a known type and the right number of arguments
    fn rules(doc: &ConfDocument, section: &Section) -> Vec<DocumentSymbol> {
        doc.body(section)
            .filter_map(|(line_no, line)| {
                let stripped = strip_comment(line);
                let args = split_top_level_comma(stripped, 1);
                let rule = RuleType::parse(&args[0].text)?;
                if args.len() != rule.arity() + 1 {
                    return None;
                }

                let name = args[..rule.arity()]
                    .iter()
                    .map(|a| a.text.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let target = &args[rule.target_index()];
                let children = if target.is_empty() {
                    Vec::new()
                } else {
                    vec![span_symbol(target, line_no, "outbound", SymbolKind::VARIABLE)]
                };

                Some(symbol(
                    &name,
                    "rule",
                    SymbolKind::FUNCTION,
                    trim_with_pos(stripped, 1).range(line_no),
                    args[0].range(line_no),
                    children,
                ))
            })
            .collect()
    }

    fn hosts(doc: &ConfDocument, section: &Section) -> Vec<DocumentSymbol> {
        Self::items(doc, section)
            .into_iter()
            .map(|item| {
                let addresses = item
                    .value_args()
                    .iter()
                    .filter(|a| !a.is_empty())
                    .map(|a| span_symbol(a, item.line, "IP address", SymbolKind::NUMBER))
                    .collect();
                symbol(
                    &item.key,
                    "host name",
                    SymbolKind::STRING,
                    item.full_range(),
                    item.key_range(),
                    addresses,
                )
            })
            .collect()
    }
}

fn property_symbols(args: &[TextSpan], line: usize) -> Vec<DocumentSymbol> {
    args.iter()
        .filter_map(|arg| parse_property(arg, line))
        .filter(|prop| !prop.key.is_empty())
        .map(|prop| {
            leaf(
                &prop.key,
                &prop.value,
                SymbolKind::PROPERTY,
                prop.full_range(),
                prop.key_range(),
            )
        })
        .collect()
}

fn span_symbol(span: &TextSpan, line: usize, detail: &str, kind: SymbolKind) -> DocumentSymbol {
    let range = span.range(line);
    leaf(&span.text, detail, kind, range, range)
}

fn leaf(
    name: &str,
    detail: &str,
    kind: SymbolKind,
    range: Range,
    selection_range: Range,
) -> DocumentSymbol {
    symbol(name, detail, kind, range, selection_range, Vec::new())
}

fn symbol(
    name: &str,
    detail: &str,
    kind: SymbolKind,
    range: Range,
    selection_range: Range,
    children: Vec<DocumentSymbol>,
) -> DocumentSymbol {
    #[allow(deprecated)]
    DocumentSymbol {
        name: name.to_string(),
        detail: Some(detail.to_string()),
        kind,
        tags: None,
        deprecated: None,
        range: to_lsp_range(range),
        selection_range: to_lsp_range(selection_range),
        children: if children.is_empty() {
            None
        } else {
            Some(children)
        },
    }
}

fn encode_symbols(symbols: &mut [DocumentSymbol], mapper: &PositionMapper<'_>) {
    for symbol in symbols {
        symbol.range = mapper.encode_range(symbol.range);
        symbol.selection_range = mapper.encode_range(symbol.selection_range);
        if let Some(children) = symbol.children.as_mut() {
            encode_symbols(children, mapper);
        }
    }
}
