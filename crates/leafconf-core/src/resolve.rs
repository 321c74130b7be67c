//! Actor namespace and name resolution
//!
//! Proxies and proxy groups share one namespace. A name is referenced from
//! group member lists, `last-resort` group properties and rule targets.

use std::collections::HashSet;
use thiserror::Error;

use crate::document::ConfDocument;
use crate::grammar::{parse_key_value_line, parse_property, KeyValue};
use crate::lexical::{split_top_level_comma, strip_comment, take_chars, TextSpan};
use crate::position::{Position, Range};
use crate::schema::{GroupProperty, Keyword, RuleType, SectionName};

/// Which section declares an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Proxy,
    Group,
}

impl ActorKind {
    pub fn section(self) -> SectionName {
        match self {
            Self::Proxy => SectionName::Proxy,
            Self::Group => SectionName::ProxyGroup,
        }
    }
}

/// A proxy or proxy group declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: ActorKind,
    pub item: KeyValue,
}

impl Declaration {
    pub fn name(&self) -> &str {
        &self.item.key
    }

    pub fn name_range(&self) -> Range {
        self.item.key_range()
    }
}

/// Every proxy and group declaration of a document
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    declarations: Vec<Declaration>,
    names: HashSet<String>,
}

impl Namespace {
    /// Collect proxies first, then groups, each in document order
    pub fn collect(doc: &ConfDocument) -> Self {
        let mut namespace = Self::default();
        for kind in [ActorKind::Proxy, ActorKind::Group] {
            for item in doc.key_values(kind.section()) {
                namespace.names.insert(item.key.clone());
                namespace.declarations.push(Declaration { kind, item });
            }
        }
        namespace
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// First declaration of `name`
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Distinct names, in declaration order
    pub fn names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.declarations
            .iter()
            .map(Declaration::name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Role of a name occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Declaration(ActorKind),
    GroupMember,
    LastResort,
    RuleTarget,
}

/// A proxy or group name found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSite {
    pub name: String,
    pub range: Range,
    pub role: NameRole,
}

impl NameSite {
    fn new(name: impl Into<String>, range: Range, role: NameRole) -> Self {
        Self {
            name: name.into(),
            range,
            role,
        }
    }

    fn from_span(span: &TextSpan, line: usize, role: NameRole) -> Self {
        Self::new(span.text.clone(), span.range(line), role)
    }
}

/// Index of the comma-separated argument the cursor is in
///
/// `text` starts at `start_column`; the index is the number of commas
/// strictly before the cursor.
fn arg_index_at(text: &str, start_column: usize, column: usize) -> usize {
    let before = take_chars(text, column.saturating_sub(start_column));
    before.matches(',').count()
}

/// The proxy or group name under the cursor, if any
///
/// The cursor must touch the name itself: whitespace between arguments,
/// comments and columns past the end of the line yield nothing.
pub fn name_at(doc: &ConfDocument, pos: Position) -> Option<NameSite> {
    let kind = doc.section_kind_at(pos.line)?;
    let line = doc.line(pos.line);
    match kind {
        SectionName::Proxy => declaration_at(line, pos, ActorKind::Proxy),
        SectionName::ProxyGroup => declaration_at(line, pos, ActorKind::Group)
            .or_else(|| group_reference_at(line, pos)),
        SectionName::Rule => rule_target_at(line, pos),
        _ => None,
    }
}

fn declaration_at(line: &str, pos: Position, kind: ActorKind) -> Option<NameSite> {
    let item = parse_key_value_line(line, pos.line)?;
    if item.key.is_empty() || !item.key_range().contains(pos) {
        return None;
    }
    Some(NameSite::new(
        item.key.clone(),
        item.key_range(),
        NameRole::Declaration(kind),
    ))
}

fn group_reference_at(line: &str, pos: Position) -> Option<NameSite> {
    let item = parse_key_value_line(line, pos.line)?;
    if pos.column < item.value_column {
        return None;
    }
    let args = item.value_args();
    let idx = arg_index_at(&item.value, item.value_column, pos.column);
    let arg = args.get(idx).filter(|_| idx > 0)?;

    match parse_property(arg, pos.line) {
        None if !arg.is_empty() && arg.touches(pos.column) => {
            Some(NameSite::from_span(arg, pos.line, NameRole::GroupMember))
        }
        None => None,
        Some(prop) => {
            let is_last_resort =
                GroupProperty::parse(&prop.key) == Some(GroupProperty::LastResort);
            let value = prop.value_span();
            (is_last_resort && !value.is_empty() && value.touches(pos.column))
                .then(|| NameSite::from_span(&value, pos.line, NameRole::LastResort))
        }
    }
}

/// Target span of a rule line, if the line has one
fn rule_target(args: &[TextSpan]) -> Option<&TextSpan> {
    let target_index = match RuleType::parse(&args[0].text) {
        Some(RuleType::Final) if args.len() > 1 => RuleType::Final.target_index(),
        _ => 2,
    };
    args.get(target_index)
}

fn rule_target_at(line: &str, pos: Position) -> Option<NameSite> {
    let content = strip_comment(line);
    let args = split_top_level_comma(content, 1);
    let idx = arg_index_at(content, 1, pos.column);
    let target = rule_target(&args)?;
    if idx == 0
        || target.is_empty()
        || args.get(idx) != Some(target)
        || !target.touches(pos.column)
    {
        return None;
    }
    Some(NameSite::from_span(target, pos.line, NameRole::RuleTarget))
}

/// First declaration of `name`, scanning proxies before groups
pub fn resolve_declaration(doc: &ConfDocument, name: &str) -> Option<Declaration> {
    [ActorKind::Proxy, ActorKind::Group]
        .into_iter()
        .find_map(|kind| {
            doc.key_values(kind.section())
                .into_iter()
                .find(|item| item.key == name)
                .map(|item| Declaration { kind, item })
        })
}

/// Every occurrence of `name`, in document order
///
/// Names containing `=` are never actor names and yield nothing.
pub fn resolve_references(
    doc: &ConfDocument,
    name: &str,
    include_declaration: bool,
) -> Vec<NameSite> {
    if name.is_empty() || name.contains('=') {
        return Vec::new();
    }

    let mut sites = Vec::new();

    if include_declaration {
        for item in doc.key_values(SectionName::Proxy) {
            if item.key == name {
                sites.push(NameSite::new(
                    name,
                    item.key_range(),
                    NameRole::Declaration(ActorKind::Proxy),
                ));
            }
        }
    }

    for item in doc.key_values(SectionName::ProxyGroup) {
        if include_declaration && item.key == name {
            sites.push(NameSite::new(
                name,
                item.key_range(),
                NameRole::Declaration(ActorKind::Group),
            ));
        }
        for arg in item.value_args().iter().skip(1) {
            match parse_property(arg, item.line) {
                None if arg.text == name => {
                    sites.push(NameSite::from_span(arg, item.line, NameRole::GroupMember));
                }
                Some(prop)
                    if GroupProperty::parse(&prop.key) == Some(GroupProperty::LastResort)
                        && prop.value == name =>
                {
                    sites.push(NameSite::from_span(
                        &prop.value_span(),
                        item.line,
                        NameRole::LastResort,
                    ));
                }
                _ => {}
            }
        }
    }

    for (line_no, line) in doc.lines_of(SectionName::Rule) {
        let args = split_top_level_comma(strip_comment(line), 1);
        if let Some(target) = rule_target(&args).filter(|t| t.text == name) {
            sites.push(NameSite::from_span(target, line_no, NameRole::RuleTarget));
        }
    }

    sites.sort_by_key(|site| site.range.start);
    sites
}

/// Why a rename was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("Invalid name \"{0}\": names cannot contain \",\" or \"=\"")]
    InvalidName(String),

    #[error("Cannot rename the current element")]
    NotRenameable,
}

/// Edits renaming every occurrence of an actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub old_name: String,
    pub new_name: String,
    /// Ranges to replace with `new_name`
    pub ranges: Vec<Range>,
}

/// Validate `new_name` before looking at the document
pub fn check_new_name(new_name: &str) -> Result<(), RenameError> {
    if new_name.contains('=') || new_name.contains(',') {
        return Err(RenameError::InvalidName(new_name.to_string()));
    }
    Ok(())
}

/// Plan the rename of the name under the cursor
pub fn plan_rename(
    doc: &ConfDocument,
    pos: Position,
    new_name: &str,
) -> Result<RenamePlan, RenameError> {
    check_new_name(new_name)?;

    let site = name_at(doc, pos).ok_or(RenameError::NotRenameable)?;
    let references = resolve_references(doc, &site.name, true);
    if references.is_empty() {
        return Err(RenameError::NotRenameable);
    }

    Ok(RenamePlan {
        old_name: site.name,
        new_name: new_name.to_string(),
        ranges: references.into_iter().map(|r| r.range).collect(),
    })
}

#[cfg(test)]
mod tests;
