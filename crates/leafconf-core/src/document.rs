//! Immutable snapshot of a configuration document

use crate::grammar::{parse_key_value_line, KeyValue};
use crate::lexical::split_lines;
use crate::schema::SectionName;
use crate::structure::{section_index_at, sections_of_lines, Section};

/// Raw lines of a document together with its section structure
///
/// Every query builds one snapshot and reads from it; nothing is cached
/// between queries.
#[derive(Debug, Clone)]
pub struct ConfDocument {
    lines: Vec<String>,
    sections: Vec<Section>,
}

impl ConfDocument {
    pub fn parse(text: &str) -> Self {
        let raw = split_lines(text);
        let sections = sections_of_lines(&raw);
        Self {
            lines: raw.into_iter().map(str::to_string).collect(),
            sections,
        }
    }

    /// Number of lines (a trailing newline counts as one more empty line)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of a 1-based line, empty when out of range
    pub fn line(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections with the given known name, in document order
    pub fn sections_of(&self, kind: SectionName) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.is(kind))
    }

    pub fn has_section(&self, kind: SectionName) -> bool {
        self.sections_of(kind).next().is_some()
    }

    /// Section whose body contains `line`
    pub fn section_at(&self, line: usize) -> Option<&Section> {
        section_index_at(&self.sections, line).map(|idx| &self.sections[idx])
    }

    /// Known section whose body contains `line`
    pub fn section_kind_at(&self, line: usize) -> Option<SectionName> {
        self.section_at(line).and_then(Section::kind)
    }

    /// Body lines of a section as `(line number, content)`
    pub fn body<'a>(&'a self, section: &Section) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        section.body_lines().map(move |line| (line, self.line(line)))
    }

    /// Body lines of every section with the given name
    pub fn lines_of(&self, kind: SectionName) -> impl Iterator<Item = (usize, &str)> {
        self.sections_of(kind)
            .flat_map(move |section| section.body_lines())
            .map(move |line| (line, self.line(line)))
    }

    /// Every `key = value` item in sections with the given name
    pub fn key_values(&self, kind: SectionName) -> Vec<KeyValue> {
        self.lines_of(kind)
            .filter_map(|(line_no, line)| parse_key_value_line(line, line_no))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[General]
loglevel = info

[Proxy]
Direct = direct
# comment
Reject = reject

[Proxy]
Extra = drop
";

    #[test]
    fn test_line_access() {
        let doc = ConfDocument::parse(SAMPLE);
        assert_eq!(doc.line(1), "[General]");
        assert_eq!(doc.line(0), "");
        assert_eq!(doc.line(1000), "");
        assert_eq!(doc.line_count(), 11);
    }

    #[test]
    fn test_key_values_across_sections() {
        let doc = ConfDocument::parse(SAMPLE);
        let names: Vec<String> = doc
            .key_values(SectionName::Proxy)
            .into_iter()
            .map(|kv| kv.key)
            .collect();
        assert_eq!(names, vec!["Direct", "Reject", "Extra"]);
    }

    #[test]
    fn test_section_kind_at() {
        let doc = ConfDocument::parse(SAMPLE);
        assert_eq!(doc.section_kind_at(2), Some(SectionName::General));
        assert_eq!(doc.section_kind_at(5), Some(SectionName::Proxy));
        assert_eq!(doc.section_kind_at(1), None);
        assert!(doc.has_section(SectionName::General));
        assert!(!doc.has_section(SectionName::Rule));
    }

    #[test]
    fn test_body() {
        let doc = ConfDocument::parse(SAMPLE);
        let general = &doc.sections()[0];
        let body: Vec<(usize, &str)> = doc.body(general).collect();
        assert_eq!(body, vec![(2, "loglevel = info")]);
    }
}
