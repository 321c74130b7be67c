//! Section structure of a configuration document
//!
//! Finds `[Name]` headers and assigns every following line to a section.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use crate::lexical::{char_len, split_lines, trim_with_pos};
use crate::position::Range;
use crate::schema::{Keyword, SectionName};

/// A `[Name]` header and the lines it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Trimmed name between the brackets
    pub name: String,
    /// Column of the first character of the name
    pub name_column: usize,
    /// Line of the header
    pub start_line: usize,
    /// Last line owned by the section (inclusive)
    pub end_line: usize,
}

impl Section {
    /// The known section this header names, if any
    pub fn kind(&self) -> Option<SectionName> {
        SectionName::parse(&self.name)
    }

    pub fn is(&self, kind: SectionName) -> bool {
        self.kind() == Some(kind)
    }

    /// Range of the name inside the header
    pub fn name_range(&self) -> Range {
        Range::on_line(self.start_line, self.name_column, char_len(&self.name))
    }

    /// Lines after the header, up to and including `end_line`
    pub fn body_lines(&self) -> RangeInclusive<usize> {
        self.start_line + 1..=self.end_line
    }
}

fn header_regex() -> &'static Regex {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    HEADER_RE.get_or_init(|| Regex::new(r"^(\s*)\[([^\]#]+)\]").unwrap())
}

/// Match a section header, returning the trimmed name and its column
pub fn match_header(line: &str) -> Option<(String, usize)> {
    let caps = header_regex().captures(line)?;
    let leading = char_len(&caps[1]);
    let name = trim_with_pos(&caps[2], leading + 2);
    Some((name.text, name.column))
}

/// Find every section of `text`
///
/// A section ends at the last non-blank line before the next header, so a
/// run of blank lines between two sections belongs to the one that
/// follows. The last section extends to the end of the document. Without
/// any header the result is empty.
pub fn parse_sections(text: &str) -> Vec<Section> {
    sections_of_lines(&split_lines(text))
}

/// [`parse_sections`] over lines that were already split
pub fn sections_of_lines(lines: &[&str]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some((name, name_column)) = match_header(line) else {
            continue;
        };
        let line_no = idx + 1;

        if let Some(last) = sections.last_mut() {
            let mut end = line_no - 1;
            while end > 1 && lines[end - 1].trim().is_empty() {
                end -= 1;
            }
            last.end_line = end;
        }

        sections.push(Section {
            name,
            name_column,
            start_line: line_no,
            end_line: line_no,
        });
    }

    if let Some(last) = sections.last_mut() {
        last.end_line = lines.len();
    }

    sections
}

/// Index of the section whose body contains `line`
///
/// This is the last section whose header line is strictly before `line`.
/// A header line itself therefore maps to the previous section.
pub fn section_index_at(sections: &[Section], line: usize) -> Option<usize> {
    sections.iter().rposition(|s| s.start_line < line)
}
