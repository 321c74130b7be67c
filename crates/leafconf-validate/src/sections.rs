//! Section structure validator
//!
//! Checks what lies outside of any section and the headers themselves.

use std::collections::HashMap;

use leafconf_core::diagnostics::Diagnostic;
use leafconf_core::lexical::{char_len, strip_comment, trim_with_pos};
use leafconf_core::position::Range;
use leafconf_core::schema::{Keyword, SectionName};
use leafconf_core::{ConfDocument, Section};

use crate::{codes, Validator};

/// Validates section headers and content outside of sections
///
/// # Diagnostic Codes
///
/// - `LC001`: Content before the first section header
/// - `LC002`: Text after the closing `]` of a header
/// - `LC003`: Unknown section name
/// - `LC004`: Known section defined more than once (warning)
pub struct SectionValidator;

impl Validator for SectionValidator {
    fn code(&self) -> &'static str {
        "LC0"
    }

    fn name(&self) -> &'static str {
        "sections"
    }

    fn validate(&self, doc: &ConfDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let first_header = doc
            .sections()
            .first()
            .map_or(doc.line_count() + 1, |s| s.start_line);
        for line_no in 1..first_header {
            let content = trim_with_pos(strip_comment(doc.line(line_no)), 1);
            if !content.is_empty() {
                diagnostics.push(
                    Diagnostic::error(
                        content.range(line_no),
                        "Content does not belong to any section.",
                    )
                    .with_code(codes::CONTENT_OUTSIDE_SECTION),
                );
            }
        }

        let mut first_seen: HashMap<SectionName, &Section> = HashMap::new();
        for section in doc.sections() {
            if let Some(diag) = check_trailing_content(doc.line(section.start_line), section) {
                diagnostics.push(diag);
            }

            match section.kind() {
                None => diagnostics.push(
                    Diagnostic::error(
                        section.name_range(),
                        format!(
                            "Unknown section name: {}.\nSection names can only be one of: {}",
                            section.name,
                            SectionName::names().join(", ")
                        ),
                    )
                    .with_code(codes::UNKNOWN_SECTION),
                ),
                Some(kind) => match first_seen.get(&kind) {
                    Some(first) => diagnostics.push(
                        Diagnostic::warning(
                            section.name_range(),
                            format!("Duplicate section name: {}", section.name),
                        )
                        .with_code(codes::DUPLICATE_SECTION)
                        .with_related(
                            first.name_range(),
                            format!("First definition of \"{}\" is here.", section.name),
                        ),
                    ),
                    None => {
                        first_seen.insert(kind, section);
                    }
                },
            }
        }

        diagnostics
    }
}

fn check_trailing_content(line: &str, section: &Section) -> Option<Diagnostic> {
    let header = strip_comment(line).trim_end();
    let close = header.rfind(']')? + 1;
    if close == header.len() {
        return None;
    }
    let extra = trim_with_pos(&header[close..], char_len(&header[..close]) + 1);
    Some(
        Diagnostic::error(
            Range::on_line(section.start_line, extra.column, extra.len()),
            "Unexpected content after section header.",
        )
        .with_code(codes::TRAILING_HEADER_CONTENT),
    )
}
