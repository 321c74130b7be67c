//! Conversions between leafconf coordinates and LSP types
//!
//! leafconf positions are 1-based and LSP positions are 0-based. The plain
//! functions here keep columns as character counts; client-facing positions
//! are re-encoded by [`PositionMapper`](crate::encoding::PositionMapper).

use serde_json::Value;
use tower_lsp::lsp_types::{
    self as lsp, DiagnosticRelatedInformation, DiagnosticSeverity, Location, NumberOrString, Url,
};

use leafconf_core::{Diagnostic, Position, Range, Severity};

use crate::encoding::PositionMapper;

/// Source name attached to every published diagnostic
pub const SOURCE: &str = "leafconf";

pub fn from_lsp_position(pos: lsp::Position) -> Position {
    Position::new(pos.line as usize + 1, pos.character as usize + 1)
}

pub fn to_lsp_position(pos: Position) -> lsp::Position {
    lsp::Position::new(
        pos.line.saturating_sub(1) as u32,
        pos.column.saturating_sub(1) as u32,
    )
}

pub fn to_lsp_range(range: Range) -> lsp::Range {
    lsp::Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

pub fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
    }
}

/// Convert a leafconf diagnostic for the document at `uri`
///
/// Related locations always point into the same document.
pub fn to_lsp_diagnostic(
    diag: &Diagnostic,
    uri: &Url,
    mapper: &PositionMapper<'_>,
) -> lsp::Diagnostic {
    let related_information = if diag.related.is_empty() {
        None
    } else {
        Some(
            diag.related
                .iter()
                .map(|related| DiagnosticRelatedInformation {
                    location: Location::new(uri.clone(), mapper.lsp_range(related.range)),
                    message: related.message.clone(),
                })
                .collect(),
        )
    };

    lsp::Diagnostic {
        range: mapper.lsp_range(diag.range),
        severity: Some(to_lsp_severity(diag.severity)),
        code: diag.code.as_ref().map(|c| NumberOrString::String(c.clone())),
        code_description: None,
        source: Some(SOURCE.to_string()),
        message: diag.message.clone(),
        related_information,
        tags: None,
        data: diag.help.as_ref().map(|h| Value::String(h.clone())),
    }
}
