//! Position encodings negotiated with the client
//!
//! leafconf columns count Unicode scalar values. LSP clients count UTF-16
//! code units unless both sides agree on something else during
//! `initialize`, so every position crossing the protocol goes through a
//! [`PositionMapper`] built for the current document.

use tower_lsp::lsp_types::{self as lsp, PositionEncodingKind};

use leafconf_core::{ConfDocument, Position, Range};

use crate::convert::{from_lsp_position, to_lsp_position};

/// Unit in which LSP `character` offsets are counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionEncoding {
    /// UTF-16 code units, the protocol default
    #[default]
    Utf16,
    /// Unicode scalar values, the same unit as leafconf columns
    Utf32,
}

impl PositionEncoding {
    /// Pick an encoding from the ones the client offers
    ///
    /// UTF-32 is taken whenever offered. Anything else falls back to UTF-16,
    /// which every client must support.
    pub fn negotiate(offered: Option<&[PositionEncodingKind]>) -> Self {
        match offered {
            Some(kinds) if kinds.contains(&PositionEncodingKind::UTF32) => Self::Utf32,
            _ => Self::Utf16,
        }
    }

    /// Encoding as advertised in the server capabilities
    pub fn kind(self) -> PositionEncodingKind {
        match self {
            Self::Utf16 => PositionEncodingKind::UTF16,
            Self::Utf32 => PositionEncodingKind::UTF32,
        }
    }
}

/// Converts positions of one document between leafconf and the client
pub struct PositionMapper<'a> {
    doc: &'a ConfDocument,
    encoding: PositionEncoding,
}

impl<'a> PositionMapper<'a> {
    pub fn new(doc: &'a ConfDocument, encoding: PositionEncoding) -> Self {
        Self { doc, encoding }
    }

    /// leafconf position of a client position
    ///
    /// An offset inside a surrogate pair lands on the character it splits.
    /// Offsets past the end of the line stay past it by the same amount.
    pub fn position(&self, pos: lsp::Position) -> Position {
        let scalar = from_lsp_position(pos);
        if self.encoding == PositionEncoding::Utf32 {
            return scalar;
        }

        let target = pos.character as usize;
        let mut units = 0;
        let mut chars = 0;
        for ch in self.doc.line(scalar.line).chars() {
            let next = units + ch.len_utf16();
            if next > target {
                break;
            }
            units = next;
            chars += 1;
        }
        if units == target || chars < self.line_len(scalar.line) {
            Position::new(scalar.line, chars + 1)
        } else {
            Position::new(scalar.line, chars + (target - units) + 1)
        }
    }

    /// Client position of a leafconf position
    pub fn lsp_position(&self, pos: Position) -> lsp::Position {
        let scalar = to_lsp_position(pos);
        if self.encoding == PositionEncoding::Utf32 {
            return scalar;
        }

        let offset = scalar.character as usize;
        let line = self.doc.line(pos.line);
        let units: usize = line.chars().take(offset).map(char::len_utf16).sum();
        let past_end = offset.saturating_sub(self.line_len(pos.line));
        lsp::Position::new(scalar.line, (units + past_end) as u32)
    }

    pub fn lsp_range(&self, range: Range) -> lsp::Range {
        lsp::Range::new(self.lsp_position(range.start), self.lsp_position(range.end))
    }

    /// Re-encode a range whose offsets count characters
    pub fn encode_range(&self, range: lsp::Range) -> lsp::Range {
        lsp::Range::new(
            self.lsp_position(from_lsp_position(range.start)),
            self.lsp_position(from_lsp_position(range.end)),
        )
    }

    fn line_len(&self, line: usize) -> usize {
        self.doc.line(line).chars().count()
    }
}
