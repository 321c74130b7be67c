//! `key = value` line grammar

use crate::lexical::{char_len, split_top_level_comma, strip_comment, trim_with_pos, TextSpan};
use crate::position::Range;

/// A `key = value` item with the columns of both halves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub line: usize,
    pub key: String,
    pub key_column: usize,
    pub value: String,
    pub value_column: usize,
}

impl KeyValue {
    pub fn key_span(&self) -> TextSpan {
        TextSpan::new(self.key.clone(), self.key_column)
    }

    pub fn value_span(&self) -> TextSpan {
        TextSpan::new(self.value.clone(), self.value_column)
    }

    pub fn key_range(&self) -> Range {
        Range::on_line(self.line, self.key_column, char_len(&self.key))
    }

    pub fn value_range(&self) -> Range {
        Range::on_line(self.line, self.value_column, char_len(&self.value))
    }

    /// Range from the start of the key to the end of the value
    pub fn full_range(&self) -> Range {
        Range::between(
            self.line,
            self.key_column,
            self.value_column + char_len(&self.value),
        )
    }

    /// The comma-separated pieces of the value
    pub fn value_args(&self) -> Vec<TextSpan> {
        split_top_level_comma(&self.value, self.value_column)
    }
}

/// Parse `s` as a `key = value` item
///
/// The comment is removed first and the first `=` splits key from value.
/// Returns `None` when there is no `=`. `column` is the column of the first
/// character of `s`.
pub fn parse_key_value(s: &str, line: usize, column: usize) -> Option<KeyValue> {
    let s = strip_comment(s);
    let eq = s.find('=')?;

    let key = trim_with_pos(&s[..eq], column);
    let value = trim_with_pos(&s[eq + 1..], column + char_len(&s[..eq]) + 1);

    Some(KeyValue {
        line,
        key: key.text,
        key_column: key.column,
        value: value.text,
        value_column: value.column,
    })
}

/// Parse a whole raw line as a `key = value` item
pub fn parse_key_value_line(raw: &str, line: usize) -> Option<KeyValue> {
    parse_key_value(raw, line, 1)
}

/// Parse a comma-separated argument as `key=value`
pub fn parse_property(span: &TextSpan, line: usize) -> Option<KeyValue> {
    parse_key_value(&span.text, line, span.column)
}

/// Index of the first argument that contains `=`, or `args.len()`
///
/// Proxy and group values list positional arguments first and `key=value`
/// properties after them.
pub fn first_property_index(args: &[TextSpan]) -> usize {
    args.iter()
        .position(|a| a.text.contains('='))
        .unwrap_or(args.len())
}
