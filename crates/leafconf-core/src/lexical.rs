//! Lexical helpers shared by every layer
//!
//! All column arithmetic happens here. Higher layers never compute a column
//! themselves; they take it from a [`TextSpan`] or a
//! [`KeyValue`](crate::grammar::KeyValue).

use crate::position::Range;

/// A trimmed piece of a line together with the column it starts at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub column: usize,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, column: usize) -> Self {
        Self {
            text: text.into(),
            column,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Column one past the last character
    pub fn end_column(&self) -> usize {
        self.column + self.len()
    }

    pub fn range(&self, line: usize) -> Range {
        Range::on_line(line, self.column, self.len())
    }

    /// Whether `column` lies inside the span, the end column included
    pub fn touches(&self, column: usize) -> bool {
        column >= self.column && column <= self.end_column()
    }
}

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s` (all of `s` when it is shorter)
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Everything after the first `n` characters of `s`
pub fn skip_chars(s: &str, n: usize) -> &str {
    &s[take_chars(s, n).len()..]
}

/// Trim both ends of `s`, reporting the column of the first non-blank
/// character
///
/// `column` is the column of the first character of `s`. A blank input
/// keeps the given column.
pub fn trim_with_pos(s: &str, column: usize) -> TextSpan {
    let trimmed_start = s.trim_start();
    if trimmed_start.is_empty() {
        return TextSpan::new("", column);
    }
    let leading = char_len(&s[..s.len() - trimmed_start.len()]);
    TextSpan::new(trimmed_start.trim_end(), column + leading)
}

/// Split a document into raw lines
///
/// A trailing newline yields a final empty line, so the line count matches
/// what an editor shows. `\r\n` endings are accepted.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Everything before the first `#`
pub fn strip_comment(s: &str) -> &str {
    match s.find('#') {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Whether a line has no content once the comment is removed
pub fn is_blank(s: &str) -> bool {
    strip_comment(s).trim().is_empty()
}

/// Split `s` on every comma, trimming each piece
///
/// Never fails and always returns at least one span, even for an empty
/// input. Joining the span texts with commas reconstructs `s` up to
/// whitespace around the pieces.
pub fn split_top_level_comma(s: &str, column: usize) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut rest = s;
    let mut column = column;

    while let Some(idx) = rest.find(',') {
        let piece = &rest[..idx];
        spans.push(trim_with_pos(piece, column));
        column += char_len(piece) + 1;
        rest = &rest[idx + 1..];
    }
    spans.push(trim_with_pos(rest, column));

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_with_pos() {
        let span = trim_with_pos("   abc  ", 1);
        assert_eq!(span.text, "abc");
        assert_eq!(span.column, 4);
    }

    #[test]
    fn test_trim_with_pos_blank_keeps_column() {
        let span = trim_with_pos("    ", 7);
        assert_eq!(span.text, "");
        assert_eq!(span.column, 7);
    }

    #[test]
    fn test_trim_with_pos_counts_chars() {
        let span = trim_with_pos("\u{3000}名字", 1);
        assert_eq!(span.text, "名字");
        assert_eq!(span.column, 2);
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\r\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("a = b # note"), "a = b ");
        assert_eq!(strip_comment("# whole"), "");
        assert_eq!(strip_comment("plain"), "plain");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("  # comment"));
        assert!(!is_blank("x"));
    }

    #[test]
    fn test_split_empty_input_yields_one_span() {
        let spans = split_top_level_comma("", 5);
        assert_eq!(spans, vec![TextSpan::new("", 5)]);
    }

    #[test]
    fn test_split_columns() {
        let spans = split_top_level_comma("a, bb ,  ccc", 1);
        assert_eq!(
            spans,
            vec![
                TextSpan::new("a", 1),
                TextSpan::new("bb", 4),
                TextSpan::new("ccc", 10),
            ]
        );
    }

    #[test]
    fn test_split_trailing_comma() {
        let spans = split_top_level_comma("a,", 1);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1], TextSpan::new("", 3));
    }

    #[test]
    fn test_split_reconstructs_input() {
        let input = " direct ,1.2.3.4, 80 ,x=y";
        let joined = split_top_level_comma(input, 1)
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(",");
        let expected = input
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_take_and_skip_chars() {
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(skip_chars("héllo", 2), "llo");
        assert_eq!(take_chars("ab", 10), "ab");
        assert_eq!(skip_chars("ab", 10), "");
    }

    #[test]
    fn test_span_touches() {
        let span = TextSpan::new("abc", 3);
        assert!(span.touches(3));
        assert!(span.touches(6));
        assert!(!span.touches(7));
        assert!(!span.touches(2));
    }
}
