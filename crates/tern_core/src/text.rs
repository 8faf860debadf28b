//! Text span, range and change types for source location tracking.
//!
//! All positions are offsets in Unicode scalar values (`char`s) from the
//! start of the text.

use std::fmt;
use std::ops::Range;

/// A position in source text, measured in chars from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Whether this span contains or touches the given position.
    #[inline]
    pub fn contains_inclusive(&self, pos: TextPos) -> bool {
        pos >= self.start && pos <= self.end()
    }

    #[inline]
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::from_bounds(start, end)
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A half-open text range `[pos, end)`.
///
/// Node ranges use the full start of their first token, so `pos` includes
/// any leading trivia.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }

    /// Shift both ends by a signed delta.
    #[inline]
    pub fn shifted(&self, delta: i64) -> TextRange {
        TextRange::new(shift(self.pos, delta), shift(self.end, delta))
    }
}

#[inline]
fn shift(pos: TextPos, delta: i64) -> TextPos {
    (pos as i64 + delta).max(0) as TextPos
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

impl From<TextSpan> for TextRange {
    fn from(span: TextSpan) -> Self {
        TextRange::new(span.start, span.end())
    }
}

/// Errors raised when a change range does not describe the given texts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangeRangeError {
    #[error("change span {span:?} extends past the end of the old text ({old_len} chars)")]
    SpanOutOfBounds { span: TextSpan, old_len: TextPos },
    #[error("change of {old_len} -> {new_len} chars does not match new text length {actual}")]
    LengthMismatch {
        old_len: TextPos,
        new_len: TextPos,
        actual: TextPos,
    },
}

/// A single contiguous text replacement: the old `span` was replaced by
/// `new_length` chars.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TextChangeRange {
    pub span: TextSpan,
    pub new_length: TextPos,
}

impl TextChangeRange {
    #[inline]
    pub fn new(span: TextSpan, new_length: TextPos) -> Self {
        Self { span, new_length }
    }

    /// The change that leaves the text as it was.
    #[inline]
    pub fn unchanged() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.span.length == 0 && self.new_length == 0
    }

    /// The span the replacement occupies in the new text.
    #[inline]
    pub fn new_span(&self) -> TextSpan {
        TextSpan::new(self.span.start, self.new_length)
    }

    /// Length difference between the new and old text.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.new_length as i64 - self.span.length as i64
    }

    /// Check that this change turns a text of `old_len` chars into one of
    /// `new_len` chars.
    pub fn validate(&self, old_len: TextPos, new_len: TextPos) -> Result<(), ChangeRangeError> {
        if self.span.end() > old_len {
            return Err(ChangeRangeError::SpanOutOfBounds {
                span: self.span,
                old_len,
            });
        }
        let expected = old_len as i64 + self.delta();
        if expected != new_len as i64 {
            return Err(ChangeRangeError::LengthMismatch {
                old_len,
                new_len: expected.max(0) as TextPos,
                actual: new_len,
            });
        }
        Ok(())
    }

    /// The smallest change turning `old` into `new`, found by trimming the
    /// common prefix and suffix.
    pub fn between(old: &str, new: &str) -> Self {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        let prefix = old.iter().zip(new.iter()).take_while(|(a, b)| a == b).count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();
        let old_len = (old.len() - prefix - suffix) as TextPos;
        let new_len = (new.len() - prefix - suffix) as TextPos;
        Self::new(TextSpan::new(prefix as TextPos, old_len), new_len)
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column in chars.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A map from char offsets to line numbers, built from source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        if text.is_ascii() {
            line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| (i + 1) as u32));
        } else {
            for (i, ch) in text.chars().enumerate() {
                if ch == '\n' {
                    line_starts.push((i + 1) as u32);
                }
            }
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a char offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }

    pub fn line_start(&self, line: u32) -> TextPos {
        self.line_starts[line as usize]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert!(span.contains_inclusive(15));
    }

    #[test]
    fn test_text_range_shifted() {
        let range = TextRange::new(10, 20);
        assert_eq!(range.shifted(5), TextRange::new(15, 25));
        assert_eq!(range.shifted(-4), TextRange::new(6, 16));
    }

    #[test]
    fn test_change_range_between() {
        let change = TextChangeRange::between("let a = 1;", "let abc = 1;");
        assert_eq!(change.span, TextSpan::new(5, 0));
        assert_eq!(change.new_length, 2);
        assert_eq!(change.delta(), 2);

        let change = TextChangeRange::between("same", "same");
        assert!(change.is_unchanged());
    }

    #[test]
    fn test_change_range_between_overlapping_affixes() {
        // "aaa" -> "aa": the shared prefix eats everything but one char
        let change = TextChangeRange::between("aaa", "aa");
        assert_eq!(change.span, TextSpan::new(2, 1));
        assert_eq!(change.new_length, 0);
    }

    #[test]
    fn test_change_range_validate() {
        let change = TextChangeRange::new(TextSpan::new(2, 3), 1);
        assert!(change.validate(10, 8).is_ok());
        assert!(matches!(
            change.validate(4, 2),
            Err(ChangeRangeError::SpanOutOfBounds { .. })
        ));
        assert!(matches!(
            change.validate(10, 9),
            Err(ChangeRangeError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(12), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc.line, 1);
        assert_eq!(lc.character, 2);
    }

    #[test]
    fn test_line_map_counts_chars() {
        let map = LineMap::new("é\nx");
        assert_eq!(map.line_start(1), 2);
    }
}
