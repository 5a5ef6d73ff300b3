//! Text span and range types for source location tracking.
//!
//! All positions are character offsets (Unicode scalar values) into the
//! source text, which is how the scanner walks its input. `SourceText`
//! translates them back to byte offsets when a `&str` slice is needed.

use std::fmt;
use std::sync::Arc;

/// A position in source text, measured in characters from the start.
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

/// A text range with start and end positions, the shape every node and
/// node array carries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    /// Inclusive start, including leading trivia for nodes.
    pub pos: TextPos,
    /// Exclusive end.
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    /// Create an empty range at a position.
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
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }
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

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in characters.
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A map from character offsets to line numbers.
///
/// Line terminators are `\n`, `\r`, `\r\n`, U+2028 and U+2029.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(chars: &[char]) -> Self {
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            i += 1;
            match ch {
                '\r' => {
                    if chars.get(i) == Some(&'\n') {
                        i += 1;
                    }
                    line_starts.push(i as u32);
                }
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(i as u32),
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a character offset.
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

}

/// The text of one source file, addressable by character offset.
///
/// The character buffer is shared with the scanner. For pure-ASCII input the
/// character and byte offsets coincide and no translation table is built.
#[derive(Clone)]
pub struct SourceText {
    text: Arc<str>,
    chars: Arc<[char]>,
    // byte offset of every char, plus one trailing entry for the end
    byte_offsets: Option<Arc<[u32]>>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        let chars: Arc<[char]> = text.chars().collect();
        let byte_offsets = if chars.len() == text.len() {
            None
        } else {
            let mut offsets: Vec<u32> = text.char_indices().map(|(b, _)| b as u32).collect();
            offsets.push(text.len() as u32);
            Some(offsets.into())
        };
        Self {
            text: text.into(),
            chars,
            byte_offsets,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn chars(&self) -> &Arc<[char]> {
        &self.chars
    }

    /// Length in characters.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.chars.len() as TextPos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn char_at(&self, pos: TextPos) -> Option<char> {
        self.chars.get(pos as usize).copied()
    }

    /// Translate a character offset to a byte offset, clamping to the end.
    pub fn byte_offset(&self, pos: TextPos) -> usize {
        let pos = pos.min(self.len()) as usize;
        match &self.byte_offsets {
            None => pos,
            Some(offsets) => offsets[pos] as usize,
        }
    }

    /// The text between two character offsets. Out-of-range bounds are
    /// clamped and an inverted range yields the empty string.
    pub fn slice(&self, pos: TextPos, end: TextPos) -> &str {
        if end <= pos {
            return "";
        }
        let start = self.byte_offset(pos);
        let end = self.byte_offset(end);
        &self.text[start..end]
    }

    pub fn line_map(&self) -> LineMap {
        LineMap::new(&self.chars)
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("chars", &self.chars.len())
            .field("bytes", &self.text.len())
            .finish()
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
    }

    #[test]
    fn test_text_range_empty() {
        let range = TextRange::empty(7);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(TextSpan::from(range), TextSpan::new(7, 0));
    }

    #[test]
    fn test_line_map() {
        let chars: Vec<char> = "line1\nline2\r\nline3".chars().collect();
        let map = LineMap::new(&chars);
        assert_eq!(map.line_of(18), 2);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(13), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc, LineAndColumn::new(1, 2));
    }

    #[test]
    fn test_source_text_ascii_slice() {
        let text = SourceText::new("let x = 1;");
        assert_eq!(text.len(), 10);
        assert_eq!(text.slice(4, 5), "x");
        assert_eq!(text.slice(5, 4), "");
    }

    #[test]
    fn test_source_text_non_ascii_slice() {
        let text = SourceText::new("let π = 'é';");
        assert_eq!(text.char_at(4), Some('π'));
        assert_eq!(text.slice(4, 5), "π");
        assert_eq!(text.slice(8, 11), "'é'");
        assert_eq!(text.slice(0, 100), "let π = 'é';");
    }
}
