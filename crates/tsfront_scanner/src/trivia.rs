//! Trivia helpers that work on raw text, independent of a scanner.
//!
//! Used for comment extraction (JSDoc, reference directives) and for
//! finding where a node's first token starts.

use crate::char_codes::*;
use tsfront_ast::syntax_kind::SyntaxKind;

/// A comment found in trivia. `kind` is `SingleLineCommentTrivia` or
/// `MultiLineCommentTrivia`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRange {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// The comment's text, delimiters included.
    pub fn text(&self, text: &[char]) -> String {
        text[self.pos as usize..self.end as usize].iter().collect()
    }
}

const MERGE_CONFLICT_MARKER_LENGTH: usize = 7;

#[inline]
fn at(text: &[char], pos: usize) -> Option<char> {
    text.get(pos).copied()
}

/// `#!` at the very start of the file.
pub fn is_shebang_trivia(text: &[char], pos: usize) -> bool {
    pos == 0 && at(text, 0) == Some('#') && at(text, 1) == Some('!')
}

/// Position just past the shebang line (the line break is not consumed).
pub fn scan_shebang_trivia(text: &[char], pos: usize) -> usize {
    let mut pos = pos + 2;
    while pos < text.len() && !is_line_break(text[pos]) {
        pos += 1;
    }
    pos
}

/// Seven `<`, `=`, `>` or `|` at the start of a line. All but `=======`
/// must be followed by a space.
pub fn is_conflict_marker_trivia(text: &[char], pos: usize) -> bool {
    if pos > 0 && !is_line_break(text[pos - 1]) {
        return false;
    }
    let Some(ch) = at(text, pos) else {
        return false;
    };
    if !matches!(ch, '<' | '=' | '>' | '|') || pos + MERGE_CONFLICT_MARKER_LENGTH > text.len() {
        return false;
    }
    if !(1..MERGE_CONFLICT_MARKER_LENGTH).all(|i| text[pos + i] == ch) {
        return false;
    }
    ch == '=' || at(text, pos + MERGE_CONFLICT_MARKER_LENGTH) == Some(' ')
}

/// Skip a conflict marker. For `<<<<<<<` and `>>>>>>>` only the marker line
/// is skipped; for `=======` and `|||||||` everything up to the closing
/// `>>>>>>>` marker is, since that region holds the other side of the merge.
pub fn skip_conflict_marker_trivia(text: &[char], pos: usize) -> usize {
    let ch = text[pos];
    let mut pos = pos;
    if ch == '<' || ch == '>' {
        while pos < text.len() && !is_line_break(text[pos]) {
            pos += 1;
        }
    } else {
        while pos < text.len() {
            let current = text[pos];
            if (current == '=' || current == '>')
                && current != ch
                && is_conflict_marker_trivia(text, pos)
            {
                break;
            }
            pos += 1;
        }
    }
    pos
}

/// Position of the first non-trivia character at or after `pos`.
///
/// With `stop_after_line_break`, stops right after the first line break.
/// With `stop_at_comments`, comments count as non-trivia.
pub fn skip_trivia(text: &[char], pos: u32, stop_after_line_break: bool, stop_at_comments: bool) -> u32 {
    let mut pos = pos as usize;
    if is_shebang_trivia(text, pos) {
        pos = scan_shebang_trivia(text, pos);
    }
    while let Some(ch) = at(text, pos) {
        match ch {
            '\r' | '\n' => {
                pos += 1;
                if ch == '\r' && at(text, pos) == Some('\n') {
                    pos += 1;
                }
                if stop_after_line_break {
                    break;
                }
            }
            '/' if !stop_at_comments => match at(text, pos + 1) {
                Some('/') => {
                    pos += 2;
                    while pos < text.len() && !is_line_break(text[pos]) {
                        pos += 1;
                    }
                }
                Some('*') => {
                    pos += 2;
                    while pos < text.len() {
                        if text[pos] == '*' && at(text, pos + 1) == Some('/') {
                            pos += 2;
                            break;
                        }
                        pos += 1;
                    }
                }
                _ => break,
            },
            '<' | '=' | '>' | '|' if is_conflict_marker_trivia(text, pos) => {
                pos = skip_conflict_marker_trivia(text, pos);
            }
            c if is_white_space_like(c) => pos += 1,
            _ => break,
        }
    }
    pos as u32
}

/// Comments before the token at `pos`, across line breaks.
pub fn leading_comment_ranges(text: &[char], pos: u32) -> Vec<CommentRange> {
    comment_ranges(text, pos as usize, false)
}

/// Comments after `pos` up to the end of its line.
pub fn trailing_comment_ranges(text: &[char], pos: u32) -> Vec<CommentRange> {
    comment_ranges(text, pos as usize, true)
}

fn comment_ranges(text: &[char], mut pos: usize, trailing: bool) -> Vec<CommentRange> {
    let mut ranges: Vec<CommentRange> = Vec::new();
    // Leading comments at the start of a line are collected right away;
    // elsewhere only after the first line break.
    let mut collecting = trailing || pos == 0;
    if is_shebang_trivia(text, pos) {
        pos = scan_shebang_trivia(text, pos);
    }
    while let Some(ch) = at(text, pos) {
        match ch {
            '\r' | '\n' => {
                pos += 1;
                if ch == '\r' && at(text, pos) == Some('\n') {
                    pos += 1;
                }
                if trailing {
                    break;
                }
                collecting = true;
                if let Some(last) = ranges.last_mut() {
                    last.has_trailing_new_line = true;
                }
            }
            '/' if matches!(at(text, pos + 1), Some('/') | Some('*')) => {
                let start = pos;
                let single_line = text[pos + 1] == '/';
                let mut has_trailing_new_line = false;
                pos += 2;
                if single_line {
                    while pos < text.len() {
                        if is_line_break(text[pos]) {
                            has_trailing_new_line = true;
                            break;
                        }
                        pos += 1;
                    }
                } else {
                    while pos < text.len() {
                        if text[pos] == '*' && at(text, pos + 1) == Some('/') {
                            pos += 2;
                            break;
                        }
                        pos += 1;
                    }
                }
                if collecting {
                    ranges.push(CommentRange {
                        kind: if single_line {
                            SyntaxKind::SingleLineCommentTrivia
                        } else {
                            SyntaxKind::MultiLineCommentTrivia
                        },
                        pos: start as u32,
                        end: pos as u32,
                        has_trailing_new_line,
                    });
                }
            }
            c if is_white_space_single_line(c) => pos += 1,
            c if is_line_break(c) => {
                pos += 1;
                if trailing {
                    break;
                }
                collecting = true;
                if let Some(last) = ranges.last_mut() {
                    last.has_trailing_new_line = true;
                }
            }
            _ => break,
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_skip_trivia() {
        let text = chars("  // c\n  /* d */ x");
        assert_eq!(skip_trivia(&text, 0, false, false), 17);
        assert_eq!(skip_trivia(&text, 0, true, false), 7);
        assert_eq!(skip_trivia(&text, 0, false, true), 2);
    }

    #[test]
    fn test_skip_trivia_shebang() {
        let text = chars("#!/usr/bin/env node\nlet");
        assert_eq!(skip_trivia(&text, 0, false, false), 20);
    }

    #[test]
    fn test_leading_comment_ranges() {
        let text = chars("/** doc */\n// line\nfoo");
        let ranges = leading_comment_ranges(&text, 0);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].kind, SyntaxKind::MultiLineCommentTrivia);
        assert_eq!(ranges[0].text(&text), "/** doc */");
        assert!(ranges[0].has_trailing_new_line);
        assert_eq!(ranges[1].kind, SyntaxKind::SingleLineCommentTrivia);
        assert_eq!(ranges[1].text(&text), "// line");
    }

    #[test]
    fn test_leading_comments_need_line_break_mid_file() {
        // After `a` on the same line the comment is trailing, not leading.
        let text = chars("a /* t */\n/* l */ b");
        let leading = leading_comment_ranges(&text, 1);
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].text(&text), "/* l */");
        let trailing = trailing_comment_ranges(&text, 1);
        assert_eq!(trailing.len(), 1);
        assert_eq!(trailing[0].text(&text), "/* t */");
    }

    #[test]
    fn test_conflict_markers() {
        let text = chars("<<<<<<< HEAD\nx\n=======\ny\n>>>>>>> other\nz");
        assert!(is_conflict_marker_trivia(&text, 0));
        assert!(!is_conflict_marker_trivia(&text, 1));
        assert_eq!(skip_conflict_marker_trivia(&text, 0), 12);
        let equals = 15;
        assert!(is_conflict_marker_trivia(&text, equals));
        let end_marker = skip_conflict_marker_trivia(&text, equals);
        assert_eq!(text[end_marker], '>');
    }
}
