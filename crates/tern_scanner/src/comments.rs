//! Leading and trailing comment ranges around a position.
//!
//! Comments are not part of the tree. Tools that need them (formatters,
//! documentation extractors) ask for the ranges next to a node's `pos` or
//! `end` on demand.

use tern_ast::SyntaxKind;
use tern_core::text::TextPos;

use crate::char_codes::{is_line_break, is_white_space_like};

/// A comment found in trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRange {
    pub pos: TextPos,
    pub end: TextPos,
    /// `SingleLineCommentTrivia` or `MultiLineCommentTrivia`.
    pub kind: SyntaxKind,
    pub has_trailing_new_line: bool,
}

/// Comments that belong to the token after `pos`: those on their own lines
/// before it, and at file start, every comment up to it.
pub fn leading_comment_ranges(text: &[char], pos: usize) -> Vec<CommentRange> {
    collect_comment_ranges(text, pos, false)
}

/// Comments on the same line after `pos`, up to the first line break.
pub fn trailing_comment_ranges(text: &[char], pos: usize) -> Vec<CommentRange> {
    collect_comment_ranges(text, pos, true)
}

fn shebang_length(text: &[char]) -> usize {
    if text.len() >= 2 && text[0] == '#' && text[1] == '!' {
        text.iter().position(|&c| is_line_break(c)).unwrap_or(text.len())
    } else {
        0
    }
}

fn collect_comment_ranges(text: &[char], mut pos: usize, trailing: bool) -> Vec<CommentRange> {
    let mut ranges = Vec::new();
    let mut pending: Option<CommentRange> = None;
    let mut collecting = trailing;

    if pos == 0 {
        collecting = true;
        pos = shebang_length(text);
    }

    while pos < text.len() {
        match text[pos] {
            '\r' | '\n' => {
                if text[pos] == '\r' && text.get(pos + 1) == Some(&'\n') {
                    pos += 1;
                }
                pos += 1;
                if trailing {
                    break;
                }
                collecting = true;
                if let Some(p) = pending.as_mut() {
                    p.has_trailing_new_line = true;
                }
            }
            '\t' | '\u{000B}' | '\u{000C}' | ' ' => pos += 1,
            '/' if matches!(text.get(pos + 1), Some('/' | '*')) => {
                let single_line = text[pos + 1] == '/';
                let start = pos;
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
                        if text[pos] == '*' && text.get(pos + 1) == Some(&'/') {
                            pos += 2;
                            break;
                        }
                        pos += 1;
                    }
                }
                if collecting {
                    ranges.extend(pending.take());
                    pending = Some(CommentRange {
                        pos: start as TextPos,
                        end: pos as TextPos,
                        kind: if single_line {
                            SyntaxKind::SingleLineCommentTrivia
                        } else {
                            SyntaxKind::MultiLineCommentTrivia
                        },
                        has_trailing_new_line,
                    });
                }
            }
            ch if !ch.is_ascii() && is_white_space_like(ch) => {
                if is_line_break(ch) {
                    if let Some(p) = pending.as_mut() {
                        p.has_trailing_new_line = true;
                    }
                }
                pos += 1;
            }
            _ => break,
        }
    }

    ranges.extend(pending);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_leading_at_file_start() {
        let text = chars("// a\n/* b */ x");
        let ranges = leading_comment_ranges(&text, 0);
        assert_eq!(
            ranges,
            vec![
                CommentRange {
                    pos: 0,
                    end: 4,
                    kind: SyntaxKind::SingleLineCommentTrivia,
                    has_trailing_new_line: true,
                },
                CommentRange {
                    pos: 5,
                    end: 12,
                    kind: SyntaxKind::MultiLineCommentTrivia,
                    has_trailing_new_line: false,
                },
            ]
        );
    }

    #[test]
    fn test_leading_skips_same_line_comment() {
        // the first comment trails `a;`, only the second leads `b`
        let text = chars("a; // one\n// two\nb");
        let ranges = leading_comment_ranges(&text, 2);
        assert_eq!(ranges.len(), 1);
        assert_eq!((ranges[0].pos, ranges[0].end), (10, 16));
    }

    #[test]
    fn test_trailing_stops_at_newline() {
        let text = chars("a; /* x */ // y\n// z\nb");
        let ranges = trailing_comment_ranges(&text, 2);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].kind, SyntaxKind::MultiLineCommentTrivia);
        assert_eq!(ranges[1].kind, SyntaxKind::SingleLineCommentTrivia);
        assert!(ranges[1].has_trailing_new_line);
    }

    #[test]
    fn test_shebang_is_skipped() {
        let text = chars("#!/bin/node\n// c\nx");
        let ranges = leading_comment_ranges(&text, 0);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].pos, 12);
    }

    #[test]
    fn test_no_comments() {
        assert!(leading_comment_ranges(&chars("let x"), 3).is_empty());
        assert!(trailing_comment_ranges(&chars(""), 0).is_empty());
    }
}
