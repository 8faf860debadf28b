//! Incremental reparsing after a single text edit.
//!
//! The old tree is copied, its positions are moved into the coordinates of
//! the new text, and a normal parse runs over the new text with a
//! [`SyntaxCursor`] into the copy. Wherever the list engine finds an old
//! element starting at the current position that the edit did not touch,
//! it splices that element in instead of parsing it again.
//!
//! The old tree is never modified, so any tree can be the base of another
//! update.

pub(crate) mod cursor;
mod reposition;

use std::borrow::Cow;

use tern_ast::{NodeArena, NodeId, SourceFile};
use tern_core::text::{ChangeRangeError, TextChangeRange, TextPos, TextRange, TextSpan};
use tern_scanner::Scanner;
use thiserror::Error;
use tracing::{debug, warn};

use crate::options::ParseOptions;
use crate::parser::Parser;
use cursor::SyntaxCursor;
use reposition::{reposition, Edit};

/// How many times the change start is moved back to an earlier node. One
/// step covers a token whose scan depends on the one before it.
const MAX_LOOKAHEAD: usize = 1;

/// An old arena is compacted instead of copied once it holds this many
/// nodes and most of them are garbage from earlier updates.
const COMPACTION_MIN_NODES: usize = 10_000;
const COMPACTION_GARBAGE_RATIO: usize = 4;

/// Reasons an incremental update gives up and parses from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncrementalError {
    #[error("change range does not match the texts: {0}")]
    ChangeRange(#[from] ChangeRangeError),
    #[error("old text does not match the tree ({tree} chars in tree, {text} in text)")]
    StaleTree { tree: TextPos, text: TextPos },
    #[error("repositioned range {range:?} escapes its parent {parent:?}")]
    InvalidRange { range: TextRange, parent: Option<TextRange> },
}

/// Update `source_file` for `new_text`, where `change` describes the edit
/// from the file's text. `options` must be the ones the file was parsed with.
///
/// An unchanged range returns the file itself. Anything the engine cannot
/// handle falls back to a full parse, so the result always equals a fresh
/// parse of `new_text`.
pub fn update_source_file<'a>(
    source_file: &'a SourceFile,
    new_text: &str,
    change: TextChangeRange,
    options: ParseOptions,
) -> Cow<'a, SourceFile> {
    if change.is_unchanged() {
        debug!(file = %source_file.file_name, "incremental update: text unchanged");
        return Cow::Borrowed(source_file);
    }
    if source_file.statements().is_empty() {
        debug!(file = %source_file.file_name, "incremental update: no statements, full reparse");
        return Cow::Owned(full_parse(source_file, new_text, options));
    }
    match try_update(source_file, new_text, change, options) {
        Ok(file) => Cow::Owned(file),
        Err(error) => {
            warn!(file = %source_file.file_name, %error, "incremental update failed, full reparse");
            Cow::Owned(full_parse(source_file, new_text, options))
        }
    }
}

fn full_parse(source_file: &SourceFile, new_text: &str, options: ParseOptions) -> SourceFile {
    let options = options.with_script_kind(source_file.script_kind);
    crate::parse_source_file(&source_file.file_name, new_text, options)
}

fn try_update(
    source_file: &SourceFile,
    new_text: &str,
    change: TextChangeRange,
    options: ParseOptions,
) -> Result<SourceFile, IncrementalError> {
    let old_len = source_file.text_len();
    let tree_len = source_file.arena.node(source_file.root).end();
    if tree_len != old_len {
        return Err(IncrementalError::StaleTree { tree: tree_len, text: old_len });
    }
    let new_len = new_text.chars().count() as TextPos;
    change.validate(old_len, new_len)?;

    let (mut arena, root) = copy_arena(source_file);
    let extended = extend_to_affected_range(&arena, root, change);
    debug!(
        file = %source_file.file_name,
        start = change.span.start,
        old_length = change.span.length,
        new_length = change.new_length,
        extended_start = extended.span.start,
        extended_old_length = extended.span.length,
        extended_new_length = extended.new_length,
        "incremental update"
    );
    debug_assert!(extended.span.start <= change.span.start);
    debug_assert!(extended.span.end() == change.span.end());
    extended.validate(old_len, new_len)?;

    let edit = Edit {
        start: extended.span.start,
        old_end: extended.span.end(),
        new_end: extended.new_span().end(),
        delta: extended.delta(),
    };
    arena.clear_parents();
    reposition(&mut arena, root, edit)?;

    let cursor = SyntaxCursor::new(&arena, root);
    let options = options.with_script_kind(source_file.script_kind);
    let mut parser = Parser::with_parts(Scanner::default(), arena, &source_file.file_name, new_text, options);
    parser.set_syntax_cursor(cursor);
    let mut file = parser.parse_source_file();
    if options.set_parent_nodes {
        file.set_parent_nodes();
    }
    debug!(
        file = %file.file_name,
        reused = file.reused_node_count,
        nodes = file.node_count,
        "incremental update finished"
    );
    Ok(file)
}

/// A private copy of the old arena, compacted when garbage dominates it.
fn copy_arena(source_file: &SourceFile) -> (NodeArena, NodeId) {
    let total = source_file.arena.node_capacity_used();
    let live = source_file.node_count;
    if total > COMPACTION_MIN_NODES && total > COMPACTION_GARBAGE_RATIO * live {
        debug!(file = %source_file.file_name, total, live, "compacting arena");
        return source_file.arena.compact(source_file.root);
    }
    (source_file.arena.clone(), source_file.root)
}

/// Move the change start back to before the node starting at or before it,
/// twice. An edit can change how the token in front of it scans (`/` typed
/// after `/`), so that token must be reparsed too.
fn extend_to_affected_range(arena: &NodeArena, root: NodeId, change: TextChangeRange) -> TextChangeRange {
    let mut start = change.span.start;
    let mut step = 0;
    while start > 0 && step <= MAX_LOOKAHEAD {
        let nearest = find_nearest_node_starting_before_or_at(arena, root, start);
        let position = arena.node(nearest).pos();
        debug_assert!(position <= start);
        start = position.saturating_sub(1);
        step += 1;
    }
    let span = TextSpan::from_bounds(start, change.span.end());
    let new_length = change.new_length + (change.span.start - start);
    TextChangeRange::new(span, new_length)
}

/// The last node, in document order, that starts at or before `position`.
/// Missing nodes are skipped.
fn find_nearest_node_starting_before_or_at(arena: &NodeArena, root: NodeId, position: TextPos) -> NodeId {
    let mut best = root;
    let mut last_node_entirely_before = None;
    let mut parent = root;
    // Only the child containing `position` is entered, so the search is a
    // single path down the tree.
    'descend: loop {
        for &child in arena.children(parent) {
            let node = arena.node(child);
            if node.is_missing() {
                continue;
            }
            if node.pos() > position {
                break 'descend;
            }
            if node.pos() >= arena.node(best).pos() {
                best = child;
            }
            if position < node.end() {
                parent = child;
                continue 'descend;
            }
            last_node_entirely_before = Some(child);
        }
        break;
    }
    if let Some(before) = last_node_entirely_before {
        let last = last_descendant(arena, before);
        if arena.node(last).pos() > arena.node(best).pos() {
            return last;
        }
    }
    best
}

fn last_descendant(arena: &NodeArena, mut id: NodeId) -> NodeId {
    while let Some(&last) = arena.children(id).last() {
        id = last;
    }
    id
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tern_core::text::{TextChangeRange, TextSpan};

    use super::*;

    fn parse(text: &str) -> SourceFile {
        crate::parse_source_file("test.ts", text, ParseOptions::default())
    }

    fn edit(text: &str, start: usize, delete: usize, insert: &str) -> (String, TextChangeRange) {
        let chars: Vec<char> = text.chars().collect();
        let mut new_text: String = chars[..start].iter().collect();
        new_text.push_str(insert);
        new_text.extend(chars[start + delete..].iter());
        let change = TextChangeRange::new(
            TextSpan::new(start as TextPos, delete as TextPos),
            insert.chars().count() as TextPos,
        );
        (new_text, change)
    }

    #[test]
    fn test_unchanged_range_returns_the_same_tree() {
        let file = parse("let a = 1;");
        let updated = update_source_file(&file, "let a = 1;", TextChangeRange::unchanged(), ParseOptions::default());
        assert!(matches!(updated, Cow::Borrowed(_)));
    }

    #[test]
    fn test_edit_inside_one_statement_reuses_the_others() {
        let text = "function a() { return 1; }\nfunction b() { return 2; }\nfunction c() { return 3; }\n";
        let file = parse(text);
        let (new_text, change) = edit(text, text.find("2").unwrap(), 1, "42");
        let updated = update_source_file(&file, &new_text, change, ParseOptions::default());
        let fresh = parse(&new_text);
        assert_eq!(updated.flatten(), fresh.flatten());
        assert!(updated.reused_node_count > 0);
        assert_eq!(updated.text, new_text);
    }

    #[test]
    fn test_old_tree_is_left_intact() {
        let text = "a;\nb;\nc;";
        let file = parse(text);
        let before = file.flatten();
        let (new_text, change) = edit(text, 3, 1, "bbb");
        let updated = update_source_file(&file, &new_text, change, ParseOptions::default());
        assert_eq!(file.flatten(), before);
        assert_eq!(updated.flatten(), parse(&new_text).flatten());
    }

    #[test]
    fn test_updated_tree_can_be_updated_again() {
        let text = "let x = 1;\nlet y = 2;\n";
        let file = parse(text);
        let (second, change) = edit(text, 8, 1, "10");
        let updated = update_source_file(&file, &second, change, ParseOptions::default()).into_owned();
        let (third, change) = edit(&second, 0, 0, "const z = 0;\n");
        let again = update_source_file(&updated, &third, change, ParseOptions::default());
        assert_eq!(again.flatten(), parse(&third).flatten());
    }

    #[test]
    fn test_bad_change_range_falls_back_to_full_parse() {
        let file = parse("a;");
        let change = TextChangeRange::new(TextSpan::new(5, 3), 1);
        let updated = update_source_file(&file, "b;", change, ParseOptions::default());
        assert_eq!(updated.flatten(), parse("b;").flatten());
        assert_eq!(updated.reused_node_count, 0);
    }

    #[test]
    fn test_empty_file_reparses_fully() {
        let file = parse("");
        let updated = update_source_file(&file, "x;", TextChangeRange::new(TextSpan::new(0, 0), 2), ParseOptions::default());
        assert_eq!(updated.statements().len(), 1);
    }

    #[test]
    fn test_change_start_moves_back_two_nodes() {
        let file = parse("a;\nb;\nc;");
        let change = TextChangeRange::new(TextSpan::new(7, 1), 1);
        let extended = extend_to_affected_range(&file.arena, file.root, change);
        assert!(extended.span.start < 6);
        assert_eq!(extended.span.end(), 8);
        assert_eq!(extended.new_length, 1 + (7 - extended.span.start));
    }

    #[test]
    fn test_edit_at_the_tail_of_a_long_chain() {
        let text = format!("x = {}a;", "a+".repeat(100_000));
        let file = parse(&text);
        let tail = text.chars().count() - 2;
        let (new_text, change) = edit(&text, tail, 1, "b");
        let updated = update_source_file(&file, &new_text, change, ParseOptions::default());
        assert_eq!(updated.node_count, file.node_count);
        assert_eq!(updated.flatten(), parse(&new_text).flatten());
    }

    #[test]
    fn test_comment_edit_rescans_the_token_before_it() {
        // Turning `/ 2` into `// 2` makes the rest of the line a comment.
        let text = "x = 1 / 2;\ny;";
        let file = parse(text);
        let (new_text, change) = edit(text, 6, 0, "/");
        let updated = update_source_file(&file, &new_text, change, ParseOptions::default());
        assert_eq!(updated.flatten(), parse(&new_text).flatten());
    }
}
