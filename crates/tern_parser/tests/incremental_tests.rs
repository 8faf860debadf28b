//! Incremental update integration tests.
//!
//! Every update must equal a fresh parse of the new text; the interesting
//! part is how much of the old tree it managed to keep.

use std::borrow::Cow;

use pretty_assertions::assert_eq;
use tern_ast::SyntaxKind;
use tern_parser::{parse_source_file, update_source_file, ParseOptions, SourceFile, TextChangeRange, TextSpan};

fn parse(file_name: &str, source: &str) -> SourceFile {
    parse_source_file(file_name, source, ParseOptions::default())
}

/// Helper: replace `delete` chars at `start` with `insert`.
fn apply_edit(text: &str, start: usize, delete: usize, insert: &str) -> (String, TextChangeRange) {
    let chars: Vec<char> = text.chars().collect();
    let mut new_text: String = chars[..start].iter().collect();
    new_text.push_str(insert);
    new_text.extend(&chars[start + delete..]);
    let span = TextSpan::new(start as u32, delete as u32);
    (new_text, TextChangeRange::new(span, insert.chars().count() as u32))
}

/// Helper: update incrementally, check against a full parse, and return
/// the updated file.
fn update_and_compare(file: &SourceFile, start: usize, delete: usize, insert: &str) -> SourceFile {
    let (new_text, change) = apply_edit(&file.text, start, delete, insert);
    let updated = update_source_file(file, &new_text, change, ParseOptions::default()).into_owned();
    let fresh = parse(&file.file_name, &new_text);
    assert_eq!(updated.flatten(), fresh.flatten(), "edit {start}+{delete} -> {insert:?} on {:?}", file.text);
    assert_eq!(updated.diagnostics, fresh.diagnostics);
    assert_eq!(updated.node_count, fresh.node_count);
    assert_eq!(updated.identifier_count, fresh.identifier_count);
    assert_eq!(updated.is_external_module(), fresh.is_external_module());
    updated
}

const SOURCE: &str = r#"import { a } from "a";

export class Point {
    constructor(public x: number, public y: number) {}

    length(): number {
        return Math.sqrt(this.x * this.x + this.y * this.y);
    }

    scale(k: number): Point {
        return new Point(this.x * k, this.y * k);
    }
}

function origin(): Point {
    return new Point(0, 0);
}

enum Direction { Up, Down, Left, Right }

interface Named {
    name: string;
    rename(to: string): void;
}
"#;

// ============================================================================
// Fast Paths
// ============================================================================

#[test]
fn test_no_op_change_returns_the_same_tree() {
    let file = parse("test.ts", SOURCE);
    let updated = update_source_file(&file, SOURCE, TextChangeRange::unchanged(), ParseOptions::default());
    match updated {
        Cow::Borrowed(same) => assert!(std::ptr::eq(same, &file)),
        Cow::Owned(_) => panic!("unchanged text rebuilt the tree"),
    }
}

#[test]
fn test_empty_old_tree_parses_fully() {
    let file = parse("test.ts", "   ");
    let updated = update_and_compare(&file, 3, 0, "let a = 1;");
    assert_eq!(updated.reused_node_count, 0);
}

// ============================================================================
// Reuse
// ============================================================================

#[test]
fn test_edit_in_method_body_reuses_siblings() {
    let file = parse("test.ts", SOURCE);
    let start = SOURCE.find("this.x * k").unwrap();
    let updated = update_and_compare(&file, start, "this.x".len(), "this.x + 1");
    assert!(updated.reused_node_count > 0);
    assert_eq!(updated.statements().len(), file.statements().len());
}

#[test]
fn test_insert_statement_at_start_reuses_the_rest() {
    let file = parse("test.ts", SOURCE);
    let updated = update_and_compare(&file, 0, 0, "let first = 1;\n");
    assert!(updated.reused_node_count > 0);
    assert_eq!(updated.statements().len(), file.statements().len() + 1);
}

#[test]
fn test_delete_whole_declaration() {
    let file = parse("test.ts", SOURCE);
    let start = SOURCE.find("function origin").unwrap();
    let end = SOURCE.find("enum Direction").unwrap();
    let updated = update_and_compare(&file, start, end - start, "");
    let kinds: Vec<SyntaxKind> = updated.statements().iter().map(|&s| updated.arena.kind(s)).collect();
    assert!(!kinds.contains(&SyntaxKind::FunctionDeclaration));
}

#[test]
fn test_edit_at_end_of_file() {
    let file = parse("test.ts", SOURCE);
    update_and_compare(&file, SOURCE.len(), 0, "type Alias = Named;\n");
}

// ============================================================================
// Edits That Change Scanning
// ============================================================================

#[test]
fn test_opening_a_comment_swallows_following_code() {
    let source = "let a = 1;\nlet b = 2;\nlet c = 3;\n";
    let file = parse("test.ts", source);
    let start = source.find("let b").unwrap();
    let updated = update_and_compare(&file, start, 0, "/* ");
    assert_eq!(updated.statements().len(), 1);
}

#[test]
fn test_division_turned_into_line_comment() {
    let source = "x = a / b;\ny = 2;\n";
    let file = parse("test.ts", source);
    update_and_compare(&file, source.find('/').unwrap(), 0, "/");
}

#[test]
fn test_unterminated_string_after_edit() {
    let source = "let s = \"abc\";\nlet t = 1;\n";
    let file = parse("test.ts", source);
    update_and_compare(&file, source.find('"').unwrap() + 4, 1, "");
}

#[test]
fn test_introducing_a_syntax_error_and_fixing_it() {
    let source = "function f() {\n    return 1;\n}\nfunction g() {\n    return 2;\n}\n";
    let file = parse("test.ts", source);
    let start = source.find("return 1").unwrap();
    let broken = update_and_compare(&file, start, 0, "(");
    assert!(!broken.diagnostics.is_empty());
    let fixed = update_and_compare(&broken, start, 1, "");
    assert!(fixed.diagnostics.is_empty());
}

// ============================================================================
// Chained Updates
// ============================================================================

#[test]
fn test_typing_character_by_character() {
    let mut file = parse("test.ts", SOURCE);
    let mut at = SOURCE.find("rename(to: string)").unwrap();
    for c in "update(value: number): void;\n    ".chars() {
        file = update_and_compare(&file, at, 0, &c.to_string());
        at += 1;
    }
}

#[test]
fn test_old_tree_survives_being_updated_twice() {
    let file = parse("test.ts", SOURCE);
    let before = file.flatten();
    let first = update_and_compare(&file, 0, 0, "// one\n");
    let second = update_and_compare(&file, 0, 0, "// two\n");
    assert_eq!(file.flatten(), before);
    assert_eq!(first.text.len(), second.text.len());
}

#[test]
fn test_jsx_edit() {
    let source = "const a = <div className=\"x\">{items.map(i => <li>{i}</li>)}</div>;\nconst b = 1;\n";
    let file = parse("view.tsx", source);
    let start = source.find("<li>").unwrap() + 1;
    update_and_compare(&file, start, 2, "span");
}

#[test]
fn test_multibyte_text_before_edit() {
    let source = "let ü = \"日本語\";\nlet v = 1;\n";
    let file = parse("test.ts", source);
    let start = source.chars().position(|c| c == 'v').unwrap();
    update_and_compare(&file, start, 1, "value");
}

// ============================================================================
// Deep Trees
// ============================================================================

#[test]
fn test_edit_at_the_tail_of_a_long_binary_chain() {
    let source = format!("let y = 1;\nx = {}a;\n", "a+".repeat(99_999));
    let file = parse("test.ts", &source);
    let tail = source.chars().count() - 3;
    let updated = update_and_compare(&file, tail, 1, "b");
    assert!(updated.reused_node_count > 0);
    assert!(updated.reused_node_count < updated.node_count);
}

#[test]
fn test_edit_at_the_tail_of_a_long_member_chain() {
    let source = format!("x = a{};\n", ".b".repeat(100_000));
    let file = parse("test.ts", &source);
    let tail = source.chars().count() - 3;
    update_and_compare(&file, tail, 1, "c");
}
