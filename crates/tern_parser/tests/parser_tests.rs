//! Parser integration tests.
//!
//! Whole files through the public entry points: tree shapes, diagnostics
//! and the summary data on the resulting source file.

use pretty_assertions::assert_eq;
use tern_ast::generated::{
    ArrowFunction, BinaryExpression, ExpressionStatement, NewExpression, Parameter, ParenthesizedExpression,
    PropertyAccessExpression,
};
use tern_ast::{NodeId, SyntaxKind};
use tern_parser::{leading_comment_ranges, parse_source_file, trailing_comment_ranges, ParseOptions, SourceFile};

/// Helper: parse `source` as a TypeScript file.
fn parse(source: &str) -> SourceFile {
    parse_source_file("test.ts", source, ParseOptions::default())
}

fn statement_kinds(file: &SourceFile) -> Vec<SyntaxKind> {
    file.statements().iter().map(|&s| file.arena.kind(s)).collect()
}

/// Helper: the expression of the first statement, which must be an
/// expression statement.
fn first_expression(file: &SourceFile) -> NodeId {
    let statement = ExpressionStatement::cast(&file.arena, file.statements()[0]).expect("expression statement");
    statement.expression().expect("expression")
}

fn text_of(file: &SourceFile, id: NodeId) -> String {
    file.slice(file.arena.node(id).range).trim().to_string()
}

// ============================================================================
// Whole Files
// ============================================================================

#[test]
fn test_empty_file() {
    let file = parse("");
    assert!(file.statements().is_empty());
    assert!(file.diagnostics.is_empty());
    let eof = file.end_of_file_token().unwrap();
    assert_eq!(file.arena.kind(eof), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_mixed_file_statement_kinds() {
    let source = r#"
import { readFile } from "fs";

interface Shape {
    area(): number;
}

class Circle implements Shape {
    constructor(private radius: number) {}
    area(): number {
        return Math.PI * this.radius ** 2;
    }
}

type Result<T> = { ok: true; value: T } | { ok: false; error: string };

enum Color { Red, Green = 2, Blue }

export function total(shapes: Shape[]): number {
    let sum = 0;
    for (const shape of shapes) {
        sum += shape.area();
    }
    return sum;
}
"#;
    let file = parse(source);
    assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
    assert_eq!(
        statement_kinds(&file),
        vec![
            SyntaxKind::ImportDeclaration,
            SyntaxKind::InterfaceDeclaration,
            SyntaxKind::ClassDeclaration,
            SyntaxKind::TypeAliasDeclaration,
            SyntaxKind::EnumDeclaration,
            SyntaxKind::FunctionDeclaration,
        ]
    );
    assert!(file.is_external_module());
    assert!(file.identifier_count > 10);
    assert!(file.node_count > file.identifier_count);
}

#[test]
fn test_root_spans_the_whole_text() {
    let source = "  let a = 1;  // trailing\n";
    let file = parse(source);
    let root = file.arena.node(file.root);
    assert_eq!((root.pos(), root.end()), (0, source.len() as u32));
}

#[test]
fn test_positions_count_chars() {
    let file = parse("let é = \"日本\"; x;");
    let second = file.statements()[1];
    assert_eq!(file.arena.node(second).end(), 16);
    assert_eq!(file.text_len(), 16);
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "class A<T> extends B<T> { m(x?: T) { return x ?? (y => y)(1); } }\nlet z = a < b > c;";
    let first = parse(source);
    let second = parse(source);
    assert_eq!(first.flatten(), second.flatten());
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_identifier_table_keeps_first_occurrence_order() {
    let file = parse("let b = a; let a = b; c;");
    let names: Vec<&str> = file.identifiers.iter().map(|&s| file.arena.resolve(s)).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert_eq!(file.identifier_count, 5);
}

// ============================================================================
// Precedence and Associativity
// ============================================================================

#[test]
fn test_subtraction_is_left_associative() {
    let file = parse("a - b - c;");
    let outer = BinaryExpression::cast(&file.arena, first_expression(&file)).unwrap();
    let left = outer.left().unwrap();
    assert_eq!(file.arena.kind(left), SyntaxKind::BinaryExpression);
    assert_eq!(text_of(&file, left), "a - b");
    assert_eq!(text_of(&file, outer.right().unwrap()), "c");
}

#[test]
fn test_exponentiation_is_right_associative() {
    let file = parse("a ** b ** c;");
    let outer = BinaryExpression::cast(&file.arena, first_expression(&file)).unwrap();
    assert_eq!(text_of(&file, outer.left().unwrap()), "a");
    let right = outer.right().unwrap();
    assert_eq!(file.arena.kind(right), SyntaxKind::BinaryExpression);
    assert_eq!(text_of(&file, right), "b ** c");
}

#[test]
fn test_logical_or_is_loosest() {
    let file = parse("a || b && c | d;");
    let outer = BinaryExpression::cast(&file.arena, first_expression(&file)).unwrap();
    let operator = outer.operator_token().unwrap();
    assert_eq!(file.arena.kind(operator), SyntaxKind::BarBarToken);
    assert_eq!(text_of(&file, outer.right().unwrap()), "b && c | d");
}

// ============================================================================
// New Expressions
// ============================================================================

#[test]
fn test_member_access_applies_to_the_whole_new_expression() {
    let file = parse("new Foo().bar;");
    let access = PropertyAccessExpression::cast(&file.arena, first_expression(&file)).unwrap();
    let target = access.expression().unwrap();
    let new = NewExpression::cast(&file.arena, target).expect("new expression");
    assert_eq!(text_of(&file, new.expression().unwrap()), "Foo");
    assert!(new.arguments().is_some_and(|args| args.is_empty()));
    assert_eq!(text_of(&file, access.name().unwrap()), "bar");
}

#[test]
fn test_new_without_arguments_takes_member_chain_as_target() {
    let file = parse("new a.b.C;");
    let new = NewExpression::cast(&file.arena, first_expression(&file)).unwrap();
    assert_eq!(text_of(&file, new.expression().unwrap()), "a.b.C");
    assert!(new.arguments().is_none());
}

// ============================================================================
// Arrow Functions
// ============================================================================

#[test]
fn test_parenthesized_single_parameter_arrow() {
    let file = parse("(x) => x;");
    let arrow = ArrowFunction::cast(&file.arena, first_expression(&file)).expect("arrow function");
    assert_eq!(arrow.parameters().map(|p| p.len()), Some(1));
}

#[test]
fn test_comma_expression_in_parentheses_is_not_an_arrow() {
    let file = parse("(x, y);");
    assert!(file.diagnostics.is_empty());
    let parenthesized = ParenthesizedExpression::cast(&file.arena, first_expression(&file)).unwrap();
    let inner = BinaryExpression::cast(&file.arena, parenthesized.expression().unwrap()).unwrap();
    assert_eq!(file.arena.kind(inner.operator_token().unwrap()), SyntaxKind::CommaToken);
}

#[test]
fn test_typed_parameter_arrow() {
    let file = parse("(x: number) => x;");
    let arrow = ArrowFunction::cast(&file.arena, first_expression(&file)).unwrap();
    let parameter = arrow.parameters().unwrap().iter().next().unwrap();
    let parameter = Parameter::cast(&file.arena, parameter).unwrap();
    let annotation = parameter.type_annotation().unwrap();
    assert_eq!(file.arena.kind(annotation), SyntaxKind::NumberKeyword);
    assert!(!parameter.is_rest());
}

#[test]
fn test_async_arrow_and_async_call() {
    let file = parse("async (a) => a;\nasync(a);");
    assert_eq!(file.arena.kind(first_expression(&file)), SyntaxKind::ArrowFunction);
    let second = ExpressionStatement::cast(&file.arena, file.statements()[1]).unwrap();
    assert_eq!(file.arena.kind(second.expression().unwrap()), SyntaxKind::CallExpression);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_unterminated_parenthesis() {
    let source = "1 + (2 * 3";
    let file = parse(source);
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::ExpressionStatement]);
    assert_eq!(file.diagnostics.len(), 1);
    let diagnostic = &file.diagnostics[0];
    assert_eq!(diagnostic.code, 1005);
    assert_eq!(diagnostic.message_text, "')' expected.");
    assert_eq!(diagnostic.start(), source.len() as u32);
    assert_eq!(file.arena.node(file.statements()[0]).end(), source.len() as u32);
    assert_eq!(file.arena.node(file.root).end(), source.len() as u32);
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let file = parse("var = 1;\nfoo(;\nlet x = ;");
    assert!(file.diagnostics.len() >= 2);
    let starts: Vec<u32> = file.diagnostics.iter().map(|d| d.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    assert!(file.diagnostics.iter().all(|d| d.file.as_deref() == Some("test.ts")));
}

#[test]
fn test_error_marks_the_enclosing_statement() {
    let file = parse("let ok = 1;\nlet bad = ;\n");
    let ok = file.arena.node(file.statements()[0]);
    let bad = file.arena.node(file.statements()[1]);
    assert!(!ok.subtree_has_error());
    assert!(bad.subtree_has_error());
}

// ============================================================================
// Script Kinds and Module Indicators
// ============================================================================

#[test]
fn test_declaration_file_is_ambient() {
    let file = parse_source_file("lib.d.ts", "declare const x: number;", ParseOptions::default());
    assert!(file.is_declaration_file);
    assert!(file.diagnostics.is_empty());
}

#[test]
fn test_script_without_imports_is_not_a_module() {
    assert!(!parse("let a = 1;").is_external_module());
    assert!(parse("export {};").is_external_module());
    assert!(parse("console.log(import.meta.url);").is_external_module());
}

#[test]
fn test_jsx_file_parses_elements() {
    let file = parse_source_file("app.jsx", "const el = <div>hi</div>;", ParseOptions::default());
    assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
}

// ============================================================================
// Parent Links and Comments
// ============================================================================

#[test]
fn test_parent_links_cover_every_node() {
    let options = ParseOptions::default().with_parent_nodes(true);
    let file = parse_source_file("test.ts", "function f(a) { return a + 1; }", options);
    for id in file.arena.descendants(file.root).skip(1) {
        let parent = file.arena.node(id).parent.expect("parent link");
        assert!(file.arena.children(parent).contains(&id));
    }
}

#[test]
fn test_comment_ranges_around_a_statement() {
    let source = "let a = 1;\n// about b\nlet b = 2; /* after b */\n";
    let file = parse(source);
    let second = file.arena.node(file.statements()[1]);

    let leading = leading_comment_ranges(file.chars(), second.pos() as usize);
    assert_eq!(leading.len(), 1);
    assert_eq!(leading[0].kind, SyntaxKind::SingleLineCommentTrivia);
    assert!(leading[0].has_trailing_new_line);

    let trailing = trailing_comment_ranges(file.chars(), second.end() as usize);
    assert_eq!(trailing.len(), 1);
    assert_eq!(trailing[0].kind, SyntaxKind::MultiLineCommentTrivia);
    assert_eq!(file.slice(tern_core::text::TextRange::new(trailing[0].pos, trailing[0].end)), "/* after b */");
}
