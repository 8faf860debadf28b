//! Error recovery integration tests.
//!
//! Malformed inputs still produce a complete tree, a bounded number of
//! diagnostics and well-nested ranges.

use tern_ast::generated::{ClassDeclaration, MethodDeclaration};
use tern_ast::{NodeId, SyntaxKind};
use tern_parser::{parse_source_file, ParseOptions, SourceFile};

fn parse(source: &str) -> SourceFile {
    parse_source_file("test.ts", source, ParseOptions::default())
}

/// Helper: every child lies inside its parent, and the root covers the text.
fn assert_well_formed(file: &SourceFile) {
    let root = file.arena.node(file.root);
    assert_eq!(root.pos(), 0, "{:?}", file.text);
    assert_eq!(root.end(), file.text_len(), "{:?}", file.text);
    let eof = file.end_of_file_token().expect("end of file token");
    assert_eq!(file.arena.node(eof).end(), file.text_len());
    for id in file.arena.descendants(file.root) {
        let parent = file.arena.node(id).range;
        assert!(parent.pos <= parent.end, "{:?} in {:?}", parent, file.text);
        for &child in file.arena.children(id) {
            let range = file.arena.node(child).range;
            assert!(
                parent.pos <= range.pos && range.end <= parent.end,
                "{:?} {:?} escapes {:?} {:?} in {:?}",
                file.arena.kind(child),
                range,
                file.arena.kind(id),
                parent,
                file.text
            );
        }
    }
}

fn member_names(file: &SourceFile, class: NodeId) -> Vec<String> {
    let class = ClassDeclaration::cast(&file.arena, class).expect("class declaration");
    class
        .members()
        .map(|members| {
            members
                .iter()
                .filter_map(|m| MethodDeclaration::cast(&file.arena, m).and_then(|m| m.name()))
                .filter_map(|name| file.arena.text_of(name).map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Complete Trees
// ============================================================================

#[test]
fn test_malformed_inputs_produce_complete_trees() {
    let inputs = [
        ")",
        "{",
        "(((",
        "class",
        "let",
        "var = ;",
        "function (",
        "if (",
        "for (;;",
        "switch (x) { case",
        "type T = ",
        "interface I {",
        "enum E {",
        "namespace",
        "declare",
        "async (",
        "new",
        "x => ",
        "import {",
        "export",
        "a ? b",
        "`${",
        "'abc",
        "/* unterminated",
        "1 + (2 * 3",
        "class C { m( }",
        "f(a, , b);",
        "let [a, = b;",
        "try { } x;",
        "#!/usr/bin/env node\nlet x",
    ];
    for input in inputs {
        let file = parse(input);
        assert_well_formed(&file);
    }
}

#[test]
fn test_valid_input_has_no_diagnostics_and_is_well_formed() {
    let file = parse("label: for (const [k, v] of Object.entries(o)) { if (!v) continue label; }");
    assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
    assert_well_formed(&file);
}

// ============================================================================
// Diagnostic Bounds
// ============================================================================

#[test]
fn test_unconsumable_tokens_report_at_most_once_each() {
    for count in [1usize, 5, 50, 500] {
        let source = ") ".repeat(count);
        let file = parse(&source);
        assert!(!file.diagnostics.is_empty());
        assert!(
            file.diagnostics.len() <= count + 1,
            "{} diagnostics for {count} tokens",
            file.diagnostics.len()
        );
        assert!(file.statements().is_empty());
        assert_well_formed(&file);
    }
}

#[test]
fn test_garbage_between_statements_is_skipped() {
    let file = parse("let a = 1;\n) ] }\nlet b = 2;");
    let kinds: Vec<SyntaxKind> = file.statements().iter().map(|&s| file.arena.kind(s)).collect();
    assert_eq!(kinds, vec![SyntaxKind::VariableStatement, SyntaxKind::VariableStatement]);
    assert!(!file.diagnostics.is_empty());
    assert!(file.diagnostics.len() <= 3);
}

#[test]
fn test_garbage_in_class_body_keeps_later_members() {
    let file = parse("class C {\n  ) \n  m() {}\n}");
    assert!(!file.diagnostics.is_empty());
    let class = file.statements()[0];
    assert_eq!(member_names(&file, class), vec!["m".to_string()]);
    assert_well_formed(&file);
}

#[test]
fn test_deep_nesting_reports_instead_of_overflowing() {
    let depth = 5_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    // Debug builds use far larger frames than release builds.
    let file = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || parse(&source))
        .unwrap()
        .join()
        .unwrap();
    assert!(file.diagnostics.iter().any(|d| d.code == 18099));
    assert_eq!(file.arena.node(file.root).end(), file.text_len());
}

// ============================================================================
// Missing Nodes
// ============================================================================

#[test]
fn test_missing_identifier_is_zero_width_and_flagged() {
    let file = parse("let x = ;");
    let missing: Vec<NodeId> = file
        .arena
        .descendants(file.root)
        .filter(|&id| file.arena.kind(id) == SyntaxKind::Identifier && file.arena.node(id).is_missing())
        .collect();
    assert_eq!(missing.len(), 1);
    let node = file.arena.node(missing[0]);
    assert!(node.range.is_empty());
    assert_eq!(file.arena.text_of(missing[0]), Some(""));
    assert!(file.arena.node(file.statements()[0]).subtree_has_error());
}
