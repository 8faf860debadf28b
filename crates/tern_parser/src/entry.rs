//! Public entry points: whole files and isolated fragments.

use tern_ast::{NodeArena, NodeId, SourceFile, SyntaxKind};
use tern_diagnostics::{messages, Diagnostic};
use tern_scanner::Scanner;
use tracing::trace;

use crate::options::ParseOptions;
use crate::parser::Parser;

/// File name given to fragments, which have no file of their own.
const FRAGMENT_FILE_NAME: &str = "fragment.ts";

/// Parse `source_text` as the file `file_name`.
pub fn parse_source_file(file_name: &str, source_text: &str, options: ParseOptions) -> SourceFile {
    parse_source_file_with_scanner(Scanner::default(), file_name, source_text, options).0
}

/// Like [`parse_source_file`], reusing `scanner` and handing it back for the
/// next file.
pub fn parse_source_file_with_scanner(
    scanner: Scanner,
    file_name: &str,
    source_text: &str,
    options: ParseOptions,
) -> (SourceFile, Scanner) {
    let parser = Parser::with_parts(scanner, NodeArena::new(), file_name, source_text, options);
    let (mut file, scanner) = parser.parse_source_file_returning_scanner();
    if options.set_parent_nodes {
        file.set_parent_nodes();
    }
    (file, scanner)
}

/// A tree parsed outside of any source file.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub arena: NodeArena,
    pub node: NodeId,
    pub diagnostics: Vec<Diagnostic>,
}

impl Fragment {
    pub fn kind(&self) -> SyntaxKind {
        self.arena.kind(self.node)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// `A.B.C`, or `None` when `text` is anything else.
pub fn parse_isolated_entity_name(text: &str, options: ParseOptions) -> Option<Fragment> {
    let fragment = parse_fragment(text, options, |p| p.parse_entity_name(true, None));
    let clean = fragment.diagnostics.is_empty();
    trace!(clean, "isolated entity name");
    clean.then_some(fragment)
}

/// A single type. Text after the type is reported.
pub fn parse_type_fragment(text: &str, options: ParseOptions) -> Fragment {
    parse_fragment(text, options, Parser::parse_type)
}

/// A single expression, commas included.
pub fn parse_expression_fragment(text: &str, options: ParseOptions) -> Fragment {
    parse_fragment(text, options, Parser::parse_expression)
}

/// A single statement or declaration.
pub fn parse_statement_fragment(text: &str, options: ParseOptions) -> Fragment {
    parse_fragment(text, options, Parser::parse_statement)
}

/// The documentation comment spanning `start..start + length` of `text`,
/// or `None` when that range is not one `/** ... */` comment.
pub fn parse_jsdoc_comment(text: &str, start: u32, length: u32) -> Option<Fragment> {
    let text_len = text.chars().count() as u32;
    if start.checked_add(length).map_or(true, |end| end > text_len) {
        return None;
    }
    let mut parser = Parser::new(FRAGMENT_FILE_NAME, text, ParseOptions::default());
    let node = parser.parse_jsdoc_comment_worker(start, length)?;
    Some(Fragment {
        arena: parser.arena,
        node,
        diagnostics: parser.diagnostics,
    })
}

fn parse_fragment(text: &str, options: ParseOptions, parse: impl FnOnce(&mut Parser) -> NodeId) -> Fragment {
    let mut parser = Parser::new(FRAGMENT_FILE_NAME, text, options);
    parser.next_token();
    let node = parse(&mut parser);
    if parser.token() != SyntaxKind::EndOfFileToken {
        parser.parse_error_at_current_token(&messages::UNEXPECTED_TOKEN, &[]);
    }
    Fragment {
        arena: parser.arena,
        node,
        diagnostics: parser.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entity_name() {
        let fragment = parse_isolated_entity_name("a.b.c", ParseOptions::default()).unwrap();
        assert_eq!(fragment.kind(), SyntaxKind::QualifiedName);
        let right = fragment.arena.node(fragment.node).child_node(1).unwrap();
        assert_eq!(fragment.arena.text_of(right), Some("c"));
    }

    #[test]
    fn test_entity_name_rejects_trailing_text() {
        assert!(parse_isolated_entity_name("a.b c", ParseOptions::default()).is_none());
        assert!(parse_isolated_entity_name("a.", ParseOptions::default()).is_none());
        assert!(parse_isolated_entity_name("", ParseOptions::default()).is_none());
    }

    #[test]
    fn test_type_fragment() {
        let fragment = parse_type_fragment("A | B[]", ParseOptions::default());
        assert!(!fragment.has_errors());
        assert_eq!(fragment.kind(), SyntaxKind::UnionType);
    }

    #[test]
    fn test_expression_fragment_reports_trailing_tokens() {
        let fragment = parse_expression_fragment("a + b", ParseOptions::default());
        assert!(!fragment.has_errors());
        assert_eq!(fragment.kind(), SyntaxKind::BinaryExpression);

        let fragment = parse_expression_fragment("a b", ParseOptions::default());
        assert_eq!(fragment.diagnostics.len(), 1);
        assert_eq!(fragment.diagnostics[0].code, messages::UNEXPECTED_TOKEN.code);
        assert_eq!(fragment.diagnostics[0].start(), 2);
    }

    #[test]
    fn test_statement_fragment() {
        let fragment = parse_statement_fragment("if (x) { y(); }", ParseOptions::default());
        assert!(!fragment.has_errors());
        assert_eq!(fragment.kind(), SyntaxKind::IfStatement);
    }

    #[test]
    fn test_jsdoc_comment_inside_larger_text() {
        let text = "let x;\n/** @type {number} */\nlet y;";
        let start = 7;
        let length = "/** @type {number} */".len() as u32;
        let fragment = parse_jsdoc_comment(text, start, length).unwrap();
        assert_eq!(fragment.kind(), SyntaxKind::JSDoc);
        let node = fragment.arena.node(fragment.node);
        assert_eq!((node.pos(), node.end()), (start, start + length));
    }

    #[test]
    fn test_jsdoc_comment_rejects_other_ranges() {
        assert!(parse_jsdoc_comment("/* plain */", 0, 11).is_none());
        assert!(parse_jsdoc_comment("/** a */", 0, 40).is_none());
    }

    #[test]
    fn test_parent_nodes_follow_options() {
        let options = ParseOptions::default().with_parent_nodes(true);
        let file = parse_source_file("a.ts", "let x = 1;", options);
        let statement = file.statements()[0];
        assert_eq!(file.arena.node(statement).parent, Some(file.root));

        let file = parse_source_file("a.ts", "let x = 1;", ParseOptions::default());
        assert_eq!(file.arena.node(file.statements()[0]).parent, None);
    }
}
