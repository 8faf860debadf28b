//! Documentation comments: `/** ... */` text and its `@` tags.
//!
//! The comment body is scanned in documentation mode, where whitespace and
//! line breaks are tokens and words may contain `-`. Type expressions in
//! braces switch back to the regular scanner and the type grammar.

use tern_ast::{Node, NodeFlags, NodeId, SyntaxKind};
use tern_core::text::TextRange;
use tern_diagnostics::messages;

use crate::parser::{slots, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentState {
    BeginningOfLine,
    SawAsterisk,
    SavingComments,
}

impl Parser {
    /// Parse the comment spanning `start..start + length`. Returns `None`
    /// unless the range is exactly one `/** ... */` comment.
    pub(crate) fn parse_jsdoc_comment_worker(&mut self, start: u32, length: u32) -> Option<NodeId> {
        let end = start + length;
        let at = |p: &Self, pos: u32| p.scanner.char_at(pos as usize);
        let is_doc_comment = length >= 5
            && at(self, start) == Some('/')
            && at(self, start + 1) == Some('*')
            && at(self, start + 2) == Some('*')
            && at(self, end - 2) == Some('*')
            && at(self, end - 1) == Some('/');
        if !is_doc_comment {
            return None;
        }

        self.scanner.set_text(&self.source_text, (start + 3) as usize, Some((length - 5) as usize));
        self.next_jsdoc_token();
        let node = self.do_in_context(NodeFlags::JSDOC, true, |p| {
            let comment_pos = p.node_pos();
            let text = p.parse_jsdoc_text(CommentState::SawAsterisk);
            let comment = p.create_list_in(
                TextRange::new(comment_pos, p.node_end()),
                text.into_iter().collect(),
                false,
            );
            let tags_pos = p.node_pos();
            let mut tags = Vec::new();
            while p.token() == SyntaxKind::AtToken {
                tags.push(p.parse_jsdoc_tag());
            }
            let tags = p.create_list(tags_pos, tags, false);
            p.finish(Node::new(SyntaxKind::JSDoc, TextRange::new(start, end)).with_slots(slots![comment, tags]))
        });
        Some(node)
    }

    fn next_jsdoc_token(&mut self) -> SyntaxKind {
        let token = self.scanner.scan_jsdoc_token();
        self.drain_scan_errors();
        token
    }

    fn skip_jsdoc_whitespace(&mut self) {
        while self.token() == SyntaxKind::WhitespaceTrivia {
            self.next_jsdoc_token();
        }
    }

    /// Free text up to the next tag at the start of a line. Line margins
    /// (leading whitespace and `*`) are dropped.
    fn parse_jsdoc_text(&mut self, mut state: CommentState) -> Option<NodeId> {
        let mut text = String::new();
        let mut range: Option<TextRange> = None;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::AtToken if state != CommentState::SavingComments => break,
                SyntaxKind::NewLineTrivia => {
                    text.push('\n');
                    state = CommentState::BeginningOfLine;
                }
                SyntaxKind::AsteriskToken if state == CommentState::BeginningOfLine => {
                    state = CommentState::SawAsterisk;
                }
                SyntaxKind::WhitespaceTrivia => {
                    if state == CommentState::SavingComments {
                        text.push_str(&self.scanner.token_text());
                    }
                }
                _ => {
                    state = CommentState::SavingComments;
                    text.push_str(&self.scanner.token_text());
                    let (pos, end) = (self.token_pos(), self.token_end());
                    range = Some(range.map_or(TextRange::new(pos, end), |r| TextRange::new(r.pos, end)));
                }
            }
            self.next_jsdoc_token();
        }

        let range = range?;
        let text = self.arena.intern(text.trim());
        Some(self.finish(Node::new(SyntaxKind::JSDocText, range).with_text(text)))
    }

    fn parse_jsdoc_tag(&mut self) -> NodeId {
        let pos = self.token_pos();
        self.next_jsdoc_token();
        let tag_name = self.parse_jsdoc_identifier_name();
        let name = self.arena.text_of(tag_name).unwrap_or_default().to_string();
        match name.as_str() {
            "param" | "arg" | "argument" => self.parse_jsdoc_parameter_tag(pos, tag_name),
            "return" | "returns" => {
                let ty = self.try_parse_jsdoc_type_expression();
                let comment = self.parse_jsdoc_text(CommentState::SavingComments);
                self.finish_node(SyntaxKind::JSDocReturnTag, pos, slots![tag_name, ty, comment])
            }
            "type" => {
                self.skip_jsdoc_whitespace();
                let ty = self.parse_jsdoc_type_expression();
                let comment = self.parse_jsdoc_text(CommentState::SavingComments);
                self.finish_node(SyntaxKind::JSDocTypeTag, pos, slots![tag_name, ty, comment])
            }
            "template" => self.parse_jsdoc_template_tag(pos, tag_name),
            "see" => {
                self.skip_jsdoc_whitespace();
                let name = self
                    .token()
                    .is_identifier_or_keyword()
                    .then(|| self.parse_jsdoc_entity_name());
                let comment = self.parse_jsdoc_text(CommentState::SavingComments);
                self.finish_node(SyntaxKind::JSDocSeeTag, pos, slots![tag_name, name, comment])
            }
            "deprecated" => {
                let comment = self.parse_jsdoc_text(CommentState::SavingComments);
                self.finish_node(SyntaxKind::JSDocDeprecatedTag, pos, slots![tag_name, comment])
            }
            _ => {
                let comment = self.parse_jsdoc_text(CommentState::SavingComments);
                self.finish_node(SyntaxKind::JSDocTag, pos, slots![tag_name, comment])
            }
        }
    }

    /// `@param {T} name text`, `@param name {T} text` or `@param {T} [name=default]`.
    fn parse_jsdoc_parameter_tag(&mut self, pos: u32, tag_name: NodeId) -> NodeId {
        let mut ty = self.try_parse_jsdoc_type_expression();
        self.skip_jsdoc_whitespace();
        let name = self.parse_jsdoc_bracketed_name();
        if ty.is_none() {
            ty = self.try_parse_jsdoc_type_expression();
        }
        let comment = self.parse_jsdoc_text(CommentState::SavingComments);
        self.finish_node(SyntaxKind::JSDocParameterTag, pos, slots![tag_name, ty, name, comment])
    }

    fn parse_jsdoc_bracketed_name(&mut self) -> NodeId {
        if self.token() != SyntaxKind::OpenBracketToken {
            return self.parse_jsdoc_entity_name();
        }
        self.next_jsdoc_token();
        self.skip_jsdoc_whitespace();
        let name = self.parse_jsdoc_entity_name();
        self.skip_jsdoc_whitespace();
        // The default value is documentation only.
        if self.token() == SyntaxKind::EqualsToken {
            while !matches!(
                self.token(),
                SyntaxKind::CloseBracketToken | SyntaxKind::NewLineTrivia | SyntaxKind::EndOfFileToken
            ) {
                self.next_jsdoc_token();
            }
        }
        if self.token() == SyntaxKind::CloseBracketToken {
            self.next_jsdoc_token();
        } else {
            self.report_expected_token(SyntaxKind::CloseBracketToken);
        }
        name
    }

    /// `@template {Constraint} T, U text`
    fn parse_jsdoc_template_tag(&mut self, pos: u32, tag_name: NodeId) -> NodeId {
        let constraint = self.try_parse_jsdoc_type_expression();
        self.skip_jsdoc_whitespace();
        let list_pos = self.node_pos();
        let mut parameters = Vec::new();
        loop {
            let parameter_pos = self.node_pos();
            let name = self.parse_jsdoc_identifier_name();
            parameters.push(self.finish_node(
                SyntaxKind::TypeParameter,
                parameter_pos,
                slots![None::<tern_ast::ListId>, name, None::<NodeId>, None::<NodeId>],
            ));
            self.skip_jsdoc_whitespace();
            if self.token() != SyntaxKind::CommaToken {
                break;
            }
            self.next_jsdoc_token();
            self.skip_jsdoc_whitespace();
        }
        let parameters = self.create_list(list_pos, parameters, false);
        let comment = self.parse_jsdoc_text(CommentState::SavingComments);
        self.finish_node(SyntaxKind::JSDocTemplateTag, pos, slots![tag_name, constraint, parameters, comment])
    }

    fn parse_jsdoc_identifier_name(&mut self) -> NodeId {
        if !self.token().is_identifier_or_keyword() {
            let at_end = self.token() == SyntaxKind::EndOfFileToken;
            return self.create_missing_node(SyntaxKind::Identifier, at_end, &messages::IDENTIFIER_EXPECTED, &[]);
        }
        let pos = self.node_pos();
        let text = self.arena.intern(self.token_value());
        self.next_jsdoc_token();
        let end = self.node_end();
        self.finish(Node::new(SyntaxKind::Identifier, TextRange::new(pos, end)).with_text(text))
    }

    fn parse_jsdoc_entity_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut entity = self.parse_jsdoc_identifier_name();
        while self.token() == SyntaxKind::DotToken {
            self.next_jsdoc_token();
            let right = self.parse_jsdoc_identifier_name();
            entity = self.finish_node(SyntaxKind::QualifiedName, pos, slots![entity, right]);
        }
        entity
    }

    // ========================================================================
    // Type expressions
    // ========================================================================

    fn try_parse_jsdoc_type_expression(&mut self) -> Option<NodeId> {
        self.skip_jsdoc_whitespace();
        (self.token() == SyntaxKind::OpenBraceToken).then(|| self.parse_jsdoc_type_expression())
    }

    /// `{type}`. The braces are scanned in documentation mode, the type in
    /// between with the regular scanner.
    fn parse_jsdoc_type_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let ty = self.parse_jsdoc_type();
        if self.token() == SyntaxKind::CloseBraceToken {
            self.next_jsdoc_token();
        } else {
            self.report_expected_token(SyntaxKind::CloseBraceToken);
        }
        self.finish_node(SyntaxKind::JSDocTypeExpression, pos, slots![ty])
    }

    /// A type with the documentation forms `...T` and `T=` on top of the
    /// ones the type grammar already knows (`*`, `?T`, `!T`, `T?`, `T!`).
    fn parse_jsdoc_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let ty = self.parse_type();
            return self.finish_node(SyntaxKind::JSDocVariadicType, pos, slots![ty]);
        }
        let ty = self.parse_type();
        if self.token() == SyntaxKind::EqualsToken {
            self.next_token();
            return self.finish_node(SyntaxKind::JSDocOptionalType, pos, slots![ty]);
        }
        ty
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tern_ast::{NodeId, SyntaxKind};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse(text: &str) -> (Parser, NodeId) {
        let mut parser = Parser::new("test.ts", text, ParseOptions::default());
        let length = text.chars().count() as u32;
        let node = parser.parse_jsdoc_comment_worker(0, length).unwrap();
        (parser, node)
    }

    fn tags(parser: &Parser, jsdoc: NodeId) -> Vec<NodeId> {
        parser.arena.elements(parser.arena.node(jsdoc).child_list(1)).to_vec()
    }

    fn comment(parser: &Parser, jsdoc: NodeId) -> Option<String> {
        let text = parser.arena.elements(parser.arena.node(jsdoc).child_list(0)).first().copied()?;
        parser.arena.text_of(text).map(str::to_string)
    }

    #[test]
    fn test_plain_comment_text_drops_margins() {
        let (parser, jsdoc) = parse("/**\n * First line.\n *   Second line.\n */");
        assert_eq!(comment(&parser, jsdoc).as_deref(), Some("First line.\nSecond line."));
        assert!(tags(&parser, jsdoc).is_empty());
    }

    #[test]
    fn test_tags_after_text() {
        let text = "/**\n * Adds.\n * @param {number} a the left side\n * @param b\n * @returns {number} sum\n */";
        let (parser, jsdoc) = parse(text);
        assert!(parser.diagnostics.is_empty(), "{:?}", parser.diagnostics);
        assert_eq!(comment(&parser, jsdoc).as_deref(), Some("Adds."));
        let kinds: Vec<_> = tags(&parser, jsdoc).iter().map(|&t| parser.arena.kind(t)).collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::JSDocParameterTag, SyntaxKind::JSDocParameterTag, SyntaxKind::JSDocReturnTag]
        );
        let first = tags(&parser, jsdoc)[0];
        let name = parser.arena.node(first).child_node(2).unwrap();
        assert_eq!(parser.arena.text_of(name), Some("a"));
        let description = parser.arena.node(first).child_node(3).unwrap();
        assert_eq!(parser.arena.text_of(description), Some("the left side"));
        let second = tags(&parser, jsdoc)[1];
        assert!(parser.arena.node(second).child_node(1).is_none());
    }

    #[test]
    fn test_bracketed_parameter_name() {
        let (parser, jsdoc) = parse("/** @param {string=} [label=\"x\"] optional label */");
        assert!(parser.diagnostics.is_empty(), "{:?}", parser.diagnostics);
        let tag = tags(&parser, jsdoc)[0];
        let name = parser.arena.node(tag).child_node(2).unwrap();
        assert_eq!(parser.arena.text_of(name), Some("label"));
        let expression = parser.arena.node(tag).child_node(1).unwrap();
        let ty = parser.arena.node(expression).child_node(0).unwrap();
        assert_eq!(parser.arena.kind(ty), SyntaxKind::JSDocOptionalType);
    }

    #[test]
    fn test_type_expression_forms() {
        for (text, expected) in [
            ("/** @type {*} */", SyntaxKind::JSDocAllType),
            ("/** @type {?} */", SyntaxKind::JSDocUnknownType),
            ("/** @type {?string} */", SyntaxKind::JSDocNullableType),
            ("/** @type {!Foo} */", SyntaxKind::JSDocNonNullableType),
            ("/** @type {...number} */", SyntaxKind::JSDocVariadicType),
        ] {
            let (parser, jsdoc) = parse(text);
            assert!(parser.diagnostics.is_empty(), "{text}: {:?}", parser.diagnostics);
            let tag = tags(&parser, jsdoc)[0];
            assert_eq!(parser.arena.kind(tag), SyntaxKind::JSDocTypeTag);
            let expression = parser.arena.node(tag).child_node(1).unwrap();
            let ty = parser.arena.node(expression).child_node(0).unwrap();
            assert_eq!(parser.arena.kind(ty), expected, "{text}");
        }
    }

    #[test]
    fn test_template_and_generic_tags() {
        let (parser, jsdoc) = parse("/**\n * @template {object} T, U\n * @deprecated use other\n * @typedef Foo\n */");
        let tags = tags(&parser, jsdoc);
        assert_eq!(parser.arena.kind(tags[0]), SyntaxKind::JSDocTemplateTag);
        let parameters = parser.arena.node(tags[0]).child_list(2);
        assert_eq!(parser.arena.elements(parameters).len(), 2);
        assert_eq!(parser.arena.kind(tags[1]), SyntaxKind::JSDocDeprecatedTag);
        assert_eq!(parser.arena.kind(tags[2]), SyntaxKind::JSDocTag);
        let name = parser.arena.node(tags[2]).child_node(0).unwrap();
        assert_eq!(parser.arena.text_of(name), Some("typedef"));
    }

    #[test]
    fn test_at_sign_inside_text_is_not_a_tag() {
        let (parser, jsdoc) = parse("/** mail me at a@b.c */");
        assert_eq!(comment(&parser, jsdoc).as_deref(), Some("mail me at a@b.c"));
        assert!(tags(&parser, jsdoc).is_empty());
    }

    #[test]
    fn test_non_doc_comment_is_rejected() {
        let mut parser = Parser::new("test.ts", "/* plain */", ParseOptions::default());
        assert!(parser.parse_jsdoc_comment_worker(0, 11).is_none());
    }
}
