//! JSX elements, fragments and their attributes.
//!
//! Child position is scanned in JSX mode (text, `<`, `</`, `{`); tag and
//! attribute names in JSX identifier mode, which admits `-`. Mismatched
//! closing tags are reattached to the nearest opening tag with the same
//! name, so `<div><span></div>` reports the unclosed `span` and keeps the
//! `div` intact.

use tern_ast::{ListId, Node, NodeId, SyntaxKind};
use tern_core::text::TextRange;
use tern_diagnostics::{messages, DiagnosticMessage};
use tern_scanner::char_codes::{is_line_break, is_white_space_like};

use crate::list::ParsingContext;
use crate::parser::{slots, Parser};

impl Parser {
    /// Parse an element, self-closing element or fragment at `<`.
    ///
    /// In expression context a second adjacent element is parsed too and
    /// joined to the first by a missing comma, with one diagnostic covering
    /// both. `opening_tag` is the enclosing element when parsing a child.
    pub(crate) fn parse_jsx_element_or_self_closing_element_or_fragment(
        &mut self,
        in_expression_context: bool,
        top_invalid_node_position: Option<u32>,
        opening_tag: Option<NodeId>,
    ) -> NodeId {
        self.guarded(SyntaxKind::Identifier, |p| {
            p.parse_jsx_element_worker(in_expression_context, top_invalid_node_position, opening_tag)
        })
    }

    fn parse_jsx_element_worker(
        &mut self,
        in_expression_context: bool,
        top_invalid_node_position: Option<u32>,
        opening_tag: Option<NodeId>,
    ) -> NodeId {
        let pos = self.node_pos();
        let opening = self.parse_jsx_opening_or_self_closing_element_or_opening_fragment(in_expression_context);
        let result = match self.arena.kind(opening) {
            SyntaxKind::JsxOpeningElement => self.parse_jsx_element_rest(pos, opening, opening_tag, in_expression_context),
            SyntaxKind::JsxOpeningFragment => {
                let children = self.parse_jsx_children(opening);
                let closing = self.parse_jsx_closing_fragment(in_expression_context);
                self.finish_node(SyntaxKind::JsxFragment, pos, slots![opening, children, closing])
            }
            _ => {
                debug_assert_eq!(self.arena.kind(opening), SyntaxKind::JsxSelfClosingElement);
                opening
            }
        };

        // `<a></a><b></b>` as an expression: parse the second element too
        // and report both as needing one parent.
        if in_expression_context && self.token() == SyntaxKind::LessThanToken {
            let top_bad_pos = top_invalid_node_position.unwrap_or_else(|| self.arena.node(result).pos());
            let invalid = self.parse_jsx_element_or_self_closing_element_or_fragment(true, Some(top_bad_pos), None);
            let invalid_pos = self.arena.node(invalid).pos();
            let invalid_end = self.arena.node(invalid).end();
            let operator = self.finish(Node::new(SyntaxKind::CommaToken, TextRange::empty(invalid_pos)));
            let start = self.skip_trivia(top_bad_pos);
            self.parse_error_at_position(
                start,
                invalid_end.saturating_sub(start),
                &messages::JSX_EXPRESSIONS_MUST_HAVE_ONE_PARENT_ELEMENT,
                &[],
            );
            return self.finish_node(SyntaxKind::BinaryExpression, pos, slots![result, operator, invalid]);
        }
        result
    }

    fn parse_jsx_element_rest(
        &mut self,
        pos: u32,
        opening: NodeId,
        opening_tag: Option<NodeId>,
        in_expression_context: bool,
    ) -> NodeId {
        let mut children = self.parse_jsx_children(opening);
        let opening_name = self.jsx_tag_name(opening);

        let last_child = self.arena.elements(Some(children)).last().copied();
        let stolen_closing = match last_child {
            Some(last) if self.is_mismatched_child(opening_name, last) => Some(last),
            _ => None,
        };

        let closing = match stolen_closing {
            Some(last) => {
                // The last child consumed our closing tag: give it an empty
                // closing tag of its own and take the real one back.
                let (restructured, closing) = self.reclaim_closing_element(last);
                let list = self.arena.list(children);
                let mut elements = list.iter().collect::<Vec<_>>();
                let range = TextRange::new(list.pos(), self.arena.node(restructured).end());
                elements.pop();
                elements.push(restructured);
                children = self.create_list_in(range, elements, false);
                closing
            }
            None => {
                let closing = self.parse_jsx_closing_element(opening, in_expression_context);
                let closing_name = self.jsx_tag_name(closing);
                if !self.tag_names_are_equivalent(opening_name, closing_name) {
                    let outer_name = opening_tag
                        .filter(|&tag| self.arena.kind(tag) == SyntaxKind::JsxOpeningElement)
                        .map(|tag| self.jsx_tag_name(tag));
                    let opening_text = self.tag_name_text(opening_name);
                    match outer_name {
                        Some(outer) if self.tag_names_are_equivalent(closing_name, outer) => {
                            let range = self.trimmed_range(opening_name);
                            self.parse_error_at_range(
                                range,
                                &messages::JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG,
                                &[&opening_text],
                            );
                        }
                        _ => {
                            let range = self.trimmed_range(closing_name);
                            self.parse_error_at_range(
                                range,
                                &messages::EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0,
                                &[&opening_text],
                            );
                        }
                    }
                }
                closing
            }
        };
        self.finish_node(SyntaxKind::JsxElement, pos, slots![opening, children, closing])
    }

    /// Rebuild `element` with an empty closing tag at the end of its
    /// children, returning the new element and the closing tag it had.
    fn reclaim_closing_element(&mut self, element: NodeId) -> (NodeId, NodeId) {
        let node = self.arena.node(element);
        let (opening, children, closing) = (node.child_node(0), node.child_list(1), node.child_node(2));
        let end = children.map_or(node.end(), |list| self.arena.list(list).end());
        let element_pos = opening.map_or(node.pos(), |id| self.arena.node(id).pos());

        let empty_name = Node::new(SyntaxKind::Identifier, TextRange::empty(end)).with_text(self.arena.intern(""));
        let empty_name = self.finish(empty_name);
        let empty_closing = self.finish(
            Node::new(SyntaxKind::JsxClosingElement, TextRange::empty(end)).with_slots(slots![empty_name]),
        );
        let restructured = self.finish(
            Node::new(SyntaxKind::JsxElement, TextRange::new(element_pos, end))
                .with_slots(slots![opening, children, empty_closing]),
        );
        (restructured, closing.unwrap_or(empty_closing))
    }

    // ========================================================================
    // Children
    // ========================================================================

    fn parse_jsx_children(&mut self, opening_tag: NodeId) -> ListId {
        let saved = self.parsing_contexts;
        self.parsing_contexts |= ParsingContext::JsxChildren.bit();
        let pos = self.node_pos();
        let opening_name = (self.arena.kind(opening_tag) == SyntaxKind::JsxOpeningElement)
            .then(|| self.jsx_tag_name(opening_tag))
            .flatten();
        let mut elements = Vec::new();
        loop {
            let token = self.re_scan_jsx_token();
            let Some(child) = self.parse_jsx_child(opening_tag, token) else {
                break;
            };
            elements.push(child);
            // `<div><span></div>`: stop so the `</div>` the span took can be
            // reattached to the div.
            if opening_name.is_some_and(|name| self.is_mismatched_child(Some(name), child)) {
                break;
            }
        }
        self.parsing_contexts = saved;
        self.create_list(pos, elements, false)
    }

    fn parse_jsx_child(&mut self, opening_tag: NodeId, token: SyntaxKind) -> Option<NodeId> {
        match token {
            SyntaxKind::EndOfFileToken => {
                if self.arena.kind(opening_tag) == SyntaxKind::JsxOpeningFragment {
                    let range = self.trimmed_range(Some(opening_tag));
                    self.parse_error_at_range(range, &messages::JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG, &[]);
                } else {
                    let name = self.jsx_tag_name(opening_tag);
                    let text = self.tag_name_text(name);
                    let range = self.trimmed_range(name);
                    self.parse_error_at_range(range, &messages::JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG, &[&text]);
                }
                None
            }
            SyntaxKind::LessThanSlashToken | SyntaxKind::ConflictMarkerTrivia => None,
            SyntaxKind::JsxText | SyntaxKind::JsxTextAllWhiteSpaces => Some(self.parse_jsx_text()),
            SyntaxKind::OpenBraceToken => Some(self.parse_jsx_expression(false)),
            SyntaxKind::LessThanToken => {
                Some(self.parse_jsx_element_or_self_closing_element_or_fragment(false, None, Some(opening_tag)))
            }
            _ => {
                debug_assert!(false, "unexpected JSX child token {token:?}");
                None
            }
        }
    }

    fn parse_jsx_text(&mut self) -> NodeId {
        let pos = self.node_pos();
        let text = self.arena.intern(self.token_value());
        self.scan_jsx_text();
        let end = self.node_end();
        self.finish(Node::new(SyntaxKind::JsxText, TextRange::new(pos, end)).with_text(text))
    }

    /// `{expr}` as a child or attribute value. Children may spread and may
    /// be empty; the closing `}` of a child resumes JSX text scanning.
    fn parse_jsx_expression(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut dot_dot_dot = None;
        let mut expression = None;
        if self.token() != SyntaxKind::CloseBraceToken {
            if !in_expression_context {
                dot_dot_dot = self.parse_optional_token(SyntaxKind::DotDotDotToken);
            }
            // Only an assignment expression is valid, but a comma sequence
            // parses unambiguously.
            expression = Some(self.parse_expression());
        }
        if in_expression_context {
            self.parse_expected(SyntaxKind::CloseBraceToken);
        } else if self.expect_without_advancing(SyntaxKind::CloseBraceToken, None) {
            self.scan_jsx_text();
        }
        self.finish_node(SyntaxKind::JsxExpression, pos, slots![dot_dot_dot, expression])
    }

    // ========================================================================
    // Tags
    // ========================================================================

    fn parse_jsx_opening_or_self_closing_element_or_opening_fragment(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        if self.token() == SyntaxKind::GreaterThanToken {
            self.scan_jsx_text();
            return self.finish_node(SyntaxKind::JsxOpeningFragment, pos, &[]);
        }

        let tag_name = self.parse_jsx_element_name();
        let type_arguments = if !self.context.is_javascript_file() && self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_bracketed_list(
                ParsingContext::TypeArguments,
                Self::parse_type,
                SyntaxKind::LessThanToken,
                SyntaxKind::GreaterThanToken,
            ))
        } else {
            None
        };
        let attributes = self.parse_jsx_attributes();

        if self.token() == SyntaxKind::GreaterThanToken {
            // Text after the tag is scanned in JSX mode so characters such
            // as `#` are text, not scan errors.
            self.scan_jsx_text();
            return self.finish_node(SyntaxKind::JsxOpeningElement, pos, slots![tag_name, type_arguments, attributes]);
        }

        self.parse_expected(SyntaxKind::SlashToken);
        if self.expect_without_advancing(SyntaxKind::GreaterThanToken, None) {
            if in_expression_context {
                self.next_token();
            } else {
                self.scan_jsx_text();
            }
        }
        self.finish_node(SyntaxKind::JsxSelfClosingElement, pos, slots![tag_name, type_arguments, attributes])
    }

    /// An identifier, `this` or a namespaced name, optionally followed by
    /// property accesses (`Foo.Bar`).
    fn parse_jsx_element_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        let initial = self.parse_jsx_tag_name();
        if self.arena.kind(initial) == SyntaxKind::JsxNamespacedName {
            return initial;
        }
        let mut expression = initial;
        while self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_right_side_of_dot(true, false);
            expression = self.finish_node(
                SyntaxKind::PropertyAccessExpression,
                pos,
                slots![expression, None::<NodeId>, name],
            );
        }
        expression
    }

    fn parse_jsx_tag_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.scan_jsx_identifier();
        if self.token() == SyntaxKind::ThisKeyword
            && !self.look_ahead(|p| p.next_token() == SyntaxKind::ColonToken)
        {
            return self.parse_token_node();
        }
        let tag_name = self.parse_identifier_name();
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.scan_jsx_identifier();
            let name = self.parse_identifier_name();
            return self.finish_node(SyntaxKind::JsxNamespacedName, pos, slots![tag_name, name]);
        }
        tag_name
    }

    fn parse_jsx_closing_element(&mut self, opening: NodeId, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        let tag_name = self.parse_jsx_element_name();
        if self.expect_without_advancing(SyntaxKind::GreaterThanToken, None) {
            let opening_name = self.jsx_tag_name(opening);
            if in_expression_context || !self.tag_names_are_equivalent(opening_name, Some(tag_name)) {
                self.next_token();
            } else {
                self.scan_jsx_text();
            }
        }
        self.finish_node(SyntaxKind::JsxClosingElement, pos, slots![tag_name])
    }

    fn parse_jsx_closing_fragment(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        if self.expect_without_advancing(
            SyntaxKind::GreaterThanToken,
            Some(&messages::EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT),
        ) {
            if in_expression_context {
                self.next_token();
            } else {
                self.scan_jsx_text();
            }
        }
        self.finish_node(SyntaxKind::JsxClosingFragment, pos, &[])
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    fn parse_jsx_attributes(&mut self) -> NodeId {
        let pos = self.node_pos();
        let properties = self.parse_list(ParsingContext::JsxAttributes, Self::parse_jsx_attribute);
        self.finish_node(SyntaxKind::JsxAttributes, pos, slots![properties])
    }

    fn parse_jsx_attribute(&mut self) -> NodeId {
        if self.token() == SyntaxKind::OpenBraceToken {
            return self.parse_jsx_spread_attribute();
        }
        let pos = self.node_pos();
        let name = self.parse_jsx_attribute_name();
        let initializer = self.parse_jsx_attribute_value();
        self.finish_node(SyntaxKind::JsxAttribute, pos, slots![name, initializer])
    }

    fn parse_jsx_attribute_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.scan_jsx_identifier();
        let name = self.parse_identifier_name();
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.scan_jsx_identifier();
            let local = self.parse_identifier_name();
            return self.finish_node(SyntaxKind::JsxNamespacedName, pos, slots![name, local]);
        }
        name
    }

    fn parse_jsx_attribute_value(&mut self) -> Option<NodeId> {
        if self.token() != SyntaxKind::EqualsToken {
            return None;
        }
        match self.scan_jsx_attribute_value() {
            SyntaxKind::StringLiteral => Some(self.parse_literal_node()),
            SyntaxKind::OpenBraceToken => {
                let value = self.parse_jsx_expression(true);
                if self.arena.node(value).child_node(1).is_none() {
                    let range = self.trimmed_range(Some(value));
                    self.parse_error_at_range(
                        range,
                        &messages::JSX_ATTRIBUTES_MUST_ONLY_BE_ASSIGNED_A_NON_EMPTY_EXPRESSION,
                        &[],
                    );
                }
                Some(value)
            }
            SyntaxKind::LessThanToken => Some(self.parse_jsx_element_or_self_closing_element_or_fragment(true, None, None)),
            _ => {
                self.parse_error_at_current_token(&messages::OR_JSX_ELEMENT_EXPECTED, &[]);
                None
            }
        }
    }

    fn parse_jsx_spread_attribute(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(SyntaxKind::JsxSpreadAttribute, pos, slots![expression])
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Report when the current token is not `kind`, but leave the scanner
    /// where it is: after a closing `>` or `}` the caller picks the scan mode.
    fn expect_without_advancing(&mut self, kind: SyntaxKind, message: Option<&'static DiagnosticMessage>) -> bool {
        if self.token() == kind {
            return true;
        }
        match message {
            Some(message) => self.parse_error_at_current_token(message, &[]),
            None => self.report_expected_token(kind),
        };
        false
    }

    fn jsx_tag_name(&self, tag: NodeId) -> Option<NodeId> {
        self.arena.node(tag).child_node(0)
    }

    /// A child element whose own tags differ but whose closing tag matches
    /// the enclosing element's name.
    fn is_mismatched_child(&self, opening_name: Option<NodeId>, child: NodeId) -> bool {
        let node = self.arena.node(child);
        if node.kind != SyntaxKind::JsxElement {
            return false;
        }
        let child_opening = node.child_node(0).and_then(|id| self.jsx_tag_name(id));
        let child_closing = node.child_node(2).and_then(|id| self.jsx_tag_name(id));
        !self.tag_names_are_equivalent(child_opening, child_closing)
            && self.tag_names_are_equivalent(opening_name, child_closing)
    }

    fn tag_names_are_equivalent(&self, left: Option<NodeId>, right: Option<NodeId>) -> bool {
        // `<a.b.c>` nests one property access per dot.
        let mut pending = vec![(left, right)];
        while let Some(pair) = pending.pop() {
            let (Some(left), Some(right)) = pair else {
                return false;
            };
            let (l, r) = (self.arena.node(left), self.arena.node(right));
            if l.kind != r.kind {
                return false;
            }
            match l.kind {
                SyntaxKind::Identifier => {
                    if self.arena.text_of(left) != self.arena.text_of(right) {
                        return false;
                    }
                }
                SyntaxKind::ThisKeyword => {}
                SyntaxKind::JsxNamespacedName => {
                    pending.push((l.child_node(1), r.child_node(1)));
                    pending.push((l.child_node(0), r.child_node(0)));
                }
                SyntaxKind::PropertyAccessExpression => {
                    pending.push((l.child_node(0), r.child_node(0)));
                    pending.push((l.child_node(2), r.child_node(2)));
                }
                _ => return false,
            }
        }
        true
    }

    fn tag_name_text(&self, name: Option<NodeId>) -> String {
        match name {
            Some(name) => {
                let range = self.trimmed_range(Some(name));
                self.scanner.slice(range.pos as usize, range.end as usize)
            }
            None => String::new(),
        }
    }

    /// The node's range without its leading trivia.
    fn trimmed_range(&self, id: Option<NodeId>) -> TextRange {
        match id {
            Some(id) => {
                let node = self.arena.node(id);
                let start = self.skip_trivia(node.pos()).min(node.end());
                TextRange::new(start, node.end())
            }
            None => TextRange::empty(self.node_pos()),
        }
    }

    /// First position at or after `pos` that is not whitespace or a comment.
    fn skip_trivia(&self, mut pos: u32) -> u32 {
        let at = |pos: u32| self.scanner.char_at(pos as usize);
        loop {
            match at(pos) {
                Some(ch) if is_white_space_like(ch) => pos += 1,
                Some('/') if at(pos + 1) == Some('/') => {
                    pos += 2;
                    while at(pos).is_some_and(|ch| !is_line_break(ch)) {
                        pos += 1;
                    }
                }
                Some('/') if at(pos + 1) == Some('*') => {
                    pos += 2;
                    while let Some(ch) = at(pos) {
                        if ch == '*' && at(pos + 1) == Some('/') {
                            pos += 2;
                            break;
                        }
                        pos += 1;
                    }
                }
                _ => return pos,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tern_ast::{NodeId, ScriptKind, SourceFile, SyntaxKind};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse(text: &str) -> SourceFile {
        let options = ParseOptions::default().with_script_kind(ScriptKind::TSX);
        Parser::new("test.tsx", text, options).parse_source_file()
    }

    /// The expression of the first statement.
    fn expression(file: &SourceFile) -> NodeId {
        let statement = file.statements()[0];
        file.arena.node(statement).child_node(0).unwrap()
    }

    fn child_kinds(file: &SourceFile, element: NodeId) -> Vec<SyntaxKind> {
        let children = file.arena.node(element).child_list(1);
        file.arena.elements(children).iter().map(|&c| file.arena.kind(c)).collect()
    }

    fn messages(file: &SourceFile) -> Vec<String> {
        file.diagnostics.iter().map(|d| d.message_text.clone()).collect()
    }

    #[test]
    fn test_element_with_children() {
        let file = parse("<div>hello {name}<br/></div>;");
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let element = expression(&file);
        assert_eq!(file.arena.kind(element), SyntaxKind::JsxElement);
        assert_eq!(
            child_kinds(&file, element),
            vec![SyntaxKind::JsxText, SyntaxKind::JsxExpression, SyntaxKind::JsxSelfClosingElement]
        );
        let text = file.arena.elements(file.arena.node(element).child_list(1))[0];
        assert_eq!(file.arena.text_of(text), Some("hello "));
    }

    #[test]
    fn test_fragment() {
        let file = parse("<>a</>;");
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        assert_eq!(file.arena.kind(expression(&file)), SyntaxKind::JsxFragment);
    }

    #[test]
    fn test_attribute_forms() {
        let file = parse("<a data-id=\"1\" on={f} {...rest} xlink:href='x' disabled />;");
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let element = expression(&file);
        assert_eq!(file.arena.kind(element), SyntaxKind::JsxSelfClosingElement);
        let attributes = file.arena.node(element).child_node(2).unwrap();
        let properties = file.arena.elements(file.arena.node(attributes).child_list(0)).to_vec();
        let kinds: Vec<_> = properties.iter().map(|&p| file.arena.kind(p)).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::JsxAttribute,
                SyntaxKind::JsxAttribute,
                SyntaxKind::JsxSpreadAttribute,
                SyntaxKind::JsxAttribute,
                SyntaxKind::JsxAttribute,
            ]
        );
        let dashed = file.arena.node(properties[0]).child_node(0).unwrap();
        assert_eq!(file.arena.text_of(dashed), Some("data-id"));
        let namespaced = file.arena.node(properties[3]).child_node(0).unwrap();
        assert_eq!(file.arena.kind(namespaced), SyntaxKind::JsxNamespacedName);
        assert!(file.arena.node(properties[4]).child_node(1).is_none());
    }

    #[test]
    fn test_member_tag_name() {
        let file = parse("<Foo.Bar></Foo.Bar>;");
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let opening = file.arena.node(expression(&file)).child_node(0).unwrap();
        let tag = file.arena.node(opening).child_node(0).unwrap();
        assert_eq!(file.arena.kind(tag), SyntaxKind::PropertyAccessExpression);
    }

    #[test]
    fn test_long_member_tag_names_compare_without_recursion() {
        let name = format!("A{}", ".b".repeat(20_000));
        let file = parse(&format!("<{name}></{name}>;"));
        assert!(file.diagnostics.is_empty());
        let file = parse(&format!("<{name}></{name}c>;"));
        assert!(messages(&file)[0].starts_with("Expected corresponding JSX closing tag for 'A.b.b"));
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let file = parse("<a></b>;");
        assert_eq!(messages(&file), vec!["Expected corresponding JSX closing tag for 'a'."]);
        assert_eq!(file.diagnostics[0].start(), 5);
    }

    #[test]
    fn test_unclosed_child_is_reported_and_parent_keeps_its_closing_tag() {
        let file = parse("<div><span></div>;");
        assert_eq!(messages(&file), vec!["JSX element 'span' has no corresponding closing tag."]);
        let div = expression(&file);
        let closing = file.arena.node(div).child_node(2).unwrap();
        let closing_name = file.arena.node(closing).child_node(0).unwrap();
        assert_eq!(file.arena.text_of(closing_name), Some("div"));
        let span = file.arena.elements(file.arena.node(div).child_list(1))[0];
        let span_closing = file.arena.node(span).child_node(2).unwrap();
        assert!(file.arena.node(span_closing).is_missing());
    }

    #[test]
    fn test_unclosed_element_at_end_of_file() {
        let file = parse("<div>text");
        assert!(messages(&file).contains(&"JSX element 'div' has no corresponding closing tag.".to_string()));
        assert_eq!(file.diagnostics[0].start(), 1);
    }

    #[test]
    fn test_adjacent_elements_need_a_parent() {
        let file = parse("<a/><b/>;");
        assert_eq!(messages(&file), vec!["JSX expressions must have one parent element."]);
        let expression = expression(&file);
        assert_eq!(file.arena.kind(expression), SyntaxKind::BinaryExpression);
        let operator = file.arena.node(expression).child_node(1).unwrap();
        assert!(file.arena.node(operator).is_missing());
    }

    #[test]
    fn test_empty_attribute_expression() {
        let file = parse("<a b={} />;");
        assert_eq!(messages(&file), vec!["JSX attributes must only be assigned a non-empty 'expression'."]);
    }

    #[test]
    fn test_typescript_file_reads_angle_bracket_as_assertion() {
        let file = Parser::new("test.ts", "<T>x;", ParseOptions::default()).parse_source_file();
        assert_eq!(file.arena.kind(expression(&file)), SyntaxKind::TypeAssertionExpression);
    }
}
