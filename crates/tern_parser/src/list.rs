//! The list engine.
//!
//! Every repeated construct (statements, members, arguments, parameters,
//! type arguments, JSX children...) is parsed by [`Parser::parse_list`] or
//! [`Parser::parse_delimited_list`], driven by a [`ParsingContext`] that
//! says which tokens start an element and which end the list.
//!
//! Recovery: when the current token neither starts an element nor ends
//! the list, one diagnostic is reported. If any *enclosing* open list
//! would accept the token, this list stops so that list can take it;
//! otherwise the token is skipped. Either way the loop makes progress.

use tern_ast::{NodeId, SyntaxKind};
use tern_diagnostics::{messages, DiagnosticMessage};
use tracing::trace;

use crate::parser::Parser;

/// What kind of list is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParsingContext {
    SourceElements,
    BlockStatements,
    SwitchClauses,
    SwitchClauseStatements,
    TypeMembers,
    ClassMembers,
    EnumMembers,
    HeritageClauseElement,
    VariableDeclarations,
    ObjectBindingElements,
    ArrayBindingElements,
    ArgumentExpressions,
    ObjectLiteralMembers,
    JsxAttributes,
    JsxChildren,
    ArrayLiteralMembers,
    Parameters,
    JSDocParameters,
    RestProperties,
    TypeParameters,
    TypeArguments,
    TupleElementTypes,
    HeritageClauses,
    ImportOrExportSpecifiers,
    ImportAttributes,
    JSDocComment,
}

impl ParsingContext {
    pub const ALL: [ParsingContext; 26] = [
        ParsingContext::SourceElements,
        ParsingContext::BlockStatements,
        ParsingContext::SwitchClauses,
        ParsingContext::SwitchClauseStatements,
        ParsingContext::TypeMembers,
        ParsingContext::ClassMembers,
        ParsingContext::EnumMembers,
        ParsingContext::HeritageClauseElement,
        ParsingContext::VariableDeclarations,
        ParsingContext::ObjectBindingElements,
        ParsingContext::ArrayBindingElements,
        ParsingContext::ArgumentExpressions,
        ParsingContext::ObjectLiteralMembers,
        ParsingContext::JsxAttributes,
        ParsingContext::JsxChildren,
        ParsingContext::ArrayLiteralMembers,
        ParsingContext::Parameters,
        ParsingContext::JSDocParameters,
        ParsingContext::RestProperties,
        ParsingContext::TypeParameters,
        ParsingContext::TypeArguments,
        ParsingContext::TupleElementTypes,
        ParsingContext::HeritageClauses,
        ParsingContext::ImportOrExportSpecifiers,
        ParsingContext::ImportAttributes,
        ParsingContext::JSDocComment,
    ];

    #[inline]
    pub fn bit(self) -> u32 {
        1 << (self as u8)
    }

    /// Contexts whose elements an incremental reparse may take from the
    /// old tree.
    pub fn is_reusable(self) -> bool {
        matches!(
            self,
            ParsingContext::SourceElements
                | ParsingContext::BlockStatements
                | ParsingContext::SwitchClauses
                | ParsingContext::SwitchClauseStatements
                | ParsingContext::ClassMembers
                | ParsingContext::EnumMembers
                | ParsingContext::TypeMembers
                | ParsingContext::VariableDeclarations
                | ParsingContext::Parameters
                | ParsingContext::JSDocParameters
        )
    }
}

impl Parser {
    // ========================================================================
    // List loops
    // ========================================================================

    /// Parse elements until the context's terminator.
    pub(crate) fn parse_list(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> NodeId,
    ) -> tern_ast::ListId {
        let saved = self.parsing_contexts;
        self.parsing_contexts |= context.bit();
        let pos = self.node_pos();
        let mut elements = Vec::new();
        while !self.is_list_terminator(context) {
            if self.is_list_element(context, false) {
                let mut parse = |p: &mut Self| Some(parse_element(p));
                if let Some(element) = self.parse_list_element(context, &mut parse) {
                    elements.push(element);
                }
                continue;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }
        self.parsing_contexts = saved;
        self.create_list(pos, elements, false)
    }

    /// Parse comma-separated elements. A trailing comma is recorded on the
    /// list. With `consider_semicolon_as_delimiter`, a `;` on the same line
    /// is skipped after the comma error.
    pub(crate) fn parse_delimited_list(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> NodeId,
        consider_semicolon_as_delimiter: bool,
    ) -> tern_ast::ListId {
        match self.try_parse_delimited_list(context, |p| Some(parse_element(p)), consider_semicolon_as_delimiter) {
            Some(list) => list,
            None => self.create_missing_list(),
        }
    }

    /// Like [`Parser::parse_delimited_list`], but gives up on the whole
    /// list as soon as an element parser returns `None`. Used under
    /// speculation, where the caller rolls back.
    pub(crate) fn try_parse_delimited_list(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> Option<NodeId>,
        consider_semicolon_as_delimiter: bool,
    ) -> Option<tern_ast::ListId> {
        let saved = self.parsing_contexts;
        self.parsing_contexts |= context.bit();
        let pos = self.node_pos();
        let mut elements = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.is_list_element(context, false) {
                let start = self.node_pos();
                let Some(element) = self.parse_list_element(context, &mut parse_element) else {
                    self.parsing_contexts = saved;
                    return None;
                };
                elements.push(element);
                if self.parse_optional(SyntaxKind::CommaToken) {
                    trailing_comma = true;
                    continue;
                }
                trailing_comma = false;
                if self.is_list_terminator(context) {
                    break;
                }
                self.parse_expected_with(SyntaxKind::CommaToken, expected_comma_message(context));
                if consider_semicolon_as_delimiter
                    && self.token() == SyntaxKind::SemicolonToken
                    && !self.has_preceding_line_break()
                {
                    self.next_token();
                }
                if start == self.node_pos() {
                    // The element consumed nothing; skip a token to keep moving.
                    self.next_token();
                }
                continue;
            }
            if self.is_list_terminator(context) {
                break;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }
        self.parsing_contexts = saved;
        Some(self.create_list(pos, elements, trailing_comma))
    }

    /// `open` delimited-list `close`, or a missing list when `open` is absent.
    pub(crate) fn parse_bracketed_list(
        &mut self,
        context: ParsingContext,
        parse_element: impl FnMut(&mut Self) -> NodeId,
        open: SyntaxKind,
        close: SyntaxKind,
    ) -> tern_ast::ListId {
        if self.parse_expected(open) {
            let list = self.parse_delimited_list(context, parse_element, false);
            self.parse_expected(close);
            list
        } else {
            self.create_missing_list()
        }
    }

    fn parse_list_element(
        &mut self,
        context: ParsingContext,
        parse_element: &mut impl FnMut(&mut Self) -> Option<NodeId>,
    ) -> Option<NodeId> {
        if let Some(node) = self.current_node(context) {
            return Some(self.consume_node(node));
        }
        parse_element(self)
    }

    fn abort_parsing_list_or_move_to_next_token(&mut self, context: ParsingContext) -> bool {
        self.report_parsing_context_error(context);
        if self.is_in_some_parsing_context() {
            trace!(?context, token = ?self.token(), pos = self.token_pos(), "list recovery: abort");
            return true;
        }
        trace!(?context, token = ?self.token(), pos = self.token_pos(), "list recovery: skip");
        self.next_token();
        false
    }

    /// Whether any open list would accept the current token as an element
    /// or terminator.
    fn is_in_some_parsing_context(&mut self) -> bool {
        for context in ParsingContext::ALL {
            if self.parsing_contexts & context.bit() != 0
                && (self.is_list_element(context, true) || self.is_list_terminator(context))
            {
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Element and terminator predicates
    // ========================================================================

    pub(crate) fn is_list_element(&mut self, context: ParsingContext, in_error_recovery: bool) -> bool {
        match context {
            ParsingContext::SourceElements
            | ParsingContext::BlockStatements
            | ParsingContext::SwitchClauseStatements => {
                !(self.token() == SyntaxKind::SemicolonToken && in_error_recovery) && self.is_start_of_statement()
            }
            ParsingContext::SwitchClauses => {
                matches!(self.token(), SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword)
            }
            ParsingContext::TypeMembers => self.look_ahead(Self::is_type_member_start),
            ParsingContext::ClassMembers => {
                self.look_ahead(Self::is_class_member_start)
                    || (self.token() == SyntaxKind::SemicolonToken && !in_error_recovery)
            }
            ParsingContext::EnumMembers => {
                self.token() == SyntaxKind::OpenBracketToken || self.is_literal_property_name()
            }
            ParsingContext::ObjectLiteralMembers => match self.token() {
                SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
                | SyntaxKind::DotToken => true,
                _ => self.is_literal_property_name(),
            },
            ParsingContext::RestProperties => self.is_literal_property_name(),
            ParsingContext::ObjectBindingElements => {
                matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::DotDotDotToken)
                    || self.is_literal_property_name()
            }
            ParsingContext::ImportAttributes => {
                self.is_identifier_or_keyword() || self.token() == SyntaxKind::StringLiteral
            }
            ParsingContext::HeritageClauseElement => {
                if self.token() == SyntaxKind::OpenBraceToken {
                    return self.look_ahead(Self::is_valid_heritage_clause_object_literal);
                }
                let extends_or_implements =
                    matches!(self.token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword)
                        && self.look_ahead(Self::next_token_is_start_of_expression);
                if in_error_recovery {
                    self.is_identifier() && !extends_or_implements
                } else {
                    self.is_start_of_left_hand_side_expression() && !extends_or_implements
                }
            }
            ParsingContext::VariableDeclarations => self.is_binding_identifier_or_private_identifier_or_pattern(),
            ParsingContext::ArrayBindingElements => {
                matches!(self.token(), SyntaxKind::CommaToken | SyntaxKind::DotDotDotToken)
                    || self.is_binding_identifier_or_private_identifier_or_pattern()
            }
            ParsingContext::TypeParameters => {
                matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::ConstKeyword) || self.is_identifier()
            }
            ParsingContext::ArrayLiteralMembers => {
                matches!(
                    self.token(),
                    SyntaxKind::CommaToken | SyntaxKind::DotToken | SyntaxKind::DotDotDotToken
                ) || self.is_start_of_expression()
            }
            ParsingContext::ArgumentExpressions => {
                self.token() == SyntaxKind::DotDotDotToken || self.is_start_of_expression()
            }
            ParsingContext::Parameters => self.is_start_of_parameter(false),
            ParsingContext::JSDocParameters => self.is_start_of_parameter(true),
            ParsingContext::TypeArguments | ParsingContext::TupleElementTypes => {
                self.token() == SyntaxKind::CommaToken || self.is_start_of_type(false)
            }
            ParsingContext::HeritageClauses => self.is_heritage_clause(),
            ParsingContext::ImportOrExportSpecifiers => {
                if self.token() == SyntaxKind::FromKeyword
                    && self.next_token_is(|p| p.token() == SyntaxKind::StringLiteral)
                {
                    return false;
                }
                self.token() == SyntaxKind::StringLiteral || self.is_identifier_or_keyword()
            }
            ParsingContext::JsxAttributes => {
                self.is_identifier_or_keyword() || self.token() == SyntaxKind::OpenBraceToken
            }
            ParsingContext::JsxChildren | ParsingContext::JSDocComment => true,
        }
    }

    pub(crate) fn is_list_terminator(&mut self, context: ParsingContext) -> bool {
        let token = self.token();
        if token == SyntaxKind::EndOfFileToken {
            return true;
        }
        match context {
            ParsingContext::BlockStatements
            | ParsingContext::SwitchClauses
            | ParsingContext::TypeMembers
            | ParsingContext::ClassMembers
            | ParsingContext::EnumMembers
            | ParsingContext::ObjectLiteralMembers
            | ParsingContext::ObjectBindingElements
            | ParsingContext::ImportOrExportSpecifiers
            | ParsingContext::ImportAttributes => token == SyntaxKind::CloseBraceToken,
            ParsingContext::SwitchClauseStatements => matches!(
                token,
                SyntaxKind::CloseBraceToken | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            ),
            ParsingContext::HeritageClauseElement => matches!(
                token,
                SyntaxKind::OpenBraceToken | SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::VariableDeclarations => self.is_variable_declarator_list_terminator(),
            ParsingContext::TypeParameters => matches!(
                token,
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::ArgumentExpressions => {
                matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::SemicolonToken)
            }
            ParsingContext::ArrayLiteralMembers
            | ParsingContext::TupleElementTypes
            | ParsingContext::ArrayBindingElements => token == SyntaxKind::CloseBracketToken,
            ParsingContext::JSDocParameters | ParsingContext::Parameters | ParsingContext::RestProperties => {
                matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken)
            }
            ParsingContext::TypeArguments => token != SyntaxKind::CommaToken,
            ParsingContext::HeritageClauses => {
                matches!(token, SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken)
            }
            ParsingContext::JsxAttributes => matches!(token, SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken),
            ParsingContext::JsxChildren => token == SyntaxKind::LessThanSlashToken,
            ParsingContext::SourceElements | ParsingContext::JSDocComment => false,
        }
    }

    fn is_variable_declarator_list_terminator(&self) -> bool {
        self.can_parse_semicolon()
            || matches!(
                self.token(),
                SyntaxKind::InKeyword | SyntaxKind::OfKeyword | SyntaxKind::EqualsGreaterThanToken
            )
    }

    fn report_parsing_context_error(&mut self, context: ParsingContext) {
        let token = self.token();
        match context {
            ParsingContext::SourceElements if token == SyntaxKind::DefaultKeyword => {
                self.parse_error_at_current_token(&messages::_0_EXPECTED, &["export"]);
            }
            ParsingContext::VariableDeclarations | ParsingContext::Parameters | ParsingContext::JSDocParameters
                if token.is_keyword() && !token.is_identifier_like() =>
            {
                let text = token.keyword_text().unwrap_or_default();
                self.parse_error_at_current_token(&messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD, &[text]);
            }
            ParsingContext::ImportOrExportSpecifiers if token == SyntaxKind::FromKeyword => {
                self.parse_error_at_current_token(&messages::_0_EXPECTED, &["}"]);
            }
            ParsingContext::HeritageClauses => {
                self.parse_error_at_current_token(&messages::_0_EXPECTED, &["{"]);
            }
            _ => {
                self.parse_error_at_current_token(parsing_context_message(context), &[]);
            }
        }
    }

    // ========================================================================
    // Incremental reuse
    // ========================================================================

    /// An old node that can stand in for the next element of `context`.
    fn current_node(&mut self, context: ParsingContext) -> Option<NodeId> {
        if !context.is_reusable() || self.parse_error_before_next_finished_node {
            return None;
        }
        let pos = self.node_pos();
        let cursor = self.syntax_cursor.as_mut()?;
        let id = cursor.current_node(&self.arena, pos)?;
        let node = self.arena.node(id);
        if node.is_missing() || node.intersects_change() || node.subtree_has_error() {
            return None;
        }
        if node.context_flags() != self.context.flags() {
            return None;
        }
        if !self.can_reuse_node(id, context) {
            return None;
        }
        Some(id)
    }

    /// Splice in `id` and move the scanner past it. The subtree is not
    /// visited; its nodes are counted once the new tree is finished.
    fn consume_node(&mut self, id: NodeId) -> NodeId {
        let end = self.arena.node(id).end();
        self.scanner.reset_token_state(end as usize);
        self.next_token();
        id
    }

    /// Whether a node of this kind parses the same wherever it starts, as
    /// long as its own text is unchanged. Anything whose parse looked past
    /// its own end is excluded.
    fn can_reuse_node(&self, id: NodeId, context: ParsingContext) -> bool {
        let node = self.arena.node(id);
        match context {
            ParsingContext::ClassMembers => match node.kind {
                SyntaxKind::Constructor
                | SyntaxKind::IndexSignature
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::SemicolonClassElement => true,
                // A method named `constructor` reparses as a constructor.
                SyntaxKind::MethodDeclaration => node.child_node(2).map_or(true, |name| {
                    !(self.arena.kind(name) == SyntaxKind::Identifier
                        && self.arena.text_of(name) == Some("constructor"))
                }),
                _ => false,
            },
            ParsingContext::SwitchClauses => {
                matches!(node.kind, SyntaxKind::CaseClause | SyntaxKind::DefaultClause)
            }
            ParsingContext::SourceElements
            | ParsingContext::BlockStatements
            | ParsingContext::SwitchClauseStatements => matches!(
                node.kind,
                SyntaxKind::FunctionDeclaration
                    | SyntaxKind::VariableStatement
                    | SyntaxKind::Block
                    | SyntaxKind::IfStatement
                    | SyntaxKind::ExpressionStatement
                    | SyntaxKind::ThrowStatement
                    | SyntaxKind::ReturnStatement
                    | SyntaxKind::SwitchStatement
                    | SyntaxKind::BreakStatement
                    | SyntaxKind::ContinueStatement
                    | SyntaxKind::ForInStatement
                    | SyntaxKind::ForOfStatement
                    | SyntaxKind::ForStatement
                    | SyntaxKind::WhileStatement
                    | SyntaxKind::WithStatement
                    | SyntaxKind::EmptyStatement
                    | SyntaxKind::TryStatement
                    | SyntaxKind::LabeledStatement
                    | SyntaxKind::DoStatement
                    | SyntaxKind::DebuggerStatement
                    | SyntaxKind::ImportDeclaration
                    | SyntaxKind::ImportEqualsDeclaration
                    | SyntaxKind::ExportDeclaration
                    | SyntaxKind::ExportAssignment
                    | SyntaxKind::ModuleDeclaration
                    | SyntaxKind::ClassDeclaration
                    | SyntaxKind::InterfaceDeclaration
                    | SyntaxKind::EnumDeclaration
                    | SyntaxKind::TypeAliasDeclaration
            ),
            ParsingContext::EnumMembers => node.kind == SyntaxKind::EnumMember,
            ParsingContext::TypeMembers => matches!(
                node.kind,
                SyntaxKind::ConstructSignature
                    | SyntaxKind::MethodSignature
                    | SyntaxKind::IndexSignature
                    | SyntaxKind::PropertySignature
                    | SyntaxKind::CallSignature
            ),
            // An initializer's extent depends on what follows it.
            ParsingContext::VariableDeclarations => {
                node.kind == SyntaxKind::VariableDeclaration && node.child_node(3).is_none()
            }
            ParsingContext::Parameters | ParsingContext::JSDocParameters => {
                node.kind == SyntaxKind::Parameter && node.child_node(5).is_none()
            }
            _ => false,
        }
    }
}

/// `None` means the generic "',' expected.".
fn expected_comma_message(context: ParsingContext) -> Option<&'static DiagnosticMessage> {
    match context {
        ParsingContext::EnumMembers => {
            Some(&messages::AN_ENUM_MEMBER_NAME_MUST_BE_FOLLOWED_BY_A_COMMA_EQUALS_OR_CLOSE_BRACE)
        }
        _ => None,
    }
}

fn parsing_context_message(context: ParsingContext) -> &'static DiagnosticMessage {
    match context {
        ParsingContext::SourceElements | ParsingContext::BlockStatements => {
            &messages::DECLARATION_OR_STATEMENT_EXPECTED
        }
        ParsingContext::SwitchClauses => &messages::CASE_OR_DEFAULT_EXPECTED,
        ParsingContext::SwitchClauseStatements => &messages::STATEMENT_EXPECTED,
        ParsingContext::RestProperties | ParsingContext::TypeMembers => &messages::PROPERTY_OR_SIGNATURE_EXPECTED,
        ParsingContext::ClassMembers => &messages::UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED,
        ParsingContext::EnumMembers => &messages::ENUM_MEMBER_EXPECTED,
        ParsingContext::HeritageClauseElement => &messages::EXPRESSION_EXPECTED,
        ParsingContext::VariableDeclarations => &messages::VARIABLE_DECLARATION_EXPECTED,
        ParsingContext::ObjectBindingElements => &messages::PROPERTY_DESTRUCTURING_PATTERN_EXPECTED,
        ParsingContext::ArrayBindingElements => &messages::ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED,
        ParsingContext::ArgumentExpressions => &messages::ARGUMENT_EXPRESSION_EXPECTED,
        ParsingContext::ObjectLiteralMembers => &messages::PROPERTY_ASSIGNMENT_EXPECTED,
        ParsingContext::ArrayLiteralMembers => &messages::EXPRESSION_OR_COMMA_EXPECTED,
        ParsingContext::Parameters | ParsingContext::JSDocParameters => &messages::PARAMETER_DECLARATION_EXPECTED,
        ParsingContext::TypeParameters => &messages::TYPE_PARAMETER_DECLARATION_EXPECTED,
        ParsingContext::TypeArguments => &messages::TYPE_ARGUMENT_EXPECTED,
        ParsingContext::TupleElementTypes => &messages::TYPE_EXPECTED,
        ParsingContext::HeritageClauses => &messages::UNEXPECTED_TOKEN,
        ParsingContext::ImportAttributes => &messages::IDENTIFIER_OR_STRING_LITERAL_EXPECTED,
        ParsingContext::ImportOrExportSpecifiers
        | ParsingContext::JsxAttributes
        | ParsingContext::JsxChildren
        | ParsingContext::JSDocComment => &messages::IDENTIFIER_EXPECTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_bits_are_distinct() {
        let mut all = 0u32;
        for context in ParsingContext::ALL {
            assert_eq!(all & context.bit(), 0, "{context:?}");
            all |= context.bit();
        }
        assert_eq!(all.count_ones() as usize, ParsingContext::ALL.len());
    }

    #[test]
    fn test_reusable_contexts() {
        assert!(ParsingContext::SourceElements.is_reusable());
        assert!(ParsingContext::ClassMembers.is_reusable());
        assert!(!ParsingContext::ObjectLiteralMembers.is_reusable());
        assert!(!ParsingContext::ArgumentExpressions.is_reusable());
        assert!(!ParsingContext::JsxChildren.is_reusable());
    }
}
