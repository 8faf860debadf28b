//! Expressions.
//!
//! The entry point is [`Parser::parse_assignment_expression_or_higher`]:
//! yield, arrow functions, then a precedence-climbing binary parse over
//! unary and left-hand-side expressions, then an assignment or conditional
//! tail. Arrow functions with parenthesized parameters are recognised by
//! a cheap lookahead classifier first; only when it cannot decide is the
//! arrow parsed speculatively.

use tern_ast::{LanguageVariant, ListId, Node, NodeFlags, NodeId, SyntaxKind, TokenFlags};
use tern_core::text::TextRange;
use tern_diagnostics::messages;

use crate::list::ParsingContext;
use crate::parser::{slots, Parser};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};

/// Outcome of the arrow-function lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tristate {
    False,
    True,
    Unknown,
}

impl Parser {
    // ========================================================================
    // Start-of predicates
    // ========================================================================

    pub(crate) fn is_start_of_left_hand_side_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::Identifier => true,
            SyntaxKind::ImportKeyword => self.look_ahead(Self::next_token_is_open_paren_or_less_than_or_dot),
            _ => self.is_identifier(),
        }
    }

    pub(crate) fn is_start_of_expression(&mut self) -> bool {
        if self.is_start_of_left_hand_side_expression() {
            return true;
        }
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::AwaitKeyword
            | SyntaxKind::YieldKeyword
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::AtToken => true,
            // A stray binary operator is still treated as the start of an
            // expression so the error is "Expression expected".
            _ => self.is_binary_operator() || self.is_identifier(),
        }
    }

    pub(crate) fn is_start_of_expression_statement(&mut self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword | SyntaxKind::AtToken
        ) && self.is_start_of_expression()
    }

    pub(crate) fn next_token_is_start_of_expression(&mut self) -> bool {
        self.next_token();
        self.is_start_of_expression()
    }

    fn is_binary_operator(&self) -> bool {
        if self.context.in_disallow_in() && self.token() == SyntaxKind::InKeyword {
            return false;
        }
        get_binary_operator_precedence(self.token()) != OperatorPrecedence::Invalid
    }

    pub(crate) fn is_literal_property_name(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
            )
    }

    fn is_template_start_of_tagged_template(&self) -> bool {
        matches!(self.token(), SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead)
    }

    // ------------------------------------------------------------------------
    // One-token lookaheads
    // ------------------------------------------------------------------------

    pub(crate) fn next_token_is_identifier(&mut self) -> bool {
        self.next_token();
        self.is_identifier()
    }

    pub(crate) fn next_token_is_identifier_or_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        self.is_identifier_or_keyword() && !self.has_preceding_line_break()
    }

    fn next_token_is_identifier_or_keyword_or_literal_on_same_line(&mut self) -> bool {
        self.next_token();
        (self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral
            ))
            && !self.has_preceding_line_break()
    }

    fn next_token_is_identifier_or_keyword_or_greater_than(&mut self) -> bool {
        self.next_token();
        self.is_identifier_or_keyword() || self.token() == SyntaxKind::GreaterThanToken
    }

    fn next_token_is_identifier_or_keyword_or_open_bracket_or_template(&mut self) -> bool {
        self.next_token();
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::OpenBracketToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
            )
    }

    pub(crate) fn next_token_is_open_paren_or_less_than(&mut self) -> bool {
        matches!(self.next_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
    }

    pub(crate) fn next_token_is_open_paren_or_less_than_or_dot(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::DotToken
        )
    }

    pub(crate) fn next_token_is_dot(&mut self) -> bool {
        self.next_token() == SyntaxKind::DotToken
    }

    pub(crate) fn next_token_is_function_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::FunctionKeyword && !self.has_preceding_line_break()
    }

    // ========================================================================
    // Comma, assignment and conditional
    // ========================================================================

    /// `Expression : AssignmentExpression ("," AssignmentExpression)*`
    pub(crate) fn parse_expression(&mut self) -> NodeId {
        // `@dec [x]` member names end the decorator expression, but a
        // bracketed argument inside a full expression does not.
        self.outside_decorator_context(|p| {
            let pos = p.node_pos();
            let mut expression = p.parse_assignment_expression_or_higher(true);
            while let Some(comma) = p.parse_optional_token(SyntaxKind::CommaToken) {
                let right = p.parse_assignment_expression_or_higher(true);
                expression = p.make_binary_expression(expression, comma, right, pos);
            }
            expression
        })
    }

    pub(crate) fn parse_initializer(&mut self) -> Option<NodeId> {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression_or_higher(true))
        } else {
            None
        }
    }

    /// `allow_return_type_in_arrow_function` is false in the true branch of
    /// a conditional, where `a ? (b) : c => d` must keep its colon.
    pub(crate) fn parse_assignment_expression_or_higher(&mut self, allow_return_type_in_arrow_function: bool) -> NodeId {
        self.guarded(SyntaxKind::Identifier, |p| {
            p.parse_assignment_expression_worker(allow_return_type_in_arrow_function)
        })
    }

    fn parse_assignment_expression_worker(&mut self, allow_return_type: bool) -> NodeId {
        if self.is_yield_expression() {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_parenthesized_arrow_function_expression(allow_return_type) {
            return arrow;
        }
        if let Some(arrow) = self.try_parse_async_simple_arrow_function_expression(allow_return_type) {
            return arrow;
        }

        let pos = self.node_pos();
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::Lowest);

        if self.arena.kind(expression) == SyntaxKind::Identifier && self.token() == SyntaxKind::EqualsGreaterThanToken {
            return self.parse_simple_arrow_function_expression(pos, expression, allow_return_type, None);
        }

        if self.arena.kind(expression).is_left_hand_side_expression() && self.re_scan_greater_token().is_assignment_operator() {
            let operator = self.parse_token_node();
            let right = self.parse_assignment_expression_or_higher(allow_return_type);
            return self.make_binary_expression(expression, operator, right, pos);
        }

        self.parse_conditional_expression_rest(expression, pos, allow_return_type)
    }

    fn parse_conditional_expression_rest(&mut self, condition: NodeId, pos: u32, allow_return_type: bool) -> NodeId {
        let Some(question) = self.parse_optional_token(SyntaxKind::QuestionToken) else {
            return condition;
        };
        let context = self
            .context
            .without(NodeFlags::DISALLOW_IN_CONTEXT | NodeFlags::DECORATOR_CONTEXT);
        let when_true = self.with_context(context, |p| p.parse_assignment_expression_or_higher(false));
        let colon = self.parse_expected_token(SyntaxKind::ColonToken);
        let when_false = if self.arena.node(colon).is_missing() {
            self.create_missing_node(SyntaxKind::Identifier, false, &messages::_0_EXPECTED, &[":"])
        } else {
            self.parse_assignment_expression_or_higher(allow_return_type)
        };
        self.finish_node(
            SyntaxKind::ConditionalExpression,
            pos,
            slots![condition, question, when_true, colon, when_false],
        )
    }

    fn make_binary_expression(&mut self, left: NodeId, operator: NodeId, right: NodeId, pos: u32) -> NodeId {
        self.finish_node(SyntaxKind::BinaryExpression, pos, slots![left, operator, right])
    }

    // ========================================================================
    // Yield
    // ========================================================================

    fn is_yield_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::YieldKeyword {
            return false;
        }
        if self.context.in_yield() {
            return true;
        }
        // Outside a generator `yield` is an identifier, unless it is
        // obviously being used as an operator.
        self.look_ahead(Self::next_token_is_identifier_or_keyword_or_literal_on_same_line)
    }

    fn parse_yield_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        if !self.has_preceding_line_break()
            && (self.token() == SyntaxKind::AsteriskToken || self.is_start_of_expression())
        {
            let asterisk = self.parse_optional_token(SyntaxKind::AsteriskToken);
            let expression = self.parse_assignment_expression_or_higher(true);
            self.finish_node(SyntaxKind::YieldExpression, pos, slots![asterisk, expression])
        } else {
            self.finish_node(SyntaxKind::YieldExpression, pos, slots![None::<NodeId>, None::<NodeId>])
        }
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// `x => body` and `async x => body`. The parameter takes the
    /// identifier's range.
    fn parse_simple_arrow_function_expression(
        &mut self,
        pos: u32,
        identifier: NodeId,
        allow_return_type: bool,
        async_modifier: Option<ListId>,
    ) -> NodeId {
        debug_assert_eq!(self.token(), SyntaxKind::EqualsGreaterThanToken);
        let range = self.arena.node(identifier).range;
        let parameter = self.finish(Node::new(SyntaxKind::Parameter, range).with_slots(slots![
            None::<ListId>,
            None::<NodeId>,
            identifier,
            None::<NodeId>,
            None::<NodeId>,
            None::<NodeId>,
        ]));
        let parameters = self.create_list_in(range, vec![parameter], false);
        let arrow = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_function_expression_body(async_modifier.is_some(), allow_return_type);
        self.finish_node(
            SyntaxKind::ArrowFunction,
            pos,
            slots![async_modifier, None::<ListId>, parameters, None::<NodeId>, arrow, body],
        )
    }

    fn try_parse_parenthesized_arrow_function_expression(&mut self, allow_return_type: bool) -> Option<NodeId> {
        match self.is_parenthesized_arrow_function_expression() {
            Tristate::False => None,
            Tristate::True => self.parse_parenthesized_arrow_function_expression(true, true),
            Tristate::Unknown => {
                self.try_parse(|p| p.parse_possible_parenthesized_arrow_function_expression(allow_return_type))
            }
        }
    }

    fn is_parenthesized_arrow_function_expression(&mut self) -> Tristate {
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::AsyncKeyword => {
                self.look_ahead(Self::is_parenthesized_arrow_function_expression_worker)
            }
            // A bare `=>`: recover as an arrow with a missing parameter list.
            SyntaxKind::EqualsGreaterThanToken => Tristate::True,
            _ => Tristate::False,
        }
    }

    fn is_parenthesized_arrow_function_expression_worker(&mut self) -> Tristate {
        if self.token() == SyntaxKind::AsyncKeyword {
            self.next_token();
            if self.has_preceding_line_break() {
                return Tristate::False;
            }
            if !matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
                return Tristate::False;
            }
        }

        let first = self.token();
        let second = self.next_token();

        if first == SyntaxKind::OpenParenToken {
            match second {
                SyntaxKind::CloseParenToken => {
                    return match self.next_token() {
                        SyntaxKind::EqualsGreaterThanToken | SyntaxKind::ColonToken | SyntaxKind::OpenBraceToken => {
                            Tristate::True
                        }
                        _ => Tristate::False,
                    };
                }
                // A binding pattern or a literal: only a full parse can tell.
                SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => return Tristate::Unknown,
                SyntaxKind::DotDotDotToken => return Tristate::True,
                _ => {}
            }

            // `(public x` can only be a parameter list; `(readonly as T)` cannot.
            if second.is_modifier_kind()
                && second != SyntaxKind::AsyncKeyword
                && self.look_ahead(Self::next_token_is_identifier)
            {
                if self.next_token() == SyntaxKind::AsKeyword {
                    return Tristate::False;
                }
                return Tristate::True;
            }

            if !self.is_identifier() && second != SyntaxKind::ThisKeyword {
                return Tristate::False;
            }

            return match self.next_token() {
                SyntaxKind::ColonToken => Tristate::True,
                SyntaxKind::QuestionToken => {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::EqualsToken | SyntaxKind::CloseParenToken
                    ) {
                        Tristate::True
                    } else {
                        Tristate::False
                    }
                }
                SyntaxKind::CommaToken | SyntaxKind::EqualsToken | SyntaxKind::CloseParenToken => Tristate::Unknown,
                _ => Tristate::False,
            };
        }

        debug_assert_eq!(first, SyntaxKind::LessThanToken);
        if !self.is_identifier() && self.token() != SyntaxKind::ConstKeyword {
            return Tristate::False;
        }

        if self.scanner.language_variant() == LanguageVariant::Jsx {
            // In JSX `<T>` opens an element; only `<T,`, `<T =` and
            // `<T extends U>` followed by something other than an
            // attribute-like token introduce type parameters.
            let is_arrow_in_jsx = self.look_ahead(|p| {
                p.parse_optional(SyntaxKind::ConstKeyword);
                match p.next_token() {
                    SyntaxKind::ExtendsKeyword => !matches!(
                        p.next_token(),
                        SyntaxKind::EqualsToken | SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken
                    ),
                    SyntaxKind::CommaToken | SyntaxKind::EqualsToken => true,
                    _ => false,
                }
            });
            return if is_arrow_in_jsx { Tristate::True } else { Tristate::False };
        }

        Tristate::Unknown
    }

    fn parse_possible_parenthesized_arrow_function_expression(&mut self, allow_return_type: bool) -> Option<NodeId> {
        let token_pos = self.token_pos();
        if self.not_parenthesized_arrow.contains(&token_pos) {
            return None;
        }
        let result = self.parse_parenthesized_arrow_function_expression(false, allow_return_type);
        if result.is_none() {
            self.not_parenthesized_arrow.insert(token_pos);
        }
        result
    }

    fn try_parse_async_simple_arrow_function_expression(&mut self, allow_return_type: bool) -> Option<NodeId> {
        if self.token() != SyntaxKind::AsyncKeyword
            || !self.look_ahead(Self::is_un_parenthesized_async_arrow_function_worker)
        {
            return None;
        }
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers_for_arrow_function();
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::Lowest);
        Some(self.parse_simple_arrow_function_expression(pos, expression, allow_return_type, modifiers))
    }

    /// `async x =>` on one line.
    fn is_un_parenthesized_async_arrow_function_worker(&mut self) -> bool {
        self.next_token();
        if self.has_preceding_line_break() || self.token() == SyntaxKind::EqualsGreaterThanToken {
            return false;
        }
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::Lowest);
        !self.has_preceding_line_break()
            && self.arena.kind(expression) == SyntaxKind::Identifier
            && self.token() == SyntaxKind::EqualsGreaterThanToken
    }

    fn parse_modifiers_for_arrow_function(&mut self) -> Option<ListId> {
        if self.token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let pos = self.node_pos();
        let modifier = self.parse_token_node();
        Some(self.create_list(pos, vec![modifier], false))
    }

    /// With `allow_ambiguity` the arrow is committed to and never fails.
    /// Without it, anything that does not look like an arrow returns `None`
    /// so the caller can roll back.
    fn parse_parenthesized_arrow_function_expression(
        &mut self,
        allow_ambiguity: bool,
        allow_return_type: bool,
    ) -> Option<NodeId> {
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers_for_arrow_function();
        let is_async = modifiers.is_some();
        let type_parameters = self.parse_type_parameters();

        let parameters = if self.parse_expected(SyntaxKind::OpenParenToken) {
            let parameters = self.parse_parameters_worker(false, is_async, allow_ambiguity)?;
            if !self.parse_expected(SyntaxKind::CloseParenToken) && !allow_ambiguity {
                return None;
            }
            parameters
        } else {
            if !allow_ambiguity {
                return None;
            }
            self.create_missing_list()
        };

        let has_return_colon = self.token() == SyntaxKind::ColonToken;
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        if !allow_ambiguity && return_type.is_some_and(|ty| self.type_has_arrow_function_blocking_parse_error(ty)) {
            return None;
        }

        // A signature alone is not enough: `(a): b` may be the tail of a
        // conditional. Require the arrow or a body.
        if !allow_ambiguity
            && !matches!(self.token(), SyntaxKind::EqualsGreaterThanToken | SyntaxKind::OpenBraceToken)
        {
            return None;
        }

        let last_token = self.token();
        let arrow = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken);
        let body = if matches!(last_token, SyntaxKind::EqualsGreaterThanToken | SyntaxKind::OpenBraceToken) {
            self.parse_arrow_function_expression_body(is_async, allow_return_type)
        } else {
            self.parse_identifier()
        };

        // `x ? (y): z => w` parsed as an arrow must leave a `:` for the
        // conditional, otherwise the colon was the conditional's.
        if !allow_return_type && has_return_colon && self.token() != SyntaxKind::ColonToken {
            return None;
        }

        Some(self.finish_node(
            SyntaxKind::ArrowFunction,
            pos,
            slots![modifiers, type_parameters, parameters, return_type, arrow, body],
        ))
    }

    fn type_has_arrow_function_blocking_parse_error(&self, ty: NodeId) -> bool {
        let node = self.arena.node(ty);
        match node.kind {
            SyntaxKind::TypeReference => node.child_node(0).map_or(true, |name| self.arena.node(name).is_missing()),
            SyntaxKind::FunctionType | SyntaxKind::ConstructorType => {
                let (parameters, return_type) = if node.kind == SyntaxKind::FunctionType { (1, 2) } else { (2, 3) };
                node.child_list(parameters).map_or(true, |list| self.arena.list(list).is_missing())
                    || node
                        .child_node(return_type)
                        .is_some_and(|ty| self.type_has_arrow_function_blocking_parse_error(ty))
            }
            SyntaxKind::ParenthesizedType => node
                .child_node(0)
                .is_some_and(|ty| self.type_has_arrow_function_blocking_parse_error(ty)),
            _ => false,
        }
    }

    fn parse_arrow_function_expression_body(&mut self, is_async: bool, allow_return_type: bool) -> NodeId {
        if self.token() == SyntaxKind::OpenBraceToken {
            return self.parse_function_block(false, is_async, false);
        }
        if !matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword
        ) && self.is_start_of_statement()
            && !self.is_start_of_expression_statement()
        {
            // `=> return x`: statement-only syntax, parsed as a block
            // whose `{` is missing.
            return self.parse_function_block(false, is_async, true);
        }
        let context = self.context.set(NodeFlags::AWAIT_CONTEXT, is_async);
        self.with_context(context, |p| p.parse_assignment_expression_or_higher(allow_return_type))
    }

    // ========================================================================
    // Binary and unary
    // ========================================================================

    pub(crate) fn parse_binary_expression_or_higher(&mut self, precedence: OperatorPrecedence) -> NodeId {
        let pos = self.node_pos();
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(precedence, left, pos)
    }

    fn parse_binary_expression_rest(&mut self, precedence: OperatorPrecedence, mut left: NodeId, pos: u32) -> NodeId {
        loop {
            // `>` is scanned alone so type argument lists can close; glue
            // it back into `>=`, `>>` and friends here.
            self.re_scan_greater_token();
            let operator = self.token();
            let new_precedence = get_binary_operator_precedence(operator);
            if !new_precedence.binds_tighter_than(precedence, operator) {
                break;
            }
            if operator == SyntaxKind::InKeyword && self.context.in_disallow_in() {
                break;
            }
            if matches!(operator, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                // `as` on a new line starts the next statement under ASI.
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let ty = self.parse_type();
                let kind = if operator == SyntaxKind::AsKeyword {
                    SyntaxKind::AsExpression
                } else {
                    SyntaxKind::SatisfiesExpression
                };
                left = self.finish_node(kind, pos, slots![left, ty]);
            } else {
                let operator = self.parse_token_node();
                let right = self.parse_binary_expression_or_higher(new_precedence);
                left = self.make_binary_expression(left, operator, right, pos);
            }
        }
        left
    }

    fn parse_unary_expression_or_higher(&mut self) -> NodeId {
        if self.is_update_expression() {
            let pos = self.node_pos();
            let update = self.parse_update_expression();
            return if self.token() == SyntaxKind::AsteriskAsteriskToken {
                let precedence = get_binary_operator_precedence(SyntaxKind::AsteriskAsteriskToken);
                self.parse_binary_expression_rest(precedence, update, pos)
            } else {
                update
            };
        }

        let operator = self.token();
        let start = self.token_pos();
        let operand = self.parse_simple_unary_expression();
        if self.token() == SyntaxKind::AsteriskAsteriskToken {
            let range = TextRange::new(start, self.arena.node(operand).end());
            if self.arena.kind(operand) == SyntaxKind::TypeAssertionExpression {
                self.parse_error_at_range(
                    range,
                    &messages::A_TYPE_ASSERTION_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                    &[],
                );
            } else {
                let text = operator.token_text().unwrap_or_default();
                self.parse_error_at_range(
                    range,
                    &messages::AN_UNARY_EXPRESSION_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                    &[text],
                );
            }
        }
        operand
    }

    /// Whether the current token starts an UpdateExpression rather than a
    /// prefix-operator UnaryExpression.
    fn is_update_expression(&self) -> bool {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::AwaitKeyword => false,
            // Outside JSX `<` is a type assertion.
            SyntaxKind::LessThanToken => self.scanner.language_variant() == LanguageVariant::Jsx,
            _ => true,
        }
    }

    fn parse_simple_unary_expression(&mut self) -> NodeId {
        self.guarded(SyntaxKind::Identifier, |p| match p.token() {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::TildeToken | SyntaxKind::ExclamationToken => {
                p.parse_prefix_unary_expression()
            }
            SyntaxKind::DeleteKeyword => p.parse_keyword_unary_expression(SyntaxKind::DeleteExpression),
            SyntaxKind::TypeOfKeyword => p.parse_keyword_unary_expression(SyntaxKind::TypeOfExpression),
            SyntaxKind::VoidKeyword => p.parse_keyword_unary_expression(SyntaxKind::VoidExpression),
            SyntaxKind::LessThanToken => {
                if p.scanner.language_variant() == LanguageVariant::Jsx {
                    p.parse_jsx_element_or_self_closing_element_or_fragment(true, None, None)
                } else {
                    p.parse_type_assertion()
                }
            }
            SyntaxKind::AwaitKeyword if p.is_await_expression() => {
                p.parse_keyword_unary_expression(SyntaxKind::AwaitExpression)
            }
            _ => p.parse_update_expression(),
        })
    }

    fn parse_prefix_unary_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let operator = self.parse_token_node();
        let operand = self.parse_simple_unary_expression();
        self.finish_node(SyntaxKind::PrefixUnaryExpression, pos, slots![operator, operand])
    }

    /// `delete`, `typeof`, `void` and `await`.
    fn parse_keyword_unary_expression(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let operand = self.parse_simple_unary_expression();
        self.finish_node(kind, pos, slots![operand])
    }

    fn is_await_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::AwaitKeyword {
            return false;
        }
        if self.context.in_await() {
            return true;
        }
        self.look_ahead(Self::next_token_is_identifier_or_keyword_or_literal_on_same_line)
    }

    fn parse_type_assertion(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        let ty = self.parse_type();
        self.parse_expected(SyntaxKind::GreaterThanToken);
        let expression = self.parse_simple_unary_expression();
        self.finish_node(SyntaxKind::TypeAssertionExpression, pos, slots![ty, expression])
    }

    fn parse_update_expression(&mut self) -> NodeId {
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            let pos = self.node_pos();
            let operator = self.parse_token_node();
            let operand = self.parse_left_hand_side_expression_or_higher();
            return self.finish_node(SyntaxKind::PrefixUnaryExpression, pos, slots![operator, operand]);
        }
        if self.scanner.language_variant() == LanguageVariant::Jsx
            && self.token() == SyntaxKind::LessThanToken
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_or_greater_than)
        {
            return self.parse_jsx_element_or_self_closing_element_or_fragment(true, None, None);
        }

        let pos = self.node_pos();
        let expression = self.parse_left_hand_side_expression_or_higher();
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            let operator = self.parse_token_node();
            return self.finish_node(SyntaxKind::PostfixUnaryExpression, pos, slots![expression, operator]);
        }
        expression
    }

    // ========================================================================
    // Left-hand side: member access, calls, new
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = match self.token() {
            SyntaxKind::ImportKeyword if self.look_ahead(Self::next_token_is_open_paren_or_less_than) => {
                self.parse_token_node()
            }
            SyntaxKind::ImportKeyword if self.look_ahead(Self::next_token_is_dot) => {
                let keyword = self.parse_token_node();
                self.parse_expected(SyntaxKind::DotToken);
                let name = self.parse_identifier_name();
                self.saw_import_meta = true;
                self.finish_node(SyntaxKind::MetaProperty, pos, slots![keyword, name])
            }
            SyntaxKind::SuperKeyword => self.parse_super_expression(),
            _ => self.parse_member_expression_or_higher(),
        };
        self.parse_call_expression_rest(pos, expression)
    }

    fn parse_member_expression_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_primary_expression();
        self.parse_member_expression_rest(pos, expression, true)
    }

    fn parse_super_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_token_node();
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
        ) {
            return expression;
        }
        self.parse_error_at_current_token(&messages::SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS, &[]);
        let name = self.parse_right_side_of_dot(true, true);
        self.finish_node(
            SyntaxKind::PropertyAccessExpression,
            pos,
            slots![expression, None::<NodeId>, name],
        )
    }

    /// The name after `.`: any identifier name, or a private name when
    /// allowed.
    pub(crate) fn parse_right_side_of_dot(&mut self, allow_identifier_names: bool, allow_private_identifiers: bool) -> NodeId {
        // `a.\nfoo bar`: the dot most likely ends an unfinished line, so
        // report the missing name right after it instead of eating `foo`.
        if self.has_preceding_line_break()
            && self.is_identifier_or_keyword()
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line)
        {
            return self.create_missing_node(SyntaxKind::Identifier, true, &messages::IDENTIFIER_EXPECTED, &[]);
        }
        if self.token() == SyntaxKind::PrivateIdentifier {
            let name = self.parse_private_identifier();
            if allow_private_identifiers {
                return name;
            }
            return self.create_missing_node(SyntaxKind::Identifier, true, &messages::IDENTIFIER_EXPECTED, &[]);
        }
        if allow_identifier_names {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        }
    }

    fn is_start_of_optional_property_or_element_access_chain(&mut self) -> bool {
        self.token() == SyntaxKind::QuestionDotToken
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_or_open_bracket_or_template)
    }

    pub(crate) fn parse_member_expression_rest(&mut self, pos: u32, mut expression: NodeId, allow_optional_chain: bool) -> NodeId {
        loop {
            let mut question_dot = None;
            let is_property_access = if allow_optional_chain && self.is_start_of_optional_property_or_element_access_chain() {
                question_dot = Some(self.parse_expected_token(SyntaxKind::QuestionDotToken));
                self.is_identifier_or_keyword()
            } else {
                self.parse_optional(SyntaxKind::DotToken)
            };

            if is_property_access {
                expression = self.parse_property_access_expression_rest(pos, expression, question_dot);
                continue;
            }

            // Inside a decorator `@dec [x]` is a decorated computed name.
            if (question_dot.is_some() || !self.context.in_decorator())
                && self.parse_optional(SyntaxKind::OpenBracketToken)
            {
                expression = self.parse_element_access_expression_rest(pos, expression, question_dot);
                continue;
            }

            if self.is_template_start_of_tagged_template() {
                let (tag, type_arguments) = if question_dot.is_none() {
                    self.split_expression_with_type_arguments(expression)
                } else {
                    (expression, None)
                };
                expression = self.parse_tagged_template_rest(pos, tag, question_dot, type_arguments);
                continue;
            }

            if question_dot.is_none() {
                if self.token() == SyntaxKind::ExclamationToken && !self.has_preceding_line_break() {
                    self.next_token();
                    expression = self.finish_node(SyntaxKind::NonNullExpression, pos, slots![expression]);
                    continue;
                }
                if let Some(type_arguments) = self.try_parse(Self::parse_type_arguments_in_expression) {
                    expression = self.finish_node(
                        SyntaxKind::ExpressionWithTypeArguments,
                        pos,
                        slots![expression, type_arguments],
                    );
                    continue;
                }
            }

            return expression;
        }
    }

    /// Unwrap an instantiation expression so its type arguments can move
    /// onto the call, `new` or tagged template that follows.
    fn split_expression_with_type_arguments(&self, expression: NodeId) -> (NodeId, Option<ListId>) {
        let node = self.arena.node(expression);
        if node.kind != SyntaxKind::ExpressionWithTypeArguments {
            return (expression, None);
        }
        match node.child_node(0) {
            Some(inner) => (inner, node.child_list(1)),
            None => (expression, None),
        }
    }

    fn parse_property_access_expression_rest(&mut self, pos: u32, expression: NodeId, question_dot: Option<NodeId>) -> NodeId {
        let name = self.parse_right_side_of_dot(true, true);
        let flags = self.optional_chain_flags(expression, question_dot);
        self.finish_node_with_flags(
            SyntaxKind::PropertyAccessExpression,
            pos,
            flags,
            slots![expression, question_dot, name],
        )
    }

    fn parse_element_access_expression_rest(&mut self, pos: u32, expression: NodeId, question_dot: Option<NodeId>) -> NodeId {
        let argument = if self.token() == SyntaxKind::CloseBracketToken {
            self.create_missing_node(
                SyntaxKind::Identifier,
                true,
                &messages::AN_ELEMENT_ACCESS_EXPRESSION_SHOULD_TAKE_AN_ARGUMENT,
                &[],
            )
        } else {
            self.allow_in(Self::parse_expression)
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let flags = self.optional_chain_flags(expression, question_dot);
        self.finish_node_with_flags(
            SyntaxKind::ElementAccessExpression,
            pos,
            flags,
            slots![expression, question_dot, argument],
        )
    }

    fn parse_tagged_template_rest(
        &mut self,
        pos: u32,
        tag: NodeId,
        question_dot: Option<NodeId>,
        type_arguments: Option<ListId>,
    ) -> NodeId {
        let template_start = self.token_pos();
        let template = if self.token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            self.re_scan_template_token(true);
            self.parse_literal_node()
        } else {
            self.parse_template_expression(true)
        };
        let in_optional_chain =
            question_dot.is_some() || self.arena.node(tag).flags.contains(NodeFlags::OPTIONAL_CHAIN);
        let mut flags = NodeFlags::NONE;
        if in_optional_chain {
            let range = TextRange::new(template_start, self.arena.node(template).end());
            self.parse_error_at_range(
                range,
                &messages::TAGGED_TEMPLATE_EXPRESSIONS_ARE_NOT_PERMITTED_IN_AN_OPTIONAL_CHAIN,
                &[],
            );
            flags = NodeFlags::OPTIONAL_CHAIN;
        }
        self.finish_node_with_flags(
            SyntaxKind::TaggedTemplateExpression,
            pos,
            flags,
            slots![tag, type_arguments, template],
        )
    }

    pub(crate) fn parse_call_expression_rest(&mut self, pos: u32, mut expression: NodeId) -> NodeId {
        loop {
            expression = self.parse_member_expression_rest(pos, expression, true);

            let mut type_arguments = None;
            let question_dot = self.parse_optional_token(SyntaxKind::QuestionDotToken);
            if question_dot.is_some() {
                type_arguments = self.try_parse(Self::parse_type_arguments_in_expression);
                if self.is_template_start_of_tagged_template() {
                    expression = self.parse_tagged_template_rest(pos, expression, question_dot, type_arguments);
                    continue;
                }
            }

            if type_arguments.is_some() || self.token() == SyntaxKind::OpenParenToken {
                if question_dot.is_none() {
                    let (callee, absorbed) = self.split_expression_with_type_arguments(expression);
                    if absorbed.is_some() {
                        expression = callee;
                        type_arguments = absorbed;
                    }
                }
                let arguments = self.parse_argument_list();
                let flags = self.optional_chain_flags(expression, question_dot);
                expression = self.finish_node_with_flags(
                    SyntaxKind::CallExpression,
                    pos,
                    flags,
                    slots![expression, question_dot, type_arguments, arguments],
                );
                continue;
            }

            if let Some(question_dot) = question_dot {
                // `a?.` with nothing usable after it.
                let name = self.create_missing_node(SyntaxKind::Identifier, false, &messages::IDENTIFIER_EXPECTED, &[]);
                expression = self.finish_node_with_flags(
                    SyntaxKind::PropertyAccessExpression,
                    pos,
                    NodeFlags::OPTIONAL_CHAIN,
                    slots![expression, question_dot, name],
                );
            }
            return expression;
        }
    }

    fn optional_chain_flags(&mut self, expression: NodeId, question_dot: Option<NodeId>) -> NodeFlags {
        if question_dot.is_some() || self.try_reparse_optional_chain(expression) {
            NodeFlags::OPTIONAL_CHAIN
        } else {
            NodeFlags::NONE
        }
    }

    /// Whether `expression` belongs to an optional chain. `a?.b!` is a
    /// non-null assertion inside the chain, so the assertions between the
    /// chain and the current access are re-flagged.
    fn try_reparse_optional_chain(&mut self, expression: NodeId) -> bool {
        let node = self.arena.node(expression);
        if node.flags.contains(NodeFlags::OPTIONAL_CHAIN) {
            return true;
        }
        if node.kind != SyntaxKind::NonNullExpression {
            return false;
        }

        let mut inner = node.child_node(0);
        while let Some(id) = inner {
            let node = self.arena.node(id);
            if node.kind != SyntaxKind::NonNullExpression || node.flags.contains(NodeFlags::OPTIONAL_CHAIN) {
                break;
            }
            inner = node.child_node(0);
        }
        if !inner.is_some_and(|id| self.arena.node(id).flags.contains(NodeFlags::OPTIONAL_CHAIN)) {
            return false;
        }

        let mut current = Some(expression);
        while let Some(id) = current.filter(|&id| self.arena.kind(id) == SyntaxKind::NonNullExpression) {
            let node = self.arena.node_mut(id);
            node.flags |= NodeFlags::OPTIONAL_CHAIN;
            current = node.child_node(0);
        }
        true
    }

    pub(crate) fn parse_argument_list(&mut self) -> ListId {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let arguments = self.parse_delimited_list(ParsingContext::ArgumentExpressions, Self::parse_argument_expression, false);
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_argument_expression(&mut self) -> NodeId {
        let context = self
            .context
            .without(NodeFlags::DISALLOW_IN_CONTEXT | NodeFlags::DECORATOR_CONTEXT);
        self.with_context(context, Self::parse_argument_or_array_literal_element)
    }

    fn parse_argument_or_array_literal_element(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::DotDotDotToken => self.parse_spread_element(),
            SyntaxKind::CommaToken => {
                let pos = self.node_pos();
                self.finish_node(SyntaxKind::OmittedExpression, pos, &[])
            }
            _ => self.parse_assignment_expression_or_higher(true),
        }
    }

    fn parse_spread_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.parse_assignment_expression_or_higher(true);
        self.finish_node(SyntaxKind::SpreadElement, pos, slots![expression])
    }

    /// `f<T>(x)` and `f<T>` as an instantiation expression. Fails (for the
    /// caller to roll back) unless what follows `>` confirms the reading.
    fn parse_type_arguments_in_expression(&mut self) -> Option<ListId> {
        if self.context.is_javascript_file() {
            return None;
        }
        if self.re_scan_less_than_token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let type_arguments = self.parse_delimited_list(ParsingContext::TypeArguments, Self::parse_type, false);
        if self.re_scan_greater_token() != SyntaxKind::GreaterThanToken {
            return None;
        }
        self.next_token();
        self.can_follow_type_arguments_in_expression().then_some(type_arguments)
    }

    fn can_follow_type_arguments_in_expression(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => true,
            // `a < b > c` and `a < b > -c` stay comparisons.
            SyntaxKind::LessThanToken | SyntaxKind::GreaterThanToken | SyntaxKind::PlusToken | SyntaxKind::MinusToken => {
                false
            }
            _ => self.has_preceding_line_break() || self.is_binary_operator() || !self.is_start_of_expression(),
        }
    }

    fn parse_new_expression_or_new_dot_target(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.next_token_is(|p| p.token() == SyntaxKind::DotToken) {
            let keyword = self.parse_token_node();
            self.parse_expected(SyntaxKind::DotToken);
            let name = self.parse_identifier_name();
            return self.finish_node(SyntaxKind::MetaProperty, pos, slots![keyword, name]);
        }
        self.parse_expected(SyntaxKind::NewKeyword);

        let expression_pos = self.node_pos();
        let expression_start = self.token_pos();
        let primary = self.parse_primary_expression();
        let member = self.parse_member_expression_rest(expression_pos, primary, false);
        let (expression, type_arguments) = self.split_expression_with_type_arguments(member);

        if self.token() == SyntaxKind::QuestionDotToken {
            let end = self.arena.node(expression).end();
            let text = self.scanner.slice(expression_start as usize, end as usize);
            self.parse_error_at_current_token(&messages::INVALID_OPTIONAL_CHAIN_FROM_NEW_EXPRESSION, &[&text]);
        }
        let arguments = if self.token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.finish_node(SyntaxKind::NewExpression, pos, slots![expression, type_arguments, arguments])
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                self.report_invalid_template_escapes();
                self.parse_literal_node()
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral => {
                self.parse_literal_node()
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_token_node(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal_expression(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal_expression(),
            SyntaxKind::AsyncKeyword if self.look_ahead(Self::next_token_is_function_keyword_on_same_line) => {
                self.parse_function_expression()
            }
            SyntaxKind::AtToken => self.parse_decorated_expression(),
            SyntaxKind::ClassKeyword => {
                let pos = self.node_pos();
                self.parse_class_declaration_or_expression(pos, None, SyntaxKind::ClassExpression)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::NewKeyword => self.parse_new_expression_or_new_dot_target(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
                if self.re_scan_slash_token() == SyntaxKind::RegularExpressionLiteral =>
            {
                self.parse_literal_node()
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(false),
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            _ => self.parse_identifier_with_message(&messages::EXPRESSION_EXPECTED),
        }
    }

    pub(crate) fn parse_literal_node(&mut self) -> NodeId {
        self.parse_text_node(self.token())
    }

    fn parse_parenthesized_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(SyntaxKind::ParenthesizedExpression, pos, slots![expression])
    }

    fn parse_array_literal_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected(SyntaxKind::OpenBracketToken);
        let elements = self.parse_delimited_list(
            ParsingContext::ArrayLiteralMembers,
            Self::parse_argument_or_array_literal_element,
            false,
        );
        self.parse_expected_matching_brackets(
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            open_parsed,
            open_pos,
        );
        self.finish_node(SyntaxKind::ArrayLiteralExpression, pos, slots![elements])
    }

    fn parse_object_literal_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected(SyntaxKind::OpenBraceToken);
        let properties =
            self.parse_delimited_list(ParsingContext::ObjectLiteralMembers, Self::parse_object_literal_element, true);
        self.parse_expected_matching_brackets(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken, open_parsed, open_pos);
        self.finish_node(SyntaxKind::ObjectLiteralExpression, pos, slots![properties])
    }

    fn parse_object_literal_element(&mut self) -> NodeId {
        let pos = self.node_pos();

        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher(true);
            return self.finish_node(SyntaxKind::SpreadAssignment, pos, slots![expression]);
        }

        let modifiers = self.parse_modifiers(true, false, false);
        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, modifiers, SyntaxKind::GetAccessor);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, modifiers, SyntaxKind::SetAccessor);
        }

        let asterisk = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let token_is_identifier = self.is_identifier();
        let name = self.parse_property_name();
        let question = self.parse_optional_token(SyntaxKind::QuestionToken);
        // `{ a!: 1 }` is invalid but parsed.
        self.parse_optional(SyntaxKind::ExclamationToken);

        if asterisk.is_some() || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_method_declaration(pos, modifiers, asterisk, name, question);
        }

        // `{ a }` and `{ a = 1 }`; the latter is only valid as a
        // destructuring target.
        if token_is_identifier && self.token() != SyntaxKind::ColonToken {
            let equals = self.parse_optional_token(SyntaxKind::EqualsToken);
            let initializer = match equals {
                Some(_) => Some(self.allow_in(|p| p.parse_assignment_expression_or_higher(true))),
                None => None,
            };
            return self.finish_node(
                SyntaxKind::ShorthandPropertyAssignment,
                pos,
                slots![modifiers, name, question, equals, initializer],
            );
        }

        self.parse_expected(SyntaxKind::ColonToken);
        let initializer = self.allow_in(|p| p.parse_assignment_expression_or_higher(true));
        self.finish_node(
            SyntaxKind::PropertyAssignment,
            pos,
            slots![modifiers, name, question, initializer],
        )
    }

    pub(crate) fn parse_property_name(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_literal_node()
            }
            SyntaxKind::OpenBracketToken => self.parse_computed_property_name(),
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            _ => self.parse_identifier_name(),
        }
    }

    pub(crate) fn parse_computed_property_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let expression = self.allow_in(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(SyntaxKind::ComputedPropertyName, pos, slots![expression])
    }

    fn parse_function_expression(&mut self) -> NodeId {
        self.outside_decorator_context(|p| {
            let pos = p.node_pos();
            let modifiers = p.parse_modifiers(false, false, false);
            p.parse_expected(SyntaxKind::FunctionKeyword);
            let asterisk = p.parse_optional_token(SyntaxKind::AsteriskToken);
            let is_generator = asterisk.is_some();
            let is_async = p.modifiers_contain(modifiers, SyntaxKind::AsyncKeyword);
            let name = p.in_function_context(is_generator, is_async, Self::parse_optional_binding_identifier);
            let type_parameters = p.parse_type_parameters();
            let parameters = p.parse_parameters(is_generator, is_async);
            let return_type = p.parse_return_type(SyntaxKind::ColonToken, false);
            let body = p.parse_function_block(is_generator, is_async, false);
            p.finish_node(
                SyntaxKind::FunctionExpression,
                pos,
                slots![modifiers, asterisk, name, type_parameters, parameters, return_type, body],
            )
        })
    }

    /// Decorators in expression position must decorate a class expression.
    fn parse_decorated_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers(true, false, false);
        if self.token() == SyntaxKind::ClassKeyword {
            return self.parse_class_declaration_or_expression(pos, modifiers, SyntaxKind::ClassExpression);
        }
        self.parse_error_at_position(self.node_pos(), 0, &messages::EXPRESSION_EXPECTED, &[]);
        self.finish_node(SyntaxKind::MissingDeclaration, pos, slots![modifiers])
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// The initial scan of a template piece never reports bad escapes,
    /// since tagged templates allow them. Untagged pieces are rescanned to
    /// surface the errors.
    fn report_invalid_template_escapes(&mut self) {
        let flags = self.scanner.token_flags();
        if flags.contains(TokenFlags::CONTAINS_INVALID_ESCAPE) && !flags.contains(TokenFlags::UNTERMINATED) {
            self.re_scan_template_token(false);
        }
    }

    pub(crate) fn parse_template_expression(&mut self, is_tagged: bool) -> NodeId {
        let pos = self.node_pos();
        let head = self.parse_template_head(is_tagged);
        let spans = self.parse_template_spans(is_tagged);
        self.finish_node(SyntaxKind::TemplateExpression, pos, slots![head, spans])
    }

    pub(crate) fn parse_template_head(&mut self, is_tagged: bool) -> NodeId {
        if !is_tagged {
            self.report_invalid_template_escapes();
        }
        debug_assert_eq!(self.token(), SyntaxKind::TemplateHead);
        self.parse_literal_node()
    }

    fn parse_template_spans(&mut self, is_tagged: bool) -> ListId {
        let pos = self.node_pos();
        let mut spans = Vec::new();
        loop {
            let span = self.parse_template_span(is_tagged);
            let literal = self.arena.node(span).child_node(1);
            spans.push(span);
            if !literal.is_some_and(|l| self.arena.kind(l) == SyntaxKind::TemplateMiddle) {
                break;
            }
        }
        self.create_list(pos, spans, false)
    }

    fn parse_template_span(&mut self, is_tagged: bool) -> NodeId {
        let pos = self.node_pos();
        let expression = self.allow_in(Self::parse_expression);
        let literal = self.parse_literal_of_template_span(is_tagged);
        self.finish_node(SyntaxKind::TemplateSpan, pos, slots![expression, literal])
    }

    /// The `}` closing a substitution is rescanned as the next template
    /// piece: a middle or the tail.
    pub(crate) fn parse_literal_of_template_span(&mut self, is_tagged: bool) -> NodeId {
        if self.token() == SyntaxKind::CloseBraceToken {
            self.re_scan_template_token(is_tagged);
            self.parse_literal_node()
        } else {
            self.create_missing_node(SyntaxKind::TemplateTail, false, &messages::_0_EXPECTED, &["}"])
        }
    }
}

#[cfg(test)]
mod tests {
    use tern_ast::{NodeFlags, SourceFile, SyntaxKind};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse(text: &str) -> SourceFile {
        Parser::new("test.ts", text, ParseOptions::default()).parse_source_file()
    }

    /// The expression of the first statement.
    fn expression(file: &SourceFile) -> tern_ast::NodeId {
        let statement = file.statements()[0];
        assert_eq!(file.arena.kind(statement), SyntaxKind::ExpressionStatement);
        file.arena.node(statement).child_node(0).unwrap()
    }

    fn child(file: &SourceFile, id: tern_ast::NodeId, slot: usize) -> tern_ast::NodeId {
        file.arena.node(id).child_node(slot).unwrap()
    }

    fn kind(file: &SourceFile, id: tern_ast::NodeId) -> SyntaxKind {
        file.arena.kind(id)
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let file = parse("a + b * c;");
        assert!(file.diagnostics.is_empty());
        let sum = expression(&file);
        assert_eq!(kind(&file, sum), SyntaxKind::BinaryExpression);
        assert_eq!(kind(&file, child(&file, sum, 1)), SyntaxKind::PlusToken);
        let product = child(&file, sum, 2);
        assert_eq!(kind(&file, product), SyntaxKind::BinaryExpression);
        assert_eq!(kind(&file, child(&file, product, 1)), SyntaxKind::AsteriskToken);
    }

    #[test]
    fn test_exponentiation_is_right_associative() {
        let file = parse("a ** b ** c;");
        let outer = expression(&file);
        assert_eq!(kind(&file, child(&file, outer, 0)), SyntaxKind::Identifier);
        assert_eq!(kind(&file, child(&file, outer, 2)), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_unary_operand_of_exponentiation_is_an_error() {
        let file = parse("-x ** 2;");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].code, 17006);
        assert_eq!(file.diagnostics[0].start(), 0);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let file = parse("a = b = c;");
        let outer = expression(&file);
        assert_eq!(kind(&file, child(&file, outer, 1)), SyntaxKind::EqualsToken);
        assert_eq!(kind(&file, child(&file, outer, 2)), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_shift_assignment_is_rescanned() {
        let file = parse("a >>= 1;");
        assert!(file.diagnostics.is_empty());
        let assignment = expression(&file);
        assert_eq!(
            kind(&file, child(&file, assignment, 1)),
            SyntaxKind::GreaterThanGreaterThanEqualsToken
        );
    }

    #[test]
    fn test_simple_arrow_function() {
        let file = parse("x => x + 1;");
        let arrow = expression(&file);
        assert_eq!(kind(&file, arrow), SyntaxKind::ArrowFunction);
        let parameters = file.arena.elements(file.arena.node(arrow).child_list(2));
        assert_eq!(parameters.len(), 1);
        assert_eq!(kind(&file, parameters[0]), SyntaxKind::Parameter);
        assert_eq!(file.arena.node(parameters[0]).range, file.arena.node(child(&file, parameters[0], 2)).range);
    }

    #[test]
    fn test_async_simple_arrow_function() {
        let file = parse("async x => await x;");
        let arrow = expression(&file);
        assert_eq!(kind(&file, arrow), SyntaxKind::ArrowFunction);
        let modifiers = file.arena.elements(file.arena.node(arrow).child_list(0));
        assert_eq!(kind(&file, modifiers[0]), SyntaxKind::AsyncKeyword);
        assert_eq!(kind(&file, child(&file, arrow, 5)), SyntaxKind::AwaitExpression);
    }

    #[test]
    fn test_parenthesized_arrow_function() {
        let file = parse("(a, b) => { return a; };");
        assert!(file.diagnostics.is_empty());
        let arrow = expression(&file);
        assert_eq!(kind(&file, arrow), SyntaxKind::ArrowFunction);
        assert_eq!(file.arena.elements(file.arena.node(arrow).child_list(2)).len(), 2);
        assert_eq!(kind(&file, child(&file, arrow, 5)), SyntaxKind::Block);
    }

    #[test]
    fn test_parenthesized_expression_is_not_an_arrow() {
        let file = parse("(a, b);");
        assert!(file.diagnostics.is_empty());
        let parenthesized = expression(&file);
        assert_eq!(kind(&file, parenthesized), SyntaxKind::ParenthesizedExpression);
        assert_eq!(kind(&file, child(&file, parenthesized, 0)), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_conditional_keeps_its_colon() {
        let file = parse("a ? (b) : c;");
        assert!(file.diagnostics.is_empty());
        let conditional = expression(&file);
        assert_eq!(kind(&file, conditional), SyntaxKind::ConditionalExpression);
        assert_eq!(kind(&file, child(&file, conditional, 2)), SyntaxKind::ParenthesizedExpression);
        assert_eq!(kind(&file, child(&file, conditional, 4)), SyntaxKind::Identifier);
    }

    #[test]
    fn test_conditional_with_arrow_in_false_branch() {
        let file = parse("a ? (b) : c => d;");
        assert!(file.diagnostics.is_empty());
        let conditional = expression(&file);
        assert_eq!(kind(&file, conditional), SyntaxKind::ConditionalExpression);
        assert_eq!(kind(&file, child(&file, conditional, 2)), SyntaxKind::ParenthesizedExpression);
        assert_eq!(kind(&file, child(&file, conditional, 4)), SyntaxKind::ArrowFunction);
    }

    #[test]
    fn test_optional_chain_flags() {
        let file = parse("a?.b.c();");
        assert!(file.diagnostics.is_empty());
        let call = expression(&file);
        assert_eq!(kind(&file, call), SyntaxKind::CallExpression);
        assert!(file.arena.node(call).flags.contains(NodeFlags::OPTIONAL_CHAIN));
        let callee = child(&file, call, 0);
        assert!(file.arena.node(callee).flags.contains(NodeFlags::OPTIONAL_CHAIN));

        let file = parse("a.b();");
        assert!(!file.arena.node(expression(&file)).flags.contains(NodeFlags::OPTIONAL_CHAIN));
    }

    #[test]
    fn test_generic_call_and_comparison() {
        let file = parse("f<T>(x);");
        let call = expression(&file);
        assert_eq!(kind(&file, call), SyntaxKind::CallExpression);
        assert_eq!(file.arena.elements(file.arena.node(call).child_list(2)).len(), 1);

        let file = parse("a < b > c;");
        assert!(file.diagnostics.is_empty());
        let comparison = expression(&file);
        assert_eq!(kind(&file, comparison), SyntaxKind::BinaryExpression);
        assert_eq!(kind(&file, child(&file, comparison, 1)), SyntaxKind::GreaterThanToken);
    }

    #[test]
    fn test_new_expression_takes_type_arguments() {
        let file = parse("new Map<string, number>();");
        assert!(file.diagnostics.is_empty());
        let new = expression(&file);
        assert_eq!(kind(&file, new), SyntaxKind::NewExpression);
        assert_eq!(kind(&file, child(&file, new, 0)), SyntaxKind::Identifier);
        assert_eq!(file.arena.elements(file.arena.node(new).child_list(1)).len(), 2);
    }

    #[test]
    fn test_tagged_template() {
        let file = parse("tag`a${b}c`;");
        assert!(file.diagnostics.is_empty());
        let tagged = expression(&file);
        assert_eq!(kind(&file, tagged), SyntaxKind::TaggedTemplateExpression);
        let template = child(&file, tagged, 2);
        assert_eq!(kind(&file, template), SyntaxKind::TemplateExpression);
        let spans = file.arena.elements(file.arena.node(template).child_list(1));
        assert_eq!(spans.len(), 1);
        assert_eq!(kind(&file, child(&file, spans[0], 1)), SyntaxKind::TemplateTail);
    }

    #[test]
    fn test_invalid_escape_only_reported_when_untagged() {
        let file = parse("`\\xZ`;");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].message_text, "Hexadecimal digit expected.");

        let file = parse("tag`\\xZ`;");
        assert!(file.diagnostics.is_empty());
    }

    #[test]
    fn test_regular_expression_literal() {
        let file = parse("x = /ab+c/g;");
        let assignment = expression(&file);
        let regex = child(&file, assignment, 2);
        assert_eq!(kind(&file, regex), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(file.arena.text_of(regex), Some("/ab+c/g"));
    }

    #[test]
    fn test_object_literal_members() {
        let file = parse("({ a, b: 1, ...c, m() {}, get x() { return 1; } });");
        assert!(file.diagnostics.is_empty());
        let object = child(&file, expression(&file), 0);
        let kinds: Vec<_> = file
            .arena
            .elements(file.arena.node(object).child_list(0))
            .iter()
            .map(|&id| kind(&file, id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ShorthandPropertyAssignment,
                SyntaxKind::PropertyAssignment,
                SyntaxKind::SpreadAssignment,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::GetAccessor,
            ]
        );
    }

    #[test]
    fn test_yield_outside_generator_is_an_identifier() {
        let file = parse("yield;");
        assert_eq!(kind(&file, expression(&file)), SyntaxKind::Identifier);
    }

    #[test]
    fn test_missing_operand_reports_expression_expected() {
        let file = parse("a + ;");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].message_text, "Expression expected.");
        let sum = expression(&file);
        assert!(file.arena.node(child(&file, sum, 2)).is_missing());
    }

    #[test]
    fn test_import_meta_marks_module() {
        let file = parse("const url = import.meta.url;");
        assert!(file.diagnostics.is_empty());
        assert!(file.external_module_indicator.is_some());
    }
}
