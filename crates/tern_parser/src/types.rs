//! Type annotations.

use tern_ast::{ListId, Node, NodeFlags, NodeId, SyntaxKind};
use tern_diagnostics::{messages, DiagnosticMessage};

use crate::list::ParsingContext;
use crate::parser::{slots, Parser};

impl Parser {
    // ========================================================================
    // Entry points
    // ========================================================================

    /// A full type, including function types and conditional types.
    pub(crate) fn parse_type(&mut self) -> NodeId {
        // Types never see the yield/await context of the code around them.
        let context = self.context.without(NodeFlags::YIELD_CONTEXT | NodeFlags::AWAIT_CONTEXT);
        self.with_context(context, |p| p.guarded(SyntaxKind::TypeReference, Self::parse_type_worker))
    }

    fn parse_type_worker(&mut self) -> NodeId {
        if self.is_start_of_function_type_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        let pos = self.node_pos();
        let ty = self.parse_union_type_or_higher();
        if self.context.in_disallow_conditional_types()
            || self.has_preceding_line_break()
            || !self.parse_optional(SyntaxKind::ExtendsKeyword)
        {
            return ty;
        }
        let extends_type = self.disallow_conditional_types(Self::parse_type);
        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.allow_conditional_types(Self::parse_type);
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.allow_conditional_types(Self::parse_type);
        self.finish_node(
            SyntaxKind::ConditionalType,
            pos,
            slots![ty, extends_type, true_type, false_type],
        )
    }

    pub(crate) fn parse_type_annotation(&mut self) -> Option<NodeId> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type())
        } else {
            None
        }
    }

    /// The return type after `return_token` (`:` for signatures, `=>` for
    /// function types). In type position a `=>` where `:` belongs is
    /// reported and accepted.
    pub(crate) fn parse_return_type(&mut self, return_token: SyntaxKind, is_type: bool) -> Option<NodeId> {
        if self.should_parse_return_type(return_token, is_type) {
            Some(self.parse_type_or_type_predicate())
        } else {
            None
        }
    }

    fn should_parse_return_type(&mut self, return_token: SyntaxKind, is_type: bool) -> bool {
        if return_token == SyntaxKind::EqualsGreaterThanToken {
            self.parse_expected(return_token);
            return true;
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            return true;
        }
        if is_type && self.token() == SyntaxKind::EqualsGreaterThanToken {
            self.parse_error_at_current_token(&messages::_0_EXPECTED, &[":"]);
            self.next_token();
            return true;
        }
        false
    }

    /// `x is T`, `asserts x is T` or a plain type.
    fn parse_type_or_type_predicate(&mut self) -> NodeId {
        let pos = self.node_pos();
        let parameter_name = if self.is_identifier() {
            self.try_parse(Self::parse_type_predicate_prefix)
        } else {
            None
        };
        let ty = self.parse_type();
        match parameter_name {
            Some(name) => self.finish_node(SyntaxKind::TypePredicate, pos, slots![None::<NodeId>, name, ty]),
            None => ty,
        }
    }

    fn parse_type_predicate_prefix(&mut self) -> Option<NodeId> {
        let name = self.parse_identifier();
        if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
            self.next_token();
            Some(name)
        } else {
            None
        }
    }

    fn parse_asserts_type_predicate(&mut self) -> NodeId {
        let pos = self.node_pos();
        let asserts = self.parse_expected_token(SyntaxKind::AssertsKeyword);
        let parameter_name = if self.token() == SyntaxKind::ThisKeyword {
            self.parse_this_type_node()
        } else {
            self.parse_identifier()
        };
        let ty = if self.parse_optional(SyntaxKind::IsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        self.finish_node(SyntaxKind::TypePredicate, pos, slots![asserts, parameter_name, ty])
    }

    // ========================================================================
    // Type parameters and arguments
    // ========================================================================

    pub(crate) fn parse_type_parameters(&mut self) -> Option<ListId> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        Some(self.parse_bracketed_list(
            ParsingContext::TypeParameters,
            Self::parse_type_parameter,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
        ))
    }

    fn parse_type_parameter(&mut self) -> NodeId {
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers(false, true, false);
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_type())
        } else {
            None
        };
        self.finish_node(SyntaxKind::TypeParameter, pos, slots![modifiers, name, constraint, default])
    }

    /// `<...>` directly after a type name on the same line.
    fn parse_type_arguments_of_type_reference(&mut self) -> Option<ListId> {
        if self.has_preceding_line_break() || self.re_scan_less_than_token() != SyntaxKind::LessThanToken {
            return None;
        }
        Some(self.parse_bracketed_list(
            ParsingContext::TypeArguments,
            Self::parse_type,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
        ))
    }

    // ========================================================================
    // Union, intersection and operators
    // ========================================================================

    fn parse_union_type_or_higher(&mut self) -> NodeId {
        self.parse_union_or_intersection_type(SyntaxKind::BarToken, Self::parse_intersection_type_or_higher)
    }

    fn parse_intersection_type_or_higher(&mut self) -> NodeId {
        self.parse_union_or_intersection_type(SyntaxKind::AmpersandToken, Self::parse_type_operator_or_higher)
    }

    /// A leading operator is allowed: `| A | B`.
    fn parse_union_or_intersection_type(&mut self, operator: SyntaxKind, parse_constituent: fn(&mut Self) -> NodeId) -> NodeId {
        let pos = self.node_pos();
        let has_leading_operator = self.parse_optional(operator);
        let leading = if has_leading_operator {
            self.parse_function_or_constructor_type_to_error(operator)
        } else {
            None
        };
        let first = match leading {
            Some(ty) => ty,
            None => parse_constituent(self),
        };

        if self.token() != operator && !has_leading_operator {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(operator) {
            let ty = match self.parse_function_or_constructor_type_to_error(operator) {
                Some(ty) => ty,
                None => parse_constituent(self),
            };
            types.push(ty);
        }
        let list = self.create_list(pos, types, false);
        let kind = if operator == SyntaxKind::BarToken {
            SyntaxKind::UnionType
        } else {
            SyntaxKind::IntersectionType
        };
        self.finish_node(kind, pos, slots![list])
    }

    /// `A | () => B` parses the function type but reports that it needs
    /// parentheses.
    fn parse_function_or_constructor_type_to_error(&mut self, operator: SyntaxKind) -> Option<NodeId> {
        if !self.is_start_of_function_type_or_constructor_type() {
            return None;
        }
        let start = self.token_pos();
        let ty = self.parse_function_or_constructor_type();
        let is_union = operator == SyntaxKind::BarToken;
        let message: &'static DiagnosticMessage = match (self.arena.kind(ty) == SyntaxKind::FunctionType, is_union) {
            (true, true) => &messages::FUNCTION_TYPE_NOTATION_MUST_BE_PARENTHESIZED_WHEN_USED_IN_A_UNION_TYPE,
            (true, false) => &messages::FUNCTION_TYPE_NOTATION_MUST_BE_PARENTHESIZED_WHEN_USED_IN_AN_INTERSECTION_TYPE,
            (false, true) => &messages::CONSTRUCTOR_TYPE_NOTATION_MUST_BE_PARENTHESIZED_WHEN_USED_IN_A_UNION_TYPE,
            (false, false) => {
                &messages::CONSTRUCTOR_TYPE_NOTATION_MUST_BE_PARENTHESIZED_WHEN_USED_IN_AN_INTERSECTION_TYPE
            }
        };
        let end = self.arena.node(ty).end();
        self.parse_error_at_position(start, end - start, message, &[]);
        Some(ty)
    }

    fn parse_type_operator_or_higher(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let pos = self.node_pos();
                let operator = self.parse_token_node();
                let ty = self.parse_type_operator_or_higher();
                self.finish_node(SyntaxKind::TypeOperator, pos, slots![operator, ty])
            }
            SyntaxKind::InferKeyword => self.parse_infer_type(),
            _ => self.allow_conditional_types(Self::parse_postfix_type_or_higher),
        }
    }

    fn parse_infer_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::InferKeyword);
        let parameter_pos = self.node_pos();
        let name = self.parse_identifier();
        let constraint = self.try_parse(Self::try_parse_constraint_of_infer_type);
        let parameter = self.finish_node(
            SyntaxKind::TypeParameter,
            parameter_pos,
            slots![None::<ListId>, name, constraint, None::<NodeId>],
        );
        self.finish_node(SyntaxKind::InferType, pos, slots![parameter])
    }

    /// `infer U extends X ? A : B` is a conditional on `infer U`, not a
    /// constrained `infer`.
    fn try_parse_constraint_of_infer_type(&mut self) -> Option<NodeId> {
        if !self.parse_optional(SyntaxKind::ExtendsKeyword) {
            return None;
        }
        let constraint = self.disallow_conditional_types(Self::parse_type);
        if self.context.in_disallow_conditional_types() || self.token() != SyntaxKind::QuestionToken {
            Some(constraint)
        } else {
            None
        }
    }

    // ========================================================================
    // Postfix and primary types
    // ========================================================================

    fn parse_postfix_type_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut ty = self.parse_non_array_type();
        while !self.has_preceding_line_break() {
            match self.token() {
                SyntaxKind::ExclamationToken => {
                    self.next_token();
                    ty = self.finish_node(SyntaxKind::JSDocNonNullableType, pos, slots![ty]);
                }
                SyntaxKind::QuestionToken => {
                    // `A extends B ? C : D`: the `?` belongs to the conditional.
                    if self.look_ahead(Self::next_token_is_start_of_type) {
                        return ty;
                    }
                    self.next_token();
                    ty = self.finish_node(SyntaxKind::JSDocNullableType, pos, slots![ty]);
                }
                SyntaxKind::OpenBracketToken => {
                    self.parse_expected(SyntaxKind::OpenBracketToken);
                    if self.is_start_of_type(false) {
                        let index = self.parse_type();
                        self.parse_expected(SyntaxKind::CloseBracketToken);
                        ty = self.finish_node(SyntaxKind::IndexedAccessType, pos, slots![ty, index]);
                    } else {
                        self.parse_expected(SyntaxKind::CloseBracketToken);
                        ty = self.finish_node(SyntaxKind::ArrayType, pos, slots![ty]);
                    }
                }
                _ => return ty,
            }
        }
        ty
    }

    fn parse_non_array_type(&mut self) -> NodeId {
        match self.token() {
            token if token.is_type_keyword() && token != SyntaxKind::VoidKeyword => {
                // `string.x` is a qualified name, not the keyword type.
                match self.try_parse(Self::parse_keyword_and_no_dot) {
                    Some(keyword) => keyword,
                    None => self.parse_type_reference(),
                }
            }
            SyntaxKind::VoidKeyword => self.parse_token_node(),
            SyntaxKind::AsteriskToken => self.parse_jsdoc_all_type(),
            SyntaxKind::QuestionToken => self.parse_jsdoc_unknown_or_nullable_type(),
            SyntaxKind::ExclamationToken => {
                let pos = self.node_pos();
                self.next_token();
                let ty = self.parse_non_array_type();
                self.finish_node(SyntaxKind::JSDocNonNullableType, pos, slots![ty])
            }
            SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => self.parse_literal_type_node(false),
            SyntaxKind::MinusToken => {
                if self.look_ahead(Self::next_token_is_numeric_or_bigint_literal) {
                    self.parse_literal_type_node(true)
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::ThisKeyword => {
                let pos = self.node_pos();
                let this_type = self.parse_this_type_node();
                if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
                    self.next_token();
                    let ty = self.parse_type();
                    self.finish_node(SyntaxKind::TypePredicate, pos, slots![None::<NodeId>, this_type, ty])
                } else {
                    this_type
                }
            }
            SyntaxKind::TypeOfKeyword => {
                if self.look_ahead(Self::is_start_of_type_of_import_type) {
                    self.parse_import_type()
                } else {
                    self.parse_type_query()
                }
            }
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(Self::is_start_of_mapped_type) {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(),
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::AssertsKeyword => {
                if self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line) {
                    self.parse_asserts_type_predicate()
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::TemplateHead => self.parse_template_type(),
            _ => self.parse_type_reference(),
        }
    }

    fn parse_keyword_and_no_dot(&mut self) -> Option<NodeId> {
        let keyword = self.parse_token_node();
        (self.token() != SyntaxKind::DotToken).then_some(keyword)
    }

    fn parse_this_type_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        self.finish_node(SyntaxKind::ThisType, pos, &[])
    }

    /// `"a"`, `1`, `-1`, `true`, `null` and friends as types.
    fn parse_literal_type_node(&mut self, negative: bool) -> NodeId {
        let pos = self.node_pos();
        let literal = if negative {
            let operator = self.parse_token_node();
            let operand = self.parse_literal_node();
            self.finish_node(SyntaxKind::PrefixUnaryExpression, pos, slots![operator, operand])
        } else if matches!(
            self.token(),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword
        ) {
            self.parse_token_node()
        } else {
            self.parse_literal_node()
        };
        self.finish_node(SyntaxKind::LiteralType, pos, slots![literal])
    }

    fn next_token_is_numeric_or_bigint_literal(&mut self) -> bool {
        matches!(self.next_token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)
    }

    fn next_token_is_start_of_type(&mut self) -> bool {
        self.next_token();
        self.is_start_of_type(false)
    }

    fn parse_jsdoc_all_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        self.finish_node(SyntaxKind::JSDocAllType, pos, &[])
    }

    /// `?` alone is the unknown type; `?T` is nullable.
    fn parse_jsdoc_unknown_or_nullable_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        if matches!(
            self.token(),
            SyntaxKind::CommaToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::BarToken
        ) {
            return self.finish_node(SyntaxKind::JSDocUnknownType, pos, &[]);
        }
        let ty = self.parse_type();
        self.finish_node(SyntaxKind::JSDocNullableType, pos, slots![ty])
    }

    fn parse_type_reference(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_entity_name(true, Some(&messages::TYPE_EXPECTED));
        let type_arguments = self.parse_type_arguments_of_type_reference();
        self.finish_node(SyntaxKind::TypeReference, pos, slots![name, type_arguments])
    }

    /// `A.B.C` as a chain of qualified names.
    pub(crate) fn parse_entity_name(
        &mut self,
        allow_reserved_words: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> NodeId {
        let pos = self.node_pos();
        let is_name = if allow_reserved_words {
            self.is_identifier_or_keyword()
        } else {
            self.is_identifier()
        };
        let mut entity = self.create_identifier(is_name, message);
        while self.parse_optional(SyntaxKind::DotToken) {
            // `A.<T>` is an error the caller reports through the type arguments.
            if self.token() == SyntaxKind::LessThanToken {
                break;
            }
            let right = self.parse_right_side_of_dot(allow_reserved_words, false);
            entity = self.finish_node(SyntaxKind::QualifiedName, pos, slots![entity, right]);
        }
        entity
    }

    fn parse_type_query(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        let name = self.parse_entity_name(true, None);
        let type_arguments = self.parse_type_arguments_of_type_reference();
        self.finish_node(SyntaxKind::TypeQuery, pos, slots![name, type_arguments])
    }

    fn is_start_of_type_of_import_type(&mut self) -> bool {
        self.next_token() == SyntaxKind::ImportKeyword
    }

    /// `import("m", { with: { ... } }).A.B<T>`, optionally after `typeof`.
    fn parse_import_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let type_of = self.parse_optional_token(SyntaxKind::TypeOfKeyword);
        self.parse_expected(SyntaxKind::ImportKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let argument = self.parse_type();

        let mut attributes = None;
        if self.parse_optional(SyntaxKind::CommaToken) {
            let open_pos = self.token_pos();
            let open_parsed = self.parse_expected(SyntaxKind::OpenBraceToken);
            let keyword_pos = self.node_pos();
            let keyword = if matches!(self.token(), SyntaxKind::WithKeyword | SyntaxKind::AssertKeyword) {
                self.parse_token_node()
            } else {
                self.create_missing_node(SyntaxKind::WithKeyword, false, &messages::_0_EXPECTED, &["with"])
            };
            self.parse_expected(SyntaxKind::ColonToken);
            attributes = Some(self.parse_import_attributes(keyword_pos, keyword));
            self.parse_optional(SyntaxKind::CommaToken);
            self.parse_expected_matching_brackets(
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                open_parsed,
                open_pos,
            );
        }
        self.parse_expected(SyntaxKind::CloseParenToken);

        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name(true, Some(&messages::TYPE_EXPECTED)))
        } else {
            None
        };
        let type_arguments = self.parse_type_arguments_of_type_reference();
        self.finish_node(
            SyntaxKind::ImportType,
            pos,
            slots![type_of, argument, attributes, qualifier, type_arguments],
        )
    }

    // ========================================================================
    // Object-like types
    // ========================================================================

    fn parse_type_literal(&mut self) -> NodeId {
        let pos = self.node_pos();
        let members = self.parse_object_type_members();
        self.finish_node(SyntaxKind::TypeLiteral, pos, slots![members])
    }

    /// `{ members }` of a type literal or an interface.
    pub(crate) fn parse_object_type_members(&mut self) -> ListId {
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_list(ParsingContext::TypeMembers, Self::parse_type_member);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            self.create_missing_list()
        }
    }

    pub(crate) fn is_type_member_start(&mut self) -> bool {
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::GetKeyword | SyntaxKind::SetKeyword
        ) {
            return true;
        }
        let mut seen_name = false;
        while self.token().is_modifier_kind() {
            seen_name = true;
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        if self.is_literal_property_name() {
            seen_name = true;
            self.next_token();
        }
        seen_name
            && (matches!(
                self.token(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
            ) || self.can_parse_semicolon())
    }

    fn parse_type_member(&mut self) -> NodeId {
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_signature_member(SyntaxKind::CallSignature);
        }
        if self.token() == SyntaxKind::NewKeyword && self.look_ahead(Self::next_token_is_open_paren_or_less_than) {
            return self.parse_signature_member(SyntaxKind::ConstructSignature);
        }
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers(false, false, false);
        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_signature(pos, modifiers, SyntaxKind::GetAccessor);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_signature(pos, modifiers, SyntaxKind::SetAccessor);
        }
        if self.is_index_signature() {
            return self.parse_index_signature_declaration(pos, modifiers);
        }
        self.parse_property_or_method_signature(pos, modifiers)
    }

    fn parse_signature_member(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        if kind == SyntaxKind::ConstructSignature {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(false, false);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, true);
        self.parse_type_member_semicolon();
        self.finish_node(kind, pos, slots![type_parameters, parameters, return_type])
    }

    /// Members are separated by `,` or `;`.
    pub(crate) fn parse_type_member_semicolon(&mut self) {
        if !self.parse_optional(SyntaxKind::CommaToken) {
            self.parse_semicolon();
        }
    }

    pub(crate) fn is_index_signature(&mut self) -> bool {
        self.token() == SyntaxKind::OpenBracketToken && self.look_ahead(Self::is_unambiguously_index_signature)
    }

    /// `[x: K]`, `[x, ...]`, `[...x]`, `[]` or `[public x`: anything but a
    /// computed property name.
    fn is_unambiguously_index_signature(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::DotDotDotToken | SyntaxKind::CloseBracketToken) {
            return true;
        }
        if self.token().is_modifier_kind() {
            self.next_token();
            if self.is_identifier() {
                return true;
            }
        } else if !self.is_identifier() {
            return false;
        } else {
            self.next_token();
        }
        if matches!(self.token(), SyntaxKind::ColonToken | SyntaxKind::CommaToken) {
            return true;
        }
        if self.token() != SyntaxKind::QuestionToken {
            return false;
        }
        self.next_token();
        matches!(
            self.token(),
            SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
        )
    }

    pub(crate) fn parse_index_signature_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let parameters = self.parse_bracketed_list(
            ParsingContext::Parameters,
            Self::parse_parameter,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
        );
        let ty = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        self.finish_node(SyntaxKind::IndexSignature, pos, slots![modifiers, parameters, ty])
    }

    fn parse_property_or_method_signature(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let name = self.parse_property_name();
        let question = self.parse_optional_token(SyntaxKind::QuestionToken);
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters(false, false);
            let return_type = self.parse_return_type(SyntaxKind::ColonToken, true);
            self.parse_type_member_semicolon();
            return self.finish_node(
                SyntaxKind::MethodSignature,
                pos,
                slots![modifiers, name, question, type_parameters, parameters, return_type],
            );
        }
        let ty = self.parse_type_annotation();
        // Initializers are not allowed on signatures; skip over one so the
        // member list stays in sync.
        if self.token() == SyntaxKind::EqualsToken {
            self.parse_initializer();
        }
        self.parse_type_member_semicolon();
        self.finish_node(SyntaxKind::PropertySignature, pos, slots![modifiers, name, question, ty])
    }

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            return self.next_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.token() == SyntaxKind::ReadonlyKeyword {
            self.next_token();
        }
        self.token() == SyntaxKind::OpenBracketToken
            && self.next_token_is_identifier()
            && self.next_token() == SyntaxKind::InKeyword
    }

    /// `{ readonly [K in T as N]?: V }` with `+`/`-` on either modifier.
    fn parse_mapped_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let readonly = if matches!(
            self.token(),
            SyntaxKind::ReadonlyKeyword | SyntaxKind::PlusToken | SyntaxKind::MinusToken
        ) {
            let token = self.parse_token_node();
            if self.arena.kind(token) != SyntaxKind::ReadonlyKeyword {
                self.parse_expected(SyntaxKind::ReadonlyKeyword);
            }
            Some(token)
        } else {
            None
        };

        self.parse_expected(SyntaxKind::OpenBracketToken);
        let parameter_pos = self.node_pos();
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = self.parse_type();
        let parameter = self.finish_node(
            SyntaxKind::TypeParameter,
            parameter_pos,
            slots![None::<ListId>, name, constraint, None::<NodeId>],
        );
        let name_type = if self.parse_optional(SyntaxKind::AsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);

        let question = if matches!(
            self.token(),
            SyntaxKind::QuestionToken | SyntaxKind::PlusToken | SyntaxKind::MinusToken
        ) {
            let token = self.parse_token_node();
            if self.arena.kind(token) != SyntaxKind::QuestionToken {
                self.parse_expected(SyntaxKind::QuestionToken);
            }
            Some(token)
        } else {
            None
        };
        let ty = self.parse_type_annotation();
        self.parse_semicolon();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::MappedType,
            pos,
            slots![readonly, parameter, name_type, question, ty],
        )
    }

    // ========================================================================
    // Tuples, parentheses and templates
    // ========================================================================

    fn parse_tuple_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let elements = self.parse_bracketed_list(
            ParsingContext::TupleElementTypes,
            Self::parse_tuple_element_name_or_type,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
        );
        self.finish_node(SyntaxKind::TupleType, pos, slots![elements])
    }

    fn parse_tuple_element_name_or_type(&mut self) -> NodeId {
        if !self.look_ahead(Self::is_tuple_element_name) {
            return self.parse_tuple_element_type();
        }
        let pos = self.node_pos();
        let dot_dot_dot = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_name();
        let question = self.parse_optional_token(SyntaxKind::QuestionToken);
        self.parse_expected(SyntaxKind::ColonToken);
        let ty = self.parse_tuple_element_type();
        self.finish_node(SyntaxKind::NamedTupleMember, pos, slots![dot_dot_dot, name, question, ty])
    }

    fn is_tuple_element_name(&mut self) -> bool {
        if self.token() == SyntaxKind::DotDotDotToken {
            self.next_token();
        }
        if !self.is_identifier_or_keyword() {
            return false;
        }
        match self.next_token() {
            SyntaxKind::ColonToken => true,
            SyntaxKind::QuestionToken => self.next_token() == SyntaxKind::ColonToken,
            _ => false,
        }
    }

    /// `...T` is a rest element; a postfix `T?` is an optional element.
    fn parse_tuple_element_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let ty = self.parse_type();
            return self.finish_node(SyntaxKind::RestType, pos, slots![ty]);
        }
        let ty = self.parse_type();
        let node = self.arena.node(ty);
        let range = node.range;
        let inner = node
            .child_node(0)
            .filter(|&inner| node.kind == SyntaxKind::JSDocNullableType && self.arena.node(inner).pos() == range.pos);
        match inner {
            Some(inner) => self.finish(Node::new(SyntaxKind::OptionalType, range).with_slots(slots![inner])),
            None => ty,
        }
    }

    fn parse_parenthesized_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let ty = self.parse_type();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(SyntaxKind::ParenthesizedType, pos, slots![ty])
    }

    fn parse_template_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let head = self.parse_template_head(false);
        let spans_pos = self.node_pos();
        let mut spans = Vec::new();
        loop {
            let span_pos = self.node_pos();
            let ty = self.parse_type();
            let literal = self.parse_literal_of_template_span(false);
            let is_middle = self.arena.kind(literal) == SyntaxKind::TemplateMiddle;
            spans.push(self.finish_node(SyntaxKind::TemplateLiteralTypeSpan, span_pos, slots![ty, literal]));
            if !is_middle {
                break;
            }
        }
        let spans = self.create_list(spans_pos, spans, false);
        self.finish_node(SyntaxKind::TemplateLiteralType, pos, slots![head, spans])
    }

    // ========================================================================
    // Function and constructor types
    // ========================================================================

    fn is_start_of_function_type_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(Self::is_unambiguously_start_of_function_type),
            SyntaxKind::AbstractKeyword => self.look_ahead(|p| p.next_token() == SyntaxKind::NewKeyword),
            _ => false,
        }
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken) {
            return true;
        }
        if self.skip_parameter_start() {
            if matches!(
                self.token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.token() == SyntaxKind::CloseParenToken && self.next_token() == SyntaxKind::EqualsGreaterThanToken {
                return true;
            }
        }
        false
    }

    /// Skip a parameter's modifiers and name; only called under lookahead.
    fn skip_parameter_start(&mut self) -> bool {
        if self.token().is_modifier_kind() {
            self.parse_modifiers(false, false, false);
        }
        if self.is_identifier() || self.token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
            let errors = self.diagnostics.len();
            self.parse_identifier_or_pattern();
            return errors == self.diagnostics.len();
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let modifiers = if self.token() == SyntaxKind::AbstractKeyword {
            let modifier_pos = self.node_pos();
            let modifier = self.parse_token_node();
            Some(self.create_list(modifier_pos, vec![modifier], false))
        } else {
            None
        };
        let is_constructor_type = self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(false, false);
        let return_type = self.parse_return_type(SyntaxKind::EqualsGreaterThanToken, false);
        if is_constructor_type {
            self.finish_node(
                SyntaxKind::ConstructorType,
                pos,
                slots![modifiers, type_parameters, parameters, return_type],
            )
        } else {
            self.finish_node(SyntaxKind::FunctionType, pos, slots![type_parameters, parameters, return_type])
        }
    }

    // ========================================================================
    // Start-of predicates
    // ========================================================================

    /// `in_start_of_parameter` excludes tokens that could also begin a
    /// parameter name or pattern.
    pub(crate) fn is_start_of_type(&mut self, in_start_of_parameter: bool) -> bool {
        match self.token() {
            token if token.is_type_keyword() => true,
            SyntaxKind::ReadonlyKeyword
            | SyntaxKind::UniqueKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::AsteriskToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DotDotDotToken
            | SyntaxKind::InferKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::AssertsKeyword
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead => true,
            SyntaxKind::FunctionKeyword => !in_start_of_parameter,
            SyntaxKind::MinusToken => {
                !in_start_of_parameter && self.look_ahead(Self::next_token_is_numeric_or_bigint_literal)
            }
            SyntaxKind::OpenParenToken => {
                !in_start_of_parameter && self.look_ahead(Self::is_start_of_parenthesized_or_function_type)
            }
            _ => self.is_identifier(),
        }
    }

    fn is_start_of_parenthesized_or_function_type(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::CloseParenToken || self.is_start_of_parameter(false) || self.is_start_of_type(false)
    }
}

#[cfg(test)]
mod tests {
    use tern_ast::{NodeId, SourceFile, SyntaxKind};

    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse(text: &str) -> SourceFile {
        Parser::new("test.ts", text, ParseOptions::default()).parse_source_file()
    }

    /// The type of `type T = <type>;`.
    fn alias_type(text: &str) -> (SourceFile, NodeId) {
        let file = parse(&format!("type T = {text};"));
        let alias = file.statements()[0];
        assert_eq!(file.arena.kind(alias), SyntaxKind::TypeAliasDeclaration);
        let ty = file.arena.node(alias).child_node(3).unwrap();
        (file, ty)
    }

    fn kind_of(text: &str) -> SyntaxKind {
        let (file, ty) = alias_type(text);
        assert!(file.diagnostics.is_empty(), "{text}: {:?}", file.diagnostics);
        file.arena.kind(ty)
    }

    #[test]
    fn test_primary_type_kinds() {
        assert_eq!(kind_of("string"), SyntaxKind::StringKeyword);
        assert_eq!(kind_of("void"), SyntaxKind::VoidKeyword);
        assert_eq!(kind_of("Map<K, V>"), SyntaxKind::TypeReference);
        assert_eq!(kind_of("A.B.C"), SyntaxKind::TypeReference);
        assert_eq!(kind_of("\"a\""), SyntaxKind::LiteralType);
        assert_eq!(kind_of("-1"), SyntaxKind::LiteralType);
        assert_eq!(kind_of("this"), SyntaxKind::ThisType);
        assert_eq!(kind_of("typeof x.y"), SyntaxKind::TypeQuery);
        assert_eq!(kind_of("{ a: string; b(): void }"), SyntaxKind::TypeLiteral);
        assert_eq!(kind_of("[a: string, b?: number, ...rest: any[]]"), SyntaxKind::TupleType);
        assert_eq!(kind_of("(string)"), SyntaxKind::ParenthesizedType);
        assert_eq!(kind_of("import(\"m\").A<B>"), SyntaxKind::ImportType);
        assert_eq!(kind_of("`a${string}b`"), SyntaxKind::TemplateLiteralType);
    }

    #[test]
    fn test_compound_type_kinds() {
        assert_eq!(kind_of("A | B | C"), SyntaxKind::UnionType);
        assert_eq!(kind_of("| A | B"), SyntaxKind::UnionType);
        assert_eq!(kind_of("A & B"), SyntaxKind::IntersectionType);
        assert_eq!(kind_of("keyof T"), SyntaxKind::TypeOperator);
        assert_eq!(kind_of("T[]"), SyntaxKind::ArrayType);
        assert_eq!(kind_of("T[K]"), SyntaxKind::IndexedAccessType);
        assert_eq!(kind_of("(a: string) => void"), SyntaxKind::FunctionType);
        assert_eq!(kind_of("new () => T"), SyntaxKind::ConstructorType);
        assert_eq!(kind_of("abstract new () => T"), SyntaxKind::ConstructorType);
        assert_eq!(kind_of("{ readonly [K in keyof T]?: T[K] }"), SyntaxKind::MappedType);
        assert_eq!(kind_of("T extends string ? A : B"), SyntaxKind::ConditionalType);
    }

    #[test]
    fn test_union_binds_looser_than_intersection() {
        let (file, ty) = alias_type("A & B | C");
        assert_eq!(file.arena.kind(ty), SyntaxKind::UnionType);
        let members = file.arena.elements(file.arena.node(ty).child_list(0));
        assert_eq!(members.len(), 2);
        assert_eq!(file.arena.kind(members[0]), SyntaxKind::IntersectionType);
    }

    #[test]
    fn test_infer_with_constraint() {
        let (file, ty) = alias_type("T extends [infer U extends string] ? U : never");
        assert!(file.diagnostics.is_empty());
        assert_eq!(file.arena.kind(ty), SyntaxKind::ConditionalType);
        let tuple = file.arena.node(ty).child_node(1).unwrap();
        let element = file.arena.elements(file.arena.node(tuple).child_list(0))[0];
        assert_eq!(file.arena.kind(element), SyntaxKind::InferType);
        let parameter = file.arena.node(element).child_node(0).unwrap();
        assert!(file.arena.node(parameter).child_node(2).is_some());
    }

    #[test]
    fn test_optional_tuple_element() {
        let (file, ty) = alias_type("[string?]");
        let element = file.arena.elements(file.arena.node(ty).child_list(0))[0];
        assert_eq!(file.arena.kind(element), SyntaxKind::OptionalType);
    }

    #[test]
    fn test_function_type_in_union_is_reported() {
        let (file, ty) = alias_type("A | () => void");
        assert_eq!(file.arena.kind(ty), SyntaxKind::UnionType);
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].code, 1385);
    }

    #[test]
    fn test_type_predicates() {
        let file = parse("function f(x: unknown): x is string { return true; }");
        assert!(file.diagnostics.is_empty());
        let function = file.statements()[0];
        let return_type = file.arena.node(function).child_node(5).unwrap();
        assert_eq!(file.arena.kind(return_type), SyntaxKind::TypePredicate);

        let file = parse("declare function g(x: unknown): asserts x;");
        assert!(file.diagnostics.is_empty());
        let function = file.statements()[0];
        let predicate = file.arena.node(function).child_node(5).unwrap();
        assert_eq!(file.arena.kind(predicate), SyntaxKind::TypePredicate);
        assert!(file.arena.node(predicate).child_node(0).is_some());
    }

    #[test]
    fn test_missing_type_reports_type_expected() {
        let file = parse("let x: ;");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].message_text, "Type expected.");
    }
}
