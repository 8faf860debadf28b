//! Declarations: modifiers and decorators, functions and parameters,
//! binding patterns, classes, interfaces, type aliases, enums and
//! namespaces. Imports and exports live in `module.rs`.

use tern_ast::{ListId, NodeFlags, NodeId, SyntaxKind};
use tern_diagnostics::messages;

use crate::list::ParsingContext;
use crate::parser::{slots, Parser};

impl Parser {
    // ========================================================================
    // Declaration dispatch
    // ========================================================================

    /// Whether the current token begins a declaration, looking past any
    /// modifiers.
    pub(crate) fn is_start_of_declaration(&mut self) -> bool {
        self.look_ahead(Self::is_declaration)
    }

    fn is_declaration(&mut self) -> bool {
        loop {
            match self.token() {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword => return true,
                SyntaxKind::UsingKeyword => return self.is_using_declaration(),
                SyntaxKind::AwaitKeyword => return self.is_await_using_declaration(),
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    return self.next_token_is_identifier_on_same_line();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    return self.next_token_is_identifier_or_string_literal_on_same_line();
                }
                SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword => {
                    let previous = self.token();
                    self.next_token();
                    // ASI applies after a lone modifier.
                    if self.has_preceding_line_break() {
                        return false;
                    }
                    if previous == SyntaxKind::DeclareKeyword && self.token() == SyntaxKind::TypeKeyword {
                        return true;
                    }
                }
                SyntaxKind::GlobalKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::Identifier | SyntaxKind::ExportKeyword
                    );
                }
                SyntaxKind::ImportKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::StringLiteral | SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
                    ) || self.is_identifier_or_keyword();
                }
                SyntaxKind::ExportKeyword => {
                    let mut next = self.next_token();
                    if next == SyntaxKind::TypeKeyword {
                        next = self.look_ahead(Self::next_token);
                    }
                    if matches!(
                        next,
                        SyntaxKind::EqualsToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::DefaultKeyword
                            | SyntaxKind::AsKeyword
                            | SyntaxKind::AtToken
                    ) {
                        return true;
                    }
                }
                SyntaxKind::StaticKeyword => {
                    self.next_token();
                }
                _ => return false,
            }
        }
    }

    fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && self.is_identifier()
    }

    fn next_token_is_identifier_or_string_literal_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && (self.is_identifier() || self.token() == SyntaxKind::StringLiteral)
    }

    pub(crate) fn parse_declaration(&mut self) -> NodeId {
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers(true, false, false);
        if !self.modifiers_contain(modifiers, SyntaxKind::DeclareKeyword) {
            return self.parse_declaration_worker(pos, modifiers);
        }
        self.mark_ambient(modifiers);
        self.do_in_context(NodeFlags::AMBIENT, true, |p| p.parse_declaration_worker(pos, modifiers))
    }

    fn mark_ambient(&mut self, modifiers: Option<ListId>) {
        let ids = self.arena.elements(modifiers).to_vec();
        for id in ids {
            self.arena.node_mut(id).flags |= NodeFlags::AMBIENT;
        }
    }

    fn parse_declaration_worker(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        match self.token() {
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::UsingKeyword
            | SyntaxKind::AwaitKeyword => self.parse_variable_statement(pos, modifiers),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, modifiers),
            SyntaxKind::ClassKeyword => {
                self.parse_class_declaration_or_expression(pos, modifiers, SyntaxKind::ClassDeclaration)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, modifiers),
            SyntaxKind::GlobalKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                self.parse_module_declaration(pos, modifiers)
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration_or_import_equals_declaration(pos, modifiers),
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword | SyntaxKind::EqualsToken => self.parse_export_assignment(pos, modifiers),
                    SyntaxKind::AsKeyword => self.parse_namespace_export_declaration(pos, modifiers),
                    _ => self.parse_export_declaration(pos, modifiers),
                }
            }
            _ => {
                // Modifiers with nothing to modify.
                self.parse_error_at_position(self.node_pos(), 0, &messages::DECLARATION_EXPECTED, &[]);
                self.finish_node(SyntaxKind::MissingDeclaration, pos, slots![modifiers])
            }
        }
    }

    // ========================================================================
    // Modifiers and decorators
    // ========================================================================

    pub(crate) fn modifiers_contain(&self, modifiers: Option<ListId>, kind: SyntaxKind) -> bool {
        self.arena.elements(modifiers).iter().any(|&m| self.arena.kind(m) == kind)
    }

    /// Decorators and modifiers in source order. Decorators may lead the
    /// list and may appear once more after the first run of modifiers.
    pub(crate) fn parse_modifiers(
        &mut self,
        allow_decorators: bool,
        permit_const_as_modifier: bool,
        stop_on_start_of_class_static_block: bool,
    ) -> Option<ListId> {
        let pos = self.node_pos();
        let mut list = Vec::new();
        let mut has_seen_static = false;
        let mut has_leading_modifier = false;
        let mut has_trailing_decorator = false;

        if allow_decorators && self.token() == SyntaxKind::AtToken {
            while let Some(decorator) = self.try_parse_decorator() {
                list.push(decorator);
            }
        }
        while let Some(modifier) =
            self.try_parse_modifier(has_seen_static, permit_const_as_modifier, stop_on_start_of_class_static_block)
        {
            has_seen_static |= self.arena.kind(modifier) == SyntaxKind::StaticKeyword;
            list.push(modifier);
            has_leading_modifier = true;
        }
        if has_leading_modifier && allow_decorators && self.token() == SyntaxKind::AtToken {
            while let Some(decorator) = self.try_parse_decorator() {
                list.push(decorator);
                has_trailing_decorator = true;
            }
        }
        if has_trailing_decorator {
            while let Some(modifier) =
                self.try_parse_modifier(has_seen_static, permit_const_as_modifier, stop_on_start_of_class_static_block)
            {
                has_seen_static |= self.arena.kind(modifier) == SyntaxKind::StaticKeyword;
                list.push(modifier);
            }
        }

        if list.is_empty() {
            None
        } else {
            Some(self.create_list(pos, list, false))
        }
    }

    fn try_parse_modifier(
        &mut self,
        has_seen_static: bool,
        permit_const_as_modifier: bool,
        stop_on_start_of_class_static_block: bool,
    ) -> Option<NodeId> {
        let pos = self.node_pos();
        let kind = self.token();
        if kind == SyntaxKind::ConstKeyword && permit_const_as_modifier {
            // `const` before a type parameter or class member.
            self.try_parse(|p| p.next_token_is_on_same_line_and_can_follow_modifier().then_some(()))?;
        } else if stop_on_start_of_class_static_block
            && kind == SyntaxKind::StaticKeyword
            && self.look_ahead(|p| p.next_token() == SyntaxKind::OpenBraceToken)
        {
            return None;
        } else if has_seen_static && kind == SyntaxKind::StaticKeyword {
            return None;
        } else if !self.parse_any_contextual_modifier() {
            return None;
        }
        Some(self.finish_node(kind, pos, &[]))
    }

    fn parse_any_contextual_modifier(&mut self) -> bool {
        self.token().is_modifier_kind() && self.try_parse(|p| p.next_token_can_follow_modifier().then_some(())).is_some()
    }

    /// Consume `kind` when it acts as a modifier here (`get`, `set`,
    /// `async` and friends are identifiers otherwise).
    pub(crate) fn parse_contextual_modifier(&mut self, kind: SyntaxKind) -> bool {
        self.token() == kind && self.try_parse(|p| p.next_token_can_follow_modifier().then_some(())).is_some()
    }

    fn next_token_can_follow_modifier(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ConstKeyword => self.next_token() == SyntaxKind::EnumKeyword,
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword => self.look_ahead(Self::next_token_can_follow_default_keyword),
                    SyntaxKind::TypeKeyword => self.look_ahead(Self::next_token_can_follow_export_modifier),
                    _ => self.can_follow_export_modifier(),
                }
            }
            SyntaxKind::DefaultKeyword => self.next_token_can_follow_default_keyword(),
            SyntaxKind::StaticKeyword => {
                self.next_token();
                self.can_follow_modifier()
            }
            SyntaxKind::GetKeyword | SyntaxKind::SetKeyword => {
                self.next_token();
                self.token() == SyntaxKind::OpenBracketToken || self.is_literal_property_name()
            }
            _ => self.next_token_is_on_same_line_and_can_follow_modifier(),
        }
    }

    fn can_follow_export_modifier(&mut self) -> bool {
        self.token() == SyntaxKind::AtToken
            || (!matches!(
                self.token(),
                SyntaxKind::AsteriskToken | SyntaxKind::AsKeyword | SyntaxKind::OpenBraceToken
            ) && self.can_follow_modifier())
    }

    fn next_token_can_follow_export_modifier(&mut self) -> bool {
        self.next_token();
        self.can_follow_export_modifier()
    }

    fn next_token_is_on_same_line_and_can_follow_modifier(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && self.can_follow_modifier()
    }

    fn can_follow_modifier(&mut self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
        ) || self.is_literal_property_name()
    }

    fn next_token_can_follow_default_keyword(&mut self) -> bool {
        match self.next_token() {
            SyntaxKind::ClassKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::AtToken => true,
            SyntaxKind::AbstractKeyword => self.look_ahead(|p| {
                p.next_token() == SyntaxKind::ClassKeyword && !p.has_preceding_line_break()
            }),
            SyntaxKind::AsyncKeyword => self.look_ahead(Self::next_token_is_function_keyword_on_same_line),
            _ => false,
        }
    }

    fn try_parse_decorator(&mut self) -> Option<NodeId> {
        let pos = self.node_pos();
        if !self.parse_optional(SyntaxKind::AtToken) {
            return None;
        }
        let expression = self.in_decorator_context(Self::parse_decorator_expression);
        Some(self.finish_node(SyntaxKind::Decorator, pos, slots![expression]))
    }

    fn parse_decorator_expression(&mut self) -> NodeId {
        if self.context.in_await() && self.token() == SyntaxKind::AwaitKeyword {
            // `@await` cannot name anything here; take it as a missing
            // identifier and keep going.
            let pos = self.node_pos();
            let await_expression = self.parse_identifier_with_message(&messages::EXPRESSION_EXPECTED);
            self.next_token();
            let member = self.parse_member_expression_rest(pos, await_expression, true);
            return self.parse_call_expression_rest(pos, member);
        }
        self.parse_left_hand_side_expression_or_higher()
    }

    // ========================================================================
    // Functions and parameters
    // ========================================================================

    pub(crate) fn parse_function_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = if self.modifiers_contain(modifiers, SyntaxKind::DefaultKeyword) {
            self.parse_optional_binding_identifier()
        } else {
            Some(self.parse_binding_identifier())
        };
        let is_generator = asterisk.is_some();
        let is_async = self.modifiers_contain(modifiers, SyntaxKind::AsyncKeyword);
        let type_parameters = self.parse_type_parameters();
        // Exported functions sit at module level, where `await` is reserved.
        let is_export = self.modifiers_contain(modifiers, SyntaxKind::ExportKeyword);
        let context = self.context.set(NodeFlags::AWAIT_CONTEXT, is_export || self.context.in_await());
        let (parameters, return_type, body) = self.with_context(context, |p| {
            let parameters = p.parse_parameters(is_generator, is_async);
            let return_type = p.parse_return_type(SyntaxKind::ColonToken, false);
            let body = p.parse_function_block_or_semicolon(is_generator, is_async);
            (parameters, return_type, body)
        });
        self.finish_node(
            SyntaxKind::FunctionDeclaration,
            pos,
            slots![modifiers, asterisk, name, type_parameters, parameters, return_type, body],
        )
    }

    pub(crate) fn parse_optional_binding_identifier(&mut self) -> Option<NodeId> {
        if self.is_identifier() {
            Some(self.parse_binding_identifier())
        } else {
            None
        }
    }

    /// `( parameters )`. A missing `(` yields a missing list.
    pub(crate) fn parse_parameters(&mut self, is_generator: bool, is_async: bool) -> ListId {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return self.create_missing_list();
        }
        let parameters = self
            .parse_parameters_worker(is_generator, is_async, true)
            .unwrap_or_else(|| self.create_missing_list());
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    /// The parameters between the parentheses, with yield/await set by the
    /// function being declared. Without `allow_ambiguity` this returns
    /// `None` as soon as something cannot start a parameter name.
    pub(crate) fn parse_parameters_worker(
        &mut self,
        is_generator: bool,
        is_async: bool,
        allow_ambiguity: bool,
    ) -> Option<ListId> {
        let in_outer_await = self.context.in_await();
        self.in_function_context(is_generator, is_async, |p| {
            p.try_parse_delimited_list(
                ParsingContext::Parameters,
                |p| p.parse_parameter_worker(in_outer_await, allow_ambiguity),
                false,
            )
        })
    }

    pub(crate) fn parse_parameter(&mut self) -> NodeId {
        let in_outer_await = self.context.in_await();
        match self.parse_parameter_worker(in_outer_await, true) {
            Some(parameter) => parameter,
            None => self.create_missing_node(
                SyntaxKind::Parameter,
                true,
                &messages::PARAMETER_DECLARATION_EXPECTED,
                &[],
            ),
        }
    }

    fn parse_parameter_worker(&mut self, in_outer_await: bool, allow_ambiguity: bool) -> Option<NodeId> {
        let pos = self.node_pos();
        // Decorators see the enclosing function's await context.
        let outer = self.context.set(NodeFlags::AWAIT_CONTEXT, in_outer_await);
        let modifiers = self.with_context(outer, |p| p.parse_modifiers(true, false, false));

        if self.token() == SyntaxKind::ThisKeyword {
            let name = self.create_identifier(true, None);
            let ty = self.parse_type_annotation();
            return Some(self.finish_node(
                SyntaxKind::Parameter,
                pos,
                slots![modifiers, None::<NodeId>, name, None::<NodeId>, ty, None::<NodeId>],
            ));
        }

        let dot_dot_dot = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        if !allow_ambiguity && !self.is_parameter_name_start() {
            return None;
        }
        let name = self.parse_name_of_parameter(modifiers);
        let question = self.parse_optional_token(SyntaxKind::QuestionToken);
        let ty = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        Some(self.finish_node(
            SyntaxKind::Parameter,
            pos,
            slots![modifiers, dot_dot_dot, name, question, ty, initializer],
        ))
    }

    fn is_parameter_name_start(&self) -> bool {
        self.is_identifier() || matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken)
    }

    fn parse_name_of_parameter(&mut self, modifiers: Option<ListId>) -> NodeId {
        let name = self.parse_identifier_or_pattern();
        // `function f(static)`: the modifier was rejected as a modifier and
        // as a name; step over it so the list makes progress.
        let node = self.arena.node(name);
        if node.pos() == node.end() && modifiers.is_none() && self.token().is_modifier_kind() {
            self.next_token();
        }
        name
    }

    pub(crate) fn is_start_of_parameter(&mut self, is_jsdoc_parameter: bool) -> bool {
        self.token() == SyntaxKind::DotDotDotToken
            || self.is_binding_identifier_or_private_identifier_or_pattern()
            || self.token().is_modifier_kind()
            || self.token() == SyntaxKind::AtToken
            || self.is_start_of_type(!is_jsdoc_parameter)
    }

    // ========================================================================
    // Binding patterns
    // ========================================================================

    pub(crate) fn is_binding_identifier_or_private_identifier_or_pattern(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken | SyntaxKind::PrivateIdentifier
        ) || self.is_identifier()
    }

    pub(crate) fn parse_identifier_or_pattern(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            _ => self.parse_binding_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let elements = self.allow_in(|p| {
            p.parse_delimited_list(ParsingContext::ObjectBindingElements, Self::parse_object_binding_element, false)
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(SyntaxKind::ObjectBindingPattern, pos, slots![elements])
    }

    fn parse_object_binding_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        let dot_dot_dot = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let token_is_identifier = self.is_identifier();
        let property = self.parse_property_name();
        let (property_name, name) = if token_is_identifier && self.token() != SyntaxKind::ColonToken {
            (None, property)
        } else {
            self.parse_expected(SyntaxKind::ColonToken);
            (Some(property), self.parse_identifier_or_pattern())
        };
        let initializer = self.parse_initializer();
        self.finish_node(
            SyntaxKind::BindingElement,
            pos,
            slots![dot_dot_dot, property_name, name, initializer],
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let elements = self.allow_in(|p| {
            p.parse_delimited_list(ParsingContext::ArrayBindingElements, Self::parse_array_binding_element, false)
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(SyntaxKind::ArrayBindingPattern, pos, slots![elements])
    }

    fn parse_array_binding_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.token() == SyntaxKind::CommaToken {
            return self.finish_node(SyntaxKind::OmittedExpression, pos, &[]);
        }
        let dot_dot_dot = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_or_pattern();
        let initializer = self.parse_initializer();
        self.finish_node(
            SyntaxKind::BindingElement,
            pos,
            slots![dot_dot_dot, None::<NodeId>, name, initializer],
        )
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class_declaration_or_expression(
        &mut self,
        pos: u32,
        modifiers: Option<ListId>,
        kind: SyntaxKind,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_implements_clause() {
            Some(self.parse_binding_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let is_export = self.modifiers_contain(modifiers, SyntaxKind::ExportKeyword);
        let context = self.context.set(NodeFlags::AWAIT_CONTEXT, is_export || self.context.in_await());
        let (heritage_clauses, members) = self.with_context(context, |p| {
            let heritage_clauses = p.parse_heritage_clauses();
            let open_pos = p.token_pos();
            let members = if p.parse_expected(SyntaxKind::OpenBraceToken) {
                let members = p.parse_list(ParsingContext::ClassMembers, Self::parse_class_element);
                p.parse_expected_matching_brackets(
                    SyntaxKind::OpenBraceToken,
                    SyntaxKind::CloseBraceToken,
                    true,
                    open_pos,
                );
                members
            } else {
                p.create_missing_list()
            };
            (heritage_clauses, members)
        });
        self.finish_node(
            kind,
            pos,
            slots![modifiers, name, type_parameters, heritage_clauses, members],
        )
    }

    fn is_implements_clause(&mut self) -> bool {
        self.token() == SyntaxKind::ImplementsKeyword && self.look_ahead(|p| {
            p.next_token();
            p.is_identifier_or_keyword()
        })
    }

    pub(crate) fn is_heritage_clause(&self) -> bool {
        matches!(self.token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword)
    }

    fn parse_heritage_clauses(&mut self) -> Option<ListId> {
        if self.is_heritage_clause() {
            Some(self.parse_list(ParsingContext::HeritageClauses, Self::parse_heritage_clause))
        } else {
            None
        }
    }

    fn parse_heritage_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        let token = self.parse_token_node();
        let types = self.parse_delimited_list(
            ParsingContext::HeritageClauseElement,
            Self::parse_expression_with_type_arguments,
            false,
        );
        self.finish_node(SyntaxKind::HeritageClause, pos, slots![token, types])
    }

    fn parse_expression_with_type_arguments(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_left_hand_side_expression_or_higher();
        if self.arena.kind(expression) == SyntaxKind::ExpressionWithTypeArguments {
            return expression;
        }
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_bracketed_list(
                ParsingContext::TypeArguments,
                Self::parse_type,
                SyntaxKind::LessThanToken,
                SyntaxKind::GreaterThanToken,
            ))
        } else {
            None
        };
        self.finish_node(SyntaxKind::ExpressionWithTypeArguments, pos, slots![expression, type_arguments])
    }

    /// At `{` in a heritage clause. An empty `{}` is an element only when a
    /// class body or another clause follows it.
    pub(crate) fn is_valid_heritage_clause_object_literal(&mut self) -> bool {
        if self.next_token() == SyntaxKind::CloseBraceToken {
            let next = self.next_token();
            return matches!(
                next,
                SyntaxKind::CommaToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            );
        }
        true
    }

    /// Runs under lookahead.
    pub(crate) fn is_class_member_start(&mut self) -> bool {
        if self.token() == SyntaxKind::AtToken {
            return true;
        }
        let mut id_token = None;
        // Keep the last modifier: it may turn out to be the member name.
        while self.token().is_modifier_kind() {
            id_token = Some(self.token());
            if self.token().is_class_member_modifier() {
                return true;
            }
            self.next_token();
        }
        if self.token() == SyntaxKind::AsteriskToken {
            return true;
        }
        if self.is_literal_property_name() {
            id_token = Some(self.token());
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        let Some(id_token) = id_token else {
            return false;
        };
        if !id_token.is_keyword() || matches!(id_token, SyntaxKind::GetKeyword | SyntaxKind::SetKeyword) {
            return true;
        }
        match self.token() {
            SyntaxKind::OpenParenToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::QuestionToken => true,
            // `;`, `}`, end of file or a line break end a property named by
            // the keyword.
            _ => self.can_parse_semicolon(),
        }
    }

    fn parse_class_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.token() == SyntaxKind::SemicolonToken {
            self.next_token();
            return self.finish_node(SyntaxKind::SemicolonClassElement, pos, &[]);
        }

        let modifiers = self.parse_modifiers(true, true, true);
        if self.token() == SyntaxKind::StaticKeyword && self.look_ahead(|p| p.next_token() == SyntaxKind::OpenBraceToken) {
            return self.parse_class_static_block_declaration(pos);
        }
        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, modifiers, SyntaxKind::GetAccessor);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, modifiers, SyntaxKind::SetAccessor);
        }
        if matches!(self.token(), SyntaxKind::ConstructorKeyword | SyntaxKind::StringLiteral) {
            if let Some(constructor) = self.try_parse_constructor_declaration(pos, modifiers) {
                return constructor;
            }
        }
        if self.is_index_signature() {
            return self.parse_index_signature_declaration(pos, modifiers);
        }
        // After index signatures: `[` may also start a computed name.
        if self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
        {
            if self.modifiers_contain(modifiers, SyntaxKind::DeclareKeyword) {
                self.mark_ambient(modifiers);
                return self.do_in_context(NodeFlags::AMBIENT, true, |p| {
                    p.parse_property_or_method_declaration(pos, modifiers)
                });
            }
            return self.parse_property_or_method_declaration(pos, modifiers);
        }

        // Modifiers or decorators with no member after them: a property
        // whose name is missing.
        let name = self.create_missing_node(SyntaxKind::Identifier, true, &messages::DECLARATION_EXPECTED, &[]);
        self.parse_property_declaration(pos, modifiers, name, None)
    }

    fn parse_class_static_block_declaration(&mut self, pos: u32) -> NodeId {
        self.parse_expected(SyntaxKind::StaticKeyword);
        let context = self.context.without(NodeFlags::YIELD_CONTEXT).with(NodeFlags::AWAIT_CONTEXT);
        let body = self.with_context(context, |p| p.parse_block(false, None));
        self.finish_node(SyntaxKind::ClassStaticBlockDeclaration, pos, slots![body])
    }

    fn try_parse_constructor_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> Option<NodeId> {
        self.try_parse(|p| {
            if !p.parse_constructor_name() {
                return None;
            }
            let type_parameters = p.parse_type_parameters();
            let parameters = p.parse_parameters(false, false);
            let return_type = p.parse_return_type(SyntaxKind::ColonToken, false);
            let body = p.parse_function_block_or_semicolon(false, false);
            Some(p.finish_node(
                SyntaxKind::Constructor,
                pos,
                slots![modifiers, type_parameters, parameters, return_type, body],
            ))
        })
    }

    /// `constructor` or `"constructor"` followed by `(`.
    fn parse_constructor_name(&mut self) -> bool {
        if self.token() == SyntaxKind::ConstructorKeyword {
            return self.parse_expected(SyntaxKind::ConstructorKeyword);
        }
        if self.token() == SyntaxKind::StringLiteral && self.look_ahead(|p| p.next_token() == SyntaxKind::OpenParenToken) {
            return self
                .try_parse(|p| {
                    let literal = p.parse_literal_node();
                    (p.arena.text_of(literal) == Some("constructor")).then_some(())
                })
                .is_some();
        }
        false
    }

    fn parse_property_or_method_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let asterisk = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question = self.parse_optional_token(SyntaxKind::QuestionToken);
        if asterisk.is_some() || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_method_declaration(pos, modifiers, asterisk, name, question);
        }
        self.parse_property_declaration(pos, modifiers, name, question)
    }

    pub(crate) fn parse_method_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<ListId>,
        asterisk: Option<NodeId>,
        name: NodeId,
        question: Option<NodeId>,
    ) -> NodeId {
        let is_generator = asterisk.is_some();
        let is_async = self.modifiers_contain(modifiers, SyntaxKind::AsyncKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(is_generator, is_async);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(is_generator, is_async);
        self.finish_node(
            SyntaxKind::MethodDeclaration,
            pos,
            slots![modifiers, asterisk, name, question, type_parameters, parameters, return_type, body],
        )
    }

    fn parse_property_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<ListId>,
        name: NodeId,
        question: Option<NodeId>,
    ) -> NodeId {
        let question_or_exclamation = match question {
            Some(_) => question,
            None if !self.has_preceding_line_break() => self.parse_optional_token(SyntaxKind::ExclamationToken),
            None => None,
        };
        let ty = self.parse_type_annotation();
        let context = self
            .context
            .without(NodeFlags::YIELD_CONTEXT)
            .without(NodeFlags::AWAIT_CONTEXT)
            .without(NodeFlags::DECORATOR_CONTEXT);
        let initializer = self.with_context(context, Self::parse_initializer);
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::PropertyDeclaration,
            pos,
            slots![modifiers, name, question_or_exclamation, ty, initializer],
        )
    }

    /// `get`/`set` members of classes and object literals.
    pub(crate) fn parse_accessor_declaration(&mut self, pos: u32, modifiers: Option<ListId>, kind: SyntaxKind) -> NodeId {
        let name = self.parse_property_name();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(false, false);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = self.parse_function_block_or_semicolon(false, false);
        self.finish_node(
            kind,
            pos,
            slots![modifiers, name, type_parameters, parameters, return_type, body],
        )
    }

    /// `get`/`set` members of type literals and interfaces, which end like
    /// any other type member.
    pub(crate) fn parse_accessor_signature(&mut self, pos: u32, modifiers: Option<ListId>, kind: SyntaxKind) -> NodeId {
        let name = self.parse_property_name();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters(false, false);
        let return_type = self.parse_return_type(SyntaxKind::ColonToken, false);
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_function_block(false, false, false))
        } else {
            self.parse_type_member_semicolon();
            None
        };
        self.finish_node(
            kind,
            pos,
            slots![modifiers, name, type_parameters, parameters, return_type, body],
        )
    }

    // ========================================================================
    // Interfaces, type aliases, enums
    // ========================================================================

    fn parse_interface_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        self.finish_node(
            SyntaxKind::InterfaceDeclaration,
            pos,
            slots![modifiers, name, type_parameters, heritage_clauses, members],
        )
    }

    fn parse_type_alias_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        self.parse_expected(SyntaxKind::TypeKeyword);
        if self.has_preceding_line_break() {
            self.parse_error_at_current_token(&messages::LINE_BREAK_NOT_PERMITTED_HERE, &[]);
        }
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let ty = self.parse_type();
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::TypeAliasDeclaration,
            pos,
            slots![modifiers, name, type_parameters, ty],
        )
    }

    fn parse_enum_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let context = self.context.without(NodeFlags::YIELD_CONTEXT).without(NodeFlags::AWAIT_CONTEXT);
            let members = self.with_context(context, |p| {
                p.parse_delimited_list(ParsingContext::EnumMembers, Self::parse_enum_member, false)
            });
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            self.create_missing_list()
        };
        self.finish_node(SyntaxKind::EnumDeclaration, pos, slots![modifiers, name, members])
    }

    fn parse_enum_member(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_property_name();
        let initializer = self.allow_in(Self::parse_initializer);
        self.finish_node(SyntaxKind::EnumMember, pos, slots![name, initializer])
    }

    // ========================================================================
    // Namespaces and modules
    // ========================================================================

    fn parse_module_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        if self.token() == SyntaxKind::GlobalKeyword {
            return self.parse_ambient_external_module_declaration(pos, modifiers);
        }
        let flags = if self.parse_optional(SyntaxKind::NamespaceKeyword) {
            NodeFlags::NAMESPACE
        } else {
            self.parse_expected(SyntaxKind::ModuleKeyword);
            if self.token() == SyntaxKind::StringLiteral {
                return self.parse_ambient_external_module_declaration(pos, modifiers);
            }
            NodeFlags::NONE
        };
        self.parse_module_or_namespace_declaration(pos, modifiers, flags)
    }

    /// `namespace A.B.C { }` nests one declaration per dotted name.
    fn parse_module_or_namespace_declaration(&mut self, pos: u32, modifiers: Option<ListId>, flags: NodeFlags) -> NodeId {
        let namespace_flag = flags & NodeFlags::NAMESPACE;
        let name = if flags.contains(NodeFlags::NESTED_NAMESPACE) {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        };
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let inner_pos = self.node_pos();
            self.parse_module_or_namespace_declaration(inner_pos, None, NodeFlags::NESTED_NAMESPACE | namespace_flag)
        } else {
            self.parse_module_block()
        };
        self.finish_node_with_flags(SyntaxKind::ModuleDeclaration, pos, flags, slots![modifiers, name, body])
    }

    /// `declare module "m" { }` and `declare global { }`.
    fn parse_ambient_external_module_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let (name, flags) = if self.token() == SyntaxKind::GlobalKeyword {
            (self.parse_identifier(), NodeFlags::GLOBAL_AUGMENTATION)
        } else {
            (self.parse_literal_node(), NodeFlags::NONE)
        };
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_module_block())
        } else {
            self.parse_semicolon();
            None
        };
        self.finish_node_with_flags(SyntaxKind::ModuleDeclaration, pos, flags, slots![modifiers, name, body])
    }

    fn parse_module_block(&mut self) -> NodeId {
        let pos = self.node_pos();
        let statements = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let statements = self.parse_list(ParsingContext::BlockStatements, Self::parse_statement);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            statements
        } else {
            self.create_missing_list()
        };
        self.finish_node(SyntaxKind::ModuleBlock, pos, slots![statements])
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

    fn first(file: &SourceFile) -> tern_ast::NodeId {
        file.statements()[0]
    }

    fn member_kinds(file: &SourceFile, class: tern_ast::NodeId) -> Vec<SyntaxKind> {
        let members = file.arena.node(class).child_list(4);
        file.arena.elements(members).iter().map(|&m| file.arena.kind(m)).collect()
    }

    #[test]
    fn test_class_members() {
        let file = parse(
            "class C<T> extends B<T> implements I {\n\
             \x20 x = 1;\n\
             \x20 private readonly y?: string;\n\
             \x20 static z!: number;\n\
             \x20 constructor(public a: T) { super(); }\n\
             \x20 get v() { return 1; }\n\
             \x20 set v(value) {}\n\
             \x20 *gen() {}\n\
             \x20 async m(): Promise<void> {}\n\
             \x20 [key: string]: unknown;\n\
             \x20 static { init(); }\n\
             \x20 ;\n\
             }",
        );
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let class = first(&file);
        assert_eq!(file.arena.kind(class), SyntaxKind::ClassDeclaration);
        assert_eq!(
            member_kinds(&file, class),
            vec![
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::Constructor,
                SyntaxKind::GetAccessor,
                SyntaxKind::SetAccessor,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::IndexSignature,
                SyntaxKind::ClassStaticBlockDeclaration,
                SyntaxKind::SemicolonClassElement,
            ]
        );
        let heritage = file.arena.node(class).child_list(3);
        assert_eq!(file.arena.elements(heritage).len(), 2);
    }

    #[test]
    fn test_modifier_named_members() {
        let file = parse("class C { static; async\n m() {} get; }");
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        assert_eq!(
            member_kinds(&file, first(&file)),
            vec![
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::PropertyDeclaration,
            ]
        );
    }

    #[test]
    fn test_decorators_before_and_after_export() {
        let file = parse("@a export @b class C {}");
        let class = first(&file);
        assert_eq!(file.arena.kind(class), SyntaxKind::ClassDeclaration);
        let modifiers = file.arena.node(class).child_list(0);
        let kinds: Vec<_> = file.arena.elements(modifiers).iter().map(|&m| file.arena.kind(m)).collect();
        assert_eq!(kinds, vec![SyntaxKind::Decorator, SyntaxKind::ExportKeyword, SyntaxKind::Decorator]);
        assert!(file.diagnostics.is_empty());
    }

    #[test]
    fn test_declare_sets_ambient_context() {
        let file = parse("declare function f(): void;\ndeclare const x: number;");
        assert!(file.diagnostics.is_empty());
        for &statement in file.statements() {
            assert!(file.arena.node(statement).flags.contains(NodeFlags::AMBIENT));
        }
    }

    #[test]
    fn test_function_overload_without_body() {
        let file = parse("function f(a: string): void;\nfunction f(a: any) {}");
        assert!(file.diagnostics.is_empty());
        let overload = file.arena.node(first(&file));
        assert_eq!(overload.child_node(6), None);
    }

    #[test]
    fn test_parameters() {
        let file = parse("function f(this: Window, a?: number, { b, c: [d] } = {}, ...rest: string[]) {}");
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let function = file.arena.node(first(&file));
        let parameters = file.arena.elements(function.child_list(4));
        assert_eq!(parameters.len(), 4);
        let pattern = file.arena.node(parameters[2]).child_node(2).unwrap();
        assert_eq!(file.arena.kind(pattern), SyntaxKind::ObjectBindingPattern);
        assert!(file.arena.node(parameters[3]).child_node(1).is_some());
    }

    #[test]
    fn test_array_binding_holes() {
        let file = parse("let [, a, , ...b] = xs;");
        assert!(file.diagnostics.is_empty());
        let list = file.arena.node(first(&file)).child_node(1).unwrap();
        let declaration = file.arena.elements(file.arena.node(list).child_list(0))[0];
        let pattern = file.arena.node(declaration).child_node(0).unwrap();
        let kinds: Vec<_> = file
            .arena
            .elements(file.arena.node(pattern).child_list(0))
            .iter()
            .map(|&e| file.arena.kind(e))
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::OmittedExpression,
                SyntaxKind::BindingElement,
                SyntaxKind::OmittedExpression,
                SyntaxKind::BindingElement,
            ]
        );
    }

    #[test]
    fn test_interface_type_alias_enum() {
        let file = parse(
            "interface A<T> extends B { x: T; get y(): number; }\n\
             type F = (x: number) => void;\n\
             const enum E { A = 1, B, C = A | B }",
        );
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        let kinds: Vec<_> = file.statements().iter().map(|&s| file.arena.kind(s)).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::InterfaceDeclaration,
                SyntaxKind::TypeAliasDeclaration,
                SyntaxKind::EnumDeclaration,
            ]
        );
        let members = file.arena.node(file.statements()[2]).child_list(2);
        assert_eq!(file.arena.elements(members).len(), 3);
    }

    #[test]
    fn test_dotted_namespace_nests() {
        let file = parse("namespace A.B.C { export const x = 1; }");
        assert!(file.diagnostics.is_empty());
        let outer = file.arena.node(first(&file));
        assert!(outer.flags.contains(NodeFlags::NAMESPACE));
        let middle = outer.child_node(2).unwrap();
        assert_eq!(file.arena.kind(middle), SyntaxKind::ModuleDeclaration);
        assert!(file.arena.node(middle).flags.contains(NodeFlags::NESTED_NAMESPACE));
        let inner = file.arena.node(middle).child_node(2).unwrap();
        let block = file.arena.node(inner).child_node(2).unwrap();
        assert_eq!(file.arena.kind(block), SyntaxKind::ModuleBlock);
    }

    #[test]
    fn test_declare_global_and_ambient_module() {
        let file = parse("declare global { interface Window {} }\ndeclare module \"m\";");
        assert!(file.diagnostics.is_empty());
        let global = file.arena.node(file.statements()[0]);
        assert!(global.flags.contains(NodeFlags::GLOBAL_AUGMENTATION));
        let ambient = file.arena.node(file.statements()[1]);
        assert_eq!(ambient.child_node(2), None);
    }

    #[test]
    fn test_lone_modifier_is_missing_declaration() {
        let file = parse("declare;");
        assert_eq!(file.arena.kind(first(&file)), SyntaxKind::ExpressionStatement);
        let file = parse("@dec");
        assert_eq!(file.arena.kind(first(&file)), SyntaxKind::MissingDeclaration);
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].message_text, "Declaration expected.");
    }
}
