//! Statements.

use tern_ast::{ListId, NodeFlags, NodeId, SyntaxKind};
use tern_diagnostics::{messages, DiagnosticMessage};

use crate::list::ParsingContext;
use crate::parser::{slots, Parser};

impl Parser {
    pub(crate) fn is_start_of_statement(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AtToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            // `catch` and `finally` alone start a try statement missing its `try`.
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword => true,
            SyntaxKind::ImportKeyword => {
                self.is_start_of_declaration() || self.look_ahead(Self::next_token_is_open_paren_or_less_than_or_dot)
            }
            SyntaxKind::ConstKeyword | SyntaxKind::ExportKeyword => self.is_start_of_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::GlobalKeyword => true,
            SyntaxKind::AccessorKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword => {
                self.is_start_of_declaration() || !self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line)
            }
            _ => self.is_start_of_expression(),
        }
    }

    pub(crate) fn parse_statement(&mut self) -> NodeId {
        self.guarded(SyntaxKind::EmptyStatement, Self::parse_statement_worker)
    }

    fn parse_statement_worker(&mut self) -> NodeId {
        let pos = self.node_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::OpenBraceToken => self.parse_block(false, None),
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos, None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(pos, None),
            SyntaxKind::AwaitKeyword if self.is_await_using_declaration() => self.parse_variable_statement(pos, None),
            SyntaxKind::UsingKeyword if self.is_using_declaration() => self.parse_variable_statement(pos, None),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, None),
            SyntaxKind::ClassKeyword => self.parse_class_declaration_or_expression(pos, None, SyntaxKind::ClassDeclaration),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_or_for_in_or_for_of_statement(),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword | SyntaxKind::CatchKeyword | SyntaxKind::FinallyKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::AtToken => self.parse_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AccessorKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::GlobalKeyword
                if self.is_start_of_declaration() =>
            {
                self.parse_declaration()
            }
            _ => self.parse_expression_or_labeled_statement(),
        }
    }

    // ------------------------------------------------------------------------
    // Declaration lookaheads
    // ------------------------------------------------------------------------

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier() || matches!(p.token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken)
        })
    }

    /// `using x` on one line. With `disallow_of`, `using of` is left to a
    /// `for (using of ...)` head.
    fn next_token_is_binding_identifier_or_start_of_destructuring_on_same_line(&mut self, disallow_of: bool) -> bool {
        self.next_token();
        if disallow_of && self.token() == SyntaxKind::OfKeyword {
            return false;
        }
        (self.is_identifier() || self.token() == SyntaxKind::OpenBraceToken) && !self.has_preceding_line_break()
    }

    pub(crate) fn is_using_declaration(&mut self) -> bool {
        self.look_ahead(|p| p.next_token_is_binding_identifier_or_start_of_destructuring_on_same_line(false))
    }

    pub(crate) fn is_await_using_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token() == SyntaxKind::UsingKeyword
                && p.next_token_is_binding_identifier_or_start_of_destructuring_on_same_line(false)
        })
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    fn parse_empty_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.finish_node(SyntaxKind::EmptyStatement, pos, &[])
    }

    /// `ignore_missing_open_brace` still reports the missing `{` but
    /// parses the statements that follow as the block's contents.
    pub(crate) fn parse_block(
        &mut self,
        ignore_missing_open_brace: bool,
        message: Option<&'static DiagnosticMessage>,
    ) -> NodeId {
        let pos = self.node_pos();
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected_with(SyntaxKind::OpenBraceToken, message);
        if !open_parsed && !ignore_missing_open_brace {
            let statements = self.create_missing_list();
            return self.finish_node(SyntaxKind::Block, pos, slots![statements]);
        }
        let statements = self.parse_list(ParsingContext::BlockStatements, Self::parse_statement);
        self.parse_expected_matching_brackets(
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            open_parsed,
            open_pos,
        );
        self.finish_node(SyntaxKind::Block, pos, slots![statements])
    }

    /// A function body: yield and await follow the function, and an
    /// enclosing decorator context ends here.
    pub(crate) fn parse_function_block(
        &mut self,
        is_generator: bool,
        is_async: bool,
        ignore_missing_open_brace: bool,
    ) -> NodeId {
        self.in_function_context(is_generator, is_async, |p| {
            p.outside_decorator_context(|p| p.parse_block(ignore_missing_open_brace, None))
        })
    }

    /// A body, or nothing for an overload or ambient signature.
    pub(crate) fn parse_function_block_or_semicolon(&mut self, is_generator: bool, is_async: bool) -> Option<NodeId> {
        if self.token() != SyntaxKind::OpenBraceToken && self.can_parse_semicolon() {
            self.parse_semicolon();
            return None;
        }
        Some(self.parse_function_block(is_generator, is_async, false))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `( expression )` after `if`, `while` and `with`.
    fn parse_parenthesized_condition(&mut self) -> NodeId {
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in(Self::parse_expression);
        self.parse_expected_matching_brackets(
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            open_parsed,
            open_pos,
        );
        expression
    }

    fn parse_if_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement())
        } else {
            None
        };
        self.finish_node(SyntaxKind::IfStatement, pos, slots![expression, then_statement, else_statement])
    }

    fn parse_do_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DoKeyword);
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        // ASI always applies after `do ... while (x)`.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(SyntaxKind::DoStatement, pos, slots![statement, expression])
    }

    fn parse_while_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.finish_node(SyntaxKind::WhileStatement, pos, slots![expression, statement])
    }

    fn parse_for_or_for_in_or_for_of_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ForKeyword);
        let await_token = self.parse_optional_token(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.token() == SyntaxKind::SemicolonToken {
            None
        } else if self.is_for_initializer_declaration() {
            Some(self.parse_variable_declaration_list(true))
        } else {
            Some(self.disallow_in(Self::parse_expression))
        };

        let is_for_of = if await_token.is_some() {
            self.parse_expected(SyntaxKind::OfKeyword)
        } else {
            self.parse_optional(SyntaxKind::OfKeyword)
        };
        if is_for_of {
            let expression = self.allow_in(|p| p.parse_assignment_expression_or_higher(true));
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.finish_node(
                SyntaxKind::ForOfStatement,
                pos,
                slots![await_token, initializer, expression, statement],
            );
        }
        if self.parse_optional(SyntaxKind::InKeyword) {
            let expression = self.allow_in(Self::parse_expression);
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.finish_node(SyntaxKind::ForInStatement, pos, slots![initializer, expression, statement]);
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if matches!(self.token(), SyntaxKind::SemicolonToken | SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.allow_in(Self::parse_expression))
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.token() == SyntaxKind::CloseParenToken {
            None
        } else {
            Some(self.allow_in(Self::parse_expression))
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            SyntaxKind::ForStatement,
            pos,
            slots![initializer, condition, incrementor, statement],
        )
    }

    fn is_for_initializer_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => true,
            SyntaxKind::UsingKeyword => {
                self.look_ahead(|p| p.next_token_is_binding_identifier_or_start_of_destructuring_on_same_line(true))
            }
            SyntaxKind::AwaitKeyword => self.look_ahead(|p| {
                p.next_token() == SyntaxKind::UsingKeyword
                    && p.next_token_is_binding_identifier_or_start_of_destructuring_on_same_line(true)
            }),
            _ => false,
        }
    }

    fn parse_break_or_continue_statement(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let label = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.parse_identifier())
        };
        self.parse_semicolon();
        self.finish_node(kind, pos, slots![label])
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.allow_in(Self::parse_expression))
        };
        self.parse_semicolon();
        self.finish_node(SyntaxKind::ReturnStatement, pos, slots![expression])
    }

    fn parse_with_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::WithKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.do_in_context(NodeFlags::IN_WITH_STATEMENT, true, Self::parse_statement);
        self.finish_node(SyntaxKind::WithStatement, pos, slots![expression, statement])
    }

    fn parse_switch_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::SwitchKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);

        let block_pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let clauses = self.parse_list(ParsingContext::SwitchClauses, Self::parse_case_or_default_clause);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let case_block = self.finish_node(SyntaxKind::CaseBlock, block_pos, slots![clauses]);
        self.finish_node(SyntaxKind::SwitchStatement, pos, slots![expression, case_block])
    }

    fn parse_case_or_default_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.parse_optional(SyntaxKind::CaseKeyword) {
            let expression = self.allow_in(Self::parse_expression);
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_case_clause_statements();
            return self.finish_node(SyntaxKind::CaseClause, pos, slots![expression, statements]);
        }
        self.parse_expected(SyntaxKind::DefaultKeyword);
        self.parse_expected(SyntaxKind::ColonToken);
        let statements = self.parse_case_clause_statements();
        self.finish_node(SyntaxKind::DefaultClause, pos, slots![statements])
    }

    fn parse_case_clause_statements(&mut self) -> ListId {
        self.parse_list(ParsingContext::SwitchClauseStatements, Self::parse_statement)
    }

    fn parse_throw_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ThrowKeyword);
        // `throw` takes no ASI: a line break here leaves it without an operand.
        let expression = if self.has_preceding_line_break() {
            self.create_missing_node(SyntaxKind::Identifier, true, &messages::LINE_BREAK_NOT_PERMITTED_HERE, &[])
        } else {
            self.allow_in(Self::parse_expression)
        };
        self.parse_semicolon();
        self.finish_node(SyntaxKind::ThrowStatement, pos, slots![expression])
    }

    fn parse_try_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::TryKeyword);
        let try_block = self.parse_block(false, None);
        let catch_clause = if self.token() == SyntaxKind::CatchKeyword {
            Some(self.parse_catch_clause())
        } else {
            None
        };
        let finally_block = if catch_clause.is_none() || self.token() == SyntaxKind::FinallyKeyword {
            self.parse_expected_with(SyntaxKind::FinallyKeyword, Some(&messages::CATCH_OR_FINALLY_EXPECTED));
            Some(self.parse_block(false, None))
        } else {
            None
        };
        self.finish_node(SyntaxKind::TryStatement, pos, slots![try_block, catch_clause, finally_block])
    }

    fn parse_catch_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::CatchKeyword);
        let variable = if self.parse_optional(SyntaxKind::OpenParenToken) {
            let variable = self.parse_variable_declaration(false);
            self.parse_expected(SyntaxKind::CloseParenToken);
            Some(variable)
        } else {
            None
        };
        let block = self.parse_block(false, None);
        self.finish_node(SyntaxKind::CatchClause, pos, slots![variable, block])
    }

    fn parse_debugger_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DebuggerKeyword);
        self.parse_semicolon();
        self.finish_node(SyntaxKind::DebuggerStatement, pos, &[])
    }

    fn parse_expression_or_labeled_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        let start = self.token_pos();
        let expression = self.allow_in(Self::parse_expression);
        if self.arena.kind(expression) == SyntaxKind::Identifier && self.parse_optional(SyntaxKind::ColonToken) {
            let statement = self.parse_statement();
            return self.finish_node(SyntaxKind::LabeledStatement, pos, slots![expression, statement]);
        }
        if !self.try_parse_semicolon() {
            self.report_missing_semicolon_after(expression, start);
        }
        self.finish_node(SyntaxKind::ExpressionStatement, pos, slots![expression])
    }

    /// `foo bar`: a lone identifier followed by more code on the same line
    /// is usually a misspelled keyword, so it gets its own message.
    fn report_missing_semicolon_after(&mut self, expression: NodeId, start: u32) {
        let node = self.arena.node(expression);
        if node.kind != SyntaxKind::Identifier || node.is_missing() {
            self.parse_error_at_current_token(&messages::_0_EXPECTED, &[";"]);
            return;
        }
        let end = node.end();
        let is_declare = self.arena.text_of(expression) == Some("declare");
        if is_declare || self.token() == SyntaxKind::Unknown {
            return;
        }
        self.parse_error_at_position(start, end - start, &messages::UNEXPECTED_KEYWORD_OR_IDENTIFIER, &[]);
    }

    // ========================================================================
    // Variables
    // ========================================================================

    pub(crate) fn parse_variable_statement(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let declaration_list = self.parse_variable_declaration_list(false);
        self.parse_semicolon();
        self.finish_node(SyntaxKind::VariableStatement, pos, slots![modifiers, declaration_list])
    }

    /// `var`/`let`/`const`/`using`/`await using` and the declarators. In a
    /// `for` head `in` ends an initializer.
    pub(crate) fn parse_variable_declaration_list(&mut self, in_for_statement_initializer: bool) -> NodeId {
        let pos = self.node_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            SyntaxKind::UsingKeyword => NodeFlags::USING,
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                NodeFlags::AWAIT_USING
            }
            _ => NodeFlags::NONE,
        };
        self.next_token();

        // `for (let of x)`: `let` is the binding being iterated.
        let declarations = if self.token() == SyntaxKind::OfKeyword && self.look_ahead(Self::can_follow_contextual_of_keyword) {
            self.create_missing_list()
        } else {
            let allow_exclamation = !in_for_statement_initializer;
            self.do_in_context(NodeFlags::DISALLOW_IN_CONTEXT, in_for_statement_initializer, |p| {
                p.parse_delimited_list(
                    ParsingContext::VariableDeclarations,
                    |p| p.parse_variable_declaration(allow_exclamation),
                    false,
                )
            })
        };
        self.finish_node_with_flags(SyntaxKind::VariableDeclarationList, pos, flags, slots![declarations])
    }

    fn can_follow_contextual_of_keyword(&mut self) -> bool {
        self.next_token_is_identifier() && self.next_token() == SyntaxKind::CloseParenToken
    }

    pub(crate) fn parse_variable_declaration(&mut self, allow_exclamation: bool) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_identifier_or_pattern();
        let exclamation = if allow_exclamation
            && self.arena.kind(name) == SyntaxKind::Identifier
            && self.token() == SyntaxKind::ExclamationToken
            && !self.has_preceding_line_break()
        {
            Some(self.parse_token_node())
        } else {
            None
        };
        let ty = self.parse_type_annotation();
        let initializer = if matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::OfKeyword) {
            None
        } else {
            self.parse_initializer()
        };
        self.finish_node(SyntaxKind::VariableDeclaration, pos, slots![name, exclamation, ty, initializer])
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

    fn statement_kinds(file: &SourceFile) -> Vec<SyntaxKind> {
        file.statements().iter().map(|&id| file.arena.kind(id)).collect()
    }

    #[test]
    fn test_statement_kinds() {
        let file = parse(
            "var a = 1;\n\
             if (a) b(); else c();\n\
             do x++; while (x < 3)\n\
             while (y) {}\n\
             for (let i = 0; i < 3; i++) {}\n\
             for (const k in o) {}\n\
             for (const v of xs) {}\n\
             label: for (;;) { break label; }\n\
             switch (a) { case 1: break; default: }\n\
             try { f(); } catch (e) { } finally { }\n\
             debugger;\n\
             ;\n",
        );
        assert!(file.diagnostics.is_empty(), "{:?}", file.diagnostics);
        assert_eq!(
            statement_kinds(&file),
            vec![
                SyntaxKind::VariableStatement,
                SyntaxKind::IfStatement,
                SyntaxKind::DoStatement,
                SyntaxKind::WhileStatement,
                SyntaxKind::ForStatement,
                SyntaxKind::ForInStatement,
                SyntaxKind::ForOfStatement,
                SyntaxKind::LabeledStatement,
                SyntaxKind::SwitchStatement,
                SyntaxKind::TryStatement,
                SyntaxKind::DebuggerStatement,
                SyntaxKind::EmptyStatement,
            ]
        );
    }

    #[test]
    fn test_declaration_list_flags() {
        let file = parse("let a; const b = 1; using c = d; var e;");
        let flags: Vec<NodeFlags> = file
            .statements()
            .iter()
            .map(|&statement| {
                let list = file.arena.node(statement).child_node(1).unwrap();
                file.arena.node(list).flags & NodeFlags::BLOCK_SCOPED
            })
            .collect();
        assert_eq!(flags, vec![NodeFlags::LET, NodeFlags::CONST, NodeFlags::USING, NodeFlags::NONE]);
    }

    #[test]
    fn test_await_using_in_module() {
        let options = ParseOptions::default().with_source_type(crate::options::SourceType::Module);
        let file = Parser::new("test.ts", "await using r = open();", options).parse_source_file();
        assert!(file.diagnostics.is_empty());
        let list = file.arena.node(file.statements()[0]).child_node(1).unwrap();
        assert!(file.arena.node(list).flags.contains(NodeFlags::AWAIT_USING));
    }

    #[test]
    fn test_let_as_identifier() {
        let file = parse("let;");
        assert_eq!(statement_kinds(&file), vec![SyntaxKind::ExpressionStatement]);
    }

    #[test]
    fn test_for_in_initializer_disallows_in() {
        let file = parse("for (var x = a in b;;) {}");
        assert!(!file.diagnostics.is_empty());
        let file = parse("for (var x in b) {}");
        assert!(file.diagnostics.is_empty());
        assert_eq!(statement_kinds(&file), vec![SyntaxKind::ForInStatement]);
    }

    #[test]
    fn test_missing_catch_and_finally() {
        let file = parse("try { }");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].message_text, "'catch' or 'finally' expected.");
    }

    #[test]
    fn test_throw_requires_operand_on_same_line() {
        let file = parse("throw\nx;");
        assert_eq!(file.diagnostics[0].message_text, "Line break not permitted here.");
    }

    #[test]
    fn test_unexpected_identifier_after_expression() {
        let file = parse("foo bar;");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].code, 1434);
        assert_eq!(file.diagnostics[0].start(), 0);
    }

    #[test]
    fn test_arrow_body_with_missing_brace() {
        let file = parse("const f = () => return 1;");
        assert!(file.diagnostics.iter().any(|d| d.message_text == "'{' expected."));
    }
}
