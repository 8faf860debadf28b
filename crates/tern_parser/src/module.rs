//! Import and export declarations.

use tern_ast::{ListId, NodeFlags, NodeId, SyntaxKind};
use tern_diagnostics::messages;

use crate::list::ParsingContext;
use crate::parser::{slots, Parser};

impl Parser {
    // ========================================================================
    // Imports
    // ========================================================================

    pub(crate) fn parse_import_declaration_or_import_equals_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<ListId>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ImportKeyword);
        let after_import_pos = self.node_pos();

        let type_keyword = if self.token() == SyntaxKind::TypeKeyword && self.look_ahead(Self::is_type_only_import_start)
        {
            Some(self.parse_token_node())
        } else {
            None
        };
        let identifier = if self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            None
        };

        if let Some(identifier) = identifier {
            if !matches!(self.token(), SyntaxKind::CommaToken | SyntaxKind::FromKeyword) {
                return self.parse_import_equals_declaration(pos, modifiers, type_keyword, identifier);
            }
        }

        let import_clause = if identifier.is_some()
            || matches!(self.token(), SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken)
        {
            let clause = self.parse_import_clause(after_import_pos, type_keyword, identifier);
            self.parse_expected(SyntaxKind::FromKeyword);
            Some(clause)
        } else {
            None
        };
        let module_specifier = self.parse_module_specifier();
        let attributes = self.try_parse_import_attributes();
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ImportDeclaration,
            pos,
            slots![modifiers, import_clause, module_specifier, attributes],
        )
    }

    /// At `type` after `import`: whether it marks a type-only import
    /// rather than naming the default binding.
    fn is_type_only_import_start(&mut self) -> bool {
        self.next_token();
        // `import type from "m"` imports a binding named `type`, while
        // `import type from from "m"` is type-only.
        let names_binding = self.token() != SyntaxKind::FromKeyword
            || (self.is_identifier() && self.look_ahead(Self::next_token_is_from_keyword_or_equals_token));
        names_binding
            && (self.is_identifier()
                || matches!(self.token(), SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken))
    }

    fn next_token_is_from_keyword_or_equals_token(&mut self) -> bool {
        matches!(self.next_token(), SyntaxKind::FromKeyword | SyntaxKind::EqualsToken)
    }

    fn parse_import_equals_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<ListId>,
        type_keyword: Option<NodeId>,
        name: NodeId,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::EqualsToken);
        let module_reference = self.parse_module_reference();
        self.parse_semicolon();
        self.finish_node(
            SyntaxKind::ImportEqualsDeclaration,
            pos,
            slots![modifiers, type_keyword, name, module_reference],
        )
    }

    fn parse_module_reference(&mut self) -> NodeId {
        if self.token() == SyntaxKind::RequireKeyword && self.look_ahead(|p| p.next_token() == SyntaxKind::OpenParenToken)
        {
            let pos = self.node_pos();
            self.parse_expected(SyntaxKind::RequireKeyword);
            self.parse_expected(SyntaxKind::OpenParenToken);
            let expression = self.parse_module_specifier();
            self.parse_expected(SyntaxKind::CloseParenToken);
            return self.finish_node(SyntaxKind::ExternalModuleReference, pos, slots![expression]);
        }
        self.parse_entity_name(false, None)
    }

    fn parse_module_specifier(&mut self) -> NodeId {
        if self.token() == SyntaxKind::StringLiteral {
            self.parse_literal_node()
        } else {
            // Not a valid specifier, but an expression keeps recovery
            // simple; the checker reports it.
            self.parse_expression()
        }
    }

    fn parse_import_clause(&mut self, pos: u32, type_keyword: Option<NodeId>, name: Option<NodeId>) -> NodeId {
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            if self.token() == SyntaxKind::AsteriskToken {
                Some(self.parse_namespace_import())
            } else {
                Some(self.parse_named_imports_or_exports(SyntaxKind::NamedImports))
            }
        } else {
            None
        };
        self.finish_node(SyntaxKind::ImportClause, pos, slots![type_keyword, name, named_bindings])
    }

    fn parse_namespace_import(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = self.parse_identifier();
        self.finish_node(SyntaxKind::NamespaceImport, pos, slots![name])
    }

    fn parse_named_imports_or_exports(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let specifier_kind = if kind == SyntaxKind::NamedImports {
            SyntaxKind::ImportSpecifier
        } else {
            SyntaxKind::ExportSpecifier
        };
        let elements = self.parse_bracketed_list(
            ParsingContext::ImportOrExportSpecifiers,
            |p| p.parse_import_or_export_specifier(specifier_kind),
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
        );
        self.finish_node(kind, pos, slots![elements])
    }

    /// `a`, `a as b`, `type a`, `"s" as b`, and the `type as as x`
    /// family, where each `as` may be a name.
    fn parse_import_or_export_specifier(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let type_keyword = if self.token() == SyntaxKind::TypeKeyword && self.look_ahead(Self::is_type_only_specifier_start)
        {
            Some(self.parse_token_node())
        } else {
            None
        };

        let mut keyword_name = self.token_is_non_identifier_keyword();
        let mut name = self.parse_module_export_name();
        let mut property_name = None;
        if self.token() == SyntaxKind::AsKeyword {
            property_name = Some(name);
            self.parse_expected(SyntaxKind::AsKeyword);
            keyword_name = self.token_is_non_identifier_keyword();
            name = self.parse_module_export_name();
        }
        // Export specifiers may name a keyword; an import binds a local.
        if kind == SyntaxKind::ImportSpecifier {
            if let Some((start, end)) = keyword_name {
                self.parse_error_at_position(start, end - start, &messages::IDENTIFIER_EXPECTED, &[]);
            }
        }
        self.finish_node(kind, pos, slots![type_keyword, property_name, name])
    }

    /// At `type` in a specifier list.
    fn is_type_only_specifier_start(&mut self) -> bool {
        let next = self.next_token();
        if next == SyntaxKind::AsKeyword {
            // `type as as x` is type-only; `type as as` renames `type`.
            let after = self.next_token();
            if after == SyntaxKind::AsKeyword {
                return self.next_token().is_identifier_or_keyword();
            }
            // `type as x` renames `type`; `type as` imports `as`.
            return !after.is_identifier_or_keyword();
        }
        next.is_identifier_or_keyword() || next == SyntaxKind::StringLiteral
    }

    fn token_is_non_identifier_keyword(&self) -> Option<(u32, u32)> {
        if self.token().is_keyword() && !self.is_identifier() {
            Some((self.token_pos(), self.token_end()))
        } else {
            None
        }
    }

    fn parse_module_export_name(&mut self) -> NodeId {
        if self.token() == SyntaxKind::StringLiteral {
            self.parse_literal_node()
        } else {
            self.parse_identifier_name()
        }
    }

    fn try_parse_import_attributes(&mut self) -> Option<NodeId> {
        if matches!(self.token(), SyntaxKind::WithKeyword | SyntaxKind::AssertKeyword) && !self.has_preceding_line_break() {
            let pos = self.node_pos();
            let keyword = self.parse_token_node();
            return Some(self.parse_import_attributes(pos, keyword));
        }
        None
    }

    /// `{ key: value, ... }` after `with` or `assert`, which the caller has
    /// already consumed as `keyword`.
    pub(crate) fn parse_import_attributes(&mut self, pos: u32, keyword: NodeId) -> NodeId {
        let open_pos = self.token_pos();
        let elements = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let elements =
                self.parse_delimited_list(ParsingContext::ImportAttributes, Self::parse_import_attribute, true);
            self.parse_expected_matching_brackets(
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                true,
                open_pos,
            );
            elements
        } else {
            let empty_pos = self.node_pos();
            self.create_list(empty_pos, Vec::new(), false)
        };
        self.finish_node(SyntaxKind::ImportAttributes, pos, slots![keyword, elements])
    }

    fn parse_import_attribute(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = if self.is_identifier_or_keyword() {
            self.parse_identifier_name()
        } else {
            self.parse_literal_node()
        };
        self.parse_expected(SyntaxKind::ColonToken);
        let value = self.parse_assignment_expression_or_higher(true);
        self.finish_node(SyntaxKind::ImportAttribute, pos, slots![name, value])
    }

    // ========================================================================
    // Exports
    // ========================================================================

    /// `export { a }`, `export * from "m"`, `export * as ns from "m"` and
    /// their `type` forms. `export` has been consumed.
    pub(crate) fn parse_export_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let context = self.context.with(NodeFlags::AWAIT_CONTEXT);
        self.with_context(context, |p| {
            let type_keyword = p.parse_optional_token(SyntaxKind::TypeKeyword);
            let namespace_export_pos = p.node_pos();
            let mut module_specifier = None;
            let export_clause = if p.parse_optional(SyntaxKind::AsteriskToken) {
                let clause = if p.parse_optional(SyntaxKind::AsKeyword) {
                    let name = p.parse_module_export_name();
                    Some(p.finish_node(SyntaxKind::NamespaceExport, namespace_export_pos, slots![name]))
                } else {
                    None
                };
                p.parse_expected(SyntaxKind::FromKeyword);
                module_specifier = Some(p.parse_module_specifier());
                clause
            } else {
                let clause = p.parse_named_imports_or_exports(SyntaxKind::NamedExports);
                // `from` is often missing while typing `export { a } "m"`.
                if p.token() == SyntaxKind::FromKeyword
                    || (p.token() == SyntaxKind::StringLiteral && !p.has_preceding_line_break())
                {
                    p.parse_expected(SyntaxKind::FromKeyword);
                    module_specifier = Some(p.parse_module_specifier());
                }
                Some(clause)
            };
            let attributes = match module_specifier {
                Some(_) => p.try_parse_import_attributes(),
                None => None,
            };
            p.parse_semicolon();
            p.finish_node(
                SyntaxKind::ExportDeclaration,
                pos,
                slots![modifiers, type_keyword, export_clause, module_specifier, attributes],
            )
        })
    }

    /// `export = x` and `export default x`.
    pub(crate) fn parse_export_assignment(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        let context = self.context.with(NodeFlags::AWAIT_CONTEXT);
        self.with_context(context, |p| {
            let equals = p.parse_optional_token(SyntaxKind::EqualsToken);
            if equals.is_none() {
                p.parse_expected(SyntaxKind::DefaultKeyword);
            }
            let expression = p.parse_assignment_expression_or_higher(true);
            p.parse_semicolon();
            p.finish_node(SyntaxKind::ExportAssignment, pos, slots![modifiers, equals, expression])
        })
    }

    /// `export as namespace Lib;`
    pub(crate) fn parse_namespace_export_declaration(&mut self, pos: u32, modifiers: Option<ListId>) -> NodeId {
        self.parse_expected(SyntaxKind::AsKeyword);
        self.parse_expected(SyntaxKind::NamespaceKeyword);
        let name = self.parse_identifier();
        self.parse_semicolon();
        self.finish_node(SyntaxKind::NamespaceExportDeclaration, pos, slots![modifiers, name])
    }
}
