//! Parser state and the token-level machinery every production shares.
//!
//! The parser is a recursive descent parser over the scanner's token
//! stream. All mutable state lives in [`Parser`]: the scanner cursor, the
//! arena receiving finished nodes, the active context flags, the open
//! list contexts and the diagnostics. Productions are spread across the
//! sibling modules as further `impl Parser` blocks.

use rustc_hash::FxHashSet;
use tern_ast::visitor::find_node;
use tern_ast::{
    is_declaration_file_name, ListFlags, ListId, Node, NodeArena, NodeFlags, NodeId, NodeList, ScriptKind, Slot,
    SourceFile, SyntaxKind, TokenFlags,
};
use tern_core::text::{TextRange, TextSpan};
use tern_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use tern_scanner::Scanner;
use tracing::debug;

use crate::context::ParseContext;
use crate::incremental::cursor::SyntaxCursor;
use crate::list::ParsingContext;
use crate::options::{ParseOptions, SourceType};

/// Build a child slot array from nodes, lists and their `Option`s.
macro_rules! slots {
    ($($child:expr),* $(,)?) => {
        &[$(tern_ast::Slot::from($child)),*]
    };
}
pub(crate) use slots;

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 200;

/// The parser produces a [`SourceFile`] from source text.
pub struct Parser {
    pub(crate) scanner: Scanner,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) source_text: String,
    pub(crate) script_kind: ScriptKind,
    pub(crate) context: ParseContext,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Set by every reported error; consumed by the next finished node.
    pub(crate) parse_error_before_next_finished_node: bool,
    /// Bitset of the [`ParsingContext`]s whose lists are currently open.
    pub(crate) parsing_contexts: u32,
    /// Present only while reparsing incrementally.
    pub(crate) syntax_cursor: Option<SyntaxCursor>,
    /// Token positions where a parenthesized arrow function already failed.
    pub(crate) not_parenthesized_arrow: FxHashSet<u32>,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    pub(crate) recursion_depth: u32,
    /// Nodes already in the arena when parsing started. Any of them that
    /// ends up in the tree was reused from an older parse.
    pub(crate) reuse_boundary: usize,
    pub(crate) saw_import_meta: bool,
}

impl Parser {
    pub fn new(file_name: &str, source_text: &str, options: ParseOptions) -> Self {
        Self::with_parts(Scanner::default(), NodeArena::new(), file_name, source_text, options)
    }

    /// Parse with a caller-provided scanner and arena. The scanner's buffers
    /// are reused; the arena may already hold nodes (incremental updates
    /// parse into a copy of the old tree's arena).
    pub(crate) fn with_parts(
        mut scanner: Scanner,
        arena: NodeArena,
        file_name: &str,
        source_text: &str,
        options: ParseOptions,
    ) -> Self {
        let script_kind = options.resolved_script_kind(file_name);
        scanner.set_text(source_text, 0, None);
        scanner.set_language_variant(script_kind.language_variant());

        let mut flags = NodeFlags::NONE;
        if script_kind.is_javascript() {
            flags |= NodeFlags::JAVASCRIPT_FILE;
        }
        if is_declaration_file_name(file_name) {
            flags |= NodeFlags::AMBIENT;
        }
        if options.source_type == SourceType::Module {
            flags |= NodeFlags::AWAIT_CONTEXT;
        }

        let reuse_boundary = arena.node_capacity_used();
        Self {
            scanner,
            arena,
            file_name: file_name.to_string(),
            source_text: source_text.to_string(),
            script_kind,
            context: ParseContext::new(flags),
            diagnostics: Vec::new(),
            parse_error_before_next_finished_node: false,
            parsing_contexts: 0,
            syntax_cursor: None,
            not_parenthesized_arrow: FxHashSet::default(),
            recursion_depth: 0,
            reuse_boundary,
            saw_import_meta: false,
        }
    }

    pub(crate) fn set_syntax_cursor(&mut self, cursor: SyntaxCursor) {
        self.syntax_cursor = Some(cursor);
    }

    /// Parse the whole text as a source file.
    pub fn parse_source_file(self) -> SourceFile {
        self.parse_source_file_returning_scanner().0
    }

    pub(crate) fn parse_source_file_returning_scanner(mut self) -> (SourceFile, Scanner) {
        debug!(file = %self.file_name, script_kind = ?self.script_kind, "parse start");
        self.next_token();
        let statements = self.parse_list(ParsingContext::SourceElements, Self::parse_statement);
        debug_assert_eq!(self.token(), SyntaxKind::EndOfFileToken);
        let end_of_file_token = self.parse_token_node();
        let root = self.finish_node(SyntaxKind::SourceFile, 0, slots![statements, end_of_file_token]);
        self.into_source_file(root)
    }

    fn into_source_file(self, root: NodeId) -> (SourceFile, Scanner) {
        let external_module_indicator = self.external_module_indicator(root);
        let is_declaration_file = is_declaration_file_name(&self.file_name);
        let mut file = SourceFile::with_reuse_boundary(
            self.file_name,
            self.source_text,
            self.script_kind,
            self.arena,
            root,
            self.diagnostics,
            self.reuse_boundary,
        );
        file.external_module_indicator = external_module_indicator;
        file.is_declaration_file = is_declaration_file;
        debug!(
            file = %file.file_name,
            nodes = file.node_count,
            diagnostics = file.diagnostics.len(),
            reused = file.reused_node_count,
            "parse finished"
        );
        (file, self.scanner)
    }

    /// The first top-level import or export form, else an `import.meta` use.
    fn external_module_indicator(&self, root: NodeId) -> Option<NodeId> {
        let statements = self.arena.elements(self.arena.node(root).child_list(0));
        let indicator = statements.iter().copied().find(|&id| self.is_external_module_indicator(id));
        if indicator.is_some() || !self.saw_import_meta {
            return indicator;
        }
        find_node(&self.arena, root, |id| {
            let node = self.arena.node(id);
            node.kind == SyntaxKind::MetaProperty
                && node.child_node(0).is_some_and(|k| self.arena.kind(k) == SyntaxKind::ImportKeyword)
        })
    }

    fn is_external_module_indicator(&self, id: NodeId) -> bool {
        let node = self.arena.node(id);
        match node.kind {
            SyntaxKind::ImportDeclaration | SyntaxKind::ExportAssignment | SyntaxKind::ExportDeclaration => true,
            SyntaxKind::ImportEqualsDeclaration => node
                .child_node(3)
                .is_some_and(|r| self.arena.kind(r) == SyntaxKind::ExternalModuleReference),
            _ => self.has_modifier(id, SyntaxKind::ExportKeyword),
        }
    }

    /// Whether the modifier list in slot 0 of `id` holds a `kind` token.
    pub(crate) fn has_modifier(&self, id: NodeId, kind: SyntaxKind) -> bool {
        let modifiers = self.arena.node(id).child_list(0);
        self.arena.elements(modifiers).iter().any(|&m| self.arena.kind(m) == kind)
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    /// Scan the next token and turn queued scan errors into diagnostics.
    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        let token = self.scanner.scan();
        self.drain_scan_errors();
        token
    }

    /// The scanner keeps no record of drained errors across a rewind, so
    /// they are moved into the diagnostics (which speculation does track)
    /// after every scan.
    pub(crate) fn drain_scan_errors(&mut self) {
        if self.scanner.has_errors() {
            for error in self.scanner.take_errors() {
                self.parse_error_at_position(error.pos, error.length, error.message, &[]);
            }
        }
    }

    /// Start of the current token including leading trivia.
    #[inline]
    pub(crate) fn node_pos(&self) -> u32 {
        self.scanner.full_start() as u32
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn re_scan_greater_token(&mut self) -> SyntaxKind {
        let token = self.scanner.rescan_greater_token();
        self.drain_scan_errors();
        token
    }

    pub(crate) fn re_scan_slash_token(&mut self) -> SyntaxKind {
        let token = self.scanner.rescan_slash_token();
        self.drain_scan_errors();
        token
    }

    pub(crate) fn re_scan_template_token(&mut self, is_tagged: bool) -> SyntaxKind {
        let token = self.scanner.rescan_template_token(is_tagged);
        self.drain_scan_errors();
        token
    }

    pub(crate) fn re_scan_less_than_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_less_than_token()
    }

    pub(crate) fn scan_jsx_text(&mut self) -> SyntaxKind {
        let token = self.scanner.scan_jsx_token(true);
        self.drain_scan_errors();
        token
    }

    pub(crate) fn re_scan_jsx_token(&mut self) -> SyntaxKind {
        let token = self.scanner.rescan_jsx_token(true);
        self.drain_scan_errors();
        token
    }

    pub(crate) fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        self.scanner.scan_jsx_identifier()
    }

    pub(crate) fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        let token = self.scanner.scan_jsx_attribute_value();
        self.drain_scan_errors();
        token
    }

    /// Identifiers, plus contextual and strict-mode keywords unless the
    /// context reserves them (`yield` in generators, `await` in async code).
    pub(crate) fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword if self.context.in_yield() => false,
            SyntaxKind::AwaitKeyword if self.context.in_await() => false,
            token => token.is_identifier_like(),
        }
    }

    #[inline]
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.token().is_identifier_or_keyword()
    }

    // ========================================================================
    // Expected and optional tokens
    // ========================================================================

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        self.parse_expected_with(kind, None)
    }

    pub(crate) fn parse_expected_with(&mut self, kind: SyntaxKind, message: Option<&'static DiagnosticMessage>) -> bool {
        if self.token() == kind {
            self.next_token();
            return true;
        }
        match message {
            Some(message) => self.parse_error_at_current_token(message, &[]),
            None => self.report_expected_token(kind),
        };
        false
    }

    pub(crate) fn report_expected_token(&mut self, kind: SyntaxKind) -> Option<usize> {
        let text = kind.token_text().unwrap_or("token");
        self.parse_error_at_current_token(&messages::_0_EXPECTED, &[text])
    }

    /// Expect `close`. When it is missing, point a related diagnostic at the
    /// `open` token that needed it.
    pub(crate) fn parse_expected_matching_brackets(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        open_parsed: bool,
        open_pos: u32,
    ) -> bool {
        if self.token() == close {
            self.next_token();
            return true;
        }
        let reported = self.report_expected_token(close);
        if !open_parsed {
            return false;
        }
        if let Some(index) = reported {
            let open_text = open.token_text().unwrap_or("token");
            let close_text = close.token_text().unwrap_or("token");
            let related = Diagnostic::with_location(
                self.file_name.as_str(),
                TextSpan::new(open_pos, 1),
                &messages::THE_PARSER_EXPECTED_TO_FIND_A_1_TO_MATCH_THE_0_TOKEN_HERE,
                &[open_text, close_text],
            );
            self.diagnostics[index].related_information.push(related);
        }
        false
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_optional_token(&mut self, kind: SyntaxKind) -> Option<NodeId> {
        if self.token() == kind {
            Some(self.parse_token_node())
        } else {
            None
        }
    }

    /// The `kind` token, or a missing one with a diagnostic.
    pub(crate) fn parse_expected_token(&mut self, kind: SyntaxKind) -> NodeId {
        match self.parse_optional_token(kind) {
            Some(token) => token,
            None => {
                let text = kind.token_text().unwrap_or("token");
                self.create_missing_node(kind, false, &messages::_0_EXPECTED, &[text])
            }
        }
    }

    /// Turn the current token into a node and advance.
    pub(crate) fn parse_token_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        let kind = self.token();
        self.next_token();
        self.finish_node(kind, pos, &[])
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    pub(crate) fn try_parse_semicolon(&mut self) -> bool {
        if !self.can_parse_semicolon() {
            return false;
        }
        if self.token() == SyntaxKind::SemicolonToken {
            self.next_token();
        }
        true
    }

    pub(crate) fn parse_semicolon(&mut self) -> bool {
        self.try_parse_semicolon() || self.parse_expected(SyntaxKind::SemicolonToken)
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// End of the last consumed token.
    #[inline]
    pub(crate) fn node_end(&self) -> u32 {
        self.scanner.full_start() as u32
    }

    pub(crate) fn finish_node(&mut self, kind: SyntaxKind, pos: u32, slots: &[Slot]) -> NodeId {
        let end = self.node_end();
        self.finish(Node::new(kind, TextRange::new(pos, end)).with_slots(slots))
    }

    pub(crate) fn finish_node_with_flags(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        flags: NodeFlags,
        slots: &[Slot],
    ) -> NodeId {
        let end = self.node_end();
        self.finish(Node::new(kind, TextRange::new(pos, end)).with_flags(flags).with_slots(slots))
    }

    /// Stamp `node` with the active context flags and the pending-error
    /// marker, aggregate child errors, and store it.
    pub(crate) fn finish(&mut self, mut node: Node) -> NodeId {
        debug_assert!(node.pos() <= node.end());
        node.flags |= self.context.flags();
        if std::mem::take(&mut self.parse_error_before_next_finished_node) {
            node.flags |= NodeFlags::THIS_NODE_HAS_ERROR;
        }
        if node.slots.iter().any(|&slot| self.slot_has_error(slot)) {
            node.flags |= NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR;
        }
        self.arena.alloc(node)
    }

    fn slot_has_error(&self, slot: Slot) -> bool {
        match slot {
            Slot::Empty => false,
            Slot::Node(id) => self.arena.node(id).subtree_has_error(),
            Slot::List(id) => self.arena.list(id).contains_error(),
        }
    }

    pub(crate) fn create_list(&mut self, pos: u32, elements: Vec<NodeId>, has_trailing_comma: bool) -> ListId {
        let end = self.node_end();
        self.create_list_in(TextRange::new(pos, end), elements, has_trailing_comma)
    }

    pub(crate) fn create_list_in(&mut self, range: TextRange, elements: Vec<NodeId>, has_trailing_comma: bool) -> ListId {
        let mut list = NodeList::new(range, elements);
        if list.iter().any(|id| self.arena.node(id).subtree_has_error()) {
            list.flags |= ListFlags::CONTAINS_ERROR;
        }
        if has_trailing_comma {
            list.flags |= ListFlags::HAS_TRAILING_COMMA;
        }
        self.arena.alloc_list(list)
    }

    /// A zero-width list standing in for one the source omits.
    pub(crate) fn create_missing_list(&mut self) -> ListId {
        let pos = self.node_pos();
        let mut list = NodeList::new(TextRange::empty(pos), Vec::new());
        list.flags |= ListFlags::MISSING;
        self.arena.alloc_list(list)
    }

    /// A zero-width `kind` node, reporting `message` at the current token
    /// (or at the current position when `report_at_current_position`).
    pub(crate) fn create_missing_node(
        &mut self,
        kind: SyntaxKind,
        report_at_current_position: bool,
        message: &'static DiagnosticMessage,
        args: &[&str],
    ) -> NodeId {
        if report_at_current_position {
            self.parse_error_at_position(self.node_pos(), 0, message, args);
        } else {
            self.parse_error_at_current_token(message, args);
        }
        let pos = self.node_pos();
        let mut node = Node::new(kind, TextRange::empty(pos));
        if kind == SyntaxKind::Identifier {
            node = node.with_text(self.arena.intern(""));
        }
        self.finish(node)
    }

    /// A node carrying the current token's cooked text: identifiers,
    /// literals and template pieces.
    pub(crate) fn parse_text_node(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let text = self.arena.intern(self.scanner.token_value());
        let token_flags = self.scanner.token_flags() - TokenFlags::PRECEDING_LINE_BREAK;
        self.next_token();
        let end = self.node_end();
        self.finish(
            Node::new(kind, TextRange::new(pos, end))
                .with_text(text)
                .with_token_flags(token_flags),
        )
    }

    /// Run `f` one nesting level deeper, or report and return a missing
    /// node when the input nests too deeply.
    pub(crate) fn guarded(&mut self, missing: SyntaxKind, f: impl FnOnce(&mut Self) -> NodeId) -> NodeId {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            let node = self.create_missing_node(missing, false, &messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            // Skip the offending token so enclosing lists keep making progress.
            if self.token() != SyntaxKind::EndOfFileToken {
                self.next_token();
            }
            return node;
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    pub(crate) fn create_identifier(&mut self, is_identifier: bool, message: Option<&'static DiagnosticMessage>) -> NodeId {
        if is_identifier {
            return self.parse_text_node(SyntaxKind::Identifier);
        }
        if self.token() == SyntaxKind::PrivateIdentifier {
            self.parse_error_at_current_token(&messages::PRIVATE_IDENTIFIERS_ARE_NOT_ALLOWED_OUTSIDE_CLASS_BODIES, &[]);
            return self.parse_text_node(SyntaxKind::Identifier);
        }
        let report_at_current_position = self.token() == SyntaxKind::EndOfFileToken;
        let text = self.scanner.token_text();
        let message = if self.scanner.is_reserved_word() {
            message.unwrap_or(&messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD)
        } else {
            message.unwrap_or(&messages::IDENTIFIER_EXPECTED)
        };
        self.create_missing_node(SyntaxKind::Identifier, report_at_current_position, message, &[&text])
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeId {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier, None)
    }

    pub(crate) fn parse_identifier_with_message(&mut self, message: &'static DiagnosticMessage) -> NodeId {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier, Some(message))
    }

    pub(crate) fn parse_binding_identifier(&mut self) -> NodeId {
        self.parse_identifier()
    }

    /// Any identifier or keyword, as allowed after `.` and in property names.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeId {
        let is_name = self.is_identifier_or_keyword();
        self.create_identifier(is_name, None)
    }

    pub(crate) fn parse_private_identifier(&mut self) -> NodeId {
        self.parse_text_node(SyntaxKind::PrivateIdentifier)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Report at the current token. Returns the index of the new diagnostic
    /// unless it was dropped as a duplicate.
    pub(crate) fn parse_error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) -> Option<usize> {
        let start = self.token_pos();
        let length = self.token_end() - start;
        self.parse_error_at_position(start, length, message, args)
    }

    pub(crate) fn parse_error_at_range(&mut self, range: TextRange, message: &DiagnosticMessage, args: &[&str]) -> Option<usize> {
        self.parse_error_at_position(range.pos, range.len(), message, args)
    }

    /// Only the first error at a given start position is kept.
    pub(crate) fn parse_error_at_position(
        &mut self,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Option<usize> {
        let duplicate = self.diagnostics.last().is_some_and(|last| last.start() == start);
        self.parse_error_before_next_finished_node = true;
        if duplicate {
            return None;
        }
        self.diagnostics.push(Diagnostic::with_location(
            self.file_name.as_str(),
            TextSpan::new(start, length),
            message,
            args,
        ));
        Some(self.diagnostics.len() - 1)
    }
}
