//! Lookahead and trial parses with exact rollback.

use tern_ast::ArenaMark;
use tern_scanner::ScannerState;
use tracing::trace;

use crate::context::ParseContext;
use crate::parser::Parser;

/// Everything a rollback restores. Context flags and the open list
/// contexts are not restored, only checked: the call stack already
/// unwinds them.
pub(crate) struct ParserSnapshot {
    scanner: ScannerState,
    diagnostics_len: usize,
    parse_error_before_next_finished_node: bool,
    arena: ArenaMark,
    arena_nodes: usize,
    context: ParseContext,
    parsing_contexts: u32,
}

impl Parser {
    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.snapshot(),
            diagnostics_len: self.diagnostics.len(),
            parse_error_before_next_finished_node: self.parse_error_before_next_finished_node,
            arena: self.arena.mark(),
            arena_nodes: self.arena.node_capacity_used(),
            context: self.context,
            parsing_contexts: self.parsing_contexts,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        debug_assert_eq!(self.context, snapshot.context, "context flags leaked out of a speculative parse");
        debug_assert_eq!(self.parsing_contexts, snapshot.parsing_contexts);
        trace!(
            token = ?self.token(),
            dropped_nodes = self.arena.node_capacity_used().saturating_sub(snapshot.arena_nodes),
            dropped_diagnostics = self.diagnostics.len() - snapshot.diagnostics_len,
            "speculation rollback"
        );
        self.scanner.rewind(snapshot.scanner);
        self.diagnostics.truncate(snapshot.diagnostics_len);
        self.parse_error_before_next_finished_node = snapshot.parse_error_before_next_finished_node;
        self.arena.rewind(snapshot.arena);
    }

    /// Run `f` and always roll back afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Run `f`, keeping its effects only when it returns `Some`.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        if result.is_none() {
            self.restore(snapshot);
        } else {
            debug_assert_eq!(self.context, snapshot.context, "context flags leaked out of a speculative parse");
        }
        result
    }

    /// Whether the token after the current one satisfies `f`.
    pub(crate) fn next_token_is(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            f(p)
        })
    }
}
