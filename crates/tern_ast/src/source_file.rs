//! The result of parsing one file.

use std::sync::OnceLock;

use indexmap::IndexSet;
use tern_core::intern::InternedString;
use tern_core::text::{TextPos, TextRange};
use tern_diagnostics::Diagnostic;

use crate::node::{ListId, NodeArena, NodeId};
use crate::syntax_kind::SyntaxKind;
use crate::types::{LanguageVariant, ScriptKind};

/// A parsed file: its tree, text and the summary data consumers read
/// without walking the tree.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    pub script_kind: ScriptKind,
    pub language_variant: LanguageVariant,
    pub arena: NodeArena,
    /// The `SourceFile` node.
    pub root: NodeId,
    pub diagnostics: Vec<Diagnostic>,
    pub node_count: usize,
    pub identifier_count: usize,
    /// Distinct identifier texts in first-occurrence order.
    pub identifiers: IndexSet<InternedString>,
    /// The first top-level import or export form, or an `import.meta` use.
    pub external_module_indicator: Option<NodeId>,
    pub is_declaration_file: bool,
    /// Nodes carried over unparsed from the previous tree by an incremental update.
    pub reused_node_count: usize,
    chars: OnceLock<Box<[char]>>,
}

impl SourceFile {
    pub fn new(
        file_name: String,
        text: String,
        script_kind: ScriptKind,
        arena: NodeArena,
        root: NodeId,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self::with_reuse_boundary(file_name, text, script_kind, arena, root, diagnostics, 0)
    }

    /// Like [`SourceFile::new`] for a tree parsed into a copy of an older
    /// arena. Nodes below `reuse_boundary` were allocated by the older parse,
    /// so any of them still in the tree was carried over unparsed.
    pub fn with_reuse_boundary(
        file_name: String,
        text: String,
        script_kind: ScriptKind,
        arena: NodeArena,
        root: NodeId,
        diagnostics: Vec<Diagnostic>,
        reuse_boundary: usize,
    ) -> Self {
        debug_assert_eq!(arena.kind(root), SyntaxKind::SourceFile);
        let stats = Statistics::collect(&arena, root, reuse_boundary);
        Self {
            file_name,
            text,
            script_kind,
            language_variant: script_kind.language_variant(),
            arena,
            root,
            diagnostics,
            node_count: stats.nodes,
            identifier_count: stats.identifier_count,
            identifiers: stats.identifiers,
            external_module_indicator: None,
            is_declaration_file: false,
            reused_node_count: stats.reused,
            chars: OnceLock::new(),
        }
    }

    pub fn statements_list(&self) -> Option<ListId> {
        self.arena.node(self.root).child_list(0)
    }

    pub fn statements(&self) -> &[NodeId] {
        self.arena.elements(self.statements_list())
    }

    pub fn end_of_file_token(&self) -> Option<NodeId> {
        self.arena.node(self.root).child_node(1)
    }

    #[inline]
    pub fn is_external_module(&self) -> bool {
        self.external_module_indicator.is_some()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// The text as chars, which is the unit every position counts in.
    pub fn chars(&self) -> &[char] {
        self.chars.get_or_init(|| self.text.chars().collect())
    }

    pub fn text_len(&self) -> TextPos {
        self.chars().len() as TextPos
    }

    /// Source text covered by `range`.
    pub fn slice(&self, range: TextRange) -> String {
        let chars = self.chars();
        let end = (range.end as usize).min(chars.len());
        let pos = (range.pos as usize).min(end);
        chars[pos..end].iter().collect()
    }

    pub fn set_parent_nodes(&mut self) {
        self.arena.set_parents(self.root);
    }

    /// `(kind, pos, end)` of every node in preorder.
    pub fn flatten(&self) -> Vec<(SyntaxKind, TextPos, TextPos)> {
        self.arena.flatten(self.root)
    }
}

#[derive(Default)]
struct Statistics {
    nodes: usize,
    reused: usize,
    identifier_count: usize,
    identifiers: IndexSet<InternedString>,
}

impl Statistics {
    fn collect(arena: &NodeArena, root: NodeId, reuse_boundary: usize) -> Self {
        let mut stats = Self::default();
        for id in arena.descendants(root) {
            stats.nodes += 1;
            if id.index() < reuse_boundary {
                stats.reused += 1;
            }
            let node = arena.node(id);
            if matches!(node.kind, SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier) {
                stats.identifier_count += 1;
                if let Some(text) = node.text {
                    stats.identifiers.insert(text);
                }
            }
        }
        stats
    }
}
