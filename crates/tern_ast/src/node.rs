//! Arena storage for syntax nodes and node lists.
//!
//! Nodes never hold references to each other. A node's children are an
//! ordered array of [`Slot`]s naming other nodes or lists by index, so a
//! whole tree can be cloned, truncated after a failed speculation, or
//! compacted without touching any pointers.

use std::sync::OnceLock;

use tern_core::intern::{InternedString, StringInterner};
use tern_core::text::{TextPos, TextRange};

use crate::syntax_kind::SyntaxKind;
use crate::types::{NodeFlags, TokenFlags};

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a list in a [`NodeArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListId(u32);

impl ListId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One child position of a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Slot {
    /// An optional child that is absent.
    #[default]
    Empty,
    Node(NodeId),
    List(ListId),
}

impl From<NodeId> for Slot {
    fn from(id: NodeId) -> Self {
        Slot::Node(id)
    }
}

impl From<Option<NodeId>> for Slot {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(Slot::Empty, Slot::Node)
    }
}

impl From<ListId> for Slot {
    fn from(id: ListId) -> Self {
        Slot::List(id)
    }
}

impl From<Option<ListId>> for Slot {
    fn from(id: Option<ListId>) -> Self {
        id.map_or(Slot::Empty, Slot::List)
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListFlags: u8 {
        const NONE                = 0;
        /// The list ended with a separator after its last element.
        const HAS_TRAILING_COMMA  = 1 << 0;
        /// Some element's subtree carries a parse error.
        const CONTAINS_ERROR      = 1 << 1;
        const INTERSECTS_CHANGE   = 1 << 2;
        /// A required list that was absent from the source.
        const MISSING             = 1 << 3;
    }
}

/// An ordered list of nodes with its own range.
#[derive(Debug, Clone)]
pub struct NodeList {
    pub range: TextRange,
    pub flags: ListFlags,
    pub elements: Box<[NodeId]>,
}

impl NodeList {
    pub fn new(range: TextRange, elements: Vec<NodeId>) -> Self {
        Self {
            range,
            flags: ListFlags::NONE,
            elements: elements.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements.iter().copied()
    }

    #[inline]
    pub fn has_trailing_comma(&self) -> bool {
        self.flags.contains(ListFlags::HAS_TRAILING_COMMA)
    }

    #[inline]
    pub fn contains_error(&self) -> bool {
        self.flags.contains(ListFlags::CONTAINS_ERROR)
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(ListFlags::MISSING)
    }
}

/// A token or syntax node.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    /// Full range, including leading trivia.
    pub range: TextRange,
    pub flags: NodeFlags,
    /// Scanner flags for identifier and literal tokens.
    pub token_flags: TokenFlags,
    /// Filled only by [`NodeArena::set_parents`].
    pub parent: Option<NodeId>,
    /// Cooked text of identifiers, literals and template pieces.
    pub text: Option<InternedString>,
    pub slots: Box<[Slot]>,
    children: OnceLock<Box<[NodeId]>>,
}

impl Node {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            flags: NodeFlags::NONE,
            token_flags: TokenFlags::NONE,
            parent: None,
            text: None,
            slots: Box::default(),
            children: OnceLock::new(),
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_token_flags(mut self, token_flags: TokenFlags) -> Self {
        self.token_flags = token_flags;
        self
    }

    pub fn with_text(mut self, text: InternedString) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_slots(mut self, slots: &[Slot]) -> Self {
        self.slots = Box::from(slots);
        self
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    /// A zero-width node that stands in for something absent from the source.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.range.is_empty() && self.kind != SyntaxKind::EndOfFileToken
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR)
    }

    #[inline]
    pub fn subtree_has_error(&self) -> bool {
        self.flags.intersects(NodeFlags::THIS_NODE_HAS_ERROR | NodeFlags::THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR)
    }

    #[inline]
    pub fn intersects_change(&self) -> bool {
        self.flags.contains(NodeFlags::INTERSECTS_CHANGE)
    }

    /// The parse-context bits recorded when the node was finished.
    #[inline]
    pub fn context_flags(&self) -> NodeFlags {
        self.flags & NodeFlags::CONTEXT_FLAGS
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Slot {
        self.slots.get(index).copied().unwrap_or(Slot::Empty)
    }

    pub fn child_node(&self, index: usize) -> Option<NodeId> {
        match self.slot(index) {
            Slot::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn child_list(&self, index: usize) -> Option<ListId> {
        match self.slot(index) {
            Slot::List(id) => Some(id),
            _ => None,
        }
    }

    /// Drop the cached child array. It is rebuilt on the next request.
    pub fn clear_cache(&mut self) {
        self.children = OnceLock::new();
    }

    pub fn has_cached_children(&self) -> bool {
        self.children.get().is_some()
    }
}

/// A rollback point for [`NodeArena::rewind`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ArenaMark {
    nodes: usize,
    lists: usize,
}

/// Owner of every node and list of one tree.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    lists: Vec<NodeList>,
    interner: StringInterner,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interner(interner: StringInterner) -> Self {
        Self {
            nodes: Vec::new(),
            lists: Vec::new(),
            interner,
        }
    }

    pub fn with_capacity(interner: StringInterner, nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            lists: Vec::with_capacity(nodes / 4),
            interner,
        }
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, text: &str) -> InternedString {
        self.interner.intern(text)
    }

    #[inline]
    pub fn resolve(&self, text: InternedString) -> &str {
        self.interner.resolve(text)
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn alloc_list(&mut self, list: NodeList) -> ListId {
        let id = ListId(self.lists.len() as u32);
        self.lists.push(list);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn list(&self, id: ListId) -> &NodeList {
        &self.lists[id.index()]
    }

    #[inline]
    pub fn list_mut(&mut self, id: ListId) -> &mut NodeList {
        &mut self.lists[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id.index()].kind
    }

    /// Elements of an optional list, empty when absent.
    pub fn elements(&self, id: Option<ListId>) -> &[NodeId] {
        match id {
            Some(id) => &self.lists[id.index()].elements,
            None => &[],
        }
    }

    /// Resolved text of an identifier or literal node.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.index()].text.map(|t| self.interner.resolve(t))
    }

    /// Total allocated nodes, including any no longer reachable from a root.
    pub fn node_capacity_used(&self) -> usize {
        self.nodes.len()
    }

    pub fn list_capacity_used(&self) -> usize {
        self.lists.len()
    }

    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            nodes: self.nodes.len(),
            lists: self.lists.len(),
        }
    }

    /// Discard every node and list allocated since `mark`.
    pub fn rewind(&mut self, mark: ArenaMark) {
        debug_assert!(mark.nodes <= self.nodes.len() && mark.lists <= self.lists.len());
        self.nodes.truncate(mark.nodes);
        self.lists.truncate(mark.lists);
    }

    fn collect_children(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for slot in self.nodes[id.index()].slots.iter() {
            match *slot {
                Slot::Empty => {}
                Slot::Node(child) => out.push(child),
                Slot::List(list) => out.extend_from_slice(&self.lists[list.index()].elements),
            }
        }
    }

    /// Direct children in source order, list elements flattened in place.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.index()].children.get_or_init(|| {
            let mut out = Vec::new();
            self.collect_children(id, &mut out);
            out.into_boxed_slice()
        })
    }

    /// Preorder traversal starting at `root`.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            arena: self,
            stack: vec![root],
        }
    }

    /// `(kind, pos, end)` of every node under `root` in preorder.
    pub fn flatten(&self, root: NodeId) -> Vec<(SyntaxKind, TextPos, TextPos)> {
        self.descendants(root)
            .map(|id| {
                let node = self.node(id);
                (node.kind, node.pos(), node.end())
            })
            .collect()
    }

    /// Fill every parent link under `root` in one preorder pass.
    pub fn set_parents(&mut self, root: NodeId) {
        self.nodes[root.index()].parent = None;
        let mut stack = vec![root];
        let mut kids = Vec::new();
        while let Some(id) = stack.pop() {
            kids.clear();
            self.collect_children(id, &mut kids);
            for &child in kids.iter().rev() {
                self.nodes[child.index()].parent = Some(id);
                stack.push(child);
            }
        }
    }

    pub fn clear_parents(&mut self) {
        for node in &mut self.nodes {
            node.parent = None;
        }
    }

    /// Copy the tree under `root` into a fresh arena sharing this arena's
    /// interner. Ids are renumbered in preorder; unreachable nodes are dropped.
    pub fn compact(&self, root: NodeId) -> (NodeArena, NodeId) {
        const UNMAPPED: u32 = u32::MAX;
        let order: Vec<NodeId> = self.descendants(root).collect();
        let mut node_map = vec![UNMAPPED; self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            node_map[old.index()] = new as u32;
        }
        let mut list_map = vec![UNMAPPED; self.lists.len()];
        let mut out = NodeArena::with_capacity(self.interner.clone(), order.len());

        for &old in &order {
            let source = &self.nodes[old.index()];
            let mut slots = Vec::with_capacity(source.slots.len());
            for slot in source.slots.iter() {
                slots.push(match *slot {
                    Slot::Empty => Slot::Empty,
                    Slot::Node(child) => Slot::Node(NodeId(node_map[child.index()])),
                    Slot::List(list) => {
                        let old_list = &self.lists[list.index()];
                        let elements: Vec<NodeId> = old_list
                            .elements
                            .iter()
                            .map(|e| NodeId(node_map[e.index()]))
                            .collect();
                        let new_list = out.alloc_list(NodeList {
                            range: old_list.range,
                            flags: old_list.flags,
                            elements: elements.into_boxed_slice(),
                        });
                        list_map[list.index()] = new_list.0;
                        Slot::List(new_list)
                    }
                });
            }
            let parent = source
                .parent
                .map(|p| node_map[p.index()])
                .filter(|&p| p != UNMAPPED)
                .map(NodeId);
            out.nodes.push(Node {
                kind: source.kind,
                range: source.range,
                flags: source.flags,
                token_flags: source.token_flags,
                parent,
                text: source.text,
                slots: slots.into_boxed_slice(),
                children: OnceLock::new(),
            });
        }
        (out, NodeId(0))
    }
}

/// Preorder iterator returned by [`NodeArena::descendants`].
pub struct Descendants<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.arena.children(id).iter().rev().copied());
        Some(id)
    }
}
