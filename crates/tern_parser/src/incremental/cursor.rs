//! Lookup of reusable list elements in a repositioned old tree.

use tern_ast::{ListId, NodeArena, NodeId, Slot};
use tern_core::text::TextPos;

/// Finds the old list element starting at a position.
///
/// The list engine asks for positions in increasing order and usually for
/// the position right after the element it was handed last, so the cursor
/// remembers that element's list and tries its next sibling before
/// searching from the root.
#[derive(Debug, Clone)]
pub(crate) struct SyntaxCursor {
    root: NodeId,
    current_list: Option<ListId>,
    current_index: usize,
    current: Option<NodeId>,
    last_queried_position: Option<TextPos>,
}

impl SyntaxCursor {
    /// A cursor positioned at the first statement of `root`.
    pub(crate) fn new(arena: &NodeArena, root: NodeId) -> Self {
        let statements = arena.node(root).child_list(0);
        Self {
            root,
            current_list: statements,
            current_index: 0,
            current: arena.elements(statements).first().copied(),
            last_queried_position: None,
        }
    }

    /// The outermost list element starting exactly at `position`.
    pub(crate) fn current_node(&mut self, arena: &NodeArena, position: TextPos) -> Option<NodeId> {
        if self.last_queried_position != Some(position) {
            if let (Some(current), Some(list)) = (self.current, self.current_list) {
                let elements = arena.elements(Some(list));
                if arena.node(current).end() == position && self.current_index + 1 < elements.len() {
                    self.current_index += 1;
                    self.current = Some(elements[self.current_index]);
                }
            }
            if self.current.map_or(true, |id| arena.node(id).pos() != position) {
                self.find_highest_list_element_starting_at(arena, position);
            }
        }
        self.last_queried_position = Some(position);
        debug_assert!(self.current.map_or(true, |id| arena.node(id).pos() == position));
        self.current
    }

    /// Walk down from the root through the nodes containing `position`,
    /// stopping at the first list element that starts there. A loop, not
    /// recursion: member and binary chains make trees as deep as they are
    /// long.
    fn find_highest_list_element_starting_at(&mut self, arena: &NodeArena, position: TextPos) {
        self.current_list = None;
        self.current_index = 0;
        self.current = None;

        let mut parent = self.root;
        'descend: loop {
            for &slot in arena.node(parent).slots.iter() {
                match slot {
                    Slot::Empty => {}
                    Slot::Node(child) => {
                        let node = arena.node(child);
                        if position >= node.pos() && position < node.end() {
                            parent = child;
                            continue 'descend;
                        }
                    }
                    Slot::List(list) => {
                        let range = arena.list(list).range;
                        if position < range.pos || position >= range.end {
                            continue;
                        }
                        for (index, &child) in arena.list(list).elements.iter().enumerate() {
                            let node = arena.node(child);
                            if node.pos() == position {
                                self.current_list = Some(list);
                                self.current_index = index;
                                self.current = Some(child);
                                return;
                            }
                            if node.pos() < position && position < node.end() {
                                parent = child;
                                continue 'descend;
                            }
                        }
                    }
                }
            }
            return;
        }
    }
}
