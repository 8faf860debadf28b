//! Tree searches.
//!
//! Left-associative chains are built by a loop, so a tree can be as deep as
//! its file is long. Everything here walks with an explicit stack.

use crate::node::{NodeArena, NodeId};

/// First node under `root` (inclusive, preorder) matching `predicate`.
pub fn find_node(arena: &NodeArena, root: NodeId, mut predicate: impl FnMut(NodeId) -> bool) -> Option<NodeId> {
    arena.descendants(root).find(|&id| predicate(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeList, Slot};
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;
    use tern_core::text::TextRange;

    #[test]
    fn test_find_node_in_preorder() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(Node::new(SyntaxKind::Identifier, TextRange::new(0, 1)));
        let b = arena.alloc(Node::new(SyntaxKind::NumericLiteral, TextRange::new(2, 3)));
        let list = arena.alloc_list(NodeList::new(TextRange::new(0, 3), vec![a, b]));
        let root = arena.alloc(Node::new(SyntaxKind::Block, TextRange::new(0, 4)).with_slots(&[Slot::List(list)]));

        let order: Vec<SyntaxKind> = arena.descendants(root).map(|id| arena.kind(id)).collect();
        assert_eq!(
            order,
            vec![SyntaxKind::Block, SyntaxKind::Identifier, SyntaxKind::NumericLiteral]
        );
        assert_eq!(
            find_node(&arena, root, |id| arena.kind(id) == SyntaxKind::NumericLiteral),
            Some(b)
        );
        assert_eq!(find_node(&arena, root, |id| arena.kind(id) == SyntaxKind::StringLiteral), None);
    }

    #[test]
    fn test_find_node_in_a_deep_tree() {
        let mut arena = NodeArena::new();
        let mut inner = arena.alloc(Node::new(SyntaxKind::Identifier, TextRange::new(50_000, 50_001)));
        for depth in (0..50_000u32).rev() {
            inner = arena.alloc(
                Node::new(SyntaxKind::ParenthesizedExpression, TextRange::new(depth, 100_001 - depth))
                    .with_slots(&[Slot::Node(inner)]),
            );
        }
        let found = find_node(&arena, inner, |id| arena.kind(id) == SyntaxKind::Identifier);
        assert_eq!(found.map(|id| arena.node(id).pos()), Some(50_000));
    }
}
