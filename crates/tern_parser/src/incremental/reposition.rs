//! Moving an old tree's positions into the coordinates of the edited text.

use tern_ast::{ListFlags, ListId, NodeArena, NodeFlags, NodeId, Slot};
use tern_core::text::{TextPos, TextRange};

use super::IncrementalError;

/// The edit being absorbed, after extension.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edit {
    pub start: TextPos,
    pub old_end: TextPos,
    pub new_end: TextPos,
    pub delta: i64,
}

/// Shift everything after the edit, mark everything touching it, and leave
/// everything before it alone.
///
/// Nodes and lists that touch the edit (including those ending exactly at
/// its start) get [`NodeFlags::INTERSECTS_CHANGE`] and a range clamped into
/// the new text.
pub(crate) fn reposition(arena: &mut NodeArena, root: NodeId, edit: Edit) -> Result<(), IncrementalError> {
    let mut repositioner = Repositioner { arena, edit };
    repositioner.run(root)
}

struct Repositioner<'a> {
    arena: &'a mut NodeArena,
    edit: Edit,
}

impl Repositioner<'_> {
    /// Walk with an explicit stack of `(slot, parent range)`; a chain of
    /// binary expressions is as deep as it is long.
    fn run(&mut self, root: NodeId) -> Result<(), IncrementalError> {
        let mut stack = vec![(Slot::Node(root), None)];
        while let Some((slot, parent)) = stack.pop() {
            match slot {
                Slot::Empty => {}
                Slot::Node(id) => {
                    if let Some(adjusted) = self.visit_node(id, parent)? {
                        let slots = self.arena.node(id).slots.iter().rev();
                        stack.extend(slots.map(|&child| (child, Some(adjusted))));
                    }
                }
                Slot::List(id) => {
                    if let Some(adjusted) = self.visit_list(id, parent)? {
                        let elements = self.arena.list(id).elements.iter().rev();
                        stack.extend(elements.map(|&element| (Slot::Node(element), Some(adjusted))));
                    }
                }
            }
        }
        Ok(())
    }

    /// The node's new range when its children still need visiting.
    fn visit_node(&mut self, id: NodeId, parent: Option<TextRange>) -> Result<Option<TextRange>, IncrementalError> {
        let range = self.arena.node(id).range;
        if range.pos > self.edit.old_end {
            self.move_past_change(Slot::Node(id));
            return Ok(None);
        }
        if range.end < self.edit.start {
            return Ok(None);
        }

        let adjusted = self.adjust_intersecting(range);
        check_range(adjusted, parent)?;
        let node = self.arena.node_mut(id);
        node.range = adjusted;
        node.flags |= NodeFlags::INTERSECTS_CHANGE;
        node.clear_cache();
        Ok(Some(adjusted))
    }

    fn visit_list(&mut self, id: ListId, parent: Option<TextRange>) -> Result<Option<TextRange>, IncrementalError> {
        let range = self.arena.list(id).range;
        if range.pos > self.edit.old_end {
            self.move_past_change(Slot::List(id));
            return Ok(None);
        }
        if range.end < self.edit.start {
            return Ok(None);
        }

        let adjusted = self.adjust_intersecting(range);
        check_range(adjusted, parent)?;
        let list = self.arena.list_mut(id);
        list.range = adjusted;
        list.flags |= ListFlags::INTERSECTS_CHANGE;
        Ok(Some(adjusted))
    }

    /// An element touching the edit keeps its start unless that start moved
    /// out of the new text; its end shifts when it lies after the old edit
    /// end and is clamped into the new text otherwise.
    fn adjust_intersecting(&self, range: TextRange) -> TextRange {
        let edit = self.edit;
        let pos = range.pos.min(edit.new_end);
        let end = if range.end >= edit.old_end {
            range.shifted(edit.delta).end
        } else {
            range.end.min(edit.new_end)
        };
        TextRange::new(pos, end)
    }

    fn move_past_change(&mut self, root: Slot) {
        let delta = self.edit.delta;
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            match slot {
                Slot::Empty => {}
                Slot::Node(id) => {
                    let node = self.arena.node_mut(id);
                    node.range = node.range.shifted(delta);
                    node.clear_cache();
                    stack.extend(node.slots.iter().copied());
                }
                Slot::List(id) => {
                    let list = self.arena.list_mut(id);
                    list.range = list.range.shifted(delta);
                    stack.extend(list.elements.iter().map(|&e| Slot::Node(e)));
                }
            }
        }
    }
}

fn check_range(range: TextRange, parent: Option<TextRange>) -> Result<(), IncrementalError> {
    let inside_parent = parent.map_or(true, |p| range.pos >= p.pos && range.end <= p.end);
    if range.pos > range.end || !inside_parent {
        debug_assert!(false, "repositioned range {range:?} escapes {parent:?}");
        return Err(IncrementalError::InvalidRange { range, parent });
    }
    Ok(())
}
