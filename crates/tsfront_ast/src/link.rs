//! Parent linking and tree queries.
//!
//! Parent pointers are filled in one pass after the parse. Until
//! [`link_parents`] has run, `Node::parent` is `None` everywhere and the
//! ancestor queries see a forest of single nodes.

use crate::node::{AstArena, Node};
use crate::syntax_kind::SyntaxKind;
use crate::types::{NodeFlags, NodeId};
use crate::visitor::for_each_child;

/// Set `parent` on every node reachable from `root`. Iterative, so deep
/// trees don't overflow the stack.
pub fn link_parents(arena: &mut AstArena, root: NodeId) {
    arena.get_mut(root).parent = None;
    let mut stack = vec![root];
    let mut kids = Vec::new();
    while let Some(parent) = stack.pop() {
        kids.clear();
        for_each_child(arena, parent, |child| {
            kids.push(child);
            None::<()>
        });
        for &child in &kids {
            arena.get_mut(child).parent = Some(parent);
        }
        stack.extend(kids.iter().rev());
    }
}

/// Every node below `root` in pre-order (source order), `root` excluded.
pub fn descendants(arena: &AstArena, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    visit_descendants(arena, root, |id| {
        out.push(id);
        None::<()>
    });
    out
}

/// Descendants of `root` with the given kind, in source order.
pub fn descendants_of_kind(arena: &AstArena, root: NodeId, kind: SyntaxKind) -> Vec<NodeId> {
    let mut out = Vec::new();
    visit_descendants(arena, root, |id| {
        if arena.kind(id) == kind {
            out.push(id);
        }
        None::<()>
    });
    out
}

/// First descendant of `root` in source order matching `pred`.
pub fn find_descendant(
    arena: &AstArena,
    root: NodeId,
    mut pred: impl FnMut(NodeId, &Node) -> bool,
) -> Option<NodeId> {
    visit_descendants(arena, root, |id| pred(id, arena.get(id)).then_some(id))
}

/// Pre-order walk below `root`, stopping at the first `Some`.
fn visit_descendants<T>(
    arena: &AstArena,
    root: NodeId,
    mut f: impl FnMut(NodeId) -> Option<T>,
) -> Option<T> {
    let mut stack = Vec::new();
    let mut kids = Vec::new();
    push_children(arena, root, &mut stack, &mut kids);
    while let Some(id) = stack.pop() {
        if let Some(result) = f(id) {
            return Some(result);
        }
        push_children(arena, id, &mut stack, &mut kids);
    }
    None
}

fn push_children(arena: &AstArena, id: NodeId, stack: &mut Vec<NodeId>, kids: &mut Vec<NodeId>) {
    kids.clear();
    for_each_child(arena, id, |child| {
        kids.push(child);
        None::<()>
    });
    stack.extend(kids.iter().rev());
}

/// Iterator over the parents of a node, nearest first.
pub struct Ancestors<'a> {
    arena: &'a AstArena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.get(current).parent;
        Some(current)
    }
}

/// The parent chain of `id`, `id` itself excluded.
pub fn ancestors(arena: &AstArena, id: NodeId) -> Ancestors<'_> {
    Ancestors {
        arena,
        next: arena.get(id).parent,
    }
}

/// Nearest ancestor of `id` matching `pred`.
pub fn find_ancestor(
    arena: &AstArena,
    id: NodeId,
    mut pred: impl FnMut(NodeId, &Node) -> bool,
) -> Option<NodeId> {
    ancestors(arena, id).find(|&ancestor| pred(ancestor, arena.get(ancestor)))
}

/// Whether `id` or anything below it was produced while a parse error was
/// pending.
pub fn contains_parse_error(arena: &AstArena, id: NodeId) -> bool {
    arena.get(id).flags.contains(NodeFlags::THIS_NODE_HAS_ERROR)
        || visit_descendants(arena, id, |child| {
            arena
                .get(child)
                .flags
                .contains(NodeFlags::THIS_NODE_HAS_ERROR)
                .then_some(())
        })
        .is_some()
}
