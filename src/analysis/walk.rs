//! Depth-first traversal shared by the detectors.
//!
//! All walks are pre-order and use an explicit stack.

use super::tree::{Node, NodeKind};

/// Visit every node beneath (and including) `root` in pre-order.
pub fn walk<'t, F>(root: &'t Node, mut visit: F)
where
    F: FnMut(&'t Node),
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.children.iter().rev());
    }
}

/// All nodes beneath (and including) `root` whose kind matches, in pre-order.
pub fn find_all<'t, P>(root: &'t Node, matches: P) -> Vec<&'t Node>
where
    P: Fn(&NodeKind) -> bool,
{
    let mut found = Vec::new();
    walk(root, |node| {
        if matches(&node.kind) {
            found.push(node);
        }
    });
    found
}

/// Pre-order walk that tracks depth.
///
/// `root` starts at depth 0; the depth increases by one on entering any node
/// for which `contributes` holds, and that node is visited with the
/// increased depth.
pub fn walk_with_depth<'t, P, F>(root: &'t Node, contributes: P, mut visit: F)
where
    P: Fn(&NodeKind) -> bool,
    F: FnMut(&'t Node, usize),
{
    let mut stack = vec![(root, 0usize)];
    while let Some((node, outer)) = stack.pop() {
        let depth = if contributes(&node.kind) { outer + 1 } else { outer };
        visit(node, depth);
        stack.extend(node.children.iter().rev().map(|child| (child, depth)));
    }
}

/// Deepest count of contributing ancestors-or-self along any path.
pub fn max_depth<P>(root: &Node, contributes: P) -> usize
where
    P: Fn(&NodeKind) -> bool,
{
    let mut max = 0;
    walk_with_depth(root, contributes, |_, depth| max = max.max(depth));
    max
}

/// Maximum nesting depth of if/for/while/do/switch statements.
pub fn max_nesting_depth(root: &Node) -> usize {
    max_depth(root, NodeKind::is_nesting)
}
