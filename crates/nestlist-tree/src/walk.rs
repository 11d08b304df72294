#![forbid(unsafe_code)]

//! Read-only traversals: document order, depth, and derived enablement.

use crate::node::{Node, NodeId, NodeKind};
use crate::path::TreePath;

/// Every id in canonical document order: a group's id, then its children.
///
/// This is the order used for range selection.
#[must_use]
pub fn collect_all_ids<P>(nodes: &[Node<P>]) -> Vec<NodeId> {
    let mut out = Vec::new();
    push_ids(nodes, &mut out);
    out
}

fn push_ids<P>(nodes: &[Node<P>], out: &mut Vec<NodeId>) {
    for node in nodes {
        out.push(node.id());
        push_ids(node.children(), out);
    }
}

/// Levels below `node` (0 for a leaf or an empty group).
#[must_use]
pub fn subtree_depth<P>(node: &Node<P>) -> usize {
    node.children()
        .iter()
        .map(|child| 1 + subtree_depth(child))
        .max()
        .unwrap_or(0)
}

/// Maximum depth of any node, root level being 0. An empty tree is 0.
#[must_use]
pub fn nesting_depth<P>(nodes: &[Node<P>]) -> usize {
    nodes.iter().map(subtree_depth).max().unwrap_or(0)
}

/// True if `id` is `node` itself or anywhere inside it.
#[must_use]
pub fn contains_id<P>(node: &Node<P>, id: NodeId) -> bool {
    node.id() == id || node.children().iter().any(|child| contains_id(child, id))
}

/// Whether the node at `path` is disabled directly or through an ancestor.
///
/// Returns `None` if the path does not resolve.
#[must_use]
pub fn is_effectively_disabled<P>(nodes: &[Node<P>], path: &TreePath) -> Option<bool> {
    let mut level = nodes;
    let mut disabled = false;
    for &index in path.as_slice() {
        let node = level.get(index)?;
        disabled |= !node.enabled();
        level = node.children();
    }
    (!path.is_empty()).then_some(disabled)
}

/// One node of a flattened traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub path: TreePath,
    pub depth: usize,
    /// `!enabled` of this node or any ancestor.
    pub effective_disabled: bool,
}

/// Flatten in document order.
///
/// With `include_collapsed = false`, children of collapsed groups are left
/// out, which yields exactly the rows a renderer shows.
#[must_use]
pub fn flatten<P>(nodes: &[Node<P>], include_collapsed: bool) -> Vec<FlatNode> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    flatten_into(nodes, include_collapsed, false, &mut prefix, &mut out);
    out
}

fn flatten_into<P>(
    nodes: &[Node<P>],
    include_collapsed: bool,
    parent_disabled: bool,
    prefix: &mut Vec<usize>,
    out: &mut Vec<FlatNode>,
) {
    for (index, node) in nodes.iter().enumerate() {
        prefix.push(index);
        let effective_disabled = parent_disabled || !node.enabled();
        out.push(FlatNode {
            id: node.id(),
            kind: node.kind(),
            path: TreePath::new(prefix.clone()),
            depth: prefix.len() - 1,
            effective_disabled,
        });
        let expanded = node.as_group().is_some_and(|g| !g.collapsed);
        if include_collapsed || expanded {
            flatten_into(
                node.children(),
                include_collapsed,
                effective_disabled,
                prefix,
                out,
            );
        }
        prefix.pop();
    }
}
