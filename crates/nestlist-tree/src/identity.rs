#![forbid(unsafe_code)]

//! Deep copies with identity regeneration.
//!
//! Every id at every level of the copy is replaced; payload, names, and
//! flags are cloned as-is. The copy owns all of its data, so later edits to
//! either side never show up in the other.

use crate::node::{Group, Item, Node, NodeId};

/// Clone `nodes` with a fresh random id for every node.
#[must_use]
pub fn deep_copy<P: Clone>(nodes: &[Node<P>]) -> Vec<Node<P>> {
    deep_copy_with(nodes, &mut NodeId::new)
}

/// Clone `nodes`, drawing every new id from `next_id`.
///
/// Ids are requested in document order, so a counting generator produces
/// predictable results.
#[must_use]
pub fn deep_copy_with<P: Clone>(
    nodes: &[Node<P>],
    next_id: &mut impl FnMut() -> NodeId,
) -> Vec<Node<P>> {
    nodes.iter().map(|node| copy_node(node, next_id)).collect()
}

fn copy_node<P: Clone>(node: &Node<P>, next_id: &mut impl FnMut() -> NodeId) -> Node<P> {
    match node {
        Node::Item(item) => Node::Item(Item {
            id: next_id(),
            enabled: item.enabled,
            payload: item.payload.clone(),
        }),
        Node::Group(group) => {
            let id = next_id();
            Node::Group(Group {
                id,
                name: group.name.clone(),
                collapsed: group.collapsed,
                enabled: group.enabled,
                children: deep_copy_with(&group.children, next_id),
            })
        }
    }
}
