#![forbid(unsafe_code)]

//! Group lifecycle and per-node flag edits.
//!
//! Grouping only ever wraps root-level nodes. The depth a grouping would
//! produce is `1 + deepest selected subtree`, checked against the caller's
//! limit before anything is touched.

use crate::error::{GroupError, TreeError};
use crate::node::{Group, Node, NodeId};
use crate::path::{
    TreePath, delete_paths_safely, find_path_by_id, find_paths_by_ids, get_at_path,
    insert_at_path, remove_at_path, update_at_path,
};
use crate::walk::subtree_depth;

/// Append an empty group at the end of the root sequence.
pub fn create_group<P>(nodes: &mut Vec<Node<P>>, name: impl Into<String>) -> NodeId {
    let group = Group::new(name);
    let id = group.id;
    nodes.push(group.into());
    id
}

/// Whether [`group_root_nodes`] would accept `ids` as a whole.
///
/// Unlike the command itself, the gate refuses any non-root id so a UI can
/// grey out the action instead of silently dropping part of the selection.
pub fn check_group<P>(nodes: &[Node<P>], ids: &[NodeId], max_depth: usize) -> Result<(), GroupError> {
    let resolved = find_paths_by_ids(nodes, ids.iter().copied());
    if resolved.is_empty() {
        return Err(GroupError::NothingToGroup);
    }
    if let Some((&id, _)) = resolved.iter().find(|(_, path)| !path.is_root_level()) {
        return Err(GroupError::NonRootSelection { id });
    }
    let paths: Vec<TreePath> = resolved.into_values().collect();
    check_depth(nodes, &paths, max_depth)
}

/// Convenience wrapper over [`check_group`].
#[must_use]
pub fn can_group<P>(nodes: &[Node<P>], ids: &[NodeId], max_depth: usize) -> bool {
    check_group(nodes, ids, max_depth).is_ok()
}

/// Wrap the root-level nodes among `ids` in a new group.
///
/// Non-root and unknown ids are ignored. The wrapped nodes keep their
/// relative order and the group takes the slot of the first of them.
pub fn group_root_nodes<P>(
    nodes: &mut Vec<Node<P>>,
    ids: &[NodeId],
    name: impl Into<String>,
    max_depth: usize,
) -> Result<NodeId, GroupError> {
    let mut paths: Vec<TreePath> = find_paths_by_ids(nodes, ids.iter().copied())
        .into_values()
        .filter(TreePath::is_root_level)
        .collect();
    paths.sort();
    let Some(first) = paths.first().cloned() else {
        return Err(GroupError::NothingToGroup);
    };
    check_depth(nodes, &paths, max_depth)?;

    let children = delete_paths_safely(nodes, paths);
    let group = Group::new(name).with_children(children);
    let id = group.id;
    insert_at_path(nodes, &first, group.into())?;
    nestlist_core::debug!(group = %id, "grouped root nodes");
    Ok(id)
}

/// Replace a group with its children, in place and in order.
///
/// Returns the ids of the spliced children.
pub fn ungroup<P>(nodes: &mut Vec<Node<P>>, group_id: NodeId) -> Result<Vec<NodeId>, GroupError> {
    let path = find_path_by_id(nodes, group_id).ok_or(TreeError::NotFound { id: group_id })?;
    if !get_at_path(nodes, &path).is_some_and(Node::is_group) {
        return Err(GroupError::NotAGroup { id: group_id });
    }
    let Node::Group(group) = remove_at_path(nodes, &path)? else {
        return Err(GroupError::NotAGroup { id: group_id });
    };
    let start = path.last().unwrap_or(0);
    let mut spliced = Vec::with_capacity(group.children.len());
    for (offset, child) in group.children.into_iter().enumerate() {
        spliced.push(child.id());
        insert_at_path(nodes, &path.with_last(start + offset), child)?;
    }
    Ok(spliced)
}

/// Set a group's display name.
pub fn rename_group<P>(
    nodes: &mut Vec<Node<P>>,
    id: NodeId,
    name: impl Into<String>,
) -> Result<(), GroupError> {
    let path = find_path_by_id(nodes, id).ok_or(TreeError::NotFound { id })?;
    let mut renamed = false;
    let name = name.into();
    update_at_path(nodes, &path, |node| {
        if let Some(group) = node.as_group_mut() {
            group.name = name;
            renamed = true;
        }
    })?;
    if renamed {
        Ok(())
    } else {
        Err(GroupError::NotAGroup { id })
    }
}

/// Flip a node's own enabled flag and return the new value.
///
/// Descendants keep their own flags; their effective state is derived.
pub fn toggle_enabled<P>(nodes: &mut Vec<Node<P>>, id: NodeId) -> Result<bool, TreeError> {
    let path = find_path_by_id(nodes, id).ok_or(TreeError::NotFound { id })?;
    let mut enabled = false;
    update_at_path(nodes, &path, |node| {
        enabled = !node.enabled();
        node.set_enabled(enabled);
    })?;
    Ok(enabled)
}

/// Flip a group's collapsed flag and return the new value.
pub fn toggle_collapsed<P>(nodes: &mut Vec<Node<P>>, id: NodeId) -> Result<bool, GroupError> {
    let path = find_path_by_id(nodes, id).ok_or(TreeError::NotFound { id })?;
    let mut collapsed = None;
    update_at_path(nodes, &path, |node| {
        if let Some(group) = node.as_group_mut() {
            group.collapsed = !group.collapsed;
            collapsed = Some(group.collapsed);
        }
    })?;
    collapsed.ok_or(GroupError::NotAGroup { id })
}

fn check_depth<P>(nodes: &[Node<P>], paths: &[TreePath], max_depth: usize) -> Result<(), GroupError> {
    let deepest = paths
        .iter()
        .filter_map(|path| get_at_path(nodes, path))
        .map(subtree_depth)
        .max()
        .unwrap_or(0);
    let depth = deepest + 1;
    if depth > max_depth {
        return Err(GroupError::DepthExceeded {
            depth,
            max: max_depth,
        });
    }
    Ok(())
}
