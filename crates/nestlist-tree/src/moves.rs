#![forbid(unsafe_code)]

//! Batch move/re-parent of subtrees relative to a target node.
//!
//! # Algorithm
//!
//! 1. Resolve target and source paths against the current tree.
//! 2. Reject if the target is a source or lies inside a source subtree.
//! 3. Drop sources nested inside another source (they travel with it) and
//!    skip ids that no longer resolve.
//! 4. Remove the sources with [`delete_paths_safely`], which yields them in
//!    document order.
//! 5. Re-resolve the target in the reduced tree and insert the removed nodes
//!    contiguously relative to it.
//! 6. Reject if the result nests deeper than allowed.
//!
//! All work happens on a scratch copy; on rejection the caller's tree is
//! left untouched.

use thiserror::Error;

use crate::node::{Node, NodeId, NodeKind};
use crate::path::{
    TreePath, delete_paths_safely, find_path_by_id, find_paths_by_ids, get_at_path, insert_at_path,
};
use crate::walk::nesting_depth;

/// Where a drop lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DropPosition {
    /// Sibling immediately before the target.
    Before,
    /// Sibling immediately after the target.
    After,
    /// Last child of the target group. Leaf targets treat this as `After`.
    Into,
}

impl DropPosition {
    /// Default share of a group header that maps to `Before`.
    pub const GROUP_BEFORE_BAND: f32 = 0.25;

    /// Classify a pointer by its vertical `fraction` (0.0 = top edge) within
    /// the target's row.
    ///
    /// Groups: the top `group_before_band` maps to `Before`, the rest to
    /// `Into`. Leaves: the upper half maps to `Before`, the lower half to
    /// `After`.
    #[must_use]
    pub fn from_fraction(kind: NodeKind, fraction: f32, group_before_band: f32) -> Self {
        match kind {
            NodeKind::Group if fraction < group_before_band => Self::Before,
            NodeKind::Group => Self::Into,
            NodeKind::Item if fraction < 0.5 => Self::Before,
            NodeKind::Item => Self::After,
        }
    }
}

/// Why a move was refused. The tree is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("drop target {target} not found")]
    TargetMissing { target: NodeId },
    #[error("cannot drop {dragged} onto itself or its own descendant {target}")]
    TargetInsideSource { dragged: NodeId, target: NodeId },
    #[error("none of the dragged nodes are present")]
    NoSources,
    #[error("move would nest {depth} levels deep (max {max})")]
    DepthExceeded { depth: usize, max: usize },
}

/// Move `source_ids` next to or into `target_id`.
///
/// On success returns the ids that actually moved, in their new order.
pub fn move_nodes_to_target<P: Clone>(
    nodes: &mut Vec<Node<P>>,
    source_ids: &[NodeId],
    target_id: NodeId,
    position: DropPosition,
    max_depth: usize,
) -> Result<Vec<NodeId>, MoveRejection> {
    let span = nestlist_core::debug_span!(
        "nestlist.move",
        sources = source_ids.len(),
        target = %target_id,
        ?position
    );
    let _guard = span.enter();

    let (working, moved) = plan_move(nodes, source_ids, target_id, position, max_depth)?;
    *nodes = working;
    nestlist_core::debug!(moved = moved.len(), "move applied");
    Ok(moved)
}

/// Check whether a drop would be accepted without changing anything.
pub fn validate_drop<P: Clone>(
    nodes: &[Node<P>],
    source_ids: &[NodeId],
    target_id: NodeId,
    position: DropPosition,
    max_depth: usize,
) -> Result<(), MoveRejection> {
    plan_move(nodes, source_ids, target_id, position, max_depth).map(|_| ())
}

/// Top-most resolvable sources in document order, after rejecting drops
/// onto a source or its descendants.
fn resolve_sources<P>(
    nodes: &[Node<P>],
    source_ids: &[NodeId],
    target_id: NodeId,
) -> Result<Vec<TreePath>, MoveRejection> {
    let target_path =
        find_path_by_id(nodes, target_id).ok_or(MoveRejection::TargetMissing { target: target_id })?;

    let resolved = find_paths_by_ids(nodes, source_ids.iter().copied());
    for (&dragged, path) in &resolved {
        if path.contains(&target_path) {
            return Err(MoveRejection::TargetInsideSource {
                dragged,
                target: target_id,
            });
        }
    }

    let mut paths: Vec<TreePath> = resolved.into_values().collect();
    paths.sort();
    let mut top_level: Vec<TreePath> = Vec::with_capacity(paths.len());
    for path in paths {
        if top_level.iter().any(|kept| kept.is_ancestor_of(&path)) {
            continue;
        }
        top_level.push(path);
    }
    if top_level.is_empty() {
        return Err(MoveRejection::NoSources);
    }
    if top_level.len() < source_ids.len() {
        nestlist_core::trace!(
            requested = source_ids.len(),
            resolved = top_level.len(),
            "some dragged ids were stale or nested"
        );
    }
    Ok(top_level)
}

fn plan_move<P: Clone>(
    nodes: &[Node<P>],
    source_ids: &[NodeId],
    target_id: NodeId,
    position: DropPosition,
    max_depth: usize,
) -> Result<(Vec<Node<P>>, Vec<NodeId>), MoveRejection> {
    let source_paths = resolve_sources(nodes, source_ids, target_id)?;

    let mut working = nodes.to_vec();
    let moved = delete_paths_safely(&mut working, source_paths);

    let target_path = find_path_by_id(&working, target_id)
        .ok_or(MoveRejection::TargetMissing { target: target_id })?;
    let insert_at = insertion_path(&working, &target_path, position);
    let (Some(first), parent) = (insert_at.last(), insert_at.parent_indices()) else {
        return Err(MoveRejection::TargetMissing { target: target_id });
    };
    let parent = TreePath::new(parent.to_vec());

    let moved_ids: Vec<NodeId> = moved.iter().map(Node::id).collect();
    for (offset, node) in moved.into_iter().enumerate() {
        let path = parent.child(first + offset);
        if insert_at_path(&mut working, &path, node).is_err() {
            // The parent was resolved a moment ago, so this only fires on a
            // broken invariant; refuse rather than lose the node.
            return Err(MoveRejection::TargetMissing { target: target_id });
        }
    }

    let before = nesting_depth(nodes);
    let after = nesting_depth(&working);
    if after > max_depth && after > before {
        return Err(MoveRejection::DepthExceeded {
            depth: after,
            max: max_depth,
        });
    }
    Ok((working, moved_ids))
}

fn insertion_path<P>(nodes: &[Node<P>], target: &TreePath, position: DropPosition) -> TreePath {
    let index = target.last().unwrap_or(0);
    match position {
        DropPosition::Before => target.clone(),
        DropPosition::After => target.with_last(index + 1),
        DropPosition::Into => match get_at_path(nodes, target) {
            Some(Node::Group(group)) => target.child(group.children.len()),
            _ => target.with_last(index + 1),
        },
    }
}
