#![forbid(unsafe_code)]

//! Path-addressed tree primitives.
//!
//! A [`TreePath`] is the index sequence from the root sequence down to a
//! node. Paths are positional, so any structural edit can invalidate every
//! path computed before it. Callers re-resolve ids to paths immediately
//! before each edit and never keep a path across edits.
//!
//! # Invariants
//!
//! 1. `TreePath` ordering is lexicographic, which is exactly document
//!    (pre-order) order: a parent sorts before its descendants, and earlier
//!    siblings sort before later ones together with their subtrees.
//! 2. [`delete_paths_safely`] removes in descending path order. Removing a
//!    node only shifts later siblings and their descendants, which all sort
//!    after it and have therefore been handled already, so every remaining
//!    path is still valid when its turn comes.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Index past end | Stale path | `TreeError::IndexOutOfBounds` |
//! | Descending into a leaf | Stale path | `TreeError::NotAGroup` |
//! | Unresolvable path in a batch delete | Stale path | Skipped, logged |

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::TreeError;
use crate::node::{Node, NodeId};

/// Index sequence from the root to a node, e.g. `[2, 0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreePath(Vec<usize>);

impl TreePath {
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of a root-level node.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nesting depth of the addressed node (root level = 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Whether the node sits directly in the root sequence.
    #[must_use]
    pub fn is_root_level(&self) -> bool {
        self.0.len() == 1
    }

    /// Index of the node within its parent.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Indices of the parent (empty for root-level nodes).
    #[must_use]
    pub fn parent_indices(&self) -> &[usize] {
        match self.0.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    /// Path to the `index`-th child of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Same parent, different final index.
    #[must_use]
    pub fn with_last(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        match indices.last_mut() {
            Some(last) => *last = index,
            None => indices.push(index),
        }
        Self(indices)
    }

    /// True if `self` is a strict ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    /// True if `self` equals `other` or is one of its ancestors.
    #[must_use]
    pub fn contains(&self, other: &TreePath) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for TreePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Pre-order depth-first search for `id`.
#[must_use]
pub fn find_path_by_id<P>(nodes: &[Node<P>], id: NodeId) -> Option<TreePath> {
    let mut prefix = Vec::new();
    if find_into(nodes, id, &mut prefix) {
        Some(TreePath(prefix))
    } else {
        None
    }
}

fn find_into<P>(nodes: &[Node<P>], id: NodeId, prefix: &mut Vec<usize>) -> bool {
    for (index, node) in nodes.iter().enumerate() {
        prefix.push(index);
        if node.id() == id || find_into(node.children(), id, prefix) {
            return true;
        }
        prefix.pop();
    }
    false
}

/// Resolve many ids in a single traversal.
///
/// Ids that are not present are simply absent from the result.
#[must_use]
pub fn find_paths_by_ids<P>(
    nodes: &[Node<P>],
    ids: impl IntoIterator<Item = NodeId>,
) -> HashMap<NodeId, TreePath> {
    let wanted: HashSet<NodeId> = ids.into_iter().collect();
    let mut found = HashMap::with_capacity(wanted.len());
    if !wanted.is_empty() {
        let mut prefix = Vec::new();
        collect_paths(nodes, &wanted, &mut prefix, &mut found);
    }
    found
}

fn collect_paths<P>(
    nodes: &[Node<P>],
    wanted: &HashSet<NodeId>,
    prefix: &mut Vec<usize>,
    found: &mut HashMap<NodeId, TreePath>,
) {
    for (index, node) in nodes.iter().enumerate() {
        if found.len() == wanted.len() {
            return;
        }
        prefix.push(index);
        let id = node.id();
        if wanted.contains(&id) {
            found.entry(id).or_insert_with(|| TreePath(prefix.clone()));
        }
        collect_paths(node.children(), wanted, prefix, found);
        prefix.pop();
    }
}

/// Node at `path`, if the path still resolves.
#[must_use]
pub fn get_at_path<'a, P>(nodes: &'a [Node<P>], path: &TreePath) -> Option<&'a Node<P>> {
    let (first, rest) = path.0.split_first()?;
    let mut node = nodes.get(*first)?;
    for &index in rest {
        node = node.children().get(index)?;
    }
    Some(node)
}

/// Mutable node at `path`, if the path still resolves.
pub fn get_at_path_mut<'a, P>(
    nodes: &'a mut Vec<Node<P>>,
    path: &TreePath,
) -> Option<&'a mut Node<P>> {
    let (last, parent) = path.0.split_last()?;
    siblings_mut(nodes, parent).ok()?.get_mut(*last)
}

/// Apply `f` to the node at `path` in place.
///
/// Sibling and ancestor nodes are not touched.
pub fn update_at_path<P>(
    nodes: &mut Vec<Node<P>>,
    path: &TreePath,
    f: impl FnOnce(&mut Node<P>),
) -> Result<(), TreeError> {
    let (last, parent) = path.0.split_last().ok_or(TreeError::EmptyPath)?;
    let siblings = siblings_mut(nodes, parent)?;
    let len = siblings.len();
    let node = siblings
        .get_mut(*last)
        .ok_or_else(|| TreeError::IndexOutOfBounds {
            path: path.clone(),
            index: *last,
            len,
        })?;
    f(node);
    Ok(())
}

/// Insert `node` at the final index of `path` inside the parent named by the
/// path prefix. An index equal to the sibling count appends.
pub fn insert_at_path<P>(
    nodes: &mut Vec<Node<P>>,
    path: &TreePath,
    node: Node<P>,
) -> Result<(), TreeError> {
    let (last, parent) = path.0.split_last().ok_or(TreeError::EmptyPath)?;
    let siblings = siblings_mut(nodes, parent)?;
    if *last > siblings.len() {
        return Err(TreeError::IndexOutOfBounds {
            path: path.clone(),
            index: *last,
            len: siblings.len(),
        });
    }
    siblings.insert(*last, node);
    Ok(())
}

/// Remove and return the node at `path`.
pub fn remove_at_path<P>(nodes: &mut Vec<Node<P>>, path: &TreePath) -> Result<Node<P>, TreeError> {
    let (last, parent) = path.0.split_last().ok_or(TreeError::EmptyPath)?;
    let siblings = siblings_mut(nodes, parent)?;
    if *last >= siblings.len() {
        return Err(TreeError::IndexOutOfBounds {
            path: path.clone(),
            index: *last,
            len: siblings.len(),
        });
    }
    Ok(siblings.remove(*last))
}

/// Delete every node named by `paths`, deepest and highest-index first.
///
/// Duplicate and unresolvable paths are skipped. Returns the removed nodes
/// in document order. When both a node and one of its descendants are
/// named, the descendant is removed first and returned separately.
pub fn delete_paths_safely<P>(
    nodes: &mut Vec<Node<P>>,
    paths: impl IntoIterator<Item = TreePath>,
) -> Vec<Node<P>> {
    let mut ordered: Vec<TreePath> = paths.into_iter().filter(|p| !p.is_empty()).collect();
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    ordered.dedup();

    let mut removed = Vec::with_capacity(ordered.len());
    for path in &ordered {
        if let Ok(node) = remove_at_path(nodes, path) {
            removed.push(node);
        } else {
            nestlist_core::debug!(%path, "skipping unresolvable delete path");
        }
    }
    removed.reverse();
    removed
}

fn siblings_mut<'a, P>(
    nodes: &'a mut Vec<Node<P>>,
    parent: &[usize],
) -> Result<&'a mut Vec<Node<P>>, TreeError> {
    let mut current = nodes;
    for (depth, &index) in parent.iter().enumerate() {
        let len = current.len();
        match current.get_mut(index) {
            Some(Node::Group(group)) => current = &mut group.children,
            Some(Node::Item(_)) => {
                return Err(TreeError::NotAGroup {
                    path: TreePath(parent[..=depth].to_vec()),
                });
            }
            None => {
                return Err(TreeError::IndexOutOfBounds {
                    path: TreePath(parent[..=depth].to_vec()),
                    index,
                    len,
                });
            }
        }
    }
    Ok(current)
}
