#![forbid(unsafe_code)]

use thiserror::Error;

use crate::node::NodeId;
use crate::path::TreePath;

/// Failures reported by the low-level path primitives.
///
/// Higher layers treat all of these as "stale input" and turn them into
/// no-ops; they exist so the primitives stay honest about what happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("path is empty")]
    EmptyPath,
    #[error("index {index} out of bounds at {path} (len {len})")]
    IndexOutOfBounds {
        path: TreePath,
        index: usize,
        len: usize,
    },
    #[error("node at {path} is not a group")]
    NotAGroup { path: TreePath },
    #[error("node {id} not found")]
    NotFound { id: NodeId },
}

/// Reasons a group command was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("no root-level nodes selected")]
    NothingToGroup,
    #[error("node {id} is not at root level")]
    NonRootSelection { id: NodeId },
    #[error("grouping would nest {depth} levels deep (max {max})")]
    DepthExceeded { depth: usize, max: usize },
    #[error("node {id} is not a group")]
    NotAGroup { id: NodeId },
    #[error(transparent)]
    Tree(#[from] TreeError),
}
