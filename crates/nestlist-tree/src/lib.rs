#![forbid(unsafe_code)]

//! Ordered item/group trees addressed by id and by path.
//!
//! - [`node`] - [`Node`], [`Item`], [`Group`] and their opaque [`NodeId`]
//! - [`path`] - [`TreePath`] resolution and single-node edits
//! - [`walk`] - document-order traversals and derived enablement
//! - [`identity`] - deep copies with fresh ids
//! - [`moves`] - batch re-parenting relative to a drop target
//! - [`group`] - grouping, ungrouping, and flag toggles
//!
//! Every structural edit resolves ids to paths immediately before it runs;
//! paths are never cached across edits.

pub mod error;
pub mod group;
pub mod identity;
pub mod moves;
pub mod node;
pub mod path;
pub mod walk;

pub use error::{GroupError, TreeError};
pub use group::{
    can_group, check_group, create_group, group_root_nodes, rename_group, toggle_collapsed,
    toggle_enabled, ungroup,
};
pub use identity::{deep_copy, deep_copy_with};
pub use moves::{DropPosition, MoveRejection, move_nodes_to_target, validate_drop};
pub use node::{Group, Item, Node, NodeId, NodeKind};
pub use path::{
    TreePath, delete_paths_safely, find_path_by_id, find_paths_by_ids, get_at_path,
    get_at_path_mut, insert_at_path, remove_at_path, update_at_path,
};
pub use walk::{
    FlatNode, collect_all_ids, contains_id, flatten, is_effectively_disabled, nesting_depth,
    subtree_depth,
};

/// Default maximum nesting depth, root level being 0.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 3;
