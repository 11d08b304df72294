#![forbid(unsafe_code)]

//! Editor commands and their outcomes.
//!
//! Commands never fail towards the host. Anything that cannot run (stale
//! ids, a refused move, a disabled action) comes back as
//! [`CommandOutcome::Noop`] with a reason and leaves all state unchanged.

use nestlist_tree::{GroupError, MoveRejection, NodeId};

/// Every action the editor can perform outside of pointer gestures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "command", rename_all = "snake_case"))]
pub enum EditorCommand {
    Copy,
    Cut,
    Paste,
    SelectAll,
    /// Clear the selection, cancel a rename, and cancel a drag if the
    /// config says so. Bound to Escape.
    ClearSelection,
    DeleteSelected,
    GroupSelected,
    CreateGroup,
    Ungroup { id: NodeId },
    /// Start renaming the sole selected group. Bound to F2.
    BeginRename,
    CommitRename { name: String },
    CancelRename,
    ToggleEnabled { id: NodeId },
    ToggleCollapsed { id: NodeId },
}

impl EditorCommand {
    /// Stable name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Cut => "cut",
            Self::Paste => "paste",
            Self::SelectAll => "select_all",
            Self::ClearSelection => "clear_selection",
            Self::DeleteSelected => "delete_selected",
            Self::GroupSelected => "group_selected",
            Self::CreateGroup => "create_group",
            Self::Ungroup { .. } => "ungroup",
            Self::BeginRename => "begin_rename",
            Self::CommitRename { .. } => "commit_rename",
            Self::CancelRename => "cancel_rename",
            Self::ToggleEnabled { .. } => "toggle_enabled",
            Self::ToggleCollapsed { .. } => "toggle_collapsed",
        }
    }
}

/// Why a command did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoopReason {
    EmptySelection,
    EmptyClipboard,
    EmptyTree,
    /// The id no longer resolves in the current tree.
    UnknownNode(NodeId),
    NotAGroup(NodeId),
    GroupsDisabled,
    GroupRefused(GroupError),
    MoveRefused(MoveRejection),
    /// Rename needs exactly one selected group.
    RenameUnavailable,
    NotRenaming,
    EmptyName,
    /// The command would not change anything.
    Unchanged,
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop(NoopReason),
}

impl CommandOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub fn noop_reason(&self) -> Option<&NoopReason> {
        match self {
            Self::Noop(reason) => Some(reason),
            Self::Applied => None,
        }
    }
}

impl From<NoopReason> for CommandOutcome {
    fn from(reason: NoopReason) -> Self {
        Self::Noop(reason)
    }
}
