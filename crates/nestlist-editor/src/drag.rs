#![forbid(unsafe_code)]

//! Drag lifecycle for reordering rows.
//!
//! ```text
//! Idle -> Dragging { over: None } -> Dragging { over: Some(..) | None }* -> Idle
//!                                 \-> Idle (cancel)
//! ```
//!
//! The machine only tracks what is being dragged and where it would land.
//! Tree edits happen in [`ListEditor`](crate::ListEditor), which validates
//! each hover before recording it.

use nestlist_tree::{DropPosition, MoveRejection, NodeId};

/// A drop location currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropIndicator {
    pub target: NodeId,
    pub position: DropPosition,
}

/// Where the drag lifecycle currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Dragged ids in document order.
        ids: Vec<NodeId>,
        /// Valid drop location under the pointer, if any.
        over: Option<DropIndicator>,
        /// Row under the pointer whose drop was last refused, and why.
        #[cfg_attr(feature = "serde", serde(skip))]
        refused: Option<(NodeId, MoveRejection)>,
    },
}

/// Explicit no-op diagnostics for drag events that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    NothingToDrag,
    UnknownNode,
    IndicatorUnchanged,
    NoDropTarget,
}

/// What one drag event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEffect {
    Started { ids: Vec<NodeId> },
    /// The indicator moved to a new valid location.
    Hovering(DropIndicator),
    /// The location under the pointer refuses the drop; the indicator is
    /// cleared.
    Invalid(MoveRejection),
    Dropped { moved: Vec<NodeId> },
    /// The drop was refused; the tree is unchanged.
    Rejected(MoveRejection),
    Canceled,
    Noop { reason: DragNoopReason },
}

impl DragEffect {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

/// Runtime lifecycle machine for row drags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Ids being dragged; empty when idle.
    #[must_use]
    pub fn dragging_ids(&self) -> &[NodeId] {
        match &self.state {
            DragState::Dragging { ids, .. } => ids,
            DragState::Idle => &[],
        }
    }

    #[must_use]
    pub fn indicator(&self) -> Option<DropIndicator> {
        match &self.state {
            DragState::Dragging { over, .. } => *over,
            DragState::Idle => None,
        }
    }

    /// Why `target` refused the drop, if it was the last row refused and no
    /// indicator has been shown since.
    #[must_use]
    pub fn refusal_at(&self, target: NodeId) -> Option<&MoveRejection> {
        match &self.state {
            DragState::Dragging {
                over: None,
                refused: Some((refused, rejection)),
                ..
            } if *refused == target => Some(rejection),
            _ => None,
        }
    }

    /// Begin dragging `ids`.
    pub fn start(&mut self, ids: Vec<NodeId>) -> DragEffect {
        if self.is_active() {
            return DragEffect::Noop {
                reason: DragNoopReason::DragAlreadyInProgress,
            };
        }
        if ids.is_empty() {
            return DragEffect::Noop {
                reason: DragNoopReason::NothingToDrag,
            };
        }
        self.state = DragState::Dragging {
            ids: ids.clone(),
            over: None,
            refused: None,
        };
        DragEffect::Started { ids }
    }

    /// Record the validated hover result for row `target`.
    ///
    /// Only reports a change when the indicator moves, or when the pointer
    /// reaches a refusing row it was not already over.
    pub fn hover(
        &mut self,
        target: NodeId,
        result: Result<DropPosition, MoveRejection>,
    ) -> DragEffect {
        let DragState::Dragging { over, refused, .. } = &mut self.state else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        };
        match result {
            Ok(position) => {
                let indicator = DropIndicator { target, position };
                *refused = None;
                if *over == Some(indicator) {
                    return DragEffect::Noop {
                        reason: DragNoopReason::IndicatorUnchanged,
                    };
                }
                *over = Some(indicator);
                DragEffect::Hovering(indicator)
            }
            Err(_) if over.is_none() && refused.as_ref().is_some_and(|(id, _)| *id == target) => {
                DragEffect::Noop {
                    reason: DragNoopReason::IndicatorUnchanged,
                }
            }
            Err(rejection) => {
                *over = None;
                *refused = Some((target, rejection.clone()));
                DragEffect::Invalid(rejection)
            }
        }
    }

    /// Leave the drag, returning what was dragged and where it would land.
    ///
    /// Always returns to idle.
    pub fn finish(&mut self) -> Option<(Vec<NodeId>, Option<DropIndicator>)> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { ids, over, .. } => Some((ids, over)),
            DragState::Idle => None,
        }
    }

    /// Abandon the drag without dropping.
    pub fn cancel(&mut self) -> DragEffect {
        match self.finish() {
            Some(_) => DragEffect::Canceled,
            None => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
        }
    }
}
