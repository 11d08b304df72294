#![forbid(unsafe_code)]

//! Multi-selection with an anchor for range extension.
//!
//! # Transitions
//!
//! | Input | Result |
//! |-------|--------|
//! | click | `{X}`, anchor `X` |
//! | Ctrl/Cmd+click | toggle `X`, anchor `X` |
//! | Shift+click | anchor..=X in document order, anchor kept |
//! | select all | every id, anchor = first |
//! | clear | empty, no anchor |
//!
//! Shift wins when Shift and Ctrl are both held. A range whose anchor is no
//! longer in the document degrades to a plain click.

use std::collections::{BTreeSet, HashSet};

use nestlist_core::event::Modifiers;
use nestlist_tree::NodeId;

/// Selected ids plus the anchor used for Shift+click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    ids: BTreeSet<NodeId>,
    anchor: Option<NodeId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from explicit parts.
    #[must_use]
    pub fn from_parts(ids: impl IntoIterator<Item = NodeId>, anchor: Option<NodeId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            anchor,
        }
    }

    #[must_use]
    pub fn ids(&self) -> &BTreeSet<NodeId> {
        &self.ids
    }

    /// The last-selected id, origin of range selection.
    #[must_use]
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The only selected id, if exactly one is selected.
    #[must_use]
    pub fn sole(&self) -> Option<NodeId> {
        match (self.ids.len(), self.ids.first()) {
            (1, Some(&id)) => Some(id),
            _ => None,
        }
    }

    /// Selected ids ordered as they appear in `order`.
    #[must_use]
    pub fn in_order(&self, order: &[NodeId]) -> Vec<NodeId> {
        order.iter().copied().filter(|id| self.contains(*id)).collect()
    }

    /// Apply a click on `id` with `modifiers`. Returns whether anything
    /// changed.
    ///
    /// `order` is the document order of all ids, needed for Shift ranges.
    pub fn click(&mut self, id: NodeId, modifiers: Modifiers, order: &[NodeId]) -> bool {
        if modifiers.shift() {
            self.extend_to(id, order)
        } else if modifiers.command() {
            self.toggle(id)
        } else {
            self.select_only(id)
        }
    }

    /// Select exactly `id`.
    pub fn select_only(&mut self, id: NodeId) -> bool {
        let before = self.clone();
        self.ids.clear();
        self.ids.insert(id);
        self.anchor = Some(id);
        *self != before
    }

    /// Add or remove `id`; either way it becomes the anchor.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self.anchor = Some(id);
        true
    }

    /// Replace the selection with the inclusive range from the anchor to
    /// `id`, in either direction. The anchor does not move.
    pub fn extend_to(&mut self, id: NodeId, order: &[NodeId]) -> bool {
        let anchor = self.anchor.unwrap_or(id);
        let (Some(from), Some(to)) = (
            order.iter().position(|&x| x == anchor),
            order.iter().position(|&x| x == id),
        ) else {
            nestlist_core::trace!(%id, "range anchor not in document, plain click");
            return self.select_only(id);
        };
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        let before = self.clone();
        self.ids = order[lo..=hi].iter().copied().collect();
        self.anchor = Some(anchor);
        *self != before
    }

    /// Select everything in `order`; the anchor becomes the first id.
    pub fn select_all(&mut self, order: &[NodeId]) -> bool {
        let before = self.clone();
        self.ids = order.iter().copied().collect();
        self.anchor = order.first().copied();
        *self != before
    }

    /// Replace the selection wholesale.
    pub fn set(&mut self, ids: impl IntoIterator<Item = NodeId>, anchor: Option<NodeId>) -> bool {
        let before = self.clone();
        self.ids = ids.into_iter().collect();
        self.anchor = anchor;
        *self != before
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty() || self.anchor.is_some();
        self.ids.clear();
        self.anchor = None;
        changed
    }

    /// Drop ids missing from `existing`, and the anchor if it went stale.
    pub fn prune(&mut self, existing: &HashSet<NodeId>) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| existing.contains(id));
        let mut changed = self.ids.len() != before;
        if self.anchor.is_some_and(|a| !existing.contains(&a)) {
            self.anchor = None;
            changed = true;
        }
        changed
    }
}
