#![forbid(unsafe_code)]

//! The list editor: one instance per rendered list.
//!
//! [`ListEditor`] owns all interaction state for its list (selection, drag,
//! rename) together with the most recently synced tree. Handlers always read
//! that cached tree, and every edit re-resolves ids to paths right before it
//! runs.
//!
//! # Data flow
//!
//! ```text
//! input -> state transition -> tree edit on a working copy
//!       -> commit -> host.on_items_changed / on_selection_changed
//!       -> host stores the tree -> ListEditor::sync on next render
//! ```
//!
//! # Invariants
//!
//! 1. After every structural command and every sync, the selection only
//!    holds ids present in the cached tree.
//! 2. A rejected edit leaves the cached tree untouched and fires no
//!    callbacks.

use std::collections::HashSet;

use nestlist_core::event::{KeyEvent, Modifiers};
use nestlist_core::geometry::Rect;
use nestlist_tree::{
    DropPosition, GroupError, Node, NodeId, TreeError, TreePath, can_group, check_group,
    collect_all_ids, create_group, deep_copy, delete_paths_safely, find_path_by_id,
    find_paths_by_ids, get_at_path, group_root_nodes, insert_at_path, move_nodes_to_target,
    rename_group, subtree_depth, toggle_collapsed, toggle_enabled, ungroup, validate_drop,
};

use crate::command::{CommandOutcome, EditorCommand, NoopReason};
use crate::config::EditorConfig;
use crate::drag::{DragEffect, DragMachine, DragNoopReason, DragState, DropIndicator};
use crate::host::EditorHost;
use crate::keymap::Keymap;
use crate::rows::{Row, build_rows};
use crate::selection::Selection;

/// Interaction state and command handling for one hierarchical list.
#[derive(Debug)]
pub struct ListEditor<P, H> {
    config: EditorConfig,
    keymap: Keymap,
    items: Vec<Node<P>>,
    selection: Selection,
    drag: DragMachine,
    renaming: Option<NodeId>,
    host: H,
}

impl<P: Clone, H: EditorHost<P>> ListEditor<P, H> {
    /// Create an editor with default config and keymap and an empty tree.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            config: EditorConfig::default(),
            keymap: Keymap::default(),
            items: Vec::new(),
            selection: Selection::new(),
            drag: DragMachine::new(),
            renaming: None,
            host,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Start from `items` without notifying the host.
    #[must_use]
    pub fn with_items(mut self, items: Vec<Node<P>>) -> Self {
        self.items = items;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// The most recently synced or edited tree.
    #[must_use]
    pub fn items(&self) -> &[Node<P>] {
        &self.items
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Group currently being renamed.
    #[must_use]
    pub fn renaming(&self) -> Option<NodeId> {
        self.renaming
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn header_label(&self) -> &str {
        &self.config.header_label
    }

    #[must_use]
    pub fn empty_text(&self) -> &str {
        &self.config.empty_text
    }

    /// Visible rows in document order; children of collapsed groups are
    /// left out.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        build_rows(
            &self.items,
            &self.host,
            &self.selection,
            &self.drag,
            self.renaming,
        )
    }

    /// Whether group-selected would currently run.
    #[must_use]
    pub fn can_group_selected(&self) -> bool {
        self.config.allow_groups
            && can_group(&self.items, &self.selected_ids(), self.config.max_nesting_depth)
    }

    // ------------------------------------------------------------------
    // Sync
    // ------------------------------------------------------------------

    /// Replace the cached tree with the host's current one.
    ///
    /// Selection entries and a rename target that no longer exist are
    /// dropped; the host hears about a selection change.
    pub fn sync(&mut self, items: Vec<Node<P>>) {
        self.items = items;
        self.reconcile();
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Click on a row with the given modifiers.
    pub fn click(&mut self, id: NodeId, modifiers: Modifiers) -> CommandOutcome {
        if !self.contains(id) {
            return NoopReason::UnknownNode(id).into();
        }
        if self.renaming.is_some_and(|renaming| renaming != id) {
            self.renaming = None;
        }
        let order = collect_all_ids(&self.items);
        if self.selection.click(id, modifiers, &order) {
            self.notify_selection();
            CommandOutcome::Applied
        } else {
            NoopReason::Unchanged.into()
        }
    }

    /// Double-click on a group selects it and starts renaming.
    pub fn double_click(&mut self, id: NodeId) -> CommandOutcome {
        match self.node(id) {
            None => return NoopReason::UnknownNode(id).into(),
            Some(node) if !node.is_group() => return NoopReason::NotAGroup(id).into(),
            Some(_) => {}
        }
        if self.selection.select_only(id) {
            self.notify_selection();
        }
        self.begin_rename()
    }

    /// Start dragging from row `id`.
    ///
    /// A selected row drags the whole selection; any other row replaces the
    /// selection and drags alone.
    pub fn drag_start(&mut self, id: NodeId) -> DragEffect {
        if self.drag.is_active() {
            return DragEffect::Noop {
                reason: DragNoopReason::DragAlreadyInProgress,
            };
        }
        if !self.contains(id) {
            return DragEffect::Noop {
                reason: DragNoopReason::UnknownNode,
            };
        }
        self.renaming = None;
        let ids = if self.selection.contains(id) {
            self.selection.in_order(&collect_all_ids(&self.items))
        } else {
            if self.selection.select_only(id) {
                self.notify_selection();
            }
            vec![id]
        };
        let effect = self.drag.start(ids);
        nestlist_core::debug!(effect = ?effect, "drag start");
        effect
    }

    /// Pointer moved over row `target`, whose on-screen bounds are `bounds`.
    pub fn drag_over(&mut self, target: NodeId, bounds: Rect, pointer_y: f32) -> DragEffect {
        if !self.drag.is_active() {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        }
        let Some(kind) = self.node(target).map(Node::kind) else {
            return self
                .drag
                .hover(target, Err(nestlist_tree::MoveRejection::TargetMissing { target }));
        };
        let fraction = bounds.vertical_fraction(pointer_y);
        let position = DropPosition::from_fraction(kind, fraction, self.config.group_before_band);
        self.drag_over_position(target, position)
    }

    /// Hover with an already-computed position.
    pub fn drag_over_position(&mut self, target: NodeId, position: DropPosition) -> DragEffect {
        if !self.drag.is_active() {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        }
        let result = validate_drop(
            &self.items,
            self.drag.dragging_ids(),
            target,
            position,
            self.config.max_nesting_depth,
        )
        .map(|()| position);
        let effect = self.drag.hover(target, result);
        if !effect.is_noop() {
            nestlist_core::trace!(effect = ?effect, "drag over");
        }
        effect
    }

    /// Drop at the current indicator. Always ends the drag.
    pub fn drop(&mut self) -> DragEffect {
        let Some((ids, over)) = self.drag.finish() else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            };
        };
        let Some(DropIndicator { target, position }) = over else {
            return DragEffect::Noop {
                reason: DragNoopReason::NoDropTarget,
            };
        };
        let span = nestlist_core::debug_span!("nestlist.drop", %target, ?position);
        let _guard = span.enter();
        match move_nodes_to_target(
            &mut self.items,
            &ids,
            target,
            position,
            self.config.max_nesting_depth,
        ) {
            Ok(moved) => {
                self.items_changed();
                DragEffect::Dropped { moved }
            }
            Err(rejection) => {
                nestlist_core::debug!(%rejection, "drop refused");
                DragEffect::Rejected(rejection)
            }
        }
    }

    /// Hover and drop in one step.
    pub fn drop_at(&mut self, target: NodeId, bounds: Rect, pointer_y: f32) -> DragEffect {
        let refusal = match self.drag_over(target, bounds, pointer_y) {
            DragEffect::Invalid(rejection) => Some(rejection),
            _ => self.drag.refusal_at(target).cloned(),
        };
        if let Some(rejection) = refusal {
            self.drag.finish();
            return DragEffect::Rejected(rejection);
        }
        self.drop()
    }

    /// The drag ended without a drop.
    pub fn drag_cancel(&mut self) -> DragEffect {
        self.drag.cancel()
    }

    // ------------------------------------------------------------------
    // Keyboard and commands
    // ------------------------------------------------------------------

    /// Run the command bound to `event`, if any.
    ///
    /// While a rename is active only Escape is handled, so typing reaches
    /// the host's text field.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<CommandOutcome> {
        let command = self.keymap.resolve(event)?.clone();
        if self.renaming.is_some() && command != EditorCommand::ClearSelection {
            return None;
        }
        Some(self.execute(command))
    }

    pub fn execute(&mut self, command: EditorCommand) -> CommandOutcome {
        let span = nestlist_core::debug_span!("nestlist.command", command = command.name());
        let _guard = span.enter();
        let outcome = match command {
            EditorCommand::Copy => self.copy(),
            EditorCommand::Cut => self.cut(),
            EditorCommand::Paste => self.paste(),
            EditorCommand::SelectAll => self.select_all(),
            EditorCommand::ClearSelection => self.clear_selection(),
            EditorCommand::DeleteSelected => self.delete_selected(),
            EditorCommand::GroupSelected => self.group_selected(),
            EditorCommand::CreateGroup => self.create_group(),
            EditorCommand::Ungroup { id } => self.ungroup(id),
            EditorCommand::BeginRename => self.begin_rename(),
            EditorCommand::CommitRename { name } => self.commit_rename(&name),
            EditorCommand::CancelRename => self.cancel_rename(),
            EditorCommand::ToggleEnabled { id } => self.toggle_enabled(id),
            EditorCommand::ToggleCollapsed { id } => self.toggle_collapsed(id),
        };
        nestlist_core::debug!(outcome = ?outcome, "command finished");
        outcome
    }

    /// Hand the selected subtrees to the host. Ids are kept; a selected
    /// node inside another selected node travels with its ancestor.
    pub fn copy(&mut self) -> CommandOutcome {
        let nodes: Vec<Node<P>> = self
            .selected_top_paths()
            .iter()
            .filter_map(|path| get_at_path(&self.items, path).cloned())
            .collect();
        if nodes.is_empty() {
            return NoopReason::EmptySelection.into();
        }
        self.host.on_copy(nodes);
        CommandOutcome::Applied
    }

    pub fn cut(&mut self) -> CommandOutcome {
        match self.copy() {
            CommandOutcome::Applied => self.delete_selected(),
            noop => noop,
        }
    }

    /// Insert fresh copies of the host clipboard after the anchor.
    ///
    /// Without a live anchor the copies go to the end of the root. If the
    /// anchor is too deep to hold them, they go after the anchor's
    /// root-level ancestor. The pasted nodes become the selection.
    pub fn paste(&mut self) -> CommandOutcome {
        let clipboard = self.host.clipboard_items();
        if clipboard.is_empty() {
            return NoopReason::EmptyClipboard.into();
        }
        let copies = deep_copy(&clipboard);
        let pasted: Vec<NodeId> = copies.iter().map(Node::id).collect();
        let at = self.paste_location(&copies);
        let start = at.last().unwrap_or(0);

        let mut working = self.items.clone();
        for (offset, node) in copies.into_iter().enumerate() {
            if insert_at_path(&mut working, &at.with_last(start + offset), node).is_err() {
                nestlist_core::debug!(%at, "paste location went stale");
                return NoopReason::Unchanged.into();
            }
        }
        self.items = working;
        let anchor = pasted.last().copied();
        self.commit_with_selection(pasted, anchor);
        CommandOutcome::Applied
    }

    pub fn select_all(&mut self) -> CommandOutcome {
        let order = collect_all_ids(&self.items);
        if order.is_empty() {
            return NoopReason::EmptyTree.into();
        }
        if self.selection.select_all(&order) {
            self.notify_selection();
            CommandOutcome::Applied
        } else {
            NoopReason::Unchanged.into()
        }
    }

    /// Clear the selection and cancel any rename, plus any drag when
    /// `cancel_drag_on_escape` is set.
    pub fn clear_selection(&mut self) -> CommandOutcome {
        let mut changed = false;
        if self.selection.clear() {
            self.notify_selection();
            changed = true;
        }
        if self.renaming.take().is_some() {
            changed = true;
        }
        if self.config.cancel_drag_on_escape && !self.drag.cancel().is_noop() {
            changed = true;
        }
        if changed {
            CommandOutcome::Applied
        } else {
            NoopReason::Unchanged.into()
        }
    }

    pub fn delete_selected(&mut self) -> CommandOutcome {
        let paths: Vec<TreePath> =
            find_paths_by_ids(&self.items, self.selection.ids().iter().copied())
                .into_values()
                .collect();
        if paths.is_empty() {
            return NoopReason::EmptySelection.into();
        }
        let mut working = self.items.clone();
        delete_paths_safely(&mut working, paths);
        nestlist_core::debug!(remaining = working.len(), "deleted selection");
        self.items = working;
        self.commit_with_selection([], None);
        CommandOutcome::Applied
    }

    /// Wrap the selected root-level nodes in a new group and select it.
    pub fn group_selected(&mut self) -> CommandOutcome {
        if !self.config.allow_groups {
            return NoopReason::GroupsDisabled.into();
        }
        let ids = self.selected_ids();
        if let Err(err) = check_group(&self.items, &ids, self.config.max_nesting_depth) {
            return NoopReason::GroupRefused(err).into();
        }
        let mut working = self.items.clone();
        match group_root_nodes(
            &mut working,
            &ids,
            self.config.grouped_name.clone(),
            self.config.max_nesting_depth,
        ) {
            Ok(group) => {
                self.items = working;
                self.commit_with_selection([group], Some(group));
                CommandOutcome::Applied
            }
            Err(err) => NoopReason::GroupRefused(err).into(),
        }
    }

    /// Append an empty group at the end of the list and select it.
    pub fn create_group(&mut self) -> CommandOutcome {
        if !self.config.allow_groups {
            return NoopReason::GroupsDisabled.into();
        }
        let group = create_group(&mut self.items, self.config.new_group_name.clone());
        nestlist_core::debug!(%group, "created group");
        self.commit_with_selection([group], Some(group));
        CommandOutcome::Applied
    }

    /// Splice a group's children into its place. Clears the selection.
    pub fn ungroup(&mut self, id: NodeId) -> CommandOutcome {
        let mut working = self.items.clone();
        match ungroup(&mut working, id) {
            Ok(_) => {
                nestlist_core::debug!(%id, "ungrouped");
                self.items = working;
                self.commit_with_selection([], None);
                CommandOutcome::Applied
            }
            Err(err) => group_noop(id, err).into(),
        }
    }

    /// Start renaming when the sole selection is a group.
    pub fn begin_rename(&mut self) -> CommandOutcome {
        let Some(id) = self.selection.sole() else {
            return NoopReason::RenameUnavailable.into();
        };
        if !self.node(id).is_some_and(Node::is_group) {
            return NoopReason::RenameUnavailable.into();
        }
        self.renaming = Some(id);
        CommandOutcome::Applied
    }

    /// Finish renaming with `name`. Blank names end the rename unchanged.
    pub fn commit_rename(&mut self, name: &str) -> CommandOutcome {
        let Some(id) = self.renaming.take() else {
            return NoopReason::NotRenaming.into();
        };
        let name = name.trim();
        if name.is_empty() {
            return NoopReason::EmptyName.into();
        }
        match self.node(id).and_then(Node::as_group) {
            None => return NoopReason::UnknownNode(id).into(),
            Some(group) if group.name == name => return NoopReason::Unchanged.into(),
            Some(_) => {}
        }
        let mut working = self.items.clone();
        match rename_group(&mut working, id, name) {
            Ok(()) => {
                self.items = working;
                self.items_changed();
                CommandOutcome::Applied
            }
            Err(err) => group_noop(id, err).into(),
        }
    }

    pub fn cancel_rename(&mut self) -> CommandOutcome {
        match self.renaming.take() {
            Some(_) => CommandOutcome::Applied,
            None => NoopReason::NotRenaming.into(),
        }
    }

    /// Flip a node's own enabled flag. Descendants keep their flags.
    pub fn toggle_enabled(&mut self, id: NodeId) -> CommandOutcome {
        match toggle_enabled(&mut self.items, id) {
            Ok(_) => {
                nestlist_core::debug!(%id, "toggled enabled");
                self.items_changed();
                CommandOutcome::Applied
            }
            Err(err) => group_noop(id, GroupError::Tree(err)).into(),
        }
    }

    pub fn toggle_collapsed(&mut self, id: NodeId) -> CommandOutcome {
        match toggle_collapsed(&mut self.items, id) {
            Ok(_) => {
                self.items_changed();
                CommandOutcome::Applied
            }
            Err(err) => group_noop(id, err).into(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn node(&self, id: NodeId) -> Option<&Node<P>> {
        find_path_by_id(&self.items, id).and_then(|path| get_at_path(&self.items, &path))
    }

    fn contains(&self, id: NodeId) -> bool {
        find_path_by_id(&self.items, id).is_some()
    }

    fn selected_ids(&self) -> Vec<NodeId> {
        self.selection.ids().iter().copied().collect()
    }

    /// Paths of selected nodes without a selected ancestor, in document
    /// order.
    fn selected_top_paths(&self) -> Vec<TreePath> {
        let mut paths: Vec<TreePath> =
            find_paths_by_ids(&self.items, self.selection.ids().iter().copied())
                .into_values()
                .collect();
        paths.sort();
        let mut top: Vec<TreePath> = Vec::with_capacity(paths.len());
        for path in paths {
            if !top.iter().any(|kept| kept.is_ancestor_of(&path)) {
                top.push(path);
            }
        }
        top
    }

    fn paste_location(&self, copies: &[Node<P>]) -> TreePath {
        let Some(anchor) = self
            .selection
            .anchor()
            .and_then(|id| find_path_by_id(&self.items, id))
        else {
            return TreePath::root(self.items.len());
        };
        let deepest = copies.iter().map(subtree_depth).max().unwrap_or(0);
        if anchor.depth() + deepest > self.config.max_nesting_depth {
            let root = anchor.as_slice().first().copied().unwrap_or(0);
            nestlist_core::debug!(%anchor, "paste too deep at anchor, using root level");
            return TreePath::root(root + 1);
        }
        anchor.with_last(anchor.last().unwrap_or(0) + 1)
    }

    /// Publish an edited tree together with the selection that follows it.
    ///
    /// The host always hears about the items before the selection.
    fn commit_with_selection(
        &mut self,
        ids: impl IntoIterator<Item = NodeId>,
        anchor: Option<NodeId>,
    ) {
        let selection_changed = self.selection.set(ids, anchor);
        self.items_changed();
        if selection_changed {
            self.notify_selection();
        }
    }

    fn notify_selection(&mut self) {
        self.host.on_selection_changed(&self.selection);
    }

    fn items_changed(&mut self) {
        self.host.on_items_changed(&self.items);
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let existing: HashSet<NodeId> = collect_all_ids(&self.items).into_iter().collect();
        if self.selection.prune(&existing) {
            nestlist_core::trace!(remaining = self.selection.len(), "pruned selection");
            self.notify_selection();
        }
        if self.renaming.is_some_and(|id| !existing.contains(&id)) {
            self.renaming = None;
        }
    }
}

fn group_noop(id: NodeId, err: GroupError) -> NoopReason {
    match err {
        GroupError::Tree(TreeError::NotFound { .. }) => NoopReason::UnknownNode(id),
        GroupError::NotAGroup { .. } => NoopReason::NotAGroup(id),
        other => NoopReason::GroupRefused(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestlist_core::event::KeyCode;
    use nestlist_tree::{Group, Item};

    #[derive(Debug, Default)]
    struct Recorder {
        changes: Vec<Vec<Node<String>>>,
        selections: Vec<Selection>,
        copies: Vec<Vec<Node<String>>>,
        clipboard: Vec<Node<String>>,
        calls: Vec<&'static str>,
    }

    impl EditorHost<String> for Recorder {
        fn on_items_changed(&mut self, items: &[Node<String>]) {
            self.changes.push(items.to_vec());
            self.calls.push("items");
        }

        fn on_selection_changed(&mut self, selection: &Selection) {
            self.selections.push(selection.clone());
            self.calls.push("selection");
        }

        fn on_copy(&mut self, nodes: Vec<Node<String>>) {
            self.copies.push(nodes);
        }

        fn item_label(&self, item: &Item<String>) -> String {
            item.payload.clone()
        }

        fn clipboard_items(&self) -> Vec<Node<String>> {
            self.clipboard.clone()
        }
    }

    fn id(raw: u128) -> NodeId {
        NodeId::from_u128(raw)
    }

    fn leaf(raw: u128, label: &str) -> Node<String> {
        Item::new(label.to_string()).with_id(id(raw)).into()
    }

    /// `[A(1), B(2), G(3){C(4), D(5)}]`
    fn sample() -> Vec<Node<String>> {
        vec![
            leaf(1, "A"),
            leaf(2, "B"),
            Group::new("G")
                .with_id(id(3))
                .child(leaf(4, "C"))
                .child(leaf(5, "D"))
                .into(),
        ]
    }

    fn editor() -> ListEditor<String, Recorder> {
        ListEditor::new(Recorder::default()).with_items(sample())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL)
    }

    #[test]
    fn click_notifies_only_on_change() {
        let mut ed = editor();
        assert!(ed.click(id(2), Modifiers::NONE).is_applied());
        assert_eq!(
            ed.click(id(2), Modifiers::NONE),
            CommandOutcome::Noop(NoopReason::Unchanged)
        );
        assert_eq!(ed.host().selections.len(), 1);
        assert_eq!(
            ed.click(id(42), Modifiers::NONE),
            CommandOutcome::Noop(NoopReason::UnknownNode(id(42)))
        );
    }

    #[test]
    fn copy_folds_nested_selection_into_ancestor() {
        let mut ed = editor();
        ed.click(id(3), Modifiers::NONE);
        ed.click(id(4), Modifiers::CTRL);
        ed.click(id(1), Modifiers::CTRL);
        assert!(ed.copy().is_applied());
        let copied: Vec<NodeId> = ed.host().copies[0].iter().map(Node::id).collect();
        assert_eq!(copied, vec![id(1), id(3)]);
        assert!(ed.host().changes.is_empty());
    }

    #[test]
    fn copy_with_empty_selection_is_noop() {
        let mut ed = editor();
        assert_eq!(
            ed.copy(),
            CommandOutcome::Noop(NoopReason::EmptySelection)
        );
        assert!(ed.host().copies.is_empty());
    }

    #[test]
    fn cut_copies_then_deletes() {
        let mut ed = editor();
        ed.click(id(4), Modifiers::NONE);
        assert!(ed.handle_key(&ctrl('x')).is_some_and(|o| o.is_applied()));
        assert_eq!(ed.host().copies.len(), 1);
        assert_eq!(collect_all_ids(ed.items()), vec![id(1), id(2), id(3), id(5)]);
        assert!(ed.selection().is_empty());
    }

    #[test]
    fn delete_removes_nested_and_parent_together() {
        let mut ed = editor();
        ed.click(id(3), Modifiers::NONE);
        ed.click(id(5), Modifiers::CTRL);
        ed.click(id(1), Modifiers::CTRL);
        assert!(ed.delete_selected().is_applied());
        assert_eq!(collect_all_ids(ed.items()), vec![id(2)]);
        assert!(ed.selection().is_empty());
        assert_eq!(ed.host().changes.len(), 1);
    }

    #[test]
    fn paste_without_anchor_appends_to_root() {
        let mut ed = editor();
        ed.host_mut().clipboard = vec![leaf(9, "X")];
        assert!(ed.paste().is_applied());
        assert_eq!(ed.items().len(), 4);
        let pasted = ed.items()[3].id();
        assert_ne!(pasted, id(9));
        assert_eq!(ed.selection().sole(), Some(pasted));
        assert_eq!(ed.selection().anchor(), Some(pasted));
    }

    #[test]
    fn paste_too_deep_goes_after_root_ancestor() {
        let mut ed = editor().with_config(EditorConfig::default().with_max_nesting_depth(1));
        ed.host_mut().clipboard = vec![Group::new("deep").child(leaf(9, "X")).into()];
        ed.click(id(4), Modifiers::NONE);
        assert!(ed.paste().is_applied());
        assert_eq!(ed.items().len(), 4);
        assert_eq!(ed.items()[3].as_group().map(|g| g.name.as_str()), Some("deep"));
        assert_eq!(ed.items()[2].children().len(), 2);
    }

    #[test]
    fn empty_clipboard_is_noop() {
        let mut ed = editor();
        assert_eq!(
            ed.handle_key(&ctrl('v')),
            Some(CommandOutcome::Noop(NoopReason::EmptyClipboard))
        );
    }

    #[test]
    fn escape_clears_selection_rename_and_drag() {
        let mut ed = editor();
        ed.click(id(3), Modifiers::NONE);
        assert!(ed.begin_rename().is_applied());
        let escape = KeyEvent::new(KeyCode::Escape);
        assert_eq!(ed.handle_key(&escape), Some(CommandOutcome::Applied));
        assert!(ed.selection().is_empty());
        assert_eq!(ed.renaming(), None);

        ed.drag_start(id(1));
        ed.handle_key(&escape);
        assert_eq!(ed.drag_state(), &DragState::Idle);
    }

    #[test]
    fn escape_keeps_drag_when_configured() {
        let mut ed = editor().with_config(EditorConfig::default().no_escape_cancel());
        ed.drag_start(id(1));
        ed.clear_selection();
        assert!(matches!(ed.drag_state(), DragState::Dragging { .. }));
    }

    #[test]
    fn keys_other_than_escape_pass_through_while_renaming() {
        let mut ed = editor();
        ed.click(id(3), Modifiers::NONE);
        ed.handle_key(&KeyEvent::new(KeyCode::F(2)));
        assert_eq!(ed.renaming(), Some(id(3)));
        assert_eq!(ed.handle_key(&KeyEvent::new(KeyCode::Delete)), None);
        assert_eq!(ed.items().len(), 3);
    }

    #[test]
    fn rename_requires_sole_group() {
        let mut ed = editor();
        ed.click(id(1), Modifiers::NONE);
        assert_eq!(
            ed.begin_rename(),
            CommandOutcome::Noop(NoopReason::RenameUnavailable)
        );
        ed.click(id(3), Modifiers::CTRL);
        assert_eq!(
            ed.begin_rename(),
            CommandOutcome::Noop(NoopReason::RenameUnavailable)
        );
    }

    #[test]
    fn double_click_renames_group() {
        let mut ed = editor();
        assert!(ed.double_click(id(3)).is_applied());
        assert_eq!(ed.selection().sole(), Some(id(3)));
        assert!(ed.commit_rename("  Effects ").is_applied());
        assert_eq!(ed.items()[2].as_group().map(|g| g.name.as_str()), Some("Effects"));
        assert_eq!(ed.renaming(), None);
        assert_eq!(
            ed.double_click(id(1)),
            CommandOutcome::Noop(NoopReason::NotAGroup(id(1)))
        );
    }

    #[test]
    fn blank_or_same_name_does_not_edit() {
        let mut ed = editor();
        ed.double_click(id(3));
        assert_eq!(
            ed.commit_rename("   "),
            CommandOutcome::Noop(NoopReason::EmptyName)
        );
        assert_eq!(ed.renaming(), None);
        ed.begin_rename();
        assert_eq!(ed.commit_rename("G"), CommandOutcome::Noop(NoopReason::Unchanged));
        assert!(ed.host().changes.is_empty());
        assert_eq!(ed.cancel_rename(), CommandOutcome::Noop(NoopReason::NotRenaming));
    }

    #[test]
    fn group_selected_selects_new_group() {
        let mut ed = editor();
        ed.click(id(1), Modifiers::NONE);
        ed.click(id(2), Modifiers::SHIFT);
        assert!(ed.can_group_selected());
        assert!(ed.handle_key(&ctrl('g')).is_some_and(|o| o.is_applied()));
        assert_eq!(ed.items().len(), 2);
        let group = ed.items()[0].id();
        assert_eq!(ed.items()[0].as_group().map(|g| g.name.as_str()), Some("Group"));
        assert_eq!(ed.selection().sole(), Some(group));
    }

    #[test]
    fn group_commands_respect_allow_groups() {
        let mut ed = editor().with_config(EditorConfig::default().with_allow_groups(false));
        ed.click(id(1), Modifiers::NONE);
        assert!(!ed.can_group_selected());
        assert_eq!(
            ed.group_selected(),
            CommandOutcome::Noop(NoopReason::GroupsDisabled)
        );
        assert_eq!(
            ed.create_group(),
            CommandOutcome::Noop(NoopReason::GroupsDisabled)
        );
    }

    #[test]
    fn create_group_appends_named_group() {
        let mut ed = editor();
        assert!(ed.execute(EditorCommand::CreateGroup).is_applied());
        assert_eq!(
            ed.items()[3].as_group().map(|g| g.name.as_str()),
            Some("New Group")
        );
    }

    #[test]
    fn create_group_selects_new_group() {
        let mut ed = editor();
        ed.click(id(1), Modifiers::NONE);
        assert!(ed.execute(EditorCommand::CreateGroup).is_applied());
        let new_group = ed.items()[3].id();
        assert_eq!(ed.selection().sole(), Some(new_group));
        assert_eq!(ed.selection().anchor(), Some(new_group));
        assert_eq!(ed.host().selections.last(), Some(ed.selection()));
    }

    #[test]
    fn structural_commands_report_items_before_selection() {
        let mut ed = editor();
        ed.click(id(4), Modifiers::NONE);
        ed.host_mut().calls.clear();
        ed.delete_selected();
        assert_eq!(ed.host().calls, vec!["items", "selection"]);

        ed.click(id(1), Modifiers::NONE);
        ed.host_mut().calls.clear();
        ed.group_selected();
        assert_eq!(ed.host().calls, vec!["items", "selection"]);

        let group = ed.selection().sole().expect("group is selected");
        ed.host_mut().calls.clear();
        ed.ungroup(group);
        assert_eq!(ed.host().calls, vec!["items", "selection"]);

        ed.host_mut().calls.clear();
        ed.create_group();
        assert_eq!(ed.host().calls, vec!["items", "selection"]);
    }

    #[test]
    fn ungroup_clears_selection() {
        let mut ed = editor();
        ed.click(id(4), Modifiers::NONE);
        assert!(ed.execute(EditorCommand::Ungroup { id: id(3) }).is_applied());
        assert_eq!(collect_all_ids(ed.items()), vec![id(1), id(2), id(4), id(5)]);
        assert!(ed.selection().is_empty());
        assert_eq!(
            ed.ungroup(id(1)),
            CommandOutcome::Noop(NoopReason::NotAGroup(id(1)))
        );
    }

    #[test]
    fn toggles_and_stale_ids() {
        let mut ed = editor();
        assert!(ed.toggle_enabled(id(3)).is_applied());
        let rows = ed.rows();
        assert!(rows[2].effective_disabled && !rows[2].enabled);
        assert!(rows[3].effective_disabled && rows[3].enabled);

        assert!(ed.toggle_collapsed(id(3)).is_applied());
        assert_eq!(ed.rows().len(), 3);
        assert_eq!(
            ed.toggle_collapsed(id(1)),
            CommandOutcome::Noop(NoopReason::NotAGroup(id(1)))
        );
        assert_eq!(
            ed.toggle_enabled(id(77)),
            CommandOutcome::Noop(NoopReason::UnknownNode(id(77)))
        );
    }

    #[test]
    fn sync_prunes_selection_and_rename() {
        let mut ed = editor();
        ed.double_click(id(3));
        ed.click(id(1), Modifiers::CTRL);
        let before = ed.host().selections.len();
        ed.sync(vec![leaf(1, "A")]);
        assert_eq!(ed.selection().sole(), Some(id(1)));
        assert_eq!(ed.renaming(), None);
        assert_eq!(ed.host().selections.len(), before + 1);
    }

    #[test]
    fn drag_unselected_row_replaces_selection() {
        let mut ed = editor();
        ed.click(id(4), Modifiers::NONE);
        let effect = ed.drag_start(id(1));
        assert_eq!(effect, DragEffect::Started { ids: vec![id(1)] });
        assert_eq!(ed.selection().sole(), Some(id(1)));
    }

    #[test]
    fn drag_selected_rows_in_document_order() {
        let mut ed = editor();
        ed.click(id(5), Modifiers::NONE);
        ed.click(id(1), Modifiers::CTRL);
        assert_eq!(
            ed.drag_start(id(5)),
            DragEffect::Started {
                ids: vec![id(1), id(5)]
            }
        );
        let rows = ed.rows();
        assert!(rows[0].dragging && rows[4].dragging && !rows[1].dragging);
    }

    #[test]
    fn hovering_own_subtree_is_invalid() {
        let mut ed = editor();
        ed.drag_start(id(3));
        let row = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert!(matches!(
            ed.drag_over(id(4), row, 15.0),
            DragEffect::Invalid(nestlist_tree::MoveRejection::TargetInsideSource { .. })
        ));
        assert_eq!(
            ed.drop(),
            DragEffect::Noop {
                reason: DragNoopReason::NoDropTarget
            }
        );
        assert_eq!(ed.items(), sample().as_slice());
    }

    #[test]
    fn drop_into_group_appends() {
        let mut ed = editor();
        ed.drag_start(id(1));
        let row = Rect::new(0.0, 40.0, 100.0, 20.0);
        assert_eq!(
            ed.drag_over(id(3), row, 50.0),
            DragEffect::Hovering(DropIndicator {
                target: id(3),
                position: DropPosition::Into
            })
        );
        assert_eq!(ed.rows()[2].drop_indicator, Some(DropPosition::Into));
        assert_eq!(ed.drop(), DragEffect::Dropped { moved: vec![id(1)] });
        let inner: Vec<NodeId> = ed.items()[1].children().iter().map(Node::id).collect();
        assert_eq!(inner, vec![id(4), id(5), id(1)]);
        assert_eq!(ed.drag_state(), &DragState::Idle);
        assert_eq!(ed.host().changes.len(), 1);
    }

    #[test]
    fn hovering_a_refusing_row_reports_once() {
        let mut ed = editor();
        ed.drag_start(id(3));
        assert!(matches!(
            ed.drag_over_position(id(4), DropPosition::Before),
            DragEffect::Invalid(nestlist_tree::MoveRejection::TargetInsideSource { .. })
        ));
        assert_eq!(
            ed.drag_over_position(id(4), DropPosition::Before),
            DragEffect::Noop {
                reason: DragNoopReason::IndicatorUnchanged
            }
        );
        assert_eq!(ed.drag.indicator(), None);

        let row = Rect::new(0.0, 60.0, 100.0, 20.0);
        assert!(matches!(
            ed.drop_at(id(4), row, 61.0),
            DragEffect::Rejected(nestlist_tree::MoveRejection::TargetInsideSource { .. })
        ));
        assert_eq!(ed.drag_state(), &DragState::Idle);
        assert_eq!(ed.items(), sample().as_slice());
    }

    #[test]
    fn cancel_clears_drag_without_edit() {
        let mut ed = editor();
        ed.drag_start(id(1));
        ed.drag_over_position(id(2), DropPosition::After);
        assert_eq!(ed.drag_cancel(), DragEffect::Canceled);
        assert!(ed.rows().iter().all(|r| !r.dragging && r.drop_indicator.is_none()));
        assert!(ed.host().changes.is_empty());
    }
}
