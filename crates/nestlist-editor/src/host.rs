#![forbid(unsafe_code)]

//! Host collaborator contract.

use nestlist_tree::{Item, Node};

use crate::selection::Selection;

/// Callbacks and inputs supplied by whatever owns the list.
///
/// The editor never persists anything. After `on_items_changed` the host is
/// expected to store the tree and hand it back through
/// [`ListEditor::sync`](crate::ListEditor::sync) on its next render.
pub trait EditorHost<P> {
    /// A command produced a new tree.
    fn on_items_changed(&mut self, items: &[Node<P>]);

    /// The selection or its anchor changed.
    fn on_selection_changed(&mut self, selection: &Selection);

    /// Copy or cut produced clipboard content. Ids are the originals.
    fn on_copy(&mut self, nodes: Vec<Node<P>>);

    /// Display text for a leaf.
    fn item_label(&self, item: &Item<P>) -> String;

    /// Current clipboard content, read on paste.
    fn clipboard_items(&self) -> Vec<Node<P>> {
        Vec::new()
    }
}
