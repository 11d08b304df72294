#![forbid(unsafe_code)]

//! Flat row view model for renderers.

use nestlist_tree::{DropPosition, Node, NodeId, NodeKind, flatten, get_at_path};

use crate::drag::DragMachine;
use crate::host::EditorHost;
use crate::selection::Selection;

/// One visible row, with everything a renderer needs to paint it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    /// Nesting level, root level being 0.
    pub depth: usize,
    pub kind: NodeKind,
    pub label: String,
    /// The node's own flag.
    pub enabled: bool,
    /// Disabled here or through an ancestor.
    pub effective_disabled: bool,
    pub collapsed: bool,
    pub child_count: usize,
    pub selected: bool,
    pub dragging: bool,
    /// Set on the row currently under a valid drop.
    pub drop_indicator: Option<DropPosition>,
    pub renaming: bool,
}

pub(crate) fn build_rows<P, H: EditorHost<P>>(
    items: &[Node<P>],
    host: &H,
    selection: &Selection,
    drag: &DragMachine,
    renaming: Option<NodeId>,
) -> Vec<Row> {
    let indicator = drag.indicator();
    flatten(items, false)
        .into_iter()
        .filter_map(|flat| {
            let node = get_at_path(items, &flat.path)?;
            let (label, collapsed) = match node {
                Node::Item(item) => (host.item_label(item), false),
                Node::Group(group) => (group.name.clone(), group.collapsed),
            };
            Some(Row {
                id: flat.id,
                depth: flat.depth,
                kind: flat.kind,
                label,
                enabled: node.enabled(),
                effective_disabled: flat.effective_disabled,
                collapsed,
                child_count: node.children().len(),
                selected: selection.contains(flat.id),
                dragging: drag.dragging_ids().contains(&flat.id),
                drop_indicator: indicator
                    .filter(|ind| ind.target == flat.id)
                    .map(|ind| ind.position),
                renaming: renaming == Some(flat.id),
            })
        })
        .collect()
}
