#![forbid(unsafe_code)]

//! Item/group node model.
//!
//! A tree is a plain `Vec<Node<P>>` of root nodes. Groups own their children
//! directly, so no node can have two parents and no cycle is representable.
//! The payload `P` is opaque to this crate; hosts interpret it.

use std::fmt;

use uuid::Uuid;

/// Globally unique node identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a fresh random (v4) id.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an id from a raw 128-bit value. Useful for deterministic tests.
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0.simple())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Discriminator for the two node shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    Item,
    Group,
}

/// A leaf carrying host payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<P> {
    pub id: NodeId,
    pub enabled: bool,
    pub payload: P,
}

impl<P> Item<P> {
    /// Create an enabled item with a fresh id.
    #[must_use]
    pub fn new(payload: P) -> Self {
        Self {
            id: NodeId::new(),
            enabled: true,
            payload,
        }
    }

    /// Replace the id.
    #[must_use]
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A named container of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group<P> {
    pub id: NodeId,
    pub name: String,
    pub collapsed: bool,
    pub enabled: bool,
    pub children: Vec<Node<P>>,
}

impl<P> Group<P> {
    /// Create an empty, expanded, enabled group with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            collapsed: false,
            enabled: true,
            children: Vec::new(),
        }
    }

    /// Replace the id.
    #[must_use]
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node<P>>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node<P>>) -> Self {
        self.children = children;
        self
    }

    /// Set the collapsed flag.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Either a leaf item or a group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Node<P> {
    Item(Item<P>),
    Group(Group<P>),
}

impl<P> Node<P> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Item(item) => item.id,
            Self::Group(group) => group.id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Item(_) => NodeKind::Item,
            Self::Group(_) => NodeKind::Group,
        }
    }

    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// The node's own enabled flag (ignores ancestors).
    #[must_use]
    pub fn enabled(&self) -> bool {
        match self {
            Self::Item(item) => item.enabled,
            Self::Group(group) => group.enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::Item(item) => item.enabled = enabled,
            Self::Group(group) => group.enabled = enabled,
        }
    }

    /// Children of a group; empty for items.
    #[must_use]
    pub fn children(&self) -> &[Node<P>] {
        match self {
            Self::Item(_) => &[],
            Self::Group(group) => &group.children,
        }
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&Item<P>> {
        match self {
            Self::Item(item) => Some(item),
            Self::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&Group<P>> {
        match self {
            Self::Item(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    #[must_use]
    pub fn as_group_mut(&mut self) -> Option<&mut Group<P>> {
        match self {
            Self::Item(_) => None,
            Self::Group(group) => Some(group),
        }
    }
}

impl<P> From<Item<P>> for Node<P> {
    fn from(item: Item<P>) -> Self {
        Self::Item(item)
    }
}

impl<P> From<Group<P>> for Node<P> {
    fn from(group: Group<P>) -> Self {
        Self::Group(group)
    }
}
