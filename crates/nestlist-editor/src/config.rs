#![forbid(unsafe_code)]

//! Editor configuration.

use nestlist_tree::{DEFAULT_MAX_NESTING_DEPTH, DropPosition};

/// Behavior and display options for one [`ListEditor`](crate::ListEditor).
///
/// `header_label` and `empty_text` are passed through to renderers and have
/// no effect on editing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Whether group commands (create, group-selected) are available (default: true).
    pub allow_groups: bool,
    /// Deepest allowed nesting, root level being 0 (default: 3).
    pub max_nesting_depth: usize,
    /// Title shown above the list.
    pub header_label: String,
    /// Text shown when the list has no rows.
    pub empty_text: String,
    /// Share of a group row, from the top, that maps to a `Before` drop
    /// (default: 0.25). The rest of the row drops into the group.
    pub group_before_band: f32,
    /// Name for groups made by the create-group command.
    pub new_group_name: String,
    /// Name for groups made by the group-selected command.
    pub grouped_name: String,
    /// Whether Escape also cancels an active drag (default: true).
    pub cancel_drag_on_escape: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            allow_groups: true,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            header_label: "Items".to_string(),
            empty_text: "No items".to_string(),
            group_before_band: DropPosition::GROUP_BEFORE_BAND,
            new_group_name: "New Group".to_string(),
            grouped_name: "Group".to_string(),
            cancel_drag_on_escape: true,
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_allow_groups(mut self, allow: bool) -> Self {
        self.allow_groups = allow;
        self
    }

    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    #[must_use]
    pub fn with_header_label(mut self, label: impl Into<String>) -> Self {
        self.header_label = label.into();
        self
    }

    #[must_use]
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Set the `Before` band of group rows, clamped to `0.0..=1.0`.
    ///
    /// Non-finite values fall back to the default.
    #[must_use]
    pub fn with_group_before_band(mut self, band: f32) -> Self {
        self.group_before_band = if band.is_finite() {
            band.clamp(0.0, 1.0)
        } else {
            DropPosition::GROUP_BEFORE_BAND
        };
        self
    }

    #[must_use]
    pub fn with_new_group_name(mut self, name: impl Into<String>) -> Self {
        self.new_group_name = name.into();
        self
    }

    #[must_use]
    pub fn with_grouped_name(mut self, name: impl Into<String>) -> Self {
        self.grouped_name = name.into();
        self
    }

    /// Create a config where Escape does not cancel drags.
    #[must_use]
    pub fn no_escape_cancel(mut self) -> Self {
        self.cancel_drag_on_escape = false;
        self
    }
}
