#![forbid(unsafe_code)]

//! Interactive editing for ordered lists of items and groups.
//!
//! - [`ListEditor`] - per-list state and command handling
//! - [`Selection`] - multi-select with a Shift+click anchor
//! - [`DragMachine`] - drag lifecycle and drop indicator
//! - [`Keymap`] - key chords to [`EditorCommand`]s
//! - [`EditorHost`] - callbacks the owning application implements
//! - [`Row`] - flat view model for renderers
//!
//! # Example
//!
//! ```ignore
//! use nestlist_editor::{EditorConfig, ListEditor};
//!
//! let mut editor = ListEditor::new(host).with_config(EditorConfig::default());
//! editor.sync(items);
//! editor.click(id, Modifiers::NONE);
//! editor.handle_key(&key);
//! for row in editor.rows() {
//!     // paint row
//! }
//! ```

pub mod command;
pub mod config;
pub mod drag;
pub mod editor;
pub mod host;
pub mod keymap;
pub mod rows;
pub mod selection;

pub use command::{CommandOutcome, EditorCommand, NoopReason};
pub use config::EditorConfig;
pub use drag::{DragEffect, DragMachine, DragNoopReason, DragState, DropIndicator};
pub use editor::ListEditor;
pub use host::EditorHost;
pub use keymap::{KeyChord, Keymap};
pub use rows::Row;
pub use selection::Selection;
