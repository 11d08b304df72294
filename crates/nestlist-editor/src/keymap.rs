#![forbid(unsafe_code)]

//! Keyboard bindings for editor commands.
//!
//! A [`KeyChord`] with `command: true` matches when Ctrl or Super is held,
//! so the same map serves Linux/Windows and macOS. Shift and Alt are
//! ignored. Character keys match regardless of ASCII case.

use nestlist_core::event::{KeyCode, KeyEvent};

use crate::command::EditorCommand;

/// A key plus whether the platform command modifier must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub command: bool,
}

impl KeyChord {
    /// A key pressed without Ctrl/Super.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            command: false,
        }
    }

    /// A key pressed with Ctrl or Super.
    #[must_use]
    pub const fn command(code: KeyCode) -> Self {
        Self {
            code,
            command: true,
        }
    }

    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.command != event.command() {
            return false;
        }
        match self.code {
            KeyCode::Char(c) => event.is_char(c),
            code => event.code == code,
        }
    }
}

/// Ordered chord-to-command table. The first matching chord wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(KeyChord, EditorCommand)>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::empty()
            .bind(KeyChord::command(KeyCode::Char('c')), EditorCommand::Copy)
            .bind(KeyChord::command(KeyCode::Char('x')), EditorCommand::Cut)
            .bind(KeyChord::command(KeyCode::Char('v')), EditorCommand::Paste)
            .bind(KeyChord::command(KeyCode::Char('a')), EditorCommand::SelectAll)
            .bind(KeyChord::command(KeyCode::Char('g')), EditorCommand::GroupSelected)
            .bind(KeyChord::plain(KeyCode::Delete), EditorCommand::DeleteSelected)
            .bind(KeyChord::plain(KeyCode::Escape), EditorCommand::ClearSelection)
            .bind(KeyChord::plain(KeyCode::F(2)), EditorCommand::BeginRename)
    }
}

impl Keymap {
    /// A keymap with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `chord` to `command`, replacing any earlier binding of the chord.
    #[must_use]
    pub fn bind(mut self, chord: KeyChord, command: EditorCommand) -> Self {
        self.bindings.retain(|(existing, _)| *existing != chord);
        self.bindings.push((chord, command));
        self
    }

    /// Remove every binding of `chord`.
    #[must_use]
    pub fn unbind(mut self, chord: KeyChord) -> Self {
        self.bindings.retain(|(existing, _)| *existing != chord);
        self
    }

    /// Command for a key event. Releases never resolve.
    #[must_use]
    pub fn resolve(&self, event: &KeyEvent) -> Option<&EditorCommand> {
        if !event.is_down() {
            return None;
        }
        self.bindings
            .iter()
            .find(|(chord, _)| chord.matches(event))
            .map(|(_, command)| command)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&KeyChord, &EditorCommand)> {
        self.bindings.iter().map(|(chord, command)| (chord, command))
    }
}
