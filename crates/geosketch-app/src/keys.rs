//! Keyboard shortcuts.

use crate::commands::Command;

/// A key event as reported by the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name, e.g. `"s"`, `"z"`, `"Escape"`
    pub key: String,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: false }
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self { key: key.into(), ctrl: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Save the draft polygon (either case)
    pub save: char,
    /// Undo the last draft point, together with Ctrl
    pub undo: char,
    /// Leave the edit session
    pub cancel: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            save: 's',
            undo: 'z',
            cancel: "Escape".to_string(),
        }
    }
}

impl KeyBindings {
    /// Map a key press to a command. `editing` gates the cancel binding.
    pub fn resolve(&self, press: &KeyPress, editing: bool) -> Option<Command> {
        if press.key == self.cancel {
            return editing.then_some(Command::CancelEdits);
        }

        let mut chars = press.key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };

        if press.ctrl && ch == self.undo {
            Some(Command::Undo)
        } else if ch.eq_ignore_ascii_case(&self.save) {
            Some(Command::Save)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.resolve(&KeyPress::new("s"), false), Some(Command::Save));
        assert_eq!(keys.resolve(&KeyPress::new("S"), false), Some(Command::Save));
        assert_eq!(keys.resolve(&KeyPress::with_ctrl("z"), false), Some(Command::Undo));
        assert_eq!(keys.resolve(&KeyPress::new("z"), false), None);
        assert_eq!(keys.resolve(&KeyPress::new("q"), false), None);
    }

    #[test]
    fn test_escape_only_while_editing() {
        let keys = KeyBindings::default();
        assert_eq!(keys.resolve(&KeyPress::new("Escape"), false), None);
        assert_eq!(keys.resolve(&KeyPress::new("Escape"), true), Some(Command::CancelEdits));
    }

    #[test]
    fn test_named_keys_ignored() {
        let keys = KeyBindings::default();
        assert_eq!(keys.resolve(&KeyPress::new("Shift"), false), None);
        assert_eq!(keys.resolve(&KeyPress::new(""), false), None);
    }
}
