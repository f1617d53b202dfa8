//! Customizable keybindings for the editor.
//!
//! Each binding resolves a key chord to exactly one [`Command`]; the editor then
//! applies that command's guarded transition. Arrow keys are fixed: plain
//! arrows move the selected box and Shift+arrow resizes it.

use serde::{Deserialize, Serialize};

use crate::input::{Direction, Key, Modifiers};
use crate::message::Command;

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Arm or cancel box creation
    pub add_box: Key,
    /// Flip the difficult flag
    pub toggle_difficult: Key,
    /// Cycle the label (Shift cycles backwards)
    pub cycle_label: Key,
    /// Select the next box
    pub next_box: Key,
    /// Delete the selected box
    pub delete_box: Key,
    /// Cancel creation or clear the selection
    pub cancel: Key,
    /// Show or hide unselected boxes
    pub toggle_unselected: Key,
    /// Verify all labels and save
    pub verify_and_save: Key,
    /// Show shortcut help
    pub help: Key,
    /// Open the label editor. `None` leaves it unbound.
    pub edit_label: Option<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            add_box: Key::Char('w'),
            toggle_difficult: Key::Char('d'),
            cycle_label: Key::Char('s'),
            next_box: Key::Tab,
            delete_box: Key::Delete,
            cancel: Key::Escape,
            toggle_unselected: Key::Char('f'),
            verify_and_save: Key::Space,
            help: Key::Char('?'),
            edit_label: Some(Key::Char('e')),
        }
    }
}

/// One row of the shortcut help table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutHelp {
    pub action: &'static str,
    pub keys: Vec<String>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the command for a key press, if any.
    pub fn command_for(&self, key: Key, modifiers: Modifiers) -> Option<Command> {
        if let Some(direction) = Direction::from_key(key) {
            return Some(if modifiers.shift {
                Command::ResizeSelected { direction }
            } else {
                Command::MoveSelected { direction }
            });
        }

        let key = chord_key(key, modifiers);
        let matches = |bound: Key| bound.normalized() == key;

        if matches(self.cancel) {
            Some(Command::Escape)
        } else if matches(self.add_box) {
            Some(Command::ToggleCreate)
        } else if matches(self.toggle_unselected) {
            Some(Command::ToggleUnselected)
        } else if matches(self.toggle_difficult) {
            Some(Command::ToggleDifficult)
        } else if matches(self.cycle_label) {
            Some(Command::CycleLabel {
                reverse: modifiers.shift,
            })
        } else if matches(self.delete_box) {
            Some(Command::DeleteSelected)
        } else if matches(self.next_box) {
            Some(Command::SelectNext)
        } else if matches(self.verify_and_save) {
            Some(Command::VerifyAndSave)
        } else if matches(self.help) {
            Some(Command::ShowHelp)
        } else if self.edit_label.is_some_and(matches) {
            Some(Command::EditLabel)
        } else {
            None
        }
    }

    /// Check if a key is already used by any binding.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key) -> Option<&'static str> {
        let key = key.normalized();
        if Direction::from_key(key).is_some() {
            return Some("Move/Resize Box");
        }
        self.bound_actions()
            .into_iter()
            .find(|(bound, _)| bound.normalized() == key)
            .map(|(_, action)| action)
    }

    fn bound_actions(&self) -> Vec<(Key, &'static str)> {
        let mut actions = vec![
            (self.help, "Shortcut help"),
            (self.add_box, "Add Box"),
            (self.toggle_difficult, "Mark Difficult"),
            (self.cycle_label, "Cycle Label"),
            (self.next_box, "Select Next Box"),
            (self.delete_box, "Delete Box"),
            (self.cancel, "Deselect/Cancel"),
            (self.toggle_unselected, "Toggle Unselected Boxes"),
            (self.verify_and_save, "Verify and Save"),
        ];
        if let Some(key) = self.edit_label {
            actions.push((key, "Edit Label"));
        }
        actions
    }

    /// Rows for the keyboard shortcut help dialog.
    pub fn help_entries(&self) -> Vec<ShortcutHelp> {
        let arrows = "← ↑ → ↓".to_string();
        let mut entries: Vec<ShortcutHelp> = self
            .bound_actions()
            .into_iter()
            .map(|(key, action)| ShortcutHelp {
                action,
                keys: vec![key.label()],
            })
            .collect();
        entries.push(ShortcutHelp {
            action: "Move Box",
            keys: vec![arrows.clone()],
        });
        entries.push(ShortcutHelp {
            action: "Resize Box",
            keys: vec!["Shift".to_string(), arrows],
        });
        entries
    }
}

/// Fold a key press into the character it produces for matching.
fn chord_key(key: Key, modifiers: Modifiers) -> Key {
    match key {
        // US layouts report Shift+/ as '/'
        Key::Char('/') if modifiers.shift => Key::Char('?'),
        other => other.normalized(),
    }
}
