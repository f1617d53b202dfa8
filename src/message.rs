//! Editor message types.
//!
//! Every pointer, keyboard and dialog interaction reaches the editor as an
//! [`Event`] in the Elm architecture style. Keyboard shortcuts and toolbar
//! buttons resolve to a [`Command`].

use serde::{Deserialize, Serialize};

use crate::geometry::{ScreenPoint, ScreenRect, Size};
use crate::input::{Direction, Key, Modifiers};
use crate::model::BoxId;

/// Events that update the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Pointer pressed. `target` is the box under the pointer, if any.
    PointerDown {
        position: ScreenPoint,
        #[serde(default)]
        target: Option<BoxId>,
    },
    /// Pointer moved.
    PointerMove { position: ScreenPoint },
    /// Pointer released.
    PointerUp { position: ScreenPoint },
    /// A box drag finished at a new top-left position (render-local pixels).
    DragStop { id: BoxId, position: ScreenPoint },
    /// A box resize finished with a new rectangle (render-local pixels).
    ResizeStop { id: BoxId, rect: ScreenRect },
    /// A key was pressed with the editor focused.
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// A toolbar button or resolved shortcut.
    Command { command: Command },
    /// The image finished loading and its natural size is known.
    ImageLoaded { natural: Size, container: Size },
    /// The editor container changed size.
    ContainerResized { container: Size },
    /// Input from the label editor dialog.
    LabelInput { input: LabelInput },
    /// The open dialog was confirmed or cancelled.
    Dialog { response: DialogResponse },
}

impl Event {
    pub fn command(command: Command) -> Self {
        Event::Command { command }
    }

    pub fn key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::none(),
        }
    }

    pub fn shift_key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::shift(),
        }
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Event::PointerDown {
            position: ScreenPoint::new(x, y),
            target: None,
        }
    }

    pub fn pointer_down_on(id: impl Into<BoxId>, x: f32, y: f32) -> Self {
        Event::PointerDown {
            position: ScreenPoint::new(x, y),
            target: Some(id.into()),
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Event::PointerMove {
            position: ScreenPoint::new(x, y),
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Event::PointerUp {
            position: ScreenPoint::new(x, y),
        }
    }

    pub fn confirm() -> Self {
        Event::Dialog {
            response: DialogResponse::Confirm,
        }
    }

    pub fn cancel() -> Self {
        Event::Dialog {
            response: DialogResponse::Cancel,
        }
    }
}

/// Editor commands. Each maps to one guarded transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Command {
    /// Arm box creation.
    StartCreate,
    /// Arm box creation, or cancel it when already armed.
    ToggleCreate,
    /// Cancel creation or drawing, or clear the selection.
    Escape,
    /// Select the next box in insertion order.
    SelectNext,
    /// Delete the selected box.
    DeleteSelected,
    /// Delete a specific box from its on-box delete button.
    RequestDelete { id: BoxId },
    /// Nudge the selected box.
    MoveSelected { direction: Direction },
    /// Grow or shrink the selected box from its top-left corner.
    ResizeSelected { direction: Direction },
    /// Flip the difficult flag of the selected box.
    ToggleDifficult,
    /// Step the active label and apply it to the selected box.
    CycleLabel {
        #[serde(default)]
        reverse: bool,
    },
    /// Show or hide the unselected boxes.
    ToggleUnselected,
    /// Open the label editor for the selected box.
    EditLabel,
    /// Save without verification.
    Save,
    /// Ask the operator to verify before saving.
    RequestVerify,
    /// Save and mark every label as verified.
    VerifyAndSave,
    /// Ask for confirmation before deleting the whole image.
    RequestDeleteImage,
    /// Show the keyboard shortcut help.
    ShowHelp,
    /// Leave the editor.
    Back,
}

/// Input from the label editor dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LabelInput {
    SetLabel(String),
    SetDifficult(bool),
}

/// Outcome of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogResponse {
    Confirm,
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"type":"pointer_down","position":{"x":10.0,"y":20.0}}"#;
        let event: Event = serde_json::from_str(json).expect("parse event");
        assert_eq!(event, Event::pointer_down(10.0, 20.0));

        let json = r#"{"type":"command","command":{"name":"cycle_label","reverse":true}}"#;
        let event: Event = serde_json::from_str(json).expect("parse command");
        assert_eq!(event, Event::command(Command::CycleLabel { reverse: true }));
    }

    #[test]
    fn test_key_event_default_modifiers() {
        let json = r#"{"type":"key","key":"tab"}"#;
        let event: Event = serde_json::from_str(json).expect("parse key");
        assert_eq!(event, Event::key(Key::Tab));

        let json = r#"{"type":"key","key":{"char":"w"}}"#;
        let event: Event = serde_json::from_str(json).expect("parse char key");
        assert_eq!(event, Event::key(Key::Char('w')));
    }
}
