//! Command handling for keyboard shortcuts and toolbar buttons.

use super::{Dialog, Editor, Mode};
use crate::commit::Effect;
use crate::geometry::step_size;
use crate::input::Direction;
use crate::message::{Command, DialogResponse};
use crate::model::{BoxId, BoxPatch};

impl Editor {
    pub(super) fn run_command(&mut self, command: &Command, scale: f32) -> Vec<Effect> {
        if self.state.dialog.is_some() {
            if matches!(command, Command::Escape) {
                return self.dialog_response(DialogResponse::Cancel);
            }
            log::debug!("Ignoring {:?} while a dialog is open", command);
            return Vec::new();
        }

        if self.state.mode.is_drawing() && !allowed_while_drawing(command) {
            log::debug!("Ignoring {:?} while drawing", command);
            return Vec::new();
        }

        match command {
            Command::StartCreate => self.arm_create(),
            Command::ToggleCreate => match self.state.mode {
                Mode::CreateArmed => self.set_mode(Mode::Idle),
                _ => self.arm_create(),
            },
            Command::Escape => self.escape(),
            Command::SelectNext => self.select_next(),
            Command::DeleteSelected => {
                if let Some(id) = self.state.selected.clone() {
                    self.delete_box(&id);
                }
            }
            Command::RequestDelete { id } => self.delete_box(id),
            Command::MoveSelected { direction } => self.move_selected(*direction, scale),
            Command::ResizeSelected { direction } => self.resize_selected(*direction, scale),
            Command::ToggleDifficult => self.toggle_difficult(),
            Command::CycleLabel { reverse } => self.cycle_label(*reverse),
            Command::ToggleUnselected => {
                self.state.show_unselected = !self.state.show_unselected;
                log::debug!("Show unselected boxes: {}", self.state.show_unselected);
            }
            Command::EditLabel => {
                if self.selected_box().is_some_and(|b| b.kind.is_editable()) {
                    self.open_dialog(Dialog::LabelEditor);
                } else {
                    log::debug!("No editable box selected for the label editor");
                }
            }
            Command::Save => return vec![self.save(false)],
            Command::RequestVerify => self.open_dialog(Dialog::Verify),
            Command::VerifyAndSave => return vec![self.save(true)],
            Command::RequestDeleteImage => self.open_dialog(Dialog::DeleteImage),
            Command::ShowHelp => self.open_dialog(Dialog::Help),
            Command::Back => {
                log::info!("⬅️  Leaving editor");
                return vec![Effect::Back];
            }
        }
        Vec::new()
    }

    fn arm_create(&mut self) {
        self.clear_selection();
        self.set_mode(Mode::CreateArmed);
    }

    fn escape(&mut self) {
        match self.state.mode {
            Mode::CreateArmed => self.set_mode(Mode::Idle),
            Mode::Drawing { .. } => {
                self.store.discard_draft();
                self.clear_selection();
                self.set_mode(Mode::Idle);
                log::debug!("Draw cancelled");
            }
            Mode::Idle => self.clear_selection(),
        }
    }

    fn select_next(&mut self) {
        let Some(next) = self.store.next_after(self.state.selected.as_ref()) else {
            log::debug!("No boxes to cycle through");
            return;
        };
        if let Some(label) = &next.label {
            self.state.active_label = label.clone();
        }
        log::debug!("Tab to box {}", next.id);
        self.state.selected = Some(next.id.clone());
    }

    /// Remove a box directly, or ask for confirmation if it is a false positive.
    fn delete_box(&mut self, id: &BoxId) {
        let Some(kind) = self.store.get(id).map(|b| b.kind) else {
            log::debug!("Ignoring delete of unknown box {}", id);
            return;
        };
        if !kind.is_deletable_directly() {
            self.open_dialog(Dialog::DeleteFalsePositive(id.clone()));
            return;
        }
        self.store.remove(id);
        if self.state.is_selected(id) {
            self.clear_selection();
        }
        log::info!("🗑️  Deleted {} box {}", kind.name(), id);
    }

    fn move_selected(&mut self, direction: Direction, scale: f32) {
        let Some((id, rect)) = self
            .selected_box()
            .filter(|b| b.kind.is_draggable())
            .map(|b| (b.id.clone(), b.rect))
        else {
            return;
        };
        let (dx, dy) = step_size(self.preferences.keyboard_step_px, scale, self.render_size);
        let (ux, uy) = direction.unit();
        let moved = rect.clamped_move(ux * dx, uy * dy);
        self.store.upsert(&id, &BoxPatch::rect(moved));
    }

    fn resize_selected(&mut self, direction: Direction, scale: f32) {
        let Some((id, rect)) = self
            .selected_box()
            .filter(|b| b.kind.is_resizable())
            .map(|b| (b.id.clone(), b.rect))
        else {
            return;
        };
        let (dx, dy) = step_size(self.preferences.keyboard_step_px, scale, self.render_size);
        let (ux, uy) = direction.unit();
        let resized = rect.clamped_grow(ux * dx, uy * dy);
        self.store.upsert(&id, &BoxPatch::rect(resized));
    }

    fn toggle_difficult(&mut self) {
        let Some((id, difficult)) = self
            .selected_box()
            .filter(|b| b.kind.is_editable())
            .map(|b| (b.id.clone(), b.difficult))
        else {
            return;
        };
        self.store.upsert(&id, &BoxPatch::new().with_difficult(!difficult));
        log::debug!("Box {} difficult: {}", id, !difficult);
    }

    fn cycle_label(&mut self, reverse: bool) {
        let Some(id) = self
            .selected_box()
            .filter(|b| b.kind.is_editable())
            .map(|b| b.id.clone())
        else {
            return;
        };
        if self.labels.is_empty() {
            log::warn!("No labels configured, cannot cycle label");
            return;
        }
        if let Some(label) =
            self.store
                .cycle_label(&id, &self.labels, &self.state.active_label, reverse)
        {
            log::debug!("Box {} label -> {}", id, label);
            self.state.active_label = label;
        }
    }

    pub(super) fn save(&self, verified: bool) -> Effect {
        let payload = self.save_payload(verified);
        log::info!(
            "💾 Saving {} boxes (verified: {})",
            payload.annotations.len(),
            verified
        );
        Effect::Save(payload)
    }
}

/// Commands that neither change the selection nor touch a committed box.
fn allowed_while_drawing(command: &Command) -> bool {
    matches!(
        command,
        Command::Escape
            | Command::ToggleUnselected
            | Command::Save
            | Command::VerifyAndSave
            | Command::Back
    )
}
