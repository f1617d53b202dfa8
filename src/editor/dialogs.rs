//! Dialog flow. At most one dialog is open at a time.

use super::{Dialog, Editor};
use crate::commit::Effect;
use crate::message::{DialogResponse, LabelInput};
use crate::model::BoxPatch;

impl Editor {
    pub(super) fn open_dialog(&mut self, dialog: Dialog) {
        if let Some(open) = &self.state.dialog {
            log::debug!("Dialog {:?} already open, ignoring {:?}", open, dialog);
            return;
        }
        log::debug!("Opening dialog {:?}", dialog);
        self.state.dialog = Some(dialog);
    }

    pub(super) fn label_input(&mut self, input: &LabelInput) {
        if self.state.dialog != Some(Dialog::LabelEditor) {
            log::debug!("Ignoring label input without the label editor open");
            return;
        }
        match input {
            LabelInput::SetLabel(label) if self.labels.contains(label) => {
                self.state.active_label = label.clone();
            }
            LabelInput::SetLabel(label) => log::debug!("Ignoring unknown label {:?}", label),
            LabelInput::SetDifficult(difficult) => self.state.active_difficult = *difficult,
        }
    }

    pub(super) fn dialog_response(&mut self, response: DialogResponse) -> Vec<Effect> {
        let Some(dialog) = self.state.dialog.take() else {
            log::debug!("Ignoring {:?} with no dialog open", response);
            return Vec::new();
        };
        log::info!("Dialog {:?}: {:?}", dialog, response);

        match (dialog, response) {
            (Dialog::LabelEditor, DialogResponse::Confirm) => {
                if let Some(id) = self.state.selected.clone() {
                    let patch = BoxPatch::new()
                        .with_label(self.active_label_for_box())
                        .with_difficult(self.state.active_difficult);
                    self.store.upsert(&id, &patch);
                }
                Vec::new()
            }
            (Dialog::LabelEditor, DialogResponse::Cancel) => {
                let removed = self.store.remove_unlabeled();
                if removed > 0 {
                    log::info!("🗑️  Removed {} unlabeled boxes", removed);
                }
                self.prune_selection();
                Vec::new()
            }
            (Dialog::Verify, DialogResponse::Confirm) => vec![self.save(true)],
            (Dialog::DeleteImage, DialogResponse::Confirm) => {
                log::info!("🗑️  Deleting image");
                vec![Effect::DeleteImage]
            }
            (Dialog::DeleteFalsePositive(id), DialogResponse::Confirm) => {
                self.clear_selection();
                if self.store.remove(&id).is_some() {
                    log::info!("🗑️  Deleted false positive {}", id);
                    vec![Effect::FalsePositiveDeleted { id }]
                } else {
                    Vec::new()
                }
            }
            (Dialog::Help, _) | (_, DialogResponse::Cancel) => Vec::new(),
        }
    }
}
