//! Pointer handling: drawing, selection, drag and resize.

use super::{Editor, Mode};
use crate::geometry::{Rect, ScreenPoint, ScreenRect, from_screen, to_normalized};
use crate::model::{BoxId, BoxPatch};

impl Editor {
    pub(super) fn pointer_down(&mut self, position: ScreenPoint, target: Option<&BoxId>, scale: f32) {
        match self.state.mode {
            // Boxes under the pointer do not intercept a press while armed
            Mode::CreateArmed => self.begin_draw(position, scale),
            Mode::Drawing { .. } => log::debug!("Ignoring pointer down while drawing"),
            Mode::Idle => match target {
                Some(id) => self.select_box(id),
                None => self.clear_selection(),
            },
        }
    }

    pub(super) fn pointer_move(&mut self, position: ScreenPoint, scale: f32) {
        if let Mode::Drawing { origin } = self.state.mode {
            let current = to_normalized(position, self.render_size, scale);
            self.store
                .update_draft(Rect::from_corners(origin, current).intersect_unit());
        }
    }

    pub(super) fn pointer_up(&mut self, position: ScreenPoint, scale: f32) {
        let Mode::Drawing { origin } = self.state.mode else {
            return;
        };

        let end = to_normalized(position, self.render_size, scale);
        let rect = Rect::from_corners(origin, end);
        let label = self.active_label_for_box();
        let promoted = self.store.promote_draft(
            BoxId::generate(),
            label,
            rect,
            self.preferences.min_box_size,
        );

        match promoted {
            Some(id) => {
                log::info!(
                    "✏️  Created box {} at ({:.3}, {:.3}) label {:?}",
                    id,
                    rect.x,
                    rect.y,
                    self.state.active_label
                );
                self.state.selected = Some(id);
            }
            None => {
                log::debug!("Discarded degenerate draw {:.4}x{:.4}", rect.w, rect.h);
                self.clear_selection();
            }
        }
        self.set_mode(Mode::Idle);
    }

    fn begin_draw(&mut self, position: ScreenPoint, scale: f32) {
        let origin = to_normalized(position, self.render_size, scale);
        if !self.store.add_draft(origin) {
            log::warn!("Draft already exists, not starting a new one");
            return;
        }
        self.state.selected = Some(BoxId::draft());
        self.set_mode(Mode::Drawing { origin });
        log::debug!("Drawing from ({:.3}, {:.3})", origin.x, origin.y);
    }

    /// Select a box and load its label and difficulty into the active state.
    pub(super) fn select_box(&mut self, id: &BoxId) {
        let Some(selected) = self.store.get(id) else {
            log::debug!("Ignoring selection of unknown box {}", id);
            return;
        };
        if selected.kind.is_editable() {
            if let Some(label) = &selected.label {
                self.state.active_label = label.clone();
            }
            self.state.active_difficult = selected.difficult;
        }
        log::debug!("Selected {} box {}", selected.kind.name(), id);
        self.state.selected = Some(id.clone());
    }

    pub(super) fn drag_stop(&mut self, id: &BoxId, position: ScreenPoint) {
        if self.state.mode.is_drawing() {
            log::debug!("Ignoring drag of {} while drawing", id);
            return;
        }
        let Some(target) = self.store.get(id) else {
            return;
        };
        if !target.kind.is_draggable() {
            log::debug!("Box {} is not draggable", id);
            return;
        }

        let origin = from_screen(ScreenRect::new(position.x, position.y, 0.0, 0.0), self.render_size);
        let moved = Rect {
            x: origin.x,
            y: origin.y,
            ..target.rect
        }
        .translate_into_unit();
        self.store.upsert(id, &BoxPatch::rect(moved));
        log::debug!("Dragged {} to ({:.3}, {:.3})", id, moved.x, moved.y);
    }

    pub(super) fn resize_stop(&mut self, id: &BoxId, rect: ScreenRect) {
        if self.state.mode.is_drawing() {
            log::debug!("Ignoring resize of {} while drawing", id);
            return;
        }
        let resizable = self.store.get(id).is_some_and(|b| b.kind.is_resizable());
        if !resizable {
            log::debug!("Box {} is missing or not resizable", id);
            return;
        }

        let resized = from_screen(rect, self.render_size).intersect_unit();
        self.store.upsert(id, &BoxPatch::rect(resized));
        log::debug!("Resized {} to {:.3}x{:.3}", id, resized.w, resized.h);
    }
}
