//! Render model for the hosting UI.
//!
//! The editor does not draw anything itself. [`Editor::render`] describes every
//! box in render-local pixels together with its styling and capabilities; the
//! host applies the zoom transform on top.

use serde::Serialize;

use crate::constants::render::{BORDER_WIDTH_PX, EDGE_HANDLE_PX, Z_HIDDEN, Z_SELECTED, Z_VISIBLE};
use crate::editor::{Editor, Mode};
use crate::geometry::{ScreenRect, Size, sanitize_scale, to_screen};
use crate::model::{Annotation, BoxId, BoxKind};

/// An RGB color.
pub type Rgb = [u8; 3];

/// Border palette per box kind.
pub mod palette {
    use super::Rgb;

    pub const CONFIRMED_SELECTED: Rgb = [0x84, 0xcc, 0x16];
    pub const CONFIRMED: Rgb = [0xff, 0xff, 0xff];
    pub const FALSE_POSITIVE_SELECTED: Rgb = [0xcc, 0x22, 0x16];
    pub const FALSE_POSITIVE: Rgb = [0xc9, 0x5d, 0x55];
    pub const SUGGESTION_SELECTED: Rgb = [0x84, 0xcc, 0x16];
    pub const SUGGESTION: Rgb = [0x3d, 0xd8, 0xff];
    pub const DIFFICULT_SELECTED: Rgb = [0xfa, 0xe3, 0x52];
    pub const DIFFICULT: Rgb = [0xad, 0x9e, 0x3d];
}

/// Format a color as `#rrggbb`.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Border color for a box.
pub fn border_color(kind: BoxKind, selected: bool, difficult: bool) -> Rgb {
    if difficult {
        return if selected {
            palette::DIFFICULT_SELECTED
        } else {
            palette::DIFFICULT
        };
    }
    match (kind, selected) {
        (BoxKind::Confirmed, true) => palette::CONFIRMED_SELECTED,
        (BoxKind::Confirmed, false) => palette::CONFIRMED,
        (BoxKind::Suggestion, true) => palette::SUGGESTION_SELECTED,
        (BoxKind::Suggestion, false) => palette::SUGGESTION,
        (BoxKind::FalsePositive, true) => palette::FALSE_POSITIVE_SELECTED,
        (BoxKind::FalsePositive, false) => palette::FALSE_POSITIVE,
    }
}

/// Resize handle sizes in render-local pixels, constant on screen at any zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleSizes {
    pub edge: f32,
    pub corner: f32,
}

impl HandleSizes {
    pub fn for_scale(scale: f32) -> Self {
        let edge = (EDGE_HANDLE_PX / sanitize_scale(scale)).ceil();
        Self {
            edge,
            corner: edge * 2.0,
        }
    }
}

/// One box as the host should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBox {
    pub id: BoxId,
    pub kind: BoxKind,
    pub rect: ScreenRect,
    pub label: Option<String>,
    pub difficult: bool,
    pub selected: bool,
    pub z_index: i32,
    pub color: Rgb,
    pub border_width: f32,
    pub draggable: bool,
    pub resizable: bool,
    pub editable: bool,
}

/// Everything the host needs to draw the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub render_size: Size,
    /// Boxes in paint order
    pub boxes: Vec<RenderedBox>,
    pub handles: HandleSizes,
    pub show_crosshair: bool,
    pub pan_zoom_enabled: bool,
}

impl Editor {
    /// Describe the current frame at zoom `scale`.
    pub fn render(&self, scale: f32) -> RenderModel {
        let scale = sanitize_scale(scale);
        let render_size = self.render_size();
        let state = self.state();
        let unselected_z = if state.show_unselected { Z_VISIBLE } else { Z_HIDDEN };

        let boxes = self
            .store()
            .render_order()
            .map(|b| {
                let selected = state.is_selected(&b.id);
                rendered_box(b, render_size, scale, selected, unselected_z)
            })
            .collect();

        RenderModel {
            render_size,
            boxes,
            handles: HandleSizes::for_scale(scale),
            show_crosshair: state.mode == Mode::CreateArmed,
            pan_zoom_enabled: matches!(state.mode, Mode::Idle),
        }
    }
}

fn rendered_box(b: &Annotation, render: Size, scale: f32, selected: bool, unselected_z: i32) -> RenderedBox {
    RenderedBox {
        id: b.id.clone(),
        kind: b.kind,
        rect: to_screen(b.rect, render),
        label: b.label.clone(),
        difficult: b.difficult,
        selected,
        z_index: if selected { Z_SELECTED } else { unselected_z },
        color: border_color(b.kind, selected, b.difficult),
        border_width: BORDER_WIDTH_PX / scale,
        draggable: b.kind.is_draggable(),
        resizable: b.kind.is_resizable(),
        editable: b.kind.is_editable(),
    }
}
