//! Global constants for the annotation editor.

/// Identifier reserved for the box being drawn.
pub const DRAFT_ID: &str = "draft";

/// Minimum side length (normalized units) for a drawn box to be kept.
pub const MIN_BOX_SIZE: f32 = 0.001;

/// Screen pixels moved per arrow key press, before zoom compensation.
pub const KEYBOARD_STEP_PX: f32 = 5.0;

/// Space left free around the image when fitting it into its container.
pub const CONTAINER_MARGIN_PX: f32 = 5.0;

/// Delay before a burst of container resizes triggers a layout pass.
pub const RESIZE_DEBOUNCE_MS: u64 = 200;

/// Smallest denominator used when dividing by a render dimension.
pub const MIN_RENDER_DENOMINATOR: f32 = 1.0;

/// Box rendering constants.
pub mod render {
    /// Stacking order of the selected box.
    pub const Z_SELECTED: i32 = 1;
    /// Stacking order of unselected boxes while they are shown.
    pub const Z_VISIBLE: i32 = 0;
    /// Stacking order of unselected boxes while they are hidden behind the image.
    pub const Z_HIDDEN: i32 = -1;
    /// Border width in screen pixels (divided by scale for render pixels).
    pub const BORDER_WIDTH_PX: f32 = 2.0;
    /// Edge resize handle thickness in screen pixels.
    pub const EDGE_HANDLE_PX: f32 = 10.0;
}
