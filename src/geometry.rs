//! Coordinate transform mathematics.
//!
//! Box geometry is stored in normalized image space ([0,1] on both axes,
//! relative to the image's natural size). The image is rendered at a fitted
//! pixel size and then zoomed by an external viewport. These functions convert
//! between the spaces; none of them hold state.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_RENDER_DENOMINATOR;

/// A point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle spanning two corner points in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (a.x - b.x).abs(),
            h: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f32 {
        self.w.min(self.h)
    }

    /// Check that the rectangle lies fully inside the unit square.
    pub fn is_inside_unit(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.w >= 0.0
            && self.h >= 0.0
            && self.right() <= 1.0
            && self.bottom() <= 1.0
    }

    /// Crop to the part that overlaps the unit square. A rectangle already
    /// inside is returned unchanged.
    ///
    /// A rectangle entirely outside collapses to zero size on the nearest edge.
    pub fn intersect_unit(&self) -> Rect {
        if self.is_inside_unit() {
            return *self;
        }
        let left = clamp_unit(self.x);
        let top = clamp_unit(self.y);
        let right = clamp_unit(self.x + self.w.max(0.0));
        let bottom = clamp_unit(self.y + self.h.max(0.0));
        Rect {
            x: left,
            y: top,
            w: (right - left).max(0.0),
            h: (bottom - top).max(0.0),
        }
    }

    /// Shift the rectangle so it lies inside the unit square, keeping its size
    /// where possible.
    pub fn translate_into_unit(&self) -> Rect {
        let w = clamp_unit(self.w);
        let h = clamp_unit(self.h);
        Rect {
            x: self.x.clamp(0.0, upper_bound(w)),
            y: self.y.clamp(0.0, upper_bound(h)),
            w,
            h,
        }
    }

    /// Move by a delta, stopping at the unit square edges.
    pub fn clamped_move(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: (self.x + dx).clamp(0.0, upper_bound(self.w)),
            y: (self.y + dy).clamp(0.0, upper_bound(self.h)),
            ..*self
        }
    }

    /// Grow or shrink from the top-left anchor, keeping the size non-negative
    /// and the far edges inside the unit square.
    pub fn clamped_grow(&self, dw: f32, dh: f32) -> Rect {
        Rect {
            w: (self.w + dw).clamp(0.0, upper_bound(self.x)),
            h: (self.h + dh).clamp(0.0, upper_bound(self.y)),
            ..*self
        }
    }
}

/// A point in screen pixels, measured from the rendered image's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in render-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The size used before an image has been laid out.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0)
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Room left in the unit square after `offset`, never negative.
fn upper_bound(offset: f32) -> f32 {
    (1.0 - offset).max(0.0)
}

fn denominator(v: f32) -> f32 {
    v.max(MIN_RENDER_DENOMINATOR)
}

/// Replace a non-positive or non-finite zoom factor with 1.
pub fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        log::warn!("Ignoring invalid zoom scale {}, using 1.0", scale);
        1.0
    }
}

/// Convert a zoomed screen position to normalized image coordinates.
pub fn to_normalized(screen: ScreenPoint, render: Size, scale: f32) -> Point {
    let scale = sanitize_scale(scale);
    Point {
        x: screen.x / scale / denominator(render.width),
        y: screen.y / scale / denominator(render.height),
    }
}

/// Convert normalized geometry to render-local pixels.
///
/// The zoom scale is applied by the rendering surface, not here.
pub fn to_screen(rect: Rect, render: Size) -> ScreenRect {
    ScreenRect {
        x: rect.x * render.width,
        y: rect.y * render.height,
        width: rect.w * render.width,
        height: rect.h * render.height,
    }
}

/// Convert render-local pixels back to normalized geometry.
pub fn from_screen(rect: ScreenRect, render: Size) -> Rect {
    let width = denominator(render.width);
    let height = denominator(render.height);
    Rect {
        x: rect.x / width,
        y: rect.y / height,
        w: rect.width / width,
        h: rect.height / height,
    }
}

/// Normalized step for keyboard nudges.
///
/// `base_px` screen pixels are converted through the zoom so a key press moves
/// the same visual distance at any zoom level.
pub fn step_size(base_px: f32, scale: f32, render: Size) -> (f32, f32) {
    let step_px = base_px / sanitize_scale(scale);
    (
        step_px / denominator(render.width),
        step_px / denominator(render.height),
    )
}

/// Fit an image of `natural` size into `container`, preserving aspect ratio.
///
/// The image is sized to the container height first and falls back to the
/// container width when that would be too wide.
pub fn fit_to_container(natural: Size, container: Size, margin: f32) -> Size {
    let natural_width = denominator(natural.width);
    let natural_height = denominator(natural.height);
    let aspect = natural_width / natural_height;

    let max_height = (container.height - margin).max(0.0);
    let max_width = (container.width - margin).max(0.0);
    let desired_width = max_height * aspect;

    if desired_width > max_width {
        Size::new(max_width, (max_width / aspect).round())
    } else {
        Size::new(desired_width, (desired_width / aspect).round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_to_normalized_identity_scale() {
        let p = to_normalized(ScreenPoint::new(200.0, 400.0), Size::new(1000.0, 1000.0), 1.0);
        assert!(approx_eq(p.x, 0.2));
        assert!(approx_eq(p.y, 0.4));
    }

    #[test]
    fn test_to_normalized_divides_out_scale() {
        let p = to_normalized(ScreenPoint::new(400.0, 400.0), Size::new(1000.0, 500.0), 2.0);
        assert!(approx_eq(p.x, 0.2));
        assert!(approx_eq(p.y, 0.4));
    }

    #[test]
    fn test_zero_render_size_does_not_divide_by_zero() {
        let p = to_normalized(ScreenPoint::new(0.0, 0.0), Size::new(0.0, 0.0), 1.0);
        assert_eq!(p, Point::new(0.0, 0.0));

        let r = from_screen(ScreenRect::new(0.0, 0.0, 0.0, 0.0), Size::new(0.0, 0.0));
        assert!(r.x.is_finite() && r.w.is_finite());
    }

    #[test]
    fn test_invalid_scale_falls_back_to_one() {
        assert_eq!(sanitize_scale(0.0), 1.0);
        assert_eq!(sanitize_scale(-2.0), 1.0);
        assert_eq!(sanitize_scale(f32::NAN), 1.0);
        assert_eq!(sanitize_scale(1.5), 1.5);
    }

    #[test]
    fn test_screen_roundtrip() {
        let render = Size::new(640.0, 480.0);
        let rect = Rect::new(0.1, 0.2, 0.3, 0.4);
        let back = from_screen(to_screen(rect, render), render);
        assert!(approx_eq(back.x, rect.x));
        assert!(approx_eq(back.y, rect.y));
        assert!(approx_eq(back.w, rect.w));
        assert!(approx_eq(back.h, rect.h));
    }

    #[test]
    fn test_step_size_shrinks_with_zoom() {
        let render = Size::new(500.0, 250.0);
        let (dx1, dy1) = step_size(5.0, 1.0, render);
        let (dx2, dy2) = step_size(5.0, 2.0, render);
        assert!(approx_eq(dx1, 0.01));
        assert!(approx_eq(dy1, 0.02));
        assert!(approx_eq(dx2, dx1 / 2.0));
        assert!(approx_eq(dy2, dy1 / 2.0));
    }

    #[test]
    fn test_from_corners_any_order() {
        let a = Rect::from_corners(Point::new(0.5, 0.4), Point::new(0.2, 0.2));
        let b = Rect::from_corners(Point::new(0.2, 0.2), Point::new(0.5, 0.4));
        assert_eq!(a, b);
        assert!(approx_eq(a.w, 0.3));
        assert!(approx_eq(a.h, 0.2));
    }

    #[test]
    fn test_clamped_ops_tolerate_oversized_rects() {
        let wide = Rect::new(0.2, 0.1, 1.2, 0.5);
        let moved = wide.clamped_move(0.1, 0.1);
        assert_eq!(moved.x, 0.0);
        assert!(approx_eq(moved.y, 0.2));

        let grown = Rect::new(1.1, 0.0, 0.1, 0.1).clamped_grow(0.05, 0.05);
        assert_eq!(grown.w, 0.0);
        assert!(approx_eq(grown.h, 0.15));

        let shifted = Rect::new(0.5, 0.5, f32::NAN, 0.2).translate_into_unit();
        assert_eq!(shifted.w, 0.0);
        assert!(approx_eq(shifted.y, 0.5));
    }

    #[test]
    fn test_intersect_unit_crops_negative_origin() {
        let r = Rect::new(-0.1, -0.2, 0.5, 0.5).intersect_unit();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 0.0);
        assert!(approx_eq(r.w, 0.4));
        assert!(approx_eq(r.h, 0.3));
    }

    #[test]
    fn test_intersect_unit_crops_far_edge() {
        let r = Rect::new(0.8, 0.9, 0.5, 0.5).intersect_unit();
        assert!(approx_eq(r.w, 0.2));
        assert!(approx_eq(r.h, 0.1));
        assert!(r.is_inside_unit());
    }

    #[test]
    fn test_intersect_unit_fully_outside_collapses() {
        let r = Rect::new(1.5, -2.0, 0.3, 0.3).intersect_unit();
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
        assert!(r.is_inside_unit());
    }

    #[test]
    fn test_translate_into_unit_keeps_size() {
        let r = Rect::new(0.9, -0.1, 0.2, 0.3).translate_into_unit();
        assert!(approx_eq(r.x, 0.8));
        assert_eq!(r.y, 0.0);
        assert!(approx_eq(r.w, 0.2));
        assert!(approx_eq(r.h, 0.3));
    }

    #[test]
    fn test_clamped_move_stops_at_edges() {
        let r = Rect::new(0.05, 0.9, 0.1, 0.1);
        let left = r.clamped_move(-0.1, 0.0);
        assert_eq!(left.x, 0.0);
        let down = r.clamped_move(0.0, 0.5);
        assert!(approx_eq(down.y, 0.9));
        assert_eq!(down.w, r.w);
    }

    #[test]
    fn test_clamped_grow_bounds() {
        let r = Rect::new(0.8, 0.8, 0.1, 0.1);
        let grown = r.clamped_grow(0.5, 0.5);
        assert!(approx_eq(grown.w, 0.2));
        assert!(approx_eq(grown.h, 0.2));
        let shrunk = r.clamped_grow(-0.5, -0.5);
        assert_eq!(shrunk.w, 0.0);
        assert_eq!(shrunk.h, 0.0);
        assert_eq!(shrunk.x, r.x);
    }

    #[test]
    fn test_fit_to_container_height_limited() {
        // 2:1 image in a wide container: height decides
        let size = fit_to_container(Size::new(200.0, 100.0), Size::new(1005.0, 205.0), 5.0);
        assert!(approx_eq(size.width, 400.0));
        assert!(approx_eq(size.height, 200.0));
    }

    #[test]
    fn test_fit_to_container_width_limited() {
        // 2:1 image in a tall container: width decides
        let size = fit_to_container(Size::new(200.0, 100.0), Size::new(305.0, 1005.0), 5.0);
        assert!(approx_eq(size.width, 300.0));
        assert!(approx_eq(size.height, 150.0));
    }

    #[test]
    fn test_fit_to_container_degenerate_inputs() {
        let size = fit_to_container(Size::new(0.0, 0.0), Size::new(0.0, 0.0), 5.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
    }
}
