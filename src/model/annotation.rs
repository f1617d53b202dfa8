//! Box types and their capabilities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DRAFT_ID;
use crate::geometry::Rect;

/// Unique identifier for a box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxId(String);

impl BoxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a newly drawn box.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The id carried by the box currently being drawn.
    pub fn draft() -> Self {
        Self(DRAFT_ID.to_string())
    }

    pub fn is_draft(&self) -> bool {
        self.0 == DRAFT_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoxId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BoxId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Where a box came from, which decides what the operator may do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    /// Annotation confirmed by the operator.
    Confirmed,
    /// Model-proposed box awaiting review.
    Suggestion,
    /// Previously rejected detection, read-only except for deletion.
    FalsePositive,
}

impl BoxKind {
    pub fn is_draggable(&self) -> bool {
        !matches!(self, BoxKind::FalsePositive)
    }

    pub fn is_resizable(&self) -> bool {
        !matches!(self, BoxKind::FalsePositive)
    }

    /// Whether label and difficulty can be changed.
    pub fn is_editable(&self) -> bool {
        !matches!(self, BoxKind::FalsePositive)
    }

    /// Whether the box can be removed without a confirmation step.
    pub fn is_deletable_directly(&self) -> bool {
        !matches!(self, BoxKind::FalsePositive)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoxKind::Confirmed => "Confirmed",
            BoxKind::Suggestion => "Suggestion",
            BoxKind::FalsePositive => "False positive",
        }
    }
}

/// A rectangle on the image in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: BoxId,
    pub kind: BoxKind,
    pub rect: Rect,
    pub label: Option<String>,
    /// Always false for false positives.
    pub difficult: bool,
}

impl Annotation {
    pub fn new(id: impl Into<BoxId>, kind: BoxKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
            label: None,
            difficult: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_difficult(mut self, difficult: bool) -> Self {
        self.difficult = difficult && self.kind.is_editable();
        self
    }

    pub fn area(&self) -> f32 {
        self.rect.area()
    }

    /// Merge a patch into this box, keeping the geometry inside the unit square.
    pub fn apply_patch(&mut self, patch: &BoxPatch) {
        let mut rect = self.rect;
        if let Some(x) = patch.x {
            rect.x = x;
        }
        if let Some(y) = patch.y {
            rect.y = y;
        }
        if let Some(w) = patch.w {
            rect.w = w;
        }
        if let Some(h) = patch.h {
            rect.h = h;
        }
        self.rect = rect.intersect_unit();

        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(difficult) = patch.difficult {
            self.difficult = difficult && self.kind.is_editable();
        }
    }
}

/// Partial update for a box. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
    /// `Some(None)` clears the label.
    pub label: Option<Option<String>>,
    pub difficult: Option<bool>,
}

impl BoxPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch replacing the whole geometry.
    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            w: Some(rect.w),
            h: Some(rect.h),
            ..Self::default()
        }
    }

    /// Patch replacing only the position.
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch replacing only the size.
    pub fn size(w: f32, h: f32) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_difficult(mut self, difficult: bool) -> Self {
        self.difficult = Some(difficult);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_follow_kind() {
        assert!(BoxKind::Confirmed.is_draggable());
        assert!(BoxKind::Suggestion.is_resizable());
        assert!(BoxKind::Suggestion.is_deletable_directly());
        assert!(!BoxKind::FalsePositive.is_draggable());
        assert!(!BoxKind::FalsePositive.is_resizable());
        assert!(!BoxKind::FalsePositive.is_editable());
        assert!(!BoxKind::FalsePositive.is_deletable_directly());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = BoxId::generate();
        let b = BoxId::generate();
        assert_ne!(a, b);
        assert!(!a.is_draft());
        assert!(BoxId::draft().is_draft());
    }

    #[test]
    fn test_patch_clamps_geometry() {
        let mut ann = Annotation::new("a", BoxKind::Confirmed, Rect::new(0.5, 0.5, 0.2, 0.2));
        ann.apply_patch(&BoxPatch::position(0.9, -0.1));
        assert!(ann.rect.x >= 0.0 && ann.rect.y >= 0.0);
        assert!(ann.rect.right() <= 1.0 && ann.rect.bottom() <= 1.0);
    }

    #[test]
    fn test_patch_label_and_difficult() {
        let mut ann = Annotation::new("a", BoxKind::Confirmed, Rect::new(0.1, 0.1, 0.2, 0.2))
            .with_label("car");
        ann.apply_patch(&BoxPatch::new().with_difficult(true));
        assert!(ann.difficult);
        assert_eq!(ann.label.as_deref(), Some("car"));

        ann.apply_patch(&BoxPatch::new().with_label(None));
        assert_eq!(ann.label, None);
    }

    #[test]
    fn test_false_positive_never_difficult() {
        let mut fp = Annotation::new("fp", BoxKind::FalsePositive, Rect::new(0.1, 0.1, 0.2, 0.2))
            .with_difficult(true);
        assert!(!fp.difficult);
        fp.apply_patch(&BoxPatch::new().with_difficult(true));
        assert!(!fp.difficult);
    }
}
