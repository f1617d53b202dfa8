//! Box storage for a single open image.
//!
//! The store keeps three collections: the confirmed and suggested boxes in one
//! ordered sequence, the reported false positives, and at most one draft box
//! that only exists while a box is being drawn. Every mutation is total: an
//! unknown id leaves the store untouched.

use crate::geometry::{Point, Rect};
use crate::model::{Annotation, BoxId, BoxKind, BoxPatch};

/// Ordered storage for the boxes of one image.
#[derive(Debug, Clone, Default)]
pub struct BoxStore {
    /// Confirmed and suggested boxes, in insertion order.
    boxes: Vec<Annotation>,
    /// Reported false positives.
    false_positives: Vec<Annotation>,
    /// The box being drawn, if any.
    draft: Option<Annotation>,
}

impl BoxStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the initial collections.
    ///
    /// Each collection is sorted by descending area so smaller boxes end up on
    /// top, and every box is cropped to the unit square.
    pub fn seed(
        boxes: impl IntoIterator<Item = Annotation>,
        false_positives: impl IntoIterator<Item = Annotation>,
    ) -> Self {
        Self {
            boxes: sorted_for_render(boxes),
            false_positives: sorted_for_render(false_positives),
            draft: None,
        }
    }

    /// Get a box by id from any collection. The reserved draft id only ever
    /// resolves to the draft slot.
    pub fn get(&self, id: &BoxId) -> Option<&Annotation> {
        if id.is_draft() {
            return self.draft.as_ref();
        }
        self.boxes
            .iter()
            .chain(self.false_positives.iter())
            .find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BoxId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &BoxId) -> Option<&mut Annotation> {
        if id.is_draft() {
            return self.draft.as_mut();
        }
        self.boxes
            .iter_mut()
            .chain(self.false_positives.iter_mut())
            .find(|b| &b.id == id)
    }

    /// Confirmed and suggested boxes in insertion order.
    pub fn boxes(&self) -> &[Annotation] {
        &self.boxes
    }

    pub fn false_positives(&self) -> &[Annotation] {
        &self.false_positives
    }

    pub fn draft(&self) -> Option<&Annotation> {
        self.draft.as_ref()
    }

    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }

    /// All boxes in paint order: false positives, then boxes, then the draft.
    pub fn render_order(&self) -> impl Iterator<Item = &Annotation> {
        self.false_positives
            .iter()
            .chain(self.boxes.iter())
            .chain(self.draft.iter())
    }

    /// Number of confirmed and suggested boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Merge a patch into a box. Returns whether a box was found.
    pub fn upsert(&mut self, id: &BoxId, patch: &BoxPatch) -> bool {
        match self.get_mut(id) {
            Some(target) => {
                target.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Remove a box from whichever collection holds it.
    pub fn remove(&mut self, id: &BoxId) -> Option<Annotation> {
        if id.is_draft() {
            return self.draft.take();
        }
        if let Some(index) = self.boxes.iter().position(|b| &b.id == id) {
            return Some(self.boxes.remove(index));
        }
        if let Some(index) = self.false_positives.iter().position(|b| &b.id == id) {
            return Some(self.false_positives.remove(index));
        }
        None
    }

    /// Start a zero-sized draft at `origin`. No-op if a draft already exists.
    pub fn add_draft(&mut self, origin: Point) -> bool {
        if self.draft.is_some() {
            return false;
        }
        let rect = Rect::new(origin.x, origin.y, 0.0, 0.0);
        self.draft = Some(Annotation::new(BoxId::draft(), BoxKind::Confirmed, rect));
        true
    }

    /// Replace the draft geometry.
    pub fn update_draft(&mut self, rect: Rect) {
        if let Some(draft) = self.draft.as_mut() {
            draft.rect = rect;
        }
    }

    /// Drop the draft without creating a box.
    pub fn discard_draft(&mut self) -> bool {
        self.draft.take().is_some()
    }

    /// Turn the draft into a permanent confirmed box.
    ///
    /// `rect` is cropped to the unit square; if its shorter side is not larger
    /// than `min_size` the draft is dropped instead and `None` is returned.
    pub fn promote_draft(
        &mut self,
        new_id: BoxId,
        label: Option<String>,
        rect: Rect,
        min_size: f32,
    ) -> Option<BoxId> {
        self.draft.take()?;
        let rect = rect.intersect_unit();
        if rect.min_side() <= min_size {
            return None;
        }
        let mut created = Annotation::new(new_id.clone(), BoxKind::Confirmed, rect);
        created.label = label;
        self.boxes.push(created);
        Some(new_id)
    }

    /// Advance a box's label relative to `current` within `labels`.
    ///
    /// Wraps at both ends. A `current` missing from the list starts at the
    /// first entry (forward) or the last (reverse). Returns the new label, or
    /// `None` if the box is missing or the label list is empty.
    pub fn cycle_label(
        &mut self,
        id: &BoxId,
        labels: &[String],
        current: &str,
        reverse: bool,
    ) -> Option<String> {
        if labels.is_empty() || !self.contains(id) {
            return None;
        }
        let next = cycled_label(labels, current, reverse).to_string();
        self.upsert(id, &BoxPatch::new().with_label(Some(next.clone())));
        Some(next)
    }

    /// The box after `current` in insertion order, wrapping to the first.
    ///
    /// Only confirmed and suggested boxes take part in the cycle.
    pub fn next_after(&self, current: Option<&BoxId>) -> Option<&Annotation> {
        let index = current
            .and_then(|id| self.boxes.iter().position(|b| &b.id == id))
            .map_or(0, |i| (i + 1) % self.boxes.len());
        self.boxes.get(index)
    }

    /// Drop every confirmed or suggested box that has no label.
    pub fn remove_unlabeled(&mut self) -> usize {
        let before = self.boxes.len();
        self.boxes.retain(|b| b.label.is_some());
        before - self.boxes.len()
    }
}

/// Pick the neighbour of `current` in `labels`. `labels` must not be empty.
fn cycled_label<'a>(labels: &'a [String], current: &str, reverse: bool) -> &'a str {
    let last = labels.len() - 1;
    let index = match labels.iter().position(|l| l == current) {
        Some(i) if reverse => {
            if i == 0 {
                last
            } else {
                i - 1
            }
        }
        Some(i) => {
            if i == last {
                0
            } else {
                i + 1
            }
        }
        None if reverse => last,
        None => 0,
    };
    &labels[index]
}

fn sorted_for_render(items: impl IntoIterator<Item = Annotation>) -> Vec<Annotation> {
    let mut items: Vec<Annotation> = items
        .into_iter()
        .map(|mut b| {
            if b.id.is_draft() {
                let id = BoxId::generate();
                log::warn!("Box uses the reserved id {}, renaming to {}", b.id, id);
                b.id = id;
            }
            if !b.rect.is_inside_unit() {
                log::warn!("Box {} lies outside the image, cropping", b.id);
                b.rect = b.rect.intersect_unit();
            }
            b
        })
        .collect();
    items.sort_by(|a, b| b.area().total_cmp(&a.area()));
    items
}
