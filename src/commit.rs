//! Commit effects produced by the editor.
//!
//! The reducer never talks to the outside world. Saves and deletions come out
//! as [`Effect`] values which the host forwards to its [`CommitSink`].

use serde::{Deserialize, Serialize};

use crate::model::{AnnotationRecord, BoxId};

/// Everything the backend needs to persist the edited image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavePayload {
    /// Confirmed and suggested boxes, draft excluded.
    pub annotations: Vec<AnnotationRecord>,
    /// Ids of every suggestion present when the image was loaded.
    pub reviewed_suggestions: Vec<BoxId>,
    /// True when no false positive remains.
    pub false_positives_cleared: bool,
    /// Full label vocabulary on a verified save, empty otherwise.
    pub verified_labels: Vec<String>,
}

impl SavePayload {
    pub fn is_verified(&self) -> bool {
        !self.verified_labels.is_empty()
    }
}

/// Outward action requested by a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Save(SavePayload),
    DeleteImage,
    FalsePositiveDeleted { id: BoxId },
    Back,
}

impl Effect {
    /// Forward this effect to a sink.
    pub fn dispatch(self, sink: &mut impl CommitSink) {
        match self {
            Effect::Save(payload) => sink.save(payload),
            Effect::DeleteImage => sink.delete_image(),
            Effect::FalsePositiveDeleted { id } => sink.delete_false_positive(&id),
            Effect::Back => sink.back(),
        }
    }
}

/// Receiver for commit effects, implemented by the host.
pub trait CommitSink {
    fn save(&mut self, payload: SavePayload);
    fn delete_image(&mut self);
    fn delete_false_positive(&mut self, id: &BoxId);
    fn back(&mut self);
}

/// Sink that records every call, for hosts that batch effects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub effects: Vec<Effect>,
}

impl CommitSink for RecordingSink {
    fn save(&mut self, payload: SavePayload) {
        self.effects.push(Effect::Save(payload));
    }

    fn delete_image(&mut self) {
        self.effects.push(Effect::DeleteImage);
    }

    fn delete_false_positive(&mut self, id: &BoxId) {
        self.effects.push(Effect::FalsePositiveDeleted { id: id.clone() });
    }

    fn back(&mut self) {
        self.effects.push(Effect::Back);
    }
}
