//! Input for one editing session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{Annotation, AnnotationRecord, BoxId, FalsePositiveRecord};

/// The boxes and label vocabulary an editor is opened with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorInput {
    pub annotations: Vec<AnnotationRecord>,
    pub suggestions: Vec<AnnotationRecord>,
    pub false_positives: Vec<FalsePositiveRecord>,
    pub labels: Vec<String>,
    /// Labels already verified for this image
    pub verified_labels: Vec<String>,
}

impl EditorInput {
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let input = Self::from_json(&json)?;
        log::info!(
            "Loaded session from {:?}: {} annotations, {} suggestions, {} false positives",
            path.as_ref(),
            input.annotations.len(),
            input.suggestions.len(),
            input.false_positives.len()
        );
        Ok(input)
    }

    /// Ids of every suggestion in this input.
    pub fn suggestion_ids(&self) -> Vec<BoxId> {
        self.suggestions.iter().map(|s| s.id.clone()).collect()
    }

    /// The label that is active when the editor opens.
    ///
    /// Prefers the first label that still needs verification.
    pub fn initial_label(&self) -> String {
        self.labels
            .iter()
            .find(|l| !self.verified_labels.contains(*l))
            .or_else(|| self.labels.first())
            .cloned()
            .unwrap_or_default()
    }

    /// Split into confirmed+suggested boxes and false positives.
    pub fn into_boxes(self) -> (Vec<Annotation>, Vec<Annotation>) {
        let boxes = self
            .annotations
            .into_iter()
            .map(|r| r.into_annotation(false))
            .chain(self.suggestions.into_iter().map(|r| r.into_annotation(true)))
            .collect();
        let false_positives = self.false_positives.into_iter().map(Annotation::from).collect();
        (boxes, false_positives)
    }
}

/// Errors that can occur when loading a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to parse session: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
