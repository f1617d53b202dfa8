//! Serialized box records exchanged with the hosting application.

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, BoxId, BoxKind};
use crate::geometry::Rect;

/// A confirmed annotation or suggestion as supplied on load and returned on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: BoxId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub difficult: bool,
    #[serde(default)]
    pub suggestion: bool,
}

impl AnnotationRecord {
    pub fn new(id: impl Into<BoxId>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            label: None,
            difficult: false,
            suggestion: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn as_suggestion(mut self) -> Self {
        self.suggestion = true;
        self
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Convert to a box, forcing the suggestion kind for the suggestion collection.
    pub fn into_annotation(self, from_suggestions: bool) -> Annotation {
        let kind = if from_suggestions || self.suggestion {
            BoxKind::Suggestion
        } else {
            BoxKind::Confirmed
        };
        Annotation {
            rect: self.rect(),
            id: self.id,
            kind,
            label: self.label,
            difficult: self.difficult,
        }
    }
}

impl From<&Annotation> for AnnotationRecord {
    fn from(ann: &Annotation) -> Self {
        Self {
            id: ann.id.clone(),
            x: ann.rect.x,
            y: ann.rect.y,
            w: ann.rect.w,
            h: ann.rect.h,
            label: ann.label.clone(),
            difficult: ann.difficult,
            suggestion: ann.kind == BoxKind::Suggestion,
        }
    }
}

/// A reported false positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalsePositiveRecord {
    pub id: BoxId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FalsePositiveRecord {
    pub fn new(id: impl Into<BoxId>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<FalsePositiveRecord> for Annotation {
    fn from(record: FalsePositiveRecord) -> Self {
        Annotation {
            id: record.id,
            kind: BoxKind::FalsePositive,
            rect: Rect::new(record.x, record.y, record.w, record.h),
            label: record.label,
            difficult: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_defaults() {
        let json = r#"{"id":"a1","x":0.1,"y":0.2,"w":0.3,"h":0.4}"#;
        let record: AnnotationRecord = serde_json::from_str(json).expect("parse record");
        assert_eq!(record.id.as_str(), "a1");
        assert_eq!(record.label, None);
        assert!(!record.difficult);
        assert!(!record.suggestion);
    }

    #[test]
    fn test_suggestion_kind_from_collection_or_flag() {
        let plain = AnnotationRecord::new("a", 0.0, 0.0, 0.1, 0.1);
        assert_eq!(plain.clone().into_annotation(false).kind, BoxKind::Confirmed);
        assert_eq!(plain.into_annotation(true).kind, BoxKind::Suggestion);

        let flagged = AnnotationRecord::new("b", 0.0, 0.0, 0.1, 0.1).as_suggestion();
        assert_eq!(flagged.into_annotation(false).kind, BoxKind::Suggestion);
    }

    #[test]
    fn test_record_from_annotation_keeps_suggestion_flag() {
        let ann = AnnotationRecord::new("s", 0.1, 0.1, 0.2, 0.2)
            .with_label("dog")
            .into_annotation(true);
        let record = AnnotationRecord::from(&ann);
        assert!(record.suggestion);
        assert_eq!(record.label.as_deref(), Some("dog"));

        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("\"suggestion\":true"));
    }

    #[test]
    fn test_false_positive_conversion() {
        let fp: Annotation = FalsePositiveRecord::new("fp", 0.1, 0.1, 0.2, 0.2)
            .with_label("person")
            .into();
        assert_eq!(fp.kind, BoxKind::FalsePositive);
        assert_eq!(fp.label.as_deref(), Some("person"));
        assert!(!fp.difficult);
    }
}
