//! Data models for the annotation editor.

mod annotation;
mod record;

pub use annotation::{Annotation, BoxId, BoxKind, BoxPatch};
pub use record::{AnnotationRecord, FalsePositiveRecord};
