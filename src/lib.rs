//! bbox-annotator - bounding box annotation editor core
//!
//! Turns pointer and keyboard input under a variable zoom into normalized box
//! geometry and enforces the modal editing rules. Hosts feed [`Event`]s to an
//! [`Editor`], draw its [`RenderModel`] and forward the resulting effects to a
//! [`CommitSink`].

pub mod commit;
pub mod config;
pub mod constants;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod keybindings;
pub mod layout;
pub mod logging;
pub mod message;
pub mod model;
pub mod render;
pub mod session;
pub mod store;

pub use commit::{CommitSink, Effect, RecordingSink, SavePayload};
pub use config::{ConfigError, EditorConfig, EditorPreferences, LogLevel};
pub use editor::{Dialog, Editor, EditorState, Mode, ScaleSource, Update, reduce};
pub use geometry::{Point, Rect, ScreenPoint, ScreenRect, Size};
pub use input::{Direction, Key, Modifiers};
pub use keybindings::{KeyBindings, ShortcutHelp};
pub use layout::ResizeDebouncer;
pub use message::{Command, DialogResponse, Event, LabelInput};
pub use model::{Annotation, AnnotationRecord, BoxId, BoxKind, BoxPatch, FalsePositiveRecord};
pub use render::{RenderModel, RenderedBox};
pub use session::{EditorInput, SessionError};
pub use store::BoxStore;
