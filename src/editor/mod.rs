//! Interaction state machine for the box editor.
//!
//! The editor follows the Elm architecture: every input arrives as an
//! [`Event`], [`Editor::apply`] performs the guarded transition, and anything
//! that must leave the editor comes back as an [`Effect`]. [`reduce`] is the
//! pure form of the same step.

mod commands;
mod dialogs;
mod pointer;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::commit::{CommitSink, Effect, SavePayload};
use crate::config::{EditorConfig, EditorPreferences};
use crate::geometry::{Point, Size, fit_to_container, sanitize_scale};
use crate::keybindings::KeyBindings;
use crate::message::Event;
use crate::model::{Annotation, AnnotationRecord, BoxId};
use crate::session::EditorInput;
use crate::store::BoxStore;

/// Source of the current zoom factor, sampled once per event.
pub trait ScaleSource {
    fn scale(&self) -> f32;
}

impl ScaleSource for f32 {
    fn scale(&self) -> f32 {
        *self
    }
}

/// The editor's drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    /// Next pointer press starts a new box.
    CreateArmed,
    /// A draft box is being drawn from `origin`.
    Drawing { origin: Point },
}

impl Mode {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Mode::Drawing { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::CreateArmed => "CreateArmed",
            Mode::Drawing { .. } => "Drawing",
        }
    }
}

/// Modal dialogs the host should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dialog", content = "id", rename_all = "snake_case")]
pub enum Dialog {
    /// Edit label and difficulty of the selected box.
    LabelEditor,
    /// Confirm that every object is labeled before a verified save.
    Verify,
    /// Confirm deletion of the whole image.
    DeleteImage,
    /// Confirm deletion of a reported false positive.
    DeleteFalsePositive(BoxId),
    /// Keyboard shortcut reference.
    Help,
}

/// Interaction state of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub mode: Mode,
    pub selected: Option<BoxId>,
    /// Label applied to newly drawn boxes and by label cycling
    pub active_label: String,
    pub active_difficult: bool,
    pub show_unselected: bool,
    pub dialog: Option<Dialog>,
}

impl EditorState {
    pub fn new(active_label: String) -> Self {
        Self {
            mode: Mode::Idle,
            selected: None,
            active_label,
            active_difficult: false,
            show_unselected: true,
            dialog: None,
        }
    }

    pub fn is_selected(&self, id: &BoxId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}

/// Result of a pure reducer step.
#[derive(Debug, Clone)]
pub struct Update {
    pub editor: Editor,
    pub effects: Vec<Effect>,
}

/// Apply `event` to a copy of `editor`.
pub fn reduce(editor: &Editor, event: &Event, scale: f32) -> Update {
    let mut editor = editor.clone();
    let effects = editor.apply(event, scale);
    Update { editor, effects }
}

/// Box editor for one image.
#[derive(Debug, Clone)]
pub struct Editor {
    store: BoxStore,
    state: EditorState,
    /// Label vocabulary in cycling order
    labels: Vec<String>,
    /// Suggestion ids present when the image was loaded
    reviewed_suggestions: Vec<BoxId>,
    /// Natural image size, once the image has loaded
    natural_size: Option<Size>,
    /// Fitted render size before zoom
    render_size: Size,
    preferences: EditorPreferences,
    keybindings: KeyBindings,
}

impl Editor {
    /// Create an editor with default configuration.
    pub fn new(input: EditorInput) -> Self {
        Self::with_config(input, &EditorConfig::default())
    }

    pub fn with_config(input: EditorInput, config: &EditorConfig) -> Self {
        let active_label = input.initial_label();
        let reviewed_suggestions = input.suggestion_ids();
        let labels = input.labels.clone();
        let (boxes, false_positives) = input.into_boxes();
        let store = BoxStore::seed(boxes, false_positives);

        log::info!(
            "📦 Editor opened with {} boxes, {} false positives, {} labels",
            store.len(),
            store.false_positives().len(),
            labels.len()
        );

        Self {
            store,
            state: EditorState::new(active_label),
            labels,
            reviewed_suggestions,
            natural_size: None,
            render_size: Size::unit(),
            preferences: config.preferences.clone(),
            keybindings: config.keybindings.clone(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &BoxStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn selected(&self) -> Option<&BoxId> {
        self.state.selected.as_ref()
    }

    /// The selected box, if it still exists.
    pub fn selected_box(&self) -> Option<&Annotation> {
        self.state.selected.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.state.dialog.as_ref()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn render_size(&self) -> Size {
        self.render_size
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn preferences(&self) -> &EditorPreferences {
        &self.preferences
    }

    /// Build the payload a save would send right now.
    pub fn save_payload(&self, verified: bool) -> SavePayload {
        SavePayload {
            annotations: self.store.boxes().iter().map(AnnotationRecord::from).collect(),
            reviewed_suggestions: self.reviewed_suggestions.clone(),
            false_positives_cleared: self.store.false_positives().is_empty(),
            verified_labels: if verified {
                self.labels.clone()
            } else {
                Vec::new()
            },
        }
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    /// Apply one event in place and return the effects it produced.
    pub fn apply(&mut self, event: &Event, scale: f32) -> Vec<Effect> {
        let scale = sanitize_scale(scale);

        if self.state.dialog.is_some() && is_pointer_event(event) {
            log::debug!("Ignoring pointer input while a dialog is open");
            return Vec::new();
        }

        match event {
            Event::PointerDown { position, target } => {
                self.pointer_down(*position, target.as_ref(), scale);
                Vec::new()
            }
            Event::PointerMove { position } => {
                self.pointer_move(*position, scale);
                Vec::new()
            }
            Event::PointerUp { position } => {
                self.pointer_up(*position, scale);
                Vec::new()
            }
            Event::DragStop { id, position } => {
                self.drag_stop(id, *position);
                Vec::new()
            }
            Event::ResizeStop { id, rect } => {
                self.resize_stop(id, *rect);
                Vec::new()
            }
            Event::Key { key, modifiers } => match self.keybindings.command_for(*key, *modifiers) {
                Some(command) => self.run_command(&command, scale),
                None => {
                    log::debug!("No command bound to {:?}", key);
                    Vec::new()
                }
            },
            Event::Command { command } => self.run_command(command, scale),
            Event::ImageLoaded { natural, container } => {
                self.natural_size = Some(*natural);
                self.relayout(*container);
                Vec::new()
            }
            Event::ContainerResized { container } => {
                if self.natural_size.is_some() {
                    self.relayout(*container);
                } else {
                    log::debug!("Ignoring container resize before the image loaded");
                }
                Vec::new()
            }
            Event::LabelInput { input } => {
                self.label_input(input);
                Vec::new()
            }
            Event::Dialog { response } => self.dialog_response(*response),
        }
    }

    /// Apply an event and forward its effects to `sink`.
    pub fn handle(&mut self, event: &Event, scale: &impl ScaleSource, sink: &mut impl CommitSink) {
        for effect in self.apply(event, scale.scale()) {
            effect.dispatch(sink);
        }
    }

    fn relayout(&mut self, container: Size) {
        let Some(natural) = self.natural_size else {
            return;
        };
        self.render_size = fit_to_container(natural, container, self.preferences.container_margin_px);
        log::debug!(
            "📐 Render size {:.0}x{:.0} for image {:.0}x{:.0}",
            self.render_size.width,
            self.render_size.height,
            natural.width,
            natural.height
        );
    }

    // ========================================================================
    // Selection helpers
    // ========================================================================

    fn clear_selection(&mut self) {
        if self.state.selected.take().is_some() {
            log::debug!("Selection cleared");
        }
    }

    /// Drop the selection if its box is gone.
    fn prune_selection(&mut self) {
        let stale = self
            .state
            .selected
            .as_ref()
            .is_some_and(|id| !self.store.contains(id));
        if stale {
            self.clear_selection();
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            log::debug!("Mode {} -> {}", self.state.mode.name(), mode.name());
            self.state.mode = mode;
        }
    }

    /// The active label as stored on a new box.
    fn active_label_for_box(&self) -> Option<String> {
        if self.state.active_label.is_empty() {
            None
        } else {
            Some(self.state.active_label.clone())
        }
    }
}

fn is_pointer_event(event: &Event) -> bool {
    matches!(
        event,
        Event::PointerDown { .. }
            | Event::PointerMove { .. }
            | Event::PointerUp { .. }
            | Event::DragStop { .. }
            | Event::ResizeStop { .. }
    )
}
