//! Scenario tests for the editor state machine.
//!
//! Every fixture renders a 1000x1000 image at 1000x1000 pixels, so one render
//! pixel is 0.001 in normalized units.

mod keyboard_tests;

use crate::commit::Effect;
use crate::editor::Editor;
use crate::geometry::{Rect, Size};
use crate::message::Event;
use crate::model::{AnnotationRecord, BoxId, FalsePositiveRecord};
use crate::session::EditorInput;

const EPSILON: f32 = 0.0001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn labels() -> Vec<String> {
    vec!["person".to_string(), "car".to_string(), "dog".to_string()]
}

/// Open an editor and lay it out over a 1000x1000 render.
fn loaded(input: EditorInput) -> Editor {
    let mut editor = Editor::new(input);
    editor.apply(
        &Event::ImageLoaded {
            natural: Size::new(1000.0, 1000.0),
            container: Size::new(1005.0, 1005.0),
        },
        1.0,
    );
    editor
}

/// No boxes, three labels.
fn empty_editor() -> Editor {
    loaded(EditorInput::new(labels()))
}

/// Two confirmed boxes, one suggestion and one false positive.
///
/// Insertion order after the area sort is `big`, `sugg`, `small`.
fn sample_editor() -> Editor {
    let mut input = EditorInput::new(labels());
    input.annotations = vec![
        AnnotationRecord::new("small", 0.7, 0.7, 0.1, 0.1).with_label("dog"),
        AnnotationRecord::new("big", 0.0, 0.0, 0.6, 0.6).with_label("car"),
    ];
    input.suggestions = vec![AnnotationRecord::new("sugg", 0.3, 0.3, 0.2, 0.2).with_label("person")];
    input.false_positives = vec![FalsePositiveRecord::new("fp", 0.1, 0.65, 0.2, 0.2).with_label("person")];
    loaded(input)
}

fn send(editor: &mut Editor, event: Event) -> Vec<Effect> {
    editor.apply(&event, 1.0)
}

fn rect_of(editor: &Editor, id: &str) -> Rect {
    editor
        .store()
        .get(&BoxId::from(id))
        .map(|b| b.rect)
        .expect("box exists")
}

fn label_of(editor: &Editor, id: &str) -> Option<String> {
    editor
        .store()
        .get(&BoxId::from(id))
        .and_then(|b| b.label.clone())
}

fn ids(editor: &Editor) -> Vec<String> {
    editor
        .store()
        .boxes()
        .iter()
        .map(|b| b.id.to_string())
        .collect()
}

fn assert_inside_unit(rect: Rect) {
    assert!(rect.x >= 0.0 && rect.y >= 0.0, "origin inside: {:?}", rect);
    assert!(rect.w >= 0.0 && rect.h >= 0.0, "size non-negative: {:?}", rect);
    assert!(rect.right() <= 1.0 + EPSILON, "right edge inside: {:?}", rect);
    assert!(rect.bottom() <= 1.0 + EPSILON, "bottom edge inside: {:?}", rect);
}
