//! Tests for keyboard shortcuts.

use super::{approx_eq, assert_inside_unit, empty_editor, label_of, loaded, rect_of, sample_editor, send};
use crate::commit::Effect;
use crate::editor::{Dialog, Editor, Mode};
use crate::input::Key;
use crate::message::Event;
use crate::model::{AnnotationRecord, BoxId};
use crate::session::EditorInput;

fn select(editor: &mut Editor, id: &str) {
    send(editor, Event::pointer_down_on(id, 0.0, 0.0));
    assert_eq!(editor.selected(), Some(&BoxId::from(id)));
}

#[test]
fn test_arrow_moves_by_screen_step() {
    let mut editor = sample_editor();
    select(&mut editor, "sugg");
    let before = rect_of(&editor, "sugg");

    send(&mut editor, Event::key(Key::Right));
    let after = rect_of(&editor, "sugg");
    assert!(approx_eq(after.x, before.x + 0.005));
    assert_eq!(after.y, before.y);
    assert_eq!(after.w, before.w);
    assert_eq!(after.h, before.h);

    send(&mut editor, Event::key(Key::Up));
    let after = rect_of(&editor, "sugg");
    assert!(approx_eq(after.y, before.y - 0.005));
}

#[test]
fn test_arrow_step_shrinks_with_zoom() {
    let mut editor = sample_editor();
    select(&mut editor, "sugg");
    let before = rect_of(&editor, "sugg");

    editor.apply(&Event::key(Key::Down), 2.0);
    let after = rect_of(&editor, "sugg");
    assert!(approx_eq(after.y, before.y + 0.0025));
}

#[test]
fn test_shift_arrow_resizes_from_top_left() {
    let mut editor = sample_editor();
    select(&mut editor, "sugg");
    let before = rect_of(&editor, "sugg");

    send(&mut editor, Event::shift_key(Key::Right));
    send(&mut editor, Event::shift_key(Key::Down));
    send(&mut editor, Event::shift_key(Key::Down));
    let after = rect_of(&editor, "sugg");
    assert_eq!(after.x, before.x);
    assert_eq!(after.y, before.y);
    assert!(approx_eq(after.w, before.w + 0.005));
    assert!(approx_eq(after.h, before.h + 0.01));
}

#[test]
fn test_shrinking_stops_at_zero() {
    let mut editor = sample_editor();
    select(&mut editor, "small");
    for _ in 0..50 {
        send(&mut editor, Event::shift_key(Key::Left));
    }
    let rect = rect_of(&editor, "small");
    assert_eq!(rect.w, 0.0);
    assert!(approx_eq(rect.h, 0.1));
}

#[test]
fn test_move_and_grow_stay_inside_image() {
    let mut editor = sample_editor();
    select(&mut editor, "small");
    for _ in 0..100 {
        send(&mut editor, Event::key(Key::Right));
        send(&mut editor, Event::key(Key::Down));
        send(&mut editor, Event::shift_key(Key::Right));
    }
    let rect = rect_of(&editor, "small");
    assert_inside_unit(rect);
    assert!(approx_eq(rect.right(), 1.0));
    assert!(approx_eq(rect.bottom(), 1.0));
}

#[test]
fn test_arrow_without_selection_is_noop() {
    let mut editor = sample_editor();
    let before = rect_of(&editor, "big");
    send(&mut editor, Event::key(Key::Left));
    assert_eq!(rect_of(&editor, "big"), before);
}

#[test]
fn test_toggle_difficult() {
    let mut editor = sample_editor();
    select(&mut editor, "big");
    send(&mut editor, Event::key(Key::Char('d')));
    assert!(editor.selected_box().is_some_and(|b| b.difficult));
    send(&mut editor, Event::key(Key::Char('d')));
    assert!(editor.selected_box().is_some_and(|b| !b.difficult));
}

#[test]
fn test_cycle_label_forward_and_back() {
    let mut editor = sample_editor();
    select(&mut editor, "small");
    assert_eq!(editor.state().active_label, "dog");

    send(&mut editor, Event::key(Key::Char('s')));
    assert_eq!(label_of(&editor, "small").as_deref(), Some("person"));
    assert_eq!(editor.state().active_label, "person");

    send(&mut editor, Event::shift_key(Key::Char('S')));
    assert_eq!(label_of(&editor, "small").as_deref(), Some("dog"));
    assert_eq!(editor.state().active_label, "dog");
}

#[test]
fn test_cycle_label_from_unknown_label() {
    let mut input = EditorInput::new(["car", "dog"]);
    input.annotations = vec![AnnotationRecord::new("a", 0.1, 0.1, 0.2, 0.2).with_label("legacy")];
    let mut editor = loaded(input);
    select(&mut editor, "a");
    assert_eq!(editor.state().active_label, "legacy");

    send(&mut editor, Event::key(Key::Char('s')));
    assert_eq!(label_of(&editor, "a").as_deref(), Some("car"));
}

#[test]
fn test_cycle_label_with_no_labels_is_noop() {
    let mut input = EditorInput::default();
    input.annotations = vec![AnnotationRecord::new("a", 0.1, 0.1, 0.2, 0.2).with_label("car")];
    let mut editor = loaded(input);
    select(&mut editor, "a");

    send(&mut editor, Event::key(Key::Char('s')));
    assert_eq!(label_of(&editor, "a").as_deref(), Some("car"));
}

#[test]
fn test_toggle_unselected_in_any_mode() {
    let mut editor = sample_editor();
    assert!(editor.state().show_unselected);
    send(&mut editor, Event::key(Key::Char('f')));
    assert!(!editor.state().show_unselected);

    send(&mut editor, Event::key(Key::Char('w')));
    send(&mut editor, Event::pointer_down(100.0, 100.0));
    assert!(editor.mode().is_drawing());
    send(&mut editor, Event::key(Key::Char('f')));
    assert!(editor.state().show_unselected);
}

#[test]
fn test_escape_clears_selection_when_idle() {
    let mut editor = sample_editor();
    select(&mut editor, "big");
    send(&mut editor, Event::key(Key::Escape));
    assert_eq!(editor.selected(), None);
    assert_eq!(editor.mode(), Mode::Idle);
}

#[test]
fn test_space_saves_verified() {
    let mut editor = sample_editor();
    let effects = send(&mut editor, Event::key(Key::Space));

    let [Effect::Save(payload)] = effects.as_slice() else {
        panic!("expected a single save, got {:?}", effects);
    };
    assert_eq!(payload.annotations.len(), 3);
    assert_eq!(payload.reviewed_suggestions, vec![BoxId::from("sugg")]);
    assert!(!payload.false_positives_cleared);
    assert_eq!(payload.verified_labels, editor.labels());
    assert!(payload.annotations.iter().any(|a| a.id.as_str() == "sugg" && a.suggestion));
}

#[test]
fn test_help_shortcut() {
    let mut editor = empty_editor();
    send(&mut editor, Event::shift_key(Key::Char('/')));
    assert_eq!(editor.dialog(), Some(&Dialog::Help));
}

#[test]
fn test_edit_label_shortcut_needs_editable_selection() {
    let mut editor = sample_editor();
    send(&mut editor, Event::key(Key::Char('e')));
    assert_eq!(editor.dialog(), None);

    select(&mut editor, "fp");
    send(&mut editor, Event::key(Key::Char('e')));
    assert_eq!(editor.dialog(), None);

    select(&mut editor, "big");
    send(&mut editor, Event::key(Key::Char('e')));
    assert_eq!(editor.dialog(), Some(&Dialog::LabelEditor));
}

#[test]
fn test_unbound_key_is_ignored() {
    let mut editor = sample_editor();
    let effects = send(&mut editor, Event::key(Key::Char('z')));
    assert!(effects.is_empty());
    assert_eq!(editor.mode(), Mode::Idle);
}
