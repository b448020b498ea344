use uuid::Uuid;

use super::*;

#[test]
fn command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.command());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.command());
    assert!(!Modifiers { shift: true, ..Modifiers::default() }.command());
}

#[test]
fn letter_match_ignores_case() {
    assert!(Key::new("H").is_letter('h'));
    assert!(Key::new("v").is_letter('V'));
    assert!(!Key::new("Home").is_letter('h'));
    assert!(!Key::new("").is_letter('h'));
}

#[test]
fn delete_and_backspace_both_delete() {
    assert!(Key::new("Delete").is_delete());
    assert!(Key::new("Backspace").is_delete());
    assert!(!Key::new("d").is_delete());
}

#[test]
fn cursor_css_names() {
    assert_eq!(CursorStyle::default().css(), "default");
    assert_eq!(CursorStyle::NotAllowed.css(), "not-allowed");
    assert_eq!(CursorStyle::Grabbing.css(), "grabbing");
}

#[test]
fn handle_cursors_follow_diagonals() {
    assert_eq!(CursorStyle::for_handle(ResizeHandle::Nw), CursorStyle::NwseResize);
    assert_eq!(CursorStyle::for_handle(ResizeHandle::Se), CursorStyle::NwseResize);
    assert_eq!(CursorStyle::for_handle(ResizeHandle::Ne), CursorStyle::NeswResize);
    assert_eq!(CursorStyle::for_handle(ResizeHandle::W), CursorStyle::EwResize);
    assert_eq!(CursorStyle::for_handle(ResizeHandle::S), CursorStyle::NsResize);
}

#[test]
fn session_target() {
    let id = Uuid::new_v4();
    assert_eq!(InteractionState::Idle.target(), None);
    let drag = InteractionState::Dragging { id, offset: Point::new(1.0, 2.0) };
    assert_eq!(drag.target(), Some(id));
    assert!(!drag.is_idle());
}
