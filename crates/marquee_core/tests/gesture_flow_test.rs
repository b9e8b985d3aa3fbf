//! Drag, swipe and hover interplay with the animation.

mod common;

use common::{attached, fire_frame};
use marquee_core::{Direction, InputEvent, InputSource, MotionState, PointerSample};

fn mouse(x: f64, y: f64) -> PointerSample {
    PointerSample::pointer(x, y, 1, InputSource::Mouse)
}

fn finger(x: f64, y: f64) -> PointerSample {
    PointerSample::touch(x, y, 1)
}

#[test]
fn test_mouse_drag_scrubs_offset() {
    let mut marquee = attached();

    let response = marquee.on_input(InputEvent::Press(mouse(100.0, 50.0)));
    assert!(!response.prevent_default);
    assert_eq!(marquee.motion(), MotionState::Dragging);
    assert!(marquee.host().pending.is_empty());
    assert!(marquee.host().captured.contains(&1));

    // Inside the pointer dead zone: page held still, offset untouched.
    let response = marquee.on_input(InputEvent::Move(mouse(102.0, 50.0)));
    assert!(response.prevent_default);
    assert_eq!(marquee.offset(), 0.0);

    let response = marquee.on_input(InputEvent::Move(mouse(130.0, 52.0)));
    assert!(response.prevent_default);
    assert_eq!(marquee.gesture().unwrap().direction, Direction::Horizontal);
    assert!((marquee.offset() - -290.0).abs() < 1e-9);
    assert_eq!(marquee.host().last_transform(), Some(marquee.offset()));

    marquee.on_input(InputEvent::Move(mouse(60.0, 52.0)));
    assert!((marquee.offset() - -40.0).abs() < 1e-9);

    marquee.on_input(InputEvent::Release(mouse(60.0, 52.0)));
    assert_eq!(marquee.motion(), MotionState::Animating);
    assert!(marquee.host().captured.is_empty());
    assert_eq!(marquee.host().pending.len(), 1);
}

#[test]
fn test_animation_resumes_from_dragged_offset() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::Press(finger(0.0, 0.0)));
    marquee.on_input(InputEvent::Move(finger(-100.0, 0.0)));
    marquee.host_mut().now = 1000.0;
    marquee.on_input(InputEvent::Release(finger(-100.0, 0.0)));

    assert!(fire_frame(&mut marquee, 1500.0));
    assert!((marquee.offset() - -130.0).abs() < 1e-9);
}

#[test]
fn test_touch_swipe_classification() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::Press(finger(0.0, 0.0)));

    let response = marquee.on_input(InputEvent::Move(finger(20.0, 5.0)));
    assert!(response.prevent_default);
    assert_eq!(marquee.gesture().unwrap().direction, Direction::Horizontal);
    assert!((marquee.offset() - -300.0).abs() < 1e-9);
}

#[test]
fn test_vertical_swipe_yields_to_page_scroll() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::Press(finger(0.0, 0.0)));

    let response = marquee.on_input(InputEvent::Move(finger(5.0, 20.0)));
    assert!(!response.prevent_default);
    assert_eq!(marquee.motion(), MotionState::Animating);
    assert_eq!(marquee.offset(), 0.0);

    // Rest of the swipe belongs to the page.
    let response = marquee.on_input(InputEvent::Move(finger(40.0, 80.0)));
    assert!(!response.prevent_default);
    assert_eq!(marquee.offset(), 0.0);

    marquee.on_input(InputEvent::Release(finger(40.0, 80.0)));
    assert_eq!(marquee.host().pending.len(), 1);
}

#[test]
fn test_vertical_pointer_releases_capture() {
    let mut marquee = attached();
    let pen = |x, y| PointerSample::pointer(x, y, 9, InputSource::Touch);
    marquee.on_input(InputEvent::Press(pen(0.0, 0.0)));
    assert!(marquee.host().captured.contains(&9));

    marquee.on_input(InputEvent::Move(pen(1.0, 25.0)));
    assert!(marquee.host().captured.is_empty());
    assert_eq!(marquee.motion(), MotionState::Animating);

    // The browser follows up with a cancel for the same pointer.
    marquee.on_input(InputEvent::Cancel(pen(1.0, 25.0)));
    assert_eq!(marquee.host().release_errors, 0);
    assert_eq!(marquee.host().pending.len(), 1);
}

#[test]
fn test_release_after_capture_already_lost() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::Press(mouse(0.0, 0.0)));
    marquee.host_mut().captured.clear();

    marquee.on_input(InputEvent::Release(mouse(0.0, 0.0)));
    assert_eq!(marquee.host().release_errors, 1);
    assert_eq!(marquee.motion(), MotionState::Animating);
}

#[test]
fn test_release_without_drag_is_noop() {
    let mut marquee = attached();
    let token = marquee.host().pending[0];
    marquee.on_input(InputEvent::Release(mouse(0.0, 0.0)));
    assert_eq!(marquee.host().pending, vec![token]);
    assert_eq!(marquee.host().release_errors, 0);
}

#[test]
fn test_hover_entered_during_drag_keeps_paused_after_release() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::Press(mouse(0.0, 0.0)));
    marquee.on_input(InputEvent::HoverEnter);
    assert_eq!(marquee.motion(), MotionState::Dragging);

    marquee.on_input(InputEvent::Release(mouse(0.0, 0.0)));
    assert_eq!(marquee.motion(), MotionState::Idle);
    assert!(marquee.host().pending.is_empty());

    marquee.on_input(InputEvent::HoverLeave);
    assert_eq!(marquee.motion(), MotionState::Animating);
}

#[test]
fn test_hover_left_during_drag_waits_for_release() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::HoverEnter);
    marquee.on_input(InputEvent::Press(mouse(0.0, 0.0)));
    marquee.on_input(InputEvent::HoverLeave);

    assert!(!marquee.is_hover_paused());
    assert_eq!(marquee.motion(), MotionState::Dragging);
    assert!(marquee.host().pending.is_empty());

    marquee.on_input(InputEvent::Release(mouse(0.0, 0.0)));
    assert_eq!(marquee.motion(), MotionState::Animating);
}

#[test]
fn test_multi_touch_changes_nothing() {
    let mut marquee = attached();
    let token = marquee.host().pending[0];

    let response = marquee.on_input(InputEvent::Press(PointerSample::touch(0.0, 0.0, 2)));
    assert!(!response.prevent_default);
    assert_eq!(marquee.motion(), MotionState::Animating);
    assert_eq!(marquee.host().pending, vec![token]);

    marquee.on_input(InputEvent::Press(finger(0.0, 0.0)));
    let response = marquee.on_input(InputEvent::Move(PointerSample::touch(50.0, 0.0, 2)));
    assert!(!response.prevent_default);
    assert_eq!(marquee.offset(), 0.0);
    assert_eq!(marquee.gesture().unwrap().direction, Direction::Undetermined);
}

#[test]
fn test_drag_round_trip_restores_offset() {
    let mut marquee = attached();
    assert!(fire_frame(&mut marquee, 1000.0));
    let before = marquee.offset();

    marquee.on_input(InputEvent::Press(finger(200.0, 0.0)));
    marquee.on_input(InputEvent::Move(finger(337.0, 0.0)));
    marquee.on_input(InputEvent::Release(finger(337.0, 0.0)));

    marquee.on_input(InputEvent::Press(finger(337.0, 0.0)));
    marquee.on_input(InputEvent::Move(finger(200.0, 0.0)));
    marquee.on_input(InputEvent::Release(finger(200.0, 0.0)));

    assert!((marquee.offset() - before).abs() < 1e-9);
}

#[test]
fn test_detach_mid_drag_releases_capture() {
    let mut marquee = attached();
    marquee.on_input(InputEvent::Press(mouse(0.0, 0.0)));
    marquee.on_detach();

    assert!(marquee.host().captured.is_empty());
    assert!(marquee.gesture().is_none());
    assert_eq!(marquee.motion(), MotionState::Idle);
}
