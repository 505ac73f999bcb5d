use floorscan_canvas::{
    Canvas, CanvasError, Element, Fixture, FixtureKind, Gesture, InteractionMode,
    InteractionOutcome, Key, Opening, PointerButton, Wall, WallCategory,
};
use floorscan_core::Point;
use floorscan_settings::EngineSettings;

use crate::common::identity_canvas;

fn door_and_wall(canvas: &mut Canvas) -> (floorscan_canvas::ElementId, floorscan_canvas::ElementId) {
    let ids = canvas.load_elements(vec![
        Element::Wall(Wall::new(
            Point::new(100.0, 500.0),
            Point::new(500.0, 500.0),
            WallCategory::Interior,
        )),
        Element::Door(Opening::new(Point::new(200.0, 200.0), "single", 30.0)),
    ]);
    (ids[0], ids[1])
}

#[test]
fn test_pointer_input_ignored_without_image() {
    let mut canvas = Canvas::with_size(800.0, 600.0);
    assert_eq!(
        canvas.pointer_down(10.0, 10.0, PointerButton::Primary),
        InteractionOutcome::Ignored
    );
    assert_eq!(canvas.wheel(-1.0, 10.0, 10.0), InteractionOutcome::Ignored);
    assert_eq!(canvas.zoom_fit(), Err(CanvasError::ImageNotLoaded));
    assert_eq!(canvas.pan_by(5.0, 5.0), Err(CanvasError::ImageNotLoaded));
    assert!(canvas.gesture().is_idle());
}

#[test]
fn test_drag_keeps_grab_offset() {
    let mut canvas = identity_canvas();
    let (_, door) = door_and_wall(&mut canvas);

    // Grab 5px right of the door center
    let outcome = canvas.pointer_down(205.0, 200.0, PointerButton::Primary);
    assert_eq!(outcome, InteractionOutcome::Selected(Some(door)));
    assert_eq!(canvas.selected_id(), Some(door));

    let outcome = canvas.pointer_move(305.0, 250.0);
    assert_eq!(
        outcome,
        InteractionOutcome::Moved {
            id: door,
            center: Point::new(300.0, 250.0)
        }
    );
    canvas.pointer_up(305.0, 250.0, PointerButton::Primary);
    assert!(canvas.gesture().is_idle());
    assert_eq!(canvas.element(door).unwrap().center(), Point::new(300.0, 250.0));
}

#[test]
fn test_wall_drag_is_rigid() {
    let mut canvas = identity_canvas();
    let (wall, _) = door_and_wall(&mut canvas);

    canvas.pointer_down(300.0, 503.0, PointerButton::Primary);
    canvas.pointer_move(300.0, 603.0);
    canvas.pointer_up(300.0, 603.0, PointerButton::Primary);

    let w = canvas.element(wall).unwrap().as_wall().unwrap().clone();
    assert_eq!(w.start, Point::new(100.0, 600.0));
    assert_eq!(w.end, Point::new(500.0, 600.0));
}

#[test]
fn test_press_on_empty_space_deselects_and_pans() {
    let mut canvas = identity_canvas();
    let (_, door) = door_and_wall(&mut canvas);
    canvas.select(door);

    let outcome = canvas.pointer_down(800.0, 100.0, PointerButton::Primary);
    assert_eq!(outcome, InteractionOutcome::Selected(None));
    assert_eq!(canvas.selected_id(), None);

    assert_eq!(
        canvas.pointer_move(830.0, 80.0),
        InteractionOutcome::Panned {
            pan_x: 30.0,
            pan_y: -20.0
        }
    );
    // Pan is measured from the grab point, not accumulated per event
    canvas.pointer_move(840.0, 90.0);
    assert_eq!(canvas.viewport().pan_x(), 40.0);
    assert_eq!(canvas.viewport().pan_y(), -10.0);
    canvas.pointer_up(840.0, 90.0, PointerButton::Primary);
    assert!(canvas.gesture().is_idle());
}

#[test]
fn test_middle_button_pans_in_any_mode() {
    let mut canvas = identity_canvas();
    door_and_wall(&mut canvas);
    canvas.set_mode(InteractionMode::Calibrate);

    // Middle press over the door pans instead of selecting or calibrating
    assert_eq!(
        canvas.pointer_down(200.0, 200.0, PointerButton::Middle),
        InteractionOutcome::PanStarted
    );
    canvas.pointer_move(210.0, 200.0);
    canvas.pointer_up(210.0, 200.0, PointerButton::Middle);
    assert_eq!(canvas.viewport().pan_x(), 10.0);
    assert!(canvas.calibration_line().is_empty());
    assert_eq!(canvas.mode(), InteractionMode::Calibrate);
    assert_eq!(canvas.selected_id(), None);
}

#[test]
fn test_pan_mode_never_selects() {
    let mut canvas = identity_canvas();
    door_and_wall(&mut canvas);
    canvas.set_mode(InteractionMode::Pan);
    assert_eq!(
        canvas.pointer_down(200.0, 200.0, PointerButton::Primary),
        InteractionOutcome::PanStarted
    );
    assert_eq!(canvas.selected_id(), None);
}

#[test]
fn test_second_press_during_gesture_is_ignored() {
    let mut canvas = identity_canvas();
    let (_, door) = door_and_wall(&mut canvas);
    canvas.pointer_down(200.0, 200.0, PointerButton::Primary);
    assert_eq!(
        canvas.pointer_down(800.0, 700.0, PointerButton::Middle),
        InteractionOutcome::Ignored
    );
    assert!(matches!(canvas.gesture(), Gesture::Dragging { id, .. } if id == door));
}

#[test]
fn test_calibration_gesture_returns_to_select() {
    let mut canvas = identity_canvas();
    canvas.set_mode(InteractionMode::Calibrate);

    assert_eq!(
        canvas.pointer_down(100.0, 100.0, PointerButton::Primary),
        InteractionOutcome::CalibrationPoint(Point::new(100.0, 100.0))
    );
    canvas.pointer_up(100.0, 100.0, PointerButton::Primary);
    assert_eq!(canvas.mode(), InteractionMode::Calibrate);

    assert_eq!(
        canvas.pointer_down(400.0, 500.0, PointerButton::Primary),
        InteractionOutcome::CalibrationMeasured { pixels: 500.0 }
    );
    canvas.pointer_up(400.0, 500.0, PointerButton::Primary);
    assert_eq!(canvas.mode(), InteractionMode::Select);
    assert_eq!(canvas.calibration_line().pixel_length(), Some(500.0));
}

#[test]
fn test_calibration_uses_image_space() {
    let mut canvas = identity_canvas();
    canvas.apply_zoom(2.0, 0.0, 0.0).unwrap();
    canvas.set_mode(InteractionMode::Calibrate);
    canvas.pointer_down(0.0, 0.0, PointerButton::Primary);
    canvas.pointer_up(0.0, 0.0, PointerButton::Primary);
    // 200 screen px at zoom 2 is 100 image px
    assert_eq!(
        canvas.pointer_down(200.0, 0.0, PointerButton::Primary),
        InteractionOutcome::CalibrationMeasured { pixels: 100.0 }
    );
}

#[test]
fn test_escape_cancels_calibration() {
    let mut canvas = identity_canvas();
    canvas.set_mode(InteractionMode::Calibrate);
    canvas.pointer_down(100.0, 100.0, PointerButton::Primary);
    canvas.pointer_up(100.0, 100.0, PointerButton::Primary);

    assert_eq!(
        canvas.key_down(Key::Escape),
        InteractionOutcome::CalibrationCancelled
    );
    assert_eq!(canvas.mode(), InteractionMode::Select);
    assert!(canvas.calibration_line().is_empty());
}

#[test]
fn test_escape_does_not_end_drag() {
    let mut canvas = identity_canvas();
    let (_, door) = door_and_wall(&mut canvas);
    canvas.pointer_down(200.0, 200.0, PointerButton::Primary);
    canvas.key_down(Key::Escape);
    assert_eq!(canvas.selected_id(), None);
    assert!(matches!(canvas.gesture(), Gesture::Dragging { .. }));
    canvas.pointer_move(220.0, 200.0);
    assert_eq!(canvas.element(door).unwrap().center(), Point::new(220.0, 200.0));
}

#[test]
fn test_wheel_zooms_toward_cursor_in_any_mode() {
    let mut canvas = identity_canvas();
    canvas.set_mode(InteractionMode::Calibrate);
    let before = canvas.screen_to_image(300.0, 200.0);
    let outcome = canvas.wheel(-120.0, 300.0, 200.0);
    assert!(matches!(outcome, InteractionOutcome::Zoomed { zoom } if (zoom - 1.1).abs() < 1e-12));
    let after = canvas.screen_to_image(300.0, 200.0);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);

    canvas.wheel(120.0, 300.0, 200.0);
    assert!((canvas.zoom() - 1.0).abs() < 1e-12);
}

#[test]
fn test_wheel_during_pan_keeps_drag_anchor() {
    let mut canvas = identity_canvas();
    canvas.pointer_down(100.0, 100.0, PointerButton::Middle);
    canvas.pointer_move(110.0, 100.0);
    canvas.wheel(-1.0, 110.0, 100.0);
    let grabbed = canvas.screen_to_image(110.0, 100.0);
    assert!((grabbed.x - 100.0).abs() < 1e-9);

    canvas.pointer_move(111.0, 100.0);
    let after = canvas.screen_to_image(111.0, 100.0);
    assert!((after.x - grabbed.x).abs() < 1e-9);
    assert!((after.y - grabbed.y).abs() < 1e-9);
    assert!(matches!(canvas.gesture(), Gesture::Panning { .. }));
}

#[test]
fn test_inverted_zoom_bounds_rejected() {
    let settings = EngineSettings {
        min_zoom: 5.0,
        max_zoom: 1.0,
        ..EngineSettings::default()
    };
    assert!(matches!(
        Canvas::new(settings),
        Err(CanvasError::InvalidSettings(_))
    ));
    assert!(Canvas::new(EngineSettings::default()).is_ok());
}

#[test]
fn test_keyboard_delete_and_rotate() {
    let mut canvas = identity_canvas();
    let (wall, door) = door_and_wall(&mut canvas);

    canvas.select(door);
    assert_eq!(
        canvas.key_down(Key::Char('r')),
        InteractionOutcome::Rotated {
            id: door,
            rotation_deg: 90.0
        }
    );
    for _ in 0..3 {
        canvas.key_down(Key::Char('R'));
    }
    assert_eq!(canvas.element(door).unwrap().rotation_deg(), Some(0.0));

    canvas.select(wall);
    assert_eq!(canvas.key_down(Key::Char('r')), InteractionOutcome::Ignored);

    assert_eq!(canvas.key_down(Key::Backspace), InteractionOutcome::Deleted(wall));
    assert!(canvas.element(wall).is_none());
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(canvas.key_down(Key::Delete), InteractionOutcome::Ignored);
}

#[test]
fn test_keys_ignored_while_text_field_focused() {
    let mut canvas = identity_canvas();
    let (_, door) = door_and_wall(&mut canvas);
    canvas.select(door);
    canvas.set_text_input_focused(true);
    assert_eq!(canvas.key_down(Key::Delete), InteractionOutcome::Ignored);
    assert_eq!(canvas.key_down(Key::Char('r')), InteractionOutcome::Ignored);
    assert!(canvas.element(door).is_some());

    // Escape still clears the selection
    assert_eq!(canvas.key_down(Key::Escape), InteractionOutcome::Selected(None));
}

#[test]
fn test_fixture_rotation() {
    let mut canvas = identity_canvas();
    let ids = canvas.load_elements(vec![Element::Fixture(Fixture::new(
        Point::new(50.0, 50.0),
        FixtureKind::Plumbing,
        "toilet",
    ))]);
    canvas.select(ids[0]);
    assert_eq!(canvas.rotate_selected(), Some((ids[0], 90.0)));
}

#[test]
fn test_delete_missing_id_is_noop() {
    let mut canvas = identity_canvas();
    let (wall, _) = door_and_wall(&mut canvas);
    assert!(canvas.delete_element(wall));
    assert!(!canvas.delete_element(wall));
    assert_eq!(canvas.element_count(), 1);
}

#[test]
fn test_zoom_fit_centers_image() {
    let mut canvas = Canvas::with_size(1000.0, 800.0);
    canvas.load_image(floorscan_canvas::FloorImage::new("wide.png", 2000, 500).unwrap());
    let zoom = canvas.zoom();
    assert!((zoom - 0.475).abs() < 1e-12);
    let (l, t) = canvas.image_to_screen(0.0, 0.0);
    let (r, b) = canvas.image_to_screen(2000.0, 500.0);
    assert!(((l + r) / 2.0 - 500.0).abs() < 1e-9);
    assert!(((t + b) / 2.0 - 400.0).abs() < 1e-9);
}
