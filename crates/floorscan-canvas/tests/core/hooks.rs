use floorscan_canvas::{
    Element, ElementEvent, InteractionMode, Key, Opening, PointerButton, Wall, WallCategory,
};
use floorscan_core::{shared, Point};

use crate::common::identity_canvas;

#[derive(Debug, Default)]
struct Log {
    selected: Vec<Option<u64>>,
    moved: Vec<(u64, Point)>,
    rotated: Vec<(u64, Option<f64>)>,
    deleted: Vec<u64>,
    calibrated: Vec<f64>,
}

#[test]
fn test_hooks_fire_with_post_change_state() {
    let mut canvas = identity_canvas();
    let log = shared(Log::default());

    {
        let hooks = canvas.hooks_mut();
        let l = log.clone();
        hooks.set_on_select(move |ev: Option<ElementEvent>| {
            l.borrow_mut().selected.push(ev.map(|e| e.id.0))
        });
        let l = log.clone();
        hooks.set_on_move(move |ev| l.borrow_mut().moved.push((ev.id.0, ev.element.center())));
        let l = log.clone();
        hooks.set_on_rotate(move |ev| {
            l.borrow_mut()
                .rotated
                .push((ev.id.0, ev.element.rotation_deg()))
        });
        let l = log.clone();
        hooks.set_on_delete(move |ev| l.borrow_mut().deleted.push(ev.id.0));
        let l = log.clone();
        hooks.set_on_calibrate(move |px| l.borrow_mut().calibrated.push(px));
    }

    let ids = canvas.load_elements(vec![
        Element::Door(Opening::new(Point::new(100.0, 100.0), "single", 30.0)),
        Element::Wall(Wall::new(
            Point::new(0.0, 400.0),
            Point::new(400.0, 400.0),
            WallCategory::Exterior,
        )),
    ]);
    let door = ids[0].0;

    canvas.pointer_down(100.0, 100.0, PointerButton::Primary);
    canvas.pointer_move(120.0, 110.0);
    canvas.pointer_up(120.0, 110.0, PointerButton::Primary);
    canvas.key_down(Key::Char('r'));
    canvas.key_down(Key::Delete);

    canvas.set_mode(InteractionMode::Calibrate);
    canvas.pointer_down(0.0, 0.0, PointerButton::Primary);
    canvas.pointer_up(0.0, 0.0, PointerButton::Primary);
    canvas.pointer_down(0.0, 250.0, PointerButton::Primary);

    let log = log.borrow();
    assert_eq!(log.selected, vec![Some(door), None]);
    assert_eq!(log.moved, vec![(door, Point::new(120.0, 110.0))]);
    assert_eq!(log.rotated, vec![(door, Some(90.0))]);
    assert_eq!(log.deleted, vec![door]);
    assert_eq!(log.calibrated, vec![250.0]);
}

#[test]
fn test_reselecting_same_element_does_not_refire() {
    let mut canvas = identity_canvas();
    let count = shared(0u32);
    let c = count.clone();
    canvas
        .hooks_mut()
        .set_on_select(move |_| *c.borrow_mut() += 1);

    let ids = canvas.load_elements(vec![Element::Door(Opening::new(
        Point::new(10.0, 10.0),
        "single",
        30.0,
    ))]);
    assert!(canvas.select(ids[0]));
    assert!(canvas.select(ids[0]));
    assert_eq!(*count.borrow(), 1);

    assert!(!canvas.select(floorscan_canvas::ElementId(999)));
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_delete_of_missing_id_fires_nothing() {
    let mut canvas = identity_canvas();
    let deleted = shared(0u32);
    let d = deleted.clone();
    canvas
        .hooks_mut()
        .set_on_delete(move |_| *d.borrow_mut() += 1);
    assert!(!canvas.delete_element(floorscan_canvas::ElementId(7)));
    assert_eq!(*deleted.borrow(), 0);
}
