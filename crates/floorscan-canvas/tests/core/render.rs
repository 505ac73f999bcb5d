use floorscan_canvas::{
    Canvas, Element, FloorImage, InteractionMode, Opening, PointerButton, RenderFrame,
};
use floorscan_core::{shared, Layer, OcrLayers, OcrPoint, Point};

use crate::common::identity_canvas;

#[test]
fn test_no_frame_before_image() {
    let mut canvas = Canvas::with_size(800.0, 600.0);
    let frames = shared(Vec::<RenderFrame>::new());
    let f = frames.clone();
    canvas.set_render_sink(move |frame: &RenderFrame| f.borrow_mut().push(frame.clone()));
    canvas.load_elements(vec![Element::Door(Opening::new(Point::new(1.0, 1.0), "single", 30.0))]);
    assert!(frames.borrow().is_empty());
    assert!(canvas.last_frame().is_none());
    assert!(canvas.svg_document().is_none());

    canvas.load_image(FloorImage::new("plan.png", 400, 300).unwrap());
    assert!(!frames.borrow().is_empty());
}

#[test]
fn test_image_and_overlay_share_transform() {
    let mut canvas = identity_canvas();
    canvas.load_elements(vec![Element::Door(Opening::new(
        Point::new(100.0, 50.0),
        "single",
        30.0,
    ))]);
    canvas.apply_zoom(3.0, 200.0, 100.0).unwrap();
    canvas.pan_by(15.0, -5.0).unwrap();

    let frame = canvas.last_frame().unwrap();
    assert_eq!(frame.transform, canvas.transform());
    let t = frame.transform;
    assert_eq!((frame.image.x, frame.image.y), (t.pan_x, t.pan_y));
    assert_eq!(frame.image.width, 1000.0 * t.zoom);
    let door = &frame.elements[0];
    assert_eq!(door.anchor, t.image_to_screen(100.0, 50.0));
}

#[test]
fn test_every_transform_change_pushes_a_frame() {
    let mut canvas = identity_canvas();
    let count = shared(0usize);
    let c = count.clone();
    canvas.set_render_sink(move |_: &RenderFrame| *c.borrow_mut() += 1);
    let after_install = *count.borrow();

    canvas.wheel(-1.0, 10.0, 10.0);
    canvas.pointer_down(500.0, 500.0, PointerButton::Primary);
    canvas.pointer_move(510.0, 500.0);
    canvas.pointer_up(510.0, 500.0, PointerButton::Primary);
    canvas.zoom_fit().unwrap();

    assert!(*count.borrow() >= after_install + 3);
}

#[test]
fn test_raw_layer_visibility() {
    let mut canvas = identity_canvas();
    let mut layers = OcrLayers::new();
    layers.doors = vec![OcrPoint::new(10.0, 10.0)];
    layers.kitchen = vec![OcrPoint::new(20.0, 20.0), OcrPoint::new(30.0, 30.0)];
    canvas.load_ocr(layers);

    assert_eq!(canvas.last_frame().unwrap().raw_points.len(), 3);

    canvas.set_layer_visible(Layer::Kitchen, false);
    let frame = canvas.last_frame().unwrap();
    assert_eq!(frame.raw_points.len(), 1);
    assert_eq!(frame.raw_points[0].layer, Layer::Doors);
    // Hiding a layer keeps its elements
    assert_eq!(frame.elements.len(), 3);
    assert_eq!(canvas.element_count(), 3);
}

#[test]
fn test_selection_and_calibration_in_frame() {
    let mut canvas = identity_canvas();
    let ids = canvas.load_elements(vec![Element::Door(Opening::new(
        Point::new(100.0, 100.0),
        "single",
        30.0,
    ))]);
    canvas.select(ids[0]);
    assert_eq!(canvas.last_frame().unwrap().selected().map(|p| p.id), Some(ids[0]));

    canvas.set_mode(InteractionMode::Calibrate);
    canvas.pointer_down(10.0, 10.0, PointerButton::Primary);
    let cal = canvas.last_frame().unwrap().calibration.clone().unwrap();
    assert_eq!(cal.start, (10.0, 10.0));
    assert!(cal.end.is_none());

    let svg = canvas.svg_document().unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"href="plan.png""#));
    assert!(svg.contains(r#"id="calibration""#));
    assert!(svg.contains(&format!(r#"data-id="{}""#, ids[0].0)));
}
