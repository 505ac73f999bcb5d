use floorscan_canvas::conversion::{convert_layers, exterior_walls, interior_walls, ConversionOptions};
use floorscan_canvas::{Canvas, Element, ElementKind, WallCategory};
use floorscan_core::{OcrLayers, OcrPoint};
use proptest::prelude::*;

fn sample_layers() -> OcrLayers {
    let mut layers = OcrLayers::new();
    // Deliberately out of order
    layers.exterior_walls = vec![
        OcrPoint::new(100.0, 80.0).with_order(2.0),
        OcrPoint::new(0.0, 0.0).with_order(0.0),
        OcrPoint::new(0.0, 80.0).with_order(3.0),
        OcrPoint::new(100.0, 0.0).with_order(1.0),
    ];
    layers.interior_walls = vec![
        OcrPoint::new(50.0, 0.0).with_pair("w1").with_tag("start"),
        OcrPoint::new(10.0, 40.0).with_pair("w2").with_tag("start"),
        OcrPoint::new(50.0, 80.0).with_pair("w1").with_tag("end"),
        // w3 has no start and must be dropped
        OcrPoint::new(70.0, 70.0).with_pair("w3").with_tag("end"),
        OcrPoint::new(40.0, 40.0).with_pair("w2").with_tag("end"),
    ];
    layers.doors = vec![OcrPoint::new(50.0, 80.0).with_facing("south").with_width(36.0)];
    layers.windows = vec![OcrPoint::new(100.0, 40.0).with_wall_side("east")];
    layers.plumbing = vec![OcrPoint::new(20.0, 20.0).with_tag("toilet")];
    layers.kitchen = vec![OcrPoint::new(80.0, 20.0)];
    layers
}

#[test]
fn test_exterior_polygon_closes() {
    let walls = exterior_walls(&sample_layers(), &ConversionOptions::default());
    assert_eq!(walls.len(), 4);
    for (i, w) in walls.iter().enumerate() {
        assert_eq!(w.category, WallCategory::Exterior);
        assert!(w.structural);
        assert_eq!(w.end, walls[(i + 1) % walls.len()].start);
    }
    assert_eq!(walls[0].start.x, 0.0);
    assert_eq!(walls[0].end.x, 100.0);
}

#[test]
fn test_interior_pairs_and_dropping() {
    let (walls, dropped) = interior_walls(&sample_layers().interior_walls, &ConversionOptions::default());
    assert_eq!(walls.len(), 2);
    assert_eq!(dropped, vec!["w3".to_string()]);
    // First-seen pair order
    assert_eq!((walls[0].start.x, walls[0].end.y), (50.0, 80.0));
    assert_eq!((walls[1].start.x, walls[1].end.x), (10.0, 40.0));
    assert!(walls.iter().all(|w| w.category == WallCategory::Interior));
}

#[test]
fn test_full_conversion() {
    let geometry = convert_layers(&sample_layers(), &ConversionOptions::default());
    let kinds: Vec<ElementKind> = geometry.elements.iter().map(Element::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Wall,
            ElementKind::Wall,
            ElementKind::Wall,
            ElementKind::Wall,
            ElementKind::Wall,
            ElementKind::Wall,
            ElementKind::Door,
            ElementKind::Window,
            ElementKind::Plumbing,
            ElementKind::Kitchen,
        ]
    );
    match &geometry.elements[6] {
        Element::Door(d) => {
            assert_eq!(d.rotation_deg, 90.0);
            assert_eq!(d.width_px, 36.0);
        }
        other => panic!("expected door, got {:?}", other),
    }
    match &geometry.elements[7] {
        Element::Window(w) => {
            assert_eq!(w.rotation_deg, 90.0);
            assert_eq!(w.width_px, 40.0);
        }
        other => panic!("expected window, got {:?}", other),
    }
    match &geometry.elements[9] {
        Element::Fixture(f) => assert_eq!(f.tag, "kitchen"),
        other => panic!("expected fixture, got {:?}", other),
    }
}

#[test]
fn test_canvas_reload_starts_over() {
    let mut canvas = Canvas::default();
    let first = canvas.load_ocr(sample_layers());
    canvas.move_element(first[6], 0.0, 0.0);
    canvas.delete_element(first[0]);

    let second = canvas.load_ocr(sample_layers());
    assert_eq!(second.len(), first.len());
    // Fresh ids, no overlap with the first pass
    assert!(second.iter().all(|id| !first.contains(id)));
    assert_eq!(
        canvas.snapshot(),
        convert_layers(&sample_layers(), &ConversionOptions::default()).elements
    );
}

proptest! {
    #[test]
    fn exterior_n_points_give_n_closed_walls(
        coords in prop::collection::vec((0.0f64..2000.0, 0.0f64..2000.0), 2..40),
    ) {
        let mut layers = OcrLayers::new();
        // Feed points in reverse order so sorting matters
        layers.exterior_walls = coords
            .iter()
            .enumerate()
            .rev()
            .map(|(i, (x, y))| OcrPoint::new(*x, *y).with_order(i as f64))
            .collect();

        let walls = exterior_walls(&layers, &ConversionOptions::default());
        prop_assert_eq!(walls.len(), coords.len());
        for (i, w) in walls.iter().enumerate() {
            prop_assert_eq!((w.start.x, w.start.y), coords[i]);
            prop_assert_eq!(w.end, walls[(i + 1) % walls.len()].start);
        }
    }

    #[test]
    fn interior_pairing_is_idempotent(
        walls in prop::collection::vec(
            ((0.0f64..1000.0, 0.0f64..1000.0), (0.0f64..1000.0, 0.0f64..1000.0)),
            0..20,
        ),
    ) {
        let mut points = Vec::new();
        for (i, (a, b)) in walls.iter().enumerate() {
            points.push(OcrPoint::new(b.0, b.1).with_pair(i.to_string()).with_tag("end"));
            points.push(OcrPoint::new(a.0, a.1).with_pair(i.to_string()).with_tag("start"));
        }
        let options = ConversionOptions::default();
        let (first, _) = interior_walls(&points, &options);
        let (second, _) = interior_walls(&points, &options);
        prop_assert_eq!(first.len(), walls.len());
        prop_assert_eq!(&first, &second);
        for (w, (a, _)) in first.iter().zip(walls.iter()) {
            prop_assert_eq!((w.start.x, w.start.y), *a);
        }
    }
}
