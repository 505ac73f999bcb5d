use floorscan_canvas::hit_test::{find_element_at, PickRadii};
use floorscan_canvas::{Element, ElementStore, Opening, Viewport, Wall, WallCategory};
use floorscan_core::Point;
use proptest::prelude::*;

fn viewport_with(zoom: f64, pan_x: f64, pan_y: f64) -> Viewport {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(zoom);
    vp.set_pan(pan_x, pan_y);
    vp
}

proptest! {
    #[test]
    fn screen_image_round_trip(
        zoom in 0.1f64..12.0,
        pan_x in -5000.0f64..5000.0,
        pan_y in -5000.0f64..5000.0,
        sx in -2000.0f64..4000.0,
        sy in -2000.0f64..4000.0,
    ) {
        let vp = viewport_with(zoom, pan_x, pan_y);
        let p = vp.screen_to_image(sx, sy);
        let (bx, by) = vp.image_to_screen(p.x, p.y);
        prop_assert!((bx - sx).abs() < 1e-6);
        prop_assert!((by - sy).abs() < 1e-6);
    }

    #[test]
    fn zoom_keeps_anchor_fixed(
        zoom in 0.1f64..12.0,
        target in 0.1f64..12.0,
        pan_x in -2000.0f64..2000.0,
        pan_y in -2000.0f64..2000.0,
        ax in 0.0f64..1200.0,
        ay in 0.0f64..800.0,
    ) {
        let mut vp = viewport_with(zoom, pan_x, pan_y);
        let before = vp.screen_to_image(ax, ay);
        vp.apply_zoom(target, ax, ay);
        let after = vp.screen_to_image(ax, ay);
        prop_assert!((before.x - after.x).abs() < 1e-6);
        prop_assert!((before.y - after.y).abs() < 1e-6);
    }

    #[test]
    fn pick_radius_is_zoom_invariant(
        z1 in 0.1f64..12.0,
        z2 in 0.1f64..12.0,
        d in 0.0f64..14.5,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        // A door `d` screen pixels from the cursor is hit at every zoom
        let mut store = ElementStore::new();
        let id = store.add(Element::Door(Opening::new(Point::new(500.0, 400.0), "single", 30.0)));
        let radii = PickRadii::default();

        for zoom in [z1, z2] {
            let r = d / zoom;
            let cursor = Point::new(500.0 + r * angle.cos(), 400.0 + r * angle.sin());
            prop_assert_eq!(find_element_at(&store, &cursor, zoom, &radii), Some(id));
        }
    }

    #[test]
    fn wall_pick_radius_is_zoom_invariant(
        z1 in 0.1f64..12.0,
        z2 in 0.1f64..12.0,
        d in 0.0f64..30.0,
    ) {
        let mut store = ElementStore::new();
        let id = store.add(Element::Wall(Wall::new(
            Point::new(0.0, 0.0),
            Point::new(1000.0, 0.0),
            WallCategory::Exterior,
        )));
        let radii = PickRadii::default();

        let hit = |zoom: f64| find_element_at(&store, &Point::new(500.0, d / zoom), zoom, &radii);
        if d < 7.99 {
            prop_assert_eq!(hit(z1), Some(id));
            prop_assert_eq!(hit(z2), Some(id));
        } else if d > 8.01 {
            prop_assert_eq!(hit(z1), None);
            prop_assert_eq!(hit(z2), None);
        }
    }
}
