use chrono::{TimeZone, Utc};
use floorscan_canvas::{ElementKind, PointerButton};
use floorscan_core::ScaleHint;
use floorscan_workflow::{AnalysisResponse, WorkflowError};

use crate::common::{analyzed_floor, controller, identity_view, image, rectangle_layers};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_rectangle_exports_ten_by_eight() {
    let mut c = controller(1);
    analyzed_floor(&mut c, 1, 10.0);
    c.select_floor(1).unwrap();
    c.accept_floor(1).unwrap();

    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let m = c.export_manifest_at(at).unwrap();

    assert_eq!(m.scan_meta.exported_at, "2026-03-01T12:00:00+00:00");
    assert_eq!(m.scan_meta.story_count, 1);
    assert_eq!(
        m.floors[0].boundary,
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 8.0], [0.0, 8.0]]
    );
    assert_eq!(m.floors[0].level, "Level 1");

    let lengths: Vec<f64> = m.walls.iter().map(|w| w.length()).collect();
    assert_eq!(lengths.len(), 4);
    assert!(lengths.iter().all(|l| approx(*l, 10.0) || approx(*l, 8.0)));
    assert!(m.walls.iter().all(|w| w.structural && w.level == "Level 1"));
    // Last wall closes the loop
    assert_eq!(m.walls[3].end, m.walls[0].start);

    assert_eq!(m.fixtures.len(), 1);
    let door = &m.fixtures[0];
    assert_eq!(door.family, "Doors");
    assert_eq!(door.fixture_type, "single");
    assert_eq!(door.rotation_deg, 270.0);
    assert_eq!(door.point, [5.0, 0.2]);
    assert_eq!(door.host_wall_index, Some(0));
}

#[test]
fn test_export_gated_on_every_floor() {
    let mut c = controller(2);
    analyzed_floor(&mut c, 1, 10.0);
    analyzed_floor(&mut c, 2, 20.0);

    c.accept_floor(2).unwrap();
    assert!(!c.can_export());
    assert!(c.export_manifest().is_none());

    c.accept_floor(1).unwrap();
    assert!(c.can_export());
    let m = c.export_manifest().unwrap();
    let levels: Vec<&str> = m.floors.iter().map(|f| f.level.as_str()).collect();
    assert_eq!(levels, vec!["Level 1", "Level 2"]);
    assert_eq!(m.walls.len(), 8);
    assert_eq!(m.walls_on("Level 2").count(), 4);
    // Each floor uses its own scale
    assert_eq!(m.floors[1].boundary[2], [5.0, 4.0]);
    assert_eq!(m.floors[1].floor_type, c.project().upper_floor_type);
    // Host index points into the global wall list
    assert_eq!(m.fixtures[1].host_wall_index, Some(4));

    assert!(c.revoke_acceptance(1).unwrap());
    assert!(!c.revoke_acceptance(1).unwrap());
    assert!(c.export_manifest().is_none());
}

#[test]
fn test_export_needs_a_scale() {
    let mut c = controller(1);
    c.set_floor_image(1, image("a.png")).unwrap();
    let ticket = c.begin_analysis(1).unwrap();
    c.complete_analysis(
        ticket,
        AnalysisResponse {
            layers: rectangle_layers(),
            scale: ScaleHint::default(),
        },
    )
    .unwrap();
    c.accept_floor(1).unwrap();
    assert!(c.export_manifest().is_none());

    c.set_pixels_per_foot(1, 10.0).unwrap();
    assert!(c.export_manifest().is_some());
}

#[test]
fn test_uncalibrated_floor_left_out() {
    let mut c = controller(2);
    analyzed_floor(&mut c, 1, 10.0);
    c.set_floor_image(2, image("b.png")).unwrap();
    let ticket = c.begin_analysis(2).unwrap();
    c.complete_analysis(
        ticket,
        AnalysisResponse {
            layers: rectangle_layers(),
            scale: ScaleHint::default(),
        },
    )
    .unwrap();
    c.accept_floor(1).unwrap();
    c.accept_floor(2).unwrap();

    let m = c.export_manifest().unwrap();
    assert_eq!(m.floors.len(), 1);
    assert!(m.walls.iter().all(|w| w.level == "Level 1"));
}

#[test]
fn test_accept_requires_analysis() {
    let mut c = controller(1);
    c.set_floor_image(1, image("a.png")).unwrap();
    assert!(matches!(c.accept_floor(1), Err(WorkflowError::NotAnalyzed(1))));
    assert!(matches!(
        c.accept_floor(3),
        Err(WorkflowError::InvalidFloor { floor: 3, .. })
    ));
}

#[test]
fn test_active_floor_freezes_edits() {
    let mut c = controller(1);
    analyzed_floor(&mut c, 1, 10.0);
    c.select_floor(1).unwrap();
    identity_view(&mut c);

    // Drag the door 10px right before accepting
    c.pointer_down(50.0, 2.0, PointerButton::Primary);
    c.pointer_move(60.0, 2.0);
    c.pointer_up(60.0, 2.0, PointerButton::Primary);
    assert_eq!(c.accept_floor(1).unwrap(), 5);

    // Edits after acceptance do not reach the frozen set
    let door = c
        .canvas()
        .elements()
        .find(|(_, el)| el.kind() == ElementKind::Door)
        .map(|(id, _)| id)
        .unwrap();
    assert!(c.canvas_mut().delete_element(door));

    let m = c.export_manifest().unwrap();
    assert_eq!(m.fixtures.len(), 1);
    assert_eq!(m.fixtures[0].point, [6.0, 0.2]);
}

#[test]
fn test_scale_round_trip_through_export() {
    let mut c = controller(1);
    analyzed_floor(&mut c, 1, 1.0);
    c.select_floor(1).unwrap();
    identity_view(&mut c);

    // The top wall is 100px long; call it 12.5 ft
    c.start_calibration().unwrap();
    c.pointer_down(0.0, 0.0, PointerButton::Primary);
    c.pointer_down(100.0, 0.0, PointerButton::Primary);
    let ratio = c.apply_calibration(12.5).unwrap();
    assert_eq!(ratio.pixels_per_foot(), 8.0);

    c.accept_floor(1).unwrap();
    let m = c.export_manifest().unwrap();
    assert!(approx(m.walls[0].length(), 12.5));
}
