//! SVG projection of the canvas state.
//!
//! A [`RenderFrame`] is rebuilt from the element store after every change.
//! Image placement and overlay primitives are computed from one
//! [`ViewTransform`] so the backdrop and the vector overlay never drift
//! apart. Frames are output only; nothing reads state back from them.

use std::fmt::Write as _;

use floorscan_core::{Layer, Point};
use serde::Serialize;

use crate::model::{Element, ElementId, ElementKind, Opening, WallCategory};
use crate::viewport::ViewTransform;
use crate::Canvas;

const FIXTURE_MARKER_RADIUS: f64 = 6.0;
const RAW_MARKER_RADIUS: f64 = 3.0;
const CALIBRATION_MARKER_RADIUS: f64 = 5.0;
const SELECTION_COLOR: &str = "#f1c40f";

/// Screen-space rectangle the backdrop image is drawn into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    pub source: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One element drawn as SVG path data in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementPrimitive {
    pub id: ElementId,
    pub kind: ElementKind,
    pub selected: bool,
    pub path: String,
    pub stroke: &'static str,
    /// Fixture tag, drawn beside the marker.
    pub label: Option<String>,
    pub anchor: (f64, f64),
}

/// A raw OCR point drawn on a visible layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMarker {
    pub layer: Layer,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

/// The reference line being placed in calibrate mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationOverlay {
    pub start: (f64, f64),
    pub end: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub transform: ViewTransform,
    pub width: f64,
    pub height: f64,
    pub image: ImagePlacement,
    pub elements: Vec<ElementPrimitive>,
    pub raw_points: Vec<RawMarker>,
    pub calibration: Option<CalibrationOverlay>,
}

impl RenderFrame {
    pub fn selected(&self) -> Option<&ElementPrimitive> {
        self.elements.iter().find(|p| p.selected)
    }

    pub fn primitive(&self, id: ElementId) -> Option<&ElementPrimitive> {
        self.elements.iter().find(|p| p.id == id)
    }
}

/// Receives every frame the canvas produces.
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

impl<F> RenderSink for F
where
    F: FnMut(&RenderFrame),
{
    fn present(&mut self, frame: &RenderFrame) {
        self(frame)
    }
}

/// Builds a frame for the canvas. Returns `None` until an image is loaded.
pub fn build_frame(canvas: &Canvas) -> Option<RenderFrame> {
    let image = canvas.image()?;
    let t = canvas.transform();

    let (x, y) = t.image_to_screen(0.0, 0.0);
    let placement = ImagePlacement {
        source: image.source.clone(),
        x,
        y,
        width: image.width_f64() * t.zoom,
        height: image.height_f64() * t.zoom,
    };

    let selected = canvas.selected_id();
    let elements = canvas
        .elements()
        .map(|(id, el)| render_element(id, el, &t, selected == Some(id)))
        .collect();

    let raw_points = canvas
        .raw_layers()
        .iter()
        .filter(|(layer, _)| canvas.is_layer_visible(*layer))
        .map(|(layer, p)| {
            let (sx, sy) = t.image_to_screen(p.x, p.y);
            RawMarker {
                layer,
                x: sx,
                y: sy,
                color: layer.color(),
            }
        })
        .collect();

    let line = canvas.calibration_line();
    let calibration = line.start.map(|a| CalibrationOverlay {
        start: t.image_point_to_screen(&a),
        end: line.end.map(|b| t.image_point_to_screen(&b)),
    });

    Some(RenderFrame {
        transform: t,
        width: canvas.viewport().canvas_width(),
        height: canvas.viewport().canvas_height(),
        image: placement,
        elements,
        raw_points,
        calibration,
    })
}

fn render_element(id: ElementId, el: &Element, t: &ViewTransform, selected: bool) -> ElementPrimitive {
    let kind = el.kind();
    let anchor = t.image_point_to_screen(&el.center());
    let (path, stroke, label) = match el {
        Element::Wall(w) => {
            let (x1, y1) = t.image_point_to_screen(&w.start);
            let (x2, y2) = t.image_point_to_screen(&w.end);
            let stroke = match w.category {
                WallCategory::Exterior => "#2c3e50",
                WallCategory::Interior => "#7f8c8d",
            };
            (format!("M {} {} L {} {} ", x1, y1, x2, y2), stroke, None)
        }
        Element::Door(o) => (door_path(o, t), Layer::Doors.color(), None),
        Element::Window(o) => (window_path(o, t), Layer::Windows.color(), None),
        Element::Fixture(f) => (
            circle_path(anchor.0, anchor.1, FIXTURE_MARKER_RADIUS),
            f.kind.layer().color(),
            Some(f.tag.clone()),
        ),
    };

    ElementPrimitive {
        id,
        kind,
        selected,
        path,
        stroke,
        label,
        anchor,
    }
}

/// Unit vectors along and across an opening's rotation.
fn opening_axes(o: &Opening) -> (Point, Point) {
    let r = o.rotation_deg.to_radians();
    (Point::new(r.cos(), r.sin()), Point::new(-r.sin(), r.cos()))
}

/// Door: the opening line, the leaf at the hinge and the swing arc.
fn door_path(o: &Opening, t: &ViewTransform) -> String {
    let (u, n) = opening_axes(o);
    let half = o.width_px / 2.0;
    let hinge = o.center.offset(-u.x * half, -u.y * half);
    let strike = o.center.offset(u.x * half, u.y * half);
    let leaf = hinge.offset(n.x * o.width_px, n.y * o.width_px);

    let (hx, hy) = t.image_point_to_screen(&hinge);
    let (sx, sy) = t.image_point_to_screen(&strike);
    let (lx, ly) = t.image_point_to_screen(&leaf);
    let r = o.width_px * t.zoom;

    format!(
        "M {} {} L {} {} M {} {} L {} {} A {} {} 0 0 0 {} {} ",
        hx, hy, sx, sy, hx, hy, lx, ly, r, r, sx, sy
    )
}

/// Window: a thin closed rectangle along the wall.
fn window_path(o: &Opening, t: &ViewTransform) -> String {
    let (u, n) = opening_axes(o);
    let half = o.width_px / 2.0;
    let depth = o.width_px * 0.075;

    let corners = [
        o.center.offset(-u.x * half - n.x * depth, -u.y * half - n.y * depth),
        o.center.offset(u.x * half - n.x * depth, u.y * half - n.y * depth),
        o.center.offset(u.x * half + n.x * depth, u.y * half + n.y * depth),
        o.center.offset(-u.x * half + n.x * depth, -u.y * half + n.y * depth),
    ];

    let mut path = String::new();
    for (i, c) in corners.iter().enumerate() {
        let (x, y) = t.image_point_to_screen(c);
        let cmd = if i == 0 { "M" } else { "L" };
        path.push_str(&format!("{} {} {} ", cmd, x, y));
    }
    path.push_str("Z ");
    path
}

fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    format!(
        "M {} {} A {} {} 0 1 0 {} {} A {} {} 0 1 0 {} {} Z ",
        cx - r,
        cy,
        r,
        r,
        cx + r,
        cy,
        r,
        r,
        cx - r,
        cy
    )
}

/// Renders a frame as a standalone SVG document.
pub fn svg_document(frame: &RenderFrame) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height
    );
    let img = &frame.image;
    let _ = writeln!(
        svg,
        r#"  <image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
        escape_xml(&img.source),
        img.x,
        img.y,
        img.width,
        img.height
    );

    let _ = writeln!(svg, r#"  <g id="raw-points">"#);
    for m in &frame.raw_points {
        let _ = writeln!(
            svg,
            r#"    <circle class="{}" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            m.layer, m.x, m.y, RAW_MARKER_RADIUS, m.color
        );
    }
    let _ = writeln!(svg, "  </g>");

    let _ = writeln!(svg, r#"  <g id="elements" fill="none">"#);
    for p in &frame.elements {
        let stroke = if p.selected { SELECTION_COLOR } else { p.stroke };
        let width = if p.kind == ElementKind::Wall { 3 } else { 2 };
        let _ = writeln!(
            svg,
            r#"    <path data-id="{}" d="{}" stroke="{}" stroke-width="{}"/>"#,
            p.id.0,
            p.path.trim_end(),
            stroke,
            width
        );
        if let Some(label) = &p.label {
            let _ = writeln!(
                svg,
                r#"    <text x="{}" y="{}" font-size="10" fill="{}">{}</text>"#,
                p.anchor.0 + FIXTURE_MARKER_RADIUS + 2.0,
                p.anchor.1,
                p.stroke,
                escape_xml(label)
            );
        }
    }
    let _ = writeln!(svg, "  </g>");

    if let Some(cal) = &frame.calibration {
        let _ = writeln!(svg, r##"  <g id="calibration" stroke="#e84393" fill="#e84393">"##);
        let _ = writeln!(
            svg,
            r#"    <circle cx="{}" cy="{}" r="{}"/>"#,
            cal.start.0, cal.start.1, CALIBRATION_MARKER_RADIUS
        );
        if let Some(end) = cal.end {
            let _ = writeln!(
                svg,
                r#"    <circle cx="{}" cy="{}" r="{}"/>"#,
                end.0, end.1, CALIBRATION_MARKER_RADIUS
            );
            let _ = writeln!(
                svg,
                r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="2" stroke-dasharray="6 4"/>"#,
                cal.start.0, cal.start.1, end.0, end.1
            );
        }
        let _ = writeln!(svg, "  </g>");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
