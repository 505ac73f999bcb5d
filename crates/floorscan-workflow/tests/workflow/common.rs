use async_trait::async_trait;
use floorscan_canvas::FloorImage;
use floorscan_core::{OcrLayers, OcrPoint, ScaleHint};
use floorscan_settings::{Config, ProjectConfig};
use floorscan_workflow::{
    AnalysisResponse, FloorAnalyzer, WorkflowController, WorkflowError, WorkflowResult,
};

pub fn controller(story_count: u32) -> WorkflowController {
    WorkflowController::new(Config {
        project: ProjectConfig {
            story_count,
            ..ProjectConfig::default()
        },
        ..Config::default()
    })
    .unwrap()
}

pub fn image(name: &str) -> FloorImage {
    FloorImage::new(name, 1000, 800).unwrap()
}

/// The 100x80 px rectangle, ordered 0..3, with one door on the top wall.
pub fn rectangle_layers() -> OcrLayers {
    let mut layers = OcrLayers::new();
    layers.exterior_walls = vec![
        OcrPoint::new(0.0, 0.0).with_order(0.0),
        OcrPoint::new(100.0, 0.0).with_order(1.0),
        OcrPoint::new(100.0, 80.0).with_order(2.0),
        OcrPoint::new(0.0, 80.0).with_order(3.0),
    ];
    layers.doors = vec![OcrPoint::new(50.0, 2.0).with_facing("north")];
    layers
}

pub fn response(layers: OcrLayers, pixels_per_foot: f64) -> AnalysisResponse {
    AnalysisResponse {
        layers,
        scale: ScaleHint::detected(pixels_per_foot, 0.8),
    }
}

/// Attaches an image and stores one successful analysis.
pub fn analyzed_floor(controller: &mut WorkflowController, floor: u32, pixels_per_foot: f64) {
    controller
        .set_floor_image(floor, image(&format!("level{}.png", floor)))
        .unwrap();
    let ticket = controller.begin_analysis(floor).unwrap();
    controller
        .complete_analysis(ticket, response(rectangle_layers(), pixels_per_foot))
        .unwrap();
}

/// Puts the canvas at zoom 1, zero pan, so screen and image coincide.
pub fn identity_view(controller: &mut WorkflowController) {
    let canvas = controller.canvas_mut();
    canvas.set_viewport_size(1000.0, 800.0).unwrap();
    canvas.apply_zoom(1.0, 0.0, 0.0).unwrap();
    canvas.set_pan(0.0, 0.0).unwrap();
}

pub struct StaticAnalyzer(pub AnalysisResponse);

#[async_trait]
impl FloorAnalyzer for StaticAnalyzer {
    async fn analyze(&self, _floor: u32, _image: &FloorImage) -> WorkflowResult<AnalysisResponse> {
        tokio::task::yield_now().await;
        Ok(self.0.clone())
    }
}

pub struct FailingAnalyzer;

#[async_trait]
impl FloorAnalyzer for FailingAnalyzer {
    async fn analyze(&self, floor: u32, _image: &FloorImage) -> WorkflowResult<AnalysisResponse> {
        Err(WorkflowError::analysis(floor, "service unavailable"))
    }
}
