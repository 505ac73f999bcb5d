//! Backdrop image decoding.
//!
//! Decoding happens here, never in the canvas. The canvas receives only the
//! resulting [`FloorImage`] reference and dimensions, after decode succeeded.

use std::path::{Path, PathBuf};

use floorscan_canvas::FloorImage;
use image::ImageReader;

use crate::error::{WorkflowError, WorkflowResult};

/// Decodes an in-memory image. `source` is the reference the canvas will
/// carry for it.
pub fn decode_bytes(source: &str, bytes: &[u8]) -> WorkflowResult<FloorImage> {
    let img = image::load_from_memory(bytes).map_err(|e| WorkflowError::ImageDecode {
        source_ref: source.to_string(),
        reason: e.to_string(),
    })?;
    Ok(FloorImage::new(source, img.width(), img.height())?)
}

/// Decodes an image file, guessing the format from its content.
pub fn decode_file(path: &Path) -> WorkflowResult<FloorImage> {
    let source = path.display().to_string();
    let decode_err = |reason: String| WorkflowError::ImageDecode {
        source_ref: source.clone(),
        reason,
    };

    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| decode_err(e.to_string()))?;

    tracing::debug!("Decoded {} ({}x{})", source, img.width(), img.height());
    Ok(FloorImage::new(source.clone(), img.width(), img.height())?)
}

/// Decodes an image file on the blocking pool.
pub async fn load_image(path: impl Into<PathBuf>) -> WorkflowResult<FloorImage> {
    let path = path.into();
    tokio::task::spawn_blocking(move || decode_file(&path))
        .await
        .map_err(|e| WorkflowError::Task(e.to_string()))?
}
