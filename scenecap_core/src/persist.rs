//! Per-frame image persistence.
//!
//! Writes three PNGs per captured frame: the RGBA color buffer as-is,
//! the semantic buffer recolored through a fixed 40-color palette with
//! index wraparound, and the depth buffer rescaled to 8-bit grayscale.

use crate::error::CaptureError;
use image::{GrayImage, Rgba, RgbaImage};
use scenecap_env::{Observation, SensorBuffer};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Depth rescale ceiling in meters: `byte = depth / 10 * 255`.
pub const MAX_DEPTH_METERS: f32 = 10.0;

/// The d3 40-color palette (category20 + category20b) used to recolor
/// semantic ids. Ids index the palette modulo 40.
pub const D3_40_COLORS_RGB: [[u8; 3]; 40] = [
    [31, 119, 180],
    [174, 199, 232],
    [255, 127, 14],
    [255, 187, 120],
    [44, 160, 44],
    [152, 223, 138],
    [214, 39, 40],
    [255, 152, 150],
    [148, 103, 189],
    [197, 176, 213],
    [140, 86, 75],
    [196, 156, 148],
    [227, 119, 194],
    [247, 182, 210],
    [127, 127, 127],
    [199, 199, 199],
    [188, 189, 34],
    [219, 219, 141],
    [23, 190, 207],
    [158, 218, 229],
    [57, 59, 121],
    [82, 84, 163],
    [107, 110, 207],
    [156, 158, 222],
    [99, 121, 57],
    [140, 162, 82],
    [181, 207, 107],
    [206, 219, 156],
    [140, 109, 49],
    [189, 158, 57],
    [231, 186, 82],
    [231, 203, 148],
    [132, 60, 57],
    [173, 73, 74],
    [214, 97, 107],
    [231, 150, 156],
    [123, 65, 115],
    [165, 81, 148],
    [206, 109, 189],
    [222, 158, 214],
];

/// Maps a semantic id to its palette slot.
pub fn palette_index(id: u32) -> usize {
    (id % 40) as usize
}

/// Converts a semantic id buffer to an RGBA image via the palette.
pub fn semantic_to_rgba(width: u32, height: u32, ids: &[u32]) -> Result<RgbaImage, CaptureError> {
    if ids.len() != (width * height) as usize {
        return Err(CaptureError::MalformedBuffer("semantic".to_string()));
    }
    let mut img = RgbaImage::new(width, height);
    for (pixel, id) in img.pixels_mut().zip(ids) {
        let [r, g, b] = D3_40_COLORS_RGB[palette_index(*id)];
        *pixel = Rgba([r, g, b, 255]);
    }
    Ok(img)
}

/// Converts a depth buffer (meters) to 8-bit grayscale.
///
/// Linear rescale assuming a 10m ceiling; the float-to-u8 cast
/// saturates, so deeper values clip to 255.
pub fn depth_to_gray(width: u32, height: u32, meters: &[f32]) -> Result<GrayImage, CaptureError> {
    if meters.len() != (width * height) as usize {
        return Err(CaptureError::MalformedBuffer("depth".to_string()));
    }
    let bytes: Vec<u8> = meters
        .iter()
        .map(|m| (m / MAX_DEPTH_METERS * 255.0) as u8)
        .collect();
    GrayImage::from_raw(width, height, bytes)
        .ok_or_else(|| CaptureError::MalformedBuffer("depth".to_string()))
}

/// Writes per-frame PNGs under one output directory.
pub struct FrameWriter {
    out_dir: PathBuf,
}

impl FrameWriter {
    /// Creates the writer, creating the output directory if absent.
    pub fn new(out_dir: &Path) -> Result<Self, CaptureError> {
        std::fs::create_dir_all(out_dir)?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Persists the color, semantic, and depth buffers of one
    /// observation as `rgb_image_<idx>.png`, `semantic_image_<idx>.png`,
    /// and `depth_image_<idx>.png`.
    pub fn save_sample(&self, obs: &Observation, idx: u32) -> Result<(), CaptureError> {
        let rgb = match obs.color() {
            Some(SensorBuffer::Color {
                width,
                height,
                pixels,
            }) => RgbaImage::from_raw(*width, *height, pixels.clone())
                .ok_or_else(|| CaptureError::MalformedBuffer("color".to_string()))?,
            _ => return Err(CaptureError::MissingBuffer("color".to_string())),
        };
        rgb.save(self.out_dir.join(format!("rgb_image_{idx}.png")))?;

        let semantic = match obs.semantic() {
            Some(SensorBuffer::Semantic { width, height, ids }) => {
                semantic_to_rgba(*width, *height, ids)?
            }
            _ => return Err(CaptureError::MissingBuffer("semantic".to_string())),
        };
        semantic.save(self.out_dir.join(format!("semantic_image_{idx}.png")))?;

        let depth = match obs.depth() {
            Some(SensorBuffer::Depth {
                width,
                height,
                meters,
            }) => depth_to_gray(*width, *height, meters)?,
            _ => return Err(CaptureError::MissingBuffer("depth".to_string())),
        };
        depth.save(self.out_dir.join(format!("depth_image_{idx}.png")))?;

        trace!(idx, "frame images saved");
        Ok(())
    }
}
