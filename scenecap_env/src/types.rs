//! Sensor observation types shared between the engine and the capture loop.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Uuid of the first-person color camera.
pub const COLOR_SENSOR: &str = "color_sensor_1st_person";

/// Uuid of the depth camera.
pub const DEPTH_SENSOR: &str = "depth_sensor";

/// Uuid of the semantic segmentation camera.
pub const SEMANTIC_SENSOR: &str = "semantic_sensor";

/// A raw buffer produced by one sensor for one simulated step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SensorBuffer {
    /// RGBA8 pixels, row-major, `width * height * 4` bytes
    Color {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },

    /// Per-pixel depth in meters, row-major
    Depth {
        width: u32,
        height: u32,
        meters: Vec<f32>,
    },

    /// Per-pixel instance/class ids, row-major
    Semantic {
        width: u32,
        height: u32,
        ids: Vec<u32>,
    },
}

/// The full sensor output for one simulated step: a named mapping of
/// sensor uuid to raw buffer. Ephemeral; the capture loop appends these
/// to the trajectory record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub buffers: BTreeMap<String, SensorBuffer>,
}

impl Observation {
    /// Inserts a buffer under the given sensor uuid.
    pub fn insert(&mut self, uuid: &str, buffer: SensorBuffer) {
        self.buffers.insert(uuid.to_string(), buffer);
    }

    /// Looks up a buffer by sensor uuid.
    pub fn get(&self, uuid: &str) -> Option<&SensorBuffer> {
        self.buffers.get(uuid)
    }

    /// Returns the color buffer, if the color sensor was configured.
    pub fn color(&self) -> Option<&SensorBuffer> {
        self.get(COLOR_SENSOR)
    }

    /// Returns the depth buffer, if the depth sensor was configured.
    pub fn depth(&self) -> Option<&SensorBuffer> {
        self.get(DEPTH_SENSOR)
    }

    /// Returns the semantic buffer, if the semantic sensor was configured.
    pub fn semantic(&self) -> Option<&SensorBuffer> {
        self.get(SEMANTIC_SENSOR)
    }
}
