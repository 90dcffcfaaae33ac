//! Capture settings.
//!
//! A fixed record describing the sensor rig, dataset location, and
//! physics toggle. Built once, then cloned into the session on every
//! rebuild so the session's view never changes under it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scene handle sentinel: loads the empty stage.
pub const NONE_SCENE: &str = "NONE";

/// Settings driving configuration assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Spatial resolution of the observations
    pub width: u32,
    pub height: u32,

    /// Root of the asset tree
    pub data_dir: PathBuf,

    /// Scene dataset config file path
    pub scene_dataset: PathBuf,

    /// Scene handle to load
    pub scene: String,

    /// Index of the agent carrying the sensor rig
    pub default_agent: u32,

    /// Height of the sensors above the agent origin, in meters
    pub sensor_height: f32,

    /// Sensor pitch (x rotation) in radians
    pub sensor_pitch: f32,

    /// Sensor toggles
    pub color_sensor: bool,
    pub depth_sensor: bool,
    pub semantic_sensor: bool,

    /// Master seed for deterministic engines
    pub seed: u64,

    /// Enable dynamics simulation
    pub enable_physics: bool,
}

impl Settings {
    /// Default settings rooted at the given data directory.
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            width: 1280,
            height: 720,
            data_dir: data_dir.to_path_buf(),
            scene_dataset: data_dir.join("replica_cad/replicaCAD.scene_dataset_config.json"),
            scene: NONE_SCENE.to_string(),
            default_agent: 0,
            sensor_height: 1.5,
            sensor_pitch: 0.0,
            color_sensor: true,
            depth_sensor: true,
            semantic_sensor: true,
            seed: 1,
            enable_physics: true,
        }
    }

    /// Directory holding loadable object template configs.
    pub fn object_config_dir(&self) -> PathBuf {
        self.data_dir.join("objects/example_objects")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_data_dir(Path::new("data"))
    }
}
