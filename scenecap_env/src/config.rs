//! Engine configuration schema.
//!
//! This is the shape the engine consumes: one simulator block plus a list
//! of agent specs, each agent carrying its sensor specifications.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a camera sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    Color,
    Depth,
    Semantic,
}

/// Camera projection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorSubtype {
    Pinhole,
}

/// Specification of one camera sensor on the agent rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    /// Sensor uuid, used as the observation key
    pub uuid: String,

    /// Sensor kind (color / depth / semantic)
    pub kind: SensorKind,

    /// Resolution as [height, width]
    pub resolution: [u32; 2],

    /// Mounting position relative to the agent, in meters
    pub position: [f32; 3],

    /// Mounting orientation as [pitch, yaw, roll] in radians
    pub orientation: [f32; 3],

    /// Projection model
    pub subtype: SensorSubtype,
}

/// Specification of one agent and its sensor rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub sensor_specifications: Vec<SensorSpec>,
}

/// Complete engine configuration: simulator block plus agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// GPU device to render on
    pub gpu_device_id: u32,

    /// Scene dataset config file path
    pub scene_dataset_config_file: PathBuf,

    /// Scene handle to load ("NONE" loads the empty stage)
    pub scene_id: String,

    /// Whether to run dynamics simulation
    pub enable_physics: bool,

    /// Agent specifications (this system always configures exactly one)
    pub agents: Vec<AgentSpec>,
}

impl EngineConfig {
    /// Returns the shared sensor resolution as (width, height).
    ///
    /// The engine requires all sensors on an agent to share one
    /// resolution, so the first sensor spec is authoritative.
    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.agents
            .first()
            .and_then(|a| a.sensor_specifications.first())
            .map(|s| (s.resolution[1], s.resolution[0]))
    }
}
