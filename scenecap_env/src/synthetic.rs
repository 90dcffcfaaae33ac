//! Deterministic synthetic engine.
//!
//! Stands in for an external simulation engine: it keeps the agent pose
//! and world clock, and fabricates sensor buffers from a seeded RNG so
//! that capture runs are fully reproducible. No rendering or physics is
//! performed; the buffers only need to be deterministic and well-formed.

use crate::config::{EngineConfig, SensorKind};
use crate::engine::{EngineFactory, SceneEngine};
use crate::error::EngineError;
use crate::types::{Observation, SensorBuffer};
use nalgebra::{Unit, UnitQuaternion, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::debug;

/// Mixing constant for seed derivation (splitmix64 increment).
const SEED_MIX: u64 = 0x9e3779b97f4a7c15;

/// Scene instance files carry this suffix in the dataset tree.
const SCENE_SUFFIX: &str = ".scene_instance.json";

/// Object template configs carry this suffix.
const OBJECT_SUFFIX: &str = ".object_config.json";

fn mix(seed: u64, value: u64) -> u64 {
    seed.wrapping_mul(SEED_MIX) ^ value
}

fn hash_str(s: &str) -> u64 {
    // FNV-1a, enough to give distinct scenes distinct buffer content
    let mut h: u64 = 0xcbf29ce484222325;
    for b in s.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

/// In-process deterministic engine implementation.
pub struct SyntheticEngine {
    config: EngineConfig,
    scene_seed: u64,
    handles: Vec<String>,
    translation: Vector3<f32>,
    rotation: UnitQuaternion<f32>,
    world_time: f64,
    object_templates: Vec<String>,
    closed: bool,
}

impl SyntheticEngine {
    /// Constructs an engine from a configuration and a master seed.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        if config.agents.is_empty() {
            return Err(EngineError::construction("configuration has no agents"));
        }
        let resolutions: Vec<[u32; 2]> = config.agents[0]
            .sensor_specifications
            .iter()
            .map(|s| s.resolution)
            .collect();
        if resolutions.windows(2).any(|w| w[0] != w[1]) {
            return Err(EngineError::construction(
                "all sensors must have the same resolution",
            ));
        }

        let handles = discover_scene_handles(&config.scene_dataset_config_file);
        let scene_seed = mix(seed, hash_str(&config.scene_id));
        debug!(
            scene = %config.scene_id,
            handles = handles.len(),
            "synthetic engine constructed"
        );

        Ok(Self {
            config,
            scene_seed,
            handles,
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            world_time: 0.0,
            object_templates: Vec::new(),
            closed: false,
        })
    }

    /// Handles of object templates loaded so far.
    pub fn object_template_handles(&self) -> &[String] {
        &self.object_templates
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.closed {
            Err(EngineError::Closed)
        } else {
            Ok(())
        }
    }

    /// Seed for the current frame: scene seed folded with pose and time.
    fn frame_seed(&self) -> u64 {
        let mut s = self.scene_seed;
        s = mix(s, self.translation.x.to_bits() as u64);
        s = mix(s, self.translation.y.to_bits() as u64);
        s = mix(s, self.translation.z.to_bits() as u64);
        let q = self.rotation.as_ref().coords;
        s = mix(s, q.x.to_bits() as u64);
        s = mix(s, q.w.to_bits() as u64);
        s = mix(s, self.world_time.to_bits());
        s
    }

    fn render(&self) -> Observation {
        let mut obs = Observation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(self.frame_seed());

        for spec in &self.config.agents[0].sensor_specifications {
            let [height, width] = spec.resolution;
            let buffer = match spec.kind {
                SensorKind::Color => {
                    let base: [u8; 3] = [rng.gen(), rng.gen(), rng.gen()];
                    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
                    for y in 0..height {
                        for x in 0..width {
                            let gx = (x * 255 / width.max(1)) as u8;
                            let gy = (y * 255 / height.max(1)) as u8;
                            pixels.push(gx.wrapping_add(base[0]));
                            pixels.push(gy.wrapping_add(base[1]));
                            pixels.push(base[2]);
                            pixels.push(255);
                        }
                    }
                    SensorBuffer::Color {
                        width,
                        height,
                        pixels,
                    }
                }
                SensorKind::Depth => {
                    // flat wall at a random range, radially farther at the edges
                    let wall: f32 = rng.gen_range(2.0..8.0);
                    let cx = width as f32 / 2.0;
                    let cy = height as f32 / 2.0;
                    let max_r = (cx * cx + cy * cy).sqrt().max(1.0);
                    let mut meters = Vec::with_capacity((width * height) as usize);
                    for y in 0..height {
                        for x in 0..width {
                            let dx = x as f32 - cx;
                            let dy = y as f32 - cy;
                            let r = (dx * dx + dy * dy).sqrt() / max_r;
                            meters.push(wall + r * 2.0);
                        }
                    }
                    SensorBuffer::Depth {
                        width,
                        height,
                        meters,
                    }
                }
                SensorKind::Semantic => {
                    let region_offset: u32 = rng.gen_range(0..97);
                    let mut ids = Vec::with_capacity((width * height) as usize);
                    for y in 0..height {
                        for x in 0..width {
                            ids.push(x / 32 + y / 32 + region_offset);
                        }
                    }
                    SensorBuffer::Semantic { width, height, ids }
                }
            };
            obs.insert(&spec.uuid, buffer);
        }
        obs
    }
}

impl SceneEngine for SyntheticEngine {
    fn scene_handles(&self) -> Vec<String> {
        self.handles.clone()
    }

    fn world_time(&self) -> f64 {
        self.world_time
    }

    fn step_physics(&mut self, dt: f64) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.world_time += dt;
        Ok(())
    }

    fn sensor_observations(&mut self) -> Result<Observation, EngineError> {
        self.ensure_open()?;
        Ok(self.render())
    }

    fn agent_translation(&self) -> Vector3<f32> {
        self.translation
    }

    fn set_agent_translation(&mut self, translation: Vector3<f32>) {
        self.translation = translation;
    }

    fn rotate_agent(&mut self, angle_rad: f32, axis: Unit<Vector3<f32>>) {
        let delta = UnitQuaternion::from_axis_angle(&axis, angle_rad);
        self.rotation = self.rotation * delta;
    }

    fn agent_rotation(&self) -> UnitQuaternion<f32> {
        self.rotation
    }

    fn sensor_hfov_deg(&self, uuid: &str) -> Result<f64, EngineError> {
        let known = self.config.agents[0]
            .sensor_specifications
            .iter()
            .any(|s| s.uuid == uuid);
        if known {
            // pinhole cameras default to a 90 degree horizontal FOV
            Ok(90.0)
        } else {
            Err(EngineError::UnknownSensor(uuid.to_string()))
        }
    }

    fn load_object_templates(&mut self, dir: &Path) -> Result<usize, EngineError> {
        self.ensure_open()?;
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            // missing template dir is not fatal, nothing gets registered
            Err(_) => return Ok(0),
        };
        let mut loaded = 0;
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(OBJECT_SUFFIX) {
                self.object_templates.push(name);
                loaded += 1;
            }
        }
        self.object_templates.sort();
        Ok(loaded)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Scans the dataset tree next to the dataset config file for scene
/// instance files. Degrades to the "NONE" sentinel when nothing is found.
fn discover_scene_handles(dataset_config: &Path) -> Vec<String> {
    let scenes_dir = dataset_config
        .parent()
        .map(|p| p.join("configs/scenes"))
        .unwrap_or_default();

    let mut handles = Vec::new();
    if let Ok(entries) = std::fs::read_dir(&scenes_dir) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(SCENE_SUFFIX) {
                handles.push(name);
            }
        }
    }
    handles.sort();
    if handles.is_empty() {
        handles.push("NONE".to_string());
    }
    handles
}

/// Factory producing [`SyntheticEngine`] handles from a master seed.
pub struct SyntheticFactory {
    seed: u64,
}

impl SyntheticFactory {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl EngineFactory for SyntheticFactory {
    fn build(&self, config: &EngineConfig) -> Result<Box<dyn SceneEngine>, EngineError> {
        Ok(Box::new(SyntheticEngine::new(config.clone(), self.seed)?))
    }
}
