//! Core engine trait for scene capture.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::Observation;
use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::path::Path;

/// The central interface to the simulation engine.
///
/// The engine owns the scene graph, the physics state, and the sensor
/// pipeline; this trait exposes only what the capture orchestration
/// needs. The handle is a shared, mutable, non-thread-safe resource:
/// all access is serialized by construction (one control loop, one
/// thread), so the trait is deliberately `&mut self` and not `Sync`.
///
/// # Implementations
///
/// - [`SyntheticEngine`](crate::SyntheticEngine) - deterministic,
///   in-process, seed-driven
/// - A binding to an external engine process would implement the same
///   surface
pub trait SceneEngine {
    /// Enumerates the scene handles the loaded dataset provides.
    fn scene_handles(&self) -> Vec<String>;

    /// Returns the simulated world time in seconds.
    fn world_time(&self) -> f64;

    /// Advances physics by `dt` simulated seconds.
    ///
    /// Blocks until the full increment has been simulated.
    fn step_physics(&mut self, dt: f64) -> Result<(), EngineError>;

    /// Retrieves the full sensor observation set for the agent's
    /// current pose.
    fn sensor_observations(&mut self) -> Result<Observation, EngineError>;

    /// Returns the agent scene node's translation.
    fn agent_translation(&self) -> Vector3<f32>;

    /// Sets the agent scene node's translation.
    fn set_agent_translation(&mut self, translation: Vector3<f32>);

    /// Rotates the agent scene node by `angle_rad` around `axis`
    /// (local rotation, composed onto the current orientation).
    fn rotate_agent(&mut self, angle_rad: f32, axis: Unit<Vector3<f32>>);

    /// Returns the agent scene node's rotation.
    fn agent_rotation(&self) -> UnitQuaternion<f32>;

    /// Returns the horizontal field of view of the named sensor, in
    /// degrees.
    fn sensor_hfov_deg(&self, uuid: &str) -> Result<f64, EngineError>;

    /// Loads object template configs from a directory, returning the
    /// number of templates registered.
    fn load_object_templates(&mut self, dir: &Path) -> Result<usize, EngineError>;

    /// Tears down the engine. Further operations fail with
    /// [`EngineError::Closed`].
    fn close(&mut self);
}

/// Builds engine handles from an assembled configuration.
///
/// The session owns a factory so that `rebuild` can construct a fresh
/// handle whenever settings change.
pub trait EngineFactory {
    fn build(&self, config: &EngineConfig) -> Result<Box<dyn SceneEngine>, EngineError>;
}
