//! SceneCap Engine Abstraction Layer
//!
//! This crate defines the contract between the capture orchestration and
//! the 3D simulation engine that does the heavy lifting (physics stepping,
//! rendering, sensor simulation, scene graph management).
//!
//! The engine is an opaque collaborator reached through the [`SceneEngine`]
//! trait: configuration construction, lifecycle, physics stepping, sensor
//! observation retrieval, and agent pose mutation. Engines are produced by
//! an [`EngineFactory`], so the driver can be wired against a real engine
//! binding or against the built-in [`SyntheticEngine`].
//!
//! # Determinism
//!
//! [`SyntheticEngine`] derives every buffer it emits from a single 64-bit
//! seed combined with the scene id, the agent pose, and the world time.
//! Two runs with the same seed and the same control inputs produce
//! byte-identical observations, which makes capture bugs reproducible via
//! their seed number.

mod config;
mod engine;
mod error;
mod synthetic;
mod types;

pub use config::{AgentSpec, EngineConfig, SensorKind, SensorSpec, SensorSubtype};
pub use engine::{EngineFactory, SceneEngine};
pub use error::EngineError;
pub use synthetic::{SyntheticEngine, SyntheticFactory};
pub use types::{Observation, SensorBuffer, COLOR_SENSOR, DEPTH_SENSOR, SEMANTIC_SENSOR};
