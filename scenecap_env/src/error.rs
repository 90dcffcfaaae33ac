//! Error types for the engine abstraction layer.

use thiserror::Error;

/// Errors surfaced by a simulation engine.
///
/// All of these are fatal to a capture run: the orchestration performs no
/// retries and no partial-failure recovery.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine construction failed (bad scene, missing dataset, etc.)
    #[error("Engine construction failed: {0}")]
    Construction(String),

    /// Operation attempted on a closed engine handle
    #[error("Engine is closed")]
    Closed,

    /// Sensor uuid not present in the engine configuration
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    /// Template config loading failed
    #[error("Template error: {0}")]
    Template(String),
}

impl EngineError {
    /// Creates a construction error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }
}
