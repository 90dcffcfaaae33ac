//! Error type for capture orchestration.

use scenecap_env::EngineError;
use thiserror::Error;

/// Errors surfaced during a capture run.
///
/// All are fatal: the run aborts on the first failure with no retry or
/// partial-failure recovery.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Propagated from the simulation engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Filesystem failure (output directory, snapshot file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failure
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Snapshot serialization failure
    #[error("Snapshot serialization error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Observation missing a buffer the persister needs
    #[error("Missing sensor buffer: {0}")]
    MissingBuffer(String),

    /// Observation buffer shape does not match its declared resolution
    #[error("Malformed sensor buffer: {0}")]
    MalformedBuffer(String),

    /// Session operation attempted without a live engine
    #[error("Session has no live engine (call rebuild first)")]
    NoEngine,
}
