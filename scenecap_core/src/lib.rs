//! SceneCap Core
//!
//! Orchestration for driving a 3D simulation engine through a scripted
//! camera trajectory and persisting the resulting observation stream.
//!
//! # Architecture
//!
//! ```text
//! Settings ──► assemble_config ──► EngineConfig
//!                                       │
//!                     CaptureSession::rebuild (one live engine)
//!                                       │
//!                 run_trajectory (phase state machine, 4s @ 30Hz)
//!                     │                              │
//!              FrameWriter (PNGs)          TrajectoryRecord
//!                                                    │
//!                              Snapshot ◄── CameraInfo (intrinsics)
//! ```
//!
//! The engine itself (physics, rendering, scene graph) lives behind the
//! [`scenecap_env::SceneEngine`] trait; everything here is the thin
//! control layer around it.

mod config;
mod error;
mod intrinsics;
mod persist;
mod session;
mod settings;
mod snapshot;
mod trajectory;

pub use config::assemble_config;
pub use error::CaptureError;
pub use intrinsics::CameraInfo;
pub use persist::{
    depth_to_gray, palette_index, semantic_to_rgba, FrameWriter, D3_40_COLORS_RGB,
    MAX_DEPTH_METERS,
};
pub use session::CaptureSession;
pub use settings::{Settings, NONE_SCENE};
pub use snapshot::Snapshot;
pub use trajectory::{
    run_trajectory, simulate, CaptureOptions, PoseDelta, TrajectoryPhase, TrajectoryRecord,
    PHYSICS_DT, TRAJECTORY_BUDGET_SECS, YAW_STEP_RAD,
};
