//! End-of-run binary snapshot.
//!
//! One file holding the full trajectory record plus the derived camera
//! intrinsics, bincode-encoded, written once after the loop completes
//! and overwriting any prior file at the path.

use crate::error::CaptureError;
use crate::intrinsics::CameraInfo;
use crate::trajectory::TrajectoryRecord;
use nalgebra::{UnitQuaternion, Vector3};
use scenecap_env::Observation;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Complete capture output: parallel frame/pose sequences plus camera
/// intrinsics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub observations: Vec<Observation>,
    pub rotations: Vec<UnitQuaternion<f32>>,
    pub translations: Vec<Vector3<f32>>,
    pub camera_info: CameraInfo,
}

impl Snapshot {
    /// Assembles a snapshot from a finished trajectory record.
    pub fn from_record(record: TrajectoryRecord, camera_info: CameraInfo) -> Self {
        Self {
            observations: record.observations,
            rotations: record.rotations,
            translations: record.translations,
            camera_info,
        }
    }

    /// Serializes the snapshot to `path`, replacing any existing file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), CaptureError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        info!(
            frames = self.observations.len(),
            path = %path.display(),
            "snapshot written"
        );
        Ok(())
    }

    /// Reads a snapshot back from disk.
    pub fn read_from_file(path: &Path) -> Result<Self, CaptureError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
