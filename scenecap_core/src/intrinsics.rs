//! Derived pinhole camera intrinsics.

use serde::{Deserialize, Serialize};

/// Intrinsics of the color camera, derived once per run from the sensor
/// configuration and persisted alongside the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub width: u32,
    pub height: u32,

    /// Horizontal field of view in degrees
    pub fov: f64,

    /// Focal lengths in pixels
    pub fx: f64,
    pub fy: f64,

    /// Principal point
    pub cx: f64,
    pub cy: f64,
}

impl CameraInfo {
    /// Computes intrinsics from resolution and horizontal FOV.
    ///
    /// `fx = fy = 0.5 * width / tan(fov / 2)`, principal point at the
    /// image center.
    pub fn from_sensor(width: u32, height: u32, fov_deg: f64) -> Self {
        let f = 0.5 * width as f64 / (fov_deg.to_radians() / 2.0).tan();
        Self {
            width,
            height,
            fov: fov_deg,
            fx: f,
            fy: f,
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_principal_point_at_center() {
        let info = CameraInfo::from_sensor(1280, 720, 90.0);
        assert_eq!(info.cx, 640.0);
        assert_eq!(info.cy, 360.0);
    }

    #[test]
    fn test_focal_lengths_from_fov() {
        for fov in [60.0, 79.5, 90.0, 120.0] {
            let info = CameraInfo::from_sensor(1280, 720, fov);
            let expected = 0.5 * 1280.0 / (fov_radians(fov) / 2.0).tan();
            assert_relative_eq!(info.fx, expected);
            assert_eq!(info.fx, info.fy);
        }
    }

    #[test]
    fn test_fov_90_focal_equals_half_width() {
        // tan(45 deg) == 1, so f == width / 2
        let info = CameraInfo::from_sensor(1280, 720, 90.0);
        assert_relative_eq!(info.fx, 640.0, epsilon = 1e-9);
    }

    fn fov_radians(deg: f64) -> f64 {
        deg * std::f64::consts::PI / 180.0
    }
}
