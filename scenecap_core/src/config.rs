//! Configuration assembler.
//!
//! Maps a [`Settings`] record into the engine's configuration schema.
//! Pure construction, no side effects.

use crate::settings::Settings;
use scenecap_env::{
    AgentSpec, EngineConfig, SensorKind, SensorSpec, SensorSubtype, COLOR_SENSOR, DEPTH_SENSOR,
    SEMANTIC_SENSOR,
};

/// Builds an engine configuration with one agent carrying up to three
/// co-located pinhole sensors.
///
/// The engine requires all sensors to share one resolution; every spec
/// here takes it from the same settings fields, so the constraint holds
/// by construction.
pub fn assemble_config(settings: &Settings) -> EngineConfig {
    let resolution = [settings.height, settings.width];
    let position = [0.0, settings.sensor_height, 0.0];
    let orientation = [settings.sensor_pitch, 0.0, 0.0];

    let sensor = |uuid: &str, kind: SensorKind| SensorSpec {
        uuid: uuid.to_string(),
        kind,
        resolution,
        position,
        orientation,
        subtype: SensorSubtype::Pinhole,
    };

    let mut agent = AgentSpec::default();
    if settings.color_sensor {
        agent
            .sensor_specifications
            .push(sensor(COLOR_SENSOR, SensorKind::Color));
    }
    if settings.depth_sensor {
        agent
            .sensor_specifications
            .push(sensor(DEPTH_SENSOR, SensorKind::Depth));
    }
    if settings.semantic_sensor {
        agent
            .sensor_specifications
            .push(sensor(SEMANTIC_SENSOR, SensorKind::Semantic));
    }

    EngineConfig {
        gpu_device_id: 0,
        scene_dataset_config_file: settings.scene_dataset.clone(),
        scene_id: settings.scene.clone(),
        enable_physics: settings.enable_physics,
        agents: vec![agent],
    }
}
