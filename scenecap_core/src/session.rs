//! Capture session: simulator lifecycle management.
//!
//! Owns at most one live engine handle. Rebuilding closes the previous
//! handle before constructing the new one, and re-derives template state
//! from the fresh engine. The engine handle and the settings it was
//! built from live here as explicit session state, passed by reference
//! into each operation.

use crate::config::assemble_config;
use crate::error::CaptureError;
use crate::settings::Settings;
use scenecap_env::{EngineFactory, SceneEngine};
use tracing::{debug, info};

/// Process-wide capture context: engine handle plus the settings it was
/// built from.
pub struct CaptureSession {
    factory: Box<dyn EngineFactory>,
    engine: Option<Box<dyn SceneEngine>>,
    settings: Option<Settings>,
}

impl CaptureSession {
    /// Creates a session with no live engine.
    pub fn new(factory: Box<dyn EngineFactory>) -> Self {
        Self {
            factory,
            engine: None,
            settings: None,
        }
    }

    /// Tears down any existing engine and constructs a fresh one from
    /// the given settings.
    ///
    /// Always rebuilds, even for identical settings; the result is the
    /// same either way, so repeated calls are idempotent in effect.
    pub fn rebuild(&mut self, settings: &Settings) -> Result<(), CaptureError> {
        if let Some(mut old) = self.engine.take() {
            debug!("closing previous engine");
            old.close();
        }

        let config = assemble_config(settings);
        let mut engine = self.factory.build(&config)?;

        // re-derive template state from the new handle
        let loaded = engine.load_object_templates(&settings.object_config_dir())?;
        info!(
            scene = %settings.scene,
            object_templates = loaded,
            "simulator rebuilt"
        );

        self.engine = Some(engine);
        self.settings = Some(settings.clone());
        Ok(())
    }

    /// Whether a live engine exists.
    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Settings the live engine was built from, if any.
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Immutable access to the live engine.
    pub fn engine(&self) -> Result<&dyn SceneEngine, CaptureError> {
        self.engine.as_deref().ok_or(CaptureError::NoEngine)
    }

    /// Mutable access to the live engine.
    pub fn engine_mut(&mut self) -> Result<&mut (dyn SceneEngine + 'static), CaptureError> {
        self.engine.as_deref_mut().ok_or(CaptureError::NoEngine)
    }

    /// Explicit teardown.
    pub fn close(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.close();
        }
        self.settings = None;
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Unit, UnitQuaternion, Vector3};
    use scenecap_env::{EngineConfig, EngineError, Observation};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Engine stub that reports to a shared live-handle counter.
    struct ProbeEngine {
        live: Arc<AtomicUsize>,
        closed: bool,
    }

    impl ProbeEngine {
        fn new(live: Arc<AtomicUsize>) -> Self {
            live.fetch_add(1, Ordering::SeqCst);
            Self { live, closed: false }
        }
    }

    impl SceneEngine for ProbeEngine {
        fn scene_handles(&self) -> Vec<String> {
            vec!["NONE".to_string()]
        }
        fn world_time(&self) -> f64 {
            0.0
        }
        fn step_physics(&mut self, _dt: f64) -> Result<(), EngineError> {
            Ok(())
        }
        fn sensor_observations(&mut self) -> Result<Observation, EngineError> {
            Ok(Observation::default())
        }
        fn agent_translation(&self) -> Vector3<f32> {
            Vector3::zeros()
        }
        fn set_agent_translation(&mut self, _translation: Vector3<f32>) {}
        fn rotate_agent(&mut self, _angle_rad: f32, _axis: Unit<Vector3<f32>>) {}
        fn agent_rotation(&self) -> UnitQuaternion<f32> {
            UnitQuaternion::identity()
        }
        fn sensor_hfov_deg(&self, _uuid: &str) -> Result<f64, EngineError> {
            Ok(90.0)
        }
        fn load_object_templates(&mut self, _dir: &Path) -> Result<usize, EngineError> {
            Ok(0)
        }
        fn close(&mut self) {
            if !self.closed {
                self.closed = true;
                self.live.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    struct ProbeFactory {
        live: Arc<AtomicUsize>,
        built: Arc<AtomicUsize>,
    }

    impl EngineFactory for ProbeFactory {
        fn build(&self, _config: &EngineConfig) -> Result<Box<dyn SceneEngine>, EngineError> {
            self.built.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(ProbeEngine::new(self.live.clone())))
        }
    }

    fn probe_session() -> (CaptureSession, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let live = Arc::new(AtomicUsize::new(0));
        let built = Arc::new(AtomicUsize::new(0));
        let session = CaptureSession::new(Box::new(ProbeFactory {
            live: live.clone(),
            built: built.clone(),
        }));
        (session, live, built)
    }

    #[test]
    fn test_rebuild_keeps_exactly_one_live_engine() {
        let (mut session, live, built) = probe_session();
        let settings = Settings::default();

        session.rebuild(&settings).unwrap();
        assert_eq!(live.load(Ordering::SeqCst), 1);

        // identical settings still rebuild unconditionally
        session.rebuild(&settings).unwrap();
        session.rebuild(&settings).unwrap();
        assert_eq!(live.load(Ordering::SeqCst), 1);
        assert_eq!(built.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_close_tears_down() {
        let (mut session, live, _) = probe_session();
        session.rebuild(&Settings::default()).unwrap();
        session.close();

        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert!(!session.is_open());
        assert!(matches!(session.engine(), Err(CaptureError::NoEngine)));
    }

    #[test]
    fn test_drop_closes_engine() {
        let (mut session, live, _) = probe_session();
        session.rebuild(&Settings::default()).unwrap();
        drop(session);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_settings_tracked_per_rebuild() {
        let (mut session, _, _) = probe_session();
        let mut settings = Settings::default();
        session.rebuild(&settings).unwrap();
        assert_eq!(session.settings().unwrap().scene, "NONE");

        settings.scene = "apt_0".to_string();
        session.rebuild(&settings).unwrap();
        assert_eq!(session.settings().unwrap().scene, "apt_0");
    }
}
