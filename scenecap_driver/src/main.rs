//! SceneCap capture driver
//!
//! Loads a scene, drives the agent through the scripted trajectory, and
//! persists per-frame PNGs plus the end-of-run snapshot.

use anyhow::Context;
use clap::Parser;
use scenecap_core::{
    run_trajectory, CameraInfo, CaptureOptions, CaptureSession, FrameWriter, Settings, Snapshot,
};
use scenecap_env::{SyntheticFactory, COLOR_SENSOR};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod picker;

/// SceneCap capture driver CLI
#[derive(Parser, Debug)]
#[command(name = "scenecap")]
#[command(about = "Capture RGB/depth/semantic frames along a scripted trajectory", long_about = None)]
struct Args {
    /// Disable per-frame image saving
    #[arg(long)]
    no_display: bool,

    /// Disable trajectory capture entirely
    #[arg(long)]
    no_make_video: bool,

    /// Root of the asset tree
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for frame images and the snapshot file
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Master seed for the deterministic engine
    #[arg(short, long, default_value = "1")]
    seed: u64,

    /// Scene handle to load (skips the picker)
    #[arg(long)]
    scene: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let display = !args.no_display;
    let make_video = !args.no_make_video;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating output dir {}", args.output_dir.display()))?;

    let mut settings = Settings::with_data_dir(&args.data_dir);
    settings.seed = args.seed;

    let mut session = CaptureSession::new(Box::new(SyntheticFactory::new(args.seed)));
    session.rebuild(&settings).context("initializing simulator")?;

    // Scene selection: explicit flag, interactive picker, or the
    // deterministic default.
    let handles = session.engine()?.scene_handles();
    let selection = picker::SceneSelection::new(picker::default_scene(&handles));
    if let Some(scene) = &args.scene {
        selection.select(scene);
    } else {
        #[cfg(feature = "interactive")]
        picker::interactive::pick(&handles, &selection)?;
    }

    // The selection is read exactly once before the capture run; later
    // changes are not honored.
    let selected = selection.current();
    if session.settings().map(|s| s.scene.as_str()) != Some(selected.as_str()) {
        settings.scene = selected;
        session
            .rebuild(&settings)
            .context("rebuilding simulator for selected scene")?;
    }
    info!(scene = %settings.scene, "scene loaded");

    // The loop always runs for the full simulated budget; disabling
    // capture only empties the recorded sequences. The snapshot is
    // written unconditionally afterwards, so a no-capture run still
    // yields a snapshot with empty sequences plus the intrinsics.
    let frame_writer = if make_video && display {
        Some(FrameWriter::new(&args.output_dir)?)
    } else {
        None
    };
    let options = CaptureOptions {
        capture_frames: make_video,
        frame_writer,
    };
    let record = run_trajectory(session.engine_mut()?, &options)?;

    let fov = session.engine()?.sensor_hfov_deg(COLOR_SENSOR)?;
    let camera_info = CameraInfo::from_sensor(settings.width, settings.height, fov);
    let snapshot_path = args.output_dir.join("data.bin");
    Snapshot::from_record(record, camera_info).write_to_file(&snapshot_path)?;
    info!("Data saved to {}", snapshot_path.display());

    session.close();
    Ok(())
}
