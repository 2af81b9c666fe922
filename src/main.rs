//! gesture-cursor: drive the OS pointer from hand landmarks.

use clap::Parser;
use gesture_cursor_lib::core::config::Config;
use gesture_cursor_lib::core::control_loop::ControlLoop;
use gesture_cursor_lib::models::input::{PointerError, ScreenSize};
use gesture_cursor_lib::platform::capture::BlankFrameSource;
use gesture_cursor_lib::platform::display::LogRenderer;
use gesture_cursor_lib::platform::input::{os_pointer, DryRunPointer, PointerInjector};
use gesture_cursor_lib::platform::pose::{DefaultHandLandmarker, HandLandmarker, ReplayHandLandmarker};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Screen assumed by the dry-run pointer when the config has no override
const FALLBACK_SCREEN: ScreenSize = ScreenSize {
    width: 1920,
    height: 1080,
};

/// Move and click the pointer with hand gestures
#[derive(Parser, Debug)]
#[command(name = "gesture-cursor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (defaults to ~/.gesture_cursor/config/settings.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay detection results from a JSON Lines file instead of running the detector
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Stop after this many frames (defaults to the replay length; required without --replay)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Log pointer commands instead of moving the real pointer
    #[arg(long)]
    dry_run: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;
    info!(path = %config_path.display(), "configuration loaded");

    let (landmarker, replay_len): (Box<dyn HandLandmarker>, Option<u64>) = match &cli.replay {
        Some(path) => {
            let replay = ReplayHandLandmarker::open(path)?;
            let total = replay.total() as u64;
            let landmarker: Box<dyn HandLandmarker> = Box::new(replay);
            (landmarker, Some(total))
        }
        None => {
            let landmarker: Box<dyn HandLandmarker> =
                Box::new(DefaultHandLandmarker::new(&config.landmarker_config())?);
            (landmarker, None)
        }
    };

    let frames = frame_limit(cli.frames, replay_len)?;
    let source = BlankFrameSource::with_limit(config.capture_width, config.capture_height, frames);

    let pointer = select_pointer(&config, cli.dry_run)?;

    let mut control = ControlLoop::new(
        &config,
        Box::new(source),
        landmarker,
        pointer,
        Box::new(LogRenderer::default()),
    )?;

    // Ctrl-C only flips the token; the loop itself stays on this thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let token = control.cancellation_token();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            token.cancel();
        }
    });

    let report = control.run();
    runtime.shutdown_background();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Number of frames to run. There is no built-in camera, so blank frames
/// without a bound would spin forever without ever seeing a hand.
fn frame_limit(frames: Option<u64>, replay_len: Option<u64>) -> Result<u64, String> {
    frames.or(replay_len).ok_or_else(|| {
        "no camera frame source is available; pass --replay <file> or --frames <n>".to_string()
    })
}

fn select_pointer(
    config: &Config,
    dry_run: bool,
) -> Result<Box<dyn PointerInjector>, Box<dyn std::error::Error>> {
    let dry = || -> Box<dyn PointerInjector> {
        Box::new(DryRunPointer::new(config.screen_override().unwrap_or(FALLBACK_SCREEN)))
    };

    if dry_run {
        return Ok(dry());
    }

    match os_pointer() {
        Ok(pointer) => Ok(pointer),
        Err(PointerError::NotSupported) => {
            warn!("built without 'os-pointer'; falling back to dry-run pointer");
            Ok(dry())
        }
        Err(e) => Err(e.into()),
    }
}
