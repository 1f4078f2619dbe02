//! Headless viewer demo
//!
//! Loads a scene description, clicks a pin, runs the flight frame by frame
//! and flies back to the default view, printing the camera pose and the
//! label positions along the way.

use anyhow::{Context, Result};
use clap::Parser;
use pinmap_motion::MotionStatus;
use pinmap_visualization::{MapController, ParamValue, Viewport, ViewerConfig, CAMERA_FOLDER};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fly a camera between map pins without a window")]
struct Args {
    /// Scene description (JSON)
    #[arg(long, default_value = "demos/scene.json")]
    config: PathBuf,

    /// Pin to click; the first configured pin when absent
    #[arg(long)]
    pin: Option<String>,

    /// Frame budget per flight
    #[arg(long, default_value_t = 2000)]
    frames: usize,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Draw flight paths into the scene and relax the orbit limits
    #[arg(long)]
    debug: bool,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive");

    let mut config = ViewerConfig::from_path(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.controller.navigation.debug |= args.debug;
    let pin = match &args.pin {
        Some(pin) => pin.clone(),
        None => config
            .pins
            .first()
            .map(|p| p.id.clone())
            .context("scene has no pins")?,
    };

    let mut controller = config.build().context("composing the viewer")?;
    let viewport = Viewport::new(args.width, args.height);
    let dt = 1.0 / args.fps;

    if controller.panel().is_some() {
        controller.set_debug_param(CAMERA_FOLDER, "fov", ParamValue::Number(70.0))?;
    }

    println!("pinmap demo");
    println!("===========");
    print_pose("start", &controller);

    controller.click_pin(&pin)?;
    let frames = run_flight(&mut controller, &viewport, dt, args.frames)?;
    println!("\nArrived at '{pin}' after {frames} frames ({:.2}s)", frames as f32 * dt);
    print_pose("arrival", &controller);
    print_labels(&controller);

    controller.move_to_default()?;
    let frames = run_flight(&mut controller, &viewport, dt, args.frames)?;
    println!("\nBack home after {frames} frames");
    print_pose("home", &controller);

    Ok(())
}

fn run_flight(controller: &mut MapController, viewport: &Viewport, dt: f32, budget: usize) -> Result<usize> {
    for frame in 1..=budget {
        match controller.tick(dt, viewport)? {
            MotionStatus::Completed | MotionStatus::Idle => return Ok(frame),
            MotionStatus::Animating { progress } => {
                if frame % 30 == 0 {
                    info!(frame, progress, "flying");
                }
            }
        }
    }
    anyhow::bail!("flight did not finish within {budget} frames")
}

fn print_pose(label: &str, controller: &MapController) {
    let camera = controller.camera();
    let forward = camera.forward();
    println!(
        "{label:>8}: position ({:.2}, {:.2}, {:.2}) facing ({:.2}, {:.2}, {:.2})",
        camera.position.x, camera.position.y, camera.position.z, forward.x, forward.y, forward.z
    );
}

fn print_labels(controller: &MapController) {
    for pin in controller.pins() {
        let Some(overlay) = pin.overlay() else { continue };
        if let Some(element) = controller.overlays().get(overlay.element_id()) {
            println!("  {:<16} {}", element.id, element.transform);
        }
    }
}
