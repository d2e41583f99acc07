//! Floppy Bird entry point
//!
//! Headless demo: runs fixed 16 ms frames with a simple autopilot until the
//! bird crashes or the frame cap is reached.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

use std::path::PathBuf;

use clap::Parser;
use floppy_bird::sim::Touch;
use floppy_bird::{GameSession, Tuning};

const FRAME_MS: f32 = 16.0;
/// Autopilot flaps when the bird center drops below this line
const FLAP_LINE_Y: f32 = 420.0;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tuning JSON file; defaults are used when omitted
    tuning: Option<PathBuf>,
    /// Stop after this many frames even if the bird is still flying
    #[arg(long, default_value_t = 60 * 60)]
    max_frames: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Floppy Bird (headless) starting...");

    let tuning = match args.tuning {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut session = GameSession::new(tuning);
    while session.is_running() && session.frames < args.max_frames {
        let touches = autopilot(&session);
        if let Err(e) = session.frame(&touches, FRAME_MS) {
            log::error!("Simulation stopped: {e}");
            std::process::exit(1);
        }
    }

    log::info!(
        "Finished after {} frames with {} points ({:?})",
        session.frames,
        session.points,
        session.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet; the library is the deliverable on wasm32
}

fn autopilot(session: &GameSession) -> Vec<Touch> {
    let entities = session.entities();
    match entities.engine().body(entities.bird.body) {
        Ok(bird) if bird.position.y > FLAP_LINE_Y => vec![Touch::press()],
        _ => Vec::new(),
    }
}
