//! Ballpit headless runner
//!
//! Drives the simulation the way a render loop would: one step per frame,
//! the emitter between frames, and periodic timing output.
//!
//! Usage: `ballpit [config.json]`, frame count from `BALLPIT_FRAMES`.

use std::process::ExitCode;

use ballpit::instance::{CircleInstance, write_instances};
use ballpit::{BodyStore, Emitter, SimConfig, Simulation};

const DEFAULT_FRAMES: u64 = 600;
/// Frames between timing reports
const REPORT_INTERVAL: u64 = 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ballpit (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> ballpit::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let frames = std::env::var("BALLPIT_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut sim = Simulation::new(&config)?;
    let mut store = BodyStore::with_capacity(config.max_bodies);
    let mut emitter = Emitter::new(&config);
    let mut instances: Vec<CircleInstance> = Vec::with_capacity(config.max_bodies);

    let mut window_total = 0.0;
    let mut window_max: f64 = 0.0;

    for frame in 1..=frames {
        let report = sim.step(&mut store);
        // stand-in for the renderer reading the store
        write_instances(&store, &mut instances);
        emitter.on_frame_end(frame, &mut store);

        let ms = report.elapsed_ms();
        window_total += ms;
        window_max = window_max.max(ms);

        if frame % REPORT_INTERVAL == 0 {
            log::info!(
                "frame {}: {} bodies, physics avg {:.2}ms max {:.2}ms (~{:.0} FPS), {} contacts, max depth {:.3}",
                frame,
                report.bodies,
                window_total / REPORT_INTERVAL as f64,
                window_max,
                1000.0 / (window_total / REPORT_INTERVAL as f64).max(1e-3),
                report.contacts,
                report.max_depth
            );
            window_total = 0.0;
            window_max = 0.0;
        }
    }

    log::info!("Finished {} frames with {} bodies", frames, store.len());
    Ok(())
}
