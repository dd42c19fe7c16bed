use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ball_simulator::{Config, World, benchmark};

mod engine;
mod renderer;

#[derive(Parser, Debug)]
#[command(about = "Bouncing balls with gravity and elastic collisions")]
struct Args {
    /// TOML configuration file, defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for spawn velocities and sizes
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of bodies
    #[arg(long)]
    capacity: Option<usize>,

    /// Run this many frames without a window and print statistics
    #[arg(long, value_name = "FRAMES")]
    headless: Option<usize>,

    /// Bodies spawned before a headless run
    #[arg(long, default_value_t = 100)]
    bodies: usize,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(capacity) = args.capacity {
        config.world.capacity = capacity;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    match args.headless {
        Some(frames) => {
            let mut world = World::new(config.world.clone())?;
            let spawned = benchmark::populate(&mut world, args.bodies);
            info!(spawned, frames, "headless run");

            let stats = benchmark::run(&mut world, frames, config.sim.max_dt, config.sim.speed);
            info!(
                bodies = stats.bodies,
                frames = stats.frames,
                total_ms = stats.elapsed.as_secs_f64() * 1e3,
                per_frame_ms = stats.frame_time().as_secs_f64() * 1e3,
                energy = stats.kinetic_energy,
                max_violation = stats.max_boundary_violation,
                max_overlap = stats.max_overlap,
                "headless run finished"
            );
            Ok(())
        }
        None => engine::run(config),
    }
}
