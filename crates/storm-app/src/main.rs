use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use storm_app::autopilot::Autopilot;
use storm_app::game_loop::{spawn_game_loop, LoopSettings};
use storm_app::sinks::LogSink;
use storm_core::constants::TICK_PERIOD_MS;
use storm_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "storm-fighters")]
#[command(about = "Headless Storm Fighters simulation driven by a scripted pilot")]
struct Cli {
    /// JSON file with a SimConfig; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Arena width in pixels
    #[arg(long)]
    width: Option<f64>,
    /// Arena height in pixels
    #[arg(long)]
    height: Option<f64>,
    /// Tick period in milliseconds
    #[arg(long, default_value_t = TICK_PERIOD_MS)]
    tick_ms: u64,
    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Hold the tick period instead of running as fast as possible
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(width) = cli.width {
        config.arena.width = width;
    }
    if let Some(height) = cli.height {
        config.arena.height = height;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    info!(
        "seed {} arena {}x{}",
        config.seed, config.arena.width, config.arena.height
    );
    let engine = SimulationEngine::new(config).context("invalid configuration")?;

    let settings = LoopSettings {
        tick_duration: Duration::from_millis(cli.tick_ms.max(1)),
        max_ticks: cli.max_ticks,
        realtime: cli.realtime,
    };
    let handle = spawn_game_loop(engine, settings, LogSink::new(), Autopilot::default())
        .context("failed to spawn game loop thread")?;

    let summary = handle
        .thread
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    println!(
        "{:?} after {} ticks: score {}, lives {}, total {}",
        summary.phase,
        summary.ticks,
        summary.hud.score,
        summary.hud.lives,
        summary.hud.total_score + summary.hud.score
    );
    Ok(())
}
