//! Headless runner: load a configuration, run one episode, report the outcome as JSON.

mod telemetry;

use anyhow::{Context, Result};
use antsim_core::SimConfig;
use antsim_world::{Episode, EpisodeConfig};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments for the runner
#[derive(Parser, Debug)]
#[command(name = "antsim-runner")]
#[command(about = "Run a two-colony ant foraging episode without rendering")]
struct Args {
    /// JSON simulation config; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Time delta passed to every step
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Keep stepping after every food source is empty
    #[arg(long)]
    run_past_exhaustion: bool,

    /// Ticks between periodic metric events, 0 to disable
    #[arg(long, default_value_t = 1000)]
    log_interval: u64,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Include the final world snapshot in the report
    #[arg(long)]
    snapshot: bool,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry(args.log_json)?;

    let sim_config = load_config(&args)?;
    let episode_config = EpisodeConfig {
        ticks: args.ticks,
        frame_dt: args.frame_dt,
        stop_when_exhausted: !args.run_past_exhaustion,
        log_interval: args.log_interval,
    };

    info!(
        config = ?args.config,
        seed = ?sim_config.seed,
        ticks = args.ticks,
        "Starting antsim runner"
    );

    let mut episode = Episode::new(sim_config, episode_config)?;
    let result = episode.run();

    let report = if args.snapshot {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string_pretty(&serde_json::json!({
            "seed": result.seed,
            "ticks_run": result.ticks_run,
            "exhausted": result.exhausted,
            "stats": result.stats,
        }))?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{report}"),
    }

    Ok(())
}
