//! # Panda Reach Simulator Binary
//!
//! Runs the reach environment against the simulated arm with a random (or
//! fixed-seed) policy and reports the score history.
//!
//! # Usage
//!
//! ```bash
//! # Defaults from config/panda.toml
//! panda_sim
//!
//! # Custom config, 50 episodes, JSON report
//! panda_sim --config my.toml --episodes 50 --report run.json
//!
//! # Print the effective configuration and exit
//! panda_sim --dump-config
//! ```

#![deny(warnings)]

use clap::Parser;
use panda_common::consts::DEFAULT_CONFIG_PATH;
use panda_env::supervisor::PandaSupervisor;
use panda_sim::arm::SimulatedArm;
use panda_sim::config::PandaConfig;
use panda_sim::frame::ArmBaseFrame;
use panda_sim::policy::RandomPolicy;
use panda_sim::runner::Trainer;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Panda reach simulator - 7-joint arm reaching a target point
#[derive(Parser, Debug)]
#[command(name = "panda_sim")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Simulated Panda reach environment with a random-policy training run")]
#[command(long_about = None)]
struct Args {
    /// Path to the configuration file. Missing file falls back to defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the number of episodes
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Override the seed for target placement and policy
    #[arg(long)]
    seed: Option<u64>,

    /// Write the run report (JSON) to this file
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("Simulator failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (mut config, missing) = match PandaConfig::load_or_default(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            setup_tracing(&args, &PandaConfig::default());
            return Err(e.into());
        }
    };
    if let Some(episodes) = args.episodes {
        config.sim.episodes = episodes;
    }
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }

    setup_tracing(&args, &config);

    if args.dump_config {
        print!("{}", toml::to_string(&config)?);
        return Ok(());
    }

    info!(
        "{} v{} starting...",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION")
    );
    if missing {
        warn!("Config {:?} not found, using defaults", args.config);
    } else {
        info!("Loaded config from {:?}", args.config);
    }

    let arm = SimulatedArm::new(&config.sim, config.env.joint_limits);
    let frame = ArmBaseFrame::new(config.sim.base_origin);
    let env = PandaSupervisor::new(arm, frame, config.env.clone())?;
    let policy = RandomPolicy::new(config.sim.seed);
    let mut trainer = Trainer::new(env, policy);

    let running = trainer.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })?;

    let report = trainer.run(config.sim.episodes as usize)?;
    info!(
        episodes = report.episodes,
        terminated = report.terminated_episodes,
        solved = report.solved,
        interrupted = report.interrupted,
        "Run complete, rolling mean {:?}",
        report.rolling_mean
    );

    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("Report written to {}", path.display());
    }

    info!("Panda simulator shutdown complete");
    Ok(())
}

/// Setup tracing subscriber from the CLI flags and the configured level.
fn setup_tracing(args: &Args, config: &PandaConfig) {
    let level = if args.verbose {
        "debug"
    } else {
        config.shared.log_level.as_filter()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
