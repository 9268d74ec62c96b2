//! Headless influence-field simulation runner.
//!
//! Loads a scenario (or builds an open arena), layers environment and
//! command-line overrides on top, then ticks a [`runtime::Session`] and prints
//! ASCII frames to stdout. Logs go to stderr; set `RUST_LOG` to tune them.
//!
//! ```bash
//! cargo run -p influence-client -- --scenario crates/influence/content/data/scenarios/courtyard.ron
//! FIELD_MOOD=fearful cargo run -p influence-client -- --ticks 300 --render-every 30
//! ```

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use influence_content::{Scenario, ScenarioLoader};
use influence_core::Mood;
use runtime::{RuntimeConfig, Session, SessionEvent};

/// Run an influence-field steering session
#[derive(Parser, Debug)]
#[command(name = "influence")]
#[command(about = "Influence-field NPC steering simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario RON file (default: built-in open arena)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Arena width when no scenario file is given
    #[arg(long, default_value_t = 16)]
    width: u32,

    /// Arena height when no scenario file is given
    #[arg(long, default_value_t = 12)]
    height: u32,

    /// Stop after this many ticks (default: run until the clock runs out)
    #[arg(long)]
    ticks: Option<u64>,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Print a frame every N ticks, 0 to disable
    #[arg(long, default_value_t = 10)]
    render_every: u64,

    /// Weight preset: neutral, fearful or joyful
    #[arg(long)]
    mood: Option<Mood>,

    /// Reward placement seed
    #[arg(long)]
    seed: Option<u64>,

    /// Session length in seconds, 0 for unlimited
    #[arg(long)]
    time_limit: Option<f32>,
}

impl Cli {
    fn overrides(&self) -> RuntimeConfig {
        RuntimeConfig {
            mood: self.mood,
            reward_seed: self.seed,
            time_limit: self.time_limit,
            ..RuntimeConfig::default()
        }
    }

    fn load_scenario(&self) -> Result<Scenario> {
        match &self.scenario {
            Some(path) => ScenarioLoader::load(path),
            None => {
                anyhow::ensure!(
                    self.width >= 3 && self.height >= 3,
                    "arena must be at least 3x3, got {}x{}",
                    self.width,
                    self.height
                );
                Ok(Scenario::open_arena(self.width, self.height))
            }
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    anyhow::ensure!(cli.dt > 0.0, "--dt must be positive, got {}", cli.dt);

    let scenario = cli.load_scenario()?;
    let overrides = RuntimeConfig::from_env().merge(cli.overrides());
    tracing::debug!(?overrides, "runtime overrides");

    let mut session = Session::builder(scenario)
        .config(overrides)
        .build()
        .context("Failed to start session")?;

    if session.clock().remaining().is_none() && cli.ticks.is_none() {
        anyhow::bail!("unlimited session needs --ticks");
    }

    loop {
        if cli.ticks.is_some_and(|limit| session.current_tick().0 >= limit) {
            break;
        }

        let report = session.tick(cli.dt)?;
        for event in &report.events {
            log_event(event);
        }

        if cli.render_every > 0 && report.tick.0 % cli.render_every == 0 {
            println!("{}", render::render(&session));
            println!("{}\n", render::status_line(&session));
        }

        if report.is_game_over() {
            break;
        }
    }

    println!("{}", render::render(&session));
    println!("{}", render::status_line(&session));
    tracing::info!(
        ticks = session.current_tick().0,
        collected = session.total_collected(),
        "run finished"
    );
    Ok(())
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::AgentCaught { agent, cell } => {
            tracing::info!(%agent, %cell, "agent caught, back to spawn");
        }
        SessionEvent::RewardCollected {
            agent,
            reward,
            total,
        } => {
            tracing::info!(%agent, %reward, total, "reward collected");
        }
        SessionEvent::GameOver { collected } => {
            tracing::info!(collected, "time is up");
        }
        SessionEvent::FieldDegenerate { value } => {
            tracing::debug!(value, "flat influence field");
        }
        SessionEvent::AgentDeparted { agent, from, to } => {
            tracing::trace!(%agent, %from, %to, "departed");
        }
        SessionEvent::AgentArrived { agent, cell } => {
            tracing::trace!(%agent, %cell, "arrived");
        }
        SessionEvent::RewardSpawned { reward, cell } => {
            tracing::trace!(%reward, %cell, "reward spawned");
        }
    }
}
