//! # hearthmode — household mode controller
//!
//! Composition root invoked by cron. Each run performs one short-lived
//! action and exits:
//!
//! ```text
//! */2 * * * *  hearthmode presence
//! */5 * * * *  hearthmode schedule
//! ```
//!
//! ## Responsibilities
//! - Parse the command line and load configuration (file + env vars)
//! - Initialise logging to stderr
//! - Construct adapters and application use-cases
//! - Run exactly one command
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod status;
mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hearthmode_app::notification::summarize;
use hearthmode_app::ports::{Clock, StateStore, SystemClock};
use hearthmode_domain::mode::Mode;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "hearthmode", version, about = "Household mode controller for cron")]
struct Cli {
    /// Configuration file [default: hearthmode.toml]
    #[arg(long, env = "HEARTHMODE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log device actions instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Probe presence once; apply away/home on a confirmed change
    Presence,
    /// Apply wake/sleep if a window is open and has not run today
    Schedule,
    /// Apply a mode now, without touching the ledger
    Apply {
        /// wake, sleep, away or home
        mode: Mode,
    },
    /// Show persisted state and whether a window is open
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.dry_run {
        config.general.dry_run = true;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Presence => presence(&config).await?,
        Command::Schedule => schedule(&config).await?,
        Command::Apply { mode } => apply(&config, mode).await?,
        Command::Status => status(&config)?,
    }
    Ok(())
}

async fn presence(config: &Config) -> Result<(), wiring::SetupError> {
    if !config.presence.enabled {
        tracing::info!("presence monitoring disabled");
        return Ok(());
    }
    let engine = wiring::engine(config)?;
    wiring::monitor(config).run(&engine).await;
    Ok(())
}

async fn schedule(config: &Config) -> Result<(), wiring::SetupError> {
    let engine = wiring::engine(config)?;
    wiring::scheduler(config)?
        .run(SystemClock.now(), &engine)
        .await;
    Ok(())
}

async fn apply(config: &Config, mode: Mode) -> Result<(), wiring::SetupError> {
    let engine = wiring::engine(config)?;
    let result = engine.apply(mode).await;
    println!("{}", summarize(&result).message);
    Ok(())
}

fn status(config: &Config) -> Result<(), wiring::SetupError> {
    let dir = wiring::state_dir(config);
    let occupancy = dir.occupancy().load_or_default();
    let ledger = dir.ledger().load_or_default();
    let due = wiring::scheduler(config)?.tick(SystemClock.now());

    println!(
        "{}",
        status::render(&status::Snapshot {
            occupancy: &occupancy,
            ledger: &ledger,
            schedule: &config.schedule,
            due,
            timezone: config.timezone()?,
            dry_run: config.general.dry_run,
        })
    );
    Ok(())
}
