use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod calendar;
mod commands;
mod state;

#[derive(Parser)]
#[command(name = "slotfill", version, about = "Fill free calendar time with synthetic events")]
struct Cli {
    /// Config file to use instead of ~/.config/slotfill/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show free working-hour chunks
    Slots(commands::slots::SlotsArgs),
    /// Place synthetic events into free chunks and write them out
    Fill(commands::fill::FillArgs),
    /// Event title pool
    Pool {
        #[command(subcommand)]
        action: commands::pool::PoolAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Slots(args) => commands::slots::run(args, config),
        Commands::Fill(args) => commands::fill::run(args, config),
        Commands::Pool { action } => commands::pool::run(action, config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
