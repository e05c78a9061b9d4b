use std::path::{Path, PathBuf};

use clap::Subcommand;
use slotfill_core::EventPool;

#[derive(Subcommand)]
pub enum PoolAction {
    /// List event titles and descriptions
    List {
        /// TOML pool file (defaults to the configured or built-in pool)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in pool as TOML, as a starting point for a custom pool
    Export,
}

pub fn run(action: PoolAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PoolAction::List { file, json } => {
            let pool = match file {
                Some(path) => EventPool::load(&path)?,
                None => super::load_config(config_path)?.event_pool()?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(pool.entries())?);
            } else {
                for entry in pool.entries() {
                    println!("{} - {}", entry.title, entry.description);
                }
            }
        }
        PoolAction::Export => {
            print!("{}", EventPool::curated().to_toml_string()?);
        }
    }
    Ok(())
}
