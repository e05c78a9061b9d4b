pub mod config;
pub mod fill;
pub mod pool;
pub mod slots;

use std::path::Path;

use chrono_tz::Tz;
use slotfill_core::{parse_time_zone, Config};

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// `--tz` wins over the configured zone; one of them is required.
pub fn resolve_time_zone(flag: Option<&str>, config: &Config) -> Result<Tz, Box<dyn std::error::Error>> {
    match flag {
        Some(name) => Ok(parse_time_zone(name)?),
        None => Ok(config.time_zone()?),
    }
}
