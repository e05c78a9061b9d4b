//! List free working-hour chunks.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use slotfill_core::{compute_free_slots_at, CalendarReader, PlanTier};

use crate::calendar::JsonFileCalendar;

#[derive(Args)]
pub struct SlotsArgs {
    /// JSON file with busy intervals
    #[arg(long)]
    busy: Option<PathBuf>,
    /// End of the range (RFC 3339); defaults to the plan horizon
    #[arg(long)]
    until: Option<DateTime<Utc>>,
    /// IANA timezone, e.g. Europe/Berlin
    #[arg(long)]
    tz: Option<String>,
    /// Plan tier (free, monthly, annual, lifetime)
    #[arg(long)]
    plan: Option<PlanTier>,
    /// Override the current time (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

pub fn run(args: SlotsArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let tz = super::resolve_time_zone(args.tz.as_deref(), &config)?;
    let plan = args.plan.unwrap_or(config.plan);
    let now = args.now.unwrap_or_else(Utc::now);
    let range_end = args.until.unwrap_or_else(|| plan.horizon_from(now));

    let busy = match &args.busy {
        Some(path) => JsonFileCalendar::new(path).busy_intervals(range_end, tz)?,
        None => Vec::new(),
    };

    let chunks = compute_free_slots_at(&busy, now, range_end, tz)?;
    println!("{}", serde_json::to_string_pretty(&chunks)?);
    Ok(())
}
