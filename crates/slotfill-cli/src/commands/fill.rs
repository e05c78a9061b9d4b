//! Fill free time with synthetic events.
//!
//! Events are written as JSON lines to stdout (or `--out`); the summary goes
//! to stderr. Free-tier cooldown state is persisted between runs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use slotfill_core::{FillPlanner, FillRequest, FillWindow, PlanTier};
use tracing::debug;

use crate::calendar::{JsonFileCalendar, JsonLinesWriter};
use crate::state::FillState;

#[derive(Args)]
pub struct FillArgs {
    /// JSON file with busy intervals
    #[arg(long)]
    busy: PathBuf,
    /// IANA timezone, e.g. Europe/Berlin
    #[arg(long)]
    tz: Option<String>,
    /// Plan tier (free, monthly, annual, lifetime)
    #[arg(long)]
    plan: Option<PlanTier>,
    /// Percentage of chunks to fill (0-100)
    #[arg(long)]
    percentage: Option<f64>,
    /// Only use chunks starting at or after this time (RFC 3339)
    #[arg(long)]
    start: Option<DateTime<Utc>>,
    /// Only use chunks ending at or before this time (RFC 3339)
    #[arg(long)]
    end: Option<DateTime<Utc>>,
    /// Seed for reproducible placement
    #[arg(long)]
    seed: Option<u64>,
    /// Override the current time (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Write events to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Cooldown state file
    #[arg(long)]
    state: Option<PathBuf>,
    /// Print the planned events without writing them or touching the cooldown
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: FillArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let tz = super::resolve_time_zone(args.tz.as_deref(), &config)?;
    let plan = args.plan.unwrap_or(config.plan);
    let now = args.now.unwrap_or_else(Utc::now);

    let state_path = match (&args.state, config_path) {
        (Some(path), _) => path.clone(),
        (None, Some(config)) => config.with_file_name("state.json"),
        (None, None) => FillState::default_path()?,
    };
    let mut state = FillState::load(&state_path)?;
    debug!(path = %state_path.display(), next_update = ?state.next_update, "loaded fill state");

    let mut request = FillRequest::new(tz, plan)
        .with_percentage(args.percentage.unwrap_or(config.placement.percentage))
        .with_durations(
            config.placement.min_duration_minutes,
            config.placement.max_duration_minutes,
        )
        .with_next_update(state.next_update)
        .with_seed(args.seed.or(config.seed));
    if args.start.is_some() || args.end.is_some() {
        let start = args.start.unwrap_or(now);
        let end = args.end.unwrap_or_else(|| plan.horizon_from(now));
        request = request.with_window(FillWindow::new(start, end)?);
    }

    let planner = FillPlanner::new(config.event_pool()?);
    let reader = JsonFileCalendar::new(&args.busy);

    if args.dry_run {
        let computed = planner.compute(&reader, &request, now)?;
        println!("{}", serde_json::to_string_pretty(&computed)?);
        return Ok(());
    }

    let out: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = JsonLinesWriter::new(out);
    let outcome = planner.fill(&reader, &mut writer, &request, now)?;

    state.next_update = outcome.next_update;
    state.save(&state_path)?;

    eprintln!(
        "wrote {} of {} events",
        outcome.report.written_count(),
        outcome.computed.events.len()
    );
    for failure in &outcome.report.failures {
        eprintln!("failed: {} ({})", failure.event.title, failure.message);
    }
    if let Some(next_update) = outcome.next_update {
        eprintln!("next update allowed on {}", next_update.format("%Y-%m-%d"));
    }
    Ok(())
}
