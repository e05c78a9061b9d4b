//! Public entry points: compute free chunks, place events, run a full fill.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::adapters::{write_all, CalendarReader, CalendarWriter, WriteReport};
use crate::cooldown::CooldownGate;
use crate::error::{CoreError, ValidationError};
use crate::interval::{BusyInterval, Chunk};
use crate::placement::{
    EventPool, PlacementParameters, RandomEventPlacer, SyntheticEvent,
    DEFAULT_MAX_DURATION_MINUTES, DEFAULT_MIN_DURATION_MINUTES, DEFAULT_PERCENTAGE,
};
use crate::plan::PlanTier;
use crate::timeline::{ChunkSplitter, FillWindow, FreeSlotFinder};

/// Free chunks from the current instant up to `range_end`.
pub fn compute_free_slots(
    busy: &[BusyInterval],
    range_end: DateTime<Utc>,
    tz: Tz,
) -> Result<Vec<Chunk>, ValidationError> {
    compute_free_slots_at(busy, Utc::now(), range_end, tz)
}

/// Free chunks with an explicit "now".
pub fn compute_free_slots_at(
    busy: &[BusyInterval],
    now: DateTime<Utc>,
    range_end: DateTime<Utc>,
    tz: Tz,
) -> Result<Vec<Chunk>, ValidationError> {
    let free = FreeSlotFinder::new().find_free_slots_at(busy, now, range_end, tz)?;
    let chunks = ChunkSplitter::new(tz).split(&free);
    debug!(free = free.len(), chunks = chunks.len(), "computed free chunks");
    Ok(chunks)
}

/// Place synthetic events into `chunks` with the given random source.
pub fn place_random_events<R: Rng + ?Sized>(
    chunks: &[Chunk],
    params: &PlacementParameters,
    pool: &EventPool,
    tz: Tz,
    rng: &mut R,
) -> Vec<SyntheticEvent> {
    RandomEventPlacer::new(pool.clone()).place(chunks, params, tz, rng)
}

/// Everything a fill needs besides the calendars themselves.
#[derive(Debug, Clone)]
pub struct FillRequest {
    pub tz: Tz,
    pub plan: PlanTier,
    pub percentage: f64,
    pub min_duration_minutes: i64,
    pub max_duration_minutes: i64,
    /// Defaults to `[now, plan horizon]`.
    pub window: Option<FillWindow>,
    /// Stored cooldown date from the previous fill.
    pub next_update: Option<DateTime<Utc>>,
    /// Seed for reproducible placement; entropy when `None`.
    pub seed: Option<u64>,
}

impl FillRequest {
    pub fn new(tz: Tz, plan: PlanTier) -> Self {
        Self {
            tz,
            plan,
            percentage: DEFAULT_PERCENTAGE,
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            window: None,
            next_update: None,
            seed: None,
        }
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = percentage;
        self
    }

    pub fn with_durations(mut self, min_minutes: i64, max_minutes: i64) -> Self {
        self.min_duration_minutes = min_minutes;
        self.max_duration_minutes = max_minutes;
        self
    }

    pub fn with_window(mut self, window: FillWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_next_update(mut self, next_update: Option<DateTime<Utc>>) -> Self {
        self.next_update = next_update;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of the compute stage: the chunks considered and the events placed.
#[derive(Debug, Clone, Serialize)]
pub struct ComputedFill {
    pub range_end: DateTime<Utc>,
    pub chunks: Vec<Chunk>,
    pub events: Vec<SyntheticEvent>,
}

/// Result of a fill that went through the writer.
#[derive(Debug, Clone, Serialize)]
pub struct FillOutcome {
    pub computed: ComputedFill,
    pub report: WriteReport,
    /// Cooldown date to store for the next fill.
    pub next_update: Option<DateTime<Utc>>,
}

/// Runs reader -> slot finder -> splitter -> window -> placer -> writer.
#[derive(Debug, Clone, Default)]
pub struct FillPlanner {
    placer: RandomEventPlacer,
}

impl FillPlanner {
    pub fn new(pool: EventPool) -> Self {
        Self {
            placer: RandomEventPlacer::new(pool),
        }
    }

    /// Read busy time and compute the events to write.
    pub fn compute<Rd: CalendarReader + ?Sized>(
        &self,
        reader: &Rd,
        request: &FillRequest,
        now: DateTime<Utc>,
    ) -> Result<ComputedFill, CoreError> {
        let params = PlacementParameters::new(
            request.percentage,
            request.min_duration_minutes,
            request.max_duration_minutes,
            request.plan.is_paid(),
        )?;

        let horizon = request.plan.horizon_from(now);
        let window = match request.window {
            Some(window) => window,
            None => FillWindow::new(now, horizon)?,
        };
        let range_end = window.end().min(horizon);

        let busy = reader.busy_intervals(range_end, request.tz)?;
        debug!(reader = reader.name(), busy = busy.len(), %range_end, "read busy intervals");

        let chunks = window.retain(compute_free_slots_at(&busy, now, range_end, request.tz)?);
        let events = self.placer.place_seeded(&chunks, &params, request.tz, request.seed);

        Ok(ComputedFill {
            range_end,
            chunks,
            events,
        })
    }

    /// Compute events and write them, honoring the plan's cooldown.
    ///
    /// The cooldown only advances when every event was written.
    pub fn fill<Rd, W>(
        &self,
        reader: &Rd,
        writer: &mut W,
        request: &FillRequest,
        now: DateTime<Utc>,
    ) -> Result<FillOutcome, CoreError>
    where
        Rd: CalendarReader + ?Sized,
        W: CalendarWriter + ?Sized,
    {
        CooldownGate::check(request.next_update, now)?;

        let computed = self.compute(reader, request, now)?;
        let report = write_all(writer, &computed.events);

        let next_update = if report.is_success() {
            CooldownGate::next_update_after(request.plan, now)
        } else {
            request.next_update
        };

        info!(
            writer = writer.name(),
            written = report.written_count(),
            failed = report.failed_count(),
            "calendar fill finished"
        );

        Ok(FillOutcome {
            computed,
            report,
            next_update,
        })
    }
}
