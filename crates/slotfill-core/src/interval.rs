//! Time interval value types.
//!
//! Every interval is timezone-aware (`chrono_tz::Tz`) and satisfies
//! `start < end`. The wrappers mark where an interval came from:
//! busy time from a calendar, free time found by the slot finder, or a
//! standard-duration chunk ready for event placement.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ValidationError;

/// Resolve an IANA timezone name such as `Europe/Berlin`.
pub fn parse_time_zone(name: &str) -> Result<Tz, ValidationError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ValidationError::UnknownTimeZone(name.to_string()))
}

/// A half-open `[start, end)` range of instants in a named timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl TimeInterval {
    /// Create an interval, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidInterval {
                start: start.with_timezone(&Utc),
                end: end.with_timezone(&Utc),
            });
        }
        Ok(Self { start, end })
    }

    /// Caller guarantees `start < end`.
    pub(crate) fn from_ordered(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        debug_assert!(start < end, "interval must satisfy start < end");
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// Length in whole minutes, truncated.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if this interval shares any instant with `other`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Same instants, expressed in another timezone.
    pub fn with_timezone(&self, tz: Tz) -> Self {
        Self {
            start: self.start.with_timezone(&tz),
            end: self.end.with_timezone(&tz),
        }
    }
}

/// Time already occupied by an existing calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BusyInterval(TimeInterval);

impl BusyInterval {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self, ValidationError> {
        TimeInterval::new(start, end).map(Self)
    }

    /// Normalize provider UTC instants into the target timezone.
    pub fn from_utc(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Self, ValidationError> {
        Self::new(start.with_timezone(&tz), end.with_timezone(&tz))
    }

    pub fn interval(&self) -> &TimeInterval {
        &self.0
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.0.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.0.end
    }
}

impl From<TimeInterval> for BusyInterval {
    fn from(interval: TimeInterval) -> Self {
        Self(interval)
    }
}

/// Busy-free time inside one day's working window.
///
/// Only the slot finder creates these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FreeInterval(TimeInterval);

impl FreeInterval {
    pub(crate) fn new(interval: TimeInterval) -> Self {
        Self(interval)
    }

    pub fn interval(&self) -> &TimeInterval {
        &self.0
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.0.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.0.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.0.duration_minutes()
    }
}

/// A slot handed to the event placer.
///
/// Chunks from [`crate::ChunkSplitter`] always last one of the
/// [`StandardDuration`]s; [`Chunk::from_interval`] accepts any interval so
/// previously computed slots can be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chunk(TimeInterval);

impl Chunk {
    pub fn from_interval(interval: TimeInterval) -> Self {
        Self(interval)
    }

    pub fn interval(&self) -> &TimeInterval {
        &self.0
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.0.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.0.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.0.duration_minutes()
    }
}

/// Chunk lengths, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StandardDuration {
    Minutes120,
    Minutes90,
    Minutes60,
    Minutes30,
}

impl StandardDuration {
    /// Candidates in greedy order.
    pub const DESCENDING: [StandardDuration; 4] = [
        StandardDuration::Minutes120,
        StandardDuration::Minutes90,
        StandardDuration::Minutes60,
        StandardDuration::Minutes30,
    ];

    pub fn minutes(self) -> i64 {
        match self {
            Self::Minutes120 => 120,
            Self::Minutes90 => 90,
            Self::Minutes60 => 60,
            Self::Minutes30 => 30,
        }
    }

    /// Largest candidate not exceeding `available` minutes.
    pub fn largest_fitting(available: i64) -> Option<Self> {
        Self::DESCENDING
            .into_iter()
            .find(|d| d.minutes() <= available)
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::DESCENDING
            .into_iter()
            .find(|d| d.minutes() == minutes)
    }
}

/// Sort busy intervals by start time (then end time).
///
/// The slot finder scans its input once with a single cursor, so read
/// adapters that cannot guarantee ordering should call this first.
pub fn sort_by_start(busy: &mut [BusyInterval]) {
    busy.sort_by_key(|b| (b.start(), b.end()));
}

pub(crate) fn is_sorted_by_start(busy: &[BusyInterval]) -> bool {
    busy.windows(2).all(|pair| pair[0].start() <= pair[1].start())
}
