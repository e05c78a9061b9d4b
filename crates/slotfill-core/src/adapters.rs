//! Calendar read/write collaborator contracts.
//!
//! Providers (Google, Outlook, files) live outside the core. Readers hand
//! over busy time already normalized to the target timezone; writers
//! persist synthetic events one at a time and report failures as data.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::error::AdapterError;
use crate::interval::BusyInterval;
use crate::placement::SyntheticEvent;

/// Source of existing calendar events.
pub trait CalendarReader {
    /// Unique identifier (e.g. "google", "outlook", "file").
    fn name(&self) -> &str;

    /// Busy intervals from now up to `range_end`, expressed in `tz`.
    fn busy_intervals(
        &self,
        range_end: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<BusyInterval>, AdapterError>;
}

/// Destination for synthetic events.
pub trait CalendarWriter {
    fn name(&self) -> &str;

    /// Persist a single event.
    fn write_event(&mut self, event: &SyntheticEvent) -> Result<(), AdapterError>;
}

/// An event the writer could not persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteFailure {
    pub message: String,
    pub event: SyntheticEvent,
}

/// Per-event outcome of a batch write. Nothing is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WriteReport {
    pub written: Vec<SyntheticEvent>,
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

/// Write every event, collecting failures instead of stopping at the first.
pub fn write_all<W: CalendarWriter + ?Sized>(writer: &mut W, events: &[SyntheticEvent]) -> WriteReport {
    let mut report = WriteReport::default();

    for event in events {
        match writer.write_event(event) {
            Ok(()) => report.written.push(event.clone()),
            Err(e) => {
                warn!(writer = writer.name(), title = %event.title, "failed to write event: {e}");
                report.failures.push(WriteFailure {
                    message: e.to_string(),
                    event: event.clone(),
                });
            }
        }
    }

    report
}
