//! File-backed calendar adapters.
//!
//! Busy time is read from a JSON array of `{"start": ..., "end": ...}`
//! objects with RFC 3339 timestamps. Synthetic events are written as one
//! JSON payload per line.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use slotfill_core::{sort_by_start, AdapterError, BusyInterval, CalendarReader, CalendarWriter, SyntheticEvent};

#[derive(Debug, Deserialize)]
struct BusyRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Reads busy intervals from a JSON file.
pub struct JsonFileCalendar {
    path: PathBuf,
}

impl JsonFileCalendar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_error(&self, message: impl ToString) -> AdapterError {
        AdapterError::Read {
            calendar: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl CalendarReader for JsonFileCalendar {
    fn name(&self) -> &str {
        "file"
    }

    fn busy_intervals(
        &self,
        range_end: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<BusyInterval>, AdapterError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;
        let records: Vec<BusyRecord> =
            serde_json::from_str(&content).map_err(|e| self.read_error(e))?;

        let mut busy = records
            .into_iter()
            .filter(|r| r.start < range_end)
            .map(|r| BusyInterval::from_utc(r.start, r.end, tz).map_err(|e| self.read_error(e)))
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_start(&mut busy);
        Ok(busy)
    }
}

/// Writes each event as a JSON line, flushing after every event.
pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CalendarWriter for JsonLinesWriter<W> {
    fn name(&self) -> &str {
        "json-lines"
    }

    fn write_event(&mut self, event: &SyntheticEvent) -> Result<(), AdapterError> {
        let line = serde_json::to_string(event).map_err(|e| AdapterError::Write(e.to_string()))?;
        // An event only counts as written once it has left the buffer.
        writeln!(self.out, "{line}")
            .and_then(|()| self.out.flush())
            .map_err(|e| AdapterError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;
    use slotfill_core::{write_all, TimeInterval};
    use std::io;

    #[test]
    fn test_reads_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busy.json");
        std::fs::write(
            &path,
            r#"[
                {"start": "2026-10-20T12:00:00Z", "end": "2026-10-20T13:00:00Z"},
                {"start": "2026-10-20T08:00:00+02:00", "end": "2026-10-20T09:00:00+02:00"},
                {"start": "2026-11-30T08:00:00Z", "end": "2026-11-30T09:00:00Z"}
            ]"#,
        )
        .unwrap();

        let range_end = Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let busy = JsonFileCalendar::new(&path).busy_intervals(range_end, Berlin).unwrap();

        assert_eq!(busy.len(), 2);
        assert_eq!(busy[0].start(), Berlin.with_ymd_and_hms(2026, 10, 20, 8, 0, 0).unwrap());
        assert_eq!(busy[1].start(), Berlin.with_ymd_and_hms(2026, 10, 20, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_inverted_record_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busy.json");
        std::fs::write(
            &path,
            r#"[{"start": "2026-10-20T12:00:00Z", "end": "2026-10-20T11:00:00Z"}]"#,
        )
        .unwrap();

        let range_end = Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let err = JsonFileCalendar::new(&path).busy_intervals(range_end, Berlin).unwrap_err();
        assert!(matches!(err, AdapterError::Read { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let range_end = Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let err = JsonFileCalendar::new("/nonexistent/busy.json")
            .busy_intervals(range_end, Berlin)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/busy.json"));
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let start = Berlin.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap();
        let interval = TimeInterval::new(start, start + chrono::Duration::minutes(45)).unwrap();
        let event = SyntheticEvent {
            title: "Focus".into(),
            description: "Deep work".into(),
            start: interval.start(),
            end: interval.end(),
        };

        let mut writer = JsonLinesWriter::new(Vec::new());
        writer.write_event(&event).unwrap();
        writer.write_event(&event).unwrap();

        let text = String::from_utf8(writer.out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let json: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(json["summary"], "Focus");
        assert_eq!(json["start"]["timeZone"], "Europe/Berlin");
    }

    /// Accepts every write but refuses to flush.
    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }
    }

    fn sample_event(hour: u32) -> SyntheticEvent {
        let start = Berlin.with_ymd_and_hms(2026, 10, 20, hour, 0, 0).unwrap();
        SyntheticEvent {
            title: "Focus".into(),
            description: "Deep work".into(),
            start,
            end: start + chrono::Duration::minutes(30),
        }
    }

    #[test]
    fn test_flush_failure_is_reported_per_event() {
        let events = vec![sample_event(9), sample_event(11)];
        let mut writer = JsonLinesWriter::new(FullDevice);

        let report = write_all(&mut writer, &events);

        assert!(!report.is_success());
        assert_eq!(report.written_count(), 0);
        assert_eq!(report.failed_count(), 2);
        assert!(report.failures[0].message.contains("no space left on device"));
    }

    #[test]
    fn test_buffered_file_output_is_flushed_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = JsonLinesWriter::new(std::io::BufWriter::new(file));

        writer.write_event(&sample_event(9)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
