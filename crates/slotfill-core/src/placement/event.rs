//! Synthetic filler events.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

/// A randomly generated event, ready for a calendar writer.
///
/// Never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticEvent {
    pub title: String,
    pub description: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl SyntheticEvent {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn time_zone(&self) -> Tz {
        self.start.timezone()
    }
}

/// Provider-style time: a UTC instant plus the IANA zone name.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: String,
    time_zone: &'static str,
}

impl EventTime {
    fn new(at: &DateTime<Tz>) -> Self {
        Self {
            date_time: at
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            time_zone: at.timezone().name(),
        }
    }
}

#[derive(Serialize)]
struct EventPayload<'a> {
    summary: &'a str,
    description: &'a str,
    start: EventTime,
    end: EventTime,
}

impl Serialize for SyntheticEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EventPayload {
            summary: &self.title,
            description: &self.description,
            start: EventTime::new(&self.start),
            end: EventTime::new(&self.end),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    #[test]
    fn test_serializes_as_provider_payload() {
        let event = SyntheticEvent {
            title: "Pipeline Review".into(),
            description: "Review and assess sales pipeline.".into(),
            start: Berlin.with_ymd_and_hms(2026, 10, 20, 9, 15, 0).unwrap(),
            end: Berlin.with_ymd_and_hms(2026, 10, 20, 10, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["summary"], "Pipeline Review");
        assert_eq!(json["start"]["dateTime"], "2026-10-20T07:15:00.000Z");
        assert_eq!(json["start"]["timeZone"], "Europe/Berlin");
        assert_eq!(json["end"]["dateTime"], "2026-10-20T08:00:00.000Z");
        assert_eq!(event.duration_minutes(), 45);
    }
}
