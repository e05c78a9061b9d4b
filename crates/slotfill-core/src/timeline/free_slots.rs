//! Free time detection inside working hours.
//!
//! Walks the calendar day by day from "now" up to a range end, keeps
//! Monday through Friday, and subtracts busy intervals from the fixed
//! 08:00-18:00 local working window.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::interval::{is_sorted_by_start, BusyInterval, FreeInterval, TimeInterval};

/// First working hour of the day, local time.
pub const WORKDAY_START_HOUR: u32 = 8;
/// End of the working window, local time (exclusive).
pub const WORKDAY_END_HOUR: u32 = 18;

/// Whether free time is looked for on this weekday.
pub fn is_working_day(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Detector for free intervals across a date range.
///
/// Busy intervals are scanned once, in the order given, with a single
/// "last free instant" cursor per day. Input sorted by start time is a
/// precondition: an interval that starts before the cursor is skipped
/// even if it overlaps time already reported as free. Use
/// [`crate::interval::sort_by_start`] when the source order is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeSlotFinder;

impl FreeSlotFinder {
    pub fn new() -> Self {
        Self
    }

    /// Find free intervals from the current instant up to `range_end`.
    pub fn find_free_slots(
        &self,
        busy: &[BusyInterval],
        range_end: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<FreeInterval>, ValidationError> {
        self.find_free_slots_at(busy, Utc::now(), range_end, tz)
    }

    /// Find free intervals with an explicit "now".
    ///
    /// # Arguments
    /// * `busy` - Existing calendar events, sorted by start time
    /// * `now` - Instant the scan starts from; earlier time is never free
    /// * `range_end` - Days whose current-time marker falls at or after this are not visited
    /// * `tz` - Timezone that defines days and working hours
    ///
    /// # Returns
    /// Free intervals in chronological day order, detection order within a day
    pub fn find_free_slots_at(
        &self,
        busy: &[BusyInterval],
        now: DateTime<Utc>,
        range_end: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<FreeInterval>, ValidationError> {
        if range_end < now {
            return Err(ValidationError::InvalidTimeRange {
                start: now,
                end: range_end,
            });
        }

        if !is_sorted_by_start(busy) {
            warn!(
                count = busy.len(),
                "busy intervals are not sorted by start; overlapping free slots may be reported"
            );
        }

        let now_local = now.with_timezone(&tz);
        let today = now_local.date_naive();
        let time_of_day = now_local.time();

        let mut slots = Vec::new();
        let mut date = today;

        loop {
            // The day is visited while "now" shifted onto it is still before the range end.
            let Some(marker) = resolve_local(tz, date.and_time(time_of_day)) else {
                warn!(%date, "cannot resolve local time, stopping scan");
                break;
            };
            if marker.with_timezone(&Utc) >= range_end {
                break;
            }

            if is_working_day(date.weekday()) {
                match working_window(tz, date, (date == today).then_some(now_local)) {
                    Some((window_start, window_end)) => {
                        let before = slots.len();
                        scan_day(busy, window_start, window_end, tz, &mut slots);
                        debug!(%date, slots = slots.len() - before, "scanned working day");
                    }
                    None => debug!(%date, "working window already over"),
                }
            }

            let Some(next) = date.succ_opt() else {
                break;
            };
            date = next;
        }

        Ok(slots)
    }
}

/// Subtract busy time from one working window, appending free intervals.
fn scan_day(
    busy: &[BusyInterval],
    window_start: DateTime<Tz>,
    window_end: DateTime<Tz>,
    tz: Tz,
    slots: &mut Vec<FreeInterval>,
) {
    let mut cursor = window_start;

    for event in busy {
        let start = event.start().with_timezone(&tz);

        // Only events starting at or after the cursor and not after the window end count
        if start < cursor || start > window_end {
            continue;
        }

        if cursor < start {
            slots.push(FreeInterval::new(TimeInterval::from_ordered(cursor, start)));
        }

        // start >= cursor and end > start, so this always moves forward
        cursor = event.end().with_timezone(&tz);
    }

    if cursor < window_end {
        slots.push(FreeInterval::new(TimeInterval::from_ordered(cursor, window_end)));
    }
}

/// Working window for `date`, clamped to `now` on the current day.
fn working_window(
    tz: Tz,
    date: NaiveDate,
    now: Option<DateTime<Tz>>,
) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let opening = resolve_local(tz, date.and_time(hour(WORKDAY_START_HOUR)?))?;
    let closing = resolve_local(tz, date.and_time(hour(WORKDAY_END_HOUR)?))?;

    let start = match now {
        Some(now) => opening.max(now),
        None => opening,
    };

    (start < closing).then_some((start, closing))
}

fn hour(h: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, 0, 0)
}

/// Map a wall-clock time to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times that do
/// not exist (DST spring-forward) move one hour later.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::Europe::Berlin;

    // 2026-10-19 is a Monday.
    fn local(tz: Tz, day: u32, h: u32, m: u32) -> DateTime<Tz> {
        tz.with_ymd_and_hms(2026, 10, day, h, m, 0).unwrap()
    }

    fn utc(tz: Tz, day: u32, h: u32, m: u32) -> DateTime<Utc> {
        local(tz, day, h, m).with_timezone(&Utc)
    }

    fn busy(tz: Tz, day: u32, from: (u32, u32), to: (u32, u32)) -> BusyInterval {
        BusyInterval::new(local(tz, day, from.0, from.1), local(tz, day, to.0, to.1)).unwrap()
    }

    fn bounds(slots: &[FreeInterval]) -> Vec<(DateTime<Tz>, DateTime<Tz>)> {
        slots.iter().map(|s| (s.start(), s.end())).collect()
    }

    #[test]
    fn test_empty_day_yields_clamped_window() {
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&[], utc(Berlin, 19, 9, 0), utc(Berlin, 19, 23, 0), Berlin)
            .unwrap();

        assert_eq!(bounds(&slots), vec![(local(Berlin, 19, 9, 0), local(Berlin, 19, 18, 0))]);
    }

    #[test]
    fn test_future_days_start_at_eight() {
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&[], utc(Berlin, 19, 20, 0), utc(Berlin, 20, 21, 0), Berlin)
            .unwrap();

        assert_eq!(bounds(&slots), vec![(local(Berlin, 20, 8, 0), local(Berlin, 20, 18, 0))]);
    }

    #[test]
    fn test_skips_weekends() {
        // Friday 23rd evening through Monday 26th morning
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&[], utc(Berlin, 23, 19, 0), utc(Berlin, 26, 20, 0), Berlin)
            .unwrap();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_busy_intervals_split_the_day() {
        let events = vec![
            busy(Berlin, 20, (9, 0), (10, 0)),
            busy(Berlin, 20, (11, 30), (12, 0)),
        ];
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&events, utc(Berlin, 19, 19, 0), utc(Berlin, 20, 20, 0), Berlin)
            .unwrap();

        assert_eq!(
            bounds(&slots),
            vec![
                (local(Berlin, 20, 8, 0), local(Berlin, 20, 9, 0)),
                (local(Berlin, 20, 10, 0), local(Berlin, 20, 11, 30)),
                (local(Berlin, 20, 12, 0), local(Berlin, 20, 18, 0)),
            ]
        );
    }

    #[test]
    fn test_fully_busy_day_yields_nothing() {
        let events = vec![busy(Berlin, 20, (8, 0), (18, 0))];
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&events, utc(Berlin, 19, 19, 0), utc(Berlin, 20, 20, 0), Berlin)
            .unwrap();

        assert!(slots.is_empty());
    }

    #[test]
    fn test_events_outside_window_are_ignored() {
        let events = vec![
            busy(Berlin, 20, (6, 0), (7, 30)),
            busy(Berlin, 20, (19, 0), (20, 0)),
        ];
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&events, utc(Berlin, 19, 19, 0), utc(Berlin, 20, 21, 0), Berlin)
            .unwrap();

        assert_eq!(bounds(&slots), vec![(local(Berlin, 20, 8, 0), local(Berlin, 20, 18, 0))]);
    }

    #[test]
    fn test_event_running_past_closing_consumes_rest_of_day() {
        let events = vec![busy(Berlin, 20, (17, 0), (19, 0))];
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&events, utc(Berlin, 19, 19, 0), utc(Berlin, 20, 21, 0), Berlin)
            .unwrap();

        assert_eq!(bounds(&slots), vec![(local(Berlin, 20, 8, 0), local(Berlin, 20, 17, 0))]);
    }

    #[test]
    fn test_event_before_cursor_is_not_subtracted() {
        // Starts before opening, so the single-cursor scan does not see it.
        let events = vec![busy(Berlin, 20, (7, 0), (9, 0))];
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&events, utc(Berlin, 19, 19, 0), utc(Berlin, 20, 21, 0), Berlin)
            .unwrap();

        assert_eq!(bounds(&slots), vec![(local(Berlin, 20, 8, 0), local(Berlin, 20, 18, 0))]);
    }

    #[test]
    fn test_unsorted_input_keeps_linear_scan_behavior() {
        let events = vec![
            busy(Berlin, 20, (14, 0), (15, 0)),
            busy(Berlin, 20, (10, 0), (11, 0)),
        ];
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&events, utc(Berlin, 19, 19, 0), utc(Berlin, 20, 21, 0), Berlin)
            .unwrap();

        // The 10:00 event arrives after the cursor passed it.
        assert_eq!(
            bounds(&slots),
            vec![
                (local(Berlin, 20, 8, 0), local(Berlin, 20, 14, 0)),
                (local(Berlin, 20, 15, 0), local(Berlin, 20, 18, 0)),
            ]
        );
    }

    #[test]
    fn test_after_closing_today_yields_nothing_today() {
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&[], utc(Berlin, 19, 18, 30), utc(Berlin, 19, 23, 0), Berlin)
            .unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = FreeSlotFinder::new().find_free_slots_at(
            &[],
            utc(Berlin, 20, 9, 0),
            utc(Berlin, 19, 9, 0),
            Berlin,
        );
        assert!(matches!(result, Err(ValidationError::InvalidTimeRange { .. })));
    }

    #[test]
    fn test_working_hours_follow_requested_timezone() {
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&[], utc(New_York, 19, 20, 0), utc(New_York, 20, 21, 0), New_York)
            .unwrap();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start(), local(New_York, 20, 8, 0));
        assert_eq!(slots[0].start().with_timezone(&Utc), utc(New_York, 20, 8, 0));
    }

    #[test]
    fn test_dst_change_keeps_local_working_hours() {
        // Berlin leaves summer time on Sunday 2026-10-25.
        let slots = FreeSlotFinder::new()
            .find_free_slots_at(&[], utc(Berlin, 23, 19, 0), utc(Berlin, 26, 20, 0), Berlin)
            .unwrap();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start(), local(Berlin, 26, 8, 0));
        assert_eq!(slots[0].duration_minutes(), 600);
    }
}
