// libs/slot-calendar-cell/src/services/slots.rs
use std::collections::BTreeSet;

use shared_models::clinic::TimeslotEntry;

use crate::models::{
    CalendarError, ClockTime, DaySchedule, SlotConfig, SlotInterval, SlotMismatch, SlotView,
    TimeSlotId,
};

/// Clock interval covered by the 1-based slot `index`.
///
/// Slot `i` starts `(i - 1) * width` minutes after opening and lasts one
/// width, so consecutive slots share their boundary.
pub fn slot_to_interval(index: u32, config: &SlotConfig) -> Result<SlotInterval, CalendarError> {
    if index < 1 || index > config.slot_count() {
        return Err(CalendarError::OutOfRange {
            index,
            slot_count: config.slot_count(),
        });
    }

    let width = config.slot_width_minutes();
    let start = config.open_hour() * 60 + (index - 1) * width;
    let end = start + width;

    Ok(SlotInterval::new(ClockTime::from_minutes(start), ClockTime::from_minutes(end)))
}

pub fn slot_id_to_interval(ts_id: &str, config: &SlotConfig) -> Result<SlotInterval, CalendarError> {
    let id: TimeSlotId = ts_id.parse()?;
    slot_to_interval(id.index(), config)
}

/// Every configured slot with its availability. Ids that do not name one of
/// the configured slots come back in `unknown_slot_ids` in first-seen order.
pub fn day_schedule<'a, I>(config: &SlotConfig, available_ids: I) -> DaySchedule
where
    I: IntoIterator<Item = &'a str>,
{
    let mut available = BTreeSet::new();
    let mut unknown_slot_ids: Vec<String> = Vec::new();

    for raw in available_ids {
        match raw.parse::<TimeSlotId>() {
            Ok(id) if id.index() <= config.slot_count() => {
                available.insert(id.index());
            }
            _ => {
                if !unknown_slot_ids.iter().any(|u| u == raw) {
                    unknown_slot_ids.push(raw.to_string());
                }
            }
        }
    }

    let slots = (1..=config.slot_count())
        .filter_map(|index| {
            let interval = slot_to_interval(index, config).ok()?;
            let ts_id = TimeSlotId::new(index).ok()?;
            Some(SlotView {
                ts_id,
                label: interval.label(),
                interval,
                available: available.contains(&index),
            })
        })
        .collect();

    DaySchedule { slots, unknown_slot_ids }
}

/// Backend slots whose reported start/end disagree with the configured
/// schedule. Entries without reported times, or with ids outside the
/// schedule, are not checked here.
pub fn verify_backend_slots(entries: &[TimeslotEntry], config: &SlotConfig) -> Vec<SlotMismatch> {
    entries
        .iter()
        .filter_map(|entry| {
            let expected = slot_id_to_interval(&entry.ts_id, config).ok()?;

            let start_ok = reported_matches(entry.start_time.as_deref(), expected.start());
            let end_ok = reported_matches(entry.end_time.as_deref(), expected.end());
            if start_ok && end_ok {
                return None;
            }

            Some(SlotMismatch {
                ts_id: entry.ts_id.clone(),
                expected,
                reported_start: entry.start_time.clone(),
                reported_end: entry.end_time.clone(),
            })
        })
        .collect()
}

fn reported_matches(reported: Option<&str>, expected: ClockTime) -> bool {
    match reported {
        None => true,
        // 24:00 comes back from the backend as 00:00
        Some(raw) => ClockTime::parse(raw)
            .map(|t| t.minutes_since_midnight() % (24 * 60) == expected.minutes_since_midnight() % (24 * 60))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts_id: &str, start: Option<&str>, end: Option<&str>) -> TimeslotEntry {
        TimeslotEntry {
            ts_id: ts_id.to_string(),
            start_time: start.map(str::to_string),
            end_time: end.map(str::to_string),
        }
    }

    #[test]
    fn eighteen_slot_schedule_runs_to_five() {
        let config = SlotConfig::new(8, 30, 18).unwrap();
        let last = slot_to_interval(18, &config).unwrap();
        assert_eq!(last.start(), ClockTime { hour: 16, minute: 30 });
        assert_eq!(last.end(), ClockTime { hour: 17, minute: 0 });
    }

    #[test]
    fn day_schedule_marks_available_slots() {
        let config = SlotConfig::default();
        let schedule = day_schedule(&config, ["TS002", "TS010"]);

        assert_eq!(schedule.slots.len(), 10);
        assert!(!schedule.slots[0].available);
        assert!(schedule.slots[1].available);
        assert!(schedule.slots[9].available);
        assert_eq!(schedule.slots[1].label, "8:30 AM - 9:00 AM");
        assert_eq!(schedule.available_count(), 2);
        assert!(schedule.unknown_slot_ids.is_empty());
    }

    #[test]
    fn day_schedule_reports_ids_outside_the_schedule() {
        let config = SlotConfig::default();
        let schedule = day_schedule(&config, ["TS011", "bogus", "TS011", "TS001"]);

        assert_eq!(schedule.unknown_slot_ids, vec!["TS011".to_string(), "bogus".to_string()]);
        assert_eq!(schedule.available_count(), 1);
    }

    #[test]
    fn backend_times_matching_the_schedule_are_accepted() {
        let config = SlotConfig::default();
        let entries = vec![
            entry("TS001", Some("08:00:00"), Some("08:30:00")),
            entry("TS004", None, None),
        ];
        assert!(verify_backend_slots(&entries, &config).is_empty());
    }

    #[test]
    fn backend_times_from_a_different_schedule_are_flagged() {
        // an hourly backend schedule against half-hour slots
        let config = SlotConfig::default();
        let entries = vec![entry("TS003", Some("10:00:00"), Some("11:00:00"))];

        let mismatches = verify_backend_slots(&entries, &config);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].ts_id, "TS003");
        assert_eq!(mismatches[0].expected.start(), ClockTime { hour: 9, minute: 0 });
    }

    #[test]
    fn midnight_end_matches_backend_zero_hour() {
        let config = SlotConfig::new(23, 30, 2).unwrap();
        let entries = vec![entry("TS002", Some("23:30"), Some("00:00:00"))];
        assert!(verify_backend_slots(&entries, &config).is_empty());
    }
}
