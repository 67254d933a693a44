// libs/slot-calendar-cell/src/services/calendar.rs
use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::models::{
    AppointmentRecord, AppointmentStatus, CalendarError, ClockTime, MonthDayBuckets, MonthGrid,
    SortDirection,
};

/// Parses a record date (`YYYY-MM-DD`). A trailing time part separated by
/// `T` or a space is ignored.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = raw.trim();
    let day_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(raw.to_string()))
}

/// Places a record relative to `now`.
///
/// Other days are `Past` or `Upcoming` by date alone. On the same day,
/// `distinguish_today` reports `Today`; otherwise the start time decides,
/// and a record without one counts as `Upcoming`.
pub fn classify_appointment(
    record: &AppointmentRecord,
    now: NaiveDateTime,
    distinguish_today: bool,
) -> Result<AppointmentStatus, CalendarError> {
    let record_day = parse_record_date(&record.date)?;
    let now_day = now.date();

    match record_day.cmp(&now_day) {
        Ordering::Less => Ok(AppointmentStatus::Past),
        Ordering::Greater => Ok(AppointmentStatus::Upcoming),
        Ordering::Equal if distinguish_today => Ok(AppointmentStatus::Today),
        Ordering::Equal => {
            let Some(raw_start) = record.start_time.as_deref() else {
                return Ok(AppointmentStatus::Upcoming);
            };
            let start = ClockTime::parse(raw_start)?;
            let now_minutes = now.time().hour() * 60 + now.time().minute();

            if start.minutes_since_midnight() <= now_minutes {
                Ok(AppointmentStatus::Past)
            } else {
                Ok(AppointmentStatus::Upcoming)
            }
        }
    }
}

/// Groups records falling in (`month`, `year`) by day of month, keeping
/// input order inside each day. Records in other months are left out.
pub fn bucket_by_day(
    records: &[AppointmentRecord],
    month: u32,
    year: i32,
) -> Result<MonthDayBuckets, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }

    let mut buckets = MonthDayBuckets::new();
    for record in records {
        let date = parse_record_date(&record.date)?;
        if date.month() == month && date.year() == year {
            buckets.entry(date.day()).or_default().push(record.clone());
        }
    }

    Ok(buckets)
}

/// Stable sort on (date, start time); a missing start time sorts as 00:00.
pub fn sort_chronological(
    records: &[AppointmentRecord],
    direction: SortDirection,
) -> Result<Vec<AppointmentRecord>, CalendarError> {
    let mut keyed = records
        .iter()
        .map(|record| -> Result<_, CalendarError> {
            let date = parse_record_date(&record.date)?;
            let start = match record.start_time.as_deref() {
                Some(raw) => ClockTime::parse(raw)?,
                None => ClockTime::MIDNIGHT,
            };
            Ok(((date, start), record))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match direction {
        SortDirection::Ascending => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        SortDirection::Descending => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    Ok(keyed.into_iter().map(|(_, record)| record.clone()).collect())
}

pub fn month_grid(year: i32, month: u32) -> Result<MonthGrid, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }

    let invalid = || CalendarError::InvalidDate(format!("{:04}-{:02}", year, month));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(invalid)?;

    Ok(MonthGrid {
        year,
        month,
        days_in_month: (next_first - first).num_days() as u32,
        leading_blanks: first.weekday().num_days_from_monday(),
    })
}

impl MonthGrid {
    pub fn previous(&self) -> Result<MonthGrid, CalendarError> {
        if self.month == 1 {
            month_grid(self.year - 1, 12)
        } else {
            month_grid(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Result<MonthGrid, CalendarError> {
        if self.month == 12 {
            month_grid(self.year + 1, 1)
        } else {
            month_grid(self.year, self.month + 1)
        }
    }
}
