// libs/slot-calendar-cell/src/models.rs
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use shared_config::AppConfig;
use shared_models::clinic::{AppointmentEntry, DoctorEntry};
use shared_models::error::AppError;

const MINUTES_PER_DAY: u32 = 24 * 60;

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Slot index {index} is out of range 1..={slot_count}")]
    OutOfRange { index: u32, slot_count: u32 },

    #[error("Invalid time slot id: {0}")]
    InvalidSlotId(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid schedule configuration: {0}")]
    InvalidConfig(String),
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidConfig(_) => AppError::Internal(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// A record fetched from the clinic backend could not be read.
    #[error("Clinic backend sent an unreadable record: {0}")]
    BackendData(CalendarError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotPermitted(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::Calendar(e) => e.into(),
            ScheduleError::BackendData(_) => AppError::ExternalService(err.to_string()),
            ScheduleError::Validation(msg) => AppError::ValidationError(msg),
            ScheduleError::NotPermitted(msg) => AppError::Auth(msg),
            ScheduleError::Backend(e) => AppError::ExternalService(e.to_string()),
        }
    }
}

// ==============================================================================
// SLOT CONFIGURATION & CLOCK TIMES
// ==============================================================================

/// Shape of the clinic day: when the first slot opens, how wide each slot is
/// and how many slots there are. Only constructible through `new`, so every
/// instance ends no later than midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotConfig {
    open_hour: u32,
    slot_width_minutes: u32,
    slot_count: u32,
}

impl SlotConfig {
    pub fn new(open_hour: u32, slot_width_minutes: u32, slot_count: u32) -> Result<Self, CalendarError> {
        if open_hour >= 24 {
            return Err(CalendarError::InvalidConfig(format!(
                "open hour {} is not an hour of the day", open_hour
            )));
        }
        if slot_width_minutes == 0 || 60 % slot_width_minutes != 0 {
            return Err(CalendarError::InvalidConfig(format!(
                "slot width {} does not divide an hour", slot_width_minutes
            )));
        }
        if slot_count == 0 {
            return Err(CalendarError::InvalidConfig("slot count must be positive".to_string()));
        }

        let close = open_hour as u64 * 60 + slot_count as u64 * slot_width_minutes as u64;
        if close > MINUTES_PER_DAY as u64 {
            return Err(CalendarError::InvalidConfig(format!(
                "{} slots of {} minutes from {:02}:00 run past midnight",
                slot_count, slot_width_minutes, open_hour
            )));
        }

        Ok(Self { open_hour, slot_width_minutes, slot_count })
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self, CalendarError> {
        Self::new(config.clinic_open_hour, config.slot_width_minutes, config.slot_count)
    }

    pub fn open_hour(&self) -> u32 {
        self.open_hour
    }

    pub fn slot_width_minutes(&self) -> u32 {
        self.slot_width_minutes
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    pub fn opening_time(&self) -> ClockTime {
        ClockTime::from_minutes(self.open_hour * 60)
    }

    pub fn closing_time(&self) -> ClockTime {
        ClockTime::from_minutes(self.open_hour * 60 + self.slot_count * self.slot_width_minutes)
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self { open_hour: 8, slot_width_minutes: 30, slot_count: 10 }
    }
}

/// Wall-clock time in minute resolution. `24:00` is representable so the
/// last slot of a day can end at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    pub fn from_minutes(minutes: u32) -> Self {
        Self { hour: minutes / 60, minute: minutes % 60 }
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Accepts `HH:MM` or `HH:MM:SS`; seconds are dropped.
    pub fn parse(raw: &str) -> Result<Self, CalendarError> {
        let trimmed = raw.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| CalendarError::InvalidTime(raw.to_string()))?;
        Ok(time.into())
    }

    /// `h:mm AM/PM`: minutes always two digits, hour never padded, 0 and 24 show as 12.
    pub fn format_12h(&self) -> String {
        let hour = self.hour % 24;
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, self.minute, suffix)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self { hour: time.hour(), minute: time.minute() }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl SlotInterval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start_hour: start.hour,
            start_minute: start.minute,
            end_hour: end.hour,
            end_minute: end.minute,
        }
    }

    pub fn start(&self) -> ClockTime {
        ClockTime { hour: self.start_hour, minute: self.start_minute }
    }

    pub fn end(&self) -> ClockTime {
        ClockTime { hour: self.end_hour, minute: self.end_minute }
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.start().format_12h(), self.end().format_12h())
    }
}

// ==============================================================================
// TIME SLOT IDS
// ==============================================================================

/// Backend slot identifier such as `TS001`; the number is the 1-based slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlotId(u32);

impl TimeSlotId {
    pub fn new(index: u32) -> Result<Self, CalendarError> {
        if index == 0 {
            return Err(CalendarError::InvalidSlotId(Self::format_index(index)));
        }
        Ok(Self(index))
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    fn format_index(index: u32) -> String {
        format!("TS{:03}", index)
    }
}

impl FromStr for TimeSlotId {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidSlotId(s.to_string());
        let digits = s.trim().strip_prefix("TS").ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: u32 = digits.parse().map_err(|_| invalid())?;
        Self::new(index).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeSlotId {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlotId> for String {
    fn from(id: TimeSlotId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for TimeSlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::format_index(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub ts_id: TimeSlotId,
    pub interval: SlotInterval,
    pub label: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub slots: Vec<SlotView>,
    /// Availability ids that do not name a slot of the configured schedule.
    pub unknown_slot_ids: Vec<String>,
}

impl DaySchedule {
    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.available).count()
    }
}

/// A backend slot whose reported times disagree with the configured schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMismatch {
    pub ts_id: String,
    pub expected: SlotInterval,
    pub reported_start: Option<String>,
    pub reported_end: Option<String>,
}

// ==============================================================================
// APPOINTMENT RECORDS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub department: Option<String>,
}

impl AppointmentRecord {
    pub fn new(date: impl Into<String>, start_time: Option<&str>) -> Self {
        Self {
            date: date.into(),
            start_time: start_time.map(str::to_string),
            end_time: None,
            patient_name: None,
            doctor_name: None,
            department: None,
        }
    }
}

impl From<AppointmentEntry> for AppointmentRecord {
    fn from(entry: AppointmentEntry) -> Self {
        Self {
            date: entry.date,
            start_time: entry.starttime,
            end_time: entry.endtime,
            patient_name: entry.patient_name,
            doctor_name: entry.doctor_name,
            department: entry.department,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Past,
    Today,
    Upcoming,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Past => write!(f, "past"),
            AppointmentStatus::Today => write!(f, "today"),
            AppointmentStatus::Upcoming => write!(f, "upcoming"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Day-of-month → records on that day, in input order.
pub type MonthDayBuckets = BTreeMap<u32, Vec<AppointmentRecord>>;

// ==============================================================================
// MONTH GRID
// ==============================================================================

/// Monday-first calendar page for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Empty cells before day 1 (0 when the month starts on a Monday).
    pub leading_blanks: u32,
}

impl MonthGrid {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DayScheduleResponse {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub config: SlotConfig,
    pub opens_at: String,
    pub closes_at: String,
    pub schedule: DaySchedule,
    pub available_count: usize,
    pub mismatches: Vec<SlotMismatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDoctors {
    pub department: String,
    pub doctors: Vec<DoctorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDayAgenda {
    pub date: NaiveDate,
    pub schedule: DaySchedule,
    pub appointments: Vec<AppointmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub is_today: bool,
    pub appointment_count: usize,
    pub has_past: bool,
    pub has_today: bool,
    pub has_upcoming: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarOverview {
    pub grid: MonthGrid,
    pub days: Vec<CalendarDay>,
    pub past: Vec<AppointmentRecord>,
    pub today: Vec<AppointmentRecord>,
    pub upcoming: Vec<AppointmentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub doctor_id: String,
    pub ts_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclareUnavailabilityRequest {
    pub ts_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfirmation {
    pub ts_id: TimeSlotId,
    pub date: NaiveDate,
    pub interval: SlotInterval,
    pub label: String,
    pub message: Option<String>,
    pub ua_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_config_rejects_widths_that_do_not_divide_an_hour() {
        assert!(SlotConfig::new(8, 45, 4).is_err());
        assert!(SlotConfig::new(8, 0, 4).is_err());
        assert!(SlotConfig::new(8, 20, 3).is_ok());
    }

    #[test]
    fn slot_config_may_end_exactly_at_midnight() {
        let config = SlotConfig::new(20, 30, 8).unwrap();
        assert_eq!(config.closing_time(), ClockTime { hour: 24, minute: 0 });
        assert!(SlotConfig::new(20, 30, 9).is_err());
    }

    #[test]
    fn twelve_hour_format_rules() {
        assert_eq!(ClockTime { hour: 0, minute: 5 }.format_12h(), "12:05 AM");
        assert_eq!(ClockTime { hour: 8, minute: 0 }.format_12h(), "8:00 AM");
        assert_eq!(ClockTime { hour: 12, minute: 30 }.format_12h(), "12:30 PM");
        assert_eq!(ClockTime { hour: 13, minute: 0 }.format_12h(), "1:00 PM");
        assert_eq!(ClockTime { hour: 23, minute: 59 }.format_12h(), "11:59 PM");
        assert_eq!(ClockTime { hour: 24, minute: 0 }.format_12h(), "12:00 AM");
    }

    #[test]
    fn clock_time_parses_with_and_without_seconds() {
        assert_eq!(ClockTime::parse("15:00:00").unwrap(), ClockTime { hour: 15, minute: 0 });
        assert_eq!(ClockTime::parse("09:45").unwrap(), ClockTime { hour: 9, minute: 45 });
        assert_eq!(
            ClockTime::parse("25:00"),
            Err(CalendarError::InvalidTime("25:00".to_string()))
        );
    }

    #[test]
    fn time_slot_id_shape() {
        assert_eq!("TS001".parse::<TimeSlotId>().unwrap().index(), 1);
        assert_eq!("TS18".parse::<TimeSlotId>().unwrap().index(), 18);
        assert_eq!(TimeSlotId::new(7).unwrap().to_string(), "TS007");
        assert!("TS000".parse::<TimeSlotId>().is_err());
        assert!("TS-1".parse::<TimeSlotId>().is_err());
        assert!("001".parse::<TimeSlotId>().is_err());
    }

    #[test]
    fn time_slot_id_serializes_as_string() {
        let id = TimeSlotId::new(3).unwrap();
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!("TS003"));
        let parsed: TimeSlotId = serde_json::from_value(serde_json::json!("TS010")).unwrap();
        assert_eq!(parsed.index(), 10);
    }
}
