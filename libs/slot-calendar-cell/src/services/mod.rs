pub mod calendar;
pub mod schedule;
pub mod slots;

pub use calendar::{
    bucket_by_day, classify_appointment, month_grid, parse_record_date, sort_chronological,
};
pub use schedule::ScheduleService;
pub use slots::{day_schedule, slot_id_to_interval, slot_to_interval, verify_backend_slots};
