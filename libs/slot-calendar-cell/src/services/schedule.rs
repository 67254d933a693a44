// libs/slot-calendar-cell/src/services/schedule.rs
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use futures::try_join;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::ClinicBackendClient;
use shared_models::auth::{Role, Session};
use shared_models::clinic::{AppointmentEntry, BookAppointmentPayload, UnavailabilityPayload};

use crate::models::{
    AppointmentRecord, AppointmentStatus, CalendarDay, CalendarOverview, DayScheduleResponse,
    DepartmentDoctors, DoctorDayAgenda, ScheduleError, SlotConfig, SlotConfirmation, SlotInterval, SortDirection,
    TimeSlotId,
};
use crate::services::calendar::{
    bucket_by_day, classify_appointment, month_grid, parse_record_date, sort_chronological,
};
use crate::services::slots::{day_schedule, slot_to_interval, verify_backend_slots};

pub struct ScheduleService {
    backend: ClinicBackendClient,
    slot_config: SlotConfig,
    distinguish_today: bool,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Result<Self, ScheduleError> {
        Ok(Self {
            backend: ClinicBackendClient::new(config),
            slot_config: SlotConfig::from_app_config(config)?,
            distinguish_today: config.distinguish_today,
        })
    }

    /// Slot grid for one doctor and date, marked with the backend's availability.
    pub async fn doctor_day_schedule(
        &self,
        doctor_id: &str,
        date: &str,
    ) -> Result<DayScheduleResponse, ScheduleError> {
        let date = parse_record_date(date)?;
        let date_param = date.format("%Y-%m-%d").to_string();
        debug!("Fetching availability for doctor {} on {}", doctor_id, date_param);

        let entries = self.backend.list_available_timeslots(doctor_id, &date_param).await?;

        let mismatches = verify_backend_slots(&entries, &self.slot_config);
        for mismatch in &mismatches {
            warn!(
                "Slot {} reported as {:?}-{:?}, configured as {}",
                mismatch.ts_id, mismatch.reported_start, mismatch.reported_end, mismatch.expected.label()
            );
        }

        let schedule = day_schedule(&self.slot_config, entries.iter().map(|e| e.ts_id.as_str()));
        if !schedule.unknown_slot_ids.is_empty() {
            warn!(
                "Backend returned slots outside the configured schedule: {:?}",
                schedule.unknown_slot_ids
            );
        }

        Ok(DayScheduleResponse {
            doctor_id: doctor_id.to_string(),
            date,
            config: self.slot_config,
            opens_at: self.slot_config.opening_time().format_12h(),
            closes_at: self.slot_config.closing_time().format_12h(),
            available_count: schedule.available_count(),
            schedule,
            mismatches,
        })
    }

    /// Doctors working in a department, as listed by the backend.
    pub async fn doctors_in_department(&self, department: &str) -> Result<DepartmentDoctors, ScheduleError> {
        let department = department.trim();
        if department.is_empty() {
            return Err(ScheduleError::Validation("Department is required".to_string()));
        }

        let doctors = self.backend.filter_doctors_by_dept(department).await?;
        debug!("{} doctors in {}", doctors.len(), department);

        Ok(DepartmentDoctors {
            department: department.to_string(),
            doctors,
        })
    }

    /// A doctor's own day: free slots and booked appointments, fetched together.
    pub async fn doctor_agenda(
        &self,
        session: &Session,
        date: &str,
    ) -> Result<DoctorDayAgenda, ScheduleError> {
        if !session.is_doctor() {
            return Err(ScheduleError::NotPermitted("Only doctors have a daily agenda".to_string()));
        }

        let date = parse_record_date(date)?;
        let date_param = date.format("%Y-%m-%d").to_string();

        let (entries, appointments) = try_join!(
            self.backend.list_available_timeslots(&session.user_id, &date_param),
            self.backend.get_doctor_appointments(&session.user_id),
        )?;

        let schedule = day_schedule(&self.slot_config, entries.iter().map(|e| e.ts_id.as_str()));
        let records = into_records(appointments);

        let mut on_day = Vec::new();
        for record in records {
            if parse_record_date(&record.date).map_err(ScheduleError::BackendData)? == date {
                on_day.push(record);
            }
        }

        Ok(DoctorDayAgenda {
            date,
            schedule,
            appointments: sort_chronological(&on_day, SortDirection::Ascending)
                .map_err(ScheduleError::BackendData)?,
        })
    }

    /// Month view of the session user's appointments.
    pub async fn appointment_calendar(
        &self,
        session: &Session,
        year: i32,
        month: u32,
        now: NaiveDateTime,
    ) -> Result<CalendarOverview, ScheduleError> {
        let grid = month_grid(year, month)?;

        let entries = match session.role {
            Role::Patient => self.backend.get_patient_appointments(&session.user_id).await?,
            Role::Doctor => self.backend.get_doctor_appointments(&session.user_id).await?,
            other => {
                return Err(ScheduleError::Validation(format!(
                    "No appointment calendar for {} accounts", other
                )))
            }
        };
        let records = into_records(entries);
        debug!("Building {}-{:02} calendar from {} appointments", year, month, records.len());

        let mut past = Vec::new();
        let mut today = Vec::new();
        let mut upcoming = Vec::new();
        for record in &records {
            match classify_appointment(record, now, self.distinguish_today)
                .map_err(ScheduleError::BackendData)?
            {
                AppointmentStatus::Past => past.push(record.clone()),
                AppointmentStatus::Today => today.push(record.clone()),
                AppointmentStatus::Upcoming => upcoming.push(record.clone()),
            }
        }

        let buckets = bucket_by_day(&records, month, year).map_err(ScheduleError::BackendData)?;
        let now_date = now.date();
        let mut days = Vec::with_capacity(grid.days_in_month as usize);
        for day in 1..=grid.days_in_month {
            let bucket = buckets.get(&day).map(Vec::as_slice).unwrap_or(&[]);
            let mut cell = CalendarDay {
                day,
                is_today: grid.contains(now_date) && now_date.day() == day,
                appointment_count: bucket.len(),
                has_past: false,
                has_today: false,
                has_upcoming: false,
            };
            for record in bucket {
                match classify_appointment(record, now, self.distinguish_today)
                    .map_err(ScheduleError::BackendData)?
                {
                    AppointmentStatus::Past => cell.has_past = true,
                    AppointmentStatus::Today => cell.has_today = true,
                    AppointmentStatus::Upcoming => cell.has_upcoming = true,
                }
            }
            days.push(cell);
        }

        let sorted = |records: &[AppointmentRecord], direction| {
            sort_chronological(records, direction).map_err(ScheduleError::BackendData)
        };

        Ok(CalendarOverview {
            grid,
            days,
            past: sorted(&past, SortDirection::Descending)?,
            today: sorted(&today, SortDirection::Ascending)?,
            upcoming: sorted(&upcoming, SortDirection::Ascending)?,
        })
    }

    /// Books a slot for the session's patient.
    pub async fn book_slot(
        &self,
        session: &Session,
        doctor_id: &str,
        ts_id: &str,
        date: &str,
        now: NaiveDateTime,
    ) -> Result<SlotConfirmation, ScheduleError> {
        if !session.is_patient() {
            return Err(ScheduleError::NotPermitted("Only patients can book appointments".to_string()));
        }
        let doctor_id = doctor_id.trim();
        if doctor_id.is_empty() {
            return Err(ScheduleError::Validation("Doctor id is required".to_string()));
        }

        let (slot, date, interval) = self.resolve_future_slot(ts_id, date, now)?;
        let payload = BookAppointmentPayload {
            patient_id: session.user_id.clone(),
            doc_id: doctor_id.to_string(),
            ts_id: slot.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        };

        let response = self.backend.make_appointment(&payload).await?;

        Ok(SlotConfirmation {
            ts_id: slot,
            date,
            label: interval.label(),
            interval,
            message: response.message,
            ua_id: None,
        })
    }

    /// Marks one of the session doctor's slots as unavailable.
    pub async fn declare_unavailability(
        &self,
        session: &Session,
        ts_id: &str,
        date: &str,
        now: NaiveDateTime,
    ) -> Result<SlotConfirmation, ScheduleError> {
        if !session.is_doctor() {
            return Err(ScheduleError::NotPermitted("Only doctors can declare unavailability".to_string()));
        }

        let (slot, date, interval) = self.resolve_future_slot(ts_id, date, now)?;
        let payload = UnavailabilityPayload {
            ts_id: slot.to_string(),
            doc_id: session.user_id.clone(),
            date: date.format("%Y-%m-%d").to_string(),
        };

        let response = self.backend.declare_unavailability(&payload).await?;

        Ok(SlotConfirmation {
            ts_id: slot,
            date,
            label: interval.label(),
            interval,
            message: response.message,
            ua_id: response.ua_id,
        })
    }

    // Rejects slots that have already started.
    fn resolve_future_slot(
        &self,
        ts_id: &str,
        date: &str,
        now: NaiveDateTime,
    ) -> Result<(TimeSlotId, NaiveDate, SlotInterval), ScheduleError> {
        let slot: TimeSlotId = ts_id.parse()?;
        let interval = slot_to_interval(slot.index(), &self.slot_config)?;
        let date = parse_record_date(date)?;

        let record = AppointmentRecord::new(
            date.format("%Y-%m-%d").to_string(),
            Some(&interval.start().to_string()),
        );
        if classify_appointment(&record, now, false)? == AppointmentStatus::Past {
            return Err(ScheduleError::Validation(format!(
                "Slot {} on {} has already started", slot, date
            )));
        }

        Ok((slot, date, interval))
    }
}

fn into_records(entries: Vec<AppointmentEntry>) -> Vec<AppointmentRecord> {
    entries.into_iter().map(AppointmentRecord::from).collect()
}
