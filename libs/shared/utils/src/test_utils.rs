use std::sync::Arc;
use serde_json::json;

use shared_config::AppConfig;
use shared_models::auth::{Role, Session};

use crate::extractor::{USER_ID_HEADER, USER_NAME_HEADER, USER_ROLE_HEADER};

pub struct TestConfig {
    pub backend_url: String,
    pub slot_count: u32,
    pub distinguish_today: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            slot_count: 10,
            distinguish_today: false,
        }
    }
}

impl TestConfig {
    /// Points the config at a mock backend (e.g. `MockServer::uri()`).
    pub fn with_backend(url: impl Into<String>) -> Self {
        Self {
            backend_url: url.into(),
            ..Self::default()
        }
    }

    /// Same-day appointments are reported as `today` instead of by start time.
    pub fn distinguishing_today(mut self) -> Self {
        self.distinguish_today = true;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            clinic_backend_url: self.backend_url.clone(),
            slot_count: self.slot_count,
            distinguish_today: self.distinguish_today,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestSession {
    pub user_id: String,
    pub role: Role,
    pub name: String,
}

impl TestSession {
    pub fn new(user_id: &str, role: Role, name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            role,
            name: name.to_string(),
        }
    }

    pub fn patient(user_id: &str) -> Self {
        Self::new(user_id, Role::Patient, "Test Patient")
    }

    pub fn doctor(user_id: &str) -> Self {
        Self::new(user_id, Role::Doctor, "Dr. Test")
    }

    pub fn staff(user_id: &str) -> Self {
        Self::new(user_id, Role::Staff, "Test Staff")
    }

    pub fn to_session(&self) -> Session {
        Session::new(self.user_id.clone(), self.role).with_display_name(self.name.clone())
    }

    /// Header pairs the session middleware reads.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (USER_ID_HEADER, self.user_id.clone()),
            (USER_ROLE_HEADER, self.role.to_string()),
            (USER_NAME_HEADER, self.name.clone()),
        ]
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn timeslots_response(ts_ids: &[&str]) -> serde_json::Value {
        let timeslots: Vec<_> = ts_ids
            .iter()
            .map(|id| json!({ "ts_id": id, "start_time": null, "end_time": null }))
            .collect();
        json!({
            "success": true,
            "timeslots": timeslots
        })
    }

    pub fn appointment(date: &str, start: &str, end: &str, counterpart: &str) -> serde_json::Value {
        json!({
            "date": date,
            "starttime": start,
            "endtime": end,
            "doctor_name": counterpart,
            "patient_name": counterpart,
            "department": "Cardiology"
        })
    }

    pub fn appointments_response(appointments: Vec<serde_json::Value>) -> serde_json::Value {
        json!({
            "success": true,
            "appointments": appointments
        })
    }

    pub fn equipment(id: &str, name: &str, amount: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "format": "box",
            "amount": amount
        })
    }

    pub fn doctor(doctor_id: i64, name: &str, surname: &str) -> serde_json::Value {
        json!({
            "doctor_id": doctor_id,
            "doctor_name": name,
            "doctor_surname": surname,
            "price": "450"
        })
    }

    pub fn health_card_row(test_date: Option<&str>, prescription: Option<(&str, &str)>) -> serde_json::Value {
        let (prescription_date, medication) = match prescription {
            Some((date, name)) => (Some(date), Some(name)),
            None => (None, None),
        };
        json!({
            "testdate": test_date,
            "cholesterol": test_date.map(|_| "180"),
            "glucose": test_date.map(|_| "95"),
            "hemoglobin": test_date.map(|_| "14"),
            "whitebloodcell": test_date.map(|_| "6000"),
            "redbloodcell": test_date.map(|_| "5"),
            "prescriptiondate": prescription_date,
            "usageinfo": medication.map(|_| "Twice a day"),
            "medicationname": medication,
            "medicationformat": medication.map(|_| "tablet"),
            "medicationdosage": medication.map(|_| "500mg")
        })
    }

    pub fn blood_test(bt_id: &str, test_date: &str) -> serde_json::Value {
        json!({
            "bt_id": bt_id,
            "vitamins": "normal",
            "minerals": "normal",
            "cholesterol": "180",
            "glucose": "95",
            "hemoglobin": "14",
            "white_blood_cells": "6000",
            "red_blood_cells": "5",
            "test_date": test_date,
            "patient_name": "Jane",
            "patient_surname": "Doe"
        })
    }

    pub fn ok_response(message: &str) -> serde_json::Value {
        json!({
            "success": true,
            "message": message
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "success": false,
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_backend("http://127.0.0.1:9999").to_app_config();

        assert_eq!(config.clinic_backend_url, "http://127.0.0.1:9999");
        assert_eq!(config.slot_count, 10);
        assert_eq!(config.clinic_open_hour, 8);
        assert!(!config.distinguish_today);

        let config = TestConfig::with_backend("http://127.0.0.1:9999")
            .distinguishing_today()
            .to_app_config();
        assert!(config.distinguish_today);
    }

    #[test]
    fn test_session_headers_round_through_roles() {
        let session = TestSession::doctor("D001");
        let headers = session.headers();

        assert!(headers.contains(&(USER_ROLE_HEADER, "doctor".to_string())));
        assert_eq!(session.to_session().role, Role::Doctor);
    }
}
