use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use urlencoding::encode;

use shared_config::AppConfig;
use shared_models::clinic::{
    AppointmentEntry, AppointmentsResponse, BackendEnvelope, BloodTestEntry, BloodTestsResponse,
    BookAppointmentPayload, CreateEquipmentPayload, DoctorEntry, DoctorsResponse, Equipment,
    EquipmentListResponse, EquipmentResponse, FeedbackPayload, HealthCardEntry,
    HealthCardResponse, MutationResponse, TimeslotEntry, TimeslotsResponse,
    UnavailabilityPayload, UnavailabilityResponse, UpdateBloodTestPayload,
    UpdateEquipmentPayload,
};

/// HTTP client for the clinic's JSON backend. One instance per service;
/// every call goes straight to the network, nothing is cached.
pub struct ClinicBackendClient {
    client: Client,
    base_url: String,
}

impl ClinicBackendClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.backend_base_url().to_string(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned + BackendEnvelope,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url)
            .headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Clinic backend error ({}): {}", status, error_text);

            let detail = serde_json::from_str::<MutationResponse>(&error_text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(error_text);

            return Err(match status.as_u16() {
                400 => anyhow!("Rejected by clinic backend: {}", detail),
                404 => anyhow!("Resource not found: {}", detail),
                _ => anyhow!("Clinic backend error ({}): {}", status, detail),
            });
        }

        let data = response.json::<T>().await?;
        if !data.success() {
            let message = data.message().unwrap_or("no message given").to_string();
            error!("Clinic backend reported failure: {}", message);
            return Err(anyhow!("Clinic backend reported failure: {}", message));
        }

        Ok(data)
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + BackendEnvelope,
    {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn filter_doctors_by_dept(&self, dept_name: &str) -> Result<Vec<DoctorEntry>> {
        let path = format!("/api/filter_doctors_by_dept/?dept_name={}", encode(dept_name));
        let response: DoctorsResponse = self.get(&path).await?;
        Ok(response.doctors)
    }

    /// Free slots for a doctor on one date.
    pub async fn list_available_timeslots(&self, doc_id: &str, date: &str) -> Result<Vec<TimeslotEntry>> {
        let path = format!(
            "/api/list_available_timeslots_of_doctor/?doc_id={}&date={}",
            encode(doc_id),
            encode(date)
        );
        let response: TimeslotsResponse = self.get(&path).await?;
        Ok(response.timeslots)
    }

    pub async fn get_patient_appointments(&self, patient_id: &str) -> Result<Vec<AppointmentEntry>> {
        let path = format!("/api/get_appointments/{}/", encode(patient_id));
        let response: AppointmentsResponse = self.get(&path).await?;
        Ok(response.appointments)
    }

    pub async fn get_doctor_appointments(&self, doc_id: &str) -> Result<Vec<AppointmentEntry>> {
        let path = format!("/api/get_doctor_appointments/{}/", encode(doc_id));
        let response: AppointmentsResponse = self.get(&path).await?;
        Ok(response.appointments)
    }

    pub async fn make_appointment(&self, payload: &BookAppointmentPayload) -> Result<MutationResponse> {
        debug!("Booking slot {} with doctor {} on {}", payload.ts_id, payload.doc_id, payload.date);
        self.request(Method::POST, "/api/make_appointment/", Some(payload)).await
    }

    pub async fn declare_unavailability(&self, payload: &UnavailabilityPayload) -> Result<UnavailabilityResponse> {
        debug!("Declaring slot {} unavailable for doctor {} on {}", payload.ts_id, payload.doc_id, payload.date);
        self.request(Method::POST, "/api/doctor_declare_unavailability/", Some(payload)).await
    }

    pub async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        let response: EquipmentListResponse = self.get("/api/equipment/").await?;
        Ok(response.equipment)
    }

    pub async fn create_equipment(&self, payload: &CreateEquipmentPayload) -> Result<EquipmentResponse> {
        self.request(Method::POST, "/api/create_equipment/", Some(payload)).await
    }

    pub async fn update_equipment_amount(&self, equipment_id: &str, amount: i64) -> Result<MutationResponse> {
        let payload = UpdateEquipmentPayload {
            equipment: equipment_id.to_string(),
            amount,
        };
        self.request(Method::POST, "/api/equipment/", Some(&payload)).await
    }

    /// Blood test and prescription rows making up a patient's health card.
    pub async fn get_health_card(&self, patient_id: &str) -> Result<Vec<HealthCardEntry>> {
        let path = format!("/api/get_health_card/{}/", encode(patient_id));
        let response: HealthCardResponse = self.get(&path).await?;
        Ok(response.health_card)
    }

    pub async fn get_patient_blood_tests(&self, patient_id: &str) -> Result<Vec<BloodTestEntry>> {
        let path = format!("/api/get_patient_blood_tests/{}/", encode(patient_id));
        let response: BloodTestsResponse = self.get(&path).await?;
        Ok(response.blood_tests)
    }

    pub async fn update_blood_test_results(&self, payload: &UpdateBloodTestPayload) -> Result<MutationResponse> {
        debug!("Updating results of blood test {}", payload.bt_id);
        self.request(Method::POST, "/api/update_blood_test_results/", Some(payload)).await
    }

    pub async fn give_feedback(&self, payload: &FeedbackPayload) -> Result<MutationResponse> {
        self.request(Method::POST, "/api/give_feedback/", Some(payload)).await
    }
}
