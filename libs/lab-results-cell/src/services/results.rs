use chrono::NaiveDate;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::ClinicBackendClient;
use shared_models::auth::Session;
use shared_models::clinic::{BloodTestEntry, UpdateBloodTestPayload};

use crate::models::{LabResultsError, UpdateResultsRequest};

pub struct LabResultsService {
    backend: ClinicBackendClient,
}

impl LabResultsService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: ClinicBackendClient::new(config),
        }
    }

    fn ensure_staff(session: &Session) -> Result<(), LabResultsError> {
        if session.is_clinical_staff() {
            Ok(())
        } else {
            Err(LabResultsError::Unauthorized)
        }
    }

    pub async fn patient_blood_tests(
        &self,
        session: &Session,
        patient_id: &str,
    ) -> Result<Vec<BloodTestEntry>, LabResultsError> {
        Self::ensure_staff(session)?;

        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(LabResultsError::ValidationError("Patient id is required".to_string()));
        }

        Ok(self.backend.get_patient_blood_tests(patient_id).await?)
    }

    pub async fn update_results(
        &self,
        session: &Session,
        bt_id: &str,
        request: UpdateResultsRequest,
    ) -> Result<(), LabResultsError> {
        Self::ensure_staff(session)?;

        let payload = build_update_payload(bt_id, request)?;
        debug!("Staff {} updating blood test {}", session.user_id, payload.bt_id);

        self.backend.update_blood_test_results(&payload).await?;
        Ok(())
    }
}

fn required(field: &str, value: String) -> Result<String, LabResultsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LabResultsError::ValidationError(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Every measurement is required; the test date is optional but must be `YYYY-MM-DD`.
fn build_update_payload(bt_id: &str, request: UpdateResultsRequest) -> Result<UpdateBloodTestPayload, LabResultsError> {
    let test_date = match request.test_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| LabResultsError::ValidationError(format!("Invalid test date: {}", raw)))?;
            Some(date.format("%Y-%m-%d").to_string())
        }
    };

    Ok(UpdateBloodTestPayload {
        bt_id: required("Blood test id", bt_id.to_string())?,
        vitamins: required("Vitamins", request.vitamins)?,
        minerals: required("Minerals", request.minerals)?,
        cholesterol: required("Cholesterol", request.cholesterol)?,
        glucose: required("Glucose", request.glucose)?,
        hemoglobin: required("Hemoglobin", request.hemoglobin)?,
        white_bc: required("White blood cells", request.white_blood_cells)?,
        red_bc: required("Red blood cells", request.red_blood_cells)?,
        test_date,
    })
}
