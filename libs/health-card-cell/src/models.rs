use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodTestReading {
    pub test_date: String,
    pub cholesterol: Option<String>,
    pub glucose: Option<String>,
    pub hemoglobin: Option<String>,
    pub white_blood_cells: Option<String>,
    pub red_blood_cells: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub format: Option<String>,
    pub dosage: Option<String>,
    pub usage_info: Option<String>,
}

/// Medications prescribed on the same date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionGroup {
    pub date: String,
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCard {
    pub patient_id: String,
    pub blood_tests: Vec<BloodTestReading>,
    pub prescriptions: Vec<PrescriptionGroup>,
}

#[derive(Debug, thiserror::Error)]
pub enum HealthCardError {
    #[error("Not authorized to access this health card")]
    Unauthorized,

    #[error("Patient id is required")]
    MissingPatient,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<HealthCardError> for AppError {
    fn from(err: HealthCardError) -> Self {
        match err {
            HealthCardError::Unauthorized => AppError::Auth(err.to_string()),
            HealthCardError::MissingPatient => AppError::ValidationError(err.to_string()),
            HealthCardError::Backend(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
