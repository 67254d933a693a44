use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

/// New values for every measurement of an existing blood test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResultsRequest {
    pub vitamins: String,
    pub minerals: String,
    pub cholesterol: String,
    pub glucose: String,
    pub hemoglobin: String,
    pub white_blood_cells: String,
    pub red_blood_cells: String,
    pub test_date: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LabResultsError {
    #[error("Lab results are only available to clinic staff")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<LabResultsError> for AppError {
    fn from(err: LabResultsError) -> Self {
        match err {
            LabResultsError::Unauthorized => AppError::Auth(err.to_string()),
            LabResultsError::ValidationError(msg) => AppError::ValidationError(msg),
            LabResultsError::Backend(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
