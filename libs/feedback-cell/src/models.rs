use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub doc_id: String,
    pub rating: f64,
    pub comment: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Only patients can leave feedback")]
    Unauthorized,

    #[error("Rating must be between 1.0 and 5.0")]
    InvalidRating,

    #[error("Doctor id is required")]
    MissingDoctor,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Unauthorized => AppError::Auth(err.to_string()),
            FeedbackError::InvalidRating | FeedbackError::MissingDoctor => {
                AppError::ValidationError(err.to_string())
            }
            FeedbackError::Backend(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
