use tracing::debug;

use shared_config::AppConfig;
use shared_database::ClinicBackendClient;
use shared_models::auth::Session;
use shared_models::clinic::FeedbackPayload;

use crate::models::{FeedbackError, SubmitFeedbackRequest, MAX_RATING, MIN_RATING};

pub struct FeedbackService {
    backend: ClinicBackendClient,
}

impl FeedbackService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: ClinicBackendClient::new(config),
        }
    }

    /// Submits a rating from the session's patient; returns the backend message.
    pub async fn submit(
        &self,
        session: &Session,
        request: SubmitFeedbackRequest,
    ) -> Result<Option<String>, FeedbackError> {
        if !session.is_patient() {
            return Err(FeedbackError::Unauthorized);
        }
        if request.doc_id.trim().is_empty() {
            return Err(FeedbackError::MissingDoctor);
        }
        if !request.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(FeedbackError::InvalidRating);
        }

        let comment = request
            .comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        debug!("Patient {} rating doctor {}: {}", session.user_id, request.doc_id, request.rating);
        let payload = FeedbackPayload {
            patient_id: session.user_id.clone(),
            doc_id: request.doc_id.trim().to_string(),
            rating: request.rating,
            comment,
        };

        let response = self.backend.give_feedback(&payload).await?;
        Ok(response.message)
    }
}
