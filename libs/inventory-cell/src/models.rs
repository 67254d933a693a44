use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEquipmentRequest {
    pub name: String,
    pub format: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAmountRequest {
    pub amount: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Inventory is only available to clinic staff")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Unauthorized => AppError::Auth(err.to_string()),
            InventoryError::ValidationError(msg) => AppError::ValidationError(msg),
            InventoryError::Backend(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
