use tracing::debug;

use shared_config::AppConfig;
use shared_database::ClinicBackendClient;
use shared_models::auth::Session;
use shared_models::clinic::{CreateEquipmentPayload, Equipment};

use crate::models::{CreateEquipmentRequest, InventoryError};

pub struct InventoryService {
    backend: ClinicBackendClient,
}

impl InventoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: ClinicBackendClient::new(config),
        }
    }

    fn ensure_staff(session: &Session) -> Result<(), InventoryError> {
        if session.is_clinical_staff() {
            Ok(())
        } else {
            Err(InventoryError::Unauthorized)
        }
    }

    pub async fn list_equipment(&self, session: &Session) -> Result<Vec<Equipment>, InventoryError> {
        Self::ensure_staff(session)?;

        let mut equipment = self.backend.list_equipment().await?;
        equipment.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(equipment)
    }

    pub async fn create_equipment(
        &self,
        session: &Session,
        request: CreateEquipmentRequest,
    ) -> Result<Option<Equipment>, InventoryError> {
        Self::ensure_staff(session)?;

        let name = request.name.trim();
        let format = request.format.trim();
        if name.is_empty() || format.is_empty() {
            return Err(InventoryError::ValidationError("Name and format are required".to_string()));
        }
        validate_amount(request.amount)?;

        debug!("Creating equipment '{}' ({} x {})", name, request.amount, format);
        let payload = CreateEquipmentPayload {
            name: name.to_string(),
            format: format.to_string(),
            amount: request.amount,
        };

        let response = self.backend.create_equipment(&payload).await?;
        Ok(response.equipment)
    }

    pub async fn update_amount(
        &self,
        session: &Session,
        equipment_id: &str,
        amount: i64,
    ) -> Result<(), InventoryError> {
        Self::ensure_staff(session)?;
        validate_amount(amount)?;

        debug!("Setting equipment {} amount to {}", equipment_id, amount);
        self.backend.update_equipment_amount(equipment_id, amount).await?;
        Ok(())
    }
}

fn validate_amount(amount: i64) -> Result<(), InventoryError> {
    if amount < 0 {
        return Err(InventoryError::ValidationError("Amount cannot be negative".to_string()));
    }
    Ok(())
}
