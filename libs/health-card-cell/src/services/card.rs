use tracing::debug;

use shared_config::AppConfig;
use shared_database::ClinicBackendClient;
use shared_models::auth::Session;
use shared_models::clinic::HealthCardEntry;

use crate::models::{BloodTestReading, HealthCard, HealthCardError, Medication, PrescriptionGroup};

pub struct HealthCardService {
    backend: ClinicBackendClient,
}

impl HealthCardService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: ClinicBackendClient::new(config),
        }
    }

    /// Patients read their own card; clinic staff may read any patient's.
    pub async fn get_card(&self, session: &Session, patient_id: &str) -> Result<HealthCard, HealthCardError> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(HealthCardError::MissingPatient);
        }
        if !session.is_clinical_staff() && session.user_id != patient_id {
            return Err(HealthCardError::Unauthorized);
        }

        let rows = self.backend.get_health_card(patient_id).await?;
        debug!("Health card of {} has {} rows", patient_id, rows.len());

        let (blood_tests, prescriptions) = group_health_card(&rows);
        Ok(HealthCard {
            patient_id: patient_id.to_string(),
            blood_tests,
            prescriptions,
        })
    }
}

/// Splits joined card rows into one reading per test date and medications
/// grouped by prescription date, both in first-seen order.
pub fn group_health_card(rows: &[HealthCardEntry]) -> (Vec<BloodTestReading>, Vec<PrescriptionGroup>) {
    let mut blood_tests: Vec<BloodTestReading> = Vec::new();
    let mut prescriptions: Vec<PrescriptionGroup> = Vec::new();

    for row in rows {
        if let Some(test_date) = row.testdate.as_deref() {
            if !blood_tests.iter().any(|t| t.test_date == test_date) {
                blood_tests.push(BloodTestReading {
                    test_date: test_date.to_string(),
                    cholesterol: row.cholesterol.clone(),
                    glucose: row.glucose.clone(),
                    hemoglobin: row.hemoglobin.clone(),
                    white_blood_cells: row.whitebloodcell.clone(),
                    red_blood_cells: row.redbloodcell.clone(),
                });
            }
        }

        if let (Some(date), Some(name)) = (row.prescriptiondate.as_deref(), row.medicationname.as_deref()) {
            let medication = Medication {
                name: name.to_string(),
                format: row.medicationformat.clone(),
                dosage: row.medicationdosage.clone(),
                usage_info: row.usageinfo.clone(),
            };
            match prescriptions.iter_mut().find(|p| p.date == date) {
                Some(group) => group.medications.push(medication),
                None => prescriptions.push(PrescriptionGroup {
                    date: date.to_string(),
                    medications: vec![medication],
                }),
            }
        }
    }

    (blood_tests, prescriptions)
}
