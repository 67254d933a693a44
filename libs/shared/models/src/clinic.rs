// Request and response bodies exchanged with the clinic backend.
use serde::{de, Deserialize, Deserializer, Serialize};

// ==============================================================================
// RESPONSE ENVELOPES
// ==============================================================================

/// Every backend response carries a `success` flag and, on failure, a message.
pub trait BackendEnvelope {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BackendEnvelope for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }
            }
        )*
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeslotsResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub timeslots: Vec<TimeslotEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub appointments: Vec<AppointmentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentListResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentResponse {
    pub success: bool,
    pub message: Option<String>,
    pub equipment: Option<Equipment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailabilityResponse {
    pub success: bool,
    pub message: Option<String>,
    pub ua_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorsResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub doctors: Vec<DoctorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCardResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default, rename = "healthCard")]
    pub health_card: Vec<HealthCardEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodTestsResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub blood_tests: Vec<BloodTestEntry>,
}

/// Acknowledgement for mutations that return nothing but a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl_envelope!(
    TimeslotsResponse,
    AppointmentsResponse,
    EquipmentListResponse,
    EquipmentResponse,
    UnavailabilityResponse,
    DoctorsResponse,
    HealthCardResponse,
    BloodTestsResponse,
    MutationResponse,
);

// ==============================================================================
// LENIENT SCALARS
// ==============================================================================

// The backend hands out numeric columns either as JSON numbers or as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }
    }
}

fn integer_from_number_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", s))),
    }
}

fn text_from_number_or_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(NumberOrText::deserialize(deserializer)?.into_text())
}

fn optional_text_from_number_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrText>::deserialize(deserializer)?.map(NumberOrText::into_text))
}

// ==============================================================================
// RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeslotEntry {
    pub ts_id: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentEntry {
    pub date: String,
    #[serde(alias = "start_time")]
    pub starttime: Option<String>,
    #[serde(alias = "end_time")]
    pub endtime: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub format: String,
    #[serde(deserialize_with = "integer_from_number_or_text")]
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorEntry {
    #[serde(deserialize_with = "text_from_number_or_text")]
    pub doctor_id: String,
    pub doctor_name: String,
    #[serde(default)]
    pub doctor_surname: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub price: Option<String>,
}

/// One row of the health card: a blood test joined with a prescribed medication.
/// Either half may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthCardEntry {
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub testdate: Option<String>,
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub cholesterol: Option<String>,
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub glucose: Option<String>,
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub hemoglobin: Option<String>,
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub whitebloodcell: Option<String>,
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub redbloodcell: Option<String>,
    pub prescriptiondate: Option<String>,
    pub usageinfo: Option<String>,
    pub medicationname: Option<String>,
    pub medicationformat: Option<String>,
    #[serde(deserialize_with = "optional_text_from_number_or_text")]
    pub medicationdosage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodTestEntry {
    #[serde(deserialize_with = "text_from_number_or_text")]
    pub bt_id: String,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub vitamins: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub minerals: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub cholesterol: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub glucose: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub hemoglobin: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub white_blood_cells: Option<String>,
    #[serde(default, deserialize_with = "optional_text_from_number_or_text")]
    pub red_blood_cells: Option<String>,
    #[serde(default)]
    pub test_date: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_surname: Option<String>,
}

// ==============================================================================
// REQUEST PAYLOADS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookAppointmentPayload {
    pub patient_id: String,
    pub doc_id: String,
    pub ts_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnavailabilityPayload {
    pub ts_id: String,
    pub doc_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateEquipmentPayload {
    pub name: String,
    pub format: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateEquipmentPayload {
    pub equipment: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackPayload {
    pub patient_id: String,
    pub doc_id: String,
    pub rating: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateBloodTestPayload {
    pub bt_id: String,
    pub vitamins: String,
    pub minerals: String,
    pub cholesterol: String,
    pub glucose: String,
    pub hemoglobin: String,
    #[serde(rename = "whiteBC")]
    pub white_bc: String,
    #[serde(rename = "redBC")]
    pub red_bc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn appointment_entry_accepts_both_time_spellings() {
        let legacy: AppointmentEntry = serde_json::from_value(json!({
            "date": "2025-03-14",
            "starttime": "15:00:00",
            "endtime": "15:30:00",
            "doctor_name": "Dr. Smith",
            "department": "Cardiology"
        }))
        .unwrap();
        assert_eq!(legacy.starttime.as_deref(), Some("15:00:00"));

        let snake: AppointmentEntry = serde_json::from_value(json!({
            "date": "2025-03-14",
            "start_time": "09:00",
            "patient_name": "Jane Doe"
        }))
        .unwrap();
        assert_eq!(snake.starttime.as_deref(), Some("09:00"));
        assert_eq!(snake.endtime, None);
    }

    #[test]
    fn failed_envelope_without_payload_still_parses() {
        let response: TimeslotsResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Doctor not found"
        }))
        .unwrap();
        assert!(!response.success());
        assert_eq!(response.message(), Some("Doctor not found"));
        assert!(response.timeslots.is_empty());
    }

    #[test]
    fn equipment_amount_accepts_numbers_and_numeric_strings() {
        let list: EquipmentListResponse = serde_json::from_value(json!({
            "success": true,
            "equipment": [
                {"id": "ME001", "name": "Gloves", "format": "box", "amount": 12},
                {"id": "ME002", "name": "Syringes", "format": "pack", "amount": " 40 "}
            ]
        }))
        .unwrap();
        assert_eq!(list.equipment[0].amount, 12);
        assert_eq!(list.equipment[1].amount, 40);

        let bad = serde_json::from_value::<Equipment>(json!({
            "id": "ME003", "name": "Masks", "format": "box", "amount": "plenty"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn doctor_ids_are_read_as_text() {
        let response: DoctorsResponse = serde_json::from_value(json!({
            "success": true,
            "doctors": [
                {"doctor_id": 7, "doctor_name": "Ayse", "doctor_surname": "Kaya", "price": 450.5},
                {"doctor_id": "D002", "doctor_name": "Mehmet"}
            ]
        }))
        .unwrap();
        assert_eq!(response.doctors[0].doctor_id, "7");
        assert_eq!(response.doctors[0].price.as_deref(), Some("450.5"));
        assert_eq!(response.doctors[1].doctor_id, "D002");
        assert_eq!(response.doctors[1].price, None);
    }

    #[test]
    fn health_card_rows_tolerate_missing_halves() {
        let response: HealthCardResponse = serde_json::from_value(json!({
            "success": true,
            "healthCard": [
                {"testdate": "2025-01-10", "cholesterol": 180, "glucose": "95",
                 "prescriptiondate": null, "medicationname": null}
            ]
        }))
        .unwrap();
        let row = &response.health_card[0];
        assert_eq!(row.cholesterol.as_deref(), Some("180"));
        assert_eq!(row.medicationname, None);
    }

    #[test]
    fn blood_test_update_uses_backend_field_names() {
        let payload = UpdateBloodTestPayload {
            bt_id: "BT001".to_string(),
            vitamins: "normal".to_string(),
            minerals: "normal".to_string(),
            cholesterol: "180".to_string(),
            glucose: "95".to_string(),
            hemoglobin: "14".to_string(),
            white_bc: "6000".to_string(),
            red_bc: "5".to_string(),
            test_date: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["whiteBC"], "6000");
        assert_eq!(value["redBC"], "5");
        assert!(value.get("test_date").is_none());
    }
}
