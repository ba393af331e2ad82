//! Wire types for the queue and registration endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A patient as rendered to API consumers.
///
/// `status` is one of `waiting`, `being-served` or `skipped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    pub id: String,
    pub name: String,
    pub position: u32,
    pub status: String,
    pub joined_at: String,
    pub entry_code: String,
}

/// Join the queue with a display name and an entry code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinReq {
    pub name: String,
    pub entry_code: String,
}

/// Confirmation for a successful join: the assigned position and the
/// projected wait in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinRes {
    pub position: u32,
    pub estimated_wait: u32,
}

/// Position lookup result; `position` is 0 when no waiting patient has
/// the requested name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionRes {
    pub position: u32,
}

/// The waiting sequence, head first, plus the display-only pause flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueRes {
    pub patients: Vec<PatientDto>,
    pub paused: bool,
}

/// Result of advancing the queue. `patient` is absent when there was
/// nobody to call; `message` carries the operator-facing guard text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallNextRes {
    pub patient: Option<PatientDto>,
    pub message: String,
}

/// Result of skipping the head patient.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkipRes {
    pub success: bool,
}

/// Pause flag after toggling.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PauseRes {
    pub paused: bool,
}

/// The currently-served patient, if any.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRes {
    pub patient: Option<PatientDto>,
}

/// Result of clearing the "currently serving" display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearCurrentRes {
    pub success: bool,
}

/// Derived queue statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsRes {
    pub total_patients: u32,
    pub patients_served: u64,
    pub avg_wait_time: u32,
    pub efficiency: u32,
}

/// A doctor to register: display name and department.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReq {
    pub name: String,
    pub department: String,
}

/// Register a hospital and its doctors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    pub hospital_name: String,
    pub doctors: Vec<DoctorReq>,
}

/// A registered doctor: the generated entry code plus the JSON payload
/// destined for QR encoding.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRes {
    pub name: String,
    pub department: String,
    pub entry_code: String,
    pub qr_payload: String,
}

/// A registered hospital with per-doctor entry codes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRes {
    pub hospital_id: String,
    pub hospital_name: String,
    pub doctors: Vec<DoctorRes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_dto_uses_camel_case_fields() {
        let dto = PatientDto {
            id: "1709282490000-1".into(),
            name: "Alice".into(),
            position: 1,
            status: "waiting".into(),
            joined_at: "09:41".into(),
            entry_code: "DOC001".into(),
        };
        let json = serde_json::to_value(&dto).expect("serialise");
        assert_eq!(json["joinedAt"], "09:41");
        assert_eq!(json["entryCode"], "DOC001");
        assert!(json.get("joined_at").is_none());
    }

    #[test]
    fn call_next_res_omits_patient_as_null() {
        let res = CallNextRes {
            patient: None,
            message: "No patients in queue".into(),
        };
        let json = serde_json::to_value(&res).expect("serialise");
        assert!(json["patient"].is_null());
    }
}
