//! Registration generator for hospitals and their doctors.
//!
//! At registration time every doctor receives an opaque entry code (a
//! short random alphanumeric token) that patients later present at the
//! join surface. Each doctor also gets a JSON payload intended for QR
//! encoding; producing the actual image is delegated to an opaque
//! [`QrEncoder`] collaborator and is not implemented here.
//!
//! Registrations are not persisted: this crate only generates. The queue
//! engine treats entry codes as opaque values and never validates them
//! against the registered set.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use vq_types::EntryCode;

/// Number of characters in a generated entry code.
pub const ENTRY_CODE_LEN: usize = 6;

/// Alphabet for generated entry codes: uppercase alphanumerics.
const ENTRY_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Errors that can occur while building a hospital registration.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("a hospital must register at least one doctor")]
    NoDoctors,
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn required(field: &'static str, value: &str) -> Result<String, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Generate a fresh entry code from the given random source.
pub fn generate_entry_code(rng: &mut impl Rng) -> EntryCode {
    let token: String = (0..ENTRY_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ENTRY_CODE_CHARSET.len());
            ENTRY_CODE_CHARSET[idx] as char
        })
        .collect();
    EntryCode::new(token).expect("generated token is non-empty")
}

/// A single registered doctor with their generated entry code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRegistration {
    pub name: String,
    pub department: String,
    pub entry_code: EntryCode,
}

/// A registered hospital and its doctors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalRegistration {
    pub hospital_id: Uuid,
    pub hospital_name: String,
    pub doctors: Vec<DoctorRegistration>,
}

impl HospitalRegistration {
    /// Register a hospital with its doctors, generating an entry code per
    /// doctor and a fresh hospital id.
    ///
    /// `doctors` are `(name, department)` pairs. Names and departments
    /// must be non-empty after trimming; at least one doctor is required.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::NoDoctors` for an empty doctor list and
    /// `RegistrationError::MissingField` when a name or department is
    /// empty.
    pub fn register(
        hospital_name: &str,
        doctors: &[(String, String)],
        rng: &mut impl Rng,
    ) -> Result<Self, RegistrationError> {
        let hospital_name = required("hospital name", hospital_name)?;
        if doctors.is_empty() {
            return Err(RegistrationError::NoDoctors);
        }

        let doctors = doctors
            .iter()
            .map(|(name, department)| {
                Ok(DoctorRegistration {
                    name: required("doctor name", name)?,
                    department: required("department", department)?,
                    entry_code: generate_entry_code(rng),
                })
            })
            .collect::<Result<Vec<_>, RegistrationError>>()?;

        Ok(Self {
            hospital_id: Uuid::new_v4(),
            hospital_name,
            doctors,
        })
    }

    /// The QR payload for each registered doctor, in registration order.
    pub fn qr_payloads(&self) -> Vec<QrPayload> {
        self.doctors
            .iter()
            .map(|doctor| QrPayload {
                hospital_name: self.hospital_name.clone(),
                doctor_name: doctor.name.clone(),
                department: doctor.department.clone(),
                entry_code: doctor.entry_code.clone(),
                hospital_id: self.hospital_id,
            })
            .collect()
    }
}

/// JSON payload embedded in a doctor's onboarding QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub hospital_name: String,
    pub doctor_name: String,
    pub department: String,
    pub entry_code: EntryCode,
    pub hospital_id: Uuid,
}

impl QrPayload {
    /// Render the payload as the JSON string handed to the QR encoder.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Opaque QR image encoder: `encode(payload) -> image bytes`.
///
/// Image encoding is an external concern; implementations live outside
/// this workspace.
pub trait QrEncoder {
    type Error: std::error::Error + Send + Sync + 'static;

    fn encode(&self, payload: &QrPayload) -> Result<Vec<u8>, Self::Error>;
}
