//! Patient model for the waiting sequence.

use serde::{Deserialize, Serialize};

/// Opaque patient identifier.
///
/// Derived from the join-time clock (milliseconds) plus a per-engine
/// sequence number, so two patients joining within the same millisecond
/// still receive distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub(crate) fn from_parts(joined_millis: i64, seq: u64) -> Self {
        Self(format!("{joined_millis}-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a patient relative to the waiting sequence.
///
/// `BeingServed` exists for display purposes; the engine itself never
/// assigns it. A called patient leaves the waiting sequence with its
/// status unchanged and becomes the current patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Waiting,
    BeingServed,
    Skipped,
}

/// A patient in (or recently removed from) the waiting sequence.
///
/// `position` is the 1-based rank among currently-waiting patients and is
/// kept equal to sequence index + 1 by the engine after every structural
/// change. `joined_at` is the local wall-clock join time formatted `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub position: usize,
    pub status: PatientStatus,
    pub joined_at: String,
    pub entry_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_distinguish_within_one_millisecond() {
        let a = PatientId::from_parts(1_709_282_490_000, 1);
        let b = PatientId::from_parts(1_709_282_490_000, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn status_uses_kebab_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&PatientStatus::BeingServed).expect("serialise"),
            "\"being-served\""
        );
        assert_eq!(
            serde_json::to_string(&PatientStatus::Skipped).expect("serialise"),
            "\"skipped\""
        );
    }
}
