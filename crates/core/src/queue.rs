//! The Queue State Engine.
//!
//! `VisitQueue` owns the insertion-ordered waiting sequence, the current
//! patient, the pause flag and the served counter, and keeps them
//! consistent under arbitrary sequences of the four mutating operations.
//!
//! Positions are derived from sequence order: after every structural
//! change the engine renumbers so that `position == index + 1` for every
//! waiting patient.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::patient::{Patient, PatientId, PatientStatus};
use crate::stats::QueueStats;

/// In-memory queue state for a single shared visit queue.
///
/// One engine instance models one queue. A multi-doctor deployment would
/// key one engine per entry code; this engine deliberately models the
/// single shared queue of the reference system.
pub struct VisitQueue {
    waiting: Vec<Patient>,
    current: Option<Patient>,
    paused: bool,
    served: u64,
    next_seq: u64,
    avg_wait_minutes: u32,
    clock: Arc<dyn Clock>,
}

impl VisitQueue {
    /// Create an empty queue using the system clock.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    /// Create an empty queue with an injected clock.
    pub fn with_clock(cfg: &CoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            waiting: Vec::new(),
            current: None,
            paused: false,
            served: 0,
            next_seq: 0,
            avg_wait_minutes: cfg.avg_wait_minutes(),
            clock,
        }
    }

    /// Append a patient to the tail of the waiting sequence.
    ///
    /// Always succeeds. The engine performs no validation of `name` or
    /// `entry_code` — the join surface is responsible for rejecting
    /// malformed input before calling in. The entry code is stored as an
    /// opaque value and never checked against a registry.
    pub fn join(&mut self, name: impl Into<String>, entry_code: impl Into<String>) {
        let now = self.clock.now();
        self.next_seq += 1;

        let patient = Patient {
            id: PatientId::from_parts(now.timestamp_millis(), self.next_seq),
            name: name.into(),
            position: self.waiting.len() + 1,
            status: PatientStatus::Waiting,
            joined_at: now.format("%H:%M").to_string(),
            entry_code: entry_code.into(),
        };

        tracing::debug!(patient = %patient.id, position = patient.position, "patient joined queue");
        self.waiting.push(patient);
    }

    /// Remove and return the head of the waiting sequence, making it the
    /// current patient and counting it as served.
    ///
    /// Returns `None` on an empty queue with no state change, so repeated
    /// calls on an empty queue are idempotent. The pause flag is not
    /// consulted.
    pub fn call_next(&mut self) -> Option<Patient> {
        if self.waiting.is_empty() {
            return None;
        }

        let next = self.waiting.remove(0);
        self.renumber();
        self.current = Some(next.clone());
        self.served += 1;

        tracing::debug!(patient = %next.id, served = self.served, "called next patient");
        Some(next)
    }

    /// Move the head of the waiting sequence to the tail with status
    /// `Skipped`.
    ///
    /// No-op on an empty queue. Everyone else shifts down one position;
    /// the skipped patient's position becomes the sequence length. Does
    /// not touch the current patient or the served counter. Skipping a
    /// single-element queue only changes the status.
    pub fn skip_patient(&mut self) {
        if self.waiting.is_empty() {
            return;
        }

        let mut skipped = self.waiting.remove(0);
        self.renumber();
        skipped.status = PatientStatus::Skipped;
        skipped.position = self.waiting.len() + 1;

        tracing::debug!(patient = %skipped.id, position = skipped.position, "skipped patient");
        self.waiting.push(skipped);
    }

    /// Flip the pause flag.
    ///
    /// The flag is a display-only signal for operator surfaces; join,
    /// call-next and skip ignore it.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "queue pause toggled");
    }

    /// Directly set or clear the current patient.
    ///
    /// Exposed for external callers (clearing the "currently serving"
    /// display). No validation that the patient was ever in the sequence.
    pub fn set_current_patient(&mut self, patient: Option<Patient>) {
        self.current = patient;
    }

    /// Position of the first waiting patient whose name matches exactly
    /// (case-sensitive), or 0 if there is no match.
    ///
    /// 0 is a "not found" sentinel: a waiting patient's position is never
    /// legitimately 0 since positions start at 1. When several patients
    /// share a name the lowest position wins.
    pub fn patient_position(&self, name: &str) -> usize {
        self.waiting
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.position)
            .unwrap_or(0)
    }

    /// Derived statistics, recomputed from the live counters.
    pub fn stats(&self) -> QueueStats {
        QueueStats::derive(self.waiting.len() as u32, self.served, self.avg_wait_minutes)
    }

    /// The waiting sequence in order, head first.
    pub fn waiting(&self) -> &[Patient] {
        &self.waiting
    }

    /// The patient most recently called (or installed directly), if any.
    pub fn current_patient(&self) -> Option<&Patient> {
        self.current.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn served_count(&self) -> u64 {
        self.served
    }

    fn renumber(&mut self) {
        for (index, patient) in self.waiting.iter_mut().enumerate() {
            patient.position = index + 1;
        }
    }
}
