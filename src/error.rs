//! Error types used by the admission queue.
//!
//! Admission refusal is the only failure a caller can observe: it travels
//! inside a `QueueOverflow` event rather than as a returned error, and the
//! item simply never becomes visible. [`AdmissionError`] provides
//! `as_label`/`as_message` helpers for logs and event payloads.

use thiserror::Error;

/// # Reasons the admission queue refuses a new entry.
///
/// Produced by `AdmissionQueue::enqueue` when the queue is at capacity and
/// the overflow strategy decides against the candidate.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    /// Queue is full and the strategy is `Reject`.
    #[error("queue at capacity {capacity}; rejecting new entries")]
    CapacityExhausted {
        /// The configured capacity that was reached.
        capacity: usize,
    },

    /// Queue is full, the strategy is `Priority`, and the candidate does not
    /// strictly beat the lowest queued priority.
    #[error("priority {candidate} does not beat lowest queued priority {lowest}")]
    PriorityTooLow {
        /// Computed priority of the refused candidate.
        candidate: i32,
        /// Lowest priority currently held in the queue.
        lowest: i32,
    },
}

impl AdmissionError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use notivisor::AdmissionError;
    ///
    /// let err = AdmissionError::CapacityExhausted { capacity: 8 };
    /// assert_eq!(err.as_label(), "queue_capacity_exhausted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AdmissionError::CapacityExhausted { .. } => "queue_capacity_exhausted",
            AdmissionError::PriorityTooLow { .. } => "queue_priority_too_low",
        }
    }

    /// Returns a human-readable message with details about the refusal.
    pub fn as_message(&self) -> String {
        match self {
            AdmissionError::CapacityExhausted { capacity } => {
                format!("capacity exhausted: {capacity}")
            }
            AdmissionError::PriorityTooLow { candidate, lowest } => {
                format!("priority too low: candidate={candidate} lowest={lowest}")
            }
        }
    }
}
