//! # Overflow policy for the admission queue.
//!
//! The queue holds at most `capacity` entries. When a new item arrives at a
//! full queue, the overflow strategy decides what to do.
//!
//! ## Variants
//! - `Reject`: **refuse** the new item.
//! - `Fifo`: **evict** the single oldest entry, then accept the new item.
//! - `Priority`: evict the lowest-priority entry **only if** the new item's
//!   computed priority is strictly greater; otherwise refuse.
//!
//! ## Invariants
//! - An entry's priority is computed once at enqueue time and never again.
//! - Eviction removes exactly one entry per admission decision.

use crate::error::AdmissionError;
use crate::queue::entry::QueueEntry;

/// Policy controlling how new items are handled when the queue is full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowStrategy {
    /// Refuse the new item.
    ///
    /// Use when:
    /// - Early arrivals should win
    /// - Late signals are safe to drop
    /// - Example: burst of identical "saved" notices
    Reject,

    /// Evict the oldest entry unconditionally, then accept.
    ///
    /// Use when:
    /// - The latest signal matters most
    /// - Example: rolling status updates
    Fifo,

    /// Evict the lowest-priority entry if the new item outranks it.
    ///
    /// Use when:
    /// - Severity should decide who stays
    /// - Example: an error must displace a queued info notice
    Priority,
}

impl Default for OverflowStrategy {
    /// Returns [`OverflowStrategy::Reject`].
    fn default() -> Self {
        OverflowStrategy::Reject
    }
}

/// Outcome of offering an item to the queue.
#[derive(Debug, Clone)]
pub enum Admission {
    /// The item was admitted; `evicted` carries the entry that made room,
    /// if the strategy displaced one.
    Accepted {
        /// Entry evicted to admit the new item, if any.
        evicted: Option<QueueEntry>,
    },

    /// An entry with the same id is already queued; treated as accepted,
    /// no duplicate is created.
    AlreadyQueued,

    /// The queue refused the item; it never becomes visible.
    Rejected(AdmissionError),
}

impl Admission {
    /// True unless the item was refused.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Admission::Rejected(_))
    }
}
