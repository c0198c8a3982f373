//! Denormalized queue entry used for ordering and eviction decisions.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::items::{FeedbackItem, FeedbackKind};

/// Global enqueue counter; breaks wall-clock ties deterministically.
static ENQUEUE_SEQ: AtomicU64 = AtomicU64::new(0);

/// One queued admission record.
///
/// Holds a reference to the item by id plus the priority computed at enqueue
/// time. The entry is not the source of truth for item status; the store is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// Id of the admitted item.
    pub id: String,
    /// Feedback kind of the admitted item.
    pub kind: FeedbackKind,
    /// Priority computed once at enqueue; never recomputed on option updates.
    pub priority: i32,
    /// Wall-clock enqueue timestamp.
    pub enqueued_at: SystemTime,
    /// Monotonic enqueue sequence; smaller means older.
    pub seq: u64,
}

impl QueueEntry {
    /// Builds an entry for an item, stamping it with the current time and
    /// the next enqueue sequence.
    pub(crate) fn for_item(item: &FeedbackItem) -> Self {
        Self {
            id: item.id().to_owned(),
            kind: item.kind(),
            priority: compute_priority(item),
            enqueued_at: SystemTime::now(),
            seq: ENQUEUE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }
}

/// Admission priority: variant base plus the caller's offset.
pub(crate) fn compute_priority(item: &FeedbackItem) -> i32 {
    item.options().variant().base_priority() + item.options().priority().unwrap_or(0)
}
