//! # Lifecycle events emitted by the coordinator.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Item events**: one item's flow (added, updated, status changed, removed)
//! - **Bulk events**: store-wide operations (items cleared)
//! - **Admission events**: queue decisions (overflow/rejection)
//!
//! The [`Event`] struct carries additional metadata such as the item id, the
//! feedback kind, status transition endpoints, and a reason label.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! buffered out of band.
//!
//! ## Example
//! ```rust
//! use notivisor::{Event, EventKind, FeedbackKind, ItemStatus};
//!
//! let ev = Event::new(EventKind::StatusChanged)
//!     .with_item("toast-1")
//!     .with_feedback(FeedbackKind::Toast)
//!     .with_transition(ItemStatus::Entering, ItemStatus::Visible);
//!
//! assert_eq!(ev.kind, EventKind::StatusChanged);
//! assert_eq!(ev.item.as_deref(), Some("toast-1"));
//! assert_eq!(ev.to, Some(ItemStatus::Visible));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::items::{FeedbackKind, ItemStatus};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Item events ===
    /// Item passed admission and was written to the store.
    ///
    /// Sets:
    /// - `item`: item id
    /// - `feedback`: feedback kind
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ItemAdded,

    /// Item options were merged via `update`.
    ///
    /// Sets:
    /// - `item`: item id
    /// - `feedback`: feedback kind
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ItemUpdated,

    /// Item moved to a new lifecycle status.
    ///
    /// Sets:
    /// - `item`: item id
    /// - `feedback`: feedback kind
    /// - `from` / `to`: transition endpoints
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StatusChanged,

    /// Item finished its exit window and left the store.
    ///
    /// Sets:
    /// - `item`: item id
    /// - `feedback`: feedback kind
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ItemRemoved,

    // === Bulk events ===
    /// `remove_all` cleared the store, optionally scoped to one kind.
    ///
    /// Sets:
    /// - `feedback`: kind filter, if one was given
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ItemsCleared,

    // === Admission events ===
    /// Admission queue refused a new item; it never becomes visible.
    ///
    /// Sets:
    /// - `item`: rejected item id
    /// - `feedback`: feedback kind
    /// - `reason`: refusal label (see `AdmissionError::as_label`)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    QueueOverflow,
}

impl EventKind {
    /// All event kinds, in declaration order.
    pub const ALL: [EventKind; 6] = [
        EventKind::ItemAdded,
        EventKind::ItemUpdated,
        EventKind::StatusChanged,
        EventKind::ItemRemoved,
        EventKind::ItemsCleared,
        EventKind::QueueOverflow,
    ];
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the item, if applicable.
    pub item: Option<Arc<str>>,
    /// Feedback kind of the item or clear filter.
    pub feedback: Option<FeedbackKind>,
    /// Status before the transition.
    pub from: Option<ItemStatus>,
    /// Status after the transition.
    pub to: Option<ItemStatus>,
    /// Human-readable reason (admission refusals).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            item: None,
            feedback: None,
            from: None,
            to: None,
            reason: None,
        }
    }

    /// Attaches an item id.
    #[inline]
    #[must_use]
    pub fn with_item(mut self, item: impl Into<Arc<str>>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Attaches a feedback kind.
    #[inline]
    #[must_use]
    pub fn with_feedback(mut self, kind: FeedbackKind) -> Self {
        self.feedback = Some(kind);
        self
    }

    /// Attaches status transition endpoints.
    #[inline]
    #[must_use]
    pub fn with_transition(mut self, from: ItemStatus, to: ItemStatus) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Attaches a reason label.
    #[inline]
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
