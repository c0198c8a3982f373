//! # Bounded, priority-aware admission queue.
//!
//! The coordinator consults [`AdmissionQueue`] before committing an item to
//! the store. The queue holds denormalized entries (id, kind, computed
//! priority, enqueue stamp); item status lives in the store alone.
//!
//! ## Rules
//! - **Idempotent enqueue**: a same-id entry is treated as already accepted.
//! - **Bounded**: at capacity, the [`OverflowStrategy`] decides admission.
//! - **Stable order**: `ordered()` sorts by priority descending, ties broken
//!   by enqueue sequence ascending (oldest first). Each call returns a fresh
//!   snapshot, not a live cursor.
//! - **Hot-swap config**: capacity/strategy changes apply from the next
//!   admission decision; existing entries are unaffected.

use crate::error::AdmissionError;
use crate::items::FeedbackItem;
use crate::queue::admission::{Admission, OverflowStrategy};
use crate::queue::config::QueueConfig;
use crate::queue::entry::{QueueEntry, compute_priority};

/// Bounded holding area deciding which items win admission.
///
/// ## Example
/// ```rust
/// use notivisor::{AdmissionQueue, FeedbackItem, FeedbackKind, FeedbackOptions, QueueConfig};
///
/// let mut queue = AdmissionQueue::new(QueueConfig::default());
/// let item = FeedbackItem::new(FeedbackKind::Toast, FeedbackOptions::new());
/// assert!(queue.enqueue(&item).is_accepted());
/// assert!(queue.has(item.id()));
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug)]
pub struct AdmissionQueue {
    entries: Vec<QueueEntry>,
    config: QueueConfig,
}

impl AdmissionQueue {
    /// Creates an empty queue with the given configuration.
    pub fn new(config: QueueConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Offers an item; the outcome says whether it may enter the store.
    ///
    /// A same-id entry short-circuits to [`Admission::AlreadyQueued`]. At
    /// capacity the configured [`OverflowStrategy`] is applied; eviction
    /// removes exactly one entry and the new item is admitted in its place.
    pub fn enqueue(&mut self, item: &FeedbackItem) -> Admission {
        if self.has(item.id()) {
            return Admission::AlreadyQueued;
        }

        let capacity = self.capacity();
        let mut evicted = None;

        if self.entries.len() >= capacity {
            match self.config.strategy {
                OverflowStrategy::Reject => {
                    return Admission::Rejected(AdmissionError::CapacityExhausted { capacity });
                }
                OverflowStrategy::Fifo => {
                    evicted = self.evict_oldest();
                }
                OverflowStrategy::Priority => {
                    let candidate = compute_priority(item);
                    match self.lowest_priority_index() {
                        Some(idx) if candidate > self.entries[idx].priority => {
                            evicted = Some(self.entries.remove(idx));
                        }
                        Some(idx) => {
                            return Admission::Rejected(AdmissionError::PriorityTooLow {
                                candidate,
                                lowest: self.entries[idx].priority,
                            });
                        }
                        None => {}
                    }
                }
            }
        }

        self.entries.push(QueueEntry::for_item(item));
        Admission::Accepted { evicted }
    }

    /// Removes and returns the entry with the given id.
    pub fn dequeue(&mut self, id: &str) -> Option<QueueEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Fresh snapshot sorted by priority descending, oldest first on ties.
    #[must_use]
    pub fn ordered(&self) -> Vec<QueueEntry> {
        let mut view = self.entries.clone();
        view.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.seq.cmp(&b.seq)));
        view
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the queue reached its (clamped) capacity.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity()
    }

    /// True if an entry with the given id is queued.
    pub fn has(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current configuration.
    pub fn config(&self) -> QueueConfig {
        self.config
    }

    /// Replaces capacity and strategy; existing entries are untouched until
    /// the next admission decision.
    pub fn update_config(&mut self, config: QueueConfig) {
        self.config = config;
    }

    /// Configured capacity clamped to a minimum of 1.
    #[inline]
    fn capacity(&self) -> usize {
        self.config.capacity.max(1)
    }

    fn evict_oldest(&mut self) -> Option<QueueEntry> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| e.seq)
            .map(|(idx, _)| idx)?;
        Some(self.entries.remove(idx))
    }

    /// Index of the lowest-priority entry; the oldest wins the tie.
    fn lowest_priority_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.priority, e.seq))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{FeedbackKind, FeedbackOptions, Variant};

    fn item(id: &str, variant: Variant) -> FeedbackItem {
        FeedbackItem::new(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_id(id).with_variant(variant),
        )
    }

    fn queue(capacity: usize, strategy: OverflowStrategy) -> AdmissionQueue {
        AdmissionQueue::new(QueueConfig { capacity, strategy })
    }

    #[test]
    fn test_admission_bound_under_reject() {
        let mut q = queue(2, OverflowStrategy::Reject);
        assert!(q.enqueue(&item("a", Variant::Info)).is_accepted());
        assert!(q.enqueue(&item("b", Variant::Info)).is_accepted());

        let refused = q.enqueue(&item("c", Variant::Error));
        assert!(matches!(
            refused,
            Admission::Rejected(AdmissionError::CapacityExhausted { capacity: 2 })
        ));
        assert_eq!(q.len(), 2);
        assert!(!q.has("c"));
    }

    #[test]
    fn test_enqueue_same_id_is_idempotent() {
        let mut q = queue(4, OverflowStrategy::Reject);
        assert!(q.enqueue(&item("a", Variant::Info)).is_accepted());
        assert!(matches!(
            q.enqueue(&item("a", Variant::Error)),
            Admission::AlreadyQueued
        ));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_fifo_evicts_single_oldest() {
        let mut q = queue(3, OverflowStrategy::Fifo);
        q.enqueue(&item("a", Variant::Info));
        q.enqueue(&item("b", Variant::Info));
        q.enqueue(&item("c", Variant::Info));

        match q.enqueue(&item("d", Variant::Info)) {
            Admission::Accepted { evicted: Some(e) } => assert_eq!(e.id, "a"),
            other => panic!("expected eviction, got {other:?}"),
        }
        assert_eq!(q.len(), 3);
        assert!(!q.has("a"));
        assert!(q.has("d"));
    }

    #[test]
    fn test_priority_rejects_lower_candidate() {
        let mut q = queue(3, OverflowStrategy::Priority);
        q.enqueue(&item("a", Variant::Error));
        q.enqueue(&item("b", Variant::Error));
        q.enqueue(&item("c", Variant::Error));

        let refused = q.enqueue(&item("d", Variant::Info));
        assert!(matches!(
            refused,
            Admission::Rejected(AdmissionError::PriorityTooLow {
                candidate: 0,
                lowest: 30,
            })
        ));
        assert_eq!(q.len(), 3);
        assert!(q.has("a") && q.has("b") && q.has("c"));
    }

    #[test]
    fn test_priority_evicts_current_lowest() {
        let mut q = queue(3, OverflowStrategy::Priority);
        q.enqueue(&item("info", Variant::Info));
        q.enqueue(&item("warn", Variant::Warning));
        q.enqueue(&item("err", Variant::Error));

        match q.enqueue(&item("err2", Variant::Error)) {
            Admission::Accepted { evicted: Some(e) } => assert_eq!(e.id, "info"),
            other => panic!("expected eviction, got {other:?}"),
        }
        assert!(q.has("err2"));
        assert!(!q.has("info"));
    }

    #[test]
    fn test_priority_offset_shifts_base() {
        let mut q = queue(1, OverflowStrategy::Priority);
        q.enqueue(&item("plain-error", Variant::Error));

        // info + offset 40 = 40 > error base 30
        let boosted = FeedbackItem::new(
            FeedbackKind::Toast,
            FeedbackOptions::new()
                .with_id("boosted-info")
                .with_variant(Variant::Info)
                .with_priority(40),
        );
        assert!(q.enqueue(&boosted).is_accepted());
        assert!(q.has("boosted-info"));
        assert!(!q.has("plain-error"));
    }

    #[test]
    fn test_ordered_by_priority_then_enqueue_order() {
        let mut q = queue(8, OverflowStrategy::Reject);
        q.enqueue(&item("first-info", Variant::Info));
        q.enqueue(&item("err", Variant::Error));
        q.enqueue(&item("second-info", Variant::Info));
        q.enqueue(&item("warn", Variant::Warning));

        let ordered = q.ordered();
        let ids: Vec<&str> = ordered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["err", "warn", "first-info", "second-info"]);
    }

    #[test]
    fn test_ordered_is_a_restartable_snapshot() {
        let mut q = queue(4, OverflowStrategy::Reject);
        q.enqueue(&item("a", Variant::Info));
        let first = q.ordered();
        let second = q.ordered();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_hot_swap_applies_to_next_decision() {
        let mut q = queue(2, OverflowStrategy::Reject);
        q.enqueue(&item("a", Variant::Info));
        q.enqueue(&item("b", Variant::Info));
        assert!(!q.enqueue(&item("c", Variant::Info)).is_accepted());

        q.update_config(QueueConfig {
            capacity: 2,
            strategy: OverflowStrategy::Fifo,
        });
        assert!(q.enqueue(&item("c", Variant::Info)).is_accepted());
        assert!(!q.has("a"));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_dequeue_absent_returns_none() {
        let mut q = queue(2, OverflowStrategy::Reject);
        assert!(q.dequeue("ghost").is_none());
        q.enqueue(&item("a", Variant::Info));
        assert_eq!(q.dequeue("a").map(|e| e.id), Some("a".to_string()));
        assert!(q.is_empty());
    }

    #[test]
    fn test_is_full_tracks_clamped_capacity() {
        let mut q = queue(0, OverflowStrategy::Reject);
        assert!(!q.is_full());
        q.enqueue(&item("a", Variant::Info));
        assert!(q.is_full());
        assert_eq!(q.len(), 1);
    }
}
