//! Admission queue configuration.

use crate::queue::admission::OverflowStrategy;

/// Configuration for the admission queue.
///
/// Capacity and strategy are hot-swappable: a change applies from the next
/// admission decision onward and never touches existing entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of queued entries (minimum 1, clamped by the queue).
    pub capacity: usize,

    /// Policy applied when the queue is at capacity.
    pub strategy: OverflowStrategy,
}

impl Default for QueueConfig {
    /// Default configuration:
    ///
    /// - `capacity = 64` (generous baseline for interactive feedback)
    /// - `strategy = OverflowStrategy::Reject`
    fn default() -> Self {
        Self {
            capacity: 64,
            strategy: OverflowStrategy::default(),
        }
    }
}
