//! # Coordinator configuration.
//!
//! Provides [`CoordinatorConfig`] centralized settings for one coordinator
//! instance, and [`ConfigPatch`] for partial runtime updates.
//!
//! ## Sentinel values
//! - `max_visible = 0` → unlimited (no per-kind cap enforced)
//! - `duration = 0s` on an item → never auto-remove (overrides the default)

use std::time::Duration;

use crate::queue::QueueConfig;

/// Configuration owned by one coordinator instance.
///
/// Defines:
/// - **Auto-dismiss**: default lifetime for auto-expiring kinds
/// - **Animation windows**: enter/exit delays between status transitions
/// - **Visibility cap**: per-kind maximum of simultaneously live items
/// - **Admission**: queue capacity and overflow strategy
///
/// ## Field semantics
/// - `default_duration`: lifetime applied when an item sets no duration
/// - `enter_duration`: delay between `Entering` and `Visible`
/// - `exit_duration`: delay between `Exiting` and final removal
/// - `max_visible`: per-kind cap on non-exiting items (`0` = unlimited)
/// - `queue`: admission sub-config, propagated to the queue on update
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Default auto-dismiss lifetime for auto-expiring kinds.
    pub default_duration: Duration,

    /// Enter-animation window; the `Visible` transition fires after it.
    pub enter_duration: Duration,

    /// Exit-animation window; finalization fires after it.
    pub exit_duration: Duration,

    /// Per-kind cap on simultaneously non-exiting items.
    ///
    /// - `0` = unlimited
    /// - `n > 0` = the newest `n` items of a kind are kept; older ones are
    ///   evicted through the normal exit path
    pub max_visible: usize,

    /// Admission queue capacity and overflow strategy.
    pub queue: QueueConfig,
}

impl CoordinatorConfig {
    /// Returns the per-kind visibility cap as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` non-exiting items per kind
    #[inline]
    pub fn max_visible_limit(&self) -> Option<usize> {
        if self.max_visible == 0 {
            None
        } else {
            Some(self.max_visible)
        }
    }

    /// Total delay until auto-dismiss for a freshly added item.
    ///
    /// Folds the requested duration with the default and the enter window:
    /// - `requested = None` → `default_duration + enter_duration`
    /// - `requested = Some(0s)` → `None` (never auto-remove)
    /// - `requested = Some(d)` → `d + enter_duration`
    #[inline]
    pub fn auto_dismiss_delay(&self, requested: Option<Duration>) -> Option<Duration> {
        let duration = requested.unwrap_or(self.default_duration);
        if duration.is_zero() {
            None
        } else {
            Some(duration + self.enter_duration)
        }
    }
}

impl Default for CoordinatorConfig {
    /// Default configuration:
    ///
    /// - `default_duration = 5s` (comfortable reading time)
    /// - `enter_duration = 300ms`
    /// - `exit_duration = 300ms`
    /// - `max_visible = 5`
    /// - `queue = QueueConfig::default()` (capacity 64, reject on overflow)
    fn default() -> Self {
        Self {
            default_duration: Duration::from_secs(5),
            enter_duration: Duration::from_millis(300),
            exit_duration: Duration::from_millis(300),
            max_visible: 5,
            queue: QueueConfig::default(),
        }
    }
}

/// Partial configuration update merged by `Coordinator::update_config`.
///
/// Fields left `None` keep their current value; a set `queue` field is also
/// propagated to the admission queue.
#[derive(Clone, Debug, Default)]
pub struct ConfigPatch {
    default_duration: Option<Duration>,
    enter_duration: Option<Duration>,
    exit_duration: Option<Duration>,
    max_visible: Option<usize>,
    queue: Option<QueueConfig>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_enter_duration(mut self, duration: Duration) -> Self {
        self.enter_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_exit_duration(mut self, duration: Duration) -> Self {
        self.exit_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = Some(max_visible);
        self
    }

    #[must_use]
    pub fn with_queue(mut self, queue: QueueConfig) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Queue sub-config, if this patch carries one.
    pub(crate) fn queue(&self) -> Option<QueueConfig> {
        self.queue
    }

    /// Merges the set fields into `config`.
    pub(crate) fn apply_to(&self, config: &mut CoordinatorConfig) {
        if let Some(d) = self.default_duration {
            config.default_duration = d;
        }
        if let Some(d) = self.enter_duration {
            config.enter_duration = d;
        }
        if let Some(d) = self.exit_duration {
            config.exit_duration = d;
        }
        if let Some(n) = self.max_visible {
            config.max_visible = n;
        }
        if let Some(q) = self.queue {
            config.queue = q;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_visible_means_unlimited() {
        let mut cfg = CoordinatorConfig::default();
        cfg.max_visible = 0;
        assert_eq!(cfg.max_visible_limit(), None);
        cfg.max_visible = 3;
        assert_eq!(cfg.max_visible_limit(), Some(3));
    }

    #[test]
    fn test_auto_dismiss_delay_folds_enter_window() {
        let mut cfg = CoordinatorConfig::default();
        cfg.default_duration = Duration::from_millis(1000);
        cfg.enter_duration = Duration::from_millis(100);

        assert_eq!(
            cfg.auto_dismiss_delay(None),
            Some(Duration::from_millis(1100))
        );
        assert_eq!(
            cfg.auto_dismiss_delay(Some(Duration::from_millis(400))),
            Some(Duration::from_millis(500))
        );
        assert_eq!(cfg.auto_dismiss_delay(Some(Duration::ZERO)), None);
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut cfg = CoordinatorConfig::default();
        let before_exit = cfg.exit_duration;
        ConfigPatch::new()
            .with_max_visible(2)
            .with_enter_duration(Duration::from_millis(50))
            .apply_to(&mut cfg);
        assert_eq!(cfg.max_visible, 2);
        assert_eq!(cfg.enter_duration, Duration::from_millis(50));
        assert_eq!(cfg.exit_duration, before_exit);
    }
}
