//! # Coordinator: orchestrates admission, store mutations, and timers.
//!
//! The [`Coordinator`] is the only component callers interact with. It owns
//! the admission queue, the item store, the event hub, and every transition
//! timer, and it sequences all status changes.
//!
//! ## High-level architecture
//! ```text
//! Inputs:
//!   add(kind, options) ──► AdmissionQueue (capacity + overflow strategy)
//!        │                      │
//!        │                      ├─ Rejected ──► Hub.publish(QueueOverflow)   (store untouched)
//!        │                      │
//!        │                      └─ Accepted ──► ItemStore (copy-on-write snapshots)
//!        │                                          │
//!        │                                          ├─► Hub.publish(ItemAdded)
//!        │                                          └─► Pending → Entering   (synchronous)
//!        │
//!        └─► Scheduler (tokio timers, one child CancellationToken each)
//!               ├─ enter timer    ──► Entering → Visible
//!               ├─ dismiss timer  ──► remove(id)           (auto-expiring kinds)
//!               └─ exit timer     ──► Removed, store/queue cleanup, ItemRemoved
//!
//! remove(id):
//!   cancel enter + dismiss timers ──► Visible/Entering → Exiting ──► exit timer
//!
//! destroy():
//!   root token cancel ──► every timer dies ──► store/queue cleared ──► hub detached
//! ```
//!
//! ## Rules
//! - All public methods run synchronously to completion; the only
//!   asynchrony is timer callbacks re-entering the coordinator.
//! - Timers hold a `Weak` back-reference, so dropping the last `Arc` ends
//!   the instance even with timers in flight.
//! - `remove` on an `Exiting`/`Removed` item is an idempotent no-op; stale
//!   timers cannot revive a cancelled item.
//! - Unknown-id operations no-op silently; admission rejection is the only
//!   observable failure (via the `QueueOverflow` event).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;

use crate::core::config::{ConfigPatch, CoordinatorConfig};
use crate::core::timers::{ItemTimers, Scheduler};
use crate::events::{Event, EventKind, Hub, Subscription};
use crate::items::{FeedbackItem, FeedbackKind, FeedbackOptions, ItemStatus, OptionsPatch};
use crate::observe::{FailureSink, StderrSink};
use crate::queue::{Admission, AdmissionQueue};
use crate::store::{ItemStore, StoreSnapshot};

/// Owns timers and sequences every status transition.
///
/// Construct one instance at the application boundary and hand the
/// `Arc<Coordinator>` to every consumer; build a fresh instance per test for
/// isolation. Methods that schedule timers must run inside a tokio runtime.
///
/// ## Example
/// ```rust
/// use notivisor::{Coordinator, CoordinatorConfig, FeedbackKind, FeedbackOptions, ItemStatus, Variant};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let feedback = Coordinator::new(CoordinatorConfig::default());
///
///     let id = feedback.add(
///         FeedbackKind::Toast,
///         FeedbackOptions::new()
///             .with_message("profile saved")
///             .with_variant(Variant::Success),
///     );
///     assert_eq!(
///         feedback.get(&id).map(|item| item.status()),
///         Some(ItemStatus::Entering),
///     );
///
///     feedback.destroy();
/// }
/// ```
pub struct Coordinator {
    /// Back-reference handed to timer callbacks; never upgraded internally
    /// while a lock is held.
    weak: Weak<Self>,
    config: RwLock<CoordinatorConfig>,
    store: ItemStore,
    queue: Mutex<AdmissionQueue>,
    hub: Hub,
    scheduler: Scheduler,
    timers: Mutex<HashMap<String, ItemTimers>>,
    destroyed: AtomicBool,
}

impl Coordinator {
    /// Creates a coordinator reporting isolated failures to stderr.
    pub fn new(config: CoordinatorConfig) -> Arc<Self> {
        Self::with_sink(config, Arc::new(StderrSink))
    }

    /// Creates a coordinator with an injected failure sink.
    pub fn with_sink(config: CoordinatorConfig, sink: Arc<dyn FailureSink>) -> Arc<Self> {
        let queue = AdmissionQueue::new(config.queue);
        Arc::new_cyclic(|weak| Self {
            weak: weak.clone(),
            config: RwLock::new(config),
            store: ItemStore::new(),
            queue: Mutex::new(queue),
            hub: Hub::with_sink(sink.clone()),
            scheduler: Scheduler::new(sink),
            timers: Mutex::new(HashMap::new()),
            destroyed: AtomicBool::new(false),
        })
    }

    // ---------------------------
    // Lifecycle operations
    // ---------------------------

    /// Creates an item and offers it to the admission queue.
    ///
    /// Returns the item's id in every case. On rejection a `QueueOverflow`
    /// event is published and the store is left untouched; the item never
    /// becomes visible. On acceptance the item is stored, `ItemAdded` is
    /// published, the `Entering` transition fires synchronously, and the
    /// `Visible` transition plus (for auto-expiring kinds) the auto-dismiss
    /// are scheduled.
    pub fn add(&self, kind: FeedbackKind, options: FeedbackOptions) -> String {
        let item = FeedbackItem::new(kind, options);
        let id = item.id().to_owned();
        if self.destroyed.load(AtomicOrdering::SeqCst) {
            return id;
        }

        let admission = self.queue.lock().unwrap().enqueue(&item);
        if let Admission::Rejected(err) = admission {
            self.hub.publish(
                &Event::new(EventKind::QueueOverflow)
                    .with_item(id.as_str())
                    .with_feedback(kind)
                    .with_reason(err.as_label()),
            );
            return id;
        }

        let requested = item.options().duration();
        self.store.add(item);
        self.hub.publish(
            &Event::new(EventKind::ItemAdded)
                .with_item(id.as_str())
                .with_feedback(kind),
        );
        self.update_status(&id, ItemStatus::Entering);

        let cfg = self.config.read().unwrap().clone();
        self.schedule_enter(&id, cfg.enter_duration);
        if kind.auto_expires() {
            if let Some(delay) = cfg.auto_dismiss_delay(requested) {
                self.schedule_dismiss(&id, delay);
            }
        }

        self.enforce_max_visible(kind, &cfg);
        id
    }

    /// Starts an item's exit sequence.
    ///
    /// No-op if the item is absent or already `Exiting`/`Removed`. Cancels
    /// the item's pending enter/auto-dismiss timers first, so a stale timer
    /// cannot revive it, then transitions to `Exiting` and schedules
    /// finalization after the exit window.
    pub fn remove(&self, id: &str) {
        if self.destroyed.load(AtomicOrdering::SeqCst) {
            return;
        }
        let Some(item) = self.store.get(id) else {
            return;
        };
        if item.status().is_leaving() {
            return;
        }

        if let Some(timers) = self.timers.lock().unwrap().get_mut(id) {
            timers.cancel_pending();
        }

        self.update_status(id, ItemStatus::Exiting);

        let delay = self.config.read().unwrap().exit_duration;
        let weak = self.weak.clone();
        let target = id.to_owned();
        let guard = self.scheduler.schedule_after(delay, id, "exit", async move {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.finalize(&target);
            }
        });
        self.timers
            .lock()
            .unwrap()
            .entry(id.to_owned())
            .or_default()
            .set_exit(guard);
    }

    /// Removes every item, optionally scoped to one kind.
    ///
    /// Bypasses the exit window: timers are cancelled and the store/queue
    /// records dropped immediately. Emits a single `ItemsCleared` event
    /// carrying the optional kind filter.
    pub fn remove_all(&self, kind: Option<FeedbackKind>) {
        if self.destroyed.load(AtomicOrdering::SeqCst) {
            return;
        }
        match kind {
            None => {
                let mut timers = self.timers.lock().unwrap();
                for (_, mut pending) in timers.drain() {
                    pending.cancel_all();
                }
                drop(timers);
                self.store.clear();
                self.queue.lock().unwrap().clear();
                self.hub.publish(&Event::new(EventKind::ItemsCleared));
            }
            Some(kind) => {
                let removed = self.store.clear_kind(kind);
                {
                    let mut timers = self.timers.lock().unwrap();
                    for item in &removed {
                        if let Some(mut pending) = timers.remove(item.id()) {
                            pending.cancel_all();
                        }
                    }
                }
                {
                    let mut queue = self.queue.lock().unwrap();
                    for item in &removed {
                        queue.dequeue(item.id());
                    }
                }
                self.hub
                    .publish(&Event::new(EventKind::ItemsCleared).with_feedback(kind));
            }
        }
    }

    /// Merges an options patch into an item and publishes `ItemUpdated`.
    ///
    /// No-op if the item is absent. Never touches the status, and never
    /// recomputes an already-enqueued admission priority.
    pub fn update(&self, id: &str, patch: &OptionsPatch) {
        if self.destroyed.load(AtomicOrdering::SeqCst) {
            return;
        }
        if let Some(kind) = self.store.update_options(id, patch) {
            self.hub.publish(
                &Event::new(EventKind::ItemUpdated)
                    .with_item(id)
                    .with_feedback(kind),
            );
        }
    }

    /// Records a status transition and publishes `StatusChanged`.
    ///
    /// Single choke point for every status mutation, which is what makes
    /// every transition observable. The coordinator's own timers and
    /// `remove` drive it; external callers are expected not to.
    pub fn update_status(&self, id: &str, status: ItemStatus) {
        if let Some((kind, from, to)) = self.store.set_status(id, status) {
            self.hub.publish(
                &Event::new(EventKind::StatusChanged)
                    .with_item(id)
                    .with_feedback(kind)
                    .with_transition(from, to),
            );
        }
    }

    /// Invokes the item's confirm callback, then removes it.
    pub fn confirm(&self, id: &str) {
        let callback = self.store.get(id).and_then(|item| item.options().on_confirm());
        if let Some(callback) = callback {
            (*callback)();
        }
        self.remove(id);
    }

    /// Invokes the item's cancel callback, then removes it.
    pub fn cancel(&self, id: &str) {
        let callback = self.store.get(id).and_then(|item| item.options().on_cancel());
        if let Some(callback) = callback {
            (*callback)();
        }
        self.remove(id);
    }

    // ---------------------------
    // Queries
    // ---------------------------

    /// Looks up one item by id.
    pub fn get(&self, id: &str) -> Option<FeedbackItem> {
        self.store.get(id)
    }

    /// All items, oldest first.
    #[must_use]
    pub fn get_all(&self) -> Vec<FeedbackItem> {
        self.store.get_all()
    }

    /// Items of one kind, oldest first.
    #[must_use]
    pub fn get_by_kind(&self, kind: FeedbackKind) -> Vec<FeedbackItem> {
        self.store.get_by_kind(kind)
    }

    /// Items in one status, oldest first.
    #[must_use]
    pub fn get_by_status(&self, status: ItemStatus) -> Vec<FeedbackItem> {
        self.store.get_by_status(status)
    }

    /// Identity-comparable store snapshot (see [`ItemStore::snapshot`]).
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    // ---------------------------
    // Events
    // ---------------------------

    /// Registers a handler for one event kind (see [`Hub::subscribe`]).
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.hub.subscribe(kind, handler)
    }

    /// Registers a one-shot handler (see [`Hub::subscribe_once`]).
    pub fn subscribe_once<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.hub.subscribe_once(kind, handler)
    }

    /// The event hub, for trackers that wire themselves directly.
    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    // ---------------------------
    // Configuration
    // ---------------------------

    /// Defensive copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> CoordinatorConfig {
        self.config.read().unwrap().clone()
    }

    /// Merges a configuration patch; a `queue` patch propagates to the
    /// admission queue and applies from the next admission decision.
    pub fn update_config(&self, patch: &ConfigPatch) {
        {
            let mut config = self.config.write().unwrap();
            patch.apply_to(&mut config);
        }
        if let Some(queue_config) = patch.queue() {
            self.queue.lock().unwrap().update_config(queue_config);
        }
    }

    // ---------------------------
    // Teardown
    // ---------------------------

    /// Cancels every timer, clears the store and queue, and detaches all
    /// hub subscriptions. Idempotent; later lifecycle calls no-op.
    pub fn destroy(&self) {
        if self.destroyed.swap(true, AtomicOrdering::SeqCst) {
            return;
        }
        self.scheduler.cancel_all();
        self.timers.lock().unwrap().clear();
        self.store.clear();
        self.queue.lock().unwrap().clear();
        self.hub.unsubscribe_all(None);
    }

    /// True once `destroy` ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(AtomicOrdering::SeqCst)
    }

    // ---------------------------
    // Timer plumbing
    // ---------------------------

    fn schedule_enter(&self, id: &str, delay: Duration) {
        let weak = self.weak.clone();
        let target = id.to_owned();
        let guard = self.scheduler.schedule_after(delay, id, "enter", async move {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.on_enter_elapsed(&target);
            }
        });
        self.timers
            .lock()
            .unwrap()
            .entry(id.to_owned())
            .or_default()
            .set_enter(guard);
    }

    fn schedule_dismiss(&self, id: &str, delay: Duration) {
        let weak = self.weak.clone();
        let target = id.to_owned();
        let guard = self
            .scheduler
            .schedule_after(delay, id, "dismiss", async move {
                if let Some(coordinator) = weak.upgrade() {
                    coordinator.on_dismiss_elapsed(&target);
                }
            });
        self.timers
            .lock()
            .unwrap()
            .entry(id.to_owned())
            .or_default()
            .set_dismiss(guard);
    }

    fn on_enter_elapsed(&self, id: &str) {
        if let Some(timers) = self.timers.lock().unwrap().get_mut(id) {
            timers.clear_enter();
        }
        match self.store.get(id) {
            Some(item) if item.status() == ItemStatus::Entering => {
                self.update_status(id, ItemStatus::Visible);
            }
            _ => {}
        }
    }

    fn on_dismiss_elapsed(&self, id: &str) {
        if let Some(timers) = self.timers.lock().unwrap().get_mut(id) {
            timers.clear_dismiss();
        }
        self.remove(id);
    }

    /// Exit window elapsed: record `Removed`, drop the store and queue
    /// records, publish `ItemRemoved`.
    fn finalize(&self, id: &str) {
        self.timers.lock().unwrap().remove(id);
        self.update_status(id, ItemStatus::Removed);
        let removed = self.store.remove(id);
        self.queue.lock().unwrap().dequeue(id);
        if let Some(item) = removed {
            self.hub.publish(
                &Event::new(EventKind::ItemRemoved)
                    .with_item(id)
                    .with_feedback(item.kind()),
            );
        }
    }

    /// Keeps the newest `max_visible` non-exiting items of a kind; older
    /// excess leaves through the normal exit path.
    fn enforce_max_visible(&self, kind: FeedbackKind, cfg: &CoordinatorConfig) {
        let Some(limit) = cfg.max_visible_limit() else {
            return;
        };
        let mut live: Vec<FeedbackItem> = self
            .store
            .get_by_kind(kind)
            .into_iter()
            .filter(|item| !item.status().is_leaving())
            .collect();
        if live.len() <= limit {
            return;
        }
        live.sort_by_key(FeedbackItem::seq);
        let excess = live.len() - limit;
        for item in live.iter().take(excess) {
            self.remove(item.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Variant;
    use crate::queue::{OverflowStrategy, QueueConfig};

    fn test_config() -> CoordinatorConfig {
        CoordinatorConfig {
            default_duration: Duration::from_millis(1000),
            enter_duration: Duration::from_millis(100),
            exit_duration: Duration::from_millis(200),
            max_visible: 5,
            queue: QueueConfig::default(),
        }
    }

    /// Lets spawned timer tasks register their sleeps / run their callbacks.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance(duration: Duration) {
        settle().await;
        tokio::time::advance(duration).await;
        settle().await;
    }

    fn record(coordinator: &Coordinator, kind: EventKind) -> Arc<Mutex<Vec<Event>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        coordinator.subscribe(kind, move |ev| sink.lock().unwrap().push(ev.clone()));
        events
    }

    fn status_of(coordinator: &Coordinator, id: &str) -> Option<ItemStatus> {
        coordinator.get(id).map(|item| item.status())
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_enters_synchronously_then_becomes_visible() {
        let co = Coordinator::new(test_config());
        let id = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Entering));

        advance(Duration::from_millis(100)).await;
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_two_items_full_lifecycle() {
        let co = Coordinator::new(test_config());
        let removed = record(&co, EventKind::ItemRemoved);

        let a = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new()
                .with_variant(Variant::Error)
                .with_duration(Duration::from_millis(3000)),
        );
        let b = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new()
                .with_variant(Variant::Info)
                .with_duration(Duration::from_millis(3000)),
        );

        advance(Duration::from_millis(100)).await;
        assert_eq!(status_of(&co, &a), Some(ItemStatus::Visible));
        assert_eq!(status_of(&co, &b), Some(ItemStatus::Visible));

        advance(Duration::from_millis(3000)).await;
        assert_eq!(status_of(&co, &a), Some(ItemStatus::Exiting));
        assert_eq!(status_of(&co, &b), Some(ItemStatus::Exiting));

        advance(Duration::from_millis(200)).await;
        assert!(co.get(&a).is_none());
        assert!(co.get(&b).is_none());
        assert!(co.get_all().is_empty());
        assert_eq!(removed.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_never_auto_removes() {
        let co = Coordinator::new(test_config());
        let id = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );

        advance(Duration::from_secs(3600)).await;
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_duration_applies_when_unset() {
        let co = Coordinator::new(test_config());
        let id = co.add(FeedbackKind::Toast, FeedbackOptions::new());

        advance(Duration::from_millis(100)).await;
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Visible));

        // default 1000ms after the enter window
        advance(Duration::from_millis(1000)).await;
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_expiring_kind_ignores_duration() {
        let co = Coordinator::new(test_config());
        let id = co.add(
            FeedbackKind::Dialog,
            FeedbackOptions::new().with_duration(Duration::from_millis(500)),
        );

        advance(Duration::from_secs(60)).await;
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_remove_is_noop() {
        let co = Coordinator::new(test_config());
        let id = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );
        advance(Duration::from_millis(100)).await;

        let transitions = record(&co, EventKind::StatusChanged);
        co.remove(&id);
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));
        assert_eq!(transitions.lock().unwrap().len(), 1);

        co.remove(&id);
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));
        assert_eq!(transitions.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_while_entering_skips_visible() {
        let co = Coordinator::new(test_config());
        let transitions = record(&co, EventKind::StatusChanged);
        let id = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );
        co.remove(&id);
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));

        advance(Duration::from_millis(100)).await;
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));

        advance(Duration::from_millis(100)).await;
        assert!(co.get(&id).is_none());

        let seen: Vec<Option<ItemStatus>> =
            transitions.lock().unwrap().iter().map(|ev| ev.to).collect();
        assert!(!seen.contains(&Some(ItemStatus::Visible)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_cancels_auto_dismiss_timer() {
        let co = Coordinator::new(test_config());
        let removed = record(&co, EventKind::ItemRemoved);
        let id = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::from_millis(1000)),
        );
        advance(Duration::from_millis(100)).await;

        co.remove(&id);
        advance(Duration::from_millis(200)).await;
        assert!(co.get(&id).is_none());

        // past the original dismiss deadline: nothing fires twice
        advance(Duration::from_millis(2000)).await;
        assert_eq!(removed.lock().unwrap().len(), 1);
        assert!(co.get_all().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_visible_evicts_oldest_through_exit_path() {
        let mut config = test_config();
        config.max_visible = 3;
        let co = Coordinator::new(config);

        let ids: Vec<String> = (0..4)
            .map(|_| {
                co.add(
                    FeedbackKind::Toast,
                    FeedbackOptions::new().with_duration(Duration::ZERO),
                )
            })
            .collect();

        assert_eq!(status_of(&co, &ids[0]), Some(ItemStatus::Exiting));
        assert_eq!(status_of(&co, &ids[1]), Some(ItemStatus::Entering));
        assert_eq!(status_of(&co, &ids[2]), Some(ItemStatus::Entering));
        assert_eq!(status_of(&co, &ids[3]), Some(ItemStatus::Entering));

        let live = co
            .get_by_kind(FeedbackKind::Toast)
            .into_iter()
            .filter(|item| !item.status().is_leaving())
            .count();
        assert_eq!(live, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_overflow_publishes_event_and_skips_store() {
        let mut config = test_config();
        config.queue = QueueConfig {
            capacity: 1,
            strategy: OverflowStrategy::Reject,
        };
        let co = Coordinator::new(config);
        let overflow = record(&co, EventKind::QueueOverflow);

        let first = co.add(FeedbackKind::Toast, FeedbackOptions::new());
        let second = co.add(FeedbackKind::Toast, FeedbackOptions::new());

        assert!(!second.is_empty());
        assert!(co.get(&first).is_some());
        assert!(co.get(&second).is_none());
        assert_eq!(co.get_all().len(), 1);

        let events = overflow.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].item.as_deref(), Some(second.as_str()));
        assert_eq!(events[0].reason.as_deref(), Some("queue_capacity_exhausted"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_merges_options_without_touching_status() {
        let co = Coordinator::new(test_config());
        let updated = record(&co, EventKind::ItemUpdated);
        let id = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new()
                .with_message("before")
                .with_duration(Duration::ZERO),
        );
        advance(Duration::from_millis(100)).await;

        co.update(&id, &OptionsPatch::new().with_message("after"));
        let item = co.get(&id).unwrap();
        assert_eq!(item.options().message(), Some("after"));
        assert_eq!(item.status(), ItemStatus::Visible);
        assert_eq!(updated.lock().unwrap().len(), 1);

        co.update("ghost", &OptionsPatch::new().with_message("x"));
        assert_eq!(updated.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_does_not_recompute_queue_priority() {
        let mut config = test_config();
        config.queue = QueueConfig {
            capacity: 1,
            strategy: OverflowStrategy::Priority,
        };
        let co = Coordinator::new(config);
        let overflow = record(&co, EventKind::QueueOverflow);

        let first = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new()
                .with_variant(Variant::Info)
                .with_duration(Duration::ZERO),
        );
        co.update(&first, &OptionsPatch::new().with_variant(Variant::Error));

        // queue still holds the stale info priority, so a warning wins
        let second = co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new()
                .with_variant(Variant::Warning)
                .with_duration(Duration::ZERO),
        );
        assert!(overflow.lock().unwrap().is_empty());
        assert!(co.get(&second).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_all_scoped_emits_single_event() {
        let co = Coordinator::new(test_config());
        let cleared = record(&co, EventKind::ItemsCleared);
        let removed = record(&co, EventKind::ItemRemoved);

        co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );
        co.add(
            FeedbackKind::Toast,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );
        let banner = co.add(
            FeedbackKind::Banner,
            FeedbackOptions::new().with_duration(Duration::ZERO),
        );

        co.remove_all(Some(FeedbackKind::Toast));
        assert!(co.get_by_kind(FeedbackKind::Toast).is_empty());
        assert!(co.get(&banner).is_some());

        let events = cleared.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].feedback, Some(FeedbackKind::Toast));
        assert!(removed.lock().unwrap().is_empty());

        // cancelled timers stay silent
        drop(events);
        advance(Duration::from_secs(10)).await;
        assert_eq!(co.get_all().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_all_unscoped_clears_everything() {
        let co = Coordinator::new(test_config());
        let cleared = record(&co, EventKind::ItemsCleared);
        co.add(FeedbackKind::Toast, FeedbackOptions::new());
        co.add(FeedbackKind::Dialog, FeedbackOptions::new());

        co.remove_all(None);
        assert!(co.get_all().is_empty());

        let events = cleared.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].feedback, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_runs_callback_then_removes() {
        let co = Coordinator::new(test_config());
        let confirmed = Arc::new(AtomicBool::new(false));
        let flag = confirmed.clone();
        let id = co.add(
            FeedbackKind::Dialog,
            FeedbackOptions::new().with_on_confirm(move || {
                flag.store(true, AtomicOrdering::SeqCst);
            }),
        );
        advance(Duration::from_millis(100)).await;

        co.confirm(&id);
        assert!(confirmed.load(AtomicOrdering::SeqCst));
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_runs_callback_then_removes() {
        let co = Coordinator::new(test_config());
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let id = co.add(
            FeedbackKind::Prompt,
            FeedbackOptions::new().with_on_cancel(move || {
                flag.store(true, AtomicOrdering::SeqCst);
            }),
        );

        co.cancel(&id);
        assert!(cancelled.load(AtomicOrdering::SeqCst));
        assert_eq!(status_of(&co, &id), Some(ItemStatus::Exiting));
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_cancels_timers_and_clears_state() {
        let co = Coordinator::new(test_config());
        let transitions = record(&co, EventKind::StatusChanged);
        co.add(FeedbackKind::Toast, FeedbackOptions::new());
        co.add(
            FeedbackKind::Banner,
            FeedbackOptions::new().with_duration(Duration::from_millis(500)),
        );
        let before = transitions.lock().unwrap().len();

        co.destroy();
        assert!(co.is_destroyed());
        assert!(co.get_all().is_empty());

        advance(Duration::from_secs(3600)).await;
        assert!(co.get_all().is_empty());
        assert_eq!(transitions.lock().unwrap().len(), before);

        // the instance stays inert
        let id = co.add(FeedbackKind::Toast, FeedbackOptions::new());
        assert!(!id.is_empty());
        assert!(co.get_all().is_empty());
        co.destroy();
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_config_propagates_queue() {
        let co = Coordinator::new(test_config());
        let overflow = record(&co, EventKind::QueueOverflow);

        co.update_config(
            &ConfigPatch::new().with_queue(QueueConfig {
                capacity: 1,
                strategy: OverflowStrategy::Reject,
            }),
        );
        assert_eq!(co.config().queue.capacity, 1);

        co.add(FeedbackKind::Toast, FeedbackOptions::new());
        co.add(FeedbackKind::Toast, FeedbackOptions::new());
        assert_eq!(overflow.lock().unwrap().len(), 1);
        assert_eq!(co.get_all().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_config_returns_defensive_copy() {
        let co = Coordinator::new(test_config());
        let mut copy = co.config();
        copy.max_visible = 999;
        assert_eq!(co.config().max_visible, 5);
    }
}
