//! # Typed publish/subscribe hub.
//!
//! [`Hub`] decouples the coordinator from anything that needs to react to
//! lifecycle changes. Handlers register per [`EventKind`] and receive every
//! matching event synchronously, in registration order.
//!
//! ## Architecture
//! ```text
//! publish(&Event)
//!     │  (handler list cloned out; no lock held during delivery)
//!     ├──► handler 1 ── catch_unwind ──► panic → FailureSink, continue
//!     ├──► handler 2
//!     └──► handler N   (once-handlers pruned after the pass)
//! ```
//!
//! ## Rules
//! - **Isolation**: a panicking handler is reported to the sink and never
//!   aborts delivery to the remaining handlers or reaches the publisher.
//! - **Reentrancy**: handlers may subscribe, cancel, and publish; the
//!   registry lock is released before any handler runs.
//! - **Once semantics**: a `subscribe_once` handler fires at most one time,
//!   also under reentrant publishes.
//! - **Capability**: [`Subscription::cancel`] removes one handler; dropping
//!   the handle without cancelling leaves the handler registered.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock, Weak};

use crate::events::event::{Event, EventKind};
use crate::observe::{FailureSink, StderrSink, panic_message};

type HandlerFn = Arc<dyn Fn(&Event) + Send + Sync>;
type Registry = RwLock<HashMap<EventKind, Vec<HandlerEntry>>>;

#[derive(Clone)]
struct HandlerEntry {
    id: u64,
    handler: HandlerFn,
    once: bool,
    spent: Arc<AtomicBool>,
}

/// Capability to remove one registered handler.
///
/// Returned by [`Hub::subscribe`]/[`Hub::subscribe_once`]. `cancel` is
/// idempotent and keeps working after the hub itself is gone (as a no-op).
#[derive(Clone)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Removes the handler; returns whether it was still registered.
    pub fn cancel(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut map = registry.write().unwrap();
        let Some(entries) = map.get_mut(&self.kind) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.id != self.id);
        before != entries.len()
    }

    /// Event kind this subscription is attached to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Publish/subscribe broker for lifecycle events.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use notivisor::{Event, EventKind, Hub};
///
/// let hub = Hub::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = seen.clone();
/// let sub = hub.subscribe(EventKind::ItemAdded, move |_ev| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// hub.publish(&Event::new(EventKind::ItemAdded).with_item("toast-1"));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
///
/// sub.cancel();
/// hub.publish(&Event::new(EventKind::ItemAdded));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct Hub {
    registry: Arc<Registry>,
    sink: Arc<dyn FailureSink>,
    next_id: AtomicU64,
}

impl Hub {
    /// Creates a hub reporting handler failures to [`StderrSink`].
    pub fn new() -> Self {
        Self::with_sink(Arc::new(StderrSink))
    }

    /// Creates a hub with an injected failure sink.
    pub fn with_sink(sink: Arc<dyn FailureSink>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            sink,
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers a handler for one event kind.
    ///
    /// Handlers run synchronously inside `publish`, in registration order.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(handler), false)
    }

    /// Registers a handler that auto-removes after its first invocation.
    pub fn subscribe_once<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(handler), true)
    }

    fn register(&self, kind: EventKind, handler: HandlerFn, once: bool) -> Subscription {
        let id = self.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        let entry = HandlerEntry {
            id,
            handler,
            once,
            spent: Arc::new(AtomicBool::new(false)),
        };
        self.registry.write().unwrap().entry(kind).or_default().push(entry);
        Subscription {
            kind,
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Delivers an event to every handler registered for its kind.
    ///
    /// Each invocation is isolated: a panic is caught, reported to the
    /// failure sink, and delivery continues with the next handler.
    pub fn publish(&self, event: &Event) {
        let entries: Vec<HandlerEntry> = {
            let map = self.registry.read().unwrap();
            match map.get(&event.kind) {
                Some(v) => v.clone(),
                None => return,
            }
        };

        let mut pruned = false;
        for entry in &entries {
            if entry.once {
                if entry.spent.swap(true, AtomicOrdering::SeqCst) {
                    continue;
                }
                pruned = true;
            }
            let handler = entry.handler.clone();
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (*handler)(event))) {
                self.sink
                    .handler_panicked(event.kind, entry.id, &panic_message(payload));
            }
        }

        if pruned {
            let mut map = self.registry.write().unwrap();
            if let Some(v) = map.get_mut(&event.kind) {
                v.retain(|e| !(e.once && e.spent.load(AtomicOrdering::SeqCst)));
            }
        }
    }

    /// Clears handlers for one event kind, or for all kinds.
    pub fn unsubscribe_all(&self, kind: Option<EventKind>) {
        let mut map = self.registry.write().unwrap();
        match kind {
            Some(k) => {
                map.remove(&k);
            }
            None => map.clear(),
        }
    }

    /// Number of live handlers registered for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.registry
            .read()
            .unwrap()
            .get(&kind)
            .map(|v| {
                v.iter()
                    .filter(|e| !(e.once && e.spent.load(AtomicOrdering::SeqCst)))
                    .count()
            })
            .unwrap_or(0)
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}
