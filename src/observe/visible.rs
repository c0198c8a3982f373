//! # VisibleTracker – track currently visible items
//!
//! Maintains an in-memory map of item ids whose status is `Visible` by
//! listening to [`EventKind::StatusChanged`], [`EventKind::ItemRemoved`] and
//! [`EventKind::ItemsCleared`].
//!
//! ## Why?
//! Rendering layers and metrics can read the live set without re-querying
//! the store, and tests can assert on what a user currently sees.
//!
//! ## Internal scheme
//! ```text
//! on_event(ev):
//!   ├─ StatusChanged to=Visible            => insert(id, kind)
//!   ├─ StatusChanged to=Exiting/Removed    => remove(id)
//!   ├─ ItemRemoved                         => remove(id)
//!   ├─ ItemsCleared feedback=Some(k)       => drop all ids of kind k
//!   ├─ ItemsCleared feedback=None          => clear()
//!   └─ otherwise: ignore
//!
//! snapshot() -> Vec<String>  (sorted copy of the current set)
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::events::{Event, EventKind, Hub, Subscription};
use crate::items::{FeedbackKind, ItemStatus};

/// Tracks the set of currently visible item ids, keyed by feedback kind.
pub struct VisibleTracker {
    inner: RwLock<HashMap<String, FeedbackKind>>,
    subs: Mutex<Vec<Subscription>>,
}

impl VisibleTracker {
    /// Creates a tracker and wires it to the hub.
    ///
    /// The returned handle stays registered until [`detach`](Self::detach)
    /// is called or the hub clears its subscriptions.
    #[must_use]
    pub fn attach(hub: &Hub) -> Arc<Self> {
        let tracker = Arc::new(Self {
            inner: RwLock::new(HashMap::new()),
            subs: Mutex::new(Vec::new()),
        });

        let mut subs = Vec::with_capacity(3);
        for kind in [
            EventKind::StatusChanged,
            EventKind::ItemRemoved,
            EventKind::ItemsCleared,
        ] {
            let me = tracker.clone();
            subs.push(hub.subscribe(kind, move |ev| me.on_event(ev)));
        }
        *tracker.subs.lock().unwrap() = subs;
        tracker
    }

    /// Returns a snapshot (sorted) of currently visible item ids.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        let g = self.inner.read().unwrap();
        let mut v: Vec<String> = g.keys().cloned().collect();
        v.sort_unstable();
        v
    }

    /// Returns a snapshot (sorted) of visible item ids of one kind.
    #[must_use]
    pub fn snapshot_kind(&self, kind: FeedbackKind) -> Vec<String> {
        let g = self.inner.read().unwrap();
        let mut v: Vec<String> = g
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(id, _)| id.clone())
            .collect();
        v.sort_unstable();
        v
    }

    /// Number of visible items of one kind.
    #[must_use]
    pub fn count(&self, kind: FeedbackKind) -> usize {
        self.inner
            .read()
            .unwrap()
            .values()
            .filter(|k| **k == kind)
            .count()
    }

    /// Cancels the hub subscriptions; the tracker stops updating.
    pub fn detach(&self) {
        for sub in self.subs.lock().unwrap().drain(..) {
            sub.cancel();
        }
    }

    fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::StatusChanged => {
                let Some(id) = ev.item.as_deref() else { return };
                match ev.to {
                    Some(ItemStatus::Visible) => {
                        if let Some(kind) = ev.feedback {
                            self.inner.write().unwrap().insert(id.to_owned(), kind);
                        }
                    }
                    Some(status) if status.is_leaving() => {
                        self.inner.write().unwrap().remove(id);
                    }
                    _ => {}
                }
            }
            EventKind::ItemRemoved => {
                if let Some(id) = ev.item.as_deref() {
                    self.inner.write().unwrap().remove(id);
                }
            }
            EventKind::ItemsCleared => {
                let mut g = self.inner.write().unwrap();
                match ev.feedback {
                    Some(kind) => g.retain(|_, k| *k != kind),
                    None => g.clear(),
                }
            }
            _ => {}
        }
    }
}
