//! # Canonical item store with copy-on-write snapshots.
//!
//! [`ItemStore`] owns the canonical record of every item currently known to
//! the system. Internally it keeps an `Arc<HashMap>`; every mutation clones
//! the map and swaps in a new `Arc`, so two snapshots compare equal by
//! pointer identity exactly when nothing changed in between.
//!
//! ## Rules
//! - Queries return fresh collections, never live views; re-query or
//!   subscribe to events to stay current.
//! - Unknown-id mutations are silent no-ops and do not produce a new
//!   snapshot identity.
//! - Every effective mutation refreshes the item's `updated_at`.
//!
//! ## Identity-based change detection
//! ```text
//! let before = store.snapshot();
//! ...
//! let after = store.snapshot();
//! if !Arc::ptr_eq(&before, &after) { /* re-render */ }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::items::{FeedbackItem, FeedbackKind, ItemStatus, OptionsPatch};

/// Immutable view of the whole store at one point in time.
pub type StoreSnapshot = Arc<HashMap<String, FeedbackItem>>;

/// Keyed collection of feedback items.
#[derive(Debug)]
pub struct ItemStore {
    snapshot: RwLock<StoreSnapshot>,
}

impl ItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Inserts an item, replacing any record with the same id.
    pub fn add(&self, item: FeedbackItem) {
        let mut guard = self.snapshot.write().unwrap();
        let mut next: HashMap<String, FeedbackItem> = (**guard).clone();
        next.insert(item.id().to_owned(), item);
        *guard = Arc::new(next);
    }

    /// Removes an item; `None` (and no new snapshot) if absent.
    pub fn remove(&self, id: &str) -> Option<FeedbackItem> {
        let mut guard = self.snapshot.write().unwrap();
        if !guard.contains_key(id) {
            return None;
        }
        let mut next: HashMap<String, FeedbackItem> = (**guard).clone();
        let removed = next.remove(id);
        *guard = Arc::new(next);
        removed
    }

    /// Merges an options patch into an item; returns its kind, or `None`
    /// (and no new snapshot) if absent. Never touches the status.
    pub fn update_options(&self, id: &str, patch: &OptionsPatch) -> Option<FeedbackKind> {
        let mut guard = self.snapshot.write().unwrap();
        if !guard.contains_key(id) {
            return None;
        }
        let mut next: HashMap<String, FeedbackItem> = (**guard).clone();
        let item = next.get_mut(id)?;
        item.apply_patch(patch);
        let kind = item.kind();
        *guard = Arc::new(next);
        Some(kind)
    }

    /// Sets an item's status; returns `(kind, from, to)`, or `None` (and no
    /// new snapshot) if absent.
    pub fn set_status(
        &self,
        id: &str,
        status: ItemStatus,
    ) -> Option<(FeedbackKind, ItemStatus, ItemStatus)> {
        let mut guard = self.snapshot.write().unwrap();
        if !guard.contains_key(id) {
            return None;
        }
        let mut next: HashMap<String, FeedbackItem> = (**guard).clone();
        let item = next.get_mut(id)?;
        let from = item.set_status(status);
        let kind = item.kind();
        *guard = Arc::new(next);
        Some((kind, from, status))
    }

    /// Drops every item.
    pub fn clear(&self) {
        let mut guard = self.snapshot.write().unwrap();
        *guard = Arc::new(HashMap::new());
    }

    /// Drops every item of one kind; returns the removed items oldest first.
    pub fn clear_kind(&self, kind: FeedbackKind) -> Vec<FeedbackItem> {
        let mut guard = self.snapshot.write().unwrap();
        let mut next: HashMap<String, FeedbackItem> = (**guard).clone();
        let mut removed: Vec<FeedbackItem> = Vec::new();
        next.retain(|_, item| {
            if item.kind() == kind {
                removed.push(item.clone());
                false
            } else {
                true
            }
        });
        if removed.is_empty() {
            return removed;
        }
        *guard = Arc::new(next);
        removed.sort_by_key(FeedbackItem::seq);
        removed
    }

    /// Looks up one item by id.
    pub fn get(&self, id: &str) -> Option<FeedbackItem> {
        self.snapshot.read().unwrap().get(id).cloned()
    }

    /// All items, oldest first.
    #[must_use]
    pub fn get_all(&self) -> Vec<FeedbackItem> {
        let mut items: Vec<FeedbackItem> = self.snapshot.read().unwrap().values().cloned().collect();
        items.sort_by_key(FeedbackItem::seq);
        items
    }

    /// Items of one kind, oldest first.
    #[must_use]
    pub fn get_by_kind(&self, kind: FeedbackKind) -> Vec<FeedbackItem> {
        let mut items: Vec<FeedbackItem> = self
            .snapshot
            .read()
            .unwrap()
            .values()
            .filter(|item| item.kind() == kind)
            .cloned()
            .collect();
        items.sort_by_key(FeedbackItem::seq);
        items
    }

    /// Items in one status, oldest first.
    #[must_use]
    pub fn get_by_status(&self, status: ItemStatus) -> Vec<FeedbackItem> {
        let mut items: Vec<FeedbackItem> = self
            .snapshot
            .read()
            .unwrap()
            .values()
            .filter(|item| item.status() == status)
            .cloned()
            .collect();
        items.sort_by_key(FeedbackItem::seq);
        items
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.snapshot.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.read().unwrap().is_empty()
    }

    /// Current snapshot; compare with `Arc::ptr_eq` to detect change.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.read().unwrap().clone()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
