//! # Feedback item data model.
//!
//! Defines [`FeedbackItem`] — one notice/dialog/indicator tracked by the
//! coordinator — together with its closed [`FeedbackKind`] set and the
//! [`ItemStatus`] state machine.
//!
//! ## Status state machine
//! ```text
//! Pending ──► Entering ──► Visible ──► Exiting ──► Removed
//!    │            │            │
//!    └── add() ───┘            └── auto-dismiss timer / remove()
//! ```
//! Transitions only move forward. An item that reached `Exiting` ignores
//! further removal requests; `Removed` is terminal.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::items::options::{FeedbackOptions, OptionsPatch};

/// Global creation counter used for deterministic oldest-first ordering.
static ITEM_SEQ: AtomicU64 = AtomicU64::new(0);

/// Closed set of feedback categories handled by the coordinator.
///
/// The kind decides default presentation (out of scope here) and whether an
/// item auto-expires after its duration elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// Transient notice stacked in a corner; auto-expires.
    Toast,
    /// Blocking confirmation dialog; lives until confirmed or cancelled.
    Dialog,
    /// General-purpose modal surface.
    Modal,
    /// Input prompt awaiting a user-supplied value.
    Prompt,
    /// Progress indicator for a long-running operation.
    Progress,
    /// Full-width status banner; auto-expires.
    Banner,
    /// Slide-in side panel.
    Panel,
}

impl FeedbackKind {
    /// All kinds, in declaration order.
    pub const ALL: [FeedbackKind; 7] = [
        FeedbackKind::Toast,
        FeedbackKind::Dialog,
        FeedbackKind::Modal,
        FeedbackKind::Prompt,
        FeedbackKind::Progress,
        FeedbackKind::Banner,
        FeedbackKind::Panel,
    ];

    /// Short stable label (snake_case) used in generated ids and logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            FeedbackKind::Toast => "toast",
            FeedbackKind::Dialog => "dialog",
            FeedbackKind::Modal => "modal",
            FeedbackKind::Prompt => "prompt",
            FeedbackKind::Progress => "progress",
            FeedbackKind::Banner => "banner",
            FeedbackKind::Panel => "panel",
        }
    }

    /// Whether items of this kind are removed automatically once their
    /// duration elapses.
    ///
    /// Transient notices (`Toast`, `Banner`) auto-expire; every other kind
    /// lives until an explicit `remove`/`confirm`/`cancel`.
    pub fn auto_expires(&self) -> bool {
        matches!(self, FeedbackKind::Toast | FeedbackKind::Banner)
    }
}

/// Observable lifecycle status of a feedback item.
///
/// The derived ordering follows the transition sequence, so
/// `status >= ItemStatus::Exiting` means "already on the way out".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemStatus {
    /// Created, not yet admitted to the visible flow.
    Pending,
    /// Enter animation window is running.
    Entering,
    /// Fully presented to the user.
    Visible,
    /// Exit animation window is running; removal is committed.
    Exiting,
    /// Terminal: gone from the store.
    Removed,
}

impl ItemStatus {
    /// Short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Entering => "entering",
            ItemStatus::Visible => "visible",
            ItemStatus::Exiting => "exiting",
            ItemStatus::Removed => "removed",
        }
    }

    /// True once the item is `Exiting` or `Removed`.
    pub fn is_leaving(&self) -> bool {
        *self >= ItemStatus::Exiting
    }
}

/// One feedback signal tracked by the system.
///
/// Items are created by `Coordinator::add`, mutated only through coordinator
/// methods, and destroyed when their exit window elapses or on `remove_all`.
///
/// ## Example
/// ```rust
/// use notivisor::{FeedbackItem, FeedbackKind, FeedbackOptions, ItemStatus, Variant};
///
/// let item = FeedbackItem::new(
///     FeedbackKind::Toast,
///     FeedbackOptions::new().with_message("saved").with_variant(Variant::Success),
/// );
/// assert_eq!(item.status(), ItemStatus::Pending);
/// assert!(item.id().starts_with("toast-"));
/// ```
#[derive(Debug, Clone)]
pub struct FeedbackItem {
    id: String,
    kind: FeedbackKind,
    status: ItemStatus,
    created_at: SystemTime,
    updated_at: SystemTime,
    seq: u64,
    options: FeedbackOptions,
}

impl FeedbackItem {
    /// Builds a `Pending` item, resolving the id from the options or
    /// generating one from the kind label plus a time/sequence suffix.
    pub fn new(kind: FeedbackKind, options: FeedbackOptions) -> Self {
        let now = SystemTime::now();
        let seq = ITEM_SEQ.fetch_add(1, AtomicOrdering::Relaxed);
        let id = options
            .id()
            .map(str::to_owned)
            .unwrap_or_else(|| generate_id(kind, seq));
        Self {
            id,
            kind,
            status: ItemStatus::Pending,
            created_at: now,
            updated_at: now,
            seq,
            options,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Feedback category.
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Timestamp of the last store mutation touching this item.
    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    /// Monotonic creation sequence; smaller means older.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Type-specific payload.
    pub fn options(&self) -> &FeedbackOptions {
        &self.options
    }

    /// Sets the status and refreshes `updated_at`. Store-internal.
    pub(crate) fn set_status(&mut self, status: ItemStatus) -> ItemStatus {
        let from = self.status;
        self.status = status;
        self.updated_at = SystemTime::now();
        from
    }

    /// Merges an options patch and refreshes `updated_at`. Store-internal.
    pub(crate) fn apply_patch(&mut self, patch: &OptionsPatch) {
        patch.apply_to(&mut self.options);
        self.updated_at = SystemTime::now();
    }
}

fn generate_id(kind: FeedbackKind, seq: u64) -> String {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("{}-{nanos:x}-{seq:x}", kind.as_label())
}
