//! # notivisor
//!
//! **Notivisor** is a lifecycle orchestration library for ephemeral,
//! user-facing feedback signals (transient notices, blocking dialogs,
//! progress indicators, status banners).
//!
//! It decides *when* a signal exists, *what state* it is in, *how long* it
//! lives, and *which one wins* when capacity is exceeded — independent of
//! how each signal is drawn on screen. Rendering layers subscribe to store
//! queries and lifecycle events; they never mutate state directly.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ add(Toast)   │   │ add(Dialog)  │   │ remove(id)   │
//!     │ (caller #1)  │   │ (caller #2)  │   │ (renderer)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Coordinator (lifecycle orchestrator)                             │
//! │  - AdmissionQueue (bounded, priority-aware, overflow strategy)    │
//! │  - ItemStore (copy-on-write snapshots, status choke point)        │
//! │  - Hub (typed publish/subscribe, per-handler isolation)           │
//! │  - Scheduler (cancellable timers per item and transition)         │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   enter timer        dismiss timer      exit timer
//!   Entering→Visible   remove(id)         Removed + cleanup
//!        │                  │                  │
//!        └──────────────────┴──────────────────┘
//!                           ▼
//!                 Hub.publish(StatusChanged, ItemRemoved, ...)
//!                           ▼
//!              renderers / VisibleTracker / LogWriter
//! ```
//!
//! ### Lifecycle
//! ```text
//! add(kind, options)
//!   ├─► AdmissionQueue.enqueue
//!   │     ├─ Rejected  ─► QueueOverflow event, id returned, never visible
//!   │     └─ Accepted  ─► ItemStore.add, ItemAdded event
//!   ├─► Pending → Entering                  (synchronous, zero delay)
//!   ├─► Entering → Visible                  (after enter_duration)
//!   ├─► remove(id)                          (auto-dismiss or explicit)
//!   │     ├─ cancel pending timers
//!   │     └─ Visible → Exiting
//!   └─► Exiting → Removed                   (after exit_duration)
//!         └─ store/queue cleanup, ItemRemoved event
//! ```
//!
//! | Concern           | Purpose                                             | Key types                              |
//! |-------------------|-----------------------------------------------------|----------------------------------------|
//! | **Orchestration** | Sequence transitions, own timers and teardown.      | [`Coordinator`]                        |
//! | **Admission**     | Decide which item wins when capacity is exceeded.   | [`AdmissionQueue`], [`OverflowStrategy`] |
//! | **Records**       | Canonical, identity-diffable item snapshots.        | [`ItemStore`], [`FeedbackItem`]        |
//! | **Events**        | Decouple reactions from mutations.                  | [`Hub`], [`Event`], [`EventKind`]      |
//! | **Configuration** | Centralize durations, caps, and queue policy.       | [`CoordinatorConfig`]                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use notivisor::{
//!     Coordinator, CoordinatorConfig, EventKind, FeedbackKind, FeedbackOptions, Variant,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = CoordinatorConfig::default();
//!     cfg.max_visible = 3;
//!
//!     let feedback = Coordinator::new(cfg);
//!
//!     // React to admission refusals
//!     let _sub = feedback.subscribe(EventKind::QueueOverflow, |ev| {
//!         eprintln!("dropped {:?}: {:?}", ev.item, ev.reason);
//!     });
//!
//!     // A transient success notice with a custom lifetime
//!     let id = feedback.add(
//!         FeedbackKind::Toast,
//!         FeedbackOptions::new()
//!             .with_message("export finished")
//!             .with_variant(Variant::Success)
//!             .with_duration(Duration::from_secs(3)),
//!     );
//!
//!     assert!(feedback.get(&id).is_some());
//!     feedback.destroy();
//! }
//! ```

mod core;
mod error;
mod events;
mod items;
mod observe;
mod queue;
mod store;

// ---- Public re-exports ----

pub use self::core::{ConfigPatch, Coordinator, CoordinatorConfig};
pub use error::AdmissionError;
pub use events::{Event, EventKind, Hub, Subscription};
pub use items::{Callback, FeedbackItem, FeedbackKind, FeedbackOptions, ItemStatus, OptionsPatch, Variant};
pub use observe::{FailureSink, StderrSink, VisibleTracker};
pub use queue::{Admission, AdmissionQueue, OverflowStrategy, QueueConfig, QueueEntry};
pub use store::{ItemStore, StoreSnapshot};

// Optional: expose a simple built-in logger consumer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observe::LogWriter;
