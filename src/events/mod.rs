//! Lifecycle events: data model and publish/subscribe hub.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Hub`], [`Subscription`] — typed broker with per-handler isolation
//!
//! ## Quick reference
//! - **Publisher**: the coordinator (every add/update/transition/removal and
//!   every admission refusal goes through `Hub::publish`).
//! - **Consumers**: rendering layers and stateful trackers (see
//!   `observe::VisibleTracker`).

mod event;
mod hub;

pub use event::{Event, EventKind};
pub use hub::{Hub, Subscription};
