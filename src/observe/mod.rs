//! # Observability: failure sinks and stateful event consumers.
//!
//! ## Contents
//! - [`FailureSink`], [`StderrSink`] — injected reporting for isolated
//!   handler/timer panics
//! - [`VisibleTracker`] — live set of visible item ids per kind
//! - [`LogWriter`] — bracket-format event printer (feature `logging`)
//!
//! ## Consumer types
//! - **Passive** — observe and react to events (logging, metrics, alerts)
//! - **Stateful** — maintain internal state based on events (VisibleTracker)

mod sink;
mod visible;

#[cfg(feature = "logging")]
mod log;

pub use sink::{FailureSink, StderrSink};
pub use visible::VisibleTracker;

pub(crate) use sink::panic_message;

#[cfg(feature = "logging")]
pub use log::LogWriter;
