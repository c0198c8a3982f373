//! # Failure sink for swallowed handler errors.
//!
//! Hub handlers and timer callbacks are isolated: a panic inside one is
//! caught, reported here, and never propagated to the publisher or the timer
//! queue. The sink is an injected dependency so failure visibility stays
//! configurable; [`StderrSink`] is the default.

use std::any::Any;

use crate::events::EventKind;

/// Contract for reporting isolated handler/callback failures.
///
/// Implementations must not panic.
pub trait FailureSink: Send + Sync + 'static {
    /// A subscribed hub handler panicked while processing an event.
    ///
    /// ### Parameters
    /// - `kind`: event kind being delivered
    /// - `handler_id`: registration id of the panicking handler
    /// - `info`: panic payload rendered as text
    fn handler_panicked(&self, kind: EventKind, handler_id: u64, info: &str);

    /// A timer-driven coordinator callback panicked.
    ///
    /// ### Parameters
    /// - `item`: id of the item the timer belonged to
    /// - `label`: timer slot (`"enter"`, `"dismiss"`, `"exit"`)
    /// - `info`: panic payload rendered as text
    fn timer_panicked(&self, item: &str, label: &'static str, info: &str);
}

/// Default sink: reports failures to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl FailureSink for StderrSink {
    fn handler_panicked(&self, kind: EventKind, handler_id: u64, info: &str) {
        eprintln!("[notivisor] hub: handler {handler_id} panicked on {kind:?}: {info}");
    }

    fn timer_panicked(&self, item: &str, label: &'static str, info: &str) {
        eprintln!("[notivisor] timer: {label} callback for '{item}' panicked: {info}");
    }
}

/// Renders a caught panic payload as text.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let any = &*payload;
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
