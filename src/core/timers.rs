//! # Timer scheduling for status transitions.
//!
//! [`Scheduler`] wraps the runtime's timer primitive behind a small
//! `schedule_after(delay, callback) → guard` surface so every transition
//! timer is built the same way and carries its own cancellation.
//!
//! ## Rules
//! - Every timer races a child [`CancellationToken`] against
//!   `tokio::time::sleep`; cancellation wins silently, the callback never
//!   runs.
//! - `cancel_all()` cancels the root token; children born afterwards start
//!   cancelled, so a torn-down scheduler cannot fire anything.
//! - Callback panics are caught and reported to the failure sink; the timer
//!   queue keeps running.
//! - Tests drive the deterministic clock via `tokio::time::pause`/`advance`
//!   (`#[tokio::test(start_paused = true)]`).

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::observe::{FailureSink, panic_message};

/// Spawns cancellable one-shot timers on the tokio runtime.
pub(crate) struct Scheduler {
    root: CancellationToken,
    sink: Arc<dyn FailureSink>,
}

impl Scheduler {
    pub fn new(sink: Arc<dyn FailureSink>) -> Self {
        Self {
            root: CancellationToken::new(),
            sink,
        }
    }

    /// Runs `callback` once `delay` elapsed, unless cancelled first.
    ///
    /// ### Parameters
    /// - `delay`: time to wait on the runtime clock
    /// - `item`: id of the owning item (failure reports)
    /// - `label`: timer slot name (failure reports)
    /// - `callback`: future re-entering the coordinator
    pub fn schedule_after<F>(
        &self,
        delay: Duration,
        item: &str,
        label: &'static str,
        callback: F,
    ) -> TimerGuard
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.root.child_token();
        let watched = token.clone();
        let sink = self.sink.clone();
        let item: Arc<str> = Arc::from(item);

        tokio::spawn(async move {
            tokio::select! {
                _ = watched.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Err(payload) = AssertUnwindSafe(callback).catch_unwind().await {
                        sink.timer_panicked(&item, label, &panic_message(payload));
                    }
                }
            }
        });

        TimerGuard { token }
    }

    /// Cancels every outstanding and future timer.
    pub fn cancel_all(&self) {
        self.root.cancel();
    }
}

/// Cancellation handle for one scheduled timer.
pub(crate) struct TimerGuard {
    token: CancellationToken,
}

impl TimerGuard {
    /// Prevents the callback from running; idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Pending timers owned by one item, one slot per transition.
///
/// Replacing a slot cancels the previous guard, so an item can never hold
/// two live timers for the same transition.
#[derive(Default)]
pub(crate) struct ItemTimers {
    enter: Option<TimerGuard>,
    dismiss: Option<TimerGuard>,
    exit: Option<TimerGuard>,
}

impl ItemTimers {
    pub fn set_enter(&mut self, guard: TimerGuard) {
        if let Some(old) = self.enter.replace(guard) {
            old.cancel();
        }
    }

    pub fn set_dismiss(&mut self, guard: TimerGuard) {
        if let Some(old) = self.dismiss.replace(guard) {
            old.cancel();
        }
    }

    pub fn set_exit(&mut self, guard: TimerGuard) {
        if let Some(old) = self.exit.replace(guard) {
            old.cancel();
        }
    }

    pub fn clear_enter(&mut self) {
        self.enter = None;
    }

    pub fn clear_dismiss(&mut self) {
        self.dismiss = None;
    }

    /// Cancels the enter and auto-dismiss timers; the exit timer, once
    /// scheduled, is allowed to finish.
    pub fn cancel_pending(&mut self) {
        if let Some(guard) = self.enter.take() {
            guard.cancel();
        }
        if let Some(guard) = self.dismiss.take() {
            guard.cancel();
        }
    }

    /// Cancels everything, including a scheduled exit.
    pub fn cancel_all(&mut self) {
        self.cancel_pending();
        if let Some(guard) = self.exit.take() {
            guard.cancel();
        }
    }
}
