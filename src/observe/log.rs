//! # LogWriter — simple event printer
//!
//! A minimal consumer that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [added] item="toast-1" kind=toast
//! [status] item="toast-1" entering -> visible
//! [updated] item="toast-1"
//! [removed] item="toast-1" kind=toast
//! [cleared] kind=toast
//! [overflow] item="toast-9" reason="queue_capacity_exhausted"
//! ```

use crate::events::{Event, EventKind, Hub, Subscription};

/// Event writer attached to every event kind.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Registers the writer on the hub; returns the subscriptions so the
    /// caller can cancel them.
    #[must_use]
    pub fn attach(hub: &Hub) -> Vec<Subscription> {
        EventKind::ALL
            .iter()
            .map(|kind| hub.subscribe(*kind, Self::write))
            .collect()
    }

    fn write(ev: &Event) {
        match ev.kind {
            EventKind::ItemAdded => {
                println!(
                    "[added] item={:?} kind={}",
                    ev.item.as_deref().unwrap_or("unknown"),
                    ev.feedback.map(|k| k.as_label()).unwrap_or("unknown"),
                );
            }
            EventKind::ItemUpdated => {
                println!("[updated] item={:?}", ev.item.as_deref().unwrap_or("unknown"));
            }
            EventKind::StatusChanged => {
                println!(
                    "[status] item={:?} {} -> {}",
                    ev.item.as_deref().unwrap_or("unknown"),
                    ev.from.map(|s| s.as_label()).unwrap_or("unknown"),
                    ev.to.map(|s| s.as_label()).unwrap_or("unknown"),
                );
            }
            EventKind::ItemRemoved => {
                println!(
                    "[removed] item={:?} kind={}",
                    ev.item.as_deref().unwrap_or("unknown"),
                    ev.feedback.map(|k| k.as_label()).unwrap_or("unknown"),
                );
            }
            EventKind::ItemsCleared => match ev.feedback {
                Some(kind) => println!("[cleared] kind={}", kind.as_label()),
                None => println!("[cleared] all"),
            },
            EventKind::QueueOverflow => {
                println!(
                    "[overflow] item={:?} reason={:?}",
                    ev.item.as_deref().unwrap_or("unknown"),
                    ev.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }
}
