// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Notification event types and dispatch.
//!
//! Lifecycle operations emit [`Notification`] values describing who
//! should hear about a state change. Delivery is a fire-and-forget side
//! effect: [`dispatch`] hands each notification to a [`NotificationSink`]
//! and swallows (but logs) every failure. A failed delivery must never
//! fail or roll back the mutation that produced it.

mod event;
mod sinks;


pub use event::{EventKind, Notification, Recipient};
pub use sinks::{LogSink, MemorySink};

use tracing::warn;

/// An error produced by a notification sink.
///
/// Sinks report failures so they can be logged, but callers of
/// [`dispatch`] never observe them.
#[derive(Debug, thiserror::Error)]
#[error("notification delivery failed: {reason}")]
pub struct DeliveryError {
    /// Description of the delivery failure.
    pub reason: String,
}

impl DeliveryError {
    /// Creates a new delivery error.
    #[must_use]
    pub const fn new(reason: String) -> Self {
        Self { reason }
    }
}

/// A destination for notifications.
///
/// Implementations deliver by whatever transport they represent (log
/// lines, email, an in-memory buffer for tests). Delivery must not
/// block for long; it runs on the request path after the mutation has
/// already been committed.
pub trait NotificationSink: Send + Sync {
    /// Delivers a single notification.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the transport failed. The error
    /// is logged and discarded by [`dispatch`].
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// Dispatches a batch of notifications to a sink, swallowing failures.
///
/// Each failure is logged at `warn` level with the event code. This is
/// the only way lifecycle operations send notifications; nothing ever
/// propagates a delivery failure to the caller.
pub fn dispatch(sink: &dyn NotificationSink, notifications: &[Notification]) {
    for notification in notifications {
        if let Err(err) = sink.deliver(notification) {
            warn!(
                event = notification.kind.code(),
                error = %err,
                "notification delivery failed; continuing"
            );
        }
    }
}
