// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Mutex;

use tracing::info;

use crate::{DeliveryError, Notification, NotificationSink};

/// A sink that writes each notification to the log and nothing else.
///
/// This is the default transport when no mail relay is configured: the
/// lifecycle still emits and records events, operators can observe them,
/// and nothing external is contacted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        info!(
            event = notification.kind.code(),
            recipients = notification.recipients.len(),
            subject = %notification.subject,
            "notification"
        );
        Ok(())
    }
}

/// A sink that buffers notifications in memory.
///
/// Used by tests to assert on emitted events without any transport.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<Notification>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything delivered so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned, which only happens if a
    /// test thread panicked while delivering.
    #[must_use]
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Discards everything delivered so far.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.delivered.lock() {
            guard.clear();
        }
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.delivered
            .lock()
            .map_err(|_| DeliveryError::new(String::from("memory sink lock poisoned")))?
            .push(notification.clone());
        Ok(())
    }
}
