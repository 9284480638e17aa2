// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The kind of lifecycle event a notification describes.
///
/// Codes are dotted strings stable across releases; subtypes (such as
/// the direct-assignment notice at creation) are distinct kinds so a
/// recipient who receives both the department broadcast and the
/// assignment notice can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum EventKind {
    /// A complaint was created.
    ComplaintCreated,
    /// A complaint was created and directly auto-assigned to the
    /// receiving professor.
    ComplaintCreatedAssigned,
    /// A reply was appended to a complaint thread.
    ComplaintReplied,
    /// A complaint's status changed.
    ComplaintStatusChanged {
        /// The status before the change.
        old: String,
        /// The status after the change.
        new: String,
    },
    /// A complaint was assigned to the receiving professor.
    ComplaintAssigned,
    /// A complaint was reassigned away from the receiving professor.
    ComplaintReassignedAway,
    /// An account registration was approved.
    AccountApproved,
    /// An account registration was rejected.
    AccountRejected,
}

impl EventKind {
    /// Returns the stable dotted event code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ComplaintCreated => "complaint.created",
            Self::ComplaintCreatedAssigned => "complaint.created.assigned",
            Self::ComplaintReplied => "complaint.replied",
            Self::ComplaintStatusChanged { .. } => "complaint.status_changed",
            Self::ComplaintAssigned => "complaint.assigned",
            Self::ComplaintReassignedAway => "complaint.reassigned_away",
            Self::AccountApproved => "account.approved",
            Self::AccountRejected => "account.rejected",
        }
    }
}

/// A notification recipient descriptor.
///
/// The lifecycle engine is pure and cannot run directory queries, so
/// group recipients are descriptors that the delivering sink resolves
/// against the user directory at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipient {
    /// A specific user, identified by canonical ID.
    User {
        /// The canonical user ID.
        user_id: i64,
    },
    /// A specific student with the denormalized address from the
    /// complaint snapshot.
    Student {
        /// The canonical user ID.
        user_id: i64,
        /// The denormalized email captured on the complaint.
        email: String,
    },
    /// Every approved admin.
    AllApprovedAdmins,
    /// Every approved professor of a department, optionally excluding
    /// one user (typically the author of the triggering action).
    DepartmentProfessors {
        /// The department to broadcast to.
        department: String,
        /// A user to exclude from the broadcast, if any.
        exclude: Option<i64>,
    },
}

/// A single notification: an event, its recipients, and display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// What happened.
    pub kind: EventKind,
    /// Who should hear about it.
    pub recipients: Vec<Recipient>,
    /// Short human-readable subject line.
    pub subject: String,
    /// Human-readable body text.
    pub body: String,
}

impl Notification {
    /// Creates a new notification.
    #[must_use]
    pub const fn new(
        kind: EventKind,
        recipients: Vec<Recipient>,
        subject: String,
        body: String,
    ) -> Self {
        Self {
            kind,
            recipients,
            subject,
            body,
        }
    }
}
