// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::actor::ActorContext;
use crate::error::CoreError;
use campus_desk_domain::{Complaint, ComplaintStatus, Role, professor_can_access};

/// Returns whether the actor may see and act on a complaint.
///
/// Admins see everything. A student sees their own complaints. A
/// professor sees complaints assigned to them plus complaints whose
/// course matches their department.
#[must_use]
pub fn can_access(actor: &ActorContext, complaint: &Complaint) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Student => complaint.student.id == actor.user_id,
        Role::Professor => {
            professor_can_access(actor.user_id, actor.department.as_deref(), complaint)
        }
    }
}

/// Checks that the actor may create a complaint.
///
/// Students file for themselves, admins file on behalf of a student;
/// professors may not create complaints at all.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor is a professor.
pub fn authorize_create(actor: &ActorContext) -> Result<(), CoreError> {
    if actor.is_professor() {
        return Err(CoreError::Forbidden {
            action: "create complaint",
            reason: String::from("professors cannot file complaints"),
        });
    }
    Ok(())
}

/// Checks that the actor may set a complaint to the given status.
///
/// Visibility is checked separately by [`can_access`]; this enforces
/// the value-level rule that `rejected` is reserved to admins.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if a non-admin attempts to set the
/// status to `rejected`.
pub fn authorize_status_value(
    actor: &ActorContext,
    new_status: ComplaintStatus,
) -> Result<(), CoreError> {
    if new_status == ComplaintStatus::Rejected && !actor.is_admin() {
        return Err(CoreError::Forbidden {
            action: "update complaint status",
            reason: String::from("only admins can reject complaints"),
        });
    }
    Ok(())
}

/// Checks that the actor may assign a complaint to a professor.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor is not an admin.
pub fn authorize_assign(actor: &ActorContext) -> Result<(), CoreError> {
    if !actor.is_admin() {
        return Err(CoreError::Forbidden {
            action: "assign complaint",
            reason: String::from("only admins can assign complaints"),
        });
    }
    Ok(())
}
