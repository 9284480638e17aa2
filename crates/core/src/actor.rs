// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_desk_domain::{Role, User};

/// The authenticated user on whose behalf a lifecycle operation runs.
///
/// A snapshot of the fields the engine dispatches on, detached from the
/// persistence layer so the engine stays pure. Built by the API layer
/// from the session's user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    /// The canonical user ID.
    pub user_id: i64,
    /// The user's full name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// Professor attribute: the department, if the actor is a professor.
    pub department: Option<String>,
    /// Student attribute: the enrolled course, if the actor is a student.
    pub course: Option<String>,
}

impl ActorContext {
    /// Creates an actor context from explicit fields.
    #[must_use]
    pub const fn new(
        user_id: i64,
        name: String,
        email: String,
        role: Role,
        department: Option<String>,
        course: Option<String>,
    ) -> Self {
        Self {
            user_id,
            name,
            email,
            role,
            department,
            course,
        }
    }

    /// Creates an actor context from a persisted user record.
    ///
    /// Returns `None` if the record has never been persisted and so has
    /// no canonical ID.
    #[must_use]
    pub fn from_user(user: &User) -> Option<Self> {
        let user_id: i64 = user.user_id?;
        Some(Self {
            user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            department: user.department.clone(),
            course: user.course.clone(),
        })
    }

    /// Returns whether the actor is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns whether the actor is a professor.
    #[must_use]
    pub fn is_professor(&self) -> bool {
        self.role == Role::Professor
    }

    /// Returns whether the actor is a student.
    #[must_use]
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

/// A professor referenced by a lifecycle operation.
///
/// Carries only the fields the engine writes onto the complaint; the
/// caller is responsible for having verified the referenced user is an
/// approved professor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorRef {
    /// The professor's canonical user ID.
    pub user_id: i64,
    /// The professor's full name.
    pub name: String,
}

impl ProfessorRef {
    /// Creates a professor reference.
    #[must_use]
    pub const fn new(user_id: i64, name: String) -> Self {
        Self { user_id, name }
    }
}
