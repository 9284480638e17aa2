// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory queries.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use campus_desk_domain::{AccountStatus, Role, User};

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub college_id: Option<String>,
    pub course: Option<String>,
    pub professor_id: Option<String>,
    pub department: Option<String>,
}

impl UserRow {
    /// Converts a stored row into the domain user.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if the stored role or
    /// status string is not a known value.
    pub(crate) fn into_user(self) -> Result<User, PersistenceError> {
        Ok(User {
            user_id: Some(self.user_id),
            name: self.name,
            email: self.email,
            role: Role::from_str(&self.role)?,
            status: AccountStatus::from_str(&self.status)?,
            college_id: self.college_id,
            course: self.course,
            professor_id: self.professor_id,
            department: self.department,
        })
    }
}

/// Retrieves a user by canonical ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored record is corrupt.
/// Returns `Ok(None)` if no such user exists.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserRow::into_user).transpose()
}

/// Retrieves a user by email address.
///
/// Emails are stored lowercase; the lookup normalizes its argument.
///
/// # Errors
///
/// Returns an error if the query fails or the stored record is corrupt.
/// Returns `Ok(None)` if no such user exists.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, PersistenceError> {
    let normalized: String = email.to_lowercase();
    debug!("Looking up user by email: {}", normalized);

    let row: Option<UserRow> = users::table
        .filter(users::email.eq(&normalized))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserRow::into_user).transpose()
}

/// Retrieves a user together with their stored password hash.
///
/// Used by the login path; everything else works with the hash-free
/// domain user.
///
/// # Errors
///
/// Returns an error if the query fails or the stored record is corrupt.
/// Returns `Ok(None)` if no such user exists.
pub fn get_credentials_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<(User, String)>, PersistenceError> {
    let normalized: String = email.to_lowercase();

    let row: Option<UserRow> = users::table
        .filter(users::email.eq(&normalized))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => {
            let hash: String = row.password_hash.clone();
            Ok(Some((row.into_user()?, hash)))
        }
        None => Ok(None),
    }
}

/// Lists all users, in ascending ID order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// Lists users awaiting approval, in ascending ID order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
pub fn list_pending_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::status.eq(AccountStatus::Pending.as_str()))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// Lists approved users of a role, in ascending ID order.
///
/// Used by the notification dispatcher to resolve group recipients.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
pub fn list_approved_by_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(role.as_str()))
        .filter(users::status.eq(AccountStatus::Approved.as_str()))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// Finds the auto-assignment candidate for a new complaint.
///
/// The candidate is the first approved professor, in ascending ID
/// order, whose department or recorded course matches the complaint's
/// course. Ascending ID order makes the pick deterministic when several
/// professors match.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no professor matches.
pub fn find_auto_assign_candidate(
    conn: &mut SqliteConnection,
    course: &str,
) -> Result<Option<(i64, String)>, PersistenceError> {
    let row: Option<(i64, String)> = users::table
        .filter(users::role.eq(Role::Professor.as_str()))
        .filter(users::status.eq(AccountStatus::Approved.as_str()))
        .filter(
            users::department
                .eq(course.to_owned())
                .or(users::course.eq(course.to_owned())),
        )
        .order(users::user_id.asc())
        .select((users::user_id, users::name))
        .first(conn)
        .optional()?;

    Ok(row)
}
