// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::info;

use campus_desk_domain::{AccountStatus, User};

use crate::data_models::format_timestamp;
use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new user with the given plain-text password.
///
/// The email is stored lowercase and must be unique; the password is
/// hashed with bcrypt before storage.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user` - The user to store
/// * `password` - The plain-text password (will be hashed)
///
/// # Returns
///
/// The canonical ID assigned to the new user.
///
/// # Errors
///
/// Returns `PersistenceError::EmailAlreadyRegistered` if the email is
/// taken, or another error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    user: &User,
    password: &str,
) -> Result<i64, PersistenceError> {
    let email: String = user.email.to_lowercase();

    let existing: i64 = users::table
        .filter(users::email.eq(&email))
        .count()
        .get_result(conn)?;
    if existing > 0 {
        return Err(PersistenceError::EmailAlreadyRegistered(email));
    }

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;
    let created_at: String = format_timestamp(OffsetDateTime::now_utc())?;

    diesel::insert_into(users::table)
        .values((
            users::name.eq(&user.name),
            users::email.eq(&email),
            users::password_hash.eq(&password_hash),
            users::role.eq(user.role.as_str()),
            users::status.eq(user.status.as_str()),
            users::college_id.eq(&user.college_id),
            users::course.eq(&user.course),
            users::professor_id.eq(&user.professor_id),
            users::department.eq(&user.department),
            users::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, role = user.role.as_str(), "User created");

    Ok(user_id)
}

/// Sets the approval status of a user account.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user to update
/// * `status` - The new account status
///
/// # Errors
///
/// Returns `PersistenceError::UserNotFound` if no such user exists.
pub fn set_user_status(
    conn: &mut SqliteConnection,
    user_id: i64,
    status: AccountStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::UserNotFound(user_id));
    }

    info!(user_id, status = status.as_str(), "User status updated");
    Ok(())
}
