// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user the session belongs to
/// * `token` - The opaque bearer token
/// * `created_at` - Creation timestamp, RFC 3339
/// * `expires_at` - Expiry timestamp, RFC 3339
///
/// # Returns
///
/// The session row ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    user_id: i64,
    token: &str,
    created_at: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(token),
            sessions::user_id.eq(user_id),
            sessions::created_at.eq(created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;

    info!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Deletes a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The bearer token to delete
///
/// # Returns
///
/// Whether a session was actually deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(token))
        .execute(conn)?;

    debug!(deleted, "Session delete");
    Ok(deleted > 0)
}
