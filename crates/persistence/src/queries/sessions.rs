// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::SessionData;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    created_at: String,
    expires_at: String,
}

/// Retrieves a session by its bearer token.
///
/// Expiry is not checked here; the authentication service compares the
/// stored expiry against the current time and removes stale rows.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no such session exists.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        user_id: row.user_id,
        created_at: row.created_at,
        expires_at: row.expires_at,
    }))
}
