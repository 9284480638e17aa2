// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data transfer structs and storage conversions shared across the
//! persistence layer.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// A session row as stored, with timestamps still in their stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// The session row ID.
    pub session_id: i64,
    /// The opaque bearer token.
    pub session_token: String,
    /// The user the session belongs to.
    pub user_id: i64,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Expiry timestamp, RFC 3339.
    pub expires_at: String,
}

/// Converts a timestamp to epoch milliseconds for storage.
///
/// Complaint and reply timestamps are stored as integers so window
/// filters compare numerically.
///
/// # Errors
///
/// Returns an error if the timestamp does not fit in an `i64` of
/// milliseconds.
pub(crate) fn to_epoch_millis(ts: OffsetDateTime) -> Result<i64, PersistenceError> {
    i64::try_from(ts.unix_timestamp_nanos() / 1_000_000).map_err(|_| {
        PersistenceError::SerializationError(String::from(
            "timestamp out of range for millisecond storage",
        ))
    })
}

/// Converts stored epoch milliseconds back to a timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRecord` if the stored value is out
/// of range.
pub(crate) fn from_epoch_millis(ms: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .map_err(|err| PersistenceError::CorruptRecord(format!("bad stored timestamp {ms}: {err}")))
}

/// Formats a timestamp as RFC 3339 for text-column storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub(crate) fn format_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.format(&Rfc3339)
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

/// Parses an RFC 3339 text-column timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRecord` if the stored text does
/// not parse.
pub(crate) fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339)
        .map_err(|err| PersistenceError::CorruptRecord(format!("bad stored timestamp: {err}")))
}
