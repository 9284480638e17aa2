// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication.

use time::{Duration, OffsetDateTime};

use campus_desk_domain::{AccountStatus, User};
use campus_desk_persistence::{
    SessionData, SqlitePersistence, format_session_timestamp, parse_session_timestamp,
};

use crate::error::AuthError;

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by email and password and creates a session.
    ///
    /// Login failures for unknown emails and wrong passwords are
    /// deliberately indistinguishable. An account awaiting approval is
    /// reported as such only after the password has been verified.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The account email
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `user`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the account may
    /// not authenticate.
    pub fn login(
        persistence: &mut SqlitePersistence,
        email: &str,
        password: &str,
    ) -> Result<(String, User), AuthError> {
        let credentials: Option<(User, String)> = persistence
            .get_credentials_by_email(email)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?;

        let Some((user, password_hash)) = credentials else {
            return Err(Self::invalid_credentials());
        };

        let verified: bool = bcrypt::verify(password, &password_hash).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Password verification error: {e}"),
            }
        })?;
        if !verified {
            return Err(Self::invalid_credentials());
        }

        if !user.can_authenticate() {
            return Err(match user.status {
                AccountStatus::Pending => AuthError::PendingApproval,
                _ => AuthError::AuthenticationFailed {
                    reason: String::from("Account registration was rejected"),
                },
            });
        }

        let Some(user_id) = user.user_id else {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account has no canonical ID"),
            });
        };

        let session_token: String = Self::generate_session_token();
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let expires_at: OffsetDateTime = now + Self::DEFAULT_SESSION_EXPIRATION;

        let created_at_str: String =
            format_session_timestamp(now).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format session timestamp: {e}"),
            })?;
        let expires_at_str: String =
            format_session_timestamp(expires_at).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format session timestamp: {e}"),
            })?;

        persistence
            .create_session(user_id, &session_token, &created_at_str, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        Ok((session_token, user))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// Expired sessions are removed as they are discovered. An account
    /// whose approval was revoked after login is refused even with a
    /// live session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<User, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = parse_session_timestamp(&session.expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            // Best effort: a failed delete just leaves the row for the
            // next validation attempt to clean up.
            let _ = persistence.delete_session(session_token);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: User = persistence
            .get_user_by_id(session.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        if !user.can_authenticate() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is no longer approved"),
            });
        }

        Ok(user)
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque session token from random material.
    fn generate_session_token() -> String {
        let high: u64 = rand::random();
        let low: u64 = rand::random();
        format!("session_{high:016x}{low:016x}")
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        }
    }
}
