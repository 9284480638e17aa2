// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Campus Desk complaint portal.
//!
//! Handlers in this crate sit between the HTTP server and the lifecycle
//! engine: they authenticate the caller, translate request DTOs into
//! engine inputs, apply the resulting mutations through the persistence
//! layer, dispatch notifications, and translate every lower-layer error
//! into the API error contract. Domain and core errors never leak
//! through unmapped.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthenticationService;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    add_reply, approve_user, assign_complaint, create_complaint, get_complaint, get_quota_status,
    get_weekly_count, list_complaints, list_pending_users, list_student_complaints, list_users,
    login, logout,
    register_professor, register_student, reject_user, update_status, whoami,
};
pub use request_response::{
    AddReplyRequest, AssignComplaintRequest, ComplaintInfo, ComplaintResponse,
    CreateComplaintRequest, ListComplaintsResponse, ListUsersResponse, LoginRequest, LoginResponse,
    QuotaStatusResponse, RegisterProfessorRequest, RegisterResponse, RegisterStudentRequest,
    ReplyInfo, UpdateStatusRequest, UserInfo, UserStatusResponse, WeeklyCountResponse,
    WhoAmIResponse,
};
