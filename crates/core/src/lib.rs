// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The complaint lifecycle engine.
//!
//! Every state change to a complaint flows through the pure functions
//! in this crate: creation, reply append, status change, assignment.
//! The engine validates role and visibility invariants, produces the
//! mutation data the persistence layer applies atomically, and emits
//! the notification events the dispatcher delivers. It performs no I/O
//! itself; directory context (the acting user, the auto-assignment
//! candidate, the in-window complaint count) is passed in by callers.

mod actor;
mod authorize;
mod engine;
mod error;

#[cfg(test)]
mod tests;

pub use actor::{ActorContext, ProfessorRef};
pub use authorize::{authorize_assign, authorize_create, authorize_status_value, can_access};
pub use engine::{
    AdminClaim, AssignOutcome, CreateComplaintIntent, CreationResult, ReplyOutcome, SolvedBy,
    StatusOutcome, add_reply, assign_professor, create_complaint, update_status,
};
pub use error::CoreError;
