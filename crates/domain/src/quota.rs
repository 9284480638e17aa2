// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The fixed cap on student-initiated complaint creations per week.
///
/// Admin-initiated creation (the meeting-request path) never counts
/// against or checks this limit.
pub const WEEKLY_COMPLAINT_LIMIT: u32 = 10;

/// The result of evaluating a student's weekly quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaStatus {
    /// Whether the student has reached the cap.
    pub exceeded: bool,
    /// The number of complaints created inside the current week window.
    pub count: u32,
    /// The cap the count is compared against.
    pub limit: u32,
}

/// Evaluates the weekly quota for a given in-window complaint count.
///
/// The cap is reached once the count equals the limit: a student with
/// exactly [`WEEKLY_COMPLAINT_LIMIT`] complaints this week may not
/// create another.
#[must_use]
pub const fn evaluate_quota(count: u32) -> QuotaStatus {
    QuotaStatus {
        exceeded: count >= WEEKLY_COMPLAINT_LIMIT,
        count,
        limit: WEEKLY_COMPLAINT_LIMIT,
    }
}
