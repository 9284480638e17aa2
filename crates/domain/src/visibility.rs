// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Complaint;

/// The department visibility rule.
///
/// A complaint is visible to a professor if they are the assigned
/// professor OR their department equals the complaint's course. This
/// single predicate governs both read-list filtering and the write
/// permissions of the lifecycle engine; the persistence layer's list
/// query mirrors it and is pinned to it by test.
#[must_use]
pub fn professor_can_access(
    professor_id: i64,
    professor_department: Option<&str>,
    complaint: &Complaint,
) -> bool {
    if complaint.assigned_professor_id == Some(professor_id) {
        return true;
    }
    professor_department.is_some_and(|department| department == complaint.course)
}
