//! Task state transitions over an in-memory collection.
//!
//! The collection is ordered most-recent-first. Persistence is the caller's
//! job; see [`crate::Studybook`] for the guarded load -> mutate -> save cycle.

use chrono::{DateTime, Utc};

use crate::clock::{format_timestamp, parse_timestamp};
use crate::models::{NewTask, Status, Task};
use crate::priority;

/// One more than the largest id in the collection, or 1 when empty.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// Create a task at the front of the collection and return its id.
///
/// Without an explicit priority the deadline heuristic decides. Blank titles
/// are accepted.
pub fn create(tasks: &mut Vec<Task>, draft: NewTask, now: DateTime<Utc>) -> u64 {
    let id = next_id(tasks);
    let priority = draft
        .priority
        .unwrap_or_else(|| priority::predict(draft.date.as_deref(), now));

    tasks.insert(0, Task::new(id, draft, priority, now));
    id
}

/// Flip a task between pending and completed, returning its new status.
/// Unknown ids leave the collection untouched and return `None`.
pub fn toggle(tasks: &mut [Task], id: u64, now: DateTime<Utc>) -> Option<Status> {
    let task = tasks.iter_mut().find(|t| t.id == id)?;

    match task.status {
        Status::Pending => {
            task.status = Status::Completed;
            task.completed_at = Some(format_timestamp(now));
            task.time_taken_minutes = minutes_taken(task.created_at.as_deref(), now);
        }
        Status::Completed => {
            task.status = Status::Pending;
            task.completed_at = None;
            task.time_taken_minutes = None;
        }
    }

    Some(task.status)
}

/// Remove a task, keeping the order of the rest.
pub fn delete(tasks: &mut Vec<Task>, id: u64) -> Option<Task> {
    let index = tasks.iter().position(|t| t.id == id)?;
    Some(tasks.remove(index))
}

/// Whole minutes from `created_at` to `now`, truncated toward zero. A
/// creation time later than `now` gives a negative value rounded up, not
/// floored. `None` if the creation time is missing or does not parse.
pub fn minutes_taken(created_at: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    let created = created_at.and_then(parse_timestamp)?;
    Some((now - created).num_minutes())
}
