use chrono::{DateTime, Duration, Utc};

use crate::clock::parse_timestamp;
use crate::models::{Priority, Task};

/// Deadlines this close (or already past) are urgent.
pub const HIGH_WINDOW_HOURS: i64 = 48;
/// Deadlines inside this window but beyond the urgent one are medium.
pub const MEDIUM_WINDOW_DAYS: i64 = 7;

/// Infer a priority from a deadline.
///
/// No deadline, or one that does not parse, is `Medium`. Otherwise the
/// remaining time `deadline - now` decides: up to 48 hours (negative
/// included) is `High`, up to 7 days is `Medium`, anything later is `Low`.
/// The result is a snapshot of `now`, not a stored fact.
pub fn predict(date: Option<&str>, now: DateTime<Utc>) -> Priority {
    let Some(deadline) = date.and_then(parse_timestamp) else {
        return Priority::Medium;
    };

    let remaining = deadline - now;
    if remaining <= Duration::hours(HIGH_WINDOW_HOURS) {
        Priority::High
    } else if remaining <= Duration::days(MEDIUM_WINDOW_DAYS) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// The stored priority if the task has one, otherwise the deadline guess.
pub fn effective_priority(task: &Task, now: DateTime<Utc>) -> Priority {
    task.priority
        .unwrap_or_else(|| predict(task.date.as_deref(), now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::format_timestamp;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn predict_in(offset: Duration) -> Priority {
        let deadline = format_timestamp(now() + offset);
        predict(Some(&deadline), now())
    }

    #[test]
    fn missing_or_garbage_deadline_is_medium() {
        assert_eq!(predict(None, now()), Priority::Medium);
        assert_eq!(predict(Some(""), now()), Priority::Medium);
        assert_eq!(predict(Some("soon-ish"), now()), Priority::Medium);
    }

    #[test]
    fn urgent_band_includes_its_boundary_and_the_past() {
        assert_eq!(predict_in(Duration::hours(1)), Priority::High);
        assert_eq!(predict_in(Duration::hours(48)), Priority::High);
        assert_eq!(predict_in(Duration::days(-3)), Priority::High);
    }

    #[test]
    fn medium_band_runs_to_seven_days() {
        assert_eq!(predict_in(Duration::hours(48) + Duration::seconds(1)), Priority::Medium);
        assert_eq!(predict_in(Duration::days(7)), Priority::Medium);
    }

    #[test]
    fn beyond_a_week_is_low() {
        assert_eq!(predict_in(Duration::days(7) + Duration::seconds(1)), Priority::Low);
        assert_eq!(predict_in(Duration::days(60)), Priority::Low);
    }

    #[test]
    fn naive_deadlines_are_read_as_utc() {
        assert_eq!(predict(Some("2026-10-19T18:00"), now()), Priority::High);
        assert_eq!(predict(Some("2026-10-24"), now()), Priority::Medium);
        assert_eq!(predict(Some("2026-11-30"), now()), Priority::Low);
    }

    #[test]
    fn effective_priority_prefers_stored_value() {
        let mut task: Task =
            serde_json::from_str(r#"{"id": 1, "date": "2026-10-19T13:00:00Z"}"#).unwrap();
        assert_eq!(effective_priority(&task, now()), Priority::High);

        task.priority = Some(Priority::Low);
        assert_eq!(effective_priority(&task, now()), Priority::Low);
    }
}
