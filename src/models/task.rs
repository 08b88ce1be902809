use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::clock::format_timestamp;

/// Priority level of a task, either chosen by the user or inferred from its
/// deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a user-supplied level: `high|medium|low`, `h|m|l` or `3|2|1`.
    pub fn from_level(level: &str) -> Option<Self> {
        match level.trim().to_lowercase().as_str() {
            "high" | "h" | "3" => Some(Priority::High),
            "medium" | "m" | "2" => Some(Priority::Medium),
            "low" | "l" | "1" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    pub fn is_completed(self) -> bool {
        self == Status::Completed
    }
}

/// Anything other than `completed` (any case) reads as pending.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let completed = raw
            .as_str()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("completed"));
        Ok(if completed {
            Status::Completed
        } else {
            Status::Pending
        })
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub priority: Option<Priority>,
}

/// A study task as stored in the tasks document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Deadline, kept verbatim even when it does not parse.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub completed_at: Option<String>,

    #[serde(default)]
    pub time_taken_minutes: Option<i64>,
}

impl Task {
    /// Creates a pending task. Title and description are trimmed; an empty or
    /// blank deadline is dropped.
    pub fn new(id: u64, draft: NewTask, priority: Priority, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            date: normalize_date(draft.date),
            priority: Some(priority),
            status: Status::Pending,
            created_at: Some(format_timestamp(created_at)),
            completed_at: None,
            time_taken_minutes: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// The text a search query is matched against.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

pub(crate) fn normalize_date(date: Option<String>) -> Option<String> {
    date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

/// Ids that are missing or not a non-negative integer read as 0.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let id = match &raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id.unwrap_or(0))
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(normalize_date(raw.as_str().map(String::from)))
}

fn deserialize_priority<'de, D>(deserializer: D) -> std::result::Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let level = match &raw {
        Value::String(s) => Priority::from_level(s),
        Value::Number(n) => Priority::from_level(&n.to_string()),
        _ => None,
    };
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    #[test]
    fn new_task_starts_pending_without_timing() {
        let draft = NewTask {
            title: "  Math HW ".to_string(),
            description: " chapter 3\n".to_string(),
            date: Some("   ".to_string()),
            priority: None,
        };
        let task = Task::new(7, draft, Priority::Low, created());

        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Math HW");
        assert_eq!(task.description, "chapter 3");
        assert_eq!(task.date, None);
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.created_at.as_deref(), Some("2026-10-19T09:00:00.000000Z"));
        assert!(task.completed_at.is_none());
        assert!(task.time_taken_minutes.is_none());
    }

    #[test]
    fn reads_documents_written_by_older_versions() {
        let json = r#"{
            "id": 3,
            "title": "Essay",
            "description": "",
            "date": "",
            "priority": "high",
            "status": "Completed",
            "created_at": "2026-10-01T10:00:00.123456",
            "completed_at": "2026-10-01T11:00:00",
            "time_taken_minutes": 60
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.date, None);
        assert_eq!(task.priority, Some(Priority::High));
        assert!(task.is_completed());
        assert_eq!(task.time_taken_minutes, Some(60));
    }

    #[test]
    fn unknown_priority_reads_as_absent() {
        let task: Task = serde_json::from_str(r#"{"id": 1, "priority": "Urgent"}"#).unwrap();
        assert_eq!(task.priority, None);
        assert_eq!(task.status, Status::Pending);
    }

    #[test]
    fn odd_status_and_id_do_not_fail_the_record() {
        let json = r#"[
            {"id": 1, "title": "Keep me", "status": "Pending"},
            {"id": 2, "title": "Lowercase", "status": "completed"},
            {"id": 3, "title": "Odd", "status": "archived"},
            {"title": "No id", "status": null, "priority": 3}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].status, Status::Pending);
        assert_eq!(tasks[1].status, Status::Completed);
        assert_eq!(tasks[2].status, Status::Pending);
        assert_eq!(tasks[3].id, 0);
        assert_eq!(tasks[3].status, Status::Pending);
        assert_eq!(tasks[3].priority, Some(Priority::High));
    }

    #[test]
    fn status_is_written_capitalized() {
        let json = serde_json::to_string(&Status::Completed).unwrap();
        assert_eq!(json, "\"Completed\"");
    }

    #[test]
    fn priority_levels_accept_aliases() {
        assert_eq!(Priority::from_level("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_level("m"), Some(Priority::Medium));
        assert_eq!(Priority::from_level("1"), Some(Priority::Low));
        assert_eq!(Priority::from_level("urgent"), None);
    }

    #[test]
    fn haystack_joins_title_and_description() {
        let draft = NewTask {
            title: "Math HW".to_string(),
            description: "Chapter 3".to_string(),
            ..NewTask::default()
        };
        let task = Task::new(1, draft, Priority::Medium, created());
        assert_eq!(task.haystack(), "math hw chapter 3");
    }
}
