use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Priority, Task};
use crate::priority::{effective_priority, predict};

/// Tally of tasks per priority. All three levels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    pub fn sum(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Dashboard statistics, derived fresh from the task collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Open tasks whose deadline is urgent right now, whatever their stored
    /// priority says.
    pub predicted_high: usize,
    /// Stored priority, or the deadline guess for tasks without one.
    pub priority_counts: PriorityCounts,
    pub percent: u32,
    pub average_minutes: Option<i64>,
}

impl Stats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total = tasks.len();
        let mut completed = 0;
        let mut predicted_high = 0;
        let mut priority_counts = PriorityCounts::default();
        let mut timed = Vec::new();

        for task in tasks {
            if task.is_completed() {
                completed += 1;
                if let Some(minutes) = task.time_taken_minutes {
                    timed.push(minutes);
                }
            } else if predict(task.date.as_deref(), now) == Priority::High {
                predicted_high += 1;
            }

            priority_counts.bump(effective_priority(task, now));
        }

        let percent = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u32
        };

        let average_minutes = if timed.is_empty() {
            None
        } else {
            Some(timed.iter().sum::<i64>() / timed.len() as i64)
        };

        Self {
            total,
            completed,
            pending: total - completed,
            predicted_high,
            priority_counts,
            percent,
            average_minutes,
        }
    }
}
