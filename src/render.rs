use colored::Colorize;

use crate::config::Config;
use crate::models::{Priority, Profile, Status, Task};
use crate::stats::Stats;
use crate::studybook::Dashboard;

pub struct Render {
    config: Config,
}

impl Render {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn build_prefix(&self, task: &Task) -> String {
        let id_str = task.id.to_string();
        let padding = " ".repeat(4usize.saturating_sub(id_str.len()));
        format!("{}{}", padding, format!("{}.", task.id).dimmed())
    }

    fn get_icon(&self, task: &Task) -> String {
        if task.is_completed() {
            "✔".green().to_string()
        } else {
            "☐".magenta().to_string()
        }
    }

    fn build_message(&self, task: &Task) -> String {
        let title = if task.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            task.title.clone()
        };

        if task.is_completed() {
            return title.dimmed().to_string();
        }

        match task.priority {
            Some(Priority::High) => format!("{} {}", title.red().underline(), "(!!)".red()),
            Some(Priority::Medium) => format!("{} {}", title.yellow(), "(!)".yellow()),
            _ => title,
        }
    }

    fn build_suffix(&self, task: &Task) -> String {
        let mut parts = Vec::new();

        if let Some(date) = &task.date {
            parts.push(format!("due {}", date));
        }
        if let Some(minutes) = task.time_taken_minutes {
            parts.push(format!("took {}", format_minutes(minutes)));
        }

        parts.join(" · ").dimmed().to_string()
    }

    fn display_task(&self, task: &Task) {
        println!(
            "{} {} {} {}",
            self.build_prefix(task),
            self.get_icon(task),
            self.build_message(task),
            self.build_suffix(task)
        );
        if !task.description.is_empty() {
            println!("         {}", task.description.dimmed());
        }
    }

    fn display_title(&self, title: &str, count: usize) {
        println!(
            "\n {} {}",
            title.underline(),
            format!("[{}]", count).dimmed()
        );
    }

    pub fn display_dashboard(&self, dashboard: &Dashboard) {
        println!("\n  Hi {}", dashboard.profile.name.bold());

        let (completed, pending): (Vec<&Task>, Vec<&Task>) =
            dashboard.tasks.iter().partition(|t| t.is_completed());

        self.display_title("Pending", pending.len());
        for task in &pending {
            self.display_task(task);
        }

        if self.config.display_complete_tasks {
            self.display_title("Completed", completed.len());
            for task in &completed {
                self.display_task(task);
            }
        }

        self.display_stats(&dashboard.stats);

        if !dashboard.top_searches.is_empty() {
            let terms = dashboard
                .top_searches
                .iter()
                .map(|(query, count)| format!("{} {}", query, format!("({})", count).dimmed()))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {} {}\n", "Frequent searches:".dimmed(), terms);
        }
    }

    pub fn display_stats(&self, stats: &Stats) {
        if !self.config.display_progress_overview {
            return;
        }

        if stats.total == 0 {
            println!("\n  Type `sb --help` to get started");
        }

        let percent_str = if stats.percent >= 75 {
            format!("{}%", stats.percent).green().to_string()
        } else if stats.percent >= 50 {
            format!("{}%", stats.percent).yellow().to_string()
        } else {
            format!("{}%", stats.percent)
        };

        println!(
            "\n  {}",
            format!("{} of all tasks complete.", percent_str).dimmed()
        );

        println!(
            "  {} {} {} {} {} {} {} {}",
            stats.completed.to_string().green(),
            "done".dimmed(),
            "·".dimmed(),
            stats.pending.to_string().magenta(),
            "pending".dimmed(),
            "·".dimmed(),
            stats.predicted_high.to_string().red(),
            "due within 48h".dimmed(),
        );

        let counts = &stats.priority_counts;
        let mut breakdown = format!(
            "  {} {} {} {} {} {}",
            counts.high.to_string().red(),
            "high".dimmed(),
            counts.medium.to_string().yellow(),
            "medium".dimmed(),
            counts.low.to_string().green(),
            "low".dimmed(),
        );
        if let Some(avg) = stats.average_minutes {
            breakdown.push_str(&format!(
                " {} {}",
                "· avg completion".dimmed(),
                format_minutes(avg).blue()
            ));
        }
        println!("{}\n", breakdown);
    }

    pub fn display_search_results(&self, query: &str, results: &[Task]) {
        let title = if query.trim().is_empty() {
            "All tasks".to_string()
        } else {
            format!("Results for \"{}\"", query.trim())
        };
        self.display_title(&title, results.len());

        if results.is_empty() {
            println!("  {}", "Nothing matched.".dimmed());
        }
        for task in results {
            self.display_task(task);
        }
        println!();
    }

    pub fn display_top_searches(&self, top: &[(String, u64)]) {
        self.display_title("Top searches", top.len());
        if top.is_empty() {
            println!("  {}", "No searches recorded yet.".dimmed());
        }
        for (rank, (query, count)) in top.iter().enumerate() {
            println!(
                "  {} {} {}",
                format!("{:>2}.", rank + 1).dimmed(),
                query,
                format!("×{}", count).dimmed()
            );
        }
        println!();
    }

    pub fn display_profile(&self, profile: &Profile) {
        println!("\n  {} {}", "Name:".dimmed(), profile.name.bold());
        for (label, value) in [
            ("Course:", &profile.course),
            ("Goals:", &profile.goals),
            ("Avatar:", &profile.avatar),
        ] {
            if !value.is_empty() {
                println!("  {} {}", label.dimmed(), value);
            }
        }
        println!();
    }

    pub fn display_tip(&self, tip: &str) {
        println!("\n  {} {}\n", "Tip:".cyan().bold(), tip);
    }

    pub fn success_create(&self, task: &Task) {
        let level = match task.priority {
            Some(Priority::High) => "high".red().to_string(),
            Some(Priority::Medium) => "medium".yellow().to_string(),
            Some(Priority::Low) => "low".green().to_string(),
            None => "none".dimmed().to_string(),
        };
        println!(
            "\n {} Created task: {} {}",
            "✔".green(),
            task.id.to_string().dimmed(),
            format!("(priority {})", level).dimmed()
        );
    }

    pub fn success_toggle(&self, id: u64, status: Status) {
        let verb = match status {
            Status::Completed => "Checked",
            Status::Pending => "Unchecked",
        };
        println!(
            "\n {} {} task: {}",
            "✔".green(),
            verb,
            id.to_string().dimmed()
        );
    }

    pub fn success_delete(&self, ids: &[u64]) {
        if ids.is_empty() {
            return;
        }
        let ids_str = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let word = if ids.len() > 1 { "tasks" } else { "task" };
        println!(
            "\n {} Deleted {}: {}",
            "✔".green(),
            word,
            ids_str.dimmed()
        );
    }

    pub fn success_profile(&self) {
        println!("\n {} Updated profile", "✔".green());
    }

    pub fn unknown_id(&self, id: u64) {
        eprintln!(
            "\n {} No task with id: {}",
            "ℹ".blue(),
            id.to_string().dimmed()
        );
    }
}

fn format_minutes(minutes: i64) -> String {
    if minutes.abs() < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, (minutes % 60).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_format_as_hours_past_sixty() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(59), "59m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(135), "2h 15m");
    }
}
