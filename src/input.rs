//! Parsing of the free-form words that follow an action flag.

use crate::error::{Result, StudybookError};
use crate::models::{NewTask, Priority, ProfileField};

/// Parse CLI input words into a new task.
///
/// Words of the form `due:<date>` set the deadline and `p:<level>` sets an
/// explicit priority (`high|medium|low`, `h|m|l` or `3|2|1`). Everything else
/// is the title. The description comes from its own flag.
pub fn parse_task_input(input: &[String], description: Option<String>) -> Result<NewTask> {
    let mut title = Vec::new();
    let mut date = None;
    let mut priority = None;

    for word in input {
        if let Some(raw) = word.strip_prefix("due:") {
            date = Some(raw.to_string());
        } else if let Some(level) = word.strip_prefix("p:") {
            let parsed = Priority::from_level(level)
                .ok_or_else(|| StudybookError::InvalidPriority(level.to_string()))?;
            priority = Some(parsed);
        } else {
            title.push(word.as_str());
        }
    }

    Ok(NewTask {
        title: title.join(" "),
        description: description.unwrap_or_default(),
        date,
        priority,
    })
}

/// Parse task ids, rejecting anything that is not a positive integer.
pub fn parse_ids(input: &[String]) -> Result<Vec<u64>> {
    if input.is_empty() {
        return Err(StudybookError::MissingId);
    }

    let mut ids = Vec::with_capacity(input.len());
    for word in input {
        let id = word
            .trim()
            .parse::<u64>()
            .map_err(|_| StudybookError::InvalidId(word.clone()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Parse `field=value` pairs for a profile update.
pub fn parse_profile_changes(input: &[String]) -> Result<Vec<(ProfileField, String)>> {
    input
        .iter()
        .map(|word| -> Result<(ProfileField, String)> {
            let (field, value) = word
                .split_once('=')
                .ok_or_else(|| StudybookError::InvalidProfileField(word.clone()))?;
            Ok((field.parse::<ProfileField>()?, value.trim().to_string()))
        })
        .collect()
}
