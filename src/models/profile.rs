use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StudybookError;

/// The user's profile record. Opaque to the rest of the system apart from
/// the greeting on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub course: String,

    #[serde(default)]
    pub goals: String,

    #[serde(default)]
    pub avatar: String,
}

fn default_name() -> String {
    "Student".to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_name(),
            course: String::new(),
            goals: String::new(),
            avatar: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Course,
    Goals,
    Avatar,
}

impl FromStr for ProfileField {
    type Err = StudybookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(ProfileField::Name),
            "course" => Ok(ProfileField::Course),
            "goals" | "goal" => Ok(ProfileField::Goals),
            "avatar" => Ok(ProfileField::Avatar),
            other => Err(StudybookError::InvalidProfileField(other.to_string())),
        }
    }
}

impl Profile {
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Course => self.course = value,
            ProfileField::Goals => self.goals = value,
            ProfileField::Avatar => self.avatar = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"course": "Physics"}"#).unwrap();
        assert_eq!(profile.name, "Student");
        assert_eq!(profile.course, "Physics");
        assert!(profile.goals.is_empty());
    }

    #[test]
    fn field_names_are_case_insensitive() {
        assert_eq!("Name".parse::<ProfileField>().unwrap(), ProfileField::Name);
        assert_eq!("goal".parse::<ProfileField>().unwrap(), ProfileField::Goals);
        assert!("email".parse::<ProfileField>().is_err());
    }

    #[test]
    fn set_updates_only_the_named_field() {
        let mut profile = Profile::default();
        profile.set(ProfileField::Goals, "Finish thesis".to_string());
        assert_eq!(profile.goals, "Finish thesis");
        assert_eq!(profile.name, "Student");
    }
}
