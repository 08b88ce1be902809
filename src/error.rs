use thiserror::Error;

use crate::storage::Slot;

#[derive(Error, Debug)]
pub enum StudybookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt {slot} document: {source}")]
    CorruptDocument {
        slot: Slot,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to lock the data directory: {0}")]
    Lock(String),

    #[error("Invalid task ID: {0}")]
    InvalidId(String),

    #[error("No task ID was given as input")]
    MissingId,

    #[error("Invalid priority level: {0} (expected high, medium or low)")]
    InvalidPriority(String),

    #[error("Invalid profile field: {0} (expected name, course, goals or avatar)")]
    InvalidProfileField(String),

    #[error("Invalid custom directory: {0}")]
    InvalidDirectory(String),

    #[error("Missing studybook-dir flag value")]
    MissingStudybookDirValue,

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, StudybookError>;
