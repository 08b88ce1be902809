pub mod clock;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod priority;
pub mod render;
pub mod search;
pub mod stats;
pub mod storage;
pub mod studybook;
pub mod tips;

pub use error::{Result, StudybookError};
pub use studybook::{Dashboard, Studybook};
