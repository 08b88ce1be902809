mod profile;
mod task;

pub use profile::{Profile, ProfileField};
pub use task::{NewTask, Priority, Status, Task};
