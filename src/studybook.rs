use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::directory::resolve_studybook_directory;
use crate::error::Result;
use crate::lifecycle;
use crate::models::{NewTask, Profile, ProfileField, Status, Task};
use crate::search::{self, SearchCounters};
use crate::stats::Stats;
use crate::storage::{self, LocalStorage, Slot, StorageBackend};

/// Everything the dashboard shows, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub profile: Profile,
    pub tasks: Vec<Task>,
    pub stats: Stats,
    pub top_searches: Vec<(String, u64)>,
}

/// Entry point for every operation on the study book.
///
/// Mutations run as load -> mutate -> save over a whole document while
/// holding the backend's write lock, so two writers cannot interleave.
/// Reads take no lock; writes are atomic renames.
pub struct Studybook {
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl Studybook {
    pub fn new(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Open the on-disk study book, resolving the data directory from the
    /// flag, environment and config file.
    pub fn open(studybook_dir: Option<&Path>) -> Result<Self> {
        let resolved_dir = resolve_studybook_directory(studybook_dir)?;
        tracing::debug!(dir = %resolved_dir.display(), "opening studybook");
        let storage = LocalStorage::new(&resolved_dir)?;
        Ok(Self::new(Box::new(storage), Box::new(SystemClock)))
    }

    fn read<T: DeserializeOwned + Default>(&self, slot: Slot) -> Result<T> {
        storage::load_or_default(self.storage.as_ref(), slot)
    }

    fn mutate<T, R>(&self, slot: Slot, apply: impl FnOnce(&mut T) -> R) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let _lock = self.storage.lock()?;
        let mut document: T = self.read(slot)?;
        let outcome = apply(&mut document);
        storage::save(self.storage.as_ref(), slot, &document)?;
        Ok(outcome)
    }

    pub fn tasks(&self) -> Result<Vec<Task>> {
        self.read(Slot::Tasks)
    }

    pub fn create_task(&self, draft: NewTask) -> Result<Task> {
        let now = self.clock.now();
        let task = self.mutate(Slot::Tasks, |tasks: &mut Vec<Task>| {
            lifecycle::create(tasks, draft, now);
            tasks[0].clone()
        })?;

        tracing::info!(id = task.id, priority = ?task.priority, "task created");
        Ok(task)
    }

    /// Returns the task's new status, or `None` if no task has that id.
    pub fn toggle_task(&self, id: u64) -> Result<Option<Status>> {
        let now = self.clock.now();
        let status = self.mutate(Slot::Tasks, |tasks: &mut Vec<Task>| {
            lifecycle::toggle(tasks, id, now)
        })?;

        match status {
            Some(status) => tracing::info!(id, ?status, "task toggled"),
            None => tracing::debug!(id, "toggle ignored, no such task"),
        }
        Ok(status)
    }

    /// Returns whether a task was removed.
    pub fn delete_task(&self, id: u64) -> Result<bool> {
        let removed = self.mutate(Slot::Tasks, |tasks: &mut Vec<Task>| {
            lifecycle::delete(tasks, id).is_some()
        })?;

        if removed {
            tracing::info!(id, "task deleted");
        } else {
            tracing::debug!(id, "delete ignored, no such task");
        }
        Ok(removed)
    }

    /// Count a query. Blank queries are not recorded and nothing is written.
    pub fn record_search(&self, query: &str) -> Result<Option<String>> {
        if search::normalize(query).is_empty() {
            return Ok(None);
        }

        self.mutate(Slot::Searches, |counters: &mut SearchCounters| {
            counters.record(query)
        })
    }

    /// Record the query, then return matching tasks in display order.
    pub fn search(&self, query: &str) -> Result<Vec<Task>> {
        self.record_search(query)?;

        let tasks = self.tasks()?;
        let results: Vec<Task> = search::matching(&tasks, query)
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(query = %search::normalize(query), hits = results.len(), "search");
        Ok(results)
    }

    pub fn search_counters(&self) -> Result<SearchCounters> {
        self.read(Slot::Searches)
    }

    pub fn top_searches(&self, n: usize) -> Result<Vec<(String, u64)>> {
        Ok(self.search_counters()?.top(n))
    }

    pub fn stats(&self) -> Result<Stats> {
        let tasks = self.tasks()?;
        Ok(Stats::compute(&tasks, self.clock.now()))
    }

    pub fn dashboard(&self, top_n: usize) -> Result<Dashboard> {
        let tasks = self.tasks()?;
        let stats = Stats::compute(&tasks, self.clock.now());

        Ok(Dashboard {
            profile: self.profile()?,
            tasks,
            stats,
            top_searches: self.top_searches(top_n)?,
        })
    }

    pub fn profile(&self) -> Result<Profile> {
        self.read(Slot::Profile)
    }

    pub fn update_profile(&self, changes: Vec<(ProfileField, String)>) -> Result<Profile> {
        self.mutate(Slot::Profile, |profile: &mut Profile| {
            for (field, value) in changes {
                profile.set(field, value);
            }
            profile.clone()
        })
    }
}
