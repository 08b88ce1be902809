mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::fs::File;
use std::sync::MutexGuard;

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StudybookError};

/// Named document slots. Each slot holds exactly one JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Tasks,
    Searches,
    Profile,
}

impl Slot {
    pub fn file_name(self) -> &'static str {
        match self {
            Slot::Tasks => "tasks.json",
            Slot::Searches => "searches.json",
            Slot::Profile => "profile.json",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Tasks => "tasks",
            Slot::Searches => "searches",
            Slot::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// Exclusive write access to a backend. Released on drop.
pub enum WriteLock<'a> {
    File(File),
    Memory(MutexGuard<'a, ()>),
}

impl Drop for WriteLock<'_> {
    fn drop(&mut self) {
        if let WriteLock::File(file) = self {
            if let Err(err) = FileExt::unlock(&*file) {
                tracing::warn!("failed to release data directory lock: {err}");
            }
        }
    }
}

/// Trait abstracting where documents live (data directory, memory, ...).
///
/// Backends move raw text only; (de)serialization happens in [`load`] and
/// [`save`] so every backend shares the same corruption handling.
pub trait StorageBackend: Send + Sync {
    /// Raw document contents, or `None` if the slot was never written.
    fn read(&self, slot: Slot) -> Result<Option<String>>;

    /// Replace the whole document. Readers never observe a partial write.
    fn write(&self, slot: Slot, contents: &str) -> Result<()>;

    /// Take the single-writer lock guarding a load -> mutate -> save cycle.
    fn lock(&self) -> Result<WriteLock<'_>>;
}

/// Load and decode a document.
///
/// A missing document is `Ok(None)`; one that fails to decode is
/// [`StudybookError::CorruptDocument`], leaving the fallback decision to the
/// caller.
pub fn load<T: DeserializeOwned>(backend: &dyn StorageBackend, slot: Slot) -> Result<Option<T>> {
    let Some(raw) = backend.read(slot)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StudybookError::CorruptDocument { slot, source })
}

/// Load a document, substituting `T::default()` when it is missing or corrupt.
pub fn load_or_default<T>(backend: &dyn StorageBackend, slot: Slot) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match load(backend, slot) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => {
            tracing::debug!(%slot, "document missing, using default");
            Ok(T::default())
        }
        Err(StudybookError::CorruptDocument { slot, source }) => {
            tracing::warn!(%slot, error = %source, "corrupt document, using default");
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}

/// Encode and overwrite a document.
pub fn save<T: Serialize + ?Sized>(backend: &dyn StorageBackend, slot: Slot, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    backend.write(slot, &json)?;
    tracing::debug!(%slot, bytes = json.len(), "document saved");
    Ok(())
}
