use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;

use super::{Slot, StorageBackend, WriteLock};

/// In-process storage. Nothing survives the value being dropped.
#[derive(Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<Slot, String>>,
    writer: Mutex<()>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        let documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(documents.get(&slot).cloned())
    }

    fn write(&self, slot: Slot, contents: &str) -> Result<()> {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        documents.insert(slot, contents.to_string());
        Ok(())
    }

    fn lock(&self) -> Result<WriteLock<'_>> {
        let guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        Ok(WriteLock::Memory(guard))
    }
}
