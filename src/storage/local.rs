use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use uuid::Uuid;

use crate::error::{Result, StudybookError};

use super::{Slot, StorageBackend, WriteLock};

const LOCK_FILE_NAME: &str = ".lock";

/// Local file-based storage with atomic writes
pub struct LocalStorage {
    main_app_dir: PathBuf,
    temp_dir: PathBuf,
    lock_file: PathBuf,
}

impl LocalStorage {
    pub fn new(studybook_dir: &Path) -> Result<Self> {
        let main_app_dir = studybook_dir.to_path_buf();
        let temp_dir = main_app_dir.join(".temp");
        let lock_file = main_app_dir.join(LOCK_FILE_NAME);

        let storage = Self {
            main_app_dir,
            temp_dir,
            lock_file,
        };

        storage.ensure_directories()?;

        Ok(storage)
    }

    pub fn directory(&self) -> &Path {
        &self.main_app_dir
    }

    fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.temp_dir)?;
        Ok(())
    }

    /// Leftovers from an interrupted write are never renamed into place.
    /// Only safe while holding the lock.
    fn clean_temp_dir(&self) -> Result<()> {
        for entry in fs::read_dir(&self.temp_dir)? {
            let entry = entry?;
            fs::remove_file(entry.path())?;
        }
        Ok(())
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.main_app_dir.join(slot.file_name())
    }

    fn get_temp_file(&self, slot: Slot) -> PathBuf {
        let random_string = Uuid::new_v4().simple().to_string()[..8].to_string();
        let temp_filename = slot
            .file_name()
            .replace(".json", &format!(".TEMP-{}.json", random_string));
        self.temp_dir.join(temp_filename)
    }
}

impl StorageBackend for LocalStorage {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    fn write(&self, slot: Slot, contents: &str) -> Result<()> {
        let temp_file = self.get_temp_file(slot);

        fs::write(&temp_file, contents)?;
        fs::rename(&temp_file, self.slot_path(slot))?;

        Ok(())
    }

    fn lock(&self) -> Result<WriteLock<'_>> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_file)?;

        FileExt::lock_exclusive(&file).map_err(|e| {
            StudybookError::Lock(format!("{}: {e}", self.lock_file.display()))
        })?;
        let lock = WriteLock::File(file);

        self.clean_temp_dir()?;

        Ok(lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join(".studybook");

        let storage = LocalStorage::new(&dir).unwrap();
        assert!(storage.directory().is_dir());
        assert!(dir.join(".temp").is_dir());
    }

    #[test]
    fn concurrent_opens_of_a_fresh_directory_succeed() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".studybook");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dir = dir.clone();
                std::thread::spawn(move || LocalStorage::new(&dir).map(|_| ()))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert!(dir.join(".temp").is_dir());
    }

    #[test]
    fn unwritten_slot_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path()).unwrap();
        assert!(storage.read(Slot::Tasks).unwrap().is_none());
    }

    #[test]
    fn write_replaces_the_slot_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path()).unwrap();

        storage.write(Slot::Profile, "{\"name\": \"Ada\"}").unwrap();
        storage.write(Slot::Profile, "{\"name\": \"Grace\"}").unwrap();

        let on_disk = fs::read_to_string(tmp.path().join("profile.json")).unwrap();
        assert_eq!(on_disk, "{\"name\": \"Grace\"}");
        assert_eq!(fs::read_dir(tmp.path().join(".temp")).unwrap().count(), 0);
    }

    #[test]
    fn stale_temp_files_are_cleaned_when_locking() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path()).unwrap();
        fs::write(tmp.path().join(".temp").join("tasks.TEMP-dead.json"), "[").unwrap();

        let _lock = storage.lock().unwrap();
        assert_eq!(fs::read_dir(tmp.path().join(".temp")).unwrap().count(), 0);
    }

    #[test]
    fn lock_can_be_retaken_after_release() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path()).unwrap();

        drop(storage.lock().unwrap());
        let _again = storage.lock().unwrap();
        assert!(tmp.path().join(LOCK_FILE_NAME).exists());
    }
}
