use std::path::{Path, PathBuf};

use crate::error::{DayGridError, DayGridResult};

use super::KeyValueStore;

const EXTENSION: &str = "json";

/// One file per key under a data directory: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> DayGridResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(DayGridError::Storage(format!("Invalid storage key '{key}'")));
        }

        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> DayGridResult<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> DayGridResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = path.with_extension(format!("{EXTENSION}.tmp"));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DayGridResult<()> {
        let path = self.path_for(key)?;

        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn clear(&self) -> DayGridResult<()> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Ok(());
        };

        let files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == EXTENSION))
            .collect();

        for path in files {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}
