//! The daygrid data root: configuration plus the store it points at.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::config::{Config, File};

use crate::clock::Clock;
use crate::config::DayGridConfig;
use crate::error::{DayGridError, DayGridResult};
use crate::event_index::EventIndex;
use crate::storage::{FileStore, Storage};

#[derive(Debug, Clone)]
pub struct DayGrid {
    config: DayGridConfig,
}

impl DayGrid {
    /// Load ~/.config/daygrid/config.toml, creating a commented-out default
    /// on first run.
    pub fn load() -> DayGridResult<Self> {
        let config_path = DayGridConfig::config_path()?;

        if !config_path.exists() {
            DayGridConfig::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> DayGridResult<Self> {
        let config: DayGridConfig = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .build()
            .map_err(|e| DayGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DayGridError::Config(e.to_string()))?;

        Ok(DayGrid { config })
    }

    pub fn with_config(config: DayGridConfig) -> Self {
        DayGrid { config }
    }

    pub fn config(&self) -> &DayGridConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Data directory in display-friendly form, keeping `~`.
    pub fn display_path(&self) -> PathBuf {
        self.config.data_dir.clone()
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    pub fn events(&self, clock: Arc<dyn Clock>) -> EventIndex<FileStore> {
        EventIndex::load(Storage::new(self.store()), clock)
    }
}
