//! Global daygrid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_EVENT_COLOR};
use crate::error::{DayGridError, DayGridResult};

static DEFAULT_DATA_DIR: &str = "~/.daygrid";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

fn is_default_color(c: &String) -> bool {
    c == DEFAULT_EVENT_COLOR
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn is_default_debounce_ms(ms: &u64) -> bool {
    *ms == DEFAULT_DEBOUNCE_MS
}

/// Global configuration at ~/.config/daygrid/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayGridConfig {
    /// Where persisted values live
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Colour for new events when none is given
    #[serde(default = "default_color", skip_serializing_if = "is_default_color")]
    pub default_color: String,

    /// Redraw debounce window for `browse`
    #[serde(
        default = "default_debounce_ms",
        skip_serializing_if = "is_default_debounce_ms"
    )]
    pub redraw_debounce_ms: u64,
}

impl Default for DayGridConfig {
    fn default() -> Self {
        DayGridConfig {
            data_dir: default_data_dir(),
            default_color: default_color(),
            redraw_debounce_ms: default_debounce_ms(),
        }
    }
}

impl DayGridConfig {
    pub fn config_path() -> DayGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DayGridError::Config("Could not determine config directory".into()))?
            .join("daygrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> DayGridResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DayGridError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| DayGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DayGridResult<()> {
        let contents = format!(
            "\
# daygrid configuration

# Where events are stored:
# data_dir = \"{}\"

# Colour for new events:
# default_color = \"{}\"

# Redraw debounce for `daygrid browse`, in milliseconds:
# redraw_debounce_ms = {}
",
            DEFAULT_DATA_DIR, DEFAULT_EVENT_COLOR, DEFAULT_DEBOUNCE_MS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DayGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DayGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
