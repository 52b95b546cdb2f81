use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
    /// Terminal widths below this switch to the narrow table layout.
    pub narrow_width: u16,
}

/// Data file configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Quest data JSON to load instead of the bundled data set.
    pub quest_file: Option<PathBuf>,
    /// Where exported HTML pages are written.
    pub export_dir: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
            narrow_width: 80,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/quest-viewer/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallbacks as [`AppConfig::load`].
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved export directory (override or current directory).
    pub fn export_dir(&self) -> PathBuf {
        self.data
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("quest-viewer").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
