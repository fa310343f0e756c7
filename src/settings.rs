use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{
    BorderPolicy, GameConfig, GridSize, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
};
use crate::error::ConfigError;

const APP_DIR_NAME: &str = "snakegame";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Values read from the optional settings file. Absent keys stay `None`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub height: Option<u16>,
    pub width: Option<u16>,
    pub border_kill: Option<bool>,
}

impl Settings {
    /// Layers `overrides` on top of `self`; values set in `overrides` win.
    #[must_use]
    pub fn overlay(self, overrides: Settings) -> Settings {
        Settings {
            height: overrides.height.or(self.height),
            width: overrides.width.or(self.width),
            border_kill: overrides.border_kill.or(self.border_kill),
        }
    }

    /// Fills unset values with defaults and validates the board size.
    pub fn to_config(self, seed: Option<u64>) -> Result<GameConfig, ConfigError> {
        let size = GridSize::new(
            self.width.unwrap_or(DEFAULT_GRID_WIDTH),
            self.height.unwrap_or(DEFAULT_GRID_HEIGHT),
        )?;

        Ok(GameConfig {
            size,
            border_policy: BorderPolicy::from_border_kill(self.border_kill.unwrap_or(false)),
            seed,
        })
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// A missing file yields the defaults. A file that exists but cannot be read
/// or parsed is an error, so a typo never silently falls back to defaults.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    read_settings(path).map_err(|source| ConfigError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

fn read_settings(path: &Path) -> io::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<Settings>(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
