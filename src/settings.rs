//! User settings.
//!
//! Settings are read from `settings.json` in the platform configuration
//! directory. Every field has a default, so a partial file only overrides what
//! it names and a missing file means "all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background color the frame is cleared to.
    pub clear_color: [f32; 4],
    pub vsync: bool,
    /// Multisample count requested for the default framebuffer. 0 disables it.
    pub msaa_samples: u8,
    /// Console log level, parsed as a [`log::LevelFilter`].
    pub log_level: String,
    /// GL log file. Restarted on every run; `null` disables it.
    pub log_file: Option<PathBuf>,
    /// Show the frame rate in the window title.
    pub fps_in_title: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_color: [0.3, 0.3, 0.3, 1.0],
            vsync: true,
            msaa_samples: 4,
            log_level: "info".to_string(),
            log_file: Some(PathBuf::from("gl.log")),
            fps_in_title: false,
        }
    }
}

impl Settings {
    /// `<config dir>/hello-triangle/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hello-triangle").join("settings.json"))
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let s = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&s).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from [`Settings::default_path`]. On failure the defaults are
    /// returned together with the error so the caller can report it once
    /// logging is up.
    pub fn load() -> (Self, Option<SettingsError>) {
        let Some(path) = Self::default_path() else {
            return (Self::default(), None);
        };
        match Self::load_from(&path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
