//! Application settings: where data lives and whose records to use.

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_DATA_ROOT: &str = "~/Documents/Invoices";
pub const DEFAULT_OWNER: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub data_root: String,
    #[serde(default = "default_owner")]
    pub owner: String,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            owner: default_owner(),
        }
    }
}

impl AppSettings {
    /// `data_root` with `~` expanded.
    pub fn root(&self) -> PathBuf {
        PathBuf::from(expand_home_dir(&self.data_root))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("output")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root().join("templates")
    }

    /// Reads settings from `path`; `Ok(None)` if the file doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str).map_err(io_err)
    }
}

/// `settings.toml` in the platform config directory.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "invoice-generator", "app")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

pub fn load_settings() -> Result<Option<AppSettings>, ConfigError> {
    AppSettings::load_from(&settings_path()?)
}

pub fn save_settings(settings: &AppSettings) -> Result<PathBuf, ConfigError> {
    let path = settings_path()?;
    settings.save_to(&path)?;
    Ok(path)
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}
