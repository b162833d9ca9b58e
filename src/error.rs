//! Error types.
//!
//! Bad numbers typed into the form are not errors; they read as zero (see
//! [`crate::numeric`]). What is left are failures of the things around the
//! form: the record store, the template and the filesystem.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read draft {}: {source}", path.display())]
    Draft {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid draft: {0}")]
    DraftParse(#[from] toml::de::Error),

    #[error("failed to encode draft: {0}")]
    DraftEncode(#[from] toml::ser::Error),
}

/// Failures of the profile/client/payment record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt record file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("client not found: {0}")]
    ClientNotFound(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("settings I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}
