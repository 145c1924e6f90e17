//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::FixtureConfig;

/// Non-fatal problem met while resolving configuration.
///
/// Each variant means a layer (or a single field of it) was skipped and the
/// next-lower layer's value kept.
#[derive(Debug, Error)]
pub enum ConfigLoadWarning {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field} in config file: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Load configuration from a JSON file, filling absent fields with defaults.
pub fn load_config(path: &Path) -> Result<FixtureConfig, ConfigLoadWarning> {
    let content = fs::read_to_string(path).map_err(|source| ConfigLoadWarning::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigLoadWarning::Parse {
        path: path.to_path_buf(),
        source,
    })
}
