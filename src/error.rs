//! Error types for dataset loading and configuration.
//!
//! Lookups never fail: unknown names produce empty results or the
//! unbounded distance. Only whole-file problems surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// A dataset file could not be read or has the wrong top-level shape.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("cannot read {what} from {path}: {source}")]
    Io {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {what} data: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The configuration file exists but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a whole data file, tagging failures with what it was supposed to hold.
pub(crate) fn read_data_file(what: &'static str, path: &std::path::Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        what,
        path: path.to_path_buf(),
        source,
    })
}
