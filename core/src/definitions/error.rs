//! Error types for definition loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during definition loading and trigger set construction
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read definition file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definition TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read definition directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },
}
