//! Error types for kalmia-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from parsing asset paths and loading manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A manifest entry or asset path is not a usable relative path.
    #[error("invalid asset path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Underlying I/O failure while reading a manifest file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The manifest file parsed but listed no entries.
    #[error("manifest at {path} has no entries")]
    Empty { path: PathBuf },
}
