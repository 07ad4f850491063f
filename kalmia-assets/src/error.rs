//! Error types for kalmia-assets.

use std::path::PathBuf;

use thiserror::Error;

use kalmia_core::ManifestError;

/// All errors that can arise from reading a template tree.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No entry exists at the requested path.
    #[error("asset not found: {path}")]
    NotFound { path: String },

    /// A directory listing was requested for a file.
    #[error("asset is not a directory: {path}")]
    NotADirectory { path: String },

    /// The requested path is not a valid relative asset path.
    #[error(transparent)]
    InvalidPath(#[from] ManifestError),

    /// Filesystem error from a directory-backed source.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn not_found(path: &str) -> AssetError {
    AssetError::NotFound {
        path: path.to_string(),
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> AssetError {
    AssetError::Io {
        path: path.into(),
        source,
    }
}
