//! Error types for kalmia-sync.

use std::path::PathBuf;

use thiserror::Error;

use kalmia_assets::AssetError;
use kalmia_core::{ManifestEntry, ManifestError};

/// All errors that can arise from sync operations.
///
/// Directory and manifest copies wrap the failure of a child in
/// [`SyncError::Child`] / [`SyncError::Entry`]; [`SyncError::root_cause`]
/// unwraps back to the source-read or destination-write error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The template entry is missing or could not be read.
    #[error("source read error: {0}")]
    Source(#[from] AssetError),

    /// Creating a directory or writing a file under the destination failed.
    #[error("cannot write {path}: {source}")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file or directory inside a subtree copy failed.
    #[error("failed to copy {path}: {source}")]
    Child {
        path: String,
        #[source]
        source: Box<SyncError>,
    },

    /// A manifest entry failed; later entries were not attempted.
    #[error("failed to copy {} {entry}: {source}", .entry.kind())]
    Entry {
        entry: ManifestEntry,
        #[source]
        source: Box<SyncError>,
    },

    /// The manifest override could not be loaded.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

impl SyncError {
    /// The innermost error beneath any `Child` / `Entry` wrappers.
    pub fn root_cause(&self) -> &SyncError {
        match self {
            SyncError::Child { source, .. } | SyncError::Entry { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// The manifest entry that failed, if this error came from a manifest copy.
    pub fn failed_entry(&self) -> Option<&ManifestEntry> {
        match self {
            SyncError::Entry { entry, .. } => Some(entry),
            _ => None,
        }
    }

    pub fn is_source_read(&self) -> bool {
        matches!(self.root_cause(), SyncError::Source(_))
    }

    pub fn is_destination_write(&self) -> bool {
        matches!(self.root_cause(), SyncError::Destination { .. })
    }
}

/// Convenience constructor for [`SyncError::Destination`].
pub(crate) fn dest_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Destination {
        path: path.into(),
        source,
    }
}
