//! Ordered list of top-level template entries to materialize.
//!
//! # File format
//!
//! ```yaml
//! entries:
//!   - package.json
//!   - styles/
//! ```
//!
//! A trailing `/` marks a directory entry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::types::ManifestEntry;

/// Top-level entries of the Rspress documentation-site template.
pub const RSPRESS_ENTRIES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "postcss.config.js",
    "rspress.config.ts",
    "tsconfig.json",
    "tailwind.config.js",
    "styles/",
    "src/",
];

/// An ordered, immutable sequence of [`ManifestEntry`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest from trailing-slash spellings.
    pub fn from_entries<I, S>(raw: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = raw
            .into_iter()
            .map(|s| ManifestEntry::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// The built-in Rspress manifest.
    pub fn rspress() -> Self {
        // RSPRESS_ENTRIES is a fixed list of valid relative paths.
        Self::from_entries(RSPRESS_ENTRIES).unwrap_or_else(|e| unreachable!("{e}"))
    }

    /// Load a manifest override from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            serde_yaml::from_str(&contents).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if manifest.entries.is_empty() {
            return Err(ManifestError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(manifest)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::rspress()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
