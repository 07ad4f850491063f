//! Domain types for template manifests.
//!
//! Asset paths are always slash-separated and relative, independent of the
//! host platform. Conversion to a native [`PathBuf`] happens only when a path
//! is joined onto a destination root.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

// ---------------------------------------------------------------------------
// AssetPath
// ---------------------------------------------------------------------------

/// A validated, slash-separated relative path inside a template tree.
///
/// Never empty, never absolute, and free of `.`, `..` and empty components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Parse and validate a relative asset path.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let invalid = |reason| ManifestError::InvalidPath {
            path: raw.to_string(),
            reason,
        };
        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }
        if raw.starts_with('/') {
            return Err(invalid("path must be relative"));
        }
        if raw.contains('\\') {
            return Err(invalid("path must use '/' as separator"));
        }
        for component in raw.split('/') {
            match component {
                "" => return Err(invalid("path has an empty component")),
                "." | ".." => return Err(invalid("path must not contain '.' or '..'")),
                _ => {}
            }
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve this path beneath a native filesystem `root`.
    pub fn to_native(&self, root: &Path) -> PathBuf {
        let mut out = root.to_path_buf();
        for component in self.0.split('/') {
            out.push(component);
        }
        out
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for AssetPath {
    type Error = ManifestError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AssetPath> for String {
    fn from(p: AssetPath) -> Self {
        p.0
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ManifestEntry
// ---------------------------------------------------------------------------

/// Whether a manifest entry names a single file or a whole subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "folder"),
        }
    }
}

/// One top-level item of a [`crate::Manifest`].
///
/// The textual form keeps the trailing-separator convention: `"styles/"`
/// parses as a directory, `"package.json"` as a file, and [`fmt::Display`]
/// writes the same spelling back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ManifestEntry {
    File(AssetPath),
    Directory(AssetPath),
}

impl ManifestEntry {
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        match raw.strip_suffix('/') {
            Some(dir) => Ok(Self::Directory(AssetPath::parse(dir)?)),
            None => Ok(Self::File(AssetPath::parse(raw)?)),
        }
    }

    pub fn path(&self) -> &AssetPath {
        match self {
            ManifestEntry::File(p) | ManifestEntry::Directory(p) => p,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            ManifestEntry::File(_) => EntryKind::File,
            ManifestEntry::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, ManifestEntry::Directory(_))
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestEntry::File(p) => write!(f, "{p}"),
            ManifestEntry::Directory(p) => write!(f, "{p}/"),
        }
    }
}

impl TryFrom<String> for ManifestEntry {
    type Error = ManifestError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ManifestEntry> for String {
    fn from(e: ManifestEntry) -> Self {
        e.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
