//! The read-only [`AssetSource`] seam and its in-memory implementation.
//!
//! Paths handed to a source are slash-separated and relative. A single
//! trailing `/` is ignored, and the empty path (or `.`) names the root.

use std::borrow::Cow;
use std::collections::BTreeMap;

use kalmia_core::AssetPath;

use crate::error::{not_found, AssetError};

// ---------------------------------------------------------------------------
// Listing types
// ---------------------------------------------------------------------------

/// Whether a listed child is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    File,
    Directory,
}

/// A direct child returned by [`AssetSource::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub kind: AssetKind,
}

impl AssetEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AssetKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == AssetKind::Directory
    }
}

// ---------------------------------------------------------------------------
// AssetSource
// ---------------------------------------------------------------------------

/// Read access to an immutable hierarchical byte store.
///
/// Implementations never mutate their tree, so a shared reference may be used
/// from any number of threads at once.
pub trait AssetSource: Send + Sync {
    /// Full content of the file at `path`.
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError>;

    /// Direct children of the directory at `path`, sorted by name.
    fn list_dir(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError>;

    /// Every file below `path`, as paths relative to the source root, in
    /// depth-first name order.
    fn walk(&self, path: &str) -> Result<Vec<String>, AssetError> {
        let dir = normalize(path)?;
        let mut out = Vec::new();
        walk_into(self, dir, &mut out)?;
        Ok(out)
    }
}

fn walk_into<S: AssetSource + ?Sized>(
    source: &S,
    dir: &str,
    out: &mut Vec<String>,
) -> Result<(), AssetError> {
    for entry in source.list_dir(dir)? {
        let child = join(dir, &entry.name);
        if entry.is_dir() {
            walk_into(source, &child, out)?;
        } else {
            out.push(child);
        }
    }
    Ok(())
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        (**self).read_file(path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError> {
        (**self).list_dir(path)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Validate `path` and strip a single trailing separator. Returns `""` for
/// the root.
pub(crate) fn normalize(path: &str) -> Result<&str, AssetError> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.is_empty() || trimmed == "." {
        return Ok("");
    }
    AssetPath::parse(trimmed)?;
    Ok(trimmed)
}

/// Join a child name onto a (possibly root) directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Derive the direct children of `dir` from a flat set of file paths.
///
/// Returns `None` when no file lives below `dir` (and `dir` is not the root).
pub(crate) fn children_of<'a, I>(paths: I, dir: &str) -> Option<Vec<AssetEntry>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut children: BTreeMap<&str, AssetKind> = BTreeMap::new();
    let mut found = dir.is_empty();
    for path in paths {
        let rest = if dir.is_empty() {
            path
        } else {
            match path.strip_prefix(dir).and_then(|r| r.strip_prefix('/')) {
                Some(rest) => rest,
                None => continue,
            }
        };
        found = true;
        match rest.split_once('/') {
            Some((name, _)) => {
                children.insert(name, AssetKind::Directory);
            }
            None => {
                children.entry(rest).or_insert(AssetKind::File);
            }
        }
    }
    found.then(|| {
        children
            .into_iter()
            .map(|(name, kind)| AssetEntry {
                name: name.to_string(),
                kind,
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// MemoryAssets
// ---------------------------------------------------------------------------

/// An owned in-memory tree keyed by relative file path.
///
/// Directories exist implicitly as prefixes of file paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(path, bytes)` pairs.
    pub fn from_files<I, P, B>(files: I) -> Result<Self, AssetError>
    where
        I: IntoIterator<Item = (P, B)>,
        P: AsRef<str>,
        B: Into<Vec<u8>>,
    {
        let mut tree = Self::new();
        for (path, bytes) in files {
            tree.insert(path.as_ref(), bytes)?;
        }
        Ok(tree)
    }

    pub fn insert(&mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Result<(), AssetError> {
        let path = AssetPath::parse(path)?;
        self.files.insert(path.into(), bytes.into());
        Ok(())
    }
}

impl AssetSource for MemoryAssets {
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        let key = normalize(path)?;
        self.files
            .get(key)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| not_found(path))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError> {
        let dir = normalize(path)?;
        if self.files.contains_key(dir) {
            return Err(AssetError::NotADirectory {
                path: path.to_string(),
            });
        }
        children_of(self.files.keys().map(String::as_str), dir).ok_or_else(|| not_found(path))
    }
}
