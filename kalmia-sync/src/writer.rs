//! Hash-gated template copy.
//!
//! ## `copy_file` protocol
//!
//! 1. Read the template bytes (missing → [`SyncError::Source`]).
//! 2. Create the destination's parent directories.
//! 3. SHA-256 the template bytes and the existing destination file. A
//!    destination that cannot be read for any reason counts as "different".
//! 4. Equal digests → skip, nothing is opened for writing.
//! 5. Otherwise create/truncate the destination and write the bytes.
//!
//! `copy_directory` and `copy_manifest` compose this and stop at the first
//! failure. Nothing already written is rolled back.

use std::path::{Path, PathBuf};

use serde::Serialize;

use kalmia_assets::{source::join, AssetSource};
use kalmia_core::{Manifest, ManifestEntry};

use crate::dest::{Destination, LocalFs};
use crate::error::{dest_err, SyncError};
use crate::hash::ContentDigest;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — destination content already matches the template.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }

    /// `true` for results that changed (or would change) the destination.
    pub fn is_change(&self) -> bool {
        !matches!(self, WriteResult::Unchanged { .. })
    }
}

/// Outcome of copying a whole manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub writes: Vec<WriteResult>,
}

impl SyncReport {
    pub fn changed(&self) -> usize {
        self.writes.iter().filter(|w| w.is_change()).count()
    }

    pub fn unchanged(&self) -> usize {
        self.writes.len() - self.changed()
    }

    /// `true` when every file already matched the template.
    pub fn is_noop(&self) -> bool {
        self.changed() == 0
    }
}

// ---------------------------------------------------------------------------
// Syncer
// ---------------------------------------------------------------------------

/// Materializes entries of an [`AssetSource`] onto a [`Destination`].
///
/// Holds no mutable state; one `Syncer` may serve any number of calls.
#[derive(Debug, Clone)]
pub struct Syncer<S, D = LocalFs> {
    source: S,
    dest: D,
    dry_run: bool,
}

impl<S: AssetSource> Syncer<S, LocalFs> {
    /// A syncer writing to the local filesystem.
    pub fn new(source: S) -> Self {
        Self::with_destination(source, LocalFs)
    }
}

impl<S: AssetSource, D: Destination> Syncer<S, D> {
    pub fn with_destination(source: S, dest: D) -> Self {
        Self {
            source,
            dest,
            dry_run: false,
        }
    }

    /// In dry-run mode nothing is created or written; files that differ are
    /// reported as [`WriteResult::WouldWrite`].
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn destination(&self) -> &D {
        &self.dest
    }

    /// Copy the template file at `source_path` to `dest_path` unless the
    /// destination already holds identical content.
    pub fn copy_file(&self, source_path: &str, dest_path: &Path) -> Result<WriteResult, SyncError> {
        let content = self.source.read_file(source_path)?;

        if !self.dry_run {
            if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.dest
                    .create_dir_all(parent)
                    .map_err(|e| dest_err(parent, e))?;
            }
        }

        let digest = ContentDigest::of(&content);
        match self.dest.digest(dest_path) {
            Ok(existing) if existing == digest => {
                tracing::debug!("unchanged: {}", dest_path.display());
                return Ok(WriteResult::Unchanged {
                    path: dest_path.to_path_buf(),
                });
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("no comparable destination at {}: {e}", dest_path.display());
            }
        }

        if self.dry_run {
            tracing::info!("[dry-run] would write: {}", dest_path.display());
            return Ok(WriteResult::WouldWrite {
                path: dest_path.to_path_buf(),
            });
        }

        self.dest
            .write(dest_path, &content)
            .map_err(|e| dest_err(dest_path, e))?;

        tracing::info!("wrote: {} ({digest})", dest_path.display());
        Ok(WriteResult::Written {
            path: dest_path.to_path_buf(),
        })
    }

    /// Recursively copy the template directory at `source_path` into
    /// `dest_path`. Children are visited in name order.
    pub fn copy_directory(
        &self,
        source_path: &str,
        dest_path: &Path,
    ) -> Result<Vec<WriteResult>, SyncError> {
        let mut writes = Vec::new();
        self.copy_directory_into(source_path, dest_path, &mut writes)?;
        Ok(writes)
    }

    fn copy_directory_into(
        &self,
        source_path: &str,
        dest_path: &Path,
        writes: &mut Vec<WriteResult>,
    ) -> Result<(), SyncError> {
        let entries = self.source.list_dir(source_path)?;
        let base = dir_base(source_path);

        for entry in entries {
            let child_source = join(base, &entry.name);
            let child_dest = dest_path.join(&entry.name);
            let result = if entry.is_dir() {
                self.ensure_dir(&child_dest)
                    .and_then(|()| self.copy_directory_into(&child_source, &child_dest, writes))
            } else {
                self.copy_file(&child_source, &child_dest)
                    .map(|w| writes.push(w))
            };
            if let Err(e) = result {
                return Err(SyncError::Child {
                    path: child_source,
                    source: Box::new(e),
                });
            }
        }
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), SyncError> {
        if self.dry_run {
            return Ok(());
        }
        self.dest.create_dir_all(path).map_err(|e| dest_err(path, e))
    }

    /// Copy every manifest entry, in order, beneath `dest_root`.
    ///
    /// Stops at the first failing entry; the error names that entry.
    pub fn copy_manifest(
        &self,
        manifest: &Manifest,
        dest_root: &Path,
    ) -> Result<SyncReport, SyncError> {
        let mut writes = Vec::new();
        for entry in manifest {
            let dest = entry.path().to_native(dest_root);
            let result = match entry {
                ManifestEntry::File(path) => self
                    .copy_file(path.as_str(), &dest)
                    .map(|w| writes.push(w)),
                ManifestEntry::Directory(path) => {
                    self.copy_directory_into(path.as_str(), &dest, &mut writes)
                }
            };
            if let Err(e) = result {
                return Err(SyncError::Entry {
                    entry: entry.clone(),
                    source: Box::new(e),
                });
            }
        }

        Ok(SyncReport {
            root: dest_root.to_path_buf(),
            dry_run: self.dry_run,
            writes,
        })
    }
}

/// Directory path with any trailing separator removed; `""` for the root.
fn dir_base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed == "." {
        ""
    } else {
        trimmed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
