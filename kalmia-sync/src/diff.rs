//! Dry-run unified diff support for `kalmia diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use kalmia_assets::AssetSource;
use kalmia_core::{AssetPath, Manifest, ManifestEntry};

use crate::dest::Destination;
use crate::error::SyncError;
use crate::hash::ContentDigest;
use crate::writer::Syncer;

/// A single template file whose destination differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

impl<S: AssetSource, D: Destination> Syncer<S, D> {
    /// Compare every file `copy_manifest` would touch against the current
    /// destination content and render a unified diff for each that differs.
    ///
    /// No files are written.
    pub fn diff_manifest(
        &self,
        manifest: &Manifest,
        dest_root: &Path,
    ) -> Result<Vec<FileDiff>, SyncError> {
        let mut diffs = Vec::new();
        for entry in manifest {
            self.diff_entry(entry, dest_root, &mut diffs)
                .map_err(|e| SyncError::Entry {
                    entry: entry.clone(),
                    source: Box::new(e),
                })?;
        }
        Ok(diffs)
    }

    fn diff_entry(
        &self,
        entry: &ManifestEntry,
        dest_root: &Path,
        diffs: &mut Vec<FileDiff>,
    ) -> Result<(), SyncError> {
        let files = match entry {
            ManifestEntry::File(path) => vec![path.clone()],
            ManifestEntry::Directory(path) => self
                .source()
                .walk(path.as_str())?
                .iter()
                .map(|p| AssetPath::parse(p))
                .collect::<Result<Vec<_>, _>>()?,
        };

        for rel in files {
            let template = self.source().read_file(rel.as_str())?;
            let dest = rel.to_native(dest_root);
            // An unreadable destination always differs, matching copy_file.
            let existing = match self.destination().read(&dest) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::debug!("diffing against /dev/null {}: {e}", dest.display());
                    None
                }
            };
            if let Some(bytes) = &existing {
                if ContentDigest::of(bytes) == ContentDigest::of(&template) {
                    continue;
                }
            }
            diffs.push(FileDiff {
                unified_diff: render(rel.as_str(), existing.as_deref(), &template),
                path: dest,
            });
        }
        Ok(())
    }
}

fn render(rel: &str, existing: Option<&[u8]>, template: &[u8]) -> String {
    let old_header = match existing {
        Some(_) => format!("a/{rel}"),
        None => "/dev/null".to_string(),
    };
    let new_header = format!("b/{rel}");
    let old = existing.unwrap_or_default();
    match (std::str::from_utf8(old), std::str::from_utf8(template)) {
        (Ok(old), Ok(new)) => {
            let diff = TextDiff::from_lines(old, new)
                .unified_diff()
                .header(&old_header, &new_header)
                .context_radius(3)
                .to_string();
            // No hunks for an empty file that does not exist yet.
            if diff.is_empty() {
                format!("--- {old_header}\n+++ {new_header}\n")
            } else {
                diff
            }
        }
        _ => format!("Binary files {old_header} and {new_header} differ\n"),
    }
}
