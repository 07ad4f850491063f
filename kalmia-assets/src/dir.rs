//! [`DirAssets`] — a template tree read from a real directory on disk.
//!
//! Used when the user points `--template-dir` at a checked-out template
//! instead of the one compiled into the binary. The tree is assumed not to
//! change while a sync is running.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, not_found, AssetError};
use crate::source::{normalize, AssetEntry, AssetKind, AssetSource};

#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn native(&self, rel: &str) -> PathBuf {
        let mut out = self.root.clone();
        if !rel.is_empty() {
            out.extend(rel.split('/'));
        }
        out
    }
}

impl AssetSource for DirAssets {
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        let rel = normalize(path)?;
        let native = self.native(rel);
        match std::fs::metadata(&native) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(not_found(path)),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found(path)),
            Err(e) => return Err(io_err(native, e)),
        }
        std::fs::read(&native)
            .map(Cow::Owned)
            .map_err(|e| io_err(native, e))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError> {
        let rel = normalize(path)?;
        let native = self.native(rel);
        match std::fs::metadata(&native) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(AssetError::NotADirectory {
                    path: path.to_string(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found(path)),
            Err(e) => return Err(io_err(native, e)),
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&native).map_err(|e| io_err(&native, e))? {
            let entry = entry.map_err(|e| io_err(&native, e))?;
            let child = entry.path();
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!("skipping non UTF-8 template entry: {}", child.display());
                continue;
            };
            let file_type = entry.file_type().map_err(|e| io_err(&child, e))?;
            let kind = if file_type.is_dir() {
                AssetKind::Directory
            } else if file_type.is_symlink() {
                // Linked files are read through; linked directories are never
                // descended into, so a link cycle cannot recurse forever.
                let meta = std::fs::metadata(&child).map_err(|e| io_err(&child, e))?;
                if meta.is_dir() {
                    tracing::warn!("skipping symlinked template directory: {}", child.display());
                    continue;
                }
                AssetKind::File
            } else {
                AssetKind::File
            };
            entries.push(AssetEntry { name, kind });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), "{\"x\":1}").unwrap();
        fs::create_dir_all(tmp.path().join("sub").join("nested")).unwrap();
        fs::write(tmp.path().join("sub").join("one.txt"), "hi").unwrap();
        fs::write(tmp.path().join("sub").join("nested").join("two.txt"), "yo").unwrap();
        tmp
    }

    #[test]
    fn reads_and_lists_like_memory_tree() {
        let tmp = fixture();
        let src = DirAssets::new(tmp.path());
        assert_eq!(&*src.read_file("sub/nested/two.txt").unwrap(), b"yo");
        assert_eq!(
            src.list_dir("").unwrap(),
            vec![AssetEntry::file("a.json"), AssetEntry::dir("sub")]
        );
        assert_eq!(
            src.walk("sub").unwrap(),
            ["sub/nested/two.txt", "sub/one.txt"]
        );
    }

    #[test]
    fn missing_entries_are_not_found() {
        let tmp = fixture();
        let src = DirAssets::new(tmp.path());
        assert!(matches!(
            src.read_file("nope.txt").unwrap_err(),
            AssetError::NotFound { .. }
        ));
        assert!(matches!(
            src.list_dir("nope").unwrap_err(),
            AssetError::NotFound { .. }
        ));
        assert!(matches!(
            src.read_file("sub").unwrap_err(),
            AssetError::NotFound { .. }
        ));
    }

    #[test]
    fn listing_a_file_is_not_a_directory() {
        let tmp = fixture();
        let src = DirAssets::new(tmp.path());
        assert!(matches!(
            src.list_dir("a.json").unwrap_err(),
            AssetError::NotADirectory { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_is_not_followed() {
        let tmp = fixture();
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("sub").join("loop")).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("a.json"),
            tmp.path().join("sub").join("linked.json"),
        )
        .unwrap();

        let src = DirAssets::new(tmp.path());
        assert_eq!(
            src.walk("").unwrap(),
            ["a.json", "sub/linked.json", "sub/nested/two.txt", "sub/one.txt"]
        );
        assert_eq!(&*src.read_file("sub/linked.json").unwrap(), b"{\"x\":1}");
    }
}
