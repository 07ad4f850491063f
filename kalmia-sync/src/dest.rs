//! The destination side of a sync — where materialized files land.
//!
//! [`LocalFs`] is the real filesystem. Tests substitute doubles that count
//! or reject writes.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use crate::hash::ContentDigest;

/// Filesystem operations the sync engine performs on the destination tree.
pub trait Destination {
    /// Create `path` and all missing parents. An existing directory is success.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Full content of the file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path` and write `contents` in full.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Digest of the file at `path`.
    fn digest(&self, path: &Path) -> io::Result<ContentDigest> {
        self.read(path).map(|bytes| ContentDigest::of(&bytes))
    }
}

impl<D: Destination + ?Sized> Destination for &D {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn digest(&self, path: &Path) -> io::Result<ContentDigest> {
        (**self).digest(path)
    }
}

/// The local filesystem via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Destination for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // The handle is dropped (and closed) on every return path.
        let mut file = File::create(path)?;
        file.write_all(contents)?;
        file.flush()
    }

    fn digest(&self, path: &Path) -> io::Result<ContentDigest> {
        ContentDigest::from_reader(BufReader::new(File::open(path)?))
    }
}
