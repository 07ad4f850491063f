//! Shared scaffold entrypoint used by the CLI.

use std::path::{Path, PathBuf};

use kalmia_assets::{template, AssetSource, DirAssets};
use kalmia_core::Manifest;

use crate::diff::FileDiff;
use crate::writer::{SyncReport, Syncer};
use crate::SyncError;

/// Where template files are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The Rspress template compiled into the binary.
    #[default]
    Embedded,
    /// A template checked out on disk.
    Dir(PathBuf),
}

/// Inputs for a scaffold run.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    pub template: TemplateSource,
    /// YAML manifest override; the built-in Rspress manifest when `None`.
    pub manifest: Option<PathBuf>,
    pub dry_run: bool,
}

impl ScaffoldOptions {
    fn load_manifest(&self) -> Result<Manifest, SyncError> {
        match &self.manifest {
            Some(path) => Ok(Manifest::load(path)?),
            None => Ok(Manifest::rspress()),
        }
    }

    fn with_source<R>(&self, f: impl FnOnce(&dyn AssetSource) -> R) -> R {
        match &self.template {
            TemplateSource::Embedded => f(template()),
            TemplateSource::Dir(dir) => f(&DirAssets::new(dir)),
        }
    }
}

/// Materialize the manifest into `dest_root`.
///
/// This is the canonical entrypoint for `kalmia init`.
pub fn scaffold(dest_root: &Path, options: &ScaffoldOptions) -> Result<SyncReport, SyncError> {
    let manifest = options.load_manifest()?;
    options.with_source(|source| {
        Syncer::new(source)
            .dry_run(options.dry_run)
            .copy_manifest(&manifest, dest_root)
    })
}

/// Unified diffs of what [`scaffold`] would change in `dest_root`.
pub fn diff(dest_root: &Path, options: &ScaffoldOptions) -> Result<Vec<FileDiff>, SyncError> {
    let manifest = options.load_manifest()?;
    options.with_source(|source| Syncer::new(source).diff_manifest(&manifest, dest_root))
}

/// Copy the built-in Rspress project files into `to`.
pub fn copy_init_files(to: &Path) -> Result<SyncReport, SyncError> {
    scaffold(to, &ScaffoldOptions::default())
}
