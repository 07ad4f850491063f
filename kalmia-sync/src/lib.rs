//! # kalmia-sync
//!
//! Hash-gated, idempotent template materialization.
//!
//! Build a [`Syncer`] over any [`kalmia_assets::AssetSource`] and call
//! [`Syncer::copy_file`], [`Syncer::copy_directory`] or
//! [`Syncer::copy_manifest`]. Files whose destination already holds the same
//! SHA-256 digest are left untouched, so repeated runs perform no writes.
//! [`pipeline::scaffold`] wires the built-in Rspress template to the local
//! filesystem.

pub mod dest;
pub mod diff;
pub mod error;
pub mod hash;
pub mod pipeline;
pub mod writer;

pub use dest::{Destination, LocalFs};
pub use diff::FileDiff;
pub use error::SyncError;
pub use hash::ContentDigest;
pub use pipeline::{copy_init_files, scaffold, ScaffoldOptions, TemplateSource};
pub use writer::{SyncReport, Syncer, WriteResult};
