//! Kalmia core library — asset paths, manifest entries, errors.
//!
//! Public API surface:
//! - [`types`] — [`AssetPath`] and [`ManifestEntry`]
//! - [`manifest`] — the ordered [`Manifest`] and the built-in Rspress list
//! - [`error`] — [`ManifestError`]

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use manifest::{Manifest, RSPRESS_ENTRIES};
pub use types::{AssetPath, EntryKind, ManifestEntry};
