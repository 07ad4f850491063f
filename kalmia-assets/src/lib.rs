//! # kalmia-assets
//!
//! Read-only template trees behind the [`AssetSource`] trait.
//!
//! Three sources satisfy the same contract:
//! - [`EmbeddedAssets`] — a table baked into the binary (see [`template`])
//! - [`MemoryAssets`] — an owned in-memory map
//! - [`DirAssets`] — a directory on disk
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kalmia_assets::{template, AssetSource};
//!
//! fn print_template() {
//!     if let Ok(files) = template().walk("") {
//!         for path in files {
//!             println!("{path}");
//!         }
//!     }
//! }
//! ```

pub mod dir;
pub mod embedded;
pub mod error;
pub mod source;

pub use dir::DirAssets;
pub use embedded::{read_embedded_file, template, EmbeddedAssets, RSPRESS_PREFIX};
pub use error::AssetError;
pub use source::{AssetEntry, AssetKind, AssetSource, MemoryAssets};
