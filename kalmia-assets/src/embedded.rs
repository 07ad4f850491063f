//! Compile-time embedded template tree — [`EmbeddedAssets`] and the built-in
//! Rspress scaffold.
//!
//! # Layout
//!
//! ```text
//! template/rspress/
//!   package.json  package-lock.json  postcss.config.js  rspress.config.ts
//!   tsconfig.json  tailwind.config.js
//!   styles/index.css
//!   src/index.tsx  src/components/…
//!   docs/index.md
//! ```
//!
//! Table keys carry the `rspress/` prefix; callers address entries without it.

use std::borrow::Cow;

use crate::error::{not_found, AssetError};
use crate::source::{children_of, normalize, AssetEntry, AssetSource};

// ---------------------------------------------------------------------------
// Embedded files — baked into the binary at compile time via include_bytes!
// ---------------------------------------------------------------------------

/// Internal root of the built-in template table.
pub const RSPRESS_PREFIX: &str = "rspress";

const RSPRESS_FILES: &[(&str, &[u8])] = &[
    ("rspress/package.json", include_bytes!("../template/rspress/package.json")),
    (
        "rspress/package-lock.json",
        include_bytes!("../template/rspress/package-lock.json"),
    ),
    (
        "rspress/postcss.config.js",
        include_bytes!("../template/rspress/postcss.config.js"),
    ),
    (
        "rspress/rspress.config.ts",
        include_bytes!("../template/rspress/rspress.config.ts"),
    ),
    ("rspress/tsconfig.json", include_bytes!("../template/rspress/tsconfig.json")),
    (
        "rspress/tailwind.config.js",
        include_bytes!("../template/rspress/tailwind.config.js"),
    ),
    (
        "rspress/styles/index.css",
        include_bytes!("../template/rspress/styles/index.css"),
    ),
    ("rspress/src/index.tsx", include_bytes!("../template/rspress/src/index.tsx")),
    (
        "rspress/src/components/HomeLayout.tsx",
        include_bytes!("../template/rspress/src/components/HomeLayout.tsx"),
    ),
    (
        "rspress/src/components/Footer/Footer.tsx",
        include_bytes!("../template/rspress/src/components/Footer/Footer.tsx"),
    ),
    ("rspress/docs/index.md", include_bytes!("../template/rspress/docs/index.md")),
];

static RSPRESS: EmbeddedAssets = EmbeddedAssets::new(RSPRESS_PREFIX, RSPRESS_FILES);

/// The built-in Rspress template.
pub fn template() -> &'static EmbeddedAssets {
    &RSPRESS
}

/// Read a single file from the built-in template.
pub fn read_embedded_file(path: &str) -> Result<&'static [u8], AssetError> {
    RSPRESS.get(path)
}

// ---------------------------------------------------------------------------
// EmbeddedAssets
// ---------------------------------------------------------------------------

/// A static `(path, bytes)` table rooted under a fixed prefix.
///
/// The prefix is joined onto every lookup and never appears in results.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssets {
    prefix: &'static str,
    files: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedAssets {
    pub const fn new(prefix: &'static str, files: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { prefix, files }
    }

    /// Table keys below the prefix, with the prefix removed.
    fn relative_paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        let prefix = self.prefix;
        self.files.iter().filter_map(move |(key, _)| {
            if prefix.is_empty() {
                Some(*key)
            } else {
                key.strip_prefix(prefix).and_then(|r| r.strip_prefix('/'))
            }
        })
    }

    fn get(&self, path: &str) -> Result<&'static [u8], AssetError> {
        let rel = normalize(path)?;
        if rel.is_empty() {
            return Err(not_found(path));
        }
        let key = if self.prefix.is_empty() {
            rel.to_string()
        } else {
            format!("{}/{rel}", self.prefix)
        };
        self.files
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, bytes)| *bytes)
            .ok_or_else(|| not_found(path))
    }
}

impl AssetSource for EmbeddedAssets {
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        self.get(path).map(Cow::Borrowed)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<AssetEntry>, AssetError> {
        let dir = normalize(path)?;
        if !dir.is_empty() && self.relative_paths().any(|p| p == dir) {
            return Err(AssetError::NotADirectory {
                path: path.to_string(),
            });
        }
        children_of(self.relative_paths(), dir).ok_or_else(|| not_found(path))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
