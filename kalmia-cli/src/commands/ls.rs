//! `kalmia ls` — list template files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kalmia_assets::{template, AssetSource, DirAssets};

/// Arguments for `kalmia ls`.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Read the template from this directory instead of the built-in one.
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

impl LsArgs {
    pub fn run(self) -> Result<()> {
        let files = match &self.template_dir {
            Some(dir) => DirAssets::new(dir)
                .walk("")
                .with_context(|| format!("cannot list template at '{}'", dir.display()))?,
            None => template().walk("").context("cannot list built-in template")?,
        };
        for file in files {
            println!("{file}");
        }
        Ok(())
    }
}
