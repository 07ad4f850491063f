//! `kalmia diff <dest>` — show unified diffs for what init would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kalmia_sync::pipeline;

use crate::TemplateArgs;

/// Arguments for `kalmia diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Destination directory to compare against the template.
    pub dest: PathBuf,

    #[command(flatten)]
    pub template: TemplateArgs,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let diffs = pipeline::diff(&self.dest, &self.template.options(true))
            .with_context(|| format!("diff failed for '{}'", self.dest.display()))?;

        if diffs.is_empty() {
            println!("No differences for '{}'.", self.dest.display());
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
