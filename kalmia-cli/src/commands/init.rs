//! `kalmia init <dest>` — materialize the template into a directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kalmia_sync::{pipeline, SyncReport, WriteResult};

use crate::TemplateArgs;

/// Arguments for `kalmia init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination directory (created if missing).
    pub dest: PathBuf,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a machine-readable JSON report.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub template: TemplateArgs,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let options = self.template.options(self.dry_run);
        tracing::debug!("scaffolding {} with {options:?}", self.dest.display());
        let report = pipeline::scaffold(&self.dest, &options)
            .with_context(|| format!("scaffolding '{}' is incomplete", self.dest.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let root = report.root.display();

    if report.writes.is_empty() {
        println!("{prefix}✓ '{root}' — nothing to do");
        return;
    }

    println!(
        "{prefix}✓ '{root}' synced ({} written, {} unchanged)",
        report.changed(),
        report.unchanged()
    );

    for r in &report.writes {
        let rel = r.path().strip_prefix(&report.root).unwrap_or(r.path());
        match r {
            WriteResult::Written { .. } => println!("  ✎  {}", rel.display()),
            WriteResult::WouldWrite { .. } => println!("  ~  {}", rel.display()),
            WriteResult::Unchanged { .. } => println!("  ·  {}", rel.display()),
        }
    }
}
