//! Kalmia — scaffold and keep an Rspress documentation site in sync with the
//! bundled template.
//!
//! # Usage
//!
//! ```text
//! kalmia init <dest> [--dry-run] [--json] [--template-dir <dir>] [--manifest <file>]
//! kalmia diff <dest> [--template-dir <dir>] [--manifest <file>]
//! kalmia ls [--template-dir <dir>]
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`
//! (default `warn`, or `info` with `--verbose`).

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use commands::{diff::DiffArgs, init::InitArgs, ls::LsArgs};
use kalmia_sync::{ScaffoldOptions, TemplateSource};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "kalmia",
    version,
    about = "Scaffold a documentation site from the bundled Rspress template",
    long_about = None,
)]
struct Cli {
    /// Log each file written or skipped.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy template files into a directory, skipping files that already match.
    Init(InitArgs),

    /// Show unified diff of what init would write.
    Diff(DiffArgs),

    /// List the files in the template.
    Ls(LsArgs),
}

// ---------------------------------------------------------------------------
// Shared template selection — flattened into each command
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Read the template from this directory instead of the built-in one.
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// YAML manifest listing the entries to copy (trailing `/` marks a directory).
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

impl TemplateArgs {
    pub fn options(&self, dry_run: bool) -> ScaffoldOptions {
        ScaffoldOptions {
            template: match &self.template_dir {
                Some(dir) => TemplateSource::Dir(dir.clone()),
                None => TemplateSource::Embedded,
            },
            manifest: self.manifest.clone(),
            dry_run,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Ls(args) => args.run(),
    }
}
