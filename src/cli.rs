/// CLI argument definitions for the `dryad` command.
///
/// Defines one subcommand per supported duplication-report format,
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "dryad",
    version,
    about = "Convert duplication-detector reports into a uniform issue model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Common arguments shared by every format subcommand.
#[derive(Args)]
pub struct CommonArgs {
    /// Report file to convert
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed listing with duplicate locations and fragments
    #[arg(short, long)]
    pub report: bool,

    /// Show all duplicate groups (default: top 20)
    #[arg(long)]
    pub show_all: bool,

    /// Minimum duplicate lines for HIGH severity (default: 50, or .dryad.toml)
    #[arg(long)]
    pub high: Option<i64>,

    /// Minimum duplicate lines for NORMAL severity (default: 25, or .dryad.toml)
    #[arg(long)]
    pub normal: Option<i64>,
}

/// All supported report formats.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a PMD CPD XML report
    #[command(long_about = "\
Convert a PMD CPD XML report.

CPD (Copy/Paste Detector) carries the duplicated source text once per
duplication; each <file> element becomes one issue whose end line is
derived from the record's line count.

Severity is derived from the duplicate line count:
  lines >= high    -> HIGH
  lines >= normal  -> NORMAL
  otherwise        -> LOW")]
    Cpd {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert a ReSharper DupFinder XML report
    #[command(long_about = "\
Convert a ReSharper DupFinder XML report.

DupFinder carries the duplicated text per fragment; the first non-blank
fragment text becomes the shared fragment of the group. The Cost
attribute of a Duplicate drives severity.")]
    Dupfinder {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert a Simian XML report
    #[command(long_about = "\
Convert a Simian XML report.

Simian reports never include the duplicated source text, so converted
groups have an empty fragment. The lineCount attribute of a set drives
severity.")]
    Simian {
        #[command(flatten)]
        common: CommonArgs,
    },
}
