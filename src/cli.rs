//! CLI argument parsing for the manifest review workflow.
//!
//! The CLI stays thin: each command reads its inputs, calls into the
//! manifest/checklist core, and prints the result.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "mfr",
    version,
    about = "Annotate package manifests and filter them through a reviewed checklist",
    after_help = "Commands:\n  generate --input <xml>        Annotate the manifest and write a review checklist\n  analyze --input <xml>         Print per-type member counts\n  filter --input <xml> --keep   Print the manifest reduced to the given types\n  annotate --input <xml>        Print the manifest with per-type comments\n  checks --output-dir <dir>     Show decisions from the latest checklist\n\nExamples:\n  mfr generate --input package.xml --output-dir ./manifest --org dev@example.com\n  cat package.xml | mfr generate --input - --name package.xml\n  mfr checks --output-dir ./manifest --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Analyze(AnalyzeArgs),
    Filter(FilterArgs),
    Annotate(AnnotateArgs),
    Checks(ChecksArgs),
}

/// Full review run: filter by the previous checklist, annotate, write a new
/// checklist.
#[derive(Parser, Debug)]
#[command(about = "Annotate a manifest and write a review checklist")]
pub struct GenerateArgs {
    /// Source manifest, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory for the manifest and checklist (default: ./manifest)
    #[arg(long, short = 'd', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name of the written manifest (default: fullManifest.xml)
    #[arg(long, short = 'n', value_name = "FILE")]
    pub name: Option<String>,

    /// Org label shown in the checklist header (default: unknown)
    #[arg(long, short = 'o', value_name = "LABEL")]
    pub org: Option<String>,

    /// JSON config file (default: <output-dir>/mfr.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print per-type member counts for a manifest")]
pub struct AnalyzeArgs {
    /// Source manifest, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print a manifest reduced to the given metadata types")]
pub struct FilterArgs {
    /// Source manifest, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Metadata type to keep (repeatable)
    #[arg(long, value_name = "TYPE", required = true)]
    pub keep: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Print a manifest with per-type statistics comments")]
pub struct AnnotateArgs {
    /// Source manifest, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,
}

#[derive(Parser, Debug)]
#[command(about = "Show decisions from the latest review checklist")]
pub struct ChecksArgs {
    /// Directory holding previously written checklists (default: ./manifest)
    #[arg(long, short = 'd', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
