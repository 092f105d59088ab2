use anyhow::Result;
use clap::Parser;
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

mod checklist;
mod cli;
mod config;
mod manifest;
mod output;
mod staging;
mod util;
mod workflow;

use cli::{AnalyzeArgs, AnnotateArgs, ChecksArgs, Command, FilterArgs, GenerateArgs, RootArgs};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "MFR_LOG";

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Generate(args) => cmd_generate(&args),
        Command::Analyze(args) => cmd_analyze(&args),
        Command::Filter(args) => cmd_filter(&args),
        Command::Annotate(args) => cmd_annotate(&args),
        Command::Checks(args) => cmd_checks(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let settings = config::resolve_settings(args)?;
    let document = util::read_input(&args.input)?;
    let summary = workflow::run_generate(
        &document,
        &util::input_label(&args.input),
        &settings,
        &workflow::SystemClock,
    )?;
    output::print_run_summary(&summary, args.json)
}

fn cmd_analyze(args: &AnalyzeArgs) -> Result<()> {
    let document = util::read_input(&args.input)?;
    let summaries = manifest::analyze(&document);
    output::print_summaries(&summaries, args.json)
}

fn cmd_filter(args: &FilterArgs) -> Result<()> {
    let document = util::read_input(&args.input)?;
    let allowed: BTreeSet<String> = args.keep.iter().cloned().collect();
    print!("{}", manifest::filter(&document, &allowed));
    Ok(())
}

fn cmd_annotate(args: &AnnotateArgs) -> Result<()> {
    let document = util::read_input(&args.input)?;
    let summaries = manifest::analyze(&document);
    print!("{}", manifest::annotate(&document, &summaries));
    Ok(())
}

fn cmd_checks(args: &ChecksArgs) -> Result<()> {
    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config::DEFAULT_OUTPUT_DIR.into());
    let review = workflow::prior_review(&dir);
    output::print_prior_review(&review, args.json)
}
