use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mcsmatch CLI - Report and depiction tooling for molecular maximum-common-subgraph comparison runs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a molecule from an MDL molfile and re-export it in another format.
    Convert(ConvertArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input molecule file (MDL molfile V2000).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output format tag ('mol' or 'smiles').
    #[arg(short, long, value_name = "FORMAT", default_value = "smiles")]
    pub format: String,

    /// Destination path, or '--' to write to standard output.
    #[arg(short, long, value_name = "PATH", default_value = "--")]
    pub output: String,
}
