use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "rule-prune",
    version,
    about = "Drop weighted rule alternatives from a rule file by sub-group weight"
)]
pub struct Cli {
    #[command(flatten)]
    pub prune: PruneArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    /// Rule file to read, one rule per line
    pub input: PathBuf,

    /// `TakeTopPruning` or `DropBottomPruning`; any other value keeps every line
    pub method: String,

    /// File to write the retained rules to (overwritten)
    pub output: PathBuf,

    /// JSON partition file; defaults to the built-in layout
    #[arg(long)]
    pub groups: Option<PathBuf>,

    /// Regex locating each rule's weight; capture group 1 is used when present
    #[arg(long)]
    pub weight_pattern: Option<String>,

    /// Write the partition renumbered onto the output file's lines
    #[arg(long)]
    pub groups_out: Option<PathBuf>,

    /// Write a JSON summary of every group decision
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Decide and report without writing the output file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
