//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use clap_complete::Shell;

/// Render a parenthesized integer tree as a pseudographical diagram
#[derive(Parser, Debug)]
#[command(name = "treerender")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file with the tree notation, e.g. `(1(2)(3))`
    #[arg(value_hint = ValueHint::FilePath, required_unless_present_any = ["generator", "info", "show_config"])]
    pub input: Option<PathBuf>,

    /// Output file for the rendered tree (created or replaced)
    #[arg(value_hint = ValueHint::FilePath, required_unless_present_any = ["generator", "info", "show_config"])]
    pub output: Option<PathBuf>,

    /// Settings file, layered over the global config
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Refuse to replace an existing output file
    #[arg(long)]
    pub no_clobber: bool,

    /// Print a summary after rendering
    #[arg(short, long)]
    pub verbose: bool,

    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print the effective settings as TOML
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Show author and version
    #[arg(long)]
    pub info: bool,
}
