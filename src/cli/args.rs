//! CLI argument structures

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pack a directory of instance files into one aggregate file
#[derive(Parser, Debug)]
#[command(name = "instpack")]
#[command(about = "instpack - Pack a directory of instance files into one aggregate file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write <dir>/<dir name>.txt from the instance files in a directory
    #[command(name = "pack")]
    Pack {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (defaults to <DIR>/<DIR name>.<extension>)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Third field of every instance header
        #[arg(long, allow_negative_numbers = true)]
        placeholder: Option<i64>,
    },

    /// Show how each directory entry would be treated, without writing
    #[command(name = "list")]
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Directory to read (defaults to current directory)
    pub dir: Option<PathBuf>,

    /// Entry name or glob to treat as a driver (repeatable; replaces configured list)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}
