use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "check-file-integrity")]
#[command(about = "A CLI tool to snapshot a directory tree and report added, modified, and deleted files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Baseline snapshot file (overrides the config file)
    #[arg(short, long, global = true)]
    pub baseline: Option<PathBuf>,

    /// Number of parallel threads for hashing (default: number of CPU cores)
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan a directory and save its snapshot as the new baseline
    Save {
        /// Directory to snapshot
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Scan a directory and report changes against the saved baseline
    Check {
        /// Directory to check
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List every file the scanner would visit, without hashing
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Run a check and also write the summary to a timestamped report file
    Export {
        /// Directory to check
        #[arg(default_value = ".")]
        path: PathBuf,

        /// File-name template for the report; `{timestamp}` is substituted
        #[arg(short, long)]
        output: Option<String>,
    },
}
