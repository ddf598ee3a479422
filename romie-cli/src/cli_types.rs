//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "romie")]
#[command(version, about = "Build a local Game Boy ROM catalog and download from it", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file (default: ~/.romie/catalog.json)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by `download` and `sync`.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct DownloadArgs {
    /// Directory to write files into (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum downloads in flight
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Show what would be downloaded without fetching anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,

    /// Write a download log to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load the catalog (crawling it first if missing), then download
    Sync {
        /// Expected number of catalog entries
        #[arg(long)]
        expected: Option<usize>,

        #[command(flatten)]
        download: DownloadArgs,
    },

    /// Crawl the listing site and write the catalog
    Crawl {
        /// Expected number of catalog entries (counted first if not given)
        #[arg(long)]
        expected: Option<usize>,

        /// Replace an existing catalog
        #[arg(long)]
        force: bool,
    },

    /// Count the listings across all pages
    Count,

    /// Download ROMs and covers matching the filter from the catalog
    Download(DownloadArgs),

    /// Show tag statistics for the stored catalog
    Stats,

    /// Show the tags derived from download links
    Classify {
        #[arg(required = true)]
        links: Vec<String>,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective settings
    Show,

    /// Print the settings file path
    Path,
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
