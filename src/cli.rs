//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using the
//! [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dirsort::config::{FileConfig, ScanOptions, SortOrder};

/// Command-line arguments for controlling the size walk.
#[derive(Parser, Debug)]
struct ScanningArgs {
    /// The number of threads to use for the size walk
    ///
    /// A value of 0 uses the default number of threads (typically the number of CPU cores).
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Trace every directory entered during the size walk
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "dirsort")]
#[command(about = "List the entries of a directory sorted by their total size")]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory whose entries are listed (defaults to the current directory)
    #[arg(short = 'r', long)]
    root: Option<PathBuf>,

    /// Sort order by size: asc or desc [default: asc]
    #[arg(short = 's', long)]
    sort: Option<String>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, the spinner and warnings on stderr are suppressed and a
    /// single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// The requested root, before resolution.
    ///
    /// Priority: CLI argument > config file > `None` (current directory).
    /// Tilde expansion is applied later, during resolution.
    #[must_use]
    pub fn root(&self, config: &FileConfig) -> Option<PathBuf> {
        self.root.clone().or_else(|| config.root.clone())
    }

    /// Resolve and validate the sort order.
    ///
    /// Priority: CLI argument > config file > default (`asc`).
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen value is neither `asc` nor `desc`.
    pub fn sort_order(&self, config: &FileConfig) -> anyhow::Result<SortOrder> {
        self.sort
            .as_deref()
            .or(config.sort.as_deref())
            .map_or(Ok(SortOrder::default()), SortOrder::parse)
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **threads**: CLI > config > `0` (default)
    /// - **verbose**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
        }
    }
}
