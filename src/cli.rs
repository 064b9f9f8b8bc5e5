// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `backlogc`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "backlogc",
    version,
    about = "Validate generated backlogs and compile them into replayable execution plans.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Backlogc.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BACKLOGC_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check a backlog for dependency and hierarchy errors.
    Validate {
        /// Backlog JSON (an array of items, or `{ "items": [...] }`).
        file: PathBuf,
    },

    /// Print the content hash of a valid backlog.
    Hash { file: PathBuf },

    /// Compile a valid backlog into its execution plan (memoized by hash).
    Plan { file: PathBuf },

    /// Diff a regenerated set against the existing one by id.
    Reconcile {
        existing: PathBuf,
        candidate: PathBuf,

        /// Only compare the direct children of this parent id.
        #[arg(long, value_name = "ID")]
        parent: Option<String>,
    },

    /// List the hashes of stored plans.
    Plans,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
