// src/logging.rs

//! Logging for `backlogc`.
//!
//! Every subcommand prints exactly one JSON document on stdout (a plan, a
//! hash, an error report) that callers pipe into other tools, so log lines
//! must never land there: the subscriber always writes to stderr.
//!
//! Filter: `--log-level` if given, otherwise the `BACKLOGC_LOG` directives
//! (e.g. `debug` or `backlog_compiler::plan=debug,warn`), otherwise `info`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "BACKLOGC_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

/// Resolve the filter; malformed `BACKLOGC_LOG` directives fall back to `info`.
pub fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(lvl) => EnvFilter::new(directive_for(lvl)),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
