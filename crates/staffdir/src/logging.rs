//! Diagnostics for the `staffdir` binary.
//!
//! Everything goes to stderr; stdout carries only command output so that
//! `staffdir list -f json | jq` keeps working with `-v`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target used for the default filter directive.
const CRATE_TARGET: &str = "staffdir";

/// How much the CLI logs, from `-q` / `-v` / `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Loads, toggles and failures.
    #[default]
    Normal,
    /// Cache hits, requests and view transitions.
    Verbose,
    /// Everything, including span enter/exit of API calls.
    Trace,
}

impl Verbosity {
    /// Level applied to this crate's events.
    #[must_use]
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Filter directive, e.g. `staffdir=debug`. Other crates stay at their
    /// `EnvFilter` default (error).
    #[must_use]
    pub fn directive(self) -> String {
        format!(
            "{CRATE_TARGET}={}",
            self.level().to_string().to_ascii_lowercase()
        )
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG`, when set and valid, replaces the verbosity-derived filter.
/// A second call is a no-op.
///
/// ```no_run
/// use staffdir::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= Verbosity::Verbose);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .try_init();
}

/// Route events to the test harness, warnings and up.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
