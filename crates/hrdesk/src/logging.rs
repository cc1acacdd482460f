//! Log setup for the `hrdesk` binary and tests.
//!
//! Store reads and rewrites log at debug, appends and dataset creation at
//! info, and lock contention at warn. Everything goes to stderr; stdout is
//! reserved for listings, which may be JSON or CSV.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much of the store's activity to report, set by `-q` and `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Appends, creations and lock waits.
    #[default]
    Normal,
    /// Also every dataset read and rewrite.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// The most detailed level that gets through.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the stderr subscriber for the `hrdesk` target.
///
/// `RUST_LOG`, when set, replaces the filter derived from `verbosity`.
/// Later calls are ignored.
///
/// # Examples
///
/// ```no_run
/// use hrdesk::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("hrdesk={}", verbosity.to_level_filter());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

/// Route warnings through the test harness's captured output.
///
/// Lets a failing store test show lock contention and cleanup messages.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("hrdesk=warn")
        .with_test_writer()
        .try_init();
}
