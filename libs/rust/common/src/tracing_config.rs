//! Tracing subscriber setup for test binaries.
//!
//! Output goes through libtest's capturing writer, so it only shows for
//! failing tests or with `--nocapture`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by quiet runs.
pub const QUIET_LEVEL: &str = "warn";

/// Filter used by verbose runs.
pub const VERBOSE_LEVEL: &str = "debug";

/// Tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub log_level: String,
    /// Include the event target in each line
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_verbosity(false)
    }
}

impl TracingConfig {
    /// Configuration matching a run's verbosity.
    #[must_use]
    pub fn for_verbosity(verbose: bool) -> Self {
        Self {
            log_level: if verbose { VERBOSE_LEVEL } else { QUIET_LEVEL }.to_string(),
            with_target: verbose,
        }
    }

    /// Replace the filter directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn try_init_tracing(
    config: &TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(
            fmt::layer()
                .with_test_writer()
                .with_target(config.with_target),
        )
        .try_init()?;

    tracing::debug!(level = %config.log_level, "tracing initialized");
    Ok(())
}

/// Install the global subscriber unless one is already set.
///
/// Returns whether this call installed it. Every test in a binary may call
/// this; only the first takes effect.
pub fn init_tracing(config: &TracingConfig) -> bool {
    try_init_tracing(config).is_ok()
}
