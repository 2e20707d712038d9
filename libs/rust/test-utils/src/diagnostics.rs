//! Scoped suppression of diagnostic output.
//!
//! While a [`DiagnosticsGuard`] is alive, every `tracing` event emitted on
//! the current thread is discarded. The previous subscriber comes back when
//! the guard drops, including during unwinding from a failed assertion.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::run_config::RunConfig;

/// Holds the suppression window open.
#[derive(Debug)]
#[must_use = "diagnostics are restored as soon as the guard is dropped"]
pub struct DiagnosticsGuard {
    silenced: Option<DefaultGuard>,
}

impl DiagnosticsGuard {
    /// Whether output is currently being discarded by this guard.
    #[must_use]
    pub const fn is_suppressing(&self) -> bool {
        self.silenced.is_some()
    }
}

/// Start discarding diagnostic output on the current thread.
///
/// Does nothing when `VERBOSE=true` was set for this run.
pub fn suppress_diagnostics(config: &RunConfig) -> DiagnosticsGuard {
    if !config.suppresses_diagnostics() {
        tracing::debug!("verbose override set, diagnostics left visible");
        return DiagnosticsGuard { silenced: None };
    }

    let silent = tracing_subscriber::registry().with(LevelFilter::OFF);
    DiagnosticsGuard {
        silenced: Some(tracing::subscriber::set_default(silent)),
    }
}

/// End the suppression window opened by [`suppress_diagnostics`].
pub fn restore_diagnostics(guard: DiagnosticsGuard) {
    drop(guard);
}

/// Run `f` with diagnostics suppressed, restoring them afterwards.
pub fn with_suppressed_diagnostics<R>(config: &RunConfig, f: impl FnOnce() -> R) -> R {
    let _guard = suppress_diagnostics(config);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::DiagnosticCapture;

    #[test]
    fn test_suppression_hides_all_levels() {
        let capture = DiagnosticCapture::new();
        let _outer = capture.set_default();

        let guard = suppress_diagnostics(&RunConfig::default());
        assert!(guard.is_suppressing());
        tracing::info!("log");
        tracing::warn!("warn");
        tracing::error!("error");
        restore_diagnostics(guard);

        assert_eq!(capture.count(), 0);
        tracing::info!("visible again");
        assert_eq!(capture.messages(), vec!["visible again".to_string()]);
    }

    #[test]
    fn test_verbose_override_skips_suppression() {
        let capture = DiagnosticCapture::new();
        let _outer = capture.set_default();

        let config = RunConfig::default().with_verbose_override();
        let guard = suppress_diagnostics(&config);
        assert!(!guard.is_suppressing());
        tracing::info!("still shown");
        drop(guard);

        assert!(capture.contains("still shown"));
    }

    #[test]
    fn test_restored_after_panic() {
        let capture = DiagnosticCapture::new();
        let _outer = capture.set_default();

        let result = std::panic::catch_unwind(|| {
            with_suppressed_diagnostics(&RunConfig::default(), || {
                tracing::error!("hidden");
                panic!("assertion failed mid-suite");
            })
        });
        assert!(result.is_err());

        tracing::info!("after panic");
        assert_eq!(capture.messages(), vec!["after panic".to_string()]);
    }
}
