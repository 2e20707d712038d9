//! Deterministic property runner and ambient configuration.
//!
//! Test entry points should receive a [`Harness`] explicitly. The ambient
//! slot behind [`install_global_config`] exists for helpers that cannot be
//! handed one; it moves from unconfigured to configured once and keeps the
//! last written value.

use std::sync::{PoisonError, RwLock};

use meugrind_common::{HarnessError, TracingConfig, init_tracing};
use proptest::strategy::Strategy;
use proptest::test_runner::{TestCaseResult, TestRunner};

use crate::diagnostics::{DiagnosticsGuard, suppress_diagnostics};
use crate::matchers::Matchers;
use crate::run_config::{RunConfig, load_run_config};

static AMBIENT: RwLock<Option<RunConfig>> = RwLock::new(None);

/// Result of installing the ambient configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// First installation in this process
    Installed,
    /// A different configuration was replaced
    Replaced,
    /// The same configuration was already installed
    Unchanged,
}

/// Register `config` as the ambient default. Last write wins.
pub fn install_global_config(config: RunConfig) -> InstallOutcome {
    let mut slot = AMBIENT.write().unwrap_or_else(PoisonError::into_inner);

    let outcome = match slot.as_ref() {
        None => InstallOutcome::Installed,
        Some(current) if *current == config => return InstallOutcome::Unchanged,
        Some(_) => InstallOutcome::Replaced,
    };

    tracing::debug!(
        seed = config.seed,
        num_runs = config.num_runs,
        verbose = config.verbose,
        ?outcome,
        "ambient run config installed"
    );
    *slot = Some(config);
    outcome
}

/// The ambient configuration, if one was installed.
#[must_use]
pub fn global_config() -> Option<RunConfig> {
    AMBIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Explicit handle on a run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harness {
    config: RunConfig,
}

impl Harness {
    /// Create a harness for `config`.
    #[must_use]
    pub const fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Harness configured from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(load_run_config())
    }

    /// Harness using the ambient configuration.
    ///
    /// When nothing is installed yet, the configuration is loaded from the
    /// environment and installed.
    #[must_use]
    pub fn from_global() -> Self {
        let config = global_config().unwrap_or_else(|| {
            let loaded = load_run_config();
            install_global_config(loaded.clone());
            loaded
        });
        Self::new(config)
    }

    /// The configuration this harness runs with.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// A test runner seeded from the configuration.
    ///
    /// Runners built from equal configurations generate identical inputs.
    #[must_use]
    pub fn runner(&self) -> TestRunner {
        TestRunner::new_with_rng(self.config.proptest_config(), self.config.rng())
    }

    /// Check that `test` holds for values drawn from `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::PropertyFailed`] carrying the seed and the
    /// minimal failing input when the property does not hold.
    pub fn check<S, F>(&self, strategy: &S, test: F) -> Result<(), HarnessError>
    where
        S: Strategy,
        F: Fn(S::Value) -> TestCaseResult,
    {
        let mut runner = self.runner();
        runner.run(strategy, test).map_err(|err| {
            tracing::warn!(seed = self.config.seed, error = %err, "property failed");
            HarnessError::property_failed(self.config.seed, err.to_string())
        })
    }

    /// Validity matchers bound to this configuration.
    #[must_use]
    pub fn matchers(&self) -> Matchers {
        Matchers::new(self.clone())
    }

    /// Suppress diagnostics for as long as the returned guard lives.
    pub fn suppress_diagnostics(&self) -> DiagnosticsGuard {
        suppress_diagnostics(&self.config)
    }

    /// Run a test suite under this configuration.
    ///
    /// Installs the configuration as the ambient default and, unless one
    /// exists, a global subscriber at the run's verbosity. Diagnostics are
    /// suppressed for the duration of `suite` and restored afterwards whether
    /// `suite` returns or unwinds.
    pub fn run<R>(&self, suite: impl FnOnce(&Self) -> R) -> R {
        init_tracing(&TracingConfig::for_verbosity(self.config.verbose));
        install_global_config(self.config.clone());
        tracing::info!(
            seed = self.config.seed,
            num_runs = self.config.num_runs,
            environment = %self.config.environment,
            "starting property suite"
        );

        let _diagnostics = self.suppress_diagnostics();
        suite(self)
    }
}
