//! Run configuration for deterministic property-based tests.
//!
//! A [`RunConfig`] is built once from the environment at suite start and is
//! immutable afterwards. It drives both case generation (seed, run count)
//! and the assertion helpers (verbosity).

use std::time::Duration;

use meugrind_common::{EnvSource, ProcessEnv, flag_enabled, parse_env_or};
use proptest::test_runner::{Config as ProptestConfig, RngAlgorithm, RngSeed, TestRng};
use serde::{Deserialize, Serialize};

/// Seed used when `FAST_CHECK_SEED` is absent or unparsable.
pub const DEFAULT_SEED: u64 = 42;

/// Run count used when `FAST_CHECK_NUM_RUNS` is absent or unparsable.
pub const DEFAULT_NUM_RUNS: u32 = 100;

/// Time budget forwarded to the property runner.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment marker used when `NODE_ENV` is unset.
pub const TEST_ENVIRONMENT: &str = "test";

/// Environment variables consumed by [`load_run_config`].
pub mod vars {
    /// Environment marker.
    pub const NODE_ENV: &str = "NODE_ENV";
    /// Generation seed.
    pub const SEED: &str = "FAST_CHECK_SEED";
    /// Number of cases per property.
    pub const NUM_RUNS: &str = "FAST_CHECK_NUM_RUNS";
    /// CI indicator, enables verbose reporting.
    pub const CI: &str = "CI";
    /// Explicit verbose flag, also disables diagnostic suppression.
    pub const VERBOSE: &str = "VERBOSE";
}

/// Process-wide settings for randomized test execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Seed fixing the sequence of generated inputs
    pub seed: u64,
    /// Successful cases required per property
    pub num_runs: u32,
    /// Verbose failure reporting (CI or explicit override)
    pub verbose: bool,
    /// Time budget forwarded to the property runner
    pub timeout: Duration,
    /// Set only by `VERBOSE=true`; keeps diagnostics visible
    pub verbose_override: bool,
    /// Value of `NODE_ENV`, or [`TEST_ENVIRONMENT`] when unset
    pub environment: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            num_runs: DEFAULT_NUM_RUNS,
            verbose: false,
            timeout: DEFAULT_TIMEOUT,
            verbose_override: false,
            environment: TEST_ENVIRONMENT.to_string(),
        }
    }
}

impl RunConfig {
    /// Set the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of runs.
    #[must_use]
    pub const fn with_num_runs(mut self, num_runs: u32) -> Self {
        self.num_runs = num_runs;
        self
    }

    /// Enable verbose reporting and keep diagnostics visible.
    #[must_use]
    pub const fn with_verbose_override(mut self) -> Self {
        self.verbose = true;
        self.verbose_override = true;
        self
    }

    /// Whether diagnostic output should be suppressed during the run.
    #[must_use]
    pub const fn suppresses_diagnostics(&self) -> bool {
        !self.verbose_override
    }

    /// Timeout in whole milliseconds, saturating at `u32::MAX`.
    #[must_use]
    pub fn timeout_ms(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }

    /// Build the proptest configuration for this run.
    ///
    /// The timeout bounds shrinking rather than individual cases: a per-case
    /// timeout makes proptest fork, which runners built outside the
    /// `proptest!` macro cannot do. Generation is seeded from
    /// [`RunConfig::seed`] and failure persistence is disabled; a failing run
    /// is reproduced from the seed, not from a regression file.
    #[must_use]
    pub fn proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.num_runs,
            rng_algorithm: RngAlgorithm::ChaCha,
            rng_seed: RngSeed::Fixed(self.seed),
            max_shrink_time: self.timeout_ms(),
            timeout: 0,
            fork: false,
            verbose: u32::from(self.verbose),
            failure_persistence: None,
            ..ProptestConfig::default()
        }
    }

    /// Deterministic generator seeded from [`RunConfig::seed`].
    #[must_use]
    pub fn rng(&self) -> TestRng {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        TestRng::from_seed(RngAlgorithm::ChaCha, &bytes)
    }
}

/// Load the run configuration from the process environment.
///
/// Malformed values silently degrade to their defaults.
#[must_use]
pub fn load_run_config() -> RunConfig {
    load_run_config_from(&ProcessEnv)
}

/// Load the run configuration from an arbitrary environment source.
#[must_use]
pub fn load_run_config_from<E: EnvSource + ?Sized>(env: &E) -> RunConfig {
    let verbose_override = flag_enabled(env, vars::VERBOSE);

    RunConfig {
        seed: parse_env_or(env, vars::SEED, DEFAULT_SEED),
        num_runs: parse_env_or(env, vars::NUM_RUNS, DEFAULT_NUM_RUNS),
        verbose: flag_enabled(env, vars::CI) || verbose_override,
        timeout: DEFAULT_TIMEOUT,
        verbose_override,
        environment: env
            .var(vars::NODE_ENV)
            .unwrap_or_else(|| TEST_ENVIRONMENT.to_string()),
    }
}
