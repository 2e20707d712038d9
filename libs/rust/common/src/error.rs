//! Centralized error types for the test harness libraries.
//!
//! Every failure the harness can observe is classified as either recovered
//! locally (degraded to a default or a failed assertion) or as a verdict
//! that the calling test must report.

use thiserror::Error;

/// Common error type for harness operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// An environment value could not be parsed
    #[error("Failed to parse environment variable {name}={value:?}: {reason}")]
    ConfigParse {
        /// Variable name
        name: String,
        /// Raw value as read from the environment
        value: String,
        /// Parser message
        reason: String,
    },

    /// A predicate failed or panicked while being evaluated
    #[error("Assertion evaluation failed: {0}")]
    AssertionEvaluation(String),

    /// A property did not hold for a generated input
    #[error("Property failed (seed {seed}): {message}. Reproduce with FAST_CHECK_SEED={seed}")]
    PropertyFailed {
        /// Seed the failing run was generated from
        seed: u64,
        /// Failure description including the minimal input
        message: String,
    },
}

impl HarnessError {
    /// Check if this error is recovered locally.
    ///
    /// Recoverable errors never surface as faults: parse failures degrade
    /// to defaults and evaluation failures become failed assertions.
    ///
    /// # Examples
    ///
    /// ```
    /// use meugrind_common::HarnessError;
    ///
    /// let err = HarnessError::AssertionEvaluation("boom".to_string());
    /// assert!(err.is_recoverable());
    ///
    /// let err = HarnessError::PropertyFailed { seed: 42, message: "x".to_string() };
    /// assert!(!err.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse { .. } | Self::AssertionEvaluation(_)
        )
    }

    /// Create a config parse error.
    #[must_use]
    pub fn config_parse(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ConfigParse {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an assertion evaluation error with the given message.
    #[must_use]
    pub fn assertion_evaluation(msg: impl Into<String>) -> Self {
        Self::AssertionEvaluation(msg.into())
    }

    /// Create a property failure for the given seed.
    #[must_use]
    pub fn property_failed(seed: u64, msg: impl Into<String>) -> Self {
        Self::PropertyFailed {
            seed,
            message: msg.into(),
        }
    }
}
