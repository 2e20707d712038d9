//! Validity matchers for test assertions.
//!
//! Each matcher returns a [`MatcherResult`] instead of panicking, so callers
//! choose between asserting, negating, or inspecting the message.

use std::fmt::Debug;

use meugrind_common::HarnessError;
use proptest::strategy::Just;
use proptest::test_runner::{Config as ProptestConfig, TestCaseError, TestRunner};
use serde_json::Value;

use crate::entity::{Validity, validate_entity, validate_sync_status};
use crate::harness::Harness;

/// Name of the fixed-value property matcher.
pub const SATISFIES_PROPERTY: &str = "satisfies_property";
/// Name of the entity shape matcher.
pub const IS_VALID_ENTITY: &str = "is_valid_entity";
/// Name of the sync status matcher.
pub const HAS_VALID_SYNC_STATUS: &str = "has_valid_sync_status";

/// Outcome of a matcher, with the message to show on failure (or on
/// success, when the assertion was negated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherResult {
    pass: bool,
    message: String,
}

impl MatcherResult {
    /// A passing result.
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            pass: true,
            message: message.into(),
        }
    }

    /// A failing result.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
        }
    }

    /// Whether the matcher passed.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.pass
    }

    /// Diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::AssertionEvaluation`] with the message when the
    /// matcher failed.
    pub fn into_result(self) -> Result<(), HarnessError> {
        if self.pass {
            Ok(())
        } else {
            Err(HarnessError::assertion_evaluation(self.message))
        }
    }

    /// Panic with the diagnostic message unless the matcher passed.
    #[track_caller]
    pub fn assert_pass(self) {
        assert!(self.pass, "{}", self.message);
    }

    /// Panic with the diagnostic message if the matcher passed.
    #[track_caller]
    pub fn assert_fail(self) {
        assert!(!self.pass, "{}", self.message);
    }

    fn from_validity(validity: &Validity, received: &Value, expected: &str) -> Self {
        match validity {
            Validity::Valid => Self::pass(format!("expected {received} not to be {expected}")),
            Validity::Invalid(reason) => {
                Self::fail(format!("expected {received} to be {expected}: {reason}"))
            }
        }
    }
}

/// The three validity matchers, bound to a run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchers {
    harness: Harness,
}

impl Matchers {
    /// Registered matcher names.
    pub const NAMES: [&'static str; 3] = [SATISFIES_PROPERTY, IS_VALID_ENTITY, HAS_VALID_SYNC_STATUS];

    /// Bind matchers to `harness`.
    #[must_use]
    pub const fn new(harness: Harness) -> Self {
        Self { harness }
    }

    /// Whether `name` is a registered matcher.
    #[must_use]
    pub fn contains(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    /// Evaluate `predicate` against the single value `value`.
    ///
    /// The value is not varied: the runner draws it from a constant
    /// strategy for the configured number of runs, and at least once. A
    /// predicate that returns false or panics yields a failed result.
    pub fn satisfies_property<T, F>(&self, value: T, predicate: F) -> MatcherResult
    where
        T: Clone + Debug,
        F: Fn(&T) -> bool,
    {
        let shown = format!("{value:?}");
        let config = self.harness.config();
        let mut runner = TestRunner::new_with_rng(
            ProptestConfig {
                cases: config.num_runs.max(1),
                ..config.proptest_config()
            },
            config.rng(),
        );

        let outcome = runner.run(&Just(value), |candidate| {
            if predicate(&candidate) {
                Ok(())
            } else {
                Err(TestCaseError::fail("predicate returned false"))
            }
        });

        match outcome {
            Ok(()) => MatcherResult::pass(format!("expected {shown} not to satisfy the property")),
            Err(err) => {
                tracing::debug!(value = %shown, error = %err, "property matcher failed");
                MatcherResult::fail(format!("expected {shown} to satisfy the property: {err}"))
            }
        }
    }

    /// Check the entity shape of `value`.
    #[must_use]
    pub fn is_valid_entity(&self, value: &Value) -> MatcherResult {
        is_valid_entity(value)
    }

    /// Check the `syncStatus` field of `value`.
    #[must_use]
    pub fn has_valid_sync_status(&self, value: &Value) -> MatcherResult {
        has_valid_sync_status(value)
    }
}

/// Matchers bound to the ambient configuration.
#[must_use]
pub fn install_validity_matchers() -> Matchers {
    Harness::from_global().matchers()
}

/// Evaluate `predicate` against `value` under the ambient configuration.
pub fn satisfies_property<T, F>(value: T, predicate: F) -> MatcherResult
where
    T: Clone + Debug,
    F: Fn(&T) -> bool,
{
    install_validity_matchers().satisfies_property(value, predicate)
}

/// Passes iff `value` has a non-empty string `id`, date-valued `createdAt`
/// and `updatedAt`, and a `syncStatus` of synced, pending or conflict.
#[must_use]
pub fn is_valid_entity(value: &Value) -> MatcherResult {
    MatcherResult::from_validity(&validate_entity(value), value, "a valid entity")
}

/// Passes iff `value.syncStatus` is synced, pending or conflict.
#[must_use]
pub fn has_valid_sync_status(value: &Value) -> MatcherResult {
    MatcherResult::from_validity(
        &validate_sync_status(value),
        value,
        "an entity with a valid sync status",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_config::RunConfig;
    use serde_json::json;

    fn matchers() -> Matchers {
        Harness::new(RunConfig::default().with_num_runs(3)).matchers()
    }

    #[test]
    fn test_satisfies_property_pass_and_fail() {
        let m = matchers();
        m.satisfies_property(4, |n| n % 2 == 0).assert_pass();

        let result = m.satisfies_property(5, |n| n % 2 == 0);
        assert!(!result.is_pass());
        assert!(result.message().contains("expected 5 to satisfy the property"));
    }

    #[test]
    fn test_satisfies_property_evaluates_with_zero_runs() {
        let m = Harness::new(RunConfig::default().with_num_runs(0)).matchers();
        let result = m.satisfies_property(5, |n| n % 2 == 0);
        assert!(!result.is_pass());
        assert!(result.message().contains("expected 5 to satisfy the property"));

        m.satisfies_property(6, |n| n % 2 == 0).assert_pass();
    }

    #[test]
    fn test_satisfies_property_catches_panics() {
        let result = matchers().satisfies_property("abc".to_string(), |s| {
            assert!(s.is_empty(), "boom");
            true
        });
        assert!(!result.is_pass());
        assert!(result.clone().into_result().is_err());
    }

    #[test]
    fn test_entity_matchers() {
        let valid = json!({
            "id": "a",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
            "syncStatus": "synced",
        });
        is_valid_entity(&valid).assert_pass();

        let mut archived = valid.clone();
        archived["syncStatus"] = json!("archived");
        let result = is_valid_entity(&archived);
        result.clone().assert_fail();
        assert!(result.message().contains("archived"));
    }

    #[test]
    fn test_sync_status_matcher() {
        for status in ["synced", "pending", "conflict"] {
            has_valid_sync_status(&json!({ "syncStatus": status })).assert_pass();
        }
        has_valid_sync_status(&json!({ "syncStatus": "unknown" })).assert_fail();
    }

    #[test]
    fn test_registered_names() {
        assert!(Matchers::contains("is_valid_entity"));
        assert!(Matchers::contains("satisfies_property"));
        assert!(!Matchers::contains("is_archived"));
    }

    #[test]
    fn test_into_result_message() {
        let err = MatcherResult::fail("nope").into_result().unwrap_err();
        assert_eq!(err, HarnessError::AssertionEvaluation("nope".to_string()));
        assert!(MatcherResult::pass("fine").into_result().is_ok());
    }
}
