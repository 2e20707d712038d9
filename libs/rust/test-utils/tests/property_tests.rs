//! Property-based tests for the meugrind test harness.
//!
//! Runs under the harness's own configuration: `FAST_CHECK_SEED` and
//! `FAST_CHECK_NUM_RUNS` apply here too.

use meugrind_common::env_vars;
use meugrind_test_utils::*;
use proptest::prelude::*;
use proptest::strategy::ValueTree;

proptest! {
    #![proptest_config(load_run_config().proptest_config())]

    /// Absent or malformed seeds always resolve to 42.
    #[test]
    fn prop_malformed_seed_defaults(raw in prop::option::of("[^0-9]{0,12}")) {
        let pairs = raw.map(|r| vec![("FAST_CHECK_SEED", r)]).unwrap_or_default();
        prop_assert_eq!(load_run_config_from(&env_vars(pairs)).seed, 42);
    }

    /// Absent or malformed run counts always resolve to 100.
    #[test]
    fn prop_malformed_num_runs_defaults(raw in prop::option::of("[^0-9]{0,12}")) {
        let pairs = raw.map(|r| vec![("FAST_CHECK_NUM_RUNS", r)]).unwrap_or_default();
        prop_assert_eq!(load_run_config_from(&env_vars(pairs)).num_runs, 100);
    }

    /// Well-formed overrides are taken as-is.
    #[test]
    fn prop_numeric_overrides_applied(seed in any::<u64>(), runs in any::<u32>()) {
        let config = load_run_config_from(&env_vars(vec![
            ("FAST_CHECK_SEED", seed.to_string()),
            ("FAST_CHECK_NUM_RUNS", runs.to_string()),
        ]));
        prop_assert_eq!(config.seed, seed);
        prop_assert_eq!(config.num_runs, runs);
    }

    /// Verbose iff CI or VERBOSE is the literal "true"; only VERBOSE keeps
    /// diagnostics visible.
    #[test]
    fn prop_verbose_flags(
        ci in prop_oneof![Just("true".to_string()), "[a-z]{0,5}"],
        verbose in prop_oneof![Just("true".to_string()), "[a-z]{0,5}"],
    ) {
        let ci_on = ci == "true";
        let verbose_on = verbose == "true";
        let config = load_run_config_from(&env_vars(vec![("CI", ci), ("VERBOSE", verbose)]));

        prop_assert_eq!(config.verbose, ci_on || verbose_on);
        prop_assert_eq!(config.suppresses_diagnostics(), !verbose_on);
    }

    /// Generated entities are always accepted, typed or as JSON.
    #[test]
    fn prop_generated_entities_valid(record in entity_record_strategy()) {
        prop_assert!(record.validate().is_valid());
        prop_assert!(is_valid_entity(&record.to_json()).is_pass());
        prop_assert!(has_valid_sync_status(&record.to_json()).is_pass());
    }

    /// Any status outside the accepted set rejects the whole entity.
    #[test]
    fn prop_invalid_status_rejected(
        mut value in entity_json_strategy(),
        status in invalid_sync_status_strategy(),
    ) {
        value["syncStatus"] = serde_json::Value::String(status.clone());

        prop_assert!(!is_valid_entity(&value).is_pass());
        prop_assert!(!has_valid_sync_status(&value).is_pass());
        prop_assert_eq!(
            validate_entity(&value),
            Validity::Invalid(InvalidReason::UnknownSyncStatus(status))
        );
    }

    /// Status parsing agrees with the wire representation.
    #[test]
    fn prop_sync_status_round_trip(status in sync_status_strategy()) {
        prop_assert_eq!(status.as_str().parse::<SyncStatus>(), Ok(status));
    }

    /// Equal seeds yield equal runs.
    #[test]
    fn prop_seed_determines_sequence(seed in any::<u64>()) {
        let config = RunConfig::default().with_seed(seed).with_num_runs(5);
        let draw = |c: &RunConfig| {
            let mut runner = Harness::new(c.clone()).runner();
            (0..5)
                .map(|_| {
                    any::<u64>()
                        .new_tree(&mut runner)
                        .map(|tree| tree.current())
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(draw(&config), draw(&config));
    }
}

#[test]
fn test_sync_status_examples() {
    for status in ["synced", "pending", "conflict"] {
        has_valid_sync_status(&serde_json::json!({ "syncStatus": status })).assert_pass();
    }
    has_valid_sync_status(&serde_json::json!({ "syncStatus": "unknown" })).assert_fail();
}

#[test]
fn test_entity_examples() {
    is_valid_entity(&SampleEntity::synced().to_json()).assert_pass();
    is_valid_entity(&SampleEntity::archived_json()).assert_fail();
}

#[test]
fn test_suppression_survives_failing_test() {
    let capture = DiagnosticCapture::new();
    let _outer = capture.set_default();
    let config = RunConfig::default();

    let guard = suppress_diagnostics(&config);
    let failed = std::panic::catch_unwind(|| {
        tracing::warn!("suppressed warning");
        panic!("deliberate failure");
    });
    restore_diagnostics(guard);

    assert!(failed.is_err());
    assert_eq!(capture.count(), 0);

    tracing::info!("restored output");
    assert_eq!(capture.messages(), vec!["restored output".to_string()]);
}

#[test]
fn test_harness_check_with_generated_entities() -> anyhow::Result<()> {
    let harness = Harness::new(RunConfig::default().with_num_runs(25));
    harness.check(&entity_json_strategy(), |value| {
        prop_assert!(validate_entity(&value).is_valid());
        Ok(())
    })?;
    harness.matchers().is_valid_entity(&SampleEntity::pending().to_json()).into_result()?;
    Ok(())
}
