//! Shared test utilities for meugrind Rust crates.
//!
//! This crate provides:
//! - Deterministic run configuration loaded from the environment
//! - A seeded property runner and ambient configuration slot
//! - Validity matchers for sync entities
//! - Scoped suppression and in-memory capture of diagnostics
//! - Proptest generators and fixtures for entity data
//!
//! # Example
//!
//! ```
//! use meugrind_test_utils::{Harness, RunConfig, SampleEntity};
//!
//! let harness = Harness::new(RunConfig::default().with_num_runs(10));
//! harness.run(|h| {
//!     h.matchers().is_valid_entity(&SampleEntity::synced().to_json()).assert_pass();
//! });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capture;
pub mod diagnostics;
pub mod entity;
pub mod fixtures;
pub mod generators;
pub mod harness;
pub mod matchers;
pub mod run_config;

pub use capture::{CapturedEvent, DiagnosticCapture};
pub use diagnostics::{
    DiagnosticsGuard, restore_diagnostics, suppress_diagnostics, with_suppressed_diagnostics,
};
pub use entity::{
    EntityRecord, InvalidReason, SyncStatus, Validity, validate_entity, validate_sync_status,
};
pub use fixtures::SampleEntity;
pub use generators::*;
pub use harness::{Harness, InstallOutcome, global_config, install_global_config};
pub use matchers::{
    MatcherResult, Matchers, has_valid_sync_status, install_validity_matchers, is_valid_entity,
    satisfies_property,
};
pub use meugrind_common::HarnessError;
pub use run_config::{RunConfig, load_run_config, load_run_config_from};
