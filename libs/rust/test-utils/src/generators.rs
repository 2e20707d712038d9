//! Shared proptest generators for entity-shaped test data.
//!
//! This module provides reusable generators for the sync domain types
//! validated by the matchers.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use serde_json::Value;

use crate::entity::{EntityRecord, SyncStatus};

/// Upper bound for generated timestamps (2100-01-01T00:00:00Z).
const MAX_TIMESTAMP_MILLIS: i64 = 4_102_444_800_000;

/// Generate accepted sync statuses.
pub fn sync_status_strategy() -> impl Strategy<Value = SyncStatus> {
    prop_oneof![
        Just(SyncStatus::Synced),
        Just(SyncStatus::Pending),
        Just(SyncStatus::Conflict),
    ]
}

/// Generate status strings outside {synced, pending, conflict}.
pub fn invalid_sync_status_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_]{0,16}".prop_filter("must not be an accepted status", |s| {
        s.parse::<SyncStatus>().is_err()
    })
}

/// Generate non-empty entity identifiers.
pub fn entity_id_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,35}"
}

/// Generate UTC timestamps with millisecond precision.
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..MAX_TIMESTAMP_MILLIS)
        .prop_filter_map("timestamp out of range", DateTime::<Utc>::from_timestamp_millis)
}

/// Generate valid typed entities, `updated_at` never before `created_at`.
pub fn entity_record_strategy() -> impl Strategy<Value = EntityRecord> {
    (
        entity_id_strategy(),
        timestamp_strategy(),
        0i64..86_400_000,
        sync_status_strategy(),
    )
        .prop_map(|(id, created_at, delta_ms, sync_status)| {
            let updated_at = created_at + chrono::TimeDelta::milliseconds(delta_ms);
            EntityRecord {
                id,
                created_at,
                updated_at,
                sync_status,
            }
        })
}

/// Generate valid entities in their JSON form.
pub fn entity_json_strategy() -> impl Strategy<Value = Value> {
    entity_record_strategy().prop_map(|record| record.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_invalid_status_never_accepted() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let value = invalid_sync_status_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(!["synced", "pending", "conflict"].contains(&value.as_str()));
        }
    }

    #[test]
    fn test_entity_ids_non_empty() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let value = entity_id_strategy().new_tree(&mut runner).unwrap().current();
            assert!(!value.is_empty());
            assert!(value.len() <= 36);
        }
    }

    #[test]
    fn test_record_timestamps_ordered() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let record = entity_record_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(record.updated_at >= record.created_at);
        }
    }
}
