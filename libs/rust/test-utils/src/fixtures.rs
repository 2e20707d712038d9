//! Test fixtures with sample data.
//!
//! This module provides pre-built entities for use in tests.

use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};

use crate::entity::{EntityRecord, SyncStatus};

/// Sample entities for assertions.
#[derive(Debug, Clone, Copy)]
pub struct SampleEntity;

impl SampleEntity {
    /// An entity in `status`, created an hour ago and updated now.
    #[must_use]
    pub fn with_status(id: &str, status: SyncStatus) -> EntityRecord {
        let now = Utc::now();
        EntityRecord {
            id: id.to_string(),
            created_at: now - TimeDelta::hours(1),
            updated_at: now,
            sync_status: status,
        }
    }

    /// A fully replicated entity.
    #[must_use]
    pub fn synced() -> EntityRecord {
        Self::with_status("entity-synced-001", SyncStatus::Synced)
    }

    /// An entity with local changes awaiting replication.
    #[must_use]
    pub fn pending() -> EntityRecord {
        Self::with_status("entity-pending-001", SyncStatus::Pending)
    }

    /// An entity whose copies diverged.
    #[must_use]
    pub fn conflict() -> EntityRecord {
        Self::with_status("entity-conflict-001", SyncStatus::Conflict)
    }

    /// JSON entity with a status outside the accepted set.
    #[must_use]
    pub fn archived_json() -> Value {
        let mut value = Self::synced().to_json();
        value["syncStatus"] = json!("archived");
        value
    }

    /// JSON entity with an empty identifier.
    #[must_use]
    pub fn empty_id_json() -> Value {
        let mut value = Self::synced().to_json();
        value["id"] = json!("");
        value
    }
}
