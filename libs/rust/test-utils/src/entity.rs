//! Replicated entity shape and its validity checks.
//!
//! Entities flowing through sync code carry an identifier, two timestamps
//! and a [`SyncStatus`]. Candidates arrive either typed ([`EntityRecord`])
//! or as loosely shaped JSON; both are checked into a tagged [`Validity`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Replication state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Local and remote copies agree
    Synced,
    /// Local changes not yet replicated
    Pending,
    /// Local and remote copies diverged
    Conflict,
}

impl SyncStatus {
    /// Every accepted status.
    pub const ALL: [Self; 3] = [Self::Synced, Self::Pending, Self::Conflict];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::Pending => "pending",
            Self::Conflict => "conflict",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = InvalidReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidReason::UnknownSyncStatus(s.to_string()))
    }
}

/// Why a candidate entity was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Candidate is not an object
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),

    /// Required field absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Identifier is not a string
    #[error("`id` must be a string")]
    IdNotString,

    /// Identifier is the empty string
    #[error("`id` must not be empty")]
    EmptyId,

    /// Timestamp is not a valid date
    #[error("`{field}` is not a valid date")]
    InvalidTimestamp {
        /// Offending field
        field: &'static str,
    },

    /// Status outside {synced, pending, conflict}
    #[error("unknown sync status {0:?}")]
    UnknownSyncStatus(String),
}

/// Outcome of a validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// Candidate accepted
    Valid,
    /// Candidate rejected
    Invalid(InvalidReason),
}

impl Validity {
    /// Whether the candidate was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Rejection reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<&InvalidReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

impl<T> From<Result<T, InvalidReason>> for Validity {
    fn from(result: Result<T, InvalidReason>) -> Self {
        match result {
            Ok(_) => Self::Valid,
            Err(reason) => Self::Invalid(reason),
        }
    }
}

/// Typed entity shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    /// Stable identifier, never empty
    pub id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Replication state
    pub sync_status: SyncStatus,
}

impl EntityRecord {
    /// Create a record with both timestamps set to `at`.
    #[must_use]
    pub fn new(id: impl Into<String>, at: DateTime<Utc>, sync_status: SyncStatus) -> Self {
        Self {
            id: id.into(),
            created_at: at,
            updated_at: at,
            sync_status,
        }
    }

    /// Check the invariants the type system does not enforce.
    #[must_use]
    pub fn validate(&self) -> Validity {
        if self.id.is_empty() {
            Validity::Invalid(InvalidReason::EmptyId)
        } else {
            Validity::Valid
        }
    }

    /// JSON form with RFC 3339 timestamps.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "createdAt": self.created_at.to_rfc3339(),
            "updatedAt": self.updated_at.to_rfc3339(),
            "syncStatus": self.sync_status.as_str(),
        })
    }
}

impl TryFrom<&Value> for EntityRecord {
    type Error = InvalidReason;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let object = value
            .as_object()
            .ok_or_else(|| InvalidReason::NotAnObject(kind(value)))?;

        let id = match object.get("id") {
            None | Some(Value::Null) => return Err(InvalidReason::MissingField("id")),
            Some(Value::String(id)) if id.is_empty() => return Err(InvalidReason::EmptyId),
            Some(Value::String(id)) => id.clone(),
            Some(_) => return Err(InvalidReason::IdNotString),
        };

        Ok(Self {
            id,
            created_at: timestamp_field(value, "createdAt")?,
            updated_at: timestamp_field(value, "updatedAt")?,
            sync_status: sync_status_field(value)?,
        })
    }
}

/// Validate a JSON candidate against the entity shape.
///
/// Accepts objects with a non-empty string `id`, date-valued `createdAt`
/// and `updatedAt` (RFC 3339 strings or epoch milliseconds) and a
/// `syncStatus` of `synced`, `pending` or `conflict`.
#[must_use]
pub fn validate_entity(value: &Value) -> Validity {
    EntityRecord::try_from(value).into()
}

/// Validate only the `syncStatus` field of a JSON candidate.
#[must_use]
pub fn validate_sync_status(value: &Value) -> Validity {
    if !value.is_object() {
        return Validity::Invalid(InvalidReason::NotAnObject(kind(value)));
    }
    sync_status_field(value).into()
}

fn sync_status_field(value: &Value) -> Result<SyncStatus, InvalidReason> {
    match value.get("syncStatus") {
        None | Some(Value::Null) => Err(InvalidReason::MissingField("syncStatus")),
        Some(Value::String(status)) => status.parse(),
        Some(other) => Err(InvalidReason::UnknownSyncStatus(other.to_string())),
    }
}

fn timestamp_field(value: &Value, field: &'static str) -> Result<DateTime<Utc>, InvalidReason> {
    match value.get(field) {
        None | Some(Value::Null) => Err(InvalidReason::MissingField(field)),
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| InvalidReason::InvalidTimestamp { field }),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or(InvalidReason::InvalidTimestamp { field }),
        Some(_) => Err(InvalidReason::InvalidTimestamp { field }),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
