//! Community suggestions and their one-way decision lifecycle.
//!
//! A suggestion starts `pending` and moves exactly once, to `approved` or
//! `rejected`. Approval carries the gear that the store must insert in the
//! same atomic step as the status change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Gear, GearDetails};

/// Store-assigned suggestion identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionId(Uuid);

impl SuggestionId {
    /// Allocate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SuggestionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle state of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Awaiting a decision.
    Pending,
    /// Promoted into the catalogue.
    Approved,
    /// Declined.
    Rejected,
}

impl SuggestionStatus {
    /// Storage spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Terminal states admit no further transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown suggestion status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for SuggestionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Stored suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Store-assigned identifier.
    pub id: SuggestionId,
    /// Proposed gear fields.
    pub details: GearDetails,
    /// Lifecycle state.
    pub status: SuggestionStatus,
    /// Submission instant.
    pub created_at: DateTime<Utc>,
}

impl Suggestion {
    /// Build a fresh pending suggestion.
    #[must_use]
    pub fn submit(details: GearDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id: SuggestionId::random(),
            details,
            status: SuggestionStatus::Pending,
            created_at,
        }
    }

    /// Value copy of the proposal as a new catalogue entry.
    ///
    /// The gear receives its own identifier, unrelated to the suggestion's.
    #[must_use]
    pub fn to_gear(&self) -> Gear {
        Gear::new(self.details.clone())
    }
}

/// Decision applied to a pending suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Mark approved and insert `gear` atomically.
    Approve {
        /// Gear to insert alongside the status change.
        gear: Gear,
    },
    /// Mark rejected; nothing is inserted.
    Reject,
}

impl Decision {
    /// Status the suggestion ends in when the decision applies.
    #[must_use]
    pub const fn target_status(&self) -> SuggestionStatus {
        match self {
            Self::Approve { .. } => SuggestionStatus::Approved,
            Self::Reject => SuggestionStatus::Rejected,
        }
    }
}

/// Store-level result of applying a [`Decision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The suggestion was pending and now carries the target status.
    Applied,
    /// No suggestion has the given identifier.
    NotFound,
    /// The suggestion had already been decided; nothing changed.
    AlreadyDecided(SuggestionStatus),
}
