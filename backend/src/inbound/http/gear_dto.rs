//! Wire shapes for gear and suggestions.
//!
//! Field names are snake_case. `external_gear_id` also accepts `gear_id`,
//! its name in older clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Category, Gear, GearDetails, GearPatch, Suggestion, SuggestionStatus};

/// Complete set of gear fields, used to create gear and suggestions.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct GearPayload {
    /// Display name.
    pub name: String,
    /// Alternative display name.
    pub nickname: String,
    /// Identifier in the external game catalogue.
    #[serde(alias = "gear_id")]
    pub external_gear_id: String,
    /// Thumbnail location.
    pub image_url: String,
    /// Free-text description.
    pub description: String,
    /// Catalogue partition.
    pub category: Category,
}

impl From<GearPayload> for GearDetails {
    fn from(value: GearPayload) -> Self {
        Self {
            name: value.name,
            nickname: value.nickname,
            external_gear_id: value.external_gear_id,
            image_url: value.image_url,
            description: value.description,
            category: value.category,
        }
    }
}

/// Partial gear update. Absent and `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct GearPatchPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default, alias = "gear_id")]
    pub external_gear_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl From<GearPatchPayload> for GearPatch {
    fn from(value: GearPatchPayload) -> Self {
        Self {
            name: value.name,
            nickname: value.nickname,
            external_gear_id: value.external_gear_id,
            image_url: value.image_url,
            description: value.description,
            category: value.category,
        }
    }
}

/// Stored gear.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct GearResponse {
    /// Server-assigned identifier.
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub external_gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: Category,
}

impl From<Gear> for GearResponse {
    fn from(gear: Gear) -> Self {
        let GearDetails {
            name,
            nickname,
            external_gear_id,
            image_url,
            description,
            category,
        } = gear.details;
        Self {
            id: *gear.id.as_uuid(),
            name,
            nickname,
            external_gear_id,
            image_url,
            description,
            category,
        }
    }
}

/// Stored suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SuggestionResponse {
    /// Server-assigned identifier.
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub external_gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: Category,
    /// Lifecycle state.
    pub status: SuggestionStatus,
    /// Submission instant.
    pub created_at: DateTime<Utc>,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(suggestion: Suggestion) -> Self {
        let GearDetails {
            name,
            nickname,
            external_gear_id,
            image_url,
            description,
            category,
        } = suggestion.details;
        Self {
            id: *suggestion.id.as_uuid(),
            name,
            nickname,
            external_gear_id,
            image_url,
            description,
            category,
            status: suggestion.status,
            created_at: suggestion.created_at,
        }
    }
}

/// Confirmation carrying the gear that was created.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GearCreatedResponse {
    pub message: String,
    pub gear: GearResponse,
}

/// Confirmation carrying the new suggestion identifier.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SuggestionCreatedResponse {
    pub message: String,
    pub id: Uuid,
}
