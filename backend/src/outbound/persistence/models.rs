//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types and report unreadable enum columns as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Category, Gear, GearDetails, GearId, GearPatch, PasswordHash, Role, Suggestion, SuggestionId,
    User, Username,
};

use super::schema::{gears, suggestions, users};

/// Column text that did not decode to a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unreadable {column} value: {message}")]
pub(crate) struct RowDecodeError {
    column: &'static str,
    message: String,
}

impl RowDecodeError {
    fn new(column: &'static str, error: impl std::fmt::Display) -> Self {
        Self {
            column,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = RowDecodeError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            username: Username::new(&row.username)
                .map_err(|err| RowDecodeError::new("username", err))?,
            password_hash: PasswordHash::new(row.password_hash),
            role: row
                .role
                .parse::<Role>()
                .map_err(|err| RowDecodeError::new("role", err))?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: user.username.as_ref(),
            password_hash: user.password_hash.as_str(),
            role: user.role.as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gears)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GearRow {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub external_gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
}

impl TryFrom<GearRow> for Gear {
    type Error = RowDecodeError;

    fn try_from(row: GearRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: GearId::from_uuid(row.id),
            details: GearDetails {
                name: row.name,
                nickname: row.nickname,
                external_gear_id: row.external_gear_id,
                image_url: row.image_url,
                description: row.description,
                category: parse_category(&row.category)?,
            },
        })
    }
}

fn parse_category(raw: &str) -> Result<Category, RowDecodeError> {
    raw.parse::<Category>()
        .map_err(|err| RowDecodeError::new("category", err))
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gears)]
pub(crate) struct NewGearRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub nickname: &'a str,
    pub external_gear_id: &'a str,
    pub image_url: &'a str,
    pub description: &'a str,
    pub category: &'a str,
}

impl<'a> From<&'a Gear> for NewGearRow<'a> {
    fn from(gear: &'a Gear) -> Self {
        let details = &gear.details;
        Self {
            id: *gear.id.as_uuid(),
            name: &details.name,
            nickname: &details.nickname,
            external_gear_id: &details.external_gear_id,
            image_url: &details.image_url,
            description: &details.description,
            category: details.category.as_str(),
        }
    }
}

/// Partial update; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = gears)]
pub(crate) struct GearChangeset<'a> {
    pub name: Option<&'a str>,
    pub nickname: Option<&'a str>,
    pub external_gear_id: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl<'a> From<&'a GearPatch> for GearChangeset<'a> {
    fn from(patch: &'a GearPatch) -> Self {
        Self {
            name: patch.name.as_deref(),
            nickname: patch.nickname.as_deref(),
            external_gear_id: patch.external_gear_id.as_deref(),
            image_url: patch.image_url.as_deref(),
            description: patch.description.as_deref(),
            category: patch.category.map(Category::as_str),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = suggestions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SuggestionRow {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub external_gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SuggestionRow> for Suggestion {
    type Error = RowDecodeError;

    fn try_from(row: SuggestionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SuggestionId::from_uuid(row.id),
            details: GearDetails {
                name: row.name,
                nickname: row.nickname,
                external_gear_id: row.external_gear_id,
                image_url: row.image_url,
                description: row.description,
                category: parse_category(&row.category)?,
            },
            status: row
                .status
                .parse()
                .map_err(|err| RowDecodeError::new("status", err))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = suggestions)]
pub(crate) struct NewSuggestionRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub nickname: &'a str,
    pub external_gear_id: &'a str,
    pub image_url: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Suggestion> for NewSuggestionRow<'a> {
    fn from(suggestion: &'a Suggestion) -> Self {
        let details = &suggestion.details;
        Self {
            id: *suggestion.id.as_uuid(),
            name: &details.name,
            nickname: &details.nickname,
            external_gear_id: &details.external_gear_id,
            image_url: &details.image_url,
            description: &details.description,
            category: details.category.as_str(),
            status: suggestion.status.as_str(),
            created_at: suggestion.created_at,
        }
    }
}
