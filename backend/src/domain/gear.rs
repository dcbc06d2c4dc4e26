//! Catalogue items and their categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Store-assigned gear identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GearId(Uuid);

impl GearId {
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

impl fmt::Display for GearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GearId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Closed set of catalogue partitions.
///
/// Legacy French spellings are accepted on input.
///
/// # Examples
/// ```
/// use gear_catalog::domain::Category;
///
/// assert_eq!("evenements".parse::<Category>(), Ok(Category::Events));
/// assert_eq!(Category::Events.as_str(), "events");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Gear available to every player.
    #[serde(alias = "joueurs")]
    Players,
    /// Staff-only gear.
    #[serde(alias = "moderateur")]
    Moderator,
    /// Event rewards.
    #[serde(alias = "evenements")]
    Events,
    /// Banned items kept for reference.
    #[serde(alias = "interdits")]
    Forbidden,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 4] = [Self::Players, Self::Moderator, Self::Events, Self::Forbidden];

    /// Canonical wire and storage spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Moderator => "moderator",
            Self::Events => "events",
            Self::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "players" | "joueurs" => Ok(Self::Players),
            "moderator" | "moderateur" => Ok(Self::Moderator),
            "events" | "evenements" => Ok(Self::Events),
            "forbidden" | "interdits" => Ok(Self::Forbidden),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Descriptive fields shared by gear and suggestions.
///
/// Text is stored verbatim; no trimming or normalisation happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearDetails {
    /// Display name.
    pub name: String,
    /// Alternative display name.
    pub nickname: String,
    /// Opaque identifier in the external game catalogue.
    pub external_gear_id: String,
    /// Thumbnail location.
    pub image_url: String,
    /// Free-text description.
    pub description: String,
    /// Catalogue partition.
    pub category: Category,
}

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gear {
    /// Store-assigned identifier.
    pub id: GearId,
    /// Descriptive fields.
    pub details: GearDetails,
}

impl Gear {
    /// Create a gear record with a fresh identifier.
    #[must_use]
    pub fn new(details: GearDetails) -> Self {
        Self {
            id: GearId::random(),
            details,
        }
    }
}

/// Partial update: only populated fields overwrite the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GearPatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement nickname.
    pub nickname: Option<String>,
    /// Replacement external identifier.
    pub external_gear_id: Option<String>,
    /// Replacement thumbnail location.
    pub image_url: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement category.
    pub category: Option<Category>,
}

impl GearPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.nickname.is_none()
            && self.external_gear_id.is_none()
            && self.image_url.is_none()
            && self.description.is_none()
            && self.category.is_none()
    }

    /// Merge the populated fields into `details`.
    pub fn apply(&self, details: &mut GearDetails) {
        fn merge(slot: &mut String, value: Option<&String>) {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }

        merge(&mut details.name, self.name.as_ref());
        merge(&mut details.nickname, self.nickname.as_ref());
        merge(&mut details.external_gear_id, self.external_gear_id.as_ref());
        merge(&mut details.image_url, self.image_url.as_ref());
        merge(&mut details.description, self.description.as_ref());
        if let Some(category) = self.category {
            details.category = category;
        }
    }
}
