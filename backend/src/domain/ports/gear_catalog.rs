//! Driving port for catalogue reads and curation.

use async_trait::async_trait;

use crate::domain::{Category, Error, Gear, GearDetails, GearId, GearPatch, Principal};

/// Domain use-case port for the gear catalogue.
///
/// Reads are public. Mutations take the acting principal and require the
/// `ManageGear` grant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GearCatalog: Send + Sync {
    /// All gear, optionally in one category.
    async fn list(&self, category: Option<Category>) -> Result<Vec<Gear>, Error>;

    /// One entry, or `not_found`.
    async fn get(&self, id: &GearId) -> Result<Gear, Error>;

    /// Create an entry with a fresh identifier.
    async fn create(&self, actor: &Principal, details: GearDetails) -> Result<Gear, Error>;

    /// Merge the supplied fields into an existing entry.
    async fn update(&self, actor: &Principal, id: &GearId, patch: &GearPatch)
        -> Result<Gear, Error>;

    /// Remove an entry.
    async fn delete(&self, actor: &Principal, id: &GearId) -> Result<(), Error>;
}
