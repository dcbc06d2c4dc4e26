//! Port for catalogue persistence.

use async_trait::async_trait;

use crate::domain::{Category, Gear, GearId, GearPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue store adapters.
    pub enum GearRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "gear repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "gear repository query failed: {message}",
    }
}

/// Persistence contract for catalogue entries.
///
/// Each operation touches a single record; no cross-record transactions are
/// implied.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GearRepository: Send + Sync {
    /// All gear, optionally restricted to one category. Order is unspecified.
    async fn list(&self, category: Option<Category>) -> Result<Vec<Gear>, GearRepositoryError>;

    /// Fetch a single entry.
    async fn find_by_id(&self, id: &GearId) -> Result<Option<Gear>, GearRepositoryError>;

    /// Persist a new entry.
    async fn insert(&self, gear: &Gear) -> Result<(), GearRepositoryError>;

    /// Merge `patch` into the stored entry and return the result.
    ///
    /// Returns `None` when no entry has the identifier.
    async fn update(
        &self,
        id: &GearId,
        patch: &GearPatch,
    ) -> Result<Option<Gear>, GearRepositoryError>;

    /// Remove an entry. Returns `false` when nothing matched.
    async fn delete(&self, id: &GearId) -> Result<bool, GearRepositoryError>;

    /// Number of stored entries.
    async fn count(&self) -> Result<u64, GearRepositoryError>;
}
