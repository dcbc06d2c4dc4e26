//! Gear catalogue domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{GearCatalog, GearRepository, GearRepositoryError};
use crate::domain::{
    Action, Category, Error, Gear, GearDetails, GearId, GearPatch, Principal, authorize,
};

fn map_repository_error(error: GearRepositoryError) -> Error {
    match error {
        GearRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("gear repository unavailable: {message}"))
        }
        GearRepositoryError::Query { message } => {
            Error::internal(format!("gear repository error: {message}"))
        }
    }
}

fn gear_not_found(id: &GearId) -> Error {
    Error::not_found(format!("gear {id} not found"))
}

/// Catalogue service implementing [`GearCatalog`].
#[derive(Clone)]
pub struct CatalogService<R> {
    gear_repo: Arc<R>,
}

impl<R> CatalogService<R> {
    /// Create a new service over the gear repository.
    pub fn new(gear_repo: Arc<R>) -> Self {
        Self { gear_repo }
    }
}

#[async_trait]
impl<R> GearCatalog for CatalogService<R>
where
    R: GearRepository,
{
    async fn list(&self, category: Option<Category>) -> Result<Vec<Gear>, Error> {
        self.gear_repo
            .list(category)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &GearId) -> Result<Gear, Error> {
        self.gear_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| gear_not_found(id))
    }

    async fn create(&self, actor: &Principal, details: GearDetails) -> Result<Gear, Error> {
        authorize(actor.role, Action::ManageGear)?;
        let gear = Gear::new(details);
        self.gear_repo
            .insert(&gear)
            .await
            .map_err(map_repository_error)?;
        info!(gear_id = %gear.id, by = %actor.username, "gear created");
        Ok(gear)
    }

    async fn update(
        &self,
        actor: &Principal,
        id: &GearId,
        patch: &GearPatch,
    ) -> Result<Gear, Error> {
        authorize(actor.role, Action::ManageGear)?;
        let updated = self
            .gear_repo
            .update(id, patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| gear_not_found(id))?;
        info!(gear_id = %id, by = %actor.username, "gear updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Principal, id: &GearId) -> Result<(), Error> {
        authorize(actor.role, Action::ManageGear)?;
        let removed = self
            .gear_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(gear_not_found(id));
        }
        info!(gear_id = %id, by = %actor.username, "gear deleted");
        Ok(())
    }
}
