//! PostgreSQL-backed `GearRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GearRepository, GearRepositoryError};
use crate::domain::{Category, Gear, GearId, GearPatch};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{GearChangeset, GearRow, NewGearRow, RowDecodeError};
use super::pool::{DbPool, PoolError};
use super::schema::gears;

/// Diesel-backed catalogue store.
#[derive(Clone)]
pub struct DieselGearRepository {
    pool: DbPool,
}

impl DieselGearRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> GearRepositoryError {
    map_pool_error(error, GearRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> GearRepositoryError {
    map_diesel_error(
        error,
        GearRepositoryError::query,
        GearRepositoryError::connection,
    )
}

fn decode_error(error: RowDecodeError) -> GearRepositoryError {
    GearRepositoryError::query(error.to_string())
}

#[async_trait]
impl GearRepository for DieselGearRepository {
    async fn list(&self, category: Option<Category>) -> Result<Vec<Gear>, GearRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = gears::table
            .select(GearRow::as_select())
            .order((gears::name.asc(), gears::id.asc()))
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(gears::category.eq(category.as_str()));
        }
        let rows = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter()
            .map(Gear::try_from)
            .collect::<Result<_, _>>()
            .map_err(decode_error)
    }

    async fn find_by_id(&self, id: &GearId) -> Result<Option<Gear>, GearRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = gears::table
            .find(id.as_uuid())
            .select(GearRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(Gear::try_from).transpose().map_err(decode_error)
    }

    async fn insert(&self, gear: &Gear) -> Result<(), GearRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(gears::table)
            .values(NewGearRow::from(gear))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(
        &self,
        id: &GearId,
        patch: &GearPatch,
    ) -> Result<Option<Gear>, GearRepositoryError> {
        if patch.is_empty() {
            // Diesel refuses empty changesets.
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::update(gears::table.find(id.as_uuid()))
            .set(GearChangeset::from(patch))
            .returning(GearRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(Gear::try_from).transpose().map_err(decode_error)
    }

    async fn delete(&self, id: &GearId) -> Result<bool, GearRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(gears::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn count(&self) -> Result<u64, GearRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = gears::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        u64::try_from(total).map_err(|err| GearRepositoryError::query(err.to_string()))
    }
}
