//! PostgreSQL-backed `SuggestionRepository`.
//!
//! `decide` runs a conditional status update and, for approvals, the gear
//! insert in one transaction. The `status = 'pending'` predicate on the
//! update is what serialises concurrent decisions: the second writer blocks
//! on the row lock and then matches zero rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SuggestionRepository, SuggestionRepositoryError};
use crate::domain::{Decision, DecisionOutcome, Suggestion, SuggestionId, SuggestionStatus};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewGearRow, NewSuggestionRow, RowDecodeError, SuggestionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{gears, suggestions};

/// Diesel-backed suggestion store.
#[derive(Clone)]
pub struct DieselSuggestionRepository {
    pool: DbPool,
}

impl DieselSuggestionRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> SuggestionRepositoryError {
    map_pool_error(error, SuggestionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SuggestionRepositoryError {
    map_diesel_error(
        error,
        SuggestionRepositoryError::query,
        SuggestionRepositoryError::connection,
    )
}

fn decode_error(error: RowDecodeError) -> SuggestionRepositoryError {
    SuggestionRepositoryError::query(error.to_string())
}

/// Raw transaction result before the stored status is parsed.
enum RawOutcome {
    Applied,
    Missing,
    Settled(String),
}

fn into_outcome(raw: RawOutcome) -> Result<DecisionOutcome, SuggestionRepositoryError> {
    match raw {
        RawOutcome::Applied => Ok(DecisionOutcome::Applied),
        RawOutcome::Missing => Ok(DecisionOutcome::NotFound),
        RawOutcome::Settled(status) => status
            .parse::<SuggestionStatus>()
            .map(DecisionOutcome::AlreadyDecided)
            .map_err(|err| SuggestionRepositoryError::query(err.to_string())),
    }
}

#[async_trait]
impl SuggestionRepository for DieselSuggestionRepository {
    async fn insert(&self, suggestion: &Suggestion) -> Result<(), SuggestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(suggestions::table)
            .values(NewSuggestionRow::from(suggestion))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list(&self) -> Result<Vec<Suggestion>, SuggestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = suggestions::table
            .select(SuggestionRow::as_select())
            .order((suggestions::created_at.asc(), suggestions::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter()
            .map(Suggestion::try_from)
            .collect::<Result<_, _>>()
            .map_err(decode_error)
    }

    async fn find_by_id(
        &self,
        id: &SuggestionId,
    ) -> Result<Option<Suggestion>, SuggestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = suggestions::table
            .find(id.as_uuid())
            .select(SuggestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(Suggestion::try_from)
            .transpose()
            .map_err(decode_error)
    }

    async fn delete(&self, id: &SuggestionId) -> Result<bool, SuggestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(suggestions::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn decide(
        &self,
        id: &SuggestionId,
        decision: &Decision,
    ) -> Result<DecisionOutcome, SuggestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let suggestion_id = *id.as_uuid();
        let target = decision.target_status().as_str();

        let raw = conn
            .transaction::<RawOutcome, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(
                        suggestions::table
                            .find(suggestion_id)
                            .filter(suggestions::status.eq(SuggestionStatus::Pending.as_str())),
                    )
                    .set(suggestions::status.eq(target))
                    .execute(conn)
                    .await?;

                    if updated == 0 {
                        let current: Option<String> = suggestions::table
                            .find(suggestion_id)
                            .select(suggestions::status)
                            .first(conn)
                            .await
                            .optional()?;
                        return Ok(current.map_or(RawOutcome::Missing, RawOutcome::Settled));
                    }

                    if let Decision::Approve { gear } = decision {
                        diesel::insert_into(gears::table)
                            .values(NewGearRow::from(gear))
                            .execute(conn)
                            .await?;
                    }
                    Ok(RawOutcome::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        into_outcome(raw)
    }
}
