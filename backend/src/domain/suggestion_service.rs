//! Suggestion pipeline: anonymous submission and the promotion engine.
//!
//! Approval copies a pending suggestion into a new gear record. The status
//! guard and the insert are delegated to
//! [`SuggestionRepository::decide`], which applies both atomically, so two
//! concurrent approvals of the same suggestion produce one gear.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{SuggestionRepository, SuggestionRepositoryError, SuggestionWorkflow};
use crate::domain::{
    Action, Decision, DecisionOutcome, Error, Gear, GearDetails, Principal, Suggestion,
    SuggestionId, SuggestionStatus, authorize,
};

fn map_repository_error(error: SuggestionRepositoryError) -> Error {
    match error {
        SuggestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("suggestion repository unavailable: {message}"))
        }
        SuggestionRepositoryError::Query { message } => {
            Error::internal(format!("suggestion repository error: {message}"))
        }
    }
}

fn suggestion_not_found(id: &SuggestionId) -> Error {
    Error::not_found(format!("suggestion {id} not found"))
}

fn already_decided(id: &SuggestionId, status: SuggestionStatus) -> Error {
    Error::conflict(format!("suggestion {id} has already been {status}"))
        .with_details(json!({ "status": status }))
}

/// Suggestion service implementing [`SuggestionWorkflow`].
#[derive(Clone)]
pub struct SuggestionService<S> {
    suggestion_repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SuggestionService<S> {
    /// Create a new service over the suggestion repository.
    ///
    /// `clock` stamps `created_at` on submissions.
    pub fn new(suggestion_repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            suggestion_repo,
            clock,
        }
    }
}

impl<S> SuggestionService<S>
where
    S: SuggestionRepository,
{
    async fn apply(&self, id: &SuggestionId, decision: &Decision) -> Result<(), Error> {
        let outcome = self
            .suggestion_repo
            .decide(id, decision)
            .await
            .map_err(map_repository_error)?;
        match outcome {
            DecisionOutcome::Applied => Ok(()),
            DecisionOutcome::NotFound => Err(suggestion_not_found(id)),
            DecisionOutcome::AlreadyDecided(status) => {
                warn!(suggestion_id = %id, %status, "decision on settled suggestion refused");
                Err(already_decided(id, status))
            }
        }
    }
}

#[async_trait]
impl<S> SuggestionWorkflow for SuggestionService<S>
where
    S: SuggestionRepository,
{
    async fn submit(&self, details: GearDetails) -> Result<Suggestion, Error> {
        let suggestion = Suggestion::submit(details, self.clock.utc());
        self.suggestion_repo
            .insert(&suggestion)
            .await
            .map_err(map_repository_error)?;
        info!(suggestion_id = %suggestion.id, "suggestion submitted");
        Ok(suggestion)
    }

    async fn list(&self, actor: &Principal) -> Result<Vec<Suggestion>, Error> {
        authorize(actor.role, Action::ManageSuggestions)?;
        self.suggestion_repo
            .list()
            .await
            .map_err(map_repository_error)
    }

    async fn approve(&self, actor: &Principal, id: &SuggestionId) -> Result<Gear, Error> {
        authorize(actor.role, Action::ManageSuggestions)?;
        let suggestion = self
            .suggestion_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| suggestion_not_found(id))?;
        if suggestion.status.is_terminal() {
            return Err(already_decided(id, suggestion.status));
        }

        let gear = suggestion.to_gear();
        self.apply(id, &Decision::Approve { gear: gear.clone() })
            .await?;
        info!(
            suggestion_id = %id,
            gear_id = %gear.id,
            by = %actor.username,
            "suggestion promoted"
        );
        Ok(gear)
    }

    async fn reject(&self, actor: &Principal, id: &SuggestionId) -> Result<(), Error> {
        authorize(actor.role, Action::ManageSuggestions)?;
        self.apply(id, &Decision::Reject).await?;
        info!(suggestion_id = %id, by = %actor.username, "suggestion rejected");
        Ok(())
    }

    async fn delete(&self, actor: &Principal, id: &SuggestionId) -> Result<(), Error> {
        authorize(actor.role, Action::ManageSuggestions)?;
        let removed = self
            .suggestion_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(suggestion_not_found(id));
        }
        info!(suggestion_id = %id, by = %actor.username, "suggestion deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "suggestion_service_tests.rs"]
mod tests;
