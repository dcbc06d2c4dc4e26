//! Port for suggestion persistence and the promotion step.

use async_trait::async_trait;

use crate::domain::{Decision, DecisionOutcome, Suggestion, SuggestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by suggestion store adapters.
    pub enum SuggestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "suggestion repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "suggestion repository query failed: {message}",
    }
}

/// Persistence contract for suggestions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    /// Persist a freshly submitted suggestion.
    async fn insert(&self, suggestion: &Suggestion) -> Result<(), SuggestionRepositoryError>;

    /// Every suggestion regardless of status.
    async fn list(&self) -> Result<Vec<Suggestion>, SuggestionRepositoryError>;

    /// Fetch a single suggestion.
    async fn find_by_id(
        &self,
        id: &SuggestionId,
    ) -> Result<Option<Suggestion>, SuggestionRepositoryError>;

    /// Remove a suggestion. Returns `false` when nothing matched.
    async fn delete(&self, id: &SuggestionId) -> Result<bool, SuggestionRepositoryError>;

    /// Apply `decision` if and only if the suggestion is still pending.
    ///
    /// The status check, the status write and (for approvals) the gear
    /// insert form one atomic unit: of two concurrent calls on the same
    /// pending suggestion, exactly one observes
    /// [`DecisionOutcome::Applied`].
    async fn decide(
        &self,
        id: &SuggestionId,
        decision: &Decision,
    ) -> Result<DecisionOutcome, SuggestionRepositoryError>;
}
