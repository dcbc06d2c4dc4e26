//! Driving port for the suggestion pipeline.

use async_trait::async_trait;

use crate::domain::{Error, Gear, GearDetails, Principal, Suggestion, SuggestionId};

/// Domain use-case port for submissions and their moderation.
///
/// Submission is anonymous. Every other operation needs the
/// `ManageSuggestions` grant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionWorkflow: Send + Sync {
    /// Record a new pending suggestion.
    async fn submit(&self, details: GearDetails) -> Result<Suggestion, Error>;

    /// Every suggestion regardless of status.
    async fn list(&self, actor: &Principal) -> Result<Vec<Suggestion>, Error>;

    /// Promote a pending suggestion into the catalogue.
    ///
    /// Fails with `conflict` once the suggestion has been decided.
    async fn approve(&self, actor: &Principal, id: &SuggestionId) -> Result<Gear, Error>;

    /// Decline a pending suggestion.
    async fn reject(&self, actor: &Principal, id: &SuggestionId) -> Result<(), Error>;

    /// Remove a suggestion in any state.
    async fn delete(&self, actor: &Principal, id: &SuggestionId) -> Result<(), Error>;
}
