//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    GearCatalog, LoginService, SuggestionWorkflow, TokenService, UserAdministration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check and token issuance.
    pub login: Arc<dyn LoginService>,
    /// Role-gated account creation.
    pub users: Arc<dyn UserAdministration>,
    /// Catalogue reads and curation.
    pub catalog: Arc<dyn GearCatalog>,
    /// Suggestion submission and moderation.
    pub suggestions: Arc<dyn SuggestionWorkflow>,
    /// Bearer token verification for the auth extractor.
    pub tokens: Arc<dyn TokenService>,
}
