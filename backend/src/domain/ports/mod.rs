//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod gear_catalog;
mod gear_repository;
mod login_service;
mod password_hasher;
mod suggestion_repository;
mod suggestion_workflow;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use gear_catalog::MockGearCatalog;
pub use gear_catalog::GearCatalog;
#[cfg(test)]
pub use gear_repository::MockGearRepository;
pub use gear_repository::{GearRepository, GearRepositoryError};
#[cfg(test)]
pub use login_service::{MockLoginService, MockUserAdministration};
pub use login_service::{LoginService, UserAdministration};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use suggestion_repository::MockSuggestionRepository;
pub use suggestion_repository::{SuggestionRepository, SuggestionRepositoryError};
#[cfg(test)]
pub use suggestion_workflow::MockSuggestionWorkflow;
pub use suggestion_workflow::SuggestionWorkflow;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenService, TokenServiceError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
