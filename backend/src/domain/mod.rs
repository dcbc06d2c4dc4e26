//! Domain primitives, policy and services.
//!
//! Purpose: define the strongly typed catalogue entities, the authorization
//! table and the use-case services. Nothing here knows about HTTP or SQL;
//! adapters reach the domain through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Role, Action, `permits`, `authorize`: the authorization policy.
//! - Gear, Suggestion and their identifiers, patches and decisions.
//! - AccountService, CatalogService, SuggestionService, CatalogSeeder.

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod bootstrap;
pub mod catalog_service;
pub mod error;
pub mod gear;
pub mod ports;
pub mod role;
pub mod suggestion;
pub mod suggestion_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub(crate) use self::account_service::INVALID_CREDENTIALS;
pub use self::auth::{IssuedToken, LoginCredentials, LoginOutcome, NewAccount, Principal};
pub use self::authorization::{Action, authorize, permits};
pub use self::bootstrap::{CatalogSeeder, SeedOutcome, sample_gear};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::gear::{Category, Gear, GearDetails, GearId, GearPatch, UnknownCategory};
pub use self::role::{Role, UnknownRole};
pub use self::suggestion::{
    Decision, DecisionOutcome, Suggestion, SuggestionId, SuggestionStatus, UnknownStatus,
};
pub use self::suggestion_service::SuggestionService;
pub use self::trace_id::TraceId;
pub use self::user::{PasswordHash, USERNAME_MAX, User, UserValidationError, Username};
