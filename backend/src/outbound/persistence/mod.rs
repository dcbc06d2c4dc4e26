//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` connection pooling.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never
//!   leave this module.
//! - Every database failure is mapped onto the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use gear_catalog::outbound::persistence::{DbPool, DieselGearRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/gear")).await?;
//! let repo = DieselGearRepository::new(pool);
//! ```

mod diesel_gear_repository;
mod diesel_suggestion_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_gear_repository::DieselGearRepository;
pub use diesel_suggestion_repository::DieselSuggestionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
