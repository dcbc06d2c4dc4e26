//! Shared Diesel error mapping for the catalogue repositories.
//!
//! Each port defines `Connection` and `Query` variants; these helpers take
//! the two constructors so every repository maps failures the same way.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Pool failures always mean the store is unreachable.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(%error, "connection pool checkout failed");
    connection(error.into_message())
}

/// Lost connections map to `connection`; everything else to `query`.
///
/// Driver messages are logged at debug level and replaced with a generic
/// description so SQL details never reach callers.
pub(super) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection lost".to_owned()),
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            query("value rejected by database constraint".to_owned())
        }
        _ => query("database error".to_owned()),
    }
}
