//! Repository implementations, one per aggregate.

pub mod account;
pub mod audit;
pub mod circuit;
pub mod company;
pub mod job;
pub mod member;
pub mod project;
pub mod share;
pub mod simulation;

use ampflux_core::error::{AppError, ErrorKind};

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Map an insert error, turning unique violations into `Conflict`.
pub(crate) fn map_insert_err(err: sqlx::Error, conflict_message: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AppError::conflict(conflict_message);
        }
    }
    AppError::with_source(ErrorKind::Database, "Insert failed", err)
}
