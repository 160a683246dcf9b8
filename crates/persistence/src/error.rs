//! Mapping of database failures onto the domain error taxonomy.

use domain::DomainError;
use tracing::error;

/// PostgreSQL `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `exclusion_violation`.
pub const EXCLUSION_VIOLATION: &str = "23P01";
/// PostgreSQL `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Converts a `sqlx` error into a [`DomainError`].
///
/// Constraint violations become `Conflict` or `NotFound`; everything else is
/// logged and reported as `Internal` without leaking driver details.
pub fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return DomainError::conflict("Resource already exists");
            }
            Some(EXCLUSION_VIOLATION) => {
                return DomainError::conflict("Resource conflicts with an existing booking");
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return DomainError::NotFound("Referenced resource not found".to_string());
            }
            _ => {}
        }
    }

    error!(error = %err, "Database error");
    DomainError::Internal("Database error".to_string())
}

/// Like [`map_db_error`], but reports any conflict with `message`.
pub fn map_db_conflict(err: sqlx::Error, message: &str) -> DomainError {
    match map_db_error(err) {
        DomainError::Conflict(_) => DomainError::conflict(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_internal() {
        assert_eq!(
            map_db_error(sqlx::Error::PoolTimedOut),
            DomainError::Internal("Database error".to_string())
        );
        assert_eq!(
            map_db_error(sqlx::Error::RowNotFound),
            DomainError::Internal("Database error".to_string())
        );
    }

    #[test]
    fn test_map_db_conflict_keeps_other_errors() {
        assert!(matches!(
            map_db_conflict(sqlx::Error::PoolClosed, "taken"),
            DomainError::Internal(_)
        ));
    }
}
