//! Mapping from `sqlx` failures into [`AppError`].

use murmur_core::error::{AppError, ErrorKind};

/// Classify a driver error.
///
/// Unique violations become [`ErrorKind::Conflict`] with the constraint
/// name as the message so services can tell which key collided.
/// Connectivity problems become retryable [`ErrorKind::StoreUnavailable`].
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return AppError::with_source(ErrorKind::Conflict, constraint, err);
        }
    }

    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            AppError::store_unavailable(format!("{context}: {err}"), err)
        }
        other => AppError::with_source(ErrorKind::Internal, format!("{context}: {other}"), other),
    }
}
