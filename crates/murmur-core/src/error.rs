//! Unified application error types for Murmur.
//!
//! Every store and service returns [`AppError`] so request handlers can
//! branch on a single [`ErrorKind`] regardless of where the failure began.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The referenced post or user does not exist, or its id is malformed.
    NotFound,
    /// Credentials did not match a stored account.
    Authentication,
    /// The actor is not the owner of the resource it tried to mutate.
    Forbidden,
    /// One or more field-level problems; messages live in `details`.
    Validation,
    /// A follow/unfollow target username did not resolve.
    NoSuchUser,
    /// A user attempted to follow themselves.
    SelfFollow,
    /// The follow edge already exists.
    DuplicateFollow,
    /// The edge to remove does not exist.
    NotFollowing,
    /// A store-level uniqueness constraint rejected a write.
    Conflict,
    /// The backing store failed or timed out. Safe to retry.
    StoreUnavailable,
    /// An internal error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NoSuchUser => write!(f, "NO_SUCH_USER"),
            Self::SelfFollow => write!(f, "SELF_FOLLOW"),
            Self::DuplicateFollow => write!(f, "DUPLICATE_FOLLOW"),
            Self::NotFollowing => write!(f, "NOT_FOLLOWING"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout Murmur.
///
/// `details` carries the ordered list of user-facing messages for
/// accumulated failures (field validation, follow-edge violations). It is
/// empty for single-cause errors.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Every accumulated problem, in the order it was detected.
    pub details: Vec<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an error of `kind` carrying an accumulated message list.
    ///
    /// The first message doubles as the headline `message`.
    pub fn with_details(kind: ErrorKind, details: Vec<String>) -> Self {
        let message = details.first().cloned().unwrap_or_else(|| kind.to_string());
        Self {
            kind,
            message,
            details,
            source: None,
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a validation error from a list of field messages.
    pub fn validation(details: Vec<String>) -> Self {
        Self::with_details(ErrorKind::Validation, details)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a store-unavailable error wrapping the backend failure.
    pub fn store_unavailable(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorKind::StoreUnavailable, message, source)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::StoreUnavailable
    }

    /// The user-facing messages for this error.
    ///
    /// Falls back to the headline message when nothing was accumulated.
    pub fn messages(&self) -> Vec<String> {
        if self.details.is_empty() {
            vec![self.message.clone()]
        } else {
            self.details.clone()
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            details: self.details.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_details_uses_first_message() {
        let err = AppError::validation(vec![
            "You must provide a username.".to_string(),
            "You must provide a password.".to_string(),
        ]);
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "You must provide a username.");
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_only_store_errors_are_retryable() {
        let io = std::io::Error::other("connection reset");
        assert!(AppError::store_unavailable("lookup failed", io).is_retryable());
        assert!(!AppError::not_found("Post not found").is_retryable());
        assert!(!AppError::validation(vec!["x".into()]).is_retryable());
    }

    #[test]
    fn test_messages_falls_back_to_headline() {
        let err = AppError::forbidden("Only the author may edit this post");
        assert_eq!(err.messages(), vec!["Only the author may edit this post"]);
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::store_unavailable("write failed", io);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.kind, ErrorKind::StoreUnavailable);
    }
}
