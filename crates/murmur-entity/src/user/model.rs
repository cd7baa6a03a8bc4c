//! User entity model and its public projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use murmur_core::types::UserId;

/// A registered account as stored.
///
/// Only the identity store reads this type; everything that leaves it is
/// a [`PublicUser`] or an [`AuthorSummary`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique, lowercase login name.
    pub username: String,
    /// Unique, lowercase email address.
    pub email: String,
    /// Argon2id PHC hash string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new user. Fields are already normalized
/// and the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Normalized username.
    pub username: String,
    /// Normalized email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Privacy-trimmed identity used for sessions and profile lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// User identifier.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Derived avatar URL.
    pub avatar: String,
}

impl PublicUser {
    /// Project a stored user, attaching a freshly derived avatar.
    pub fn from_user(user: &User, avatar: String) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            avatar,
        }
    }
}

/// The `{username, avatar}` shape used wherever another user is displayed:
/// post authors and both sides of the follow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    /// Username.
    pub username: String,
    /// Derived avatar URL.
    pub avatar: String,
}

impl From<PublicUser> for AuthorSummary {
    fn from(user: PublicUser) -> Self {
        Self {
            username: user.username,
            avatar: user.avatar,
        }
    }
}
