//! Directed follow edge model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use murmur_core::types::UserId;

/// A directed edge: `author_id` follows `followed_id`.
///
/// The ordered pair `(followed_id, author_id)` is the edge key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Follow {
    /// The account being followed.
    pub followed_id: UserId,
    /// The follower.
    pub author_id: UserId,
    /// When the edge was created. Orders follower listings.
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a new edge stamped with the current time.
    pub fn new(followed_id: UserId, author_id: UserId) -> Self {
        Self {
            followed_id,
            author_id,
            created_at: Utc::now(),
        }
    }
}
