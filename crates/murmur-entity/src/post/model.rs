//! Post entity model and its joined read projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use murmur_core::types::{PostId, UserId};

use crate::user::AuthorSummary;

/// A post as stored. Title and body are always sanitized, trimmed, and
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: PostId,
    /// Sanitized title.
    pub title: String,
    /// Sanitized body.
    pub body: String,
    /// Creation time, assigned once.
    pub created_date: DateTime<Utc>,
    /// Owning author. Immutable.
    pub author_id: UserId,
}

/// Data required to insert a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Sanitized title.
    pub title: String,
    /// Sanitized body.
    pub body: String,
    /// Owning author.
    pub author_id: UserId,
    /// Creation time.
    pub created_date: DateTime<Utc>,
}

/// The mutable subset of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    /// Sanitized title.
    pub title: String,
    /// Sanitized body.
    pub body: String,
}

/// A post joined with its author's public identity, relative to a viewer.
///
/// The raw author id is not exposed; `is_owner` is all the
/// presentation layer needs to decide whether to show edit controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    /// Post identifier.
    pub id: PostId,
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Creation time.
    pub created_date: DateTime<Utc>,
    /// Author display data.
    pub author: AuthorSummary,
    /// Whether the viewer wrote this post.
    pub is_owner: bool,
}
