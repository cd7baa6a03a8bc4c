//! Store ports for the three Murmur collections.
//!
//! Each method is a single round trip to the backing store. Services
//! compose them; no method spans more than one collection, so joins are
//! always built from a batch lookup on the far side.

use std::fmt;

use async_trait::async_trait;

use murmur_core::result::AppResult;
use murmur_core::types::{PostId, UserId};
use murmur_entity::follow::Follow;
use murmur_entity::post::{NewPost, Post, PostChanges, PostFilter, PostOrder};
use murmur_entity::user::{NewUser, User};

/// Names of the uniqueness constraints a store reports through
/// `ErrorKind::Conflict`. The error message is exactly one of these.
pub mod constraint {
    /// Username uniqueness.
    pub const USERNAME: &str = "users_username_key";
    /// Email uniqueness.
    pub const EMAIL: &str = "users_email_key";
    /// One edge per `(followed_id, author_id)` pair.
    pub const FOLLOW_PAIR: &str = "follows_pair_key";
}

/// User collection. Only the identity service holds this handle with
/// write intent; other services use the read methods for joins.
#[async_trait]
pub trait UserStore: Send + Sync + fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact (already normalized) username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Batch foreign-key lookup. Missing ids are silently absent from the
    /// result; order is unspecified.
    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Whether any user has this username.
    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    /// Whether any user has this email.
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Insert a new user.
    ///
    /// Fails with a conflict naming [`constraint::USERNAME`] or
    /// [`constraint::EMAIL`] if either is taken.
    async fn insert(&self, user: &NewUser) -> AppResult<User>;
}

/// Post collection.
#[async_trait]
pub trait PostStore: Send + Sync + fmt::Debug + 'static {
    /// Select posts matching `filter`, ordered by `order`.
    async fn find(&self, filter: &PostFilter, order: PostOrder) -> AppResult<Vec<Post>>;

    /// Insert a new post.
    async fn insert(&self, post: &NewPost) -> AppResult<Post>;

    /// Replace title and body, but only while `author_id` still owns the
    /// post. Returns `false` if no row matched.
    async fn update_owned(
        &self,
        id: PostId,
        author_id: UserId,
        changes: &PostChanges,
    ) -> AppResult<bool>;

    /// Delete a post, but only while `author_id` still owns it. Returns
    /// `false` if no row matched.
    async fn delete_owned(&self, id: PostId, author_id: UserId) -> AppResult<bool>;

    /// Number of posts by one author.
    async fn count_by_author(&self, author_id: UserId) -> AppResult<u64>;
}

/// Follow edge collection.
#[async_trait]
pub trait FollowStore: Send + Sync + fmt::Debug + 'static {
    /// Whether `author_id` follows `followed_id`.
    async fn exists(&self, followed_id: UserId, author_id: UserId) -> AppResult<bool>;

    /// Insert an edge. Fails with a conflict naming
    /// [`constraint::FOLLOW_PAIR`] if the pair already exists.
    async fn insert(&self, edge: &Follow) -> AppResult<()>;

    /// Delete an edge. Returns `false` if it did not exist.
    async fn delete(&self, followed_id: UserId, author_id: UserId) -> AppResult<bool>;

    /// Edges pointing at `user_id`, oldest first.
    async fn followers_of(&self, user_id: UserId) -> AppResult<Vec<Follow>>;

    /// Edges leaving `user_id`, oldest first.
    async fn following_of(&self, user_id: UserId) -> AppResult<Vec<Follow>>;

    /// Number of edges pointing at `user_id`.
    async fn count_followers(&self, user_id: UserId) -> AppResult<u64>;

    /// Number of edges leaving `user_id`.
    async fn count_following(&self, user_id: UserId) -> AppResult<u64>;
}
