//! Follow and unfollow with edge validation, plus follower listings.

use std::sync::Arc;

use tracing::{debug, info};

use murmur_core::error::{AppError, ErrorKind};
use murmur_core::types::UserId;
use murmur_database::{FollowStore, constraint};
use murmur_entity::follow::Follow;
use murmur_entity::user::AuthorSummary;

use crate::identity::IdentityService;

const FOLLOW_MISSING_USER: &str = "You cannot follow a user that does not exist.";
const UNFOLLOW_MISSING_USER: &str = "You cannot stop following a user that does not exist.";
const SELF_FOLLOW: &str = "You cannot follow yourself.";
const DUPLICATE_FOLLOW: &str = "You are already following this user.";
const NOT_FOLLOWING: &str = "You cannot stop following someone you do not already follow.";

/// Build the error for a set of edge violations: the first violation
/// names the kind, and every message is kept in order.
fn edge_error(violations: &[(ErrorKind, &str)]) -> AppError {
    let kind = violations
        .first()
        .map(|(kind, _)| *kind)
        .unwrap_or(ErrorKind::Internal);
    let details = violations
        .iter()
        .map(|(_, message)| (*message).to_string())
        .collect();
    AppError::with_details(kind, details)
}

/// Owns the follow edge collection.
#[derive(Debug, Clone)]
pub struct GraphService {
    /// Follow edge store.
    follows: Arc<dyn FollowStore>,
    /// Resolves usernames and projects edge endpoints.
    identity: Arc<IdentityService>,
}

impl GraphService {
    /// Creates a new graph service.
    pub fn new(follows: Arc<dyn FollowStore>, identity: Arc<IdentityService>) -> Self {
        Self { follows, identity }
    }

    /// Makes `follower_id` follow the account named `followed_username`.
    ///
    /// Fails with `NoSuchUser` if the name does not resolve. Otherwise the
    /// self-follow and duplicate checks are both evaluated; the error kind
    /// is the first one that failed and `details` carries every message.
    pub async fn follow(
        &self,
        followed_username: &str,
        follower_id: UserId,
    ) -> Result<(), AppError> {
        let Some(target) = self.identity.lookup_username(followed_username).await? else {
            return Err(edge_error(&[(ErrorKind::NoSuchUser, FOLLOW_MISSING_USER)]));
        };

        let mut violations = Vec::new();
        if target.id == follower_id {
            violations.push((ErrorKind::SelfFollow, SELF_FOLLOW));
        }
        if self.follows.exists(target.id, follower_id).await? {
            violations.push((ErrorKind::DuplicateFollow, DUPLICATE_FOLLOW));
        }
        if !violations.is_empty() {
            debug!(followed_id = %target.id, follower_id = %follower_id, "Follow rejected");
            return Err(edge_error(&violations));
        }

        self.follows
            .insert(&Follow::new(target.id, follower_id))
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict if e.message == constraint::FOLLOW_PAIR => {
                    edge_error(&[(ErrorKind::DuplicateFollow, DUPLICATE_FOLLOW)])
                }
                _ => e,
            })?;

        info!(followed_id = %target.id, follower_id = %follower_id, "Follow created");

        Ok(())
    }

    /// Removes the edge from `follower_id` to the account named
    /// `followed_username`.
    pub async fn unfollow(
        &self,
        followed_username: &str,
        follower_id: UserId,
    ) -> Result<(), AppError> {
        let Some(target) = self.identity.lookup_username(followed_username).await? else {
            return Err(edge_error(&[(ErrorKind::NoSuchUser, UNFOLLOW_MISSING_USER)]));
        };

        if !self.follows.exists(target.id, follower_id).await? {
            return Err(edge_error(&[(ErrorKind::NotFollowing, NOT_FOLLOWING)]));
        }

        // The edge can vanish between the check and the delete.
        if !self.follows.delete(target.id, follower_id).await? {
            return Err(edge_error(&[(ErrorKind::NotFollowing, NOT_FOLLOWING)]));
        }

        info!(followed_id = %target.id, follower_id = %follower_id, "Follow removed");

        Ok(())
    }

    /// Whether `follower_id` follows `followed_id`.
    pub async fn is_following(
        &self,
        followed_id: UserId,
        follower_id: UserId,
    ) -> Result<bool, AppError> {
        self.follows.exists(followed_id, follower_id).await
    }

    /// Everyone following `user_id`, oldest edge first.
    pub async fn followers(&self, user_id: UserId) -> Result<Vec<AuthorSummary>, AppError> {
        let edges = self.follows.followers_of(user_id).await?;
        let ids: Vec<UserId> = edges.iter().map(|edge| edge.author_id).collect();
        self.summaries(&ids).await
    }

    /// Everyone `user_id` follows, oldest edge first.
    pub async fn following(&self, user_id: UserId) -> Result<Vec<AuthorSummary>, AppError> {
        let ids = self.followed_ids(user_id).await?;
        self.summaries(&ids).await
    }

    /// Number of accounts following `user_id`.
    pub async fn count_followers(&self, user_id: UserId) -> Result<u64, AppError> {
        self.follows.count_followers(user_id).await
    }

    /// Number of accounts `user_id` follows.
    pub async fn count_following(&self, user_id: UserId) -> Result<u64, AppError> {
        self.follows.count_following(user_id).await
    }

    /// Ids of every account `user_id` follows, oldest edge first.
    pub async fn followed_ids(&self, user_id: UserId) -> Result<Vec<UserId>, AppError> {
        Ok(self
            .follows
            .following_of(user_id)
            .await?
            .into_iter()
            .map(|edge| edge.followed_id)
            .collect())
    }

    /// Project `ids` in order, skipping any that no longer resolve.
    async fn summaries(&self, ids: &[UserId]) -> Result<Vec<AuthorSummary>, AppError> {
        let mut users = self.identity.public_by_ids(ids).await?;
        Ok(ids
            .iter()
            .filter_map(|id| users.remove(id))
            .map(AuthorSummary::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_error_kind_is_first_violation() {
        let err = edge_error(&[
            (ErrorKind::SelfFollow, SELF_FOLLOW),
            (ErrorKind::DuplicateFollow, DUPLICATE_FOLLOW),
        ]);
        assert_eq!(err.kind, ErrorKind::SelfFollow);
        assert_eq!(err.details, vec![SELF_FOLLOW, DUPLICATE_FOLLOW]);
        assert_eq!(err.message, SELF_FOLLOW);
    }
}
