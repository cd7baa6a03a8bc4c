//! Everything a profile screen shows, gathered in one call.

use std::sync::Arc;

use serde::Serialize;

use murmur_core::error::AppError;
use murmur_core::types::UserId;
use murmur_entity::user::PublicUser;

use crate::content::ContentService;
use crate::graph::GraphService;
use crate::identity::IdentityService;

/// A user's public profile relative to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileOverview {
    /// The profile owner.
    pub user: PublicUser,
    /// Whether the viewer follows the profile owner.
    pub is_following: bool,
    /// Whether the viewer is the profile owner.
    pub is_own_profile: bool,
    /// Posts written by the owner.
    pub post_count: u64,
    /// Accounts following the owner.
    pub follower_count: u64,
    /// Accounts the owner follows.
    pub following_count: u64,
}

/// Composes identity, graph, and content reads into a profile.
#[derive(Debug, Clone)]
pub struct ProfileService {
    identity: Arc<IdentityService>,
    graph: Arc<GraphService>,
    content: Arc<ContentService>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        identity: Arc<IdentityService>,
        graph: Arc<GraphService>,
        content: Arc<ContentService>,
    ) -> Self {
        Self {
            identity,
            graph,
            content,
        }
    }

    /// Profile of `username` as seen by `viewer`. `NotFound` if the
    /// account does not exist.
    pub async fn overview(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> Result<ProfileOverview, AppError> {
        let user = self.identity.find_public_by_username(username).await?;
        let user_id = user.id;
        let is_own_profile = viewer == Some(user_id);

        let following_check = async {
            match viewer {
                Some(viewer) if viewer != user_id => self.graph.is_following(user_id, viewer).await,
                _ => Ok(false),
            }
        };

        let (is_following, post_count, follower_count, following_count) = tokio::try_join!(
            following_check,
            self.content.count_by_author(user_id),
            self.graph.count_followers(user_id),
            self.graph.count_following(user_id),
        )?;

        Ok(ProfileOverview {
            user,
            is_following,
            is_own_profile,
            post_count,
            follower_count,
            following_count,
        })
    }
}
