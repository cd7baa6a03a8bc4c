//! Construction of the full service set from three store handles.

use std::sync::Arc;

use murmur_auth::{AvatarResolver, PasswordHasher};
use murmur_core::config::{AuthConfig, AvatarConfig};
use murmur_core::error::AppError;
use murmur_database::{FollowStore, PostStore, UserStore};

use crate::content::ContentService;
use crate::graph::GraphService;
use crate::identity::IdentityService;
use crate::profile::ProfileService;

/// Every Murmur service, wired to a shared set of stores.
#[derive(Debug, Clone)]
pub struct ServiceHub {
    /// Accounts and credentials.
    pub identity: Arc<IdentityService>,
    /// The follow graph.
    pub graph: Arc<GraphService>,
    /// Posts, search, and the feed.
    pub content: Arc<ContentService>,
    /// Profile composition.
    pub profile: Arc<ProfileService>,
}

impl ServiceHub {
    /// Wire every service over the given stores.
    ///
    /// Fails only if the configured Argon2 parameters are invalid.
    pub fn new(
        auth: &AuthConfig,
        avatar: &AvatarConfig,
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        follows: Arc<dyn FollowStore>,
    ) -> Result<Self, AppError> {
        let hasher = Arc::new(PasswordHasher::new(auth)?);
        let avatars = Arc::new(AvatarResolver::new(avatar));

        let identity = Arc::new(IdentityService::new(users, hasher, avatars));
        let graph = Arc::new(GraphService::new(follows, Arc::clone(&identity)));
        let content = Arc::new(ContentService::new(
            posts,
            Arc::clone(&identity),
            Arc::clone(&graph),
        ));
        let profile = Arc::new(ProfileService::new(
            Arc::clone(&identity),
            Arc::clone(&graph),
            Arc::clone(&content),
        ));

        Ok(Self {
            identity,
            graph,
            content,
            profile,
        })
    }
}
