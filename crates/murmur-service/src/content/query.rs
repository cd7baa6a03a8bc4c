//! The post join pipeline.
//!
//! Every read of posts goes through [`PostQuery`]: select posts with a
//! base filter, resolve all their authors with one batch lookup, then
//! reshape each post into a [`PostView`] relative to the viewer.

use std::collections::HashMap;

use tracing::{debug, warn};

use murmur_core::error::AppError;
use murmur_core::types::UserId;
use murmur_database::PostStore;
use murmur_entity::post::{Post, PostFilter, PostOrder, PostView};
use murmur_entity::user::{AuthorSummary, PublicUser};

use crate::identity::IdentityService;

/// A parameterized post read: base filter, ordering, and viewer.
#[derive(Debug, Clone)]
pub struct PostQuery {
    /// Which posts to select.
    filter: PostFilter,
    /// Result order.
    order: PostOrder,
    /// Who is looking. Drives `is_owner`.
    viewer: Option<UserId>,
}

impl PostQuery {
    /// A query over `filter`, newest first, with no viewer.
    pub fn new(filter: PostFilter) -> Self {
        Self {
            filter,
            order: PostOrder::Newest,
            viewer: None,
        }
    }

    /// Set the result order.
    pub fn order(mut self, order: PostOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the viewer.
    pub fn viewer(mut self, viewer: Option<UserId>) -> Self {
        self.viewer = viewer;
        self
    }

    /// Run the query and join authors.
    pub async fn run(
        &self,
        posts: &dyn PostStore,
        identity: &IdentityService,
    ) -> Result<Vec<PostView>, AppError> {
        let rows = posts.find(&self.filter, self.order).await?;
        debug!(filter = %self.filter, rows = rows.len(), "Post query");

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<UserId> = rows.iter().map(|post| post.author_id).collect();
        let authors = identity.public_by_ids(&author_ids).await?;

        Ok(join_authors(rows, &authors, self.viewer))
    }
}

/// Attach each post's author and ownership flag, keeping input order.
///
/// Posts whose author is absent from `authors` are dropped.
pub fn join_authors(
    posts: Vec<Post>,
    authors: &HashMap<UserId, PublicUser>,
    viewer: Option<UserId>,
) -> Vec<PostView> {
    posts
        .into_iter()
        .filter_map(|post| {
            let Some(author) = authors.get(&post.author_id) else {
                warn!(
                    post_id = %post.id,
                    author_id = %post.author_id,
                    "Skipping post with unknown author"
                );
                return None;
            };
            Some(PostView {
                id: post.id,
                title: post.title,
                body: post.body,
                created_date: post.created_date,
                is_owner: viewer == Some(post.author_id),
                author: AuthorSummary::from(author.clone()),
            })
        })
        .collect()
}
