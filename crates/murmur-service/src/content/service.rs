//! Post authoring, ownership checks, search, and the feed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use murmur_core::error::AppError;
use murmur_core::types::{PostId, UserId};
use murmur_database::PostStore;
use murmur_entity::post::{NewPost, PostChanges, PostFilter, PostOrder, PostView};

use crate::content::query::PostQuery;
use crate::graph::GraphService;
use crate::identity::IdentityService;
use crate::input::{PostForm, SearchQuery};
use crate::sanitize::clean_text;
use crate::validation::{post_body, post_title};

const POST_NOT_FOUND: &str = "Post not found";
const NOT_AUTHOR: &str = "You do not have permission to perform that action.";

/// Result of an edit attempt on an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Title and body were replaced.
    Updated,
    /// The new values were rejected; the post is unchanged.
    ValidationFailed(Vec<String>),
    /// The requester does not own the post; the post is unchanged.
    Forbidden,
}

/// Sanitize and check a post form.
fn draft(form: &PostForm) -> Result<PostChanges, Vec<String>> {
    let title = clean_text(&form.title);
    let body = clean_text(&form.body);

    let problems = [post_title(&title), post_body(&body)].concat();
    if problems.is_empty() {
        Ok(PostChanges { title, body })
    } else {
        Err(problems)
    }
}

/// A client-supplied id that is not a UUID names no post.
fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    PostId::parse(raw).ok_or_else(|| AppError::not_found(POST_NOT_FOUND))
}

/// Owns the post collection.
#[derive(Debug, Clone)]
pub struct ContentService {
    /// Post store.
    posts: Arc<dyn PostStore>,
    /// Author lookups for the join.
    identity: Arc<IdentityService>,
    /// Follow graph, for the feed.
    graph: Arc<GraphService>,
}

impl ContentService {
    /// Creates a new content service.
    pub fn new(
        posts: Arc<dyn PostStore>,
        identity: Arc<IdentityService>,
        graph: Arc<GraphService>,
    ) -> Self {
        Self {
            posts,
            identity,
            graph,
        }
    }

    /// Publishes a post by `author_id` and returns its id.
    pub async fn create(&self, form: PostForm, author_id: UserId) -> Result<PostId, AppError> {
        let changes = draft(&form).map_err(AppError::validation)?;

        if self.identity.lookup_id(author_id).await?.is_none() {
            return Err(AppError::not_found("Author not found"));
        }

        let post = self
            .posts
            .insert(&NewPost {
                title: changes.title,
                body: changes.body,
                author_id,
                created_date: Utc::now(),
            })
            .await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(post.id)
    }

    /// Replaces the title and body of a post owned by `requester`.
    ///
    /// A malformed or unknown id is a `NotFound` error. Ownership and
    /// validation failures are outcomes, not errors, and leave the post
    /// untouched.
    pub async fn update(
        &self,
        post_id: &str,
        form: PostForm,
        requester: UserId,
    ) -> Result<UpdateOutcome, AppError> {
        let id = parse_post_id(post_id)?;
        let current = self.view(id, Some(requester)).await?;

        if !current.is_owner {
            warn!(post_id = %id, requester = %requester, "Edit rejected: not the author");
            return Ok(UpdateOutcome::Forbidden);
        }

        let changes = match draft(&form) {
            Ok(changes) => changes,
            Err(problems) => return Ok(UpdateOutcome::ValidationFailed(problems)),
        };

        if !self.posts.update_owned(id, requester, &changes).await? {
            return Err(AppError::not_found(POST_NOT_FOUND));
        }

        info!(post_id = %id, author_id = %requester, "Post updated");

        Ok(UpdateOutcome::Updated)
    }

    /// Deletes a post owned by `requester`.
    pub async fn delete(&self, post_id: &str, requester: UserId) -> Result<(), AppError> {
        let id = parse_post_id(post_id)?;
        let current = self.view(id, Some(requester)).await?;

        if !current.is_owner {
            warn!(post_id = %id, requester = %requester, "Delete rejected: not the author");
            return Err(AppError::forbidden(NOT_AUTHOR));
        }

        if !self.posts.delete_owned(id, requester).await? {
            return Err(AppError::not_found(POST_NOT_FOUND));
        }

        info!(post_id = %id, author_id = %requester, "Post deleted");

        Ok(())
    }

    /// A single post as seen by `viewer`.
    pub async fn find_by_id(
        &self,
        post_id: &str,
        viewer: Option<UserId>,
    ) -> Result<PostView, AppError> {
        let id = parse_post_id(post_id)?;
        self.view(id, viewer).await
    }

    /// Every post by `author_id`, newest first.
    pub async fn find_by_author(
        &self,
        author_id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, AppError> {
        PostQuery::new(PostFilter::Author(author_id))
            .viewer(viewer)
            .run(self.posts.as_ref(), &self.identity)
            .await
    }

    /// Number of posts by `author_id`.
    pub async fn count_by_author(&self, author_id: UserId) -> Result<u64, AppError> {
        self.posts.count_by_author(author_id).await
    }

    /// Full-text search over titles and bodies, best match first.
    pub async fn search(
        &self,
        query: &SearchQuery,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, AppError> {
        let term = query.term().trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        PostQuery::new(PostFilter::Text(term.to_string()))
            .order(PostOrder::Relevance)
            .viewer(viewer)
            .run(self.posts.as_ref(), &self.identity)
            .await
    }

    /// Posts by everyone `viewer_id` follows, newest first.
    pub async fn feed(&self, viewer_id: UserId) -> Result<Vec<PostView>, AppError> {
        let followed = self.graph.followed_ids(viewer_id).await?;
        if followed.is_empty() {
            debug!(user_id = %viewer_id, "Empty feed: follows nobody");
            return Ok(Vec::new());
        }

        PostQuery::new(PostFilter::Authors(followed))
            .viewer(Some(viewer_id))
            .run(self.posts.as_ref(), &self.identity)
            .await
    }

    async fn view(&self, id: PostId, viewer: Option<UserId>) -> Result<PostView, AppError> {
        PostQuery::new(PostFilter::Id(id))
            .viewer(viewer)
            .run(self.posts.as_ref(), &self.identity)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_sanitizes_before_checking() {
        let changes = draft(&PostForm::new("  Hi  ", "<script>alert(1)</script>Hello")).unwrap();
        assert_eq!(changes.title, "Hi");
        assert_eq!(changes.body, "Hello");
    }

    #[test]
    fn test_draft_reports_both_fields() {
        let problems = draft(&PostForm::new("<b></b>", "<script>x</script>")).unwrap_err();
        assert_eq!(
            problems,
            vec!["You must provide a title.", "You must provide post content."]
        );
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        let err = parse_post_id("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, murmur_core::error::ErrorKind::NotFound);
    }
}
