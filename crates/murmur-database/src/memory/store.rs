//! In-memory store backed by insertion-ordered vectors.

use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use murmur_core::error::AppError;
use murmur_core::result::AppResult;
use murmur_core::types::{PostId, UserId};
use murmur_entity::follow::Follow;
use murmur_entity::post::{NewPost, Post, PostChanges, PostFilter, PostOrder};
use murmur_entity::user::{NewUser, User};

use super::search;
use crate::store::{FollowStore, PostStore, UserStore, constraint};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    posts: Vec<Post>,
    follows: Vec<Follow>,
}

/// A single-process store holding users, posts, and follow edges.
///
/// Uniqueness checks and the write they guard happen under one write
/// lock, so concurrent duplicate inserts see the same conflict the
/// PostgreSQL constraints would raise. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// All three collections.
    inner: Arc<RwLock<Collections>>,
    /// When set, every call fails with a retryable error.
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the backing store going away (or coming back).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable(
                "Memory store is unavailable",
                std::io::Error::from(std::io::ErrorKind::NotConnected),
            ));
        }
        Ok(())
    }
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|p| Reverse(p.created_date));
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.iter().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.iter().any(|u| u.email == email))
    }

    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::conflict(constraint::USERNAME));
        }
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict(constraint::EMAIL));
        }

        let stored = User {
            id: UserId::new(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        inner.users.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn find(&self, filter: &PostFilter, order: PostOrder) -> AppResult<Vec<Post>> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        debug!(%filter, ?order, "Querying in-memory posts");

        if let PostFilter::Text(term) = filter {
            let terms = search::tokens(term);
            let mut scored: Vec<(usize, Post)> = inner
                .posts
                .iter()
                .map(|p| (search::score(&terms, &format!("{} {}", p.title, p.body)), p))
                .filter(|(score, _)| *score > 0)
                .map(|(score, p)| (score, p.clone()))
                .collect();

            scored.sort_by_key(|(_, p)| Reverse(p.created_date));
            if order == PostOrder::Relevance {
                scored.sort_by_key(|(score, _)| Reverse(*score));
            }
            return Ok(scored.into_iter().map(|(_, p)| p).collect());
        }

        let mut posts: Vec<Post> = inner
            .posts
            .iter()
            .filter(|p| match filter {
                PostFilter::Id(id) => p.id == *id,
                PostFilter::Author(id) => p.author_id == *id,
                PostFilter::Authors(ids) => ids.contains(&p.author_id),
                PostFilter::Text(_) => false,
            })
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn insert(&self, post: &NewPost) -> AppResult<Post> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        let stored = Post {
            id: PostId::new(),
            title: post.title.clone(),
            body: post.body.clone(),
            created_date: post.created_date,
            author_id: post.author_id,
        };
        inner.posts.push(stored.clone());
        Ok(stored)
    }

    async fn update_owned(
        &self,
        id: PostId,
        author_id: UserId,
        changes: &PostChanges,
    ) -> AppResult<bool> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        match inner
            .posts
            .iter_mut()
            .find(|p| p.id == id && p.author_id == author_id)
        {
            Some(post) => {
                post.title = changes.title.clone();
                post.body = changes.body.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, id: PostId, author_id: UserId) -> AppResult<bool> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner
            .posts
            .retain(|p| !(p.id == id && p.author_id == author_id));
        Ok(inner.posts.len() < before)
    }

    async fn count_by_author(&self, author_id: UserId) -> AppResult<u64> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().filter(|p| p.author_id == author_id).count() as u64)
    }
}

#[async_trait]
impl FollowStore for MemoryStore {
    async fn exists(&self, followed_id: UserId, author_id: UserId) -> AppResult<bool> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .follows
            .iter()
            .any(|f| f.followed_id == followed_id && f.author_id == author_id))
    }

    async fn insert(&self, edge: &Follow) -> AppResult<()> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        if inner
            .follows
            .iter()
            .any(|f| f.followed_id == edge.followed_id && f.author_id == edge.author_id)
        {
            return Err(AppError::conflict(constraint::FOLLOW_PAIR));
        }
        inner.follows.push(edge.clone());
        Ok(())
    }

    async fn delete(&self, followed_id: UserId, author_id: UserId) -> AppResult<bool> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        let before = inner.follows.len();
        inner
            .follows
            .retain(|f| !(f.followed_id == followed_id && f.author_id == author_id));
        Ok(inner.follows.len() < before)
    }

    async fn followers_of(&self, user_id: UserId) -> AppResult<Vec<Follow>> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .follows
            .iter()
            .filter(|f| f.followed_id == user_id)
            .cloned()
            .collect())
    }

    async fn following_of(&self, user_id: UserId) -> AppResult<Vec<Follow>> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .follows
            .iter()
            .filter(|f| f.author_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_followers(&self, user_id: UserId) -> AppResult<u64> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.follows.iter().filter(|f| f.followed_id == user_id).count() as u64)
    }

    async fn count_following(&self, user_id: UserId) -> AppResult<u64> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.follows.iter().filter(|f| f.author_id == user_id).count() as u64)
    }
}
