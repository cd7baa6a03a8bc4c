//! Follow edge repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use murmur_core::result::AppResult;
use murmur_core::types::UserId;
use murmur_entity::follow::Follow;

use crate::error::map_sqlx_error;
use crate::store::FollowStore;

/// Repository for directed follow edges.
///
/// The `(followed_id, author_id)` primary key is named
/// `follows_pair_key`, which is what a duplicate insert reports.
#[derive(Debug, Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    /// Create a new follow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_where(&self, column: &str, user_id: UserId) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM follows WHERE {column} = $1"))
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("Failed to count follow edges", e))?;
        Ok(count as u64)
    }

    async fn edges_where(&self, column: &str, user_id: UserId) -> AppResult<Vec<Follow>> {
        sqlx::query_as::<_, Follow>(&format!(
            "SELECT followed_id, author_id, created_at FROM follows \
             WHERE {column} = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list follow edges", e))
    }
}

#[async_trait]
impl FollowStore for FollowRepository {
    async fn exists(&self, followed_id: UserId, author_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE followed_id = $1 AND author_id = $2)",
        )
        .bind(followed_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to check follow edge", e))
    }

    async fn insert(&self, edge: &Follow) -> AppResult<()> {
        sqlx::query("INSERT INTO follows (followed_id, author_id, created_at) VALUES ($1, $2, $3)")
            .bind(edge.followed_id)
            .bind(edge.author_id)
            .bind(edge.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create follow edge", e))?;
        Ok(())
    }

    async fn delete(&self, followed_id: UserId, author_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE followed_id = $1 AND author_id = $2")
            .bind(followed_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete follow edge", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn followers_of(&self, user_id: UserId) -> AppResult<Vec<Follow>> {
        self.edges_where("followed_id", user_id).await
    }

    async fn following_of(&self, user_id: UserId) -> AppResult<Vec<Follow>> {
        self.edges_where("author_id", user_id).await
    }

    async fn count_followers(&self, user_id: UserId) -> AppResult<u64> {
        self.count_where("followed_id", user_id).await
    }

    async fn count_following(&self, user_id: UserId) -> AppResult<u64> {
        self.count_where("author_id", user_id).await
    }
}
