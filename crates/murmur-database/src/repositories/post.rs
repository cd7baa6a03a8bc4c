//! Post repository implementation.
//!
//! Full-text search runs against the generated `search_vector` column
//! (GIN-indexed) using `websearch_to_tsquery`, ranked by `ts_rank`.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use tracing::debug;
use uuid::Uuid;

use murmur_core::result::AppResult;
use murmur_core::types::{PostId, UserId};
use murmur_entity::post::{NewPost, Post, PostChanges, PostFilter, PostOrder};

use crate::error::map_sqlx_error;
use crate::store::PostStore;

const POST_COLUMNS: &str = "id, title, body, created_date, author_id";

/// Repository for post queries and owner-conditioned mutations.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the SQL text for a filter/order combination.
fn select_sql(filter: &PostFilter, order: PostOrder) -> String {
    let predicate = match filter {
        PostFilter::Id(_) => "id = $1",
        PostFilter::Author(_) => "author_id = $1",
        PostFilter::Authors(_) => "author_id = ANY($1)",
        PostFilter::Text(_) => "search_vector @@ websearch_to_tsquery('english', $1)",
    };
    let ordering = match (filter, order) {
        (PostFilter::Text(_), PostOrder::Relevance) => {
            "ts_rank(search_vector, websearch_to_tsquery('english', $1)) DESC, created_date DESC"
        }
        _ => "created_date DESC",
    };
    format!("SELECT {POST_COLUMNS} FROM posts WHERE {predicate} ORDER BY {ordering}")
}

fn bind_filter<'q>(
    query: QueryAs<'q, sqlx::Postgres, Post, PgArguments>,
    filter: &'q PostFilter,
) -> QueryAs<'q, sqlx::Postgres, Post, PgArguments> {
    match filter {
        PostFilter::Id(id) => query.bind(*id),
        PostFilter::Author(id) => query.bind(*id),
        PostFilter::Authors(ids) => {
            query.bind(ids.iter().map(|id| id.into_uuid()).collect::<Vec<Uuid>>())
        }
        PostFilter::Text(term) => query.bind(term.as_str()),
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn find(&self, filter: &PostFilter, order: PostOrder) -> AppResult<Vec<Post>> {
        if matches!(filter, PostFilter::Authors(ids) if ids.is_empty()) {
            return Ok(Vec::new());
        }

        let sql = select_sql(filter, order);
        debug!(%filter, ?order, "Querying posts");

        bind_filter(sqlx::query_as::<_, Post>(&sql), filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to query posts", e))
    }

    async fn insert(&self, post: &NewPost) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (id, title, body, created_date, author_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(PostId::new())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.created_date)
        .bind(post.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create post", e))
    }

    async fn update_owned(
        &self,
        id: PostId,
        author_id: UserId,
        changes: &PostChanges,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE posts SET title = $3, body = $4 WHERE id = $1 AND author_id = $2",
        )
        .bind(id)
        .bind(author_id)
        .bind(&changes.title)
        .bind(&changes.body)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update post", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, id: PostId, author_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete post", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_author(&self, author_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count posts", e))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_search_orders_by_rank_only_for_relevance() {
        let filter = PostFilter::Text("rust".to_string());
        assert!(select_sql(&filter, PostOrder::Relevance).contains("ts_rank"));
        assert!(!select_sql(&filter, PostOrder::Newest).contains("ts_rank"));
    }

    #[test]
    fn test_author_set_uses_any() {
        let sql = select_sql(&PostFilter::Authors(vec![UserId::new()]), PostOrder::Newest);
        assert!(sql.contains("author_id = ANY($1)"));
        assert!(sql.ends_with("ORDER BY created_date DESC"));
    }
}
