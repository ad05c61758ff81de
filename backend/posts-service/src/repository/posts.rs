use crate::domain::{DocumentId, NewPost, Post, PostPatch, SearchPredicate, WriteOutcome};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const POST_COLUMNS: &str =
    "id, title, message, creator, tags, selected_file, likes, comments, created_at, version";

/// Storage interface for posts.
///
/// Every method is a single round-trip and atomic only for the one document it touches.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts newest-first by identifier
    async fn list_page(&self, skip: i64, limit: i64) -> Result<Vec<Post>>;

    async fn count_all(&self) -> Result<i64>;

    /// Posts matching the predicate, newest-first
    async fn find_by_predicate(&self, predicate: &SearchPredicate) -> Result<Vec<Post>>;

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Post>>;

    /// Store a new post; the repository assigns identifier and creation time
    async fn insert(&self, post: NewPost) -> Result<Post>;

    /// Overwrite the patched fields. With `expected_version` the write only
    /// applies if the stored version still matches.
    async fn replace_by_id(
        &self,
        id: &DocumentId,
        patch: &PostPatch,
        expected_version: Option<i64>,
    ) -> Result<WriteOutcome>;

    /// Replace likes and comments if the stored version equals `expected_version`
    async fn write_engagement(
        &self,
        id: &DocumentId,
        expected_version: i64,
        likes: &[String],
        comments: &[String],
    ) -> Result<WriteOutcome>;

    /// Returns false when nothing was deleted
    async fn delete_by_id(&self, id: &DocumentId) -> Result<bool>;

    /// Health check round-trip
    async fn ping(&self) -> Result<()>;
}

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tell a lost conditional write apart: gone, or just stale.
    async fn classify_miss(&self, id: &DocumentId) -> Result<WriteOutcome> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            WriteOutcome::Stale
        } else {
            WriteOutcome::Missing
        })
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list_page(&self, skip: i64, limit: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_all(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_by_predicate(&self, predicate: &SearchPredicate) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE title ~* $1 OR tags && $2
            ORDER BY id DESC
            "#
        ))
        .bind(predicate.title_pattern())
        .bind(predicate.tags())
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (id, title, message, creator, tags, selected_file, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(DocumentId::generate())
        .bind(&post.title)
        .bind(&post.message)
        .bind(&post.creator)
        .bind(&post.tags)
        .bind(&post.selected_file)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn replace_by_id(
        &self,
        id: &DocumentId,
        patch: &PostPatch,
        expected_version: Option<i64>,
    ) -> Result<WriteOutcome> {
        let updated = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                message = COALESCE($3, message),
                creator = COALESCE($4, creator),
                tags = COALESCE($5, tags),
                selected_file = COALESCE($6, selected_file),
                version = version + 1
            WHERE id = $1 AND ($7::BIGINT IS NULL OR version = $7)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.message.as_deref())
        .bind(patch.creator.as_deref())
        .bind(patch.tags.as_deref())
        .bind(patch.selected_file.as_deref())
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(post) => Ok(WriteOutcome::Applied(post)),
            None => self.classify_miss(id).await,
        }
    }

    async fn write_engagement(
        &self,
        id: &DocumentId,
        expected_version: i64,
        likes: &[String],
        comments: &[String],
    ) -> Result<WriteOutcome> {
        let updated = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET likes = $2, comments = $3, version = version + 1
            WHERE id = $1 AND version = $4
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(likes)
        .bind(comments)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(post) => Ok(WriteOutcome::Applied(post)),
            None => self.classify_miss(id).await,
        }
    }

    async fn delete_by_id(&self, id: &DocumentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
