use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewPost, Post, PostChanges};
use super::store::{PostStore, UpdateOutcome};

const POST_COLUMNS: &str = "id, title, content, author_id, created_at";

/// `PostStore` backed by the `posts` table
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );

        let created = sqlx::query_as::<_, Post>(&sql)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.author_id)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted post {} for author {}", created.id, created.author_id);
        Ok(created)
    }

    async fn update_owned(
        &self,
        id: &str,
        author_id: &str,
        changes: PostChanges,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        // Ownership and mutation in one statement; no read-then-write window
        let sql = format!(
            "UPDATE posts SET title = $1, content = $2 WHERE id = $3 AND author_id = $4 RETURNING {}",
            POST_COLUMNS
        );

        let updated = sqlx::query_as::<_, Post>(&sql)
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(id)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(post) = updated {
            return Ok(UpdateOutcome::Updated(post));
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            UpdateOutcome::NotOwned
        } else {
            UpdateOutcome::NotFound
        })
    }

    async fn find_first(&self, id: &str) -> Result<Option<Post>, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let sql = format!("SELECT {} FROM posts WHERE id = $1 LIMIT 1", POST_COLUMNS);

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_many(&self) -> Result<Vec<Post>, DatabaseError> {
        let sql = format!("SELECT {} FROM posts ORDER BY created_at ASC, id ASC", POST_COLUMNS);

        let posts = sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?;

        Ok(posts)
    }
}
