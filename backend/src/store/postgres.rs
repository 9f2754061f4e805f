//! PostgreSQL store backed by sqlx

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{Comment, ForumPost, Reaction, SavedCity};
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    username: String,
    content: String,
    created_at: DateTime<Utc>,
    likes: i64,
    dislikes: i64,
}

impl From<PostRow> for ForumPost {
    fn from(row: PostRow) -> Self {
        ForumPost {
            id: row.id,
            username: row.username,
            content: row.content,
            created_at: row.created_at,
            likes: row.likes,
            dislikes: row.dislikes,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    username: String,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            username: row.username,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn list_posts(&self) -> AppResult<Vec<ForumPost>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, username, content, created_at, likes, dislikes
            FROM forum_posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ForumPost::from).collect())
    }

    async fn create_post(&self, username: &str, content: &str) -> AppResult<ForumPost> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO forum_posts (id, username, content, created_at, likes, dislikes)
            VALUES ($1, $2, $3, NOW(), 0, 0)
            RETURNING id, username, content, created_at, likes, dislikes
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(content)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn increment_reaction(
        &self,
        post_id: Uuid,
        reaction: Reaction,
    ) -> AppResult<Option<ForumPost>> {
        // Single statement: a missing id updates zero rows and upserts nothing
        let sql = match reaction {
            Reaction::Like => {
                r#"
                UPDATE forum_posts SET likes = likes + 1
                WHERE id = $1
                RETURNING id, username, content, created_at, likes, dislikes
                "#
            }
            Reaction::Dislike => {
                r#"
                UPDATE forum_posts SET dislikes = dislikes + 1
                WHERE id = $1
                RETURNING id, username, content, created_at, likes, dislikes
                "#
            }
        };

        let row = sqlx::query_as::<_, PostRow>(sql)
            .bind(post_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(ForumPost::from))
    }

    async fn post_exists(&self, post_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM forum_posts WHERE id = $1)",
        )
        .bind(post_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    async fn list_comments(&self, post_id: Uuid) -> AppResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, username, comment, created_at
            FROM forum_comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn add_comment(
        &self,
        post_id: Uuid,
        username: &str,
        comment: &str,
    ) -> AppResult<Option<Comment>> {
        // INSERT ... SELECT only inserts when the parent row exists
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO forum_comments (id, post_id, username, comment, created_at)
            SELECT $1, p.id, $3, $4, NOW()
            FROM forum_posts p
            WHERE p.id = $2
            RETURNING id, post_id, username, comment, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(username)
        .bind(comment)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn last_city(&self) -> AppResult<Option<SavedCity>> {
        let row = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT last_city, updated_at FROM saved_city WHERE id = 1",
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|(last_city, updated_at)| SavedCity {
            last_city,
            updated_at,
        }))
    }

    async fn save_city(&self, city: &str) -> AppResult<SavedCity> {
        let (last_city, updated_at) = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            r#"
            INSERT INTO saved_city (id, last_city, updated_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE
            SET last_city = EXCLUDED.last_city, updated_at = EXCLUDED.updated_at
            RETURNING last_city, updated_at
            "#,
        )
        .bind(city)
        .fetch_one(&self.db)
        .await?;

        Ok(SavedCity {
            last_city,
            updated_at,
        })
    }
}
