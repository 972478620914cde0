//! # PostgreSQL store
//!
//! This module implements the data mapping between the relational model
//! (see `migrations/`) and the `domains` models.

use async_trait::async_trait;
use domains::{
    generate_id, AddedComment, AddedLike, AddedReply, AddedThread, CommentRecord,
    CommentRepository, DetailThread, DomainError, LikeRepository, NewComment, NewLike, NewReply,
    NewThread, ReplyRecord, ReplyRepository, Result, ThreadRepository, Visibility,
};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::error;

pub struct PgForumStore {
    pool: PgPool,
}

impl PgForumStore {
    pub async fn connect(
        url: &str,
        max_connections: u32,
    ) -> std::result::Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Unique violations become `Conflict` and dangling parent ids `NotFound`;
/// everything else is an internal failure.
fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return DomainError::not_found("referenced record");
        }
    }
    error!(error = %err, "database query failed");
    DomainError::internal(err.to_string())
}

fn comment_record(row: &PgRow) -> std::result::Result<CommentRecord, sqlx::Error> {
    Ok(CommentRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        date: row.try_get("created_at")?,
        content: row.try_get("content")?,
        visibility: Visibility::from(row.try_get::<bool, _>("is_deleted")?),
    })
}

fn reply_record(row: &PgRow) -> std::result::Result<ReplyRecord, sqlx::Error> {
    Ok(ReplyRecord {
        id: row.try_get("id")?,
        comment_id: row.try_get("comment_id")?,
        content: row.try_get("content")?,
        date: row.try_get("created_at")?,
        username: row.try_get("username")?,
        visibility: Visibility::from(row.try_get::<bool, _>("is_deleted")?),
    })
}

#[async_trait]
impl ThreadRepository for PgForumStore {
    async fn add_thread(&self, new_thread: NewThread) -> Result<AddedThread> {
        let row = sqlx::query(
            "INSERT INTO threads (id, title, body, owner) VALUES ($1, $2, $3, $4) \
             RETURNING id, title, owner",
        )
        .bind(generate_id("thread"))
        .bind(&new_thread.title)
        .bind(&new_thread.body)
        .bind(&new_thread.owner)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(AddedThread {
            id: row.try_get("id").map_err(map_db_error)?,
            title: row.try_get("title").map_err(map_db_error)?,
            owner: row.try_get("owner").map_err(map_db_error)?,
        })
    }

    async fn check_thread_by_id(&self, thread_id: &str) -> Result<()> {
        sqlx::query("SELECT 1 FROM threads WHERE id = $1")
            .bind(thread_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("thread"))
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<DetailThread> {
        let row = sqlx::query(
            "SELECT t.id, t.title, t.body, t.created_at, COALESCE(u.username, t.owner) AS username \
             FROM threads t LEFT JOIN users u ON u.id = t.owner \
             WHERE t.id = $1",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| DomainError::not_found("thread"))?;

        Ok(DetailThread {
            id: row.try_get("id").map_err(map_db_error)?,
            title: row.try_get("title").map_err(map_db_error)?,
            body: row.try_get("body").map_err(map_db_error)?,
            date: row.try_get("created_at").map_err(map_db_error)?,
            username: row.try_get("username").map_err(map_db_error)?,
            comments: Vec::new(),
        })
    }

    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<ReplyRecord>> {
        let rows = sqlx::query(
            "SELECT r.id, r.comment_id, r.content, r.created_at, r.is_deleted, \
                    COALESCE(u.username, r.owner) AS username \
             FROM replies r \
             INNER JOIN comments c ON c.id = r.comment_id \
             LEFT JOIN users u ON u.id = r.owner \
             WHERE c.thread_id = $1 \
             ORDER BY r.created_at ASC, r.id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.iter()
            .map(reply_record)
            .collect::<std::result::Result<_, _>>()
            .map_err(map_db_error)
    }
}

#[async_trait]
impl CommentRepository for PgForumStore {
    async fn add_comment(&self, new_comment: NewComment) -> Result<AddedComment> {
        let row = sqlx::query(
            "INSERT INTO comments (id, thread_id, owner, content) VALUES ($1, $2, $3, $4) \
             RETURNING id, content, owner",
        )
        .bind(generate_id("comment"))
        .bind(&new_comment.thread_id)
        .bind(&new_comment.owner)
        .bind(&new_comment.content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(AddedComment {
            id: row.try_get("id").map_err(map_db_error)?,
            content: row.try_get("content").map_err(map_db_error)?,
            owner: row.try_get("owner").map_err(map_db_error)?,
        })
    }

    async fn check_comment_is_exist(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        // Soft-deleted comments still match.
        sqlx::query(
            "SELECT 1 FROM comments c INNER JOIN threads t ON t.id = c.thread_id \
             WHERE t.id = $1 AND c.id = $2",
        )
        .bind(thread_id)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(|_| ())
        .ok_or_else(|| DomainError::not_found("comment"))
    }

    async fn verify_comment_access(&self, comment_id: &str, owner: &str) -> Result<()> {
        sqlx::query("SELECT 1 FROM comments WHERE id = $1 AND owner = $2")
            .bind(comment_id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(|_| ())
            .ok_or_else(|| DomainError::authorization("you do not have access to this comment"))
    }

    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE comments SET is_deleted = TRUE WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("comment"));
        }
        Ok(())
    }

    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<CommentRecord>> {
        let rows = sqlx::query(
            "SELECT c.id, c.content, c.created_at, c.is_deleted, \
                    COALESCE(u.username, c.owner) AS username \
             FROM comments c LEFT JOIN users u ON u.id = c.owner \
             WHERE c.thread_id = $1 \
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.iter()
            .map(comment_record)
            .collect::<std::result::Result<_, _>>()
            .map_err(map_db_error)
    }
}

#[async_trait]
impl ReplyRepository for PgForumStore {
    async fn add_reply(&self, new_reply: NewReply) -> Result<AddedReply> {
        let row = sqlx::query(
            "INSERT INTO replies (id, comment_id, owner, content) VALUES ($1, $2, $3, $4) \
             RETURNING id, content, owner",
        )
        .bind(generate_id("reply"))
        .bind(&new_reply.comment_id)
        .bind(&new_reply.owner)
        .bind(&new_reply.content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(AddedReply {
            id: row.try_get("id").map_err(map_db_error)?,
            content: row.try_get("content").map_err(map_db_error)?,
            owner: row.try_get("owner").map_err(map_db_error)?,
        })
    }

    async fn check_reply_is_exist(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<()> {
        // Unlike comments, soft-deleted replies do not match.
        sqlx::query(
            "SELECT 1 FROM replies r INNER JOIN comments c ON c.id = r.comment_id \
             WHERE r.id = $1 AND r.comment_id = $2 AND c.thread_id = $3 AND r.is_deleted = FALSE",
        )
        .bind(reply_id)
        .bind(comment_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(|_| ())
        .ok_or_else(|| DomainError::not_found("reply"))
    }

    async fn verify_reply_access(&self, reply_id: &str, owner: &str) -> Result<()> {
        sqlx::query("SELECT 1 FROM replies WHERE id = $1 AND owner = $2")
            .bind(reply_id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(|_| ())
            .ok_or_else(|| DomainError::authorization("you do not have access to this reply"))
    }

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE replies SET is_deleted = TRUE WHERE id = $1")
            .bind(reply_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("reply"));
        }
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for PgForumStore {
    async fn add_like(&self, new_like: NewLike) -> Result<AddedLike> {
        let row = sqlx::query(
            "INSERT INTO likes (id, comment_id, owner) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(generate_id("like"))
        .bind(&new_like.comment_id)
        .bind(&new_like.owner)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(AddedLike { id: row.try_get("id").map_err(map_db_error)? })
    }

    async fn check_like_is_exists(&self, comment_id: &str, owner: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM likes WHERE comment_id = $1 AND owner = $2")
            .bind(comment_id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.is_some())
    }

    async fn delete_like_by_comment_id_and_owner(
        &self,
        comment_id: &str,
        owner: &str,
    ) -> Result<()> {
        let result = sqlx::query("DELETE FROM likes WHERE comment_id = $1 AND owner = $2")
            .bind(comment_id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("like"));
        }
        Ok(())
    }

    async fn get_like_count_by_comment_id(&self, comment_id: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
