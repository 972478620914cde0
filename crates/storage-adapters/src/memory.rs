//! # In-memory store
//!
//! A process-local implementation of every repository port, backed by
//! concurrent maps. Used for local development, demos and tests; nothing
//! survives a restart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{
    generate_id, AddedComment, AddedLike, AddedReply, AddedThread, CommentRecord,
    CommentRepository, DetailThread, DomainError, LikeRepository, NewComment, NewLike, NewReply,
    NewThread, ReplyRecord, ReplyRepository, Result, ThreadRepository, Visibility,
};
use tracing::debug;

struct ThreadRow {
    title: String,
    body: String,
    owner: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
struct CommentRow {
    thread_id: String,
    owner: String,
    content: String,
    created_at: DateTime<Utc>,
    seq: u64,
    visibility: Visibility,
}

#[derive(Clone)]
struct ReplyRow {
    comment_id: String,
    owner: String,
    content: String,
    created_at: DateTime<Utc>,
    seq: u64,
    visibility: Visibility,
}

#[derive(Default)]
struct Inner {
    sequence: AtomicU64,
    /// user id -> display name
    users: DashMap<String, String>,
    threads: DashMap<String, ThreadRow>,
    comments: DashMap<String, CommentRow>,
    replies: DashMap<String, ReplyRow>,
    /// comment id -> owner -> like id
    likes: DashMap<String, DashMap<String, String>>,
}

/// Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct MemoryForumStore {
    inner: Arc<Inner>,
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name shown for `user_id`. Unregistered owners are
    /// shown by their id.
    pub fn register_user(&self, user_id: impl Into<String>, username: impl Into<String>) {
        self.inner.users.insert(user_id.into(), username.into());
    }

    fn username(&self, owner: &str) -> String {
        self.inner
            .users
            .get(owner)
            .map(|name| name.value().clone())
            .unwrap_or_else(|| owner.to_string())
    }

    fn next_seq(&self) -> u64 {
        self.inner.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn comment_in_thread(&self, thread_id: &str, comment_id: &str) -> bool {
        self.inner.threads.contains_key(thread_id)
            && self
                .inner
                .comments
                .get(comment_id)
                .is_some_and(|comment| comment.thread_id == thread_id)
    }
}

#[async_trait]
impl ThreadRepository for MemoryForumStore {
    async fn add_thread(&self, new_thread: NewThread) -> Result<AddedThread> {
        let id = generate_id("thread");
        self.inner.threads.insert(
            id.clone(),
            ThreadRow {
                title: new_thread.title.clone(),
                body: new_thread.body,
                owner: new_thread.owner.clone(),
                created_at: Utc::now(),
            },
        );
        debug!(thread_id = %id, "thread stored");
        Ok(AddedThread { id, title: new_thread.title, owner: new_thread.owner })
    }

    async fn check_thread_by_id(&self, thread_id: &str) -> Result<()> {
        if self.inner.threads.contains_key(thread_id) {
            Ok(())
        } else {
            Err(DomainError::not_found("thread"))
        }
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<DetailThread> {
        let row = self
            .inner
            .threads
            .get(thread_id)
            .ok_or_else(|| DomainError::not_found("thread"))?;
        Ok(DetailThread {
            id: thread_id.to_string(),
            title: row.title.clone(),
            body: row.body.clone(),
            date: row.created_at,
            username: self.username(&row.owner),
            comments: Vec::new(),
        })
    }

    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<ReplyRecord>> {
        let mut rows: Vec<(String, ReplyRow)> = self
            .inner
            .replies
            .iter()
            .filter(|entry| {
                self.inner
                    .comments
                    .get(&entry.value().comment_id)
                    .is_some_and(|comment| comment.thread_id == thread_id)
            })
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(_, row)| (row.created_at, row.seq));

        Ok(rows
            .into_iter()
            .map(|(id, row)| ReplyRecord {
                id,
                username: self.username(&row.owner),
                comment_id: row.comment_id,
                content: row.content,
                date: row.created_at,
                visibility: row.visibility,
            })
            .collect())
    }
}

#[async_trait]
impl CommentRepository for MemoryForumStore {
    async fn add_comment(&self, new_comment: NewComment) -> Result<AddedComment> {
        let id = generate_id("comment");
        self.inner.comments.insert(
            id.clone(),
            CommentRow {
                thread_id: new_comment.thread_id,
                owner: new_comment.owner.clone(),
                content: new_comment.content.clone(),
                created_at: Utc::now(),
                seq: self.next_seq(),
                visibility: Visibility::Active,
            },
        );
        Ok(AddedComment { id, content: new_comment.content, owner: new_comment.owner })
    }

    async fn check_comment_is_exist(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        if self.comment_in_thread(thread_id, comment_id) {
            Ok(())
        } else {
            Err(DomainError::not_found("comment"))
        }
    }

    async fn verify_comment_access(&self, comment_id: &str, owner: &str) -> Result<()> {
        let owns = self
            .inner
            .comments
            .get(comment_id)
            .is_some_and(|comment| comment.owner == owner);
        if owns {
            Ok(())
        } else {
            Err(DomainError::authorization("you do not have access to this comment"))
        }
    }

    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<()> {
        match self.inner.comments.get_mut(comment_id) {
            Some(mut comment) => {
                comment.visibility = Visibility::Deleted;
                Ok(())
            }
            None => Err(DomainError::not_found("comment")),
        }
    }

    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<CommentRecord>> {
        let mut rows: Vec<(String, CommentRow)> = self
            .inner
            .comments
            .iter()
            .filter(|entry| entry.value().thread_id == thread_id)
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(_, row)| (row.created_at, row.seq));

        Ok(rows
            .into_iter()
            .map(|(id, row)| CommentRecord {
                id,
                username: self.username(&row.owner),
                date: row.created_at,
                content: row.content,
                visibility: row.visibility,
            })
            .collect())
    }
}

#[async_trait]
impl ReplyRepository for MemoryForumStore {
    async fn add_reply(&self, new_reply: NewReply) -> Result<AddedReply> {
        let id = generate_id("reply");
        self.inner.replies.insert(
            id.clone(),
            ReplyRow {
                comment_id: new_reply.comment_id,
                owner: new_reply.owner.clone(),
                content: new_reply.content.clone(),
                created_at: Utc::now(),
                seq: self.next_seq(),
                visibility: Visibility::Active,
            },
        );
        Ok(AddedReply { id, content: new_reply.content, owner: new_reply.owner })
    }

    async fn check_reply_is_exist(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<()> {
        let live_under_comment = self.inner.replies.get(reply_id).is_some_and(|reply| {
            reply.comment_id == comment_id && !reply.visibility.is_deleted()
        });
        if live_under_comment && self.comment_in_thread(thread_id, comment_id) {
            Ok(())
        } else {
            Err(DomainError::not_found("reply"))
        }
    }

    async fn verify_reply_access(&self, reply_id: &str, owner: &str) -> Result<()> {
        let owns = self.inner.replies.get(reply_id).is_some_and(|reply| reply.owner == owner);
        if owns {
            Ok(())
        } else {
            Err(DomainError::authorization("you do not have access to this reply"))
        }
    }

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<()> {
        match self.inner.replies.get_mut(reply_id) {
            Some(mut reply) => {
                reply.visibility = Visibility::Deleted;
                Ok(())
            }
            None => Err(DomainError::not_found("reply")),
        }
    }
}

#[async_trait]
impl LikeRepository for MemoryForumStore {
    async fn add_like(&self, new_like: NewLike) -> Result<AddedLike> {
        let owners = self.inner.likes.entry(new_like.comment_id).or_default();
        let added = match owners.entry(new_like.owner) {
            Entry::Occupied(_) => Err(DomainError::Conflict("comment already liked".into())),
            Entry::Vacant(slot) => {
                let id = generate_id("like");
                slot.insert(id.clone());
                Ok(AddedLike { id })
            }
        };
        added
    }

    async fn check_like_is_exists(&self, comment_id: &str, owner: &str) -> Result<bool> {
        Ok(self.inner.likes.get(comment_id).is_some_and(|owners| owners.contains_key(owner)))
    }

    async fn delete_like_by_comment_id_and_owner(
        &self,
        comment_id: &str,
        owner: &str,
    ) -> Result<()> {
        self.inner
            .likes
            .get(comment_id)
            .and_then(|owners| owners.remove(owner))
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("like"))
    }

    async fn get_like_count_by_comment_id(&self, comment_id: &str) -> Result<u64> {
        let count = self.inner.likes.get(comment_id).map_or(0, |owners| owners.len());
        Ok(count as u64)
    }
}
