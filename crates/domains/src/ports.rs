//! # Core Traits (Ports)
//!
//! Any storage or auth adapter must implement these traits to be wired into
//! the binary. Use cases depend on `Arc<dyn Trait>` only, never on a
//! concrete store.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    AddedComment, AddedLike, AddedReply, AddedThread, CommentRecord, DetailThread, NewComment,
    NewLike, NewReply, NewThread, ReplyRecord,
};

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn add_thread(&self, new_thread: NewThread) -> Result<AddedThread>;

    /// `NotFound` if no thread has this id.
    async fn check_thread_by_id(&self, thread_id: &str) -> Result<()>;

    /// Thread metadata with an empty comment list.
    async fn get_thread_by_id(&self, thread_id: &str) -> Result<DetailThread>;

    /// Every reply under every comment of the thread, oldest first.
    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<ReplyRecord>>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(&self, new_comment: NewComment) -> Result<AddedComment>;

    /// `NotFound` unless the comment exists under the thread. Soft-deleted
    /// comments still count as existing.
    async fn check_comment_is_exist(&self, thread_id: &str, comment_id: &str) -> Result<()>;

    /// `Authorization` unless `owner` owns the comment.
    async fn verify_comment_access(&self, comment_id: &str, owner: &str) -> Result<()>;

    /// Soft delete.
    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<()>;

    /// Oldest first.
    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<CommentRecord>>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReplyRepository: Send + Sync {
    async fn add_reply(&self, new_reply: NewReply) -> Result<AddedReply>;

    /// `NotFound` unless the reply exists, is not soft-deleted, belongs to
    /// the comment, and the comment belongs to the thread.
    async fn check_reply_is_exist(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<()>;

    async fn verify_reply_access(&self, reply_id: &str, owner: &str) -> Result<()>;

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// `Conflict` if this owner already likes this comment.
    async fn add_like(&self, new_like: NewLike) -> Result<AddedLike>;

    async fn check_like_is_exists(&self, comment_id: &str, owner: &str) -> Result<bool>;

    /// Physical removal. `NotFound` if there was nothing to remove.
    async fn delete_like_by_comment_id_and_owner(&self, comment_id: &str, owner: &str)
        -> Result<()>;

    async fn get_like_count_by_comment_id(&self, comment_id: &str) -> Result<u64>;
}

/// Resolves a bearer credential to the id of the calling user.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AccessTokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<String>;
}
