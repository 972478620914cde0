//! Thread detail aggregation.
//!
//! The store hands back three flat lists (thread, comments, replies). This
//! use case masks soft-deleted content, nests each reply under its comment,
//! and attaches like counts before returning one tree.

use std::collections::HashMap;
use std::sync::Arc;

use domains::payload::Payload;
use domains::{
    CommentRecord, CommentRepository, DetailComment, DetailReply, DetailThread, LikeRepository,
    ReplyRecord, Result, ThreadRepository,
};
use serde_json::Value;
use tracing::debug;

pub struct GetThreadUseCase {
    thread_repository: Arc<dyn ThreadRepository>,
    comment_repository: Arc<dyn CommentRepository>,
    like_repository: Arc<dyn LikeRepository>,
}

impl GetThreadUseCase {
    pub fn new(
        thread_repository: Arc<dyn ThreadRepository>,
        comment_repository: Arc<dyn CommentRepository>,
        like_repository: Arc<dyn LikeRepository>,
    ) -> Self {
        Self { thread_repository, comment_repository, like_repository }
    }

    #[tracing::instrument(name = "get_thread", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<DetailThread> {
        let payload = Payload::new("get thread use case", payload);
        payload.require(&["threadId"])?;
        let thread_id = payload.str_or_empty("threadId");

        let mut thread = self.thread_repository.get_thread_by_id(thread_id).await?;
        let comments = self.comment_repository.get_comments_by_thread_id(thread_id).await?;
        let replies = self.thread_repository.get_replies_by_thread_id(thread_id).await?;
        debug!(
            %thread_id,
            comments = comments.len(),
            replies = replies.len(),
            "thread rows fetched"
        );

        let mut comments = attach_replies(mask_comments(comments), replies);
        for comment in &mut comments {
            comment.like_count =
                self.like_repository.get_like_count_by_comment_id(&comment.id).await?;
        }

        thread.comments = comments;
        Ok(thread)
    }
}

fn mask_comments(records: Vec<CommentRecord>) -> Vec<DetailComment> {
    records.into_iter().map(DetailComment::masked).collect()
}

/// Parent-id join: one pass to index replies by comment, one pass to attach.
/// Relative order within each comment follows the fetched order; replies
/// whose comment is not in `comments` are dropped.
fn attach_replies(
    mut comments: Vec<DetailComment>,
    replies: Vec<ReplyRecord>,
) -> Vec<DetailComment> {
    let mut by_comment: HashMap<String, Vec<DetailReply>> = HashMap::new();
    for record in replies {
        by_comment
            .entry(record.comment_id.clone())
            .or_default()
            .push(DetailReply::masked(record));
    }

    for comment in &mut comments {
        comment.replies = by_comment.remove(&comment.id).unwrap_or_default();
    }
    comments
}
