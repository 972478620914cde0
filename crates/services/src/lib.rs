//! # services
//!
//! Application use cases for the forum. Each use case takes a plain JSON
//! payload, validates it, enforces existence and ownership through the
//! repository ports, and performs at most one state change.

mod add_comment;
mod add_reply;
mod add_thread;
mod delete_comment;
mod delete_reply;
mod get_thread;
mod toggle_like;

pub use add_comment::AddCommentUseCase;
pub use add_reply::AddReplyUseCase;
pub use add_thread::AddThreadUseCase;
pub use delete_comment::DeleteCommentUseCase;
pub use delete_reply::DeleteReplyUseCase;
pub use get_thread::GetThreadUseCase;
pub use toggle_like::ToggleLikeUseCase;

use std::sync::Arc;

use domains::{CommentRepository, LikeRepository, ReplyRepository, ThreadRepository};

/// Every use case, wired once at startup and shared across requests.
pub struct ForumUseCases {
    pub add_thread: AddThreadUseCase,
    pub get_thread: GetThreadUseCase,
    pub add_comment: AddCommentUseCase,
    pub delete_comment: DeleteCommentUseCase,
    pub add_reply: AddReplyUseCase,
    pub delete_reply: DeleteReplyUseCase,
    pub toggle_like: ToggleLikeUseCase,
}

impl ForumUseCases {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        replies: Arc<dyn ReplyRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            add_thread: AddThreadUseCase::new(threads.clone()),
            get_thread: GetThreadUseCase::new(threads.clone(), comments.clone(), likes.clone()),
            add_comment: AddCommentUseCase::new(threads, comments.clone()),
            delete_comment: DeleteCommentUseCase::new(comments.clone()),
            add_reply: AddReplyUseCase::new(comments.clone(), replies.clone()),
            delete_reply: DeleteReplyUseCase::new(replies),
            toggle_like: ToggleLikeUseCase::new(comments, likes),
        }
    }
}
