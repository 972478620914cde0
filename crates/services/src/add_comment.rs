use std::sync::Arc;

use domains::{AddedComment, CommentRepository, NewComment, Result, ThreadRepository};
use serde_json::Value;
use tracing::info;

pub struct AddCommentUseCase {
    thread_repository: Arc<dyn ThreadRepository>,
    comment_repository: Arc<dyn CommentRepository>,
}

impl AddCommentUseCase {
    pub fn new(
        thread_repository: Arc<dyn ThreadRepository>,
        comment_repository: Arc<dyn CommentRepository>,
    ) -> Self {
        Self { thread_repository, comment_repository }
    }

    #[tracing::instrument(name = "add_comment", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<AddedComment> {
        let new_comment = NewComment::from_payload(payload)?;
        self.thread_repository.check_thread_by_id(&new_comment.thread_id).await?;

        let thread_id = new_comment.thread_id.clone();
        let added = self.comment_repository.add_comment(new_comment).await?;
        info!(%thread_id, comment_id = %added.id, "comment added");
        Ok(added)
    }
}
