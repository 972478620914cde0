use std::sync::Arc;

use domains::{AddedReply, CommentRepository, NewReply, ReplyRepository, Result};
use serde_json::Value;
use tracing::info;

pub struct AddReplyUseCase {
    comment_repository: Arc<dyn CommentRepository>,
    reply_repository: Arc<dyn ReplyRepository>,
}

impl AddReplyUseCase {
    pub fn new(
        comment_repository: Arc<dyn CommentRepository>,
        reply_repository: Arc<dyn ReplyRepository>,
    ) -> Self {
        Self { comment_repository, reply_repository }
    }

    #[tracing::instrument(name = "add_reply", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<AddedReply> {
        let new_reply = NewReply::from_payload(payload)?;
        self.comment_repository
            .check_comment_is_exist(&new_reply.thread_id, &new_reply.comment_id)
            .await?;

        let comment_id = new_reply.comment_id.clone();
        let added = self.reply_repository.add_reply(new_reply).await?;
        info!(%comment_id, reply_id = %added.id, "reply added");
        Ok(added)
    }
}
