use std::sync::Arc;

use domains::payload::Payload;
use domains::{ReplyRepository, Result};
use serde_json::Value;
use tracing::info;

pub struct DeleteReplyUseCase {
    reply_repository: Arc<dyn ReplyRepository>,
}

impl DeleteReplyUseCase {
    pub fn new(reply_repository: Arc<dyn ReplyRepository>) -> Self {
        Self { reply_repository }
    }

    #[tracing::instrument(name = "delete_reply", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<()> {
        let payload = Payload::new("delete reply use case", payload);
        payload.require(&["replyId"])?;

        let reply_id = payload.str_or_empty("replyId");
        let comment_id = payload.str_or_empty("commentId");
        let thread_id = payload.str_or_empty("threadId");
        let owner = payload.str_or_empty("owner");

        self.reply_repository.check_reply_is_exist(thread_id, comment_id, reply_id).await?;
        self.reply_repository.verify_reply_access(reply_id, owner).await?;
        self.reply_repository.delete_reply_by_id(reply_id).await?;

        info!(%comment_id, %reply_id, "reply soft-deleted");
        Ok(())
    }
}
