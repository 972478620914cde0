use std::sync::Arc;

use domains::{AddedThread, NewThread, Result, ThreadRepository};
use serde_json::Value;
use tracing::info;

pub struct AddThreadUseCase {
    thread_repository: Arc<dyn ThreadRepository>,
}

impl AddThreadUseCase {
    pub fn new(thread_repository: Arc<dyn ThreadRepository>) -> Self {
        Self { thread_repository }
    }

    #[tracing::instrument(name = "add_thread", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<AddedThread> {
        let new_thread = NewThread::from_payload(payload)?;
        let added = self.thread_repository.add_thread(new_thread).await?;
        info!(thread_id = %added.id, owner = %added.owner, "thread created");
        Ok(added)
    }
}
