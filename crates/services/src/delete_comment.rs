use std::sync::Arc;

use domains::payload::Payload;
use domains::{CommentRepository, Result};
use serde_json::Value;
use tracing::info;

pub struct DeleteCommentUseCase {
    comment_repository: Arc<dyn CommentRepository>,
}

impl DeleteCommentUseCase {
    pub fn new(comment_repository: Arc<dyn CommentRepository>) -> Self {
        Self { comment_repository }
    }

    /// Existence is checked before ownership, so a stranger deleting a
    /// missing comment sees `NotFound`, not `Authorization`.
    #[tracing::instrument(name = "delete_comment", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<()> {
        let payload = Payload::new("delete comment use case", payload);
        payload.require(&["commentId"])?;

        let comment_id = payload.str_or_empty("commentId");
        let thread_id = payload.str_or_empty("threadId");
        let owner = payload.str_or_empty("owner");

        self.comment_repository.check_comment_is_exist(thread_id, comment_id).await?;
        self.comment_repository.verify_comment_access(comment_id, owner).await?;
        self.comment_repository.delete_comment_by_id(comment_id).await?;

        info!(%thread_id, %comment_id, "comment soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockCommentRepository, ValidationError};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use serde_json::json;

    fn payload() -> Value {
        json!({ "threadId": "thread-123", "commentId": "comment-123", "owner": "user-123" })
    }

    #[tokio::test]
    async fn rejects_missing_comment_id() {
        let repo = MockCommentRepository::new();
        let use_case = DeleteCommentUseCase::new(Arc::new(repo));

        let err = use_case
            .execute(&json!({ "threadId": "thread-123", "owner": "user-123" }))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::Validation(ValidationError::MissingProperty {
                entity: "delete comment use case",
                field: "commentId",
            })
        );
    }

    #[tokio::test]
    async fn rejects_non_string_comment_id() {
        let use_case = DeleteCommentUseCase::new(Arc::new(MockCommentRepository::new()));
        let err = use_case.execute(&json!({ "commentId": 123 })).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidType { field: "commentId", .. })
        ));
    }

    #[tokio::test]
    async fn checks_existence_then_access_then_deletes() {
        let mut seq = Sequence::new();
        let mut repo = MockCommentRepository::new();
        repo.expect_check_comment_is_exist()
            .with(eq("thread-123"), eq("comment-123"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        repo.expect_verify_comment_access()
            .with(eq("comment-123"), eq("user-123"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        repo.expect_delete_comment_by_id()
            .with(eq("comment-123"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let use_case = DeleteCommentUseCase::new(Arc::new(repo));
        assert!(use_case.execute(&payload()).await.is_ok());
    }

    #[tokio::test]
    async fn non_owner_is_refused_before_delete() {
        let mut repo = MockCommentRepository::new();
        repo.expect_check_comment_is_exist().returning(|_, _| Ok(()));
        repo.expect_verify_comment_access()
            .returning(|_, _| Err(DomainError::authorization("not the comment owner")));
        repo.expect_delete_comment_by_id().never();

        let use_case = DeleteCommentUseCase::new(Arc::new(repo));
        let err = use_case.execute(&payload()).await.unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));
    }

    #[tokio::test]
    async fn missing_comment_wins_over_ownership() {
        let mut repo = MockCommentRepository::new();
        repo.expect_check_comment_is_exist()
            .returning(|_, _| Err(DomainError::not_found("comment")));
        repo.expect_verify_comment_access().never();
        repo.expect_delete_comment_by_id().never();

        let use_case = DeleteCommentUseCase::new(Arc::new(repo));
        let err = use_case.execute(&payload()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
