use std::sync::Arc;

use domains::{CommentRepository, LikeRepository, LikeToggle, NewLike, Result};
use serde_json::Value;
use tracing::info;

/// Likes a comment, or removes the caller's like if one already exists.
///
/// Check-then-act: two racing toggles for the same pair can both see "no
/// like". The store's uniqueness constraint then rejects the second insert
/// with `Conflict`, which is returned to the caller unchanged.
pub struct ToggleLikeUseCase {
    comment_repository: Arc<dyn CommentRepository>,
    like_repository: Arc<dyn LikeRepository>,
}

impl ToggleLikeUseCase {
    pub fn new(
        comment_repository: Arc<dyn CommentRepository>,
        like_repository: Arc<dyn LikeRepository>,
    ) -> Self {
        Self { comment_repository, like_repository }
    }

    #[tracing::instrument(name = "toggle_like", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<LikeToggle> {
        let new_like = NewLike::from_payload(payload)?;
        let thread_id = payload.get("threadId").and_then(Value::as_str).unwrap_or_default();

        self.comment_repository.check_comment_is_exist(thread_id, &new_like.comment_id).await?;

        let already_liked = self
            .like_repository
            .check_like_is_exists(&new_like.comment_id, &new_like.owner)
            .await?;

        if already_liked {
            self.like_repository
                .delete_like_by_comment_id_and_owner(&new_like.comment_id, &new_like.owner)
                .await?;
            info!(comment_id = %new_like.comment_id, "like removed");
            Ok(LikeToggle::Unliked)
        } else {
            let comment_id = new_like.comment_id.clone();
            self.like_repository.add_like(new_like).await?;
            info!(%comment_id, "like added");
            Ok(LikeToggle::Liked)
        }
    }
}
