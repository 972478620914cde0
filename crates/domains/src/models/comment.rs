use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::{DetailReply, Visibility};
use crate::errors::ValidationError;
use crate::payload::Payload;

/// Shown in place of a soft-deleted comment's content.
pub const DELETED_COMMENT_PLACEHOLDER: &str = "**komentar telah dihapus**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub thread_id: String,
    pub owner: String,
}

impl NewComment {
    pub fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let payload = Payload::new("new comment", value);
        payload.require(&["content", "threadId", "owner"])?;
        Ok(Self {
            content: payload.string("content")?,
            thread_id: payload.string("threadId")?,
            owner: payload.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// Comment row as the store returns it, before masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailComment {
    pub id: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub like_count: u64,
    pub replies: Vec<DetailReply>,
}

impl DetailComment {
    /// Projects a stored row, masking content when the comment is deleted.
    /// Replies and like count are attached by the aggregation pass.
    pub fn masked(record: CommentRecord) -> Self {
        let content = if record.visibility.is_deleted() {
            DELETED_COMMENT_PLACEHOLDER.to_string()
        } else {
            record.content
        };
        Self {
            id: record.id,
            username: record.username,
            date: record.date,
            content,
            like_count: 0,
            replies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(visibility: Visibility) -> CommentRecord {
        CommentRecord {
            id: "comment-123".into(),
            username: "dicoding".into(),
            date: Utc::now(),
            content: "sebuah comment".into(),
            visibility,
        }
    }

    #[test]
    fn new_comment_requires_thread_id() {
        let err =
            NewComment::from_payload(&json!({ "content": "hi", "owner": "user-1" })).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingProperty { entity: "new comment", field: "threadId" }
        );
    }

    #[test]
    fn new_comment_rejects_numeric_content() {
        let err = NewComment::from_payload(&json!({
            "content": 123, "threadId": "thread-1", "owner": "user-1"
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType { field: "content", .. }));
    }

    #[test]
    fn deleted_comment_is_masked() {
        let comment = DetailComment::masked(record(Visibility::Deleted));
        assert_eq!(comment.content, DELETED_COMMENT_PLACEHOLDER);
    }

    #[test]
    fn active_comment_keeps_content() {
        let comment = DetailComment::masked(record(Visibility::Active));
        assert_eq!(comment.content, "sebuah comment");
    }

    #[test]
    fn serialized_comment_has_like_count_and_no_deletion_flag() {
        let comment = DetailComment::masked(record(Visibility::Deleted));
        let value = serde_json::to_value(comment).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("likeCount"));
        assert!(!object.contains_key("isDeleted"));
        assert!(!object.contains_key("is_deleted"));
    }
}
