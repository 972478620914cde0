use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::Visibility;
use crate::errors::ValidationError;
use crate::payload::Payload;

/// Shown in place of a soft-deleted reply's content.
pub const DELETED_REPLY_PLACEHOLDER: &str = "**balasan telah dihapus**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub content: String,
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
}

impl NewReply {
    pub fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let payload = Payload::new("new reply", value);
        payload.require(&["content", "threadId", "commentId", "owner"])?;
        Ok(Self {
            content: payload.string("content")?,
            thread_id: payload.string("threadId")?,
            comment_id: payload.string("commentId")?,
            owner: payload.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedReply {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// Reply row as the store returns it: still linked to its comment and
/// carrying its soft-delete state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRecord {
    pub id: String,
    pub comment_id: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub username: String,
    pub visibility: Visibility,
}

/// Reply nested under its comment in a thread view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailReply {
    pub id: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub username: String,
}

impl DetailReply {
    pub fn masked(record: ReplyRecord) -> Self {
        let content = if record.visibility.is_deleted() {
            DELETED_REPLY_PLACEHOLDER.to_string()
        } else {
            record.content
        };
        Self {
            id: record.id,
            content,
            date: record.date,
            username: record.username,
        }
    }
}
