use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::DetailComment;
use crate::errors::ValidationError;
use crate::payload::Payload;

pub const MAX_TITLE_CHARS: usize = 50;

/// Validated request to open a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub owner: String,
}

impl NewThread {
    pub fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let payload = Payload::new("new thread", value);
        payload.require(&["title", "body", "owner"])?;

        let title = payload.string("title")?;
        let actual = title.chars().count();
        if actual > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong { max: MAX_TITLE_CHARS, actual });
        }

        Ok(Self {
            title,
            body: payload.string("body")?,
            owner: payload.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

/// A thread as presented to readers, with its comment tree attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailThread {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub username: String,
    pub comments: Vec<DetailComment>,
}
