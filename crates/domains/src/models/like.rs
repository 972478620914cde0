use serde::Serialize;
use serde_json::Value;

use crate::errors::ValidationError;
use crate::payload::Payload;

/// One user's like on one comment. At most one exists per `(comment_id, owner)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLike {
    pub comment_id: String,
    pub owner: String,
}

impl NewLike {
    pub fn from_payload(value: &Value) -> Result<Self, ValidationError> {
        let payload = Payload::new("new like", value);
        payload.require(&["commentId", "owner"])?;
        Ok(Self {
            comment_id: payload.string("commentId")?,
            owner: payload.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedLike {
    pub id: String,
}

/// Which branch a like toggle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_like_requires_owner() {
        let err = NewLike::from_payload(&json!({ "commentId": "comment-1" })).unwrap_err();
        assert_eq!(err, ValidationError::MissingProperty { entity: "new like", field: "owner" });
    }

    #[test]
    fn new_like_rejects_non_string_comment_id() {
        let err =
            NewLike::from_payload(&json!({ "commentId": ["c"], "owner": "user-1" })).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType { field: "commentId", .. }));
    }
}
