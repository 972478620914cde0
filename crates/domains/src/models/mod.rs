//! # Domain Models
//!
//! These structs represent the core entities of the forum.
//! Creation payloads (`New*`) validate themselves; read rows (`*Record`)
//! carry the internal soft-delete state; detail views (`Detail*`) are what
//! callers see and never expose that state.

pub mod comment;
pub mod like;
pub mod reply;
pub mod thread;

pub use comment::*;
pub use like::*;
pub use reply::*;
pub use thread::*;

use uuid::Uuid;

/// Soft-delete state of a comment or reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Active,
    Deleted,
}

impl Visibility {
    pub fn is_deleted(self) -> bool {
        self == Visibility::Deleted
    }
}

impl From<bool> for Visibility {
    fn from(is_deleted: bool) -> Self {
        if is_deleted {
            Visibility::Deleted
        } else {
            Visibility::Active
        }
    }
}

/// Prefixed, time-ordered identifier, e.g. `comment-0190c3…`.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7().simple())
}
