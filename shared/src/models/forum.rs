//! Community forum models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Maximum username length, in characters
pub const MAX_USERNAME_LEN: u64 = 50;

/// Maximum post body length, in characters
pub const MAX_POST_CONTENT_LEN: u64 = 2000;

/// Maximum comment length, in characters
pub const MAX_COMMENT_LEN: u64 = 1000;

/// A forum post with its reaction counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub dislikes: i64,
}

/// A comment on a forum post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Counter incremented by a reaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// Past-tense verb used in confirmation messages
    pub fn verb(&self) -> &'static str {
        match self {
            Reaction::Like => "liked",
            Reaction::Dislike => "disliked",
        }
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters"))]
    pub content: String,
}

impl CreatePostInput {
    /// Trim surrounding whitespace before validation
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

/// Input for commenting on a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "Comment must be between 1 and 1000 characters"))]
    pub comment: String,
}

impl CreateCommentInput {
    /// Trim surrounding whitespace before validation
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            comment: self.comment.trim().to_string(),
        }
    }
}
