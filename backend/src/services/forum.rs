//! Forum service for posts, reactions and comments

use serde::Serialize;
use shared::{validation_message, Comment, CreateCommentInput, CreatePostInput, ForumPost, Reaction};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Response to a like or dislike
#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    pub message: String,
    pub likes: i64,
    pub dislikes: i64,
}

/// Response to a new comment
#[derive(Debug, Serialize)]
pub struct CommentCreated {
    pub message: String,
    pub comment: Comment,
}

#[derive(Clone)]
pub struct ForumService {
    store: Arc<dyn Store>,
}

/// Unparseable ids can never match a stored post
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound("Post".to_string()))
}

impl ForumService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_posts(&self) -> AppResult<Vec<ForumPost>> {
        self.store.list_posts().await
    }

    pub async fn create_post(&self, input: CreatePostInput) -> AppResult<ForumPost> {
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        let post = self.store.create_post(&input.username, &input.content).await?;
        tracing::info!(post_id = %post.id, "Forum post created");
        Ok(post)
    }

    pub async fn react(&self, post_id: &str, reaction: Reaction) -> AppResult<ReactionResponse> {
        let post_id = parse_post_id(post_id)?;
        let post = self
            .store
            .increment_reaction(post_id, reaction)
            .await?
            .ok_or_else(|| AppError::NotFound("Post".to_string()))?;

        Ok(ReactionResponse {
            message: format!("Post {} successfully", reaction.verb()),
            likes: post.likes,
            dislikes: post.dislikes,
        })
    }

    pub async fn list_comments(&self, post_id: &str) -> AppResult<Vec<Comment>> {
        let post_id = parse_post_id(post_id)?;
        if !self.store.post_exists(post_id).await? {
            return Err(AppError::NotFound("Post".to_string()));
        }
        self.store.list_comments(post_id).await
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<CommentCreated> {
        let post_id = parse_post_id(post_id)?;
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        let comment = self
            .store
            .add_comment(post_id, &input.username, &input.comment)
            .await?
            .ok_or_else(|| AppError::NotFound("Post".to_string()))?;

        Ok(CommentCreated {
            message: "Comment added successfully".to_string(),
            comment,
        })
    }
}
