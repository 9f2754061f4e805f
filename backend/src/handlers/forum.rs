//! HTTP handlers for the community forum

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use shared::{Comment, CreateCommentInput, CreatePostInput, ForumPost, Reaction};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::forum::{CommentCreated, ForumService, ReactionResponse};
use crate::AppState;

/// GET /api/forum/posts
pub async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<ForumPost>>> {
    let service = ForumService::new(state.store);
    Ok(Json(service.list_posts().await?))
}

/// POST /api/forum/posts
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePostInput>,
) -> AppResult<(StatusCode, Json<ForumPost>)> {
    let service = ForumService::new(state.store);
    let post = service.create_post(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// POST /api/forum/posts/:id/like
pub async fn like_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Json<ReactionResponse>> {
    let service = ForumService::new(state.store);
    Ok(Json(service.react(&post_id, Reaction::Like).await?))
}

/// POST /api/forum/posts/:id/dislike
pub async fn dislike_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Json<ReactionResponse>> {
    let service = ForumService::new(state.store);
    Ok(Json(service.react(&post_id, Reaction::Dislike).await?))
}

/// GET /api/forum/posts/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Json<Vec<Comment>>> {
    let service = ForumService::new(state.store);
    Ok(Json(service.list_comments(&post_id).await?))
}

/// POST /api/forum/posts/:id/comment
pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    AppJson(input): AppJson<CreateCommentInput>,
) -> AppResult<(StatusCode, Json<CommentCreated>)> {
    let service = ForumService::new(state.store);
    let created = service.add_comment(&post_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fallback for unmatched forum routes
pub async fn forum_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
