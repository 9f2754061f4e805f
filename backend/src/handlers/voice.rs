//! HTTP handlers for the voice assistant

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use shared::ChatReply;

use crate::services::voice::{VoiceRequest, VoiceService};
use crate::AppState;

/// Rejection body; `reply` is localized for display
#[derive(Debug, Serialize)]
pub struct VoiceErrorResponse {
    pub error: String,
    pub reply: String,
}

/// POST /api/voice
pub async fn voice_chat(
    State(state): State<AppState>,
    body: Option<Json<VoiceRequest>>,
) -> Result<Json<ChatReply>, (StatusCode, Json<VoiceErrorResponse>)> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let service = VoiceService::new(state.clients.llm.clone());

    service.respond(request).await.map(Json).map_err(|rejection| {
        tracing::debug!(error = rejection.error(), "Voice request rejected");
        (
            StatusCode::BAD_REQUEST,
            Json(VoiceErrorResponse {
                error: rejection.error().to_string(),
                reply: rejection.reply().to_string(),
            }),
        )
    })
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub message: String,
    pub conversations: Vec<ChatReply>,
}

/// GET /api/voice/history
pub async fn voice_history() -> Json<HistoryResponse> {
    Json(HistoryResponse {
        message: "Conversation history feature coming soon!".to_string(),
        conversations: Vec::new(),
    })
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub success: bool,
}

/// DELETE /api/voice/clear
pub async fn clear_voice() -> Json<ClearResponse> {
    Json(ClearResponse {
        message: "Conversation cleared successfully".to_string(),
        success: true,
    })
}
