//! HTTP handlers for plant disease prediction

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use shared::{DiseasePrediction, DISEASE_LABELS};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Maximum accepted upload size
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Body limit for the upload route, leaving room for multipart framing
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ModelHealth {
    Ok {
        status: &'static str,
        model: &'static str,
        labels: usize,
    },
    Error {
        status: &'static str,
        message: &'static str,
    },
}

/// Validated upload
struct ImageUpload {
    bytes: Vec<u8>,
}

/// Pull the `file` field out of the form and check it is a non-empty image
async fn read_image_upload(multipart: &mut Multipart) -> AppResult<ImageUpload> {
    let bad_form = |e: axum::extract::multipart::MultipartError| {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    };

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        if field.name() != Some("file") {
            continue;
        }

        let is_image = field
            .content_type()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(AppError::Validation(
                "Only image files are allowed!".to_string(),
            ));
        }

        let bytes = field.bytes().await.map_err(bad_form)?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "File too large. Maximum size is 5MB".to_string(),
            ));
        }

        return Ok(ImageUpload {
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::Validation(
        "No image uploaded. Please include a file.".to_string(),
    ))
}

/// Classify an uploaded leaf image
/// POST /api/disease/predict
pub async fn predict_disease(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DiseasePrediction>> {
    let upload = read_image_upload(&mut multipart).await?;
    tracing::debug!(bytes = upload.bytes.len(), "Disease prediction requested");

    let prediction = state.classifier.predict(upload.bytes).await?;
    tracing::info!(
        disease = %prediction.disease,
        confidence = prediction.confidence,
        "Disease predicted"
    );
    Ok(Json(prediction))
}

/// Load the model if needed and report readiness
/// GET /api/disease/healthz
pub async fn model_health(State(state): State<AppState>) -> (StatusCode, Json<ModelHealth>) {
    match state.classifier.ensure_loaded().await {
        Ok(_) => (
            StatusCode::OK,
            Json(ModelHealth::Ok {
                status: "ok",
                model: "loaded",
                labels: DISEASE_LABELS.len(),
            }),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ModelHealth::Error {
                status: "error",
                message: "Model loading failed.",
            }),
        ),
    }
}
