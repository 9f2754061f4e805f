//! HTTP handlers for crop recommendation

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::crop_recommendation::{
    CropRecommendationRequest, CropRecommendationResponse, CropRecommendationService,
};
use crate::AppState;

/// Recommend crops for a location
/// POST /api/crop-recommendation
pub async fn recommend_crops(
    State(state): State<AppState>,
    body: Option<Json<CropRecommendationRequest>>,
) -> AppResult<Json<CropRecommendationResponse>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let service = CropRecommendationService::new(
        state.clients.weather.clone(),
        state.clients.crop_data.clone(),
        state.config.recommendation.policy(),
    );
    let response = service.recommend(&request.location_text()).await?;
    Ok(Json(response))
}
