//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::{CurrentConditions, SaveCityInput};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::weather::{MessageResponse, WeatherService};
use crate::AppState;

/// Query parameters for current weather
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

fn service(state: AppState) -> WeatherService {
    WeatherService::new(state.store, state.clients.weather)
}

/// GET /api/weather?city=
pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> AppResult<Json<CurrentConditions>> {
    let conditions = service(state).current(query.city.as_deref()).await?;
    Ok(Json(conditions))
}

/// GET /api/weather/last-city
pub async fn last_city(State(state): State<AppState>) -> AppResult<Response> {
    let response = match service(state).last_city().await? {
        Some(saved) => Json(saved).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "No last searched city found".to_string(),
            }),
        )
            .into_response(),
    };
    Ok(response)
}

/// POST /api/weather/save-city
pub async fn save_city(
    State(state): State<AppState>,
    AppJson(input): AppJson<SaveCityInput>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(service(state).save_city(input).await?))
}
