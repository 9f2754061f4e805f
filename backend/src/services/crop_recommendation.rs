//! Crop recommendation service
//!
//! Combines live weather for a place with the soil heuristic, scores every
//! crop profile and enriches the recommended crops with growing metadata.

use serde::{Deserialize, Serialize};
use shared::{
    estimate_soil, recommend_crops, validate_location, ConditionVector, CurrentConditions,
    RecommendationPolicy, RecommendationResult, SoilEstimate, CROP_PROFILES,
};

use crate::error::{AppError, AppResult};
use crate::external::openfarm::DEFAULT_CROP_IMAGE;
use crate::external::{CropMetadata, OpenFarmClient, WeatherClient};

/// Request body for a recommendation
#[derive(Debug, Default, Deserialize)]
pub struct CropRecommendationRequest {
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

impl CropRecommendationRequest {
    /// Location as text; numbers are accepted and stringified
    pub fn location_text(&self) -> String {
        match &self.location {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// One recommended crop with growing metadata
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub crop: String,
    pub suitability_score: u32,
    pub best_time: String,
    pub method: String,
    pub image: String,
}

impl CropRecommendation {
    pub fn from_parts(result: RecommendationResult, metadata: CropMetadata) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            crop: result.crop,
            suitability_score: result.score,
            best_time: non_empty(metadata.best_time).unwrap_or_else(|| "Unknown".to_string()),
            method: non_empty(metadata.sowing_method)
                .unwrap_or_else(|| "No specific method available".to_string()),
            image: non_empty(metadata.main_image_path)
                .unwrap_or_else(|| DEFAULT_CROP_IMAGE.to_string()),
        }
    }
}

/// Full recommendation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendationResponse {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// e.g. `"31.2°C"`
    pub temperature: String,
    /// e.g. `"70%"`
    pub humidity: String,
    pub soil: SoilEstimate,
    pub recommendations: Vec<CropRecommendation>,
}

/// Scored conditions for a weather observation, before metadata lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub soil: SoilEstimate,
    pub recommended: Vec<RecommendationResult>,
}

/// Score all crops for an observation; fails when temperature or humidity is missing
pub fn score_conditions(
    weather: &CurrentConditions,
    policy: RecommendationPolicy,
) -> AppResult<ScoredConditions> {
    let (Some(temperature), Some(humidity)) = (weather.temperature, weather.humidity) else {
        return Err(AppError::IncompleteUpstreamData(
            "Incomplete weather data".to_string(),
        ));
    };

    let soil = estimate_soil(weather.latitude, weather.longitude);
    let conditions = ConditionVector::from_weather_and_soil(temperature, humidity, &soil);
    tracing::debug!(?conditions, "Scoring crop profiles");

    let recommended = recommend_crops(CROP_PROFILES, &conditions, policy);
    Ok(ScoredConditions {
        temperature,
        humidity,
        soil,
        recommended,
    })
}

#[derive(Clone)]
pub struct CropRecommendationService {
    weather: WeatherClient,
    crop_data: OpenFarmClient,
    policy: RecommendationPolicy,
}

impl CropRecommendationService {
    pub fn new(
        weather: WeatherClient,
        crop_data: OpenFarmClient,
        policy: RecommendationPolicy,
    ) -> Self {
        Self {
            weather,
            crop_data,
            policy,
        }
    }

    /// Recommend crops for a free-text location
    pub async fn recommend(&self, location: &str) -> AppResult<CropRecommendationResponse> {
        let location = validate_location(location).map_err(|m| AppError::Validation(m.into()))?;

        let weather = self.weather.get_current_by_city(location).await?;
        let scored = score_conditions(&weather, self.policy)?;
        tracing::debug!(
            location,
            count = scored.recommended.len(),
            "Recommended crops"
        );

        let recommendations = self.with_metadata(scored.recommended).await;

        Ok(CropRecommendationResponse {
            location: location.to_string(),
            latitude: weather.latitude,
            longitude: weather.longitude,
            temperature: format!("{}°C", scored.temperature),
            humidity: format!("{}%", scored.humidity),
            soil: scored.soil,
            recommendations,
        })
    }

    /// Fetch metadata for every crop concurrently, preserving ranking order
    async fn with_metadata(&self, results: Vec<RecommendationResult>) -> Vec<CropRecommendation> {
        let handles: Vec<_> = results
            .iter()
            .map(|result| {
                let client = self.crop_data.clone();
                let crop = result.crop.clone();
                tokio::spawn(async move { client.get_crop(&crop).await })
            })
            .collect();

        let mut recommendations = Vec::with_capacity(results.len());
        for (result, handle) in results.into_iter().zip(handles) {
            let metadata = handle.await.unwrap_or_else(|e| {
                tracing::warn!(crop = %result.crop, "Crop metadata task failed: {}", e);
                CropMetadata::fallback()
            });
            recommendations.push(CropRecommendation::from_parts(result, metadata));
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FallbackPolicy;
    use std::time::Duration;

    fn weather(temperature: Option<f64>, humidity: Option<f64>) -> CurrentConditions {
        CurrentConditions {
            city: "Kolkata".into(),
            latitude: 22.57,
            longitude: 88.36,
            temperature,
            humidity,
            description: None,
            icon: None,
        }
    }

    #[test]
    fn test_missing_humidity_is_incomplete() {
        let err = score_conditions(&weather(Some(30.0), None), RecommendationPolicy::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, AppError::IncompleteUpstreamData(_)));
    }

    #[test]
    fn test_scores_are_ranked_and_thresholded() {
        let scored =
            score_conditions(&weather(Some(27.0), Some(75.0)), RecommendationPolicy::DEFAULT)
                .unwrap();
        assert!(!scored.recommended.is_empty());
        assert!(scored.recommended.iter().all(|r| r.score >= 2));
        assert!(scored
            .recommended
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
        assert!(scored.soil.ph > 5.0 && scored.soil.ph < 6.0);
    }

    #[test]
    fn test_extreme_weather_uses_fallback() {
        // Soil alone can match at most 3 criteria
        let policy = RecommendationPolicy {
            min_score: 4,
            fallback: FallbackPolicy::TopN(8),
        };
        let scored = score_conditions(&weather(Some(-40.0), Some(2.0)), policy).unwrap();
        assert_eq!(scored.recommended.len(), 8);
        assert!(scored.recommended.iter().all(|r| r.score <= 3));
    }

    #[test]
    fn test_metadata_defaults() {
        let result = RecommendationResult {
            crop: "Rice".into(),
            score: 4,
        };
        let rec = CropRecommendation::from_parts(result.clone(), CropMetadata::default());
        assert_eq!(rec.best_time, "Unknown");
        assert_eq!(rec.method, "No specific method available");
        assert_eq!(rec.image, "/images/default.jpg");

        let rec = CropRecommendation::from_parts(result, CropMetadata::fallback());
        assert_eq!(rec.best_time, "Data not available");
        assert_eq!(rec.suitability_score, 4);
    }

    #[test]
    fn test_location_text() {
        let req: CropRecommendationRequest = serde_json::from_str(r#"{"location": 411001}"#).unwrap();
        assert_eq!(req.location_text(), "411001");
        let req: CropRecommendationRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.location_text(), "");
    }

    #[tokio::test]
    async fn test_blank_location_rejected_before_fetch() {
        let service = CropRecommendationService::new(
            WeatherClient::with_base_url("k".into(), "http://127.0.0.1:9".into(), Duration::from_secs(1))
                .unwrap(),
            OpenFarmClient::with_base_url("http://127.0.0.1:9/".into(), Duration::from_secs(1))
                .unwrap(),
            RecommendationPolicy::DEFAULT,
        );
        let err = service.recommend("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.recommend("Pune").await.unwrap_err();
        assert!(matches!(err, AppError::WeatherServiceUnavailable));
    }

    #[test]
    fn test_response_formatting() {
        assert_eq!(format!("{}°C", 31.0_f64), "31°C");
        assert_eq!(format!("{}%", 70.5_f64), "70.5%");
    }
}
