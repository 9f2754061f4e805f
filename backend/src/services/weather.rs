//! Weather service: current conditions proxy and the saved last city

use serde::Serialize;
use shared::{validate_location, validation_message, CurrentConditions, SaveCityInput, SavedCity};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone)]
pub struct WeatherService {
    store: Arc<dyn Store>,
    weather_client: WeatherClient,
}

impl WeatherService {
    pub fn new(store: Arc<dyn Store>, weather_client: WeatherClient) -> Self {
        Self {
            store,
            weather_client,
        }
    }

    /// Current conditions for a city name
    pub async fn current(&self, city: Option<&str>) -> AppResult<CurrentConditions> {
        let city = validate_location(city.unwrap_or_default())
            .map_err(|_| AppError::Validation("City is required".to_string()))?;
        self.weather_client.get_current_by_city(city).await
    }

    pub async fn last_city(&self) -> AppResult<Option<SavedCity>> {
        self.store.last_city().await
    }

    pub async fn save_city(&self, input: SaveCityInput) -> AppResult<MessageResponse> {
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        self.store.save_city(&input.city).await?;
        tracing::info!(city = %input.city, "Last searched city saved");

        Ok(MessageResponse {
            message: "City saved successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn service() -> WeatherService {
        let client = WeatherClient::with_base_url(
            "key".into(),
            "http://127.0.0.1:9".into(),
            Duration::from_secs(1),
        )
        .unwrap();
        WeatherService::new(Arc::new(MemoryStore::new()), client)
    }

    #[tokio::test]
    async fn test_save_and_read_city() {
        let service = service();
        assert!(service.last_city().await.unwrap().is_none());

        let response = service
            .save_city(SaveCityInput {
                city: "  Siliguri ".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "City saved successfully");
        assert_eq!(service.last_city().await.unwrap().unwrap().last_city, "Siliguri");
    }

    #[tokio::test]
    async fn test_save_city_rejects_blank_and_long() {
        let service = service();
        for city in ["   ".to_string(), "x".repeat(121)] {
            let err = service.save_city(SaveCityInput { city }).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(service.last_city().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_requires_city() {
        let err = service().current(None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
