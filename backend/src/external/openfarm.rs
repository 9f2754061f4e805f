//! OpenFarm client for crop growing metadata
//!
//! Lookups never fail: any transport, status or parse problem yields the
//! static fallback record.

use reqwest::Client;
use serde::Deserialize;
use shared::crop_slug;
use std::time::Duration;

use crate::config::CropDataConfig;
use crate::error::{AppError, AppResult};

pub const DEFAULT_CROP_IMAGE: &str = "/images/default.jpg";

/// Growing metadata for one crop
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CropMetadata {
    pub best_time: Option<String>,
    pub sowing_method: Option<String>,
    pub main_image_path: Option<String>,
}

impl CropMetadata {
    /// Record used when the upstream lookup fails
    pub fn fallback() -> Self {
        Self {
            best_time: Some("Data not available".to_string()),
            sowing_method: Some("Data not available".to_string()),
            main_image_path: Some(DEFAULT_CROP_IMAGE.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenFarmResponse {
    data: Option<OpenFarmData>,
}

#[derive(Debug, Deserialize)]
struct OpenFarmData {
    attributes: Option<CropMetadata>,
}

/// OpenFarm API client
#[derive(Clone)]
pub struct OpenFarmClient {
    client: Client,
    base_url: String,
}

impl OpenFarmClient {
    pub fn new(config: &CropDataConfig) -> AppResult<Self> {
        Self::with_base_url(
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn with_base_url(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build crop data client: {}", e)))?;

        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{}/", base_url)
        };

        Ok(Self { client, base_url })
    }

    /// URL for a crop, e.g. `.../crops/sweet-potato`
    pub fn crop_url(&self, crop_name: &str) -> String {
        format!("{}{}", self.base_url, crop_slug(crop_name))
    }

    /// Fetch metadata for a crop, falling back to the static record
    pub async fn get_crop(&self, crop_name: &str) -> CropMetadata {
        match self.fetch(crop_name).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!(crop = crop_name, "Using fallback crop data: {}", e);
                CropMetadata::fallback()
            }
        }
    }

    async fn fetch(&self, crop_name: &str) -> Result<CropMetadata, String> {
        let response = self
            .client
            .get(self.crop_url(crop_name))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("OpenFarm HTTP {}", response.status()));
        }

        let body: OpenFarmResponse = response.json().await.map_err(|e| e.to_string())?;
        body.data
            .and_then(|d| d.attributes)
            .ok_or_else(|| "OpenFarm response without attributes".to_string())
    }
}
