//! External API integrations

pub mod openfarm;
pub mod perplexity;
pub mod weather;

pub use openfarm::{CropMetadata, OpenFarmClient};
pub use perplexity::{LlmMessage, PerplexityClient};
pub use weather::WeatherClient;

/// Clients shared by all handlers
#[derive(Clone)]
pub struct ExternalClients {
    pub weather: WeatherClient,
    pub crop_data: OpenFarmClient,
    /// `None` when no LLM API key is configured
    pub llm: Option<PerplexityClient>,
}

impl ExternalClients {
    pub fn from_config(config: &crate::Config) -> crate::error::AppResult<Self> {
        Ok(Self {
            weather: WeatherClient::new(&config.weather)?,
            crop_data: OpenFarmClient::new(&config.crop_data)?,
            llm: PerplexityClient::from_config(&config.llm)?,
        })
    }
}
