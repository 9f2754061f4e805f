//! Configuration management for the Agritech Hub server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{FallbackPolicy, RecommendationPolicy};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Crop metadata API configuration
    pub crop_data: CropDataConfig,

    /// Chat completion API configuration
    pub llm: LlmConfig,

    /// Disease classifier configuration
    pub classifier: ClassifierConfig,

    /// Crop recommendation thresholds
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; the in-memory store is used when unset
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap base URL
    pub api_endpoint: String,

    /// OpenWeatherMap API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CropDataConfig {
    /// OpenFarm crops endpoint, ending with `/`
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Chat completions URL
    pub api_endpoint: String,

    /// API key; canned replies are used when unset
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// Path to the ONNX export of the leaf disease model
    pub model_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Minimum number of matched criteria for a crop to be recommended
    pub min_score: u32,

    /// Number of top results returned when nothing reaches `min_score`
    pub fallback_top_n: usize,

    /// Return the whole ranked list instead of the top N as fallback
    pub fallback_all: bool,
}

impl RecommendationConfig {
    pub fn policy(&self) -> RecommendationPolicy {
        let fallback = if self.fallback_all {
            FallbackPolicy::All
        } else {
            FallbackPolicy::TopN(self.fallback_top_n)
        };
        RecommendationPolicy {
            min_score: self.min_score,
            fallback,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5002)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("crop_data.api_endpoint", "https://openfarm.cc/api/v1/crops/")?
            .set_default("crop_data.timeout_secs", 8)?
            .set_default("llm.api_endpoint", "https://api.perplexity.ai/chat/completions")?
            .set_default("llm.model", "llama-3.1-sonar-small-128k-online")?
            .set_default("llm.timeout_secs", 30)?
            .set_default("classifier.model_path", "model/plant_disease.onnx")?
            .set_default(
                "recommendation.min_score",
                RecommendationPolicy::DEFAULT.min_score,
            )?
            .set_default("recommendation.fallback_top_n", 8)?
            .set_default("recommendation.fallback_all", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5002,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Offline configuration: unroutable upstreams, no database, no LLM key
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: None,
                max_connections: 1,
                min_connections: 0,
            },
            weather: WeatherConfig {
                api_endpoint: "http://127.0.0.1:9".to_string(),
                api_key: "test".to_string(),
                timeout_secs: 2,
            },
            crop_data: CropDataConfig {
                api_endpoint: "http://127.0.0.1:9/crops/".to_string(),
                timeout_secs: 2,
            },
            llm: LlmConfig {
                api_endpoint: "http://127.0.0.1:9/chat/completions".to_string(),
                api_key: None,
                model: "llama-3.1-sonar-small-128k-online".to_string(),
                timeout_secs: 2,
            },
            classifier: ClassifierConfig {
                model_path: "/nonexistent/plant_disease.onnx".to_string(),
            },
            recommendation: RecommendationConfig {
                min_score: 2,
                fallback_top_n: 8,
                fallback_all: false,
            },
        }
    }
}
