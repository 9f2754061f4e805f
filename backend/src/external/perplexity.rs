//! Perplexity chat completions client for the voice assistant

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};

/// Role/content pair in the completions request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LlmMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [LlmMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_citations: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Successful completion
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Trimmed, never empty
    pub content: String,
    pub citations: Vec<String>,
}

/// Perplexity API client
#[derive(Clone)]
pub struct PerplexityClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl PerplexityClient {
    /// Returns `None` when no API key is configured
    pub fn from_config(config: &LlmConfig) -> AppResult<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build LLM client: {}", e)))?;

        Ok(Some(Self {
            client,
            api_key,
            endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
        }))
    }

    /// Request a completion; any failure is reported as a message string
    pub async fn complete(&self, messages: &[LlmMessage]) -> Result<Completion, String> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: 300,
            temperature: 0.7,
            top_p: 0.9,
            return_citations: true,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Perplexity request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Perplexity API error: {}", response.status()));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Perplexity response: {}", e))?;

        parse_completion(body)
    }
}

fn parse_completion(body: CompletionResponse) -> Result<Completion, String> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err("Perplexity returned an empty reply".to_string());
    }

    Ok(Completion {
        content,
        citations: body.citations,
    })
}
