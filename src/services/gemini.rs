use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::TextSentimentClient;
use crate::models::RawLanguageResponse;

/// Configuration for the Gemini text-analysis client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key (from GEMINI_API_KEY env var)
    pub api_key: String,
    /// Base URL of the generative language API
    pub api_url: String,
    /// Model to use (e.g., "gemini-1.5-pro")
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_output_tokens: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set")?;
        let api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1".to_string());
        let mut config = Self::new(api_key, api_url);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            model: "gemini-1.5-pro".to_string(),
            temperature: 0.2,
            max_output_tokens: 2048,
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Instructions sent with every transcription
pub const ANALYSIS_PROMPT: &str = r#"You are a sentiment and language analyst working on consumer research interviews.

Analyze the consumer response below and reply with JSON only, no prose, in exactly this shape:

{
  "sentiment": {"positive": <0-1>, "negative": <0-1>, "neutral": <0-1>},
  "themes": [{"text": "<short theme label>", "sentiment": "positive" | "negative" | "neutral", "relevance": <0-1>}]
}

The three sentiment values are probabilities and should sum to 1.
List themes from most to least relevant.

RESPONSE TEXT:
"""
"#;

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client for Gemini")?;
        Ok(Self { client, config })
    }

    fn build_prompt(transcription: &str) -> String {
        format!("{}{}\n\"\"\"", ANALYSIS_PROMPT, transcription)
    }
}

#[async_trait]
impl TextSentimentClient for GeminiClient {
    async fn analyze_text(&self, transcription: &str) -> Result<RawLanguageResponse> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(transcription),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.api_url, self.config.model
            ))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error: {} - {}", status, body);
        }

        let response: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        // Extract text from the first candidate's first part
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .context("No text content in Gemini response")?;

        parse_analysis_text(text)
    }
}

/// Parse the model's JSON reply, tolerating a Markdown code fence around it
pub fn parse_analysis_text(text: &str) -> Result<RawLanguageResponse> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).context("Failed to parse Gemini analysis JSON")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
