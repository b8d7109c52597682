use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::VoiceEmotionClient;
use crate::models::{RawEmotion, RawEmotionResponse};

/// Configuration for the Hume voice-emotion client
#[derive(Debug, Clone)]
pub struct HumeConfig {
    /// API key (from HUME_API_KEY env var)
    pub api_key: String,
    /// Base URL of the batch API
    pub api_url: String,
    /// Maximum number of job status polls
    pub max_poll_attempts: u32,
    /// Delay between job status polls
    pub poll_interval: Duration,
    /// Number of strongest emotions to keep per recording
    pub max_emotions: usize,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl HumeConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("HUME_API_KEY").context("HUME_API_KEY environment variable not set")?;
        let api_url =
            std::env::var("HUME_API_URL").unwrap_or_else(|_| "https://api.hume.ai/v0".to_string());

        Ok(Self::new(api_key, api_url))
    }

    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            max_poll_attempts: 30,
            poll_interval: Duration::from_secs(2),
            max_emotions: 5,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Client for Hume's batch prosody (voice emotion) API
pub struct HumeClient {
    client: Client,
    config: HumeConfig,
}

impl HumeClient {
    pub fn new(config: HumeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client for Hume")?;
        Ok(Self { client, config })
    }

    /// Submit a prosody job for an audio URL and return its job ID
    async fn submit_job(&self, audio_url: &str) -> Result<String> {
        let request = JobRequest {
            urls: vec![audio_url.to_string()],
            models: JobModels {
                prosody: ProsodyModel {
                    granularity: "utterance".to_string(),
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/batch/jobs", self.config.api_url))
            .header("X-Hume-Api-Key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send job request to Hume API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Hume API error: {} - {}", status, body);
        }

        let job: JobCreated = response
            .json()
            .await
            .context("Failed to parse Hume job response")?;
        Ok(job.job_id)
    }

    /// Poll a job until it completes, fails, or runs out of attempts
    async fn wait_for_job(&self, job_id: &str) -> Result<JobResults> {
        for attempt in 0..self.config.max_poll_attempts {
            let response = self
                .client
                .get(format!("{}/batch/jobs/{}", self.config.api_url, job_id))
                .header("X-Hume-Api-Key", &self.config.api_key)
                .send()
                .await
                .context("Failed to poll Hume job")?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("Hume API error: {} - {}", status, body);
            }

            let job: JobStatus = response
                .json()
                .await
                .context("Failed to parse Hume job status")?;

            match job.state.as_str() {
                "completed" => {
                    return job
                        .results
                        .context("Hume job completed without results");
                }
                "failed" => {
                    anyhow::bail!(
                        "Hume job {} failed: {}",
                        job_id,
                        job.error.unwrap_or_default()
                    );
                }
                state => {
                    debug!("Hume job {}: {} (attempt {})", job_id, state, attempt + 1);
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }

        anyhow::bail!(
            "Hume job {} did not finish after {} polls",
            job_id,
            self.config.max_poll_attempts
        )
    }
}

#[async_trait]
impl VoiceEmotionClient for HumeClient {
    async fn analyze_voice_emotion(&self, audio_url: &str) -> Result<RawEmotionResponse> {
        let job_id = self.submit_job(audio_url).await?;
        info!("Hume job {} submitted for {}", job_id, audio_url);

        let results = self.wait_for_job(&job_id).await?;
        Ok(summarize_predictions(&results, self.config.max_emotions))
    }
}

/// Average each emotion's score across utterances and keep the strongest ones
///
/// Returns an absent emotions list when there are no predictions, so the
/// adapter reports it as unanalyzable.
fn summarize_predictions(results: &JobResults, max_emotions: usize) -> RawEmotionResponse {
    let predictions = match &results.prosody {
        Some(prosody) if !prosody.predictions.is_empty() => &prosody.predictions,
        _ => return RawEmotionResponse { emotions: None },
    };

    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for prediction in predictions {
        for score in &prediction.emotions {
            if !totals.contains_key(&score.name) {
                order.push(score.name.clone());
            }
            *totals.entry(score.name.clone()).or_default() += score.score;
        }
    }

    let count = predictions.len() as f64;
    let mut averaged: Vec<(String, f64)> = order
        .into_iter()
        .map(|name| {
            let total = totals.get(&name).copied().unwrap_or(0.0);
            (name, total / count)
        })
        .collect();
    averaged.sort_by(|a, b| b.1.total_cmp(&a.1));
    averaged.truncate(max_emotions);

    RawEmotionResponse {
        emotions: Some(
            averaged
                .into_iter()
                .map(|(name, intensity)| RawEmotion {
                    name,
                    intensity,
                    sentiment: None,
                })
                .collect(),
        ),
    }
}

#[derive(Debug, Serialize)]
struct JobRequest {
    urls: Vec<String>,
    models: JobModels,
}

#[derive(Debug, Serialize)]
struct JobModels {
    prosody: ProsodyModel,
}

#[derive(Debug, Serialize)]
struct ProsodyModel {
    granularity: String,
}

#[derive(Debug, Deserialize)]
struct JobCreated {
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    state: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Option<JobResults>,
}

#[derive(Debug, Deserialize)]
struct JobResults {
    #[serde(default)]
    prosody: Option<ProsodyResults>,
}

#[derive(Debug, Deserialize)]
struct ProsodyResults {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    emotions: Vec<EmotionScore>,
}

#[derive(Debug, Deserialize)]
struct EmotionScore {
    name: String,
    score: f64,
}
