pub mod gemini;
pub mod hume;

pub use gemini::*;
pub use hume::*;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{RawEmotionResponse, RawLanguageResponse};

/// Voice-emotion collaborator: scores the emotions heard in an audio recording
#[async_trait]
pub trait VoiceEmotionClient: Send + Sync {
    async fn analyze_voice_emotion(&self, audio_url: &str) -> Result<RawEmotionResponse>;
}

/// Text-sentiment collaborator: sentiment distribution and themes of a transcription
#[async_trait]
pub trait TextSentimentClient: Send + Sync {
    async fn analyze_text(&self, transcription: &str) -> Result<RawLanguageResponse>;
}
