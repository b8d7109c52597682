pub mod aggregate;
pub mod batch;
pub mod single;

pub use aggregate::*;

use std::sync::Arc;

use crate::analysis::LinkerConfig;
use crate::services::{TextSentimentClient, VoiceEmotionClient};

/// Configuration for the analysis pipeline
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Maximum number of responses analyzed at once in a batch
    pub max_concurrent_responses: usize,
    /// Theme-emotion linking weights
    pub linker: LinkerConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_responses: 8,
            linker: LinkerConfig::default(),
        }
    }
}

/// Mixed emotion-language analyzer
///
/// Holds the two upstream collaborators; every call builds its own result
/// from scratch, so one analyzer can serve concurrent requests.
#[derive(Clone)]
pub struct MixedAnalyzer {
    voice: Arc<dyn VoiceEmotionClient>,
    text: Arc<dyn TextSentimentClient>,
    config: AnalyzerConfig,
}

impl MixedAnalyzer {
    pub fn new(
        voice: Arc<dyn VoiceEmotionClient>,
        text: Arc<dyn TextSentimentClient>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            voice,
            text,
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::models::{RawEmotionResponse, RawLanguageResponse};
    use crate::services::{TextSentimentClient, VoiceEmotionClient};

    /// Voice client answering from a fixed table keyed by audio URL
    #[derive(Default)]
    pub struct FakeVoice {
        pub responses: HashMap<String, RawEmotionResponse>,
        pub calls: AtomicUsize,
    }

    impl FakeVoice {
        pub fn with(mut self, audio_url: &str, pairs: &[(&str, f64)]) -> Self {
            self.responses.insert(
                audio_url.to_string(),
                RawEmotionResponse::from_pairs(pairs.iter().copied()),
            );
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VoiceEmotionClient for FakeVoice {
        async fn analyze_voice_emotion(&self, audio_url: &str) -> Result<RawEmotionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(audio_url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("voice service unavailable for {}", audio_url))
        }
    }

    /// Text client answering from a fixed table keyed by transcription
    #[derive(Default)]
    pub struct FakeText {
        pub responses: HashMap<String, RawLanguageResponse>,
    }

    impl FakeText {
        pub fn with(mut self, transcription: &str, response: RawLanguageResponse) -> Self {
            self.responses.insert(transcription.to_string(), response);
            self
        }
    }

    #[async_trait]
    impl TextSentimentClient for FakeText {
        async fn analyze_text(&self, transcription: &str) -> Result<RawLanguageResponse> {
            self.responses
                .get(transcription)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("text service unavailable"))
        }
    }
}
