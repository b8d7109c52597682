use serde::{Deserialize, Serialize};

/// One response to analyze: where its audio lives and what was said
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInput {
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub transcription: String,
}

impl ResponseInput {
    pub fn new(audio_url: impl Into<String>, transcription: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            transcription: transcription.into(),
        }
    }

    /// Both fields must be non-blank
    pub fn is_valid(&self) -> bool {
        !self.audio_url.trim().is_empty() && !self.transcription.trim().is_empty()
    }
}
