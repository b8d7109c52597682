use serde::{Deserialize, Serialize};

use super::SentimentClass;

/// Canonical emotion vocabulary understood by the correlation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionKind {
    Joy,
    Surprise,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Neutral,
    /// Any label outside the vocabulary (e.g. "Calmness", "Awe")
    Other,
}

impl EmotionKind {
    /// Classify an emotion label, case-insensitively
    ///
    /// The voice service reports surprise as "Surprise (positive)" and
    /// "Surprise (negative)"; both count as surprise.
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "joy" => Self::Joy,
            "surprise" => Self::Surprise,
            "sadness" => Self::Sadness,
            "anger" => Self::Anger,
            "fear" => Self::Fear,
            "disgust" => Self::Disgust,
            "neutral" => Self::Neutral,
            _ if lower.starts_with("surprise (") => Self::Surprise,
            _ => Self::Other,
        }
    }

    /// Sentiment class this emotion would culturally be expected to carry
    ///
    /// `None` for labels outside the vocabulary.
    pub fn expected_sentiment(self) -> Option<ExpectedSentiment> {
        match self {
            Self::Joy => Some(ExpectedSentiment::Class(SentimentClass::Positive)),
            Self::Sadness | Self::Anger | Self::Fear | Self::Disgust => {
                Some(ExpectedSentiment::Class(SentimentClass::Negative))
            }
            Self::Neutral => Some(ExpectedSentiment::Class(SentimentClass::Neutral)),
            Self::Surprise => Some(ExpectedSentiment::Mixed),
            Self::Other => None,
        }
    }

    pub fn is_positive_family(self) -> bool {
        matches!(self, Self::Joy | Self::Surprise)
    }

    pub fn is_negative_family(self) -> bool {
        matches!(self, Self::Sadness | Self::Anger | Self::Fear | Self::Disgust)
    }
}

/// Expected polarity of an emotion; surprise is exempt from contradiction checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedSentiment {
    Class(SentimentClass),
    Mixed,
}

/// Sentiment label attached to an emotion intensity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionSentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl EmotionSentiment {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    /// Default label derived from the emotion's kind
    pub fn for_kind(kind: EmotionKind) -> Self {
        match kind.expected_sentiment() {
            Some(ExpectedSentiment::Class(SentimentClass::Positive)) => Self::Positive,
            Some(ExpectedSentiment::Class(SentimentClass::Negative)) => Self::Negative,
            Some(ExpectedSentiment::Mixed) => Self::Mixed,
            Some(ExpectedSentiment::Class(SentimentClass::Neutral)) | None => Self::Neutral,
        }
    }
}

/// A single emotion detected in a voice sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionObservation {
    pub name: String,
    /// Normalized strength (0-1)
    pub intensity: f64,
}

impl EmotionObservation {
    pub fn new(name: impl Into<String>, intensity: f64) -> Self {
        Self {
            name: name.into(),
            intensity,
        }
    }

    pub fn kind(&self) -> EmotionKind {
        EmotionKind::from_name(&self.name)
    }
}

/// Summary of one distinct emotion in a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionIntensityRecord {
    pub emotion: String,
    pub intensity: f64,
    /// Intensity as a rounded percentage (0-100)
    pub frequency: u32,
    pub sentiment: EmotionSentiment,
}

impl EmotionIntensityRecord {
    pub fn kind(&self) -> EmotionKind {
        EmotionKind::from_name(&self.emotion)
    }
}

/// Normalized output of the voice-emotion collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionResults {
    /// Observations in source order
    pub emotions: Vec<EmotionObservation>,
    /// One record per distinct emotion name, in order of first appearance
    pub emotion_intensities: Vec<EmotionIntensityRecord>,
}

impl EmotionResults {
    /// Emotion with the highest intensity; the earliest one wins ties
    pub fn primary(&self) -> Option<&EmotionObservation> {
        self.emotions.iter().fold(None, |best, e| match best {
            Some(b) if b.intensity >= e.intensity => Some(b),
            _ => Some(e),
        })
    }
}

/// Raw emotion entry as delivered by the voice-emotion collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEmotion {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "score")]
    pub intensity: f64,
    /// Optional pre-classified sentiment label
    #[serde(default)]
    pub sentiment: Option<String>,
}

/// Raw voice-emotion payload before adaptation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEmotionResponse {
    #[serde(default)]
    pub emotions: Option<Vec<RawEmotion>>,
}

impl RawEmotionResponse {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            emotions: Some(
                pairs
                    .into_iter()
                    .map(|(name, intensity)| RawEmotion {
                        name: name.to_string(),
                        intensity,
                        sentiment: None,
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_kind_from_name() {
        assert_eq!(EmotionKind::from_name("Joy"), EmotionKind::Joy);
        assert_eq!(EmotionKind::from_name("  anger "), EmotionKind::Anger);
        assert_eq!(
            EmotionKind::from_name("Surprise (negative)"),
            EmotionKind::Surprise
        );
        assert_eq!(EmotionKind::from_name("Calmness"), EmotionKind::Other);
    }

    #[test]
    fn test_primary_prefers_earliest_on_tie() {
        let results = EmotionResults {
            emotions: vec![
                EmotionObservation::new("Fear", 0.4),
                EmotionObservation::new("Joy", 0.6),
                EmotionObservation::new("Anger", 0.6),
            ],
            emotion_intensities: vec![],
        };
        assert_eq!(results.primary().map(|e| e.name.as_str()), Some("Joy"));
    }

    #[test]
    fn test_raw_emotion_accepts_score_alias() {
        let json = r#"{"emotions": [{"name": "Joy", "score": 0.42}]}"#;
        let raw: RawEmotionResponse = serde_json::from_str(json).unwrap();
        let emotions = raw.emotions.unwrap();
        assert_eq!(emotions[0].intensity, 0.42);
        assert!(emotions[0].sentiment.is_none());
    }
}
