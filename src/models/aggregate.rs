use serde::{Deserialize, Serialize};

use super::{CorrelationRow, Insight, Recommendation, SentimentClass};

/// Share of one emotion across a batch, in whole percent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionShare {
    pub name: String,
    pub value: u32,
}

/// Share of one sentiment category across a batch, in whole percent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentShare {
    /// "Positive", "Neutral" or "Negative"
    pub category: String,
    pub value: u32,
}

/// Per-sentiment occurrence counts for a merged theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, class: SentimentClass) {
        match class {
            SentimentClass::Positive => self.positive += 1,
            SentimentClass::Negative => self.negative += 1,
            SentimentClass::Neutral => self.neutral += 1,
        }
    }

    /// Most frequent class; ties resolve to neutral
    pub fn dominant(&self) -> SentimentClass {
        if self.positive > self.negative && self.positive > self.neutral {
            SentimentClass::Positive
        } else if self.negative > self.positive && self.negative > self.neutral {
            SentimentClass::Negative
        } else {
            SentimentClass::Neutral
        }
    }
}

/// A theme merged across responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCount {
    pub theme: String,
    pub count: usize,
    pub sentiment: SentimentClass,
    pub sentiment_counts: SentimentCounts,
}

/// Project- or interview-level merge of several analysis bundles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedBundle {
    pub response_count: usize,
    pub emotion_data: Vec<EmotionShare>,
    pub language_data: Vec<SentimentShare>,
    pub key_themes: Vec<ThemeCount>,
    pub emotion_language_correlation: Vec<CorrelationRow>,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}
