use serde::{Deserialize, Serialize};

/// Polarity class of a piece of language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

impl SentimentClass {
    /// Parse a label; anything that is not positive or negative counts as neutral
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positive/negative/neutral probability mass of a text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageSentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl LanguageSentiment {
    pub fn new(positive: f64, negative: f64, neutral: f64) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    /// Mass assigned to a class
    pub fn get(&self, class: SentimentClass) -> f64 {
        match class {
            SentimentClass::Positive => self.positive,
            SentimentClass::Negative => self.negative,
            SentimentClass::Neutral => self.neutral,
        }
    }

    /// Class with the strictly greatest mass; ties fall through to neutral
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

/// A topic discussed in a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub text: String,
    pub sentiment: SentimentClass,
}

impl Theme {
    pub fn new(text: impl Into<String>, sentiment: SentimentClass) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }
}

/// Normalized output of the text-sentiment collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageResults {
    pub sentiment: LanguageSentiment,
    /// Themes in the order the collaborator returned them
    pub themes: Vec<Theme>,
}

/// Raw sentiment distribution; components may be missing or non-numeric
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSentiment {
    #[serde(default)]
    pub positive: Option<serde_json::Value>,
    #[serde(default)]
    pub negative: Option<serde_json::Value>,
    #[serde(default)]
    pub neutral: Option<serde_json::Value>,
}

/// Raw theme entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTheme {
    #[serde(default, alias = "theme", alias = "name")]
    pub text: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub relevance: Option<f64>,
}

/// Raw text-analysis payload before adaptation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLanguageResponse {
    #[serde(default)]
    pub sentiment: Option<RawSentiment>,
    #[serde(default, alias = "keyThemes")]
    pub themes: Vec<RawTheme>,
}

impl RawLanguageResponse {
    pub fn from_distribution(positive: f64, negative: f64, neutral: f64) -> Self {
        Self {
            sentiment: Some(RawSentiment {
                positive: Some(positive.into()),
                negative: Some(negative.into()),
                neutral: Some(neutral.into()),
            }),
            themes: Vec::new(),
        }
    }

    pub fn with_theme(mut self, text: &str, sentiment: &str) -> Self {
        self.themes.push(RawTheme {
            text: text.to_string(),
            sentiment: Some(sentiment.to_string()),
            relevance: None,
        });
        self
    }
}
