use serde::{Deserialize, Serialize};

use super::{EmotionResults, LanguageResults, SentimentClass};

/// Estimated language-sentiment breakdown for one emotion, in whole percent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationRow {
    pub emotion: String,
    pub positive_language: u32,
    pub neutral_language: u32,
    pub negative_language: u32,
}

impl CorrelationRow {
    pub fn total(&self) -> u32 {
        self.positive_language + self.neutral_language + self.negative_language
    }
}

/// Mismatch between an emotion's expected polarity and the language's polarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contradiction {
    pub emotion: String,
    pub intensity: f64,
    pub expected_sentiment: SentimentClass,
    pub actual_sentiment: SentimentClass,
    pub significance: f64,
}

/// Emotion linked to a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedEmotion {
    pub name: String,
    pub intensity: f64,
    /// Link confidence, strictly between 0.5 and 1.0
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeEmotionConnection {
    pub theme: String,
    pub sentiment: SentimentClass,
    /// Sorted by descending confidence
    pub emotions: Vec<LinkedEmotion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    PrimaryEmotion,
    Contradiction,
    Alignment,
    ThemeEmotion,
    HighIntensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub significance: f64,
}

/// Sort insights by descending significance, keeping insertion order on ties
pub fn sort_insights(insights: &mut [Insight]) {
    insights.sort_by(|a, b| b.significance.total_cmp(&a.significance));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high=0, medium=1, low=2
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    AddressContradiction,
    LeveragePositive,
    AddressNegative,
    LeverageIntensity,
    AddressIntensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Sort recommendations high < medium < low, keeping insertion order on ties
pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| r.priority.rank());
}

/// Complete result of analyzing one response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub emotion_results: EmotionResults,
    pub language_results: LanguageResults,
    pub correlation_data: Vec<CorrelationRow>,
    pub contradictions: Vec<Contradiction>,
    pub theme_emotion_connections: Vec<ThemeEmotionConnection>,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(insight_type: InsightType, significance: f64) -> Insight {
        Insight {
            insight_type,
            title: String::new(),
            description: String::new(),
            significance,
        }
    }

    #[test]
    fn test_sort_insights_is_stable() {
        let mut insights = vec![
            insight(InsightType::PrimaryEmotion, 0.8),
            insight(InsightType::HighIntensity, 0.9),
            insight(InsightType::ThemeEmotion, 0.8),
        ];
        sort_insights(&mut insights);
        let order: Vec<_> = insights.iter().map(|i| i.insight_type).collect();
        assert_eq!(
            order,
            vec![
                InsightType::HighIntensity,
                InsightType::PrimaryEmotion,
                InsightType::ThemeEmotion
            ]
        );
    }

    #[test]
    fn test_insight_serializes_type_field() {
        let json = serde_json::to_value(insight(InsightType::HighIntensity, 0.9)).unwrap();
        assert_eq!(json["type"], "high_intensity");
        assert_eq!(json["significance"], 0.9);
    }

    #[test]
    fn test_correlation_row_camel_case() {
        let row = CorrelationRow {
            emotion: "Joy".to_string(),
            positive_language: 85,
            neutral_language: 15,
            negative_language: 0,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["positiveLanguage"], 85);
        assert_eq!(json["negativeLanguage"], 0);
        assert_eq!(row.total(), 100);
    }
}
