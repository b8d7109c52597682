use crate::models::{
    sort_recommendations, Contradiction, EmotionIntensityRecord, Priority, Recommendation,
    RecommendationType, SentimentClass, ThemeEmotionConnection,
};

use super::insights::HIGH_INTENSITY_THRESHOLD;

/// Derive prioritized follow-up actions for one response
///
/// Themes are picked by first match in the caller's order, never re-ranked.
/// The result is ordered high, medium, low; equal priorities keep insertion
/// order.
pub fn create_recommendations(
    contradictions: &[Contradiction],
    connections: &[ThemeEmotionConnection],
    intensities: &[EmotionIntensityRecord],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(top) = contradictions.first() {
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::AddressContradiction,
            title: "Address Emotional Contradictions".to_string(),
            description: format!(
                "Dig into why {} comes through in the voice while the language is {}. This often signals unmet expectations or concerns the respondent did not put into words.",
                top.emotion, top.actual_sentiment
            ),
            priority: Priority::High,
        });
    }

    if let Some(theme) = first_theme_with(connections, SentimentClass::Positive) {
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::LeveragePositive,
            title: "Leverage Positive Themes".to_string(),
            description: format!(
                "Feature \"{}\" in marketing and product work; it draws a positive emotional response.",
                theme.theme
            ),
            priority: Priority::Medium,
        });
    }

    if let Some(theme) = first_theme_with(connections, SentimentClass::Negative) {
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::AddressNegative,
            title: "Address Negative Themes".to_string(),
            description: format!(
                "Prioritize improvements to \"{}\"; it draws a negative emotional response.",
                theme.theme
            ),
            priority: Priority::High,
        });
    }

    if let Some(strong) = intensities
        .iter()
        .find(|r| r.intensity > HIGH_INTENSITY_THRESHOLD)
    {
        let kind = strong.kind();
        if kind.is_positive_family() {
            recommendations.push(Recommendation {
                recommendation_type: RecommendationType::LeverageIntensity,
                title: "Leverage High-Intensity Positive Emotions".to_string(),
                description: format!(
                    "The strong {} response shows powerful positive engagement. Find what triggers it and amplify it in product and marketing.",
                    strong.emotion
                ),
                priority: Priority::Medium,
            });
        } else if kind.is_negative_family() {
            recommendations.push(Recommendation {
                recommendation_type: RecommendationType::AddressIntensity,
                title: "Address High-Intensity Negative Emotions".to_string(),
                description: format!(
                    "The strong {} response points to a significant issue that needs immediate attention before it turns into dissatisfaction.",
                    strong.emotion
                ),
                priority: Priority::High,
            });
        }
    }

    sort_recommendations(&mut recommendations);
    recommendations
}

fn first_theme_with(
    connections: &[ThemeEmotionConnection],
    sentiment: SentimentClass,
) -> Option<&ThemeEmotionConnection> {
    connections.iter().find(|c| c.sentiment == sentiment)
}
