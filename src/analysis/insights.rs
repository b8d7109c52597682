use crate::models::{
    sort_insights, Contradiction, EmotionIntensityRecord, EmotionResults, Insight, InsightType,
    Theme,
};

/// Significance assigned to an aligned (contradiction-free) response
const ALIGNMENT_SIGNIFICANCE: f64 = 0.7;
const THEME_EMOTION_SIGNIFICANCE: f64 = 0.8;
const HIGH_INTENSITY_SIGNIFICANCE: f64 = 0.9;

/// Intensity above which an emotion counts as strongly expressed
pub const HIGH_INTENSITY_THRESHOLD: f64 = 0.7;

/// Generate the insight list for one response
///
/// Emits up to four insights:
/// 1. The primary (strongest) emotion
/// 2. The top contradiction, or an alignment note when there is none
/// 3. A theme-emotion connection when both themes and emotions exist
/// 4. A high-intensity flag when any emotion exceeds 0.7
///
/// The list is ordered by descending significance; ties keep the order above.
pub fn generate_insights(
    emotion_results: &EmotionResults,
    themes: &[Theme],
    contradictions: &[Contradiction],
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let primary = emotion_results.primary();

    if let Some(primary) = primary {
        insights.push(Insight {
            insight_type: InsightType::PrimaryEmotion,
            title: "Primary Emotional Response".to_string(),
            description: format!(
                "The dominant emotion detected is {} with an intensity of {}.",
                primary.name,
                percent(primary.intensity)
            ),
            significance: primary.intensity,
        });
    }

    match contradictions.first() {
        Some(top) => insights.push(Insight {
            insight_type: InsightType::Contradiction,
            title: "Emotional Contradiction Detected".to_string(),
            description: format!(
                "The voice expresses {} while the language is {}, which points to a gap between the stated opinion and the emotional reaction.",
                top.emotion, top.actual_sentiment
            ),
            significance: top.significance,
        }),
        None => insights.push(Insight {
            insight_type: InsightType::Alignment,
            title: "Aligned Emotional Response".to_string(),
            description: "The emotional tone of the voice matches the sentiment of the language, which suggests the feedback is genuine.".to_string(),
            significance: ALIGNMENT_SIGNIFICANCE,
        }),
    }

    if let (Some(theme), Some(primary)) = (themes.first(), primary) {
        insights.push(Insight {
            insight_type: InsightType::ThemeEmotion,
            title: "Key Theme-Emotion Connection".to_string(),
            description: format!(
                "The theme \"{}\" appears alongside {} responses, so this aspect carries real emotional weight.",
                theme.text, primary.name
            ),
            significance: THEME_EMOTION_SIGNIFICANCE,
        });
    }

    let strong = strongest_first(
        emotion_results
            .emotion_intensities
            .iter()
            .filter(|r| r.intensity > HIGH_INTENSITY_THRESHOLD),
    );
    if !strong.is_empty() {
        let names: Vec<&str> = strong.iter().map(|r| r.emotion.as_str()).collect();
        insights.push(Insight {
            insight_type: InsightType::HighIntensity,
            title: "High Emotional Intensity".to_string(),
            description: format!(
                "Strong emotional intensity detected for {}. These aspects provoke powerful reactions.",
                names.join(", ")
            ),
            significance: HIGH_INTENSITY_SIGNIFICANCE,
        });
    }

    sort_insights(&mut insights);
    insights
}

/// Distinct emotions ordered by descending intensity, stable for equal intensities
fn strongest_first<'a>(
    records: impl Iterator<Item = &'a EmotionIntensityRecord>,
) -> Vec<&'a EmotionIntensityRecord> {
    let mut records: Vec<_> = records.collect();
    records.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
    records
}

fn percent(intensity: f64) -> String {
    format!("{:.0}%", intensity * 100.0)
}
