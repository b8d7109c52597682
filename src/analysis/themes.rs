use crate::models::{
    EmotionIntensityRecord, EmotionKind, ExpectedSentiment, LinkedEmotion, Theme,
    ThemeEmotionConnection,
};

/// Configuration for theme-emotion linking
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    /// Weight of polarity agreement in the link score
    pub affinity_weight: f64,
    /// Weight of emotion intensity in the link score
    pub intensity_weight: f64,
    /// Minimum link score for an emotion to be attached to a theme
    pub min_link_score: f64,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            affinity_weight: 0.6,
            intensity_weight: 0.4,
            min_link_score: 0.25,
        }
    }
}

/// Attach to each theme the emotions most likely to co-occur with it
///
/// An emotion's link score blends how well its expected polarity matches the
/// theme's sentiment with how strongly it was expressed. Confidence maps the
/// score into (0.5, 0.95], so stronger and better-matching emotions rank first.
pub fn connect_themes_with_emotions(
    themes: &[Theme],
    intensities: &[EmotionIntensityRecord],
    config: &LinkerConfig,
) -> Vec<ThemeEmotionConnection> {
    themes
        .iter()
        .map(|theme| {
            let mut emotions: Vec<LinkedEmotion> = intensities
                .iter()
                .filter_map(|record| {
                    let affinity = affinity(record.kind(), theme);
                    let score = (config.affinity_weight * affinity
                        + config.intensity_weight * record.intensity)
                        .clamp(0.0, 1.0);
                    if score <= 0.0 || score < config.min_link_score {
                        return None;
                    }
                    Some(LinkedEmotion {
                        name: record.emotion.clone(),
                        intensity: record.intensity,
                        confidence: 0.5 + 0.45 * score,
                    })
                })
                .collect();

            emotions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

            ThemeEmotionConnection {
                theme: theme.text.clone(),
                sentiment: theme.sentiment,
                emotions,
            }
        })
        .collect()
}

fn affinity(kind: EmotionKind, theme: &Theme) -> f64 {
    match kind.expected_sentiment() {
        Some(ExpectedSentiment::Class(class)) if class == theme.sentiment => 1.0,
        Some(ExpectedSentiment::Class(_)) => 0.0,
        Some(ExpectedSentiment::Mixed) => 0.5,
        None => 0.25,
    }
}
