use crate::models::{Contradiction, EmotionIntensityRecord, ExpectedSentiment, LanguageSentiment};

/// Flag emotions whose expected polarity disagrees with the language's dominant
/// polarity
///
/// Surprise is exempt, as are emotions outside the known vocabulary. Results
/// are ordered by descending significance; equal significance keeps input order.
pub fn identify_contradictions(
    intensities: &[EmotionIntensityRecord],
    sentiment: &LanguageSentiment,
) -> Vec<Contradiction> {
    let actual = sentiment.dominant();

    let mut contradictions: Vec<Contradiction> = intensities
        .iter()
        .filter_map(|record| {
            let expected = match record.kind().expected_sentiment()? {
                ExpectedSentiment::Class(class) => class,
                ExpectedSentiment::Mixed => return None,
            };
            if expected == actual {
                return None;
            }

            let gap = (sentiment.get(expected) - sentiment.get(actual)).abs();
            Some(Contradiction {
                emotion: record.emotion.clone(),
                intensity: record.intensity,
                expected_sentiment: expected,
                actual_sentiment: actual,
                significance: record.intensity * gap,
            })
        })
        .collect();

    contradictions.sort_by(|a, b| b.significance.total_cmp(&a.significance));
    contradictions
}
