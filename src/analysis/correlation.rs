use crate::models::{CorrelationRow, EmotionIntensityRecord, EmotionKind, LanguageSentiment};

/// Sentiment mass above which the language is treated as clearly polarized
const POLARIZED_THRESHOLD: f64 = 0.6;

/// Prior (positive, neutral, negative) language split for an emotion kind
fn prior_for(kind: EmotionKind) -> (f64, f64, f64) {
    if kind.is_positive_family() {
        (70.0, 20.0, 10.0)
    } else if kind.is_negative_family() {
        (10.0, 20.0, 70.0)
    } else {
        (33.0, 34.0, 33.0)
    }
}

/// Estimate, for each detected emotion, how the response's language splits
/// between positive, neutral and negative
///
/// Starts from a per-emotion prior, shifts it toward the response's polarity
/// when one side holds more than 60% of the mass, then normalizes to whole
/// percentages summing to 100.
pub fn build_correlation_data(
    intensities: &[EmotionIntensityRecord],
    sentiment: &LanguageSentiment,
) -> Vec<CorrelationRow> {
    intensities
        .iter()
        .map(|record| {
            let (mut positive, mut neutral, mut negative) = prior_for(record.kind());

            if sentiment.positive > POLARIZED_THRESHOLD {
                positive += 15.0;
                negative -= 10.0;
                neutral -= 5.0;
            } else if sentiment.negative > POLARIZED_THRESHOLD {
                negative += 15.0;
                positive -= 10.0;
                neutral -= 5.0;
            }

            let (positive_language, neutral_language, negative_language) = normalize_triplet(
                positive.clamp(0.0, 100.0),
                neutral.clamp(0.0, 100.0),
                negative.clamp(0.0, 100.0),
            );

            CorrelationRow {
                emotion: record.emotion.clone(),
                positive_language,
                neutral_language,
                negative_language,
            }
        })
        .collect()
}

/// Convert a (positive, neutral, negative) triplet of non-negative weights into
/// whole percentages summing to exactly 100
///
/// Positive and neutral are rounded shares; negative takes the remainder. If
/// rounding pushes the first two past 100, the excess comes out of neutral.
pub fn normalize_triplet(positive: f64, neutral: f64, negative: f64) -> (u32, u32, u32) {
    let total = positive + neutral + negative;
    if total <= 0.0 || !total.is_finite() {
        return (33, 34, 33);
    }

    let p = (positive / total * 100.0).round() as i64;
    let mut n = (neutral / total * 100.0).round() as i64;
    let mut neg = 100 - p - n;
    if neg < 0 {
        n += neg;
        neg = 0;
    }

    (p as u32, n.max(0) as u32, neg as u32)
}
