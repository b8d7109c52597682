use std::collections::HashMap;

use crate::analysis::normalize_triplet;
use crate::models::{
    sort_insights, sort_recommendations, AggregatedBundle, AnalysisBundle, CorrelationRow,
    EmotionShare, SentimentCounts, SentimentShare, ThemeCount,
};

/// Merge per-response bundles into one project-level aggregate
///
/// Emotion and sentiment distributions are sums taken in sorted order, so
/// they do not depend on the order of `bundles`. Insights and recommendations are concatenated in input
/// order before the usual significance / priority sort; nothing is
/// deduplicated across responses.
pub fn aggregate_bundles(bundles: &[AnalysisBundle]) -> AggregatedBundle {
    let emotion_weights = merge_emotion_weights(bundles);
    let emotion_data = emotion_shares(&emotion_weights);
    let emotion_language_correlation = merge_correlations(bundles, &emotion_weights);

    let mut insights: Vec<_> = bundles
        .iter()
        .flat_map(|b| b.insights.iter().cloned())
        .collect();
    sort_insights(&mut insights);

    let mut recommendations: Vec<_> = bundles
        .iter()
        .flat_map(|b| b.recommendations.iter().cloned())
        .collect();
    sort_recommendations(&mut recommendations);

    AggregatedBundle {
        response_count: bundles.len(),
        emotion_data,
        language_data: merge_sentiment(bundles),
        key_themes: merge_themes(bundles),
        emotion_language_correlation,
        insights,
        recommendations,
    }
}

/// Summed intensity per emotion, heaviest first, then by name
fn merge_emotion_weights(bundles: &[AnalysisBundle]) -> Vec<(String, f64)> {
    let mut intensities: HashMap<&str, Vec<f64>> = HashMap::new();
    for bundle in bundles {
        for record in &bundle.emotion_results.emotion_intensities {
            intensities
                .entry(record.emotion.as_str())
                .or_default()
                .push(record.intensity);
        }
    }

    let mut weights: Vec<(String, f64)> = intensities
        .into_iter()
        .map(|(name, values)| (name.to_string(), ordered_sum(values)))
        .collect();
    weights.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    weights
}

/// Float sum independent of the order values arrived in
fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

fn emotion_shares(weights: &[(String, f64)]) -> Vec<EmotionShare> {
    let values: Vec<f64> = weights.iter().map(|(_, w)| *w).collect();
    weights
        .iter()
        .zip(distribute_percentages(&values))
        .map(|((name, _), value)| EmotionShare {
            name: name.clone(),
            value,
        })
        .collect()
}

/// Whole percentages summing to 100 by largest-remainder apportionment
///
/// Each weight gets the floor of its share; the points left over go to the
/// largest fractional parts, ties to the earlier entry. A heavier weight never
/// ends up with fewer points than a lighter one. All-zero weights are split
/// evenly.
pub fn distribute_percentages(weights: &[f64]) -> Vec<u32> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total: f64 = weights.iter().sum();
    let uniform;
    let weights = if total > 0.0 && total.is_finite() {
        weights
    } else {
        uniform = vec![1.0; weights.len()];
        uniform.as_slice()
    };
    let total: f64 = weights.iter().sum();

    let quotas: Vec<f64> = weights.iter().map(|w| w / total * 100.0).collect();
    let mut values: Vec<u32> = quotas.iter().map(|q| q.floor() as u32).collect();
    let remaining = 100u32.saturating_sub(values.iter().sum());

    let mut by_remainder: Vec<usize> = (0..quotas.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let (ra, rb) = (quotas[a] - quotas[a].floor(), quotas[b] - quotas[b].floor());
        rb.total_cmp(&ra).then_with(|| a.cmp(&b))
    });
    for &i in by_remainder.iter().cycle().take(remaining as usize) {
        values[i] += 1;
    }

    values
}

fn merge_sentiment(bundles: &[AnalysisBundle]) -> Vec<SentimentShare> {
    let sentiments = bundles.iter().map(|b| &b.language_results.sentiment);
    let positive = ordered_sum(sentiments.clone().map(|s| s.positive).collect());
    let neutral = ordered_sum(sentiments.clone().map(|s| s.neutral).collect());
    let negative = ordered_sum(sentiments.map(|s| s.negative).collect());
    let (positive, neutral, negative) = normalize_triplet(positive, neutral, negative);

    vec![
        SentimentShare {
            category: "Positive".to_string(),
            value: positive,
        },
        SentimentShare {
            category: "Neutral".to_string(),
            value: neutral,
        },
        SentimentShare {
            category: "Negative".to_string(),
            value: negative,
        },
    ]
}

/// Merge themes by case-insensitive text; the first spelling seen is kept
fn merge_themes(bundles: &[AnalysisBundle]) -> Vec<ThemeCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<(String, usize, SentimentCounts)> = Vec::new();

    for theme in bundles.iter().flat_map(|b| b.language_results.themes.iter()) {
        let key = theme.text.to_lowercase();
        let slot = *index.entry(key).or_insert_with(|| {
            merged.push((theme.text.clone(), 0, SentimentCounts::default()));
            merged.len() - 1
        });
        let entry = &mut merged[slot];
        entry.1 += 1;
        entry.2.record(theme.sentiment);
    }

    let mut themes: Vec<ThemeCount> = merged
        .into_iter()
        .map(|(theme, count, sentiment_counts)| ThemeCount {
            theme,
            count,
            sentiment: sentiment_counts.dominant(),
            sentiment_counts,
        })
        .collect();
    themes.sort_by(|a, b| b.count.cmp(&a.count));
    themes
}

/// Average each emotion's correlation row across responses
fn merge_correlations(
    bundles: &[AnalysisBundle],
    emotion_weights: &[(String, f64)],
) -> Vec<CorrelationRow> {
    let mut sums: HashMap<&str, (f64, f64, f64)> = HashMap::new();
    for row in bundles.iter().flat_map(|b| b.correlation_data.iter()) {
        let entry = sums.entry(row.emotion.as_str()).or_default();
        entry.0 += f64::from(row.positive_language);
        entry.1 += f64::from(row.neutral_language);
        entry.2 += f64::from(row.negative_language);
    }

    emotion_weights
        .iter()
        .filter_map(|(name, _)| {
            let (positive, neutral, negative) = sums.get(name.as_str())?;
            let (positive_language, neutral_language, negative_language) =
                normalize_triplet(*positive, *neutral, *negative);
            Some(CorrelationRow {
                emotion: name.clone(),
                positive_language,
                neutral_language,
                negative_language,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{correlate_results, LinkerConfig};
    use crate::models::{
        EmotionIntensityRecord, EmotionKind, EmotionObservation, EmotionResults,
        EmotionSentiment, InsightType, LanguageResults, LanguageSentiment, RecommendationType,
        SentimentClass, Theme,
    };

    fn bundle(
        emotions: &[(&str, f64)],
        sentiment: LanguageSentiment,
        themes: Vec<Theme>,
    ) -> AnalysisBundle {
        let emotion_results = EmotionResults {
            emotions: emotions
                .iter()
                .map(|(n, i)| EmotionObservation::new(*n, *i))
                .collect(),
            emotion_intensities: emotions
                .iter()
                .map(|(n, i)| EmotionIntensityRecord {
                    emotion: n.to_string(),
                    intensity: *i,
                    frequency: (i * 100.0).round() as u32,
                    sentiment: EmotionSentiment::for_kind(EmotionKind::from_name(n)),
                })
                .collect(),
        };
        correlate_results(
            emotion_results,
            LanguageResults { sentiment, themes },
            &LinkerConfig::default(),
        )
    }

    fn fixtures() -> Vec<AnalysisBundle> {
        vec![
            bundle(
                &[("Joy", 0.75), ("Fear", 0.25)],
                LanguageSentiment::new(0.75, 0.0, 0.25),
                vec![Theme::new("Taste", SentimentClass::Positive)],
            ),
            bundle(
                &[("Anger", 0.5), ("Joy", 0.25)],
                LanguageSentiment::new(0.0, 0.75, 0.25),
                vec![
                    Theme::new("Price", SentimentClass::Negative),
                    Theme::new("taste", SentimentClass::Negative),
                ],
            ),
            bundle(
                &[("Neutral", 0.25)],
                LanguageSentiment::new(0.25, 0.25, 0.5),
                vec![Theme::new("TASTE", SentimentClass::Negative)],
            ),
        ]
    }

    #[test]
    fn test_emotion_distribution() {
        let aggregated = aggregate_bundles(&fixtures());
        // Joy 1.0, Anger 0.5, Fear 0.25, Neutral 0.25 out of 2.0
        let shares: Vec<_> = aggregated
            .emotion_data
            .iter()
            .map(|e| (e.name.as_str(), e.value))
            .collect();
        assert_eq!(
            shares,
            vec![("Joy", 50), ("Anger", 25), ("Fear", 13), ("Neutral", 12)]
        );
    }

    #[test]
    fn test_sentiment_distribution() {
        let aggregated = aggregate_bundles(&fixtures());
        // positive 1.0, neutral 1.0, negative 1.0
        let shares: Vec<_> = aggregated
            .language_data
            .iter()
            .map(|s| (s.category.as_str(), s.value))
            .collect();
        assert_eq!(
            shares,
            vec![("Positive", 33), ("Neutral", 33), ("Negative", 34)]
        );
    }

    #[test]
    fn test_distributions_are_order_invariant() {
        let forward = aggregate_bundles(&fixtures());
        let mut reversed_input = fixtures();
        reversed_input.reverse();
        let reversed = aggregate_bundles(&reversed_input);

        assert_eq!(forward.emotion_data, reversed.emotion_data);
        assert_eq!(forward.language_data, reversed.language_data);
        assert_eq!(
            forward.emotion_language_correlation,
            reversed.emotion_language_correlation
        );
    }

    #[test]
    fn test_inexact_sums_are_order_invariant() {
        // 0.1 + 0.2 + 0.3 and 0.3 + 0.2 + 0.1 differ in the last bit
        let neutral = || LanguageSentiment::new(0.0, 0.0, 1.0);
        let bundles = vec![
            bundle(&[("Zest", 0.1)], neutral(), Vec::new()),
            bundle(&[("Zest", 0.2)], neutral(), Vec::new()),
            bundle(&[("Zest", 0.3), ("Awe", 0.6)], neutral(), Vec::new()),
        ];
        let forward = aggregate_bundles(&bundles);

        let orders: [[usize; 3]; 5] = [[2, 1, 0], [1, 2, 0], [0, 2, 1], [2, 0, 1], [1, 0, 2]];
        for order in orders {
            let permuted: Vec<_> = order.iter().map(|&i| bundles[i].clone()).collect();
            let aggregated = aggregate_bundles(&permuted);
            assert_eq!(aggregated.emotion_data, forward.emotion_data, "order {:?}", order);
            assert_eq!(aggregated.language_data, forward.language_data, "order {:?}", order);
        }
    }

    #[test]
    fn test_themes_merge_case_insensitively() {
        let aggregated = aggregate_bundles(&fixtures());

        assert_eq!(aggregated.key_themes.len(), 2);
        let taste = &aggregated.key_themes[0];
        assert_eq!(taste.theme, "Taste");
        assert_eq!(taste.count, 3);
        assert_eq!(taste.sentiment_counts.positive, 1);
        assert_eq!(taste.sentiment_counts.negative, 2);
        assert_eq!(taste.sentiment, SentimentClass::Negative);
        assert_eq!(aggregated.key_themes[1].theme, "Price");
    }

    #[test]
    fn test_insights_concatenated_without_dedup() {
        let bundles = fixtures();
        let aggregated = aggregate_bundles(&bundles);

        let expected: usize = bundles.iter().map(|b| b.insights.len()).sum();
        assert_eq!(aggregated.insights.len(), expected);
        assert!(aggregated
            .insights
            .windows(2)
            .all(|w| w[0].significance >= w[1].significance));

        let expected: usize = bundles.iter().map(|b| b.recommendations.len()).sum();
        assert_eq!(aggregated.recommendations.len(), expected);
        assert!(aggregated
            .recommendations
            .windows(2)
            .all(|w| w[0].priority.rank() <= w[1].priority.rank()));
    }

    #[test]
    fn test_equal_rank_entries_keep_input_order() {
        let joyful = bundle(
            &[("Joy", 0.5)],
            LanguageSentiment::new(0.8, 0.1, 0.1),
            vec![Theme::new("Taste", SentimentClass::Positive)],
        );
        let sad = bundle(
            &[("Sadness", 0.5)],
            LanguageSentiment::new(0.1, 0.8, 0.1),
            vec![Theme::new("Scent", SentimentClass::Positive)],
        );

        let primary_emotions = |aggregated: &AggregatedBundle| -> Vec<String> {
            aggregated
                .insights
                .iter()
                .filter(|i| i.insight_type == InsightType::PrimaryEmotion)
                .map(|i| i.description.clone())
                .collect()
        };
        let leverage_themes = |aggregated: &AggregatedBundle| -> Vec<String> {
            aggregated
                .recommendations
                .iter()
                .filter(|r| r.recommendation_type == RecommendationType::LeveragePositive)
                .map(|r| r.description.clone())
                .collect()
        };

        let forward = aggregate_bundles(&[joyful.clone(), sad.clone()]);
        let insights = primary_emotions(&forward);
        assert_eq!(insights.len(), 2);
        assert!(insights[0].contains("Joy") && insights[1].contains("Sadness"));
        let recommendations = leverage_themes(&forward);
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations[0].contains("Taste") && recommendations[1].contains("Scent"));

        let reversed = aggregate_bundles(&[sad, joyful]);
        let insights = primary_emotions(&reversed);
        assert!(insights[0].contains("Sadness") && insights[1].contains("Joy"));
        let recommendations = leverage_themes(&reversed);
        assert!(recommendations[0].contains("Scent") && recommendations[1].contains("Taste"));
    }

    #[test]
    fn test_correlation_rows_follow_emotion_order() {
        let aggregated = aggregate_bundles(&fixtures());
        let names: Vec<_> = aggregated
            .emotion_language_correlation
            .iter()
            .map(|r| r.emotion.as_str())
            .collect();
        assert_eq!(names, vec!["Joy", "Anger", "Fear", "Neutral"]);
        assert!(aggregated
            .emotion_language_correlation
            .iter()
            .all(|r| r.total() == 100));
        // Joy rows (85, 15, 0) and (60, 15, 25)
        let joy = &aggregated.emotion_language_correlation[0];
        assert_eq!(
            (joy.positive_language, joy.neutral_language, joy.negative_language),
            normalize_triplet(145.0, 30.0, 25.0)
        );
        let anger = &aggregated.emotion_language_correlation[1];
        assert_eq!(
            (anger.positive_language, anger.neutral_language, anger.negative_language),
            (0, 15, 85)
        );
    }

    #[test]
    fn test_distribute_percentages() {
        assert_eq!(distribute_percentages(&[]), Vec::<u32>::new());
        assert_eq!(distribute_percentages(&[1.0]), vec![100]);
        assert_eq!(distribute_percentages(&[0.0, 0.0]), vec![50, 50]);
        assert_eq!(distribute_percentages(&[1.0, 1.0, 1.0]), vec![34, 33, 33]);
        assert_eq!(
            distribute_percentages(&[1.0; 8]),
            vec![13, 13, 13, 13, 12, 12, 12, 12]
        );
        let values = distribute_percentages(&[1.0; 40]);
        assert_eq!(values.iter().sum::<u32>(), 100);
        assert!(values.iter().all(|&v| v == 2 || v == 3));
    }

    #[test]
    fn test_lightest_weight_never_outranks_heavier_ones() {
        let mut weights = vec![1.0; 11];
        weights.push(0.9);
        let values = distribute_percentages(&weights);

        assert_eq!(values.iter().sum::<u32>(), 100);
        assert!(values.windows(2).all(|w| w[0] >= w[1]), "{:?}", values);
        assert_eq!(values, vec![9, 9, 9, 9, 8, 8, 8, 8, 8, 8, 8, 8]);
    }
}
