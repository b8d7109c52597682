use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{LanguageResults, LanguageSentiment, RawLanguageResponse, SentimentClass, Theme};

/// Normalize a text-analysis payload into a sentiment distribution and themes
pub fn adapt_language_results(raw: RawLanguageResponse) -> AnalysisResult<LanguageResults> {
    let raw_sentiment = raw.sentiment.ok_or_else(|| {
        AnalysisError::upstream_data("text-analysis response is missing the sentiment distribution")
    })?;

    let positive = numeric(raw_sentiment.positive.as_ref());
    let negative = numeric(raw_sentiment.negative.as_ref());
    let neutral = numeric(raw_sentiment.neutral.as_ref());

    if positive.is_none() && negative.is_none() && neutral.is_none() {
        return Err(AnalysisError::upstream_data(
            "text-analysis sentiment distribution has no numeric components",
        ));
    }

    let sentiment = LanguageSentiment::new(
        positive.unwrap_or(0.0).clamp(0.0, 1.0),
        negative.unwrap_or(0.0).clamp(0.0, 1.0),
        neutral.unwrap_or(0.0).clamp(0.0, 1.0),
    );

    let themes = raw
        .themes
        .into_iter()
        .filter_map(|t| {
            let text = t.text.trim();
            if text.is_empty() {
                return None;
            }
            let sentiment = t
                .sentiment
                .as_deref()
                .map(SentimentClass::from_label)
                .unwrap_or(SentimentClass::Neutral);
            Some(Theme::new(text, sentiment))
        })
        .collect();

    Ok(LanguageResults { sentiment, themes })
}

/// Numbers pass through, numeric strings are parsed, everything else is absent
fn numeric(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
