use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{AggregatedBundle, AnalysisBundle, Insight, Recommendation};

/// What a report holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Single,
    Batch,
}

/// Machine-readable report envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<T> {
    pub generated_at: DateTime<Utc>,
    pub kind: ReportKind,
    pub data: T,
}

impl AnalysisReport<AnalysisBundle> {
    pub fn single(bundle: AnalysisBundle) -> Self {
        Self {
            generated_at: Utc::now(),
            kind: ReportKind::Single,
            data: bundle,
        }
    }
}

impl AnalysisReport<AggregatedBundle> {
    pub fn batch(aggregated: AggregatedBundle) -> Self {
        Self {
            generated_at: Utc::now(),
            kind: ReportKind::Batch,
            data: aggregated,
        }
    }
}

impl<T: Serialize> AnalysisReport<T> {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to write JSON to {:?}", path))?;
        Ok(())
    }
}

/// Plain-text summary of a report
pub struct HumanSummary {
    text: String,
}

impl HumanSummary {
    pub fn for_single(bundle: &AnalysisBundle) -> Self {
        let mut text = String::new();

        text.push_str("Mixed analysis report\n\n");
        if let Some(primary) = bundle.emotion_results.primary() {
            text.push_str(&format!(
                "Primary emotion: {} ({})\n",
                primary.name,
                format_percent(primary.intensity)
            ));
        }
        let sentiment = &bundle.language_results.sentiment;
        text.push_str(&format!(
            "Language sentiment: {} positive, {} neutral, {} negative\n",
            format_percent(sentiment.positive),
            format_percent(sentiment.neutral),
            format_percent(sentiment.negative)
        ));
        text.push_str(&format!(
            "Contradictions: {}\n\n",
            bundle.contradictions.len()
        ));

        push_insights(&mut text, &bundle.insights);
        push_recommendations(&mut text, &bundle.recommendations);
        Self { text }
    }

    pub fn for_batch(aggregated: &AggregatedBundle) -> Self {
        let mut text = String::new();

        text.push_str(&format!(
            "Batch analysis report ({} responses)\n\n",
            aggregated.response_count
        ));

        text.push_str("Emotions:\n");
        for share in &aggregated.emotion_data {
            text.push_str(&format!("  {:<16} {:>3}%\n", share.name, share.value));
        }
        text.push_str("\nLanguage sentiment:\n");
        for share in &aggregated.language_data {
            text.push_str(&format!("  {:<16} {:>3}%\n", share.category, share.value));
        }
        if !aggregated.key_themes.is_empty() {
            text.push_str("\nKey themes:\n");
            for theme in &aggregated.key_themes {
                text.push_str(&format!(
                    "  {} (x{}, {})\n",
                    theme.theme, theme.count, theme.sentiment
                ));
            }
        }
        text.push('\n');

        push_insights(&mut text, &aggregated.insights);
        push_recommendations(&mut text, &aggregated.recommendations);
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.text)?;
        Ok(())
    }
}

fn push_insights(text: &mut String, insights: &[Insight]) {
    text.push_str("Insights:\n");
    if insights.is_empty() {
        text.push_str("  (none)\n");
    }
    for insight in insights {
        text.push_str(&format!(
            "  [{:.2}] {}\n        {}\n",
            insight.significance, insight.title, insight.description
        ));
    }
    text.push('\n');
}

fn push_recommendations(text: &mut String, recommendations: &[Recommendation]) {
    text.push_str("Recommendations:\n");
    if recommendations.is_empty() {
        text.push_str("  (none)\n");
    }
    for rec in recommendations {
        text.push_str(&format!(
            "  [{}] {}\n        {}\n",
            rec.priority.as_str(),
            rec.title,
            rec.description
        ));
    }
}

/// Format a 0-1 fraction as a whole percentage
fn format_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
