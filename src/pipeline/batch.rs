use futures::{StreamExt, TryStreamExt};
use tracing::{error, info};
use uuid::Uuid;

use super::{aggregate_bundles, MixedAnalyzer};
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{AggregatedBundle, ResponseInput};

impl MixedAnalyzer {
    /// Analyze a batch of responses and merge them into one aggregate
    ///
    /// All-or-nothing: the first failing response fails the batch and any
    /// responses still in flight are dropped. At most
    /// `max_concurrent_responses` responses are analyzed at once.
    pub async fn analyze_multiple_responses(
        &self,
        responses: &[ResponseInput],
    ) -> AnalysisResult<AggregatedBundle> {
        validate_batch(responses)?;

        let batch_id = Uuid::new_v4();
        info!(
            "Batch {}: starting analysis of {} responses",
            batch_id,
            responses.len()
        );

        let limit = self.config.max_concurrent_responses.max(1);
        // Owned entries: a per-item borrow here makes the batch future non-Send
        let bundles = futures::stream::iter(responses.iter().cloned().enumerate())
            .map(|(index, response)| async move {
                self.analyze_response(&response.audio_url, &response.transcription)
                    .await
                    .inspect_err(|e| {
                        error!("Batch {}: response {} failed: {}", batch_id, index, e)
                    })
            })
            .buffered(limit)
            .try_collect::<Vec<_>>()
            .await?;

        let aggregated = aggregate_bundles(&bundles);

        info!(
            "Batch {}: aggregated {} responses into {} emotions, {} themes, {} insights",
            batch_id,
            aggregated.response_count,
            aggregated.emotion_data.len(),
            aggregated.key_themes.len(),
            aggregated.insights.len()
        );

        Ok(aggregated)
    }
}

/// Reject empty batches and batches with entries missing either field
pub fn validate_batch(responses: &[ResponseInput]) -> AnalysisResult<()> {
    if responses.is_empty() {
        return Err(AnalysisError::validation(
            "Valid array of responses is required",
        ));
    }

    let invalid: Vec<usize> = responses
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_valid())
        .map(|(i, _)| i)
        .collect();

    if !invalid.is_empty() {
        return Err(AnalysisError::invalid_entries(
            format!(
                "All responses must include audioUrl and transcription (invalid entries: {:?})",
                invalid
            ),
            invalid,
        ));
    }

    Ok(())
}
