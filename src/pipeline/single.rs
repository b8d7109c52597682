use tracing::{error, info};

use super::MixedAnalyzer;
use crate::adapters::{adapt_emotion_results, adapt_language_results};
use crate::analysis::correlate_results;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{AnalysisBundle, EmotionResults, LanguageResults};

impl MixedAnalyzer {
    /// Analyze one response for both its vocal emotion and its language
    ///
    /// The two upstream analyses run concurrently. If either fails, the whole
    /// call fails and nothing from the other side is kept.
    pub async fn analyze_response(
        &self,
        audio_url: &str,
        transcription: &str,
    ) -> AnalysisResult<AnalysisBundle> {
        if audio_url.trim().is_empty() || transcription.trim().is_empty() {
            return Err(AnalysisError::validation(
                "Audio URL and transcription are required",
            ));
        }

        info!("Starting mixed analysis for response: {}", audio_url);

        let (emotion_results, language_results) = tokio::try_join!(
            self.emotion_analysis(audio_url),
            self.language_analysis(transcription)
        )
        .map_err(|e| {
            error!("Mixed analysis failed for {}: {}", audio_url, e);
            AnalysisError::analysis_failed(e)
        })?;

        let bundle = correlate_results(emotion_results, language_results, &self.config.linker);

        info!(
            "Completed mixed analysis for {}: {} contradictions, {} insights, {} recommendations",
            audio_url,
            bundle.contradictions.len(),
            bundle.insights.len(),
            bundle.recommendations.len()
        );

        Ok(bundle)
    }

    async fn emotion_analysis(&self, audio_url: &str) -> anyhow::Result<EmotionResults> {
        let raw = self.voice.analyze_voice_emotion(audio_url).await?;
        Ok(adapt_emotion_results(raw)?)
    }

    async fn language_analysis(&self, transcription: &str) -> anyhow::Result<LanguageResults> {
        let raw = self.text.analyze_text(transcription).await?;
        Ok(adapt_language_results(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{
        InsightType, Priority, RawEmotionResponse, RawLanguageResponse, RecommendationType,
        SentimentClass,
    };
    use crate::pipeline::fakes::{FakeText, FakeVoice};
    use crate::pipeline::AnalyzerConfig;

    fn analyzer(voice: FakeVoice, text: FakeText) -> MixedAnalyzer {
        MixedAnalyzer::new(Arc::new(voice), Arc::new(text), AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn test_contradiction_scenario() {
        let analyzer = analyzer(
            FakeVoice::default().with("a.mp3", &[("Joy", 0.8)]),
            FakeText::default().with(
                "It broke on day one",
                RawLanguageResponse::from_distribution(0.1, 0.8, 0.1).with_theme("X", "negative"),
            ),
        );

        let bundle = analyzer
            .analyze_response("a.mp3", "It broke on day one")
            .await
            .unwrap();

        assert_eq!(bundle.contradictions.len(), 1);
        let c = &bundle.contradictions[0];
        assert_eq!(c.emotion, "Joy");
        assert_eq!(c.expected_sentiment, SentimentClass::Positive);
        assert_eq!(c.actual_sentiment, SentimentClass::Negative);

        assert!(bundle
            .insights
            .iter()
            .any(|i| i.insight_type == InsightType::Contradiction));
        assert!(!bundle
            .insights
            .iter()
            .any(|i| i.insight_type == InsightType::Alignment));

        let first = &bundle.recommendations[0];
        assert_eq!(first.recommendation_type, RecommendationType::AddressContradiction);
        assert_eq!(first.priority, Priority::High);

        assert_eq!(bundle.correlation_data.len(), 1);
        assert_eq!(bundle.correlation_data[0].total(), 100);
        assert_eq!(bundle.theme_emotion_connections.len(), 1);
    }

    #[tokio::test]
    async fn test_aligned_scenario() {
        let analyzer = analyzer(
            FakeVoice::default().with("b.mp3", &[("Joy", 0.9)]),
            FakeText::default().with(
                "Love it",
                RawLanguageResponse::from_distribution(0.9, 0.05, 0.05),
            ),
        );

        let bundle = analyzer.analyze_response("b.mp3", "Love it").await.unwrap();

        assert!(bundle.contradictions.is_empty());
        let alignment: Vec<_> = bundle
            .insights
            .iter()
            .filter(|i| i.insight_type == InsightType::Alignment)
            .collect();
        assert_eq!(alignment.len(), 1);
        assert_eq!(alignment[0].significance, 0.7);

        let primary = bundle
            .insights
            .iter()
            .find(|i| i.insight_type == InsightType::PrimaryEmotion)
            .unwrap();
        assert_eq!(primary.significance, 0.9);
        assert!(primary.description.contains("Joy"));

        assert!(!bundle
            .insights
            .iter()
            .any(|i| i.insight_type == InsightType::ThemeEmotion));
    }

    #[tokio::test]
    async fn test_identical_inputs_give_identical_bundles() {
        let analyzer = analyzer(
            FakeVoice::default().with("c.mp3", &[("Anger", 0.75), ("Surprise", 0.4), ("Calmness", 0.2)]),
            FakeText::default().with(
                "The lid leaks",
                RawLanguageResponse::from_distribution(0.2, 0.5, 0.3)
                    .with_theme("Lid", "negative")
                    .with_theme("Color", "positive"),
            ),
        );

        let first = analyzer.analyze_response("c.mp3", "The lid leaks").await.unwrap();
        let second = analyzer.analyze_response("c.mp3", "The lid leaks").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_blank_arguments_are_rejected() {
        let voice = FakeVoice::default().with("d.mp3", &[("Joy", 0.5)]);
        let analyzer = MixedAnalyzer::new(
            Arc::new(voice),
            Arc::new(FakeText::default()),
            AnalyzerConfig::default(),
        );

        let err = analyzer.analyze_response("", "words").await.unwrap_err();
        assert!(err.is_validation());
        let err = analyzer.analyze_response("d.mp3", "   ").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_wrapped() {
        let analyzer = analyzer(
            FakeVoice::default().with("e.mp3", &[("Joy", 0.5)]),
            FakeText::default(),
        );

        let err = analyzer.analyze_response("e.mp3", "hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::AnalysisFailed { .. }));
        assert!(err.to_string().contains("text service unavailable"));
    }

    #[tokio::test]
    async fn test_unanalyzable_emotions_fail_the_call() {
        let mut voice = FakeVoice::default();
        voice
            .responses
            .insert("f.mp3".to_string(), RawEmotionResponse { emotions: Some(vec![]) });
        let analyzer = analyzer(
            voice,
            FakeText::default().with("ok", RawLanguageResponse::from_distribution(0.3, 0.3, 0.4)),
        );

        let err = analyzer.analyze_response("f.mp3", "ok").await.unwrap_err();
        assert!(matches!(err, AnalysisError::AnalysisFailed { .. }));
        assert!(err.to_string().contains("no emotions"));
    }
}
