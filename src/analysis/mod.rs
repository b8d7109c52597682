pub mod contradictions;
pub mod correlation;
pub mod insights;
pub mod recommendations;
pub mod themes;

pub use contradictions::*;
pub use correlation::*;
pub use insights::*;
pub use recommendations::*;
pub use themes::*;

use crate::models::{AnalysisBundle, EmotionResults, LanguageResults};

/// Combine adapted emotion and language results into a full analysis bundle
///
/// Runs, in order:
/// 1. Correlation rows per emotion
/// 2. Contradiction detection
/// 3. Theme-emotion linking
/// 4. Insight generation
/// 5. Recommendation generation
pub fn correlate_results(
    emotion_results: EmotionResults,
    language_results: LanguageResults,
    linker: &LinkerConfig,
) -> AnalysisBundle {
    let intensities = &emotion_results.emotion_intensities;
    let sentiment = &language_results.sentiment;

    let correlation_data = build_correlation_data(intensities, sentiment);
    let contradictions = identify_contradictions(intensities, sentiment);
    let theme_emotion_connections =
        connect_themes_with_emotions(&language_results.themes, intensities, linker);
    let insights = generate_insights(&emotion_results, &language_results.themes, &contradictions);
    let recommendations =
        create_recommendations(&contradictions, &theme_emotion_connections, intensities);

    AnalysisBundle {
        emotion_results,
        language_results,
        correlation_data,
        contradictions,
        theme_emotion_connections,
        insights,
        recommendations,
    }
}
