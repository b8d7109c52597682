pub mod adapters;
pub mod analysis;
pub mod error;
pub mod http;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod services;

pub use adapters::{adapt_emotion_results, adapt_language_results};
pub use analysis::{correlate_results, LinkerConfig};
pub use error::{AnalysisError, AnalysisResult};
pub use http::{build_router, AppState};
pub use io::{
    parse_batch_file, read_emotion_payload, read_language_payload, AnalysisReport, HumanSummary,
};
pub use models::{AggregatedBundle, AnalysisBundle, ResponseInput};
pub use pipeline::{aggregate_bundles, AnalyzerConfig, MixedAnalyzer};
pub use services::{
    GeminiClient, GeminiConfig, HumeClient, HumeConfig, TextSentimentClient, VoiceEmotionClient,
};
