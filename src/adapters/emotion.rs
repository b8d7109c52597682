use std::collections::HashMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{
    EmotionIntensityRecord, EmotionKind, EmotionObservation, EmotionResults, EmotionSentiment,
    RawEmotionResponse,
};

/// Normalize a voice-emotion payload into observations and per-emotion records
///
/// Observations keep the source order. Intensity records are one per distinct
/// name, positioned at the name's first appearance and carrying its strongest
/// intensity.
pub fn adapt_emotion_results(raw: RawEmotionResponse) -> AnalysisResult<EmotionResults> {
    let raw_emotions = match raw.emotions {
        Some(list) if !list.is_empty() => list,
        Some(_) => {
            return Err(AnalysisError::upstream_data(
                "voice-emotion response contains no emotions",
            ));
        }
        None => {
            return Err(AnalysisError::upstream_data(
                "voice-emotion response is missing the emotions list",
            ));
        }
    };

    let mut emotions = Vec::with_capacity(raw_emotions.len());
    let mut emotion_intensities: Vec<EmotionIntensityRecord> = Vec::new();
    let mut record_index: HashMap<String, usize> = HashMap::new();

    for (i, raw_emotion) in raw_emotions.into_iter().enumerate() {
        let name = raw_emotion.name.trim().to_string();
        if name.is_empty() {
            return Err(AnalysisError::upstream_data(format!(
                "emotion at position {} has no name",
                i
            )));
        }

        let intensity = raw_emotion.intensity.clamp(0.0, 1.0);
        let sentiment = raw_emotion
            .sentiment
            .as_deref()
            .and_then(EmotionSentiment::parse)
            .unwrap_or_else(|| EmotionSentiment::for_kind(EmotionKind::from_name(&name)));

        match record_index.get(&name) {
            Some(&idx) => {
                let record = &mut emotion_intensities[idx];
                if intensity > record.intensity {
                    record.intensity = intensity;
                    record.frequency = to_frequency(intensity);
                }
            }
            None => {
                record_index.insert(name.clone(), emotion_intensities.len());
                emotion_intensities.push(EmotionIntensityRecord {
                    emotion: name.clone(),
                    intensity,
                    frequency: to_frequency(intensity),
                    sentiment,
                });
            }
        }

        emotions.push(EmotionObservation { name, intensity });
    }

    Ok(EmotionResults {
        emotions,
        emotion_intensities,
    })
}

fn to_frequency(intensity: f64) -> u32 {
    (intensity * 100.0).round() as u32
}
