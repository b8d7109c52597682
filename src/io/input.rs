use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{RawEmotionResponse, RawLanguageResponse, ResponseInput};

/// Batch file layouts accepted on input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Wrapped { responses: Vec<ResponseInput> },
    Bare(Vec<ResponseInput>),
}

/// Parse a batch input file into response entries
pub fn parse_batch_file(path: &Path) -> Result<Vec<ResponseInput>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_batch_json(&content)
}

/// Parse batch JSON: either `{"responses": [...]}` or a bare array
///
/// Entries are not validated here; the analyzer reports blank fields by index.
pub fn parse_batch_json(json: &str) -> Result<Vec<ResponseInput>> {
    let batch: BatchFile = serde_json::from_str(json)
        .context("Failed to parse batch JSON (expected {\"responses\": [...]} or an array)")?;
    Ok(match batch {
        BatchFile::Wrapped { responses } => responses,
        BatchFile::Bare(responses) => responses,
    })
}

/// Load a saved voice-emotion payload
pub fn read_emotion_payload(path: &Path) -> Result<RawEmotionResponse> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse emotion payload: {:?}", path))
}

/// Load a saved text-sentiment payload
pub fn read_language_payload(path: &Path) -> Result<RawLanguageResponse> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse language payload: {:?}", path))
}
