use thiserror::Error;

/// Errors surfaced by the analysis engine
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Caller input was missing or malformed
    #[error("{message}")]
    Validation {
        message: String,
        /// Indices of offending entries in a batch request (empty for single requests)
        invalid_entries: Vec<usize>,
    },

    /// A collaborator returned data the adapters cannot interpret
    #[error("Upstream returned invalid data: {0}")]
    UpstreamData(String),

    /// An upstream call failed while analyzing a single response
    #[error("Mixed analysis failed: {source:#}")]
    AnalysisFailed {
        #[source]
        source: anyhow::Error,
    },
}

impl AnalysisError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            invalid_entries: Vec::new(),
        }
    }

    pub fn invalid_entries(message: impl Into<String>, invalid_entries: Vec<usize>) -> Self {
        Self::Validation {
            message: message.into(),
            invalid_entries,
        }
    }

    pub fn upstream_data(message: impl Into<String>) -> Self {
        Self::UpstreamData(message.into())
    }

    pub fn analysis_failed(source: impl Into<anyhow::Error>) -> Self {
        Self::AnalysisFailed {
            source: source.into(),
        }
    }

    /// Whether the caller can fix this by correcting their input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
