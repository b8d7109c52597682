use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::AnalysisError;

/// Error returned from an HTTP handler
///
/// Rendered as `{"success": false, "message": ...}`. Caller mistakes map to
/// 400, everything else to 500. The message text goes back to the caller
/// as-is, upstream error details included.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Analysis(AnalysisError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Analysis(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Self::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::BadRequest(message) => {
                warn!("Rejected request: {}", message);
                json!({ "success": false, "message": message })
            }
            Self::Analysis(AnalysisError::Validation {
                message,
                invalid_entries,
            }) => {
                warn!("Rejected request: {}", message);
                if invalid_entries.is_empty() {
                    json!({ "success": false, "message": message })
                } else {
                    json!({
                        "success": false,
                        "message": message,
                        "invalidEntries": invalid_entries,
                    })
                }
            }
            Self::Analysis(err) => {
                error!("Request failed: {}", err);
                json!({ "success": false, "message": err.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::bad_request("nope").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AnalysisError::validation("missing")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AnalysisError::upstream_data("bad payload")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(AnalysisError::analysis_failed(anyhow::anyhow!("timeout"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
