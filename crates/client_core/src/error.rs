use shared::{error::ErrorCode, routes::RouteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}{}", detail_suffix(.detail))]
    Status {
        status: u16,
        code: ErrorCode,
        detail: Option<String>,
    },
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Status {
                code: ErrorCode::NotFound,
                ..
            }
        )
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("station name is required")]
    MissingStation,
    #[error("event id and token are required")]
    InvalidParameters,
    #[error("candidate index {index} is out of range for {len} candidates")]
    CandidateIndex { index: usize, len: usize },
    #[error("{actual} availability answers given for {expected} candidates")]
    CandidateCountMismatch { expected: usize, actual: usize },
    #[error("between {min} and {max} candidates are required, got {actual}")]
    CandidateLimit {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("event is not loaded yet")]
    NotReady,
    #[error("failed to build share link: {0}")]
    ShareLink(#[from] RouteError),
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
    #[error(transparent)]
    Api(#[from] ClientError),
}
