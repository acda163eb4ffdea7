use reqwest::Error as ReqwestError;
use std::fmt;

/// Failure modes for a single tab fetch. Only an expired key (HTTP 498) is
/// ever retried; everything else is surfaced to the caller, which decides
/// whether to continue the batch.
#[derive(Debug)]
pub enum FetchError {
    AuthExhausted { tab_id: u64, retries: u32 },
    LegallyUnavailable { tab_id: u64 },
    HttpError { status: u16, body: String },
    TransportError(ReqwestError),
    JsonParseError(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::AuthExhausted { tab_id, retries } => {
                write!(f, "API key expired after {} retries for tab {}", retries, tab_id)
            }
            FetchError::LegallyUnavailable { tab_id } => {
                write!(f, "tab {} unavailable for legal reasons (451)", tab_id)
            }
            FetchError::HttpError { status, body } => write!(f, "HTTP {}: {}", status, body),
            FetchError::TransportError(e) => write!(f, "transport error: {}", e),
            FetchError::JsonParseError(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<ReqwestError> for FetchError {
    fn from(error: ReqwestError) -> Self {
        FetchError::TransportError(error)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::JsonParseError(error)
    }
}
