use collector_core::FailureClass;

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("http status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn class(&self) -> FailureClass {
        match self {
            ApiError::HttpStatus { status, .. } => FailureClass::from_status(*status),
            ApiError::InvalidUrl(_) => FailureClass::Terminal,
            ApiError::Timeout(_) | ApiError::Network(_) | ApiError::InvalidResponse(_) => {
                FailureClass::Unexpected
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A remote call that failed for good, after retries or on a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed after {attempts} attempt(s): {cause}")]
pub struct FetchError {
    pub operation: String,
    pub attempts: u32,
    #[source]
    pub cause: ApiError,
}
