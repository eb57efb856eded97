use std::fmt;

/// Unified error type for PokeAPI operations
#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed (connection error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON response
    Parse(serde_json::Error),
    /// API returned a non-success status code
    HttpStatus(reqwest::StatusCode),
}

impl ApiError {
    /// Numeric HTTP status code, if the server answered at all.
    ///
    /// Transport and decoding failures carry no status code.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus(status) => Some(status.as_u16()),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Parse(e) => write!(f, "Parse error: {}", e),
            ApiError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e) => Some(e),
            ApiError::Parse(e) => Some(e),
            ApiError::HttpStatus(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err)
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
