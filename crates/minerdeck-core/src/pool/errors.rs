use std::fmt;

/// Categories of pool API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolErrorKind {
    /// Connection or transport failure
    Request,
    /// Response body was not a JSON object
    Decode,
    /// JSON decoded but the expected dashboard fields are missing
    MalformedPayload,
}

impl fmt::Display for PoolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolErrorKind::Request => write!(f, "request"),
            PoolErrorKind::Decode => write!(f, "decode"),
            PoolErrorKind::MalformedPayload => write!(f, "malformed_payload"),
        }
    }
}

/// Structured error from the pool client or the response normalizer.
#[derive(Debug, Clone)]
pub struct PoolError {
    pub kind: PoolErrorKind,
    pub message: String,
    /// Underlying error text, if any.
    pub details: Option<String>,
}

impl PoolError {
    pub fn new(kind: PoolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn request(url: &str, err: &reqwest::Error) -> Self {
        Self {
            kind: PoolErrorKind::Request,
            message: format!("GET {url} failed"),
            details: Some(err.to_string()),
        }
    }

    pub fn decode(url: &str, err: &serde_json::Error) -> Self {
        Self {
            kind: PoolErrorKind::Decode,
            message: format!("GET {url} returned a body that is not a JSON object"),
            details: Some(err.to_string()),
        }
    }

    pub fn malformed(err: &serde_json::Error) -> Self {
        Self {
            kind: PoolErrorKind::MalformedPayload,
            message: "dashboard payload is missing expected fields".to_string(),
            details: Some(err.to_string()),
        }
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for PoolError {}
