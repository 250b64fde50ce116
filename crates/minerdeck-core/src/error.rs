use std::fmt;

use crate::pool::PoolError;

/// Why a refresh cycle ended without a new image.
#[derive(Debug, Clone)]
pub enum RefreshError {
    /// `minerId` or `poolApiUrl` is not set.
    MissingConfiguration,
    /// The pool answered with a status other than `OK`.
    UpstreamNonSuccess { status: Option<String> },
    /// Fetch, decode, or normalization failed.
    Pool(PoolError),
    /// The surface could not be encoded.
    Render(String),
}

impl RefreshError {
    /// Non-success statuses are expected (unknown miner, pool hiccup) and
    /// are only logged at debug.
    pub fn is_silent(&self) -> bool {
        matches!(self, RefreshError::UpstreamNonSuccess { .. })
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::MissingConfiguration => write!(f, "Missing minerId or poolApiUrl"),
            RefreshError::UpstreamNonSuccess { status } => write!(
                f,
                "Pool returned status {}",
                status.as_deref().unwrap_or("<none>")
            ),
            RefreshError::Pool(err) => write!(f, "{err}"),
            RefreshError::Render(err) => write!(f, "Failed to render tile: {err}"),
        }
    }
}

impl std::error::Error for RefreshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RefreshError::Pool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PoolError> for RefreshError {
    fn from(err: PoolError) -> Self {
        RefreshError::Pool(err)
    }
}
