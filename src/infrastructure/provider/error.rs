/// Failure modes of the remote translation/speech provider.
///
/// `RateLimited`, `ConnectionFailure` and `EmptyResult` are transient
/// and worth retrying; everything else is terminal and surfaces
/// immediately as a failed per-language outcome.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("empty translation result")]
    EmptyResult,

    #[error("empty audio payload")]
    EmptyAudio,
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::ConnectionFailure(_) | Self::EmptyResult
        )
    }

    /// Stable short name recorded in CompletedRecord error maps.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => "rate_limited",
            Self::ConnectionFailure(_) => "connection_failure",
            Self::InvalidResponse(_) => "invalid_response",
            Self::EmptyResult => "empty_result",
            Self::EmptyAudio => "empty_audio",
        }
    }
}
