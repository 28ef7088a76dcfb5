/// Why a feed fetch produced no events.
///
/// Callers of [`super::FeedClient::fetch_events`] only ever see an empty sequence; this type is
/// what gets logged, and what [`super::FeedClient::try_fetch_events`] returns.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The provider needs a bearer token and none is configured.
    #[error("{provider} requires an access token")]
    MissingCredential {
        /// Provider key.
        provider: &'static str,
    },
    /// Connection, TLS, or protocol failure.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response.
    #[error("HTTP {status}: {preview}")]
    Status {
        /// Status code.
        status: u16,
        /// First characters of the response body.
        preview: String,
    },
    /// Body did not match the provider's envelope.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
