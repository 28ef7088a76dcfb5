//! HTTP client for "on this day" feeds.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, info, warn};

use super::FeedError;
use super::decode::decode;
use crate::settings::Settings;
use crate::state::{EventRecord, MonthDay};

/// Identifier sent with every request.
const CLIENT_ID: &str = concat!("onthisday/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt kept in a status error.
const PREVIEW_CHARS: usize = 200;

/// Feed client with a pooled `reqwest::Client` and the fixed request headers.
///
/// One GET per fetch; no retries and no timeout beyond the transport default.
#[derive(Clone, Debug)]
pub struct FeedClient {
    /// Shared HTTP client.
    http: reqwest::Client,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedClient {
    /// Client with the identifying and JSON headers installed as defaults.
    #[must_use]
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Wikimedia wants API clients identified here as well as in User-Agent.
        headers.insert(
            HeaderName::from_static("api-user-agent"),
            HeaderValue::from_static(CLIENT_ID),
        );
        let http = reqwest::Client::builder()
            .user_agent(CLIENT_ID)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "feed client builder failed; requests go out without default headers");
                reqwest::Client::new()
            });
        Self { http }
    }

    /// What: Fetch events for the current local month and day.
    ///
    /// Inputs:
    /// - `settings`: Provider, base URL, and token.
    ///
    /// Output:
    /// - Decoded events; empty when anything went wrong.
    pub async fn fetch_today_events(&self, settings: &Settings) -> Vec<EventRecord> {
        self.fetch_events(settings, MonthDay::today()).await
    }

    /// What: Fetch events for `date`, failing silently to an empty sequence.
    ///
    /// Inputs:
    /// - `settings`: Provider, base URL, and token.
    /// - `date`: Month and day to request.
    ///
    /// Output:
    /// - Decoded events, or an empty `Vec` meaning "unavailable".
    ///
    /// Details:
    /// - Every failure is logged exactly once at `warn`.
    pub async fn fetch_events(&self, settings: &Settings, date: MonthDay) -> Vec<EventRecord> {
        match self.try_fetch_events(settings, date).await {
            Ok(events) => events,
            Err(e) => {
                log_fetch_failure(settings, date, &e);
                Vec::new()
            }
        }
    }

    /// What: Fetch events for `date`, reporting why it failed.
    ///
    /// Inputs:
    /// - `settings`: Provider, base URL, and token.
    /// - `date`: Month and day to request.
    ///
    /// Output:
    /// - Decoded events in feed order.
    ///
    /// # Errors
    /// - `MissingCredential` before any request when the provider needs a token.
    /// - `Http` on network errors, `Status` on non-2xx responses, `Decode` on shape mismatch.
    pub async fn try_fetch_events(
        &self,
        settings: &Settings,
        date: MonthDay,
    ) -> Result<Vec<EventRecord>, FeedError> {
        let provider = settings.feed_provider;
        if settings.missing_credential() {
            return Err(FeedError::MissingCredential {
                provider: provider.as_config_key(),
            });
        }
        let url = provider.request_url(settings.effective_base_url(), date);
        debug!(url = %url, "requesting events");

        let mut request = self.http.get(&url);
        if !settings.access_token.is_empty() {
            request = request.bearer_auth(settings.access_token.expose());
        }
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        info!(
            status = status.as_u16(),
            bytes = body.len(),
            "fetched events feed"
        );
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                preview: body.chars().take(PREVIEW_CHARS).collect(),
            });
        }
        let events = decode(provider, &body)?;
        info!(count = events.len(), "parsed events feed");
        Ok(events)
    }
}

/// The single `warn` emitted for a failed fetch.
pub(crate) fn log_fetch_failure(settings: &Settings, date: MonthDay, error: &FeedError) {
    warn!(
        provider = settings.feed_provider.as_config_key(),
        date = %date,
        error = %error,
        "failed to fetch events"
    );
}
