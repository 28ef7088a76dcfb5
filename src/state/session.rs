//! Explicit session context: settings, their store, the feed client, and the response cache.

use crate::settings::{self, PluginDataStore, Settings, SettingsSurface};
use crate::sources::{FeedClient, log_fetch_failure};
use crate::state::{EventRecord, MonthDay};

/// Most recent feed response, kept in memory for the current session only.
#[derive(Clone, Debug, Default)]
pub struct ResponseCache {
    /// Date the events were fetched for; `None` before the first fetch.
    date: Option<MonthDay>,
    /// Events in feed order; empty means "unavailable".
    events: Vec<EventRecord>,
    /// Why the last fetch failed, if it did.
    last_error: Option<String>,
}

impl ResponseCache {
    /// Cached events, empty when nothing usable was fetched.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Date of the cached response.
    #[must_use]
    pub const fn date(&self) -> Option<MonthDay> {
        self.date
    }

    /// Whether a non-empty response for `date` is cached.
    #[must_use]
    pub fn is_fresh_for(&self, date: MonthDay) -> bool {
        self.date == Some(date) && !self.events.is_empty()
    }

    /// Failure message of the last fetch; `None` after a successful one.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the cache wholesale.
    fn replace(&mut self, date: MonthDay, events: Vec<EventRecord>, last_error: Option<String>) {
        self.date = Some(date);
        self.events = events;
        self.last_error = last_error;
    }
}

/// Everything one loaded instance works with, handed to each operation explicitly.
///
/// Settings are loaded once when the session is created and written back on every edit.
#[derive(Debug)]
pub struct Session<S: PluginDataStore> {
    /// Current settings.
    settings: Settings,
    /// Where settings are persisted.
    store: S,
    /// HTTP feed client.
    client: FeedClient,
    /// Last feed response.
    cache: ResponseCache,
}

impl<S: PluginDataStore> Session<S> {
    /// What: Start a session, loading settings from `store`.
    ///
    /// Inputs:
    /// - `store`: Plugin data store holding persisted settings.
    ///
    /// Output:
    /// - Session with merged settings, a fresh feed client, and an empty cache.
    pub fn load(store: S) -> Self {
        Self::with_client(store, FeedClient::new())
    }

    /// Like [`Session::load`] with a caller-provided feed client.
    pub fn with_client(store: S, client: FeedClient) -> Self {
        let settings = settings::load(&store);
        Self {
            settings,
            store,
            client,
            cache: ResponseCache::default(),
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Edit settings; each change is persisted immediately.
    pub fn settings_surface(&mut self) -> SettingsSurface<'_> {
        SettingsSurface::new(&mut self.settings, &self.store)
    }

    /// Session response cache.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// What: Fetch events for `date` and replace the cache with the result.
    ///
    /// Inputs:
    /// - `date`: Month and day to request.
    ///
    /// Output:
    /// - The new cached events; empty on any fetch failure.
    ///
    /// Details:
    /// - A failure is logged once and its message kept in [`ResponseCache::last_error`].
    pub async fn refresh(&mut self, date: MonthDay) -> &[EventRecord] {
        let (events, last_error) = match self.client.try_fetch_events(&self.settings, date).await {
            Ok(events) => (events, None),
            Err(e) => {
                log_fetch_failure(&self.settings, date, &e);
                (Vec::new(), Some(e.to_string()))
            }
        };
        tracing::debug!(date = %date, count = events.len(), "session cache replaced");
        self.cache.replace(date, events, last_error);
        self.cache.events()
    }

    /// What: Events for `date`, reusing the cache when it already holds a usable response.
    ///
    /// Inputs:
    /// - `date`: Month and day needed.
    ///
    /// Output:
    /// - Cached or freshly fetched events; empty when unavailable.
    ///
    /// Details:
    /// - An empty cached response is never reused, so a failed fetch is retried on the next
    ///   invocation (still one request per invocation).
    pub async fn events_for(&mut self, date: MonthDay) -> &[EventRecord] {
        if self.cache.is_fresh_for(date) {
            tracing::debug!(date = %date, "using cached events");
            return self.cache.events();
        }
        self.refresh(date).await
    }
}
