//! Settings model, defaults, amount parsing, and the access token wrapper.

use zeroize::Zeroize;

use crate::render::SelectionMode;
use crate::sources::FeedProvider;

/// Lowest accepted value for `amount_of_events`.
pub const MIN_AMOUNT_OF_EVENTS: u8 = 1;
/// Highest accepted value for `amount_of_events`.
pub const MAX_AMOUNT_OF_EVENTS: u8 = 10;
/// Used when a supplied amount cannot be parsed at all.
pub const DEFAULT_AMOUNT_OF_EVENTS: u8 = 3;

/// Default title template; `{{date}}` is replaced with the formatted current date.
pub const DEFAULT_TITLE_TEMPLATE: &str = "## On this day, {{date}}\n\n";
/// Default item template.
pub const DEFAULT_ITEM_TEMPLATE: &str = "* {{description}} {{if year}}({{year}}){{endif}}\n";
/// Default Moment-style date pattern for the title.
pub const DEFAULT_TITLE_DATE_FORMAT: &str = "MMMM Do";

/// Bearer credential for feed providers that require one.
///
/// The secret is wiped from memory on drop and never shown by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token, trimming surrounding whitespace.
    pub fn new(token: impl Into<String>) -> Self {
        let mut raw: String = token.into();
        let trimmed = raw.trim().to_string();
        raw.zeroize();
        Self(trimmed)
    }

    /// Raw token text for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether no token is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<unset>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}

/// User-configurable settings, persisted as a flat camelCase JSON object.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Which feed API shape to talk to.
    pub feed_provider: FeedProvider,
    /// Base URL override; empty means the provider's default.
    pub base_url: String,
    /// Credential for providers that need one.
    pub access_token: AccessToken,
    /// How many events to insert, always within `1..=10`.
    pub amount_of_events: u8,
    /// Template for the heading segment.
    pub title_template: String,
    /// Template applied to every inserted event.
    pub item_template: String,
    /// Date pattern used for `{{date}}` in the title.
    pub title_date_format: String,
    /// How events are picked from the response.
    pub selection_mode: SelectionMode,
    /// Categories eligible for random selection; empty means all.
    pub enabled_categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_provider: FeedProvider::default(),
            base_url: String::new(),
            access_token: AccessToken::default(),
            amount_of_events: DEFAULT_AMOUNT_OF_EVENTS,
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
            item_template: DEFAULT_ITEM_TEMPLATE.to_string(),
            title_date_format: DEFAULT_TITLE_DATE_FORMAT.to_string(),
            selection_mode: SelectionMode::default(),
            enabled_categories: Vec::new(),
        }
    }
}

impl Settings {
    /// Base URL requests are built from: the override when set, otherwise the provider default.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            self.feed_provider.default_base_url()
        } else {
            trimmed
        }
    }

    /// Whether the configured provider needs a token that is not set.
    #[must_use]
    pub fn missing_credential(&self) -> bool {
        self.feed_provider.requires_token() && self.access_token.is_empty()
    }
}

/// What: Clamp an integer into the accepted `amount_of_events` range.
///
/// Inputs:
/// - `value`: Any integer.
///
/// Output:
/// - `value` clamped to `1..=10`.
#[must_use]
pub fn clamp_amount(value: i64) -> u8 {
    let clamped = value.clamp(
        i64::from(MIN_AMOUNT_OF_EVENTS),
        i64::from(MAX_AMOUNT_OF_EVENTS),
    );
    u8::try_from(clamped).unwrap_or(DEFAULT_AMOUNT_OF_EVENTS)
}

/// What: Parse a user-supplied amount.
///
/// Inputs:
/// - `raw`: Text from the settings surface.
///
/// Output:
/// - Parsed and clamped amount; [`DEFAULT_AMOUNT_OF_EVENTS`] when `raw` is not numeric.
///
/// Details:
/// - Integers are clamped directly.
/// - Finite decimals are truncated toward zero first (`"4.8"` becomes 4).
#[must_use]
pub fn parse_amount(raw: &str) -> u8 {
    let t = raw.trim();
    if let Ok(v) = t.parse::<i64>() {
        return clamp_amount(v);
    }
    match t.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        Ok(f) if f.is_finite() => clamp_amount(f.trunc() as i64),
        _ => DEFAULT_AMOUNT_OF_EVENTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Out-of-range and malformed amounts land inside `1..=10`.
    ///
    /// Inputs:
    /// - Negative, zero, large, decimal, and non-numeric strings.
    ///
    /// Output:
    /// - Clamped values, or the default for non-numeric input.
    fn parse_amount_clamps_and_defaults() {
        assert_eq!(parse_amount("5"), 5);
        assert_eq!(parse_amount(" 10 "), 10);
        assert_eq!(parse_amount("0"), 1);
        assert_eq!(parse_amount("-3"), 1);
        assert_eq!(parse_amount("11"), 10);
        assert_eq!(parse_amount("99999999999999999999"), 10);
        assert_eq!(parse_amount("4.8"), 4);
        assert_eq!(parse_amount("1e3"), 10);
        assert_eq!(parse_amount("abc"), DEFAULT_AMOUNT_OF_EVENTS);
        assert_eq!(parse_amount(""), DEFAULT_AMOUNT_OF_EVENTS);
        assert_eq!(parse_amount("NaN"), DEFAULT_AMOUNT_OF_EVENTS);
    }

    #[test]
    fn access_token_debug_is_redacted() {
        let t = AccessToken::new("  secret-value ");
        assert_eq!(t.expose(), "secret-value");
        assert_eq!(format!("{t:?}"), "AccessToken(<redacted>)");
        assert_eq!(format!("{:?}", AccessToken::default()), "AccessToken(<unset>)");
    }

    #[test]
    fn effective_base_url_falls_back_to_provider_default() {
        let mut s = Settings::default();
        assert_eq!(s.effective_base_url(), s.feed_provider.default_base_url());
        s.base_url = " http://localhost:8080 ".into();
        assert_eq!(s.effective_base_url(), "http://localhost:8080");
    }
}
