//! Feed provider variants: URL layout, credentials, and which decoder applies.

use crate::state::MonthDay;

/// One versioned "on this day" API shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedProvider {
    /// `onthisday.com` style API: bearer token, `data` array of `eventdescription` objects.
    OnThisDay,
    /// `byabbe.se` JSON: unpadded month/day, `events` array with string years.
    Byabbe,
    /// Wikimedia feed: zero-padded month/day, category maps keyed by `selected`, `births`, ...
    #[default]
    Wikimedia,
}

impl FeedProvider {
    /// Every provider, in the order shown to users.
    pub const ALL: [Self; 3] = [Self::Wikimedia, Self::Byabbe, Self::OnThisDay];

    /// Base URL used when the settings do not override it.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::OnThisDay => "https://api.onthisday.com",
            Self::Byabbe => "https://byabbe.se/on-this-day",
            Self::Wikimedia => "https://api.wikimedia.org/feed/v1/wikipedia/en/onthisday",
        }
    }

    /// Whether requests fail without `Authorization: Bearer ...`.
    #[must_use]
    pub const fn requires_token(self) -> bool {
        matches!(self, Self::OnThisDay)
    }

    /// What: Build the request URL for a date.
    ///
    /// Inputs:
    /// - `base_url`: Provider root without trailing slash (trailing slashes are tolerated).
    /// - `date`: Month and day to request.
    ///
    /// Output:
    /// - Full request URL.
    ///
    /// Details:
    /// - `OnThisDay` and `Byabbe` use unpadded numbers; `Wikimedia` zero-pads to two digits.
    #[must_use]
    pub fn request_url(self, base_url: &str, date: MonthDay) -> String {
        let base = base_url.trim_end_matches('/');
        let MonthDay { month, day } = date;
        match self {
            Self::OnThisDay => {
                format!("{base}/api/v1/events/that-happened-on/{month}/{day}?category=regular")
            }
            Self::Byabbe => format!("{base}/{month}/{day}/events.json"),
            Self::Wikimedia => format!("{base}/all/{month:02}/{day:02}"),
        }
    }

    /// Stable lowercase key used in settings and on the command line.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::OnThisDay => "onthisday",
            Self::Byabbe => "byabbe",
            Self::Wikimedia => "wikimedia",
        }
    }

    /// Parse a config key; case-insensitive, `-`/`_` ignored.
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        let norm = key.trim().to_ascii_lowercase().replace(['-', '_'], "");
        Self::ALL.into_iter().find(|p| p.as_config_key() == norm)
    }
}

impl std::fmt::Display for FeedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_config_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Each provider embeds month/day in its own path layout.
    ///
    /// Inputs:
    /// - March 7th, base URLs with and without a trailing slash.
    ///
    /// Output:
    /// - Unpadded paths for `OnThisDay`/`Byabbe`, zero-padded for `Wikimedia`.
    fn request_url_per_provider() {
        let d = MonthDay { month: 3, day: 7 };
        assert_eq!(
            FeedProvider::OnThisDay.request_url("https://api.example/", d),
            "https://api.example/api/v1/events/that-happened-on/3/7?category=regular"
        );
        assert_eq!(
            FeedProvider::Byabbe.request_url("https://byabbe.se/on-this-day", d),
            "https://byabbe.se/on-this-day/3/7/events.json"
        );
        assert_eq!(
            FeedProvider::Wikimedia.request_url("http://localhost:1", d),
            "http://localhost:1/all/03/07"
        );
    }

    #[test]
    fn config_keys_round_trip() {
        for p in FeedProvider::ALL {
            assert_eq!(FeedProvider::from_config_key(p.as_config_key()), Some(p));
        }
        assert_eq!(
            FeedProvider::from_config_key("On-This-Day"),
            Some(FeedProvider::OnThisDay)
        );
        assert_eq!(FeedProvider::from_config_key("nope"), None);
    }

    #[test]
    fn only_onthisday_requires_a_token() {
        assert!(FeedProvider::OnThisDay.requires_token());
        assert!(!FeedProvider::Wikimedia.requires_token());
        assert!(!FeedProvider::Byabbe.requires_token());
    }
}
