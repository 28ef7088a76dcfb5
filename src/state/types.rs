//! Core value types shared by the feed client, renderer, and session.

use chrono::{Datelike, NaiveDate};

/// A single historical fact decoded from a feed response.
///
/// Records are immutable once decoded and keep the order the feed returned them in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "RecordFields")]
pub struct EventRecord {
    /// Human-readable description of what happened.
    pub description: String,
    /// Provider category (`events`, `births`, `regular`, ...), if the feed reports one.
    pub category: Option<String>,
    /// Year the event happened in; `None` when the feed omits it or reports `0`.
    pub year: Option<i32>,
}

impl EventRecord {
    /// What: Build a record, normalizing a zero year to "unknown".
    ///
    /// Inputs:
    /// - `description`: Event text.
    /// - `category`: Optional provider category; empty strings count as absent.
    /// - `year`: Optional year; `Some(0)` counts as absent.
    ///
    /// Output:
    /// - A normalized `EventRecord`.
    pub fn new(
        description: impl Into<String>,
        category: Option<String>,
        year: Option<i32>,
    ) -> Self {
        Self {
            description: description.into(),
            category: category.filter(|c| !c.trim().is_empty()),
            year: year.filter(|y| *y != 0),
        }
    }

    /// Stable identity used for de-duplication: description, year and category.
    #[must_use]
    pub fn identity_key(&self) -> (&str, Option<i32>, Option<&str>) {
        (
            self.description.as_str(),
            self.year,
            self.category.as_deref(),
        )
    }
}

/// Deserialized shape of an [`EventRecord`], normalized through [`EventRecord::new`].
#[derive(serde::Deserialize)]
struct RecordFields {
    /// Event text.
    description: String,
    /// Optional category.
    #[serde(default)]
    category: Option<String>,
    /// Optional year.
    #[serde(default)]
    year: Option<i32>,
}

impl From<RecordFields> for EventRecord {
    fn from(f: RecordFields) -> Self {
        Self::new(f.description, f.category, f.year)
    }
}

/// Calendar month and day a feed request is made for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonthDay {
    /// Month, 1..=12.
    pub month: u32,
    /// Day of month, 1..=31.
    pub day: u32,
}

impl MonthDay {
    /// Month and day of the current local date.
    #[must_use]
    pub fn today() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Month and day of `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Zero years and blank categories are normalized to `None`.
    ///
    /// Inputs:
    /// - Records built with `Some(0)` year and a whitespace category.
    ///
    /// Output:
    /// - Both fields are `None`; non-zero years survive.
    fn event_record_normalizes_zero_year_and_blank_category() {
        let e = EventRecord::new("Example", Some("  ".into()), Some(0));
        assert_eq!(e.year, None);
        assert_eq!(e.category, None);

        let e = EventRecord::new("Example", Some("births".into()), Some(-44));
        assert_eq!(e.year, Some(-44));
        assert_eq!(e.category.as_deref(), Some("births"));
    }

    #[test]
    /// What: Deserialized records get the same normalization as constructed ones.
    ///
    /// Inputs:
    /// - JSON with `year: 0` and an empty category.
    ///
    /// Output:
    /// - Both fields are `None`, so the default item template omits the year.
    fn deserialized_record_is_normalized() {
        let e: EventRecord =
            serde_json::from_str(r#"{"description":"X","category":"","year":0}"#).expect("parse");
        assert_eq!(e, EventRecord::new("X", None, None));
        assert_eq!(
            crate::render::render_item(crate::settings::DEFAULT_ITEM_TEMPLATE, &e),
            "* X \n"
        );

        let e: EventRecord = serde_json::from_str(r#"{"description":"Y","year":1990}"#).expect("parse");
        assert_eq!(e.year, Some(1990));
    }

    #[test]
    fn month_day_from_date_and_display() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        let md = MonthDay::from_date(date);
        assert_eq!(md, MonthDay { month: 3, day: 7 });
        assert_eq!(md.to_string(), "03-07");
    }
}
