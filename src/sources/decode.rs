//! Versioned response decoders mapping provider field names onto [`EventRecord`].
//!
//! Each provider has its own envelope type. A body that does not match the envelope fails
//! closed with [`FeedError::Decode`]; individual optional fields (year, category) that carry an
//! unexpected shape are treated as absent instead.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::FeedError;
use super::provider::FeedProvider;
use crate::state::EventRecord;

/// One event object as any provider spells it.
#[derive(Debug, Deserialize)]
struct RawEvent {
    /// `eventdescription` (`OnThisDay`), `description` (Byabbe), or `text` (Wikimedia).
    #[serde(default, alias = "eventdescription", alias = "text")]
    description: String,
    /// `eventyear` or `year`; integer or numeric string.
    #[serde(default, alias = "eventyear", deserialize_with = "lenient_year")]
    year: Option<i32>,
    /// `eventtype` or `category`.
    #[serde(default, alias = "eventtype", deserialize_with = "lenient_string")]
    category: Option<String>,
}

impl RawEvent {
    /// Convert to a record, optionally forcing the category; `None` for blank descriptions.
    fn into_record(self, category_override: Option<&str>) -> Option<EventRecord> {
        let description = self.description.trim();
        if description.is_empty() {
            return None;
        }
        let category = category_override.map(str::to_string).or(self.category);
        Some(EventRecord::new(description, category, self.year))
    }
}

/// `{ "data": [...] }`
#[derive(Debug, Deserialize)]
struct DataEnvelope {
    /// Event list.
    data: Vec<RawEvent>,
}

/// `{ "events": [...] }`, also accepting `data`.
#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    /// Event list.
    #[serde(alias = "data")]
    events: Vec<RawEvent>,
}

/// Wikimedia category maps; at least one must be present.
#[derive(Debug, Deserialize)]
struct CategoryMaps {
    /// Editor-curated highlights.
    #[serde(default)]
    selected: Option<Vec<RawEvent>>,
    /// Notable births.
    #[serde(default)]
    births: Option<Vec<RawEvent>>,
    /// Notable deaths.
    #[serde(default)]
    deaths: Option<Vec<RawEvent>>,
    /// Other events.
    #[serde(default)]
    events: Option<Vec<RawEvent>>,
}

/// What: Decode a response body for `provider`.
///
/// Inputs:
/// - `provider`: Which envelope to expect.
/// - `body`: Raw response text.
///
/// Output:
/// - Records in feed order; records without a description are dropped.
///
/// # Errors
/// - `FeedError::Decode` when the body is not JSON or does not match the provider's envelope.
pub fn decode(provider: FeedProvider, body: &str) -> Result<Vec<EventRecord>, FeedError> {
    let records: Vec<EventRecord> = match provider {
        FeedProvider::OnThisDay => {
            let env: DataEnvelope = serde_json::from_str(body)?;
            env.data
                .into_iter()
                .filter_map(|e| e.into_record(None))
                .collect()
        }
        FeedProvider::Byabbe => {
            let env: EventsEnvelope = serde_json::from_str(body)?;
            env.events
                .into_iter()
                .filter_map(|e| e.into_record(None))
                .collect()
        }
        FeedProvider::Wikimedia => decode_category_maps(body)?,
    };
    Ok(records)
}

/// Flatten Wikimedia's category maps in `selected`, `births`, `deaths`, `events` order.
fn decode_category_maps(body: &str) -> Result<Vec<EventRecord>, FeedError> {
    let maps: CategoryMaps = serde_json::from_str(body)?;
    let groups = [
        ("selected", maps.selected),
        ("births", maps.births),
        ("deaths", maps.deaths),
        ("events", maps.events),
    ];
    if groups.iter().all(|(_, g)| g.is_none()) {
        return Err(FeedError::Decode(
            "response has none of the selected/births/deaths/events arrays".to_string(),
        ));
    }
    Ok(groups
        .into_iter()
        .filter_map(|(name, g)| g.map(|items| (name, items)))
        .flat_map(|(name, items)| {
            items
                .into_iter()
                .filter_map(move |e| e.into_record(Some(name)))
        })
        .collect())
}

/// Accept a year as integer, float, or string (`"1990"`, `"44 BC"`); anything else is `None`.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(year_from_value(&v))
}

/// Accept a string; any other shape is `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(v.as_str().map(str::to_string))
}

/// Year from a JSON value; BC/BCE suffixes yield negative years.
fn year_from_value(v: &Value) -> Option<i32> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                #[allow(clippy::cast_possible_truncation)]
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
            })
            .and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => {
            let t = s.trim();
            let upper = t.to_ascii_uppercase();
            let (digits, negative) = if let Some(rest) = upper.strip_suffix("BCE") {
                (rest.trim().to_string(), true)
            } else if let Some(rest) = upper.strip_suffix("BC") {
                (rest.trim().to_string(), true)
            } else {
                (t.to_string(), false)
            };
            let n = digits.parse::<i32>().ok()?;
            Some(if negative { -n } else { n })
        }
        _ => None,
    }
}
