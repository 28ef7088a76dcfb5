//! Picking which events get rendered.

use std::collections::HashSet;

use rand::{Rng, RngExt};

use crate::state::EventRecord;

/// How events are picked from a feed response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The first N records, in feed order.
    #[default]
    First,
    /// N distinct records sampled from the enabled categories.
    Random,
}

impl SelectionMode {
    /// Stable lowercase key used in settings and on the command line.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Random => "random",
        }
    }

    /// Parse a config key (case-insensitive).
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "first" => Some(Self::First),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// What: Choose the events to render.
///
/// Inputs:
/// - `events`: Feed response in feed order.
/// - `count`: How many to pick.
/// - `mode`: Selection strategy.
/// - `categories`: Categories eligible in `Random` mode; empty means all.
/// - `rng`: Randomness source for `Random` mode.
///
/// Output:
/// - At most `count` records. `First` returns a prefix of `events`. `Random` returns distinct
///   records (by description, year, category) in their original relative order.
///
/// Details:
/// - `Random` samples without replacement from the filtered, de-duplicated pool, so it always
///   terminates and returns `min(count, pool size)` records.
pub fn select<R: Rng + ?Sized>(
    events: &[EventRecord],
    count: usize,
    mode: SelectionMode,
    categories: &[String],
    rng: &mut R,
) -> Vec<EventRecord> {
    match mode {
        SelectionMode::First => events.iter().take(count).cloned().collect(),
        SelectionMode::Random => {
            let pool = candidate_pool(events, categories);
            let mut picked = sample_indices(pool.len(), count, rng);
            picked.sort_unstable();
            picked.into_iter().map(|i| pool[i].clone()).collect()
        }
    }
}

/// Events in enabled categories, first occurrence of each identity key only.
fn candidate_pool<'a>(events: &'a [EventRecord], categories: &[String]) -> Vec<&'a EventRecord> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|e| {
            categories.is_empty()
                || e.category
                    .as_deref()
                    .is_some_and(|c| categories.iter().any(|want| want.eq_ignore_ascii_case(c)))
        })
        .filter(|e| seen.insert(e.identity_key()))
        .collect()
}

/// `min(k, n)` distinct indices from `0..n` via a partial Fisher-Yates shuffle.
fn sample_indices<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let take = k.min(n);
    let mut idx: Vec<usize> = (0..n).collect();
    for i in 0..take {
        let j = rng.random_range(i..n);
        idx.swap(i, j);
    }
    idx.truncate(take);
    idx
}
