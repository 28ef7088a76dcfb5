//! Plugin data stores and the load/save lifecycle of settings.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::types::{DEFAULT_AMOUNT_OF_EVENTS, Settings, clamp_amount, parse_amount};

/// Failure reading or writing the plugin data object.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem error.
    #[error("plugin data I/O failed for {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Serialization error.
    #[error("plugin data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value document store the host offers for plugin data.
///
/// The whole settings object is read and written as one JSON value.
pub trait PluginDataStore {
    /// What: Read the persisted object.
    ///
    /// Output:
    /// - `Ok(None)` when nothing was saved yet; `Ok(Some(value))` otherwise.
    ///
    /// # Errors
    /// - Storage or decoding failures.
    fn load_data(&self) -> Result<Option<Value>, StoreError>;

    /// What: Replace the persisted object.
    ///
    /// # Errors
    /// - Storage or encoding failures.
    fn save_data(&self, data: &Value) -> Result<(), StoreError>;
}

/// Plugin data kept in a pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    /// Location of `data.json`.
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`; nothing is touched until the first load/save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PluginDataStore for JsonFileStore {
    fn load_data(&self) -> Result<Option<Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save_data(&self, data: &Value) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let mut s = serde_json::to_string_pretty(data)?;
        s.push('\n');
        fs::write(&self.path, s).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store, for hosts without persistence and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Last saved object.
    data: RefCell<Option<Value>>,
    /// Number of successful saves.
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Store pre-populated with `data`, as if a previous session had saved it.
    #[must_use]
    pub fn with_data(data: Value) -> Self {
        Self {
            data: RefCell::new(Some(data)),
            writes: Cell::new(0),
        }
    }

    /// Current stored object.
    #[must_use]
    pub fn snapshot(&self) -> Option<Value> {
        self.data.borrow().clone()
    }

    /// How many times `save_data` ran.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl PluginDataStore for MemoryStore {
    fn load_data(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.data.borrow().clone())
    }

    fn save_data(&self, data: &Value) -> Result<(), StoreError> {
        *self.data.borrow_mut() = Some(data.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// What: Load settings from `store`, merged over defaults.
///
/// Inputs:
/// - `store`: Plugin data store.
///
/// Output:
/// - Settings with every persisted, well-shaped field applied.
///
/// Details:
/// - A missing, unreadable, or non-object document yields `Settings::default()`.
/// - Read failures are logged, not returned.
pub fn load(store: &dyn PluginDataStore) -> Settings {
    match store.load_data() {
        Ok(Some(value)) => {
            let settings = merge_over_defaults(&value);
            tracing::info!(
                provider = settings.feed_provider.as_config_key(),
                amount = settings.amount_of_events,
                "loaded settings"
            );
            settings
        }
        Ok(None) => {
            tracing::info!("no persisted settings; using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted settings; using defaults");
            Settings::default()
        }
    }
}

/// What: Persist the full settings object.
///
/// Inputs:
/// - `store`: Plugin data store.
/// - `settings`: Settings to write.
///
/// Details:
/// - Fire-and-forget: failures are logged at `warn` and swallowed. Last write wins.
pub fn save(store: &dyn PluginDataStore, settings: &Settings) {
    let value = match serde_json::to_value(settings) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode settings");
            return;
        }
    };
    match store.save_data(&value) {
        Ok(()) => tracing::debug!("settings persisted"),
        Err(e) => tracing::warn!(error = %e, "failed to persist settings"),
    }
}

/// What: Build settings from a persisted JSON document, field by field.
///
/// Inputs:
/// - `value`: Persisted document.
///
/// Output:
/// - Defaults overlaid with every field whose persisted value has the expected shape.
///
/// Details:
/// - Wrong-shaped fields are skipped (logged at `debug`) and keep their default.
/// - `amountOfEvents` accepts numbers or numeric strings and is clamped to `1..=10`.
#[must_use]
pub fn merge_over_defaults(value: &Value) -> Settings {
    let mut out = Settings::default();
    let Some(obj) = value.as_object() else {
        tracing::warn!("persisted settings are not a JSON object; using defaults");
        return out;
    };
    merge_field(obj, "feedProvider", &mut out.feed_provider);
    merge_field(obj, "baseUrl", &mut out.base_url);
    merge_field(obj, "accessToken", &mut out.access_token);
    merge_field(obj, "titleTemplate", &mut out.title_template);
    merge_field(obj, "itemTemplate", &mut out.item_template);
    merge_field(obj, "titleDateFormat", &mut out.title_date_format);
    merge_field(obj, "selectionMode", &mut out.selection_mode);
    merge_field(obj, "enabledCategories", &mut out.enabled_categories);
    if let Some(v) = obj.get("amountOfEvents") {
        out.amount_of_events = amount_from_value(v);
    }
    out
}

/// Overwrite `slot` with `obj[key]` when it deserializes as `T`.
fn merge_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(v) = obj.get(key) else {
        return;
    };
    match T::deserialize(v) {
        Ok(parsed) => *slot = parsed,
        Err(e) => tracing::debug!(key, error = %e, "ignoring persisted setting with unexpected shape"),
    }
}

/// Amount from a persisted JSON value.
fn amount_from_value(v: &Value) -> u8 {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                clamp_amount(i)
            } else if n.as_u64().is_some() {
                clamp_amount(i64::MAX)
            } else {
                n.as_f64().map_or(DEFAULT_AMOUNT_OF_EVENTS, |f| parse_amount(&f.to_string()))
            }
        }
        Value::String(s) => parse_amount(s),
        _ => {
            tracing::debug!("ignoring persisted amountOfEvents with unexpected shape");
            DEFAULT_AMOUNT_OF_EVENTS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SelectionMode;
    use crate::sources::FeedProvider;
    use serde_json::json;

    #[test]
    /// What: Wrong-shaped fields fall back to defaults while valid ones are applied.
    ///
    /// Inputs:
    /// - A document with a numeric `titleTemplate`, a valid `itemTemplate`, an unknown provider,
    ///   and an out-of-range amount.
    ///
    /// Output:
    /// - Only the valid fields differ from the defaults; the amount is clamped.
    fn merge_ignores_wrong_shapes_and_clamps_amount() {
        let doc = json!({
            "titleTemplate": 42,
            "itemTemplate": "- {{description}}\n",
            "feedProvider": "not-a-provider",
            "amountOfEvents": 250,
            "enabledCategories": "births",
            "selectionMode": "random",
            "someFutureField": true
        });
        let s = merge_over_defaults(&doc);
        let d = Settings::default();
        assert_eq!(s.title_template, d.title_template);
        assert_eq!(s.item_template, "- {{description}}\n");
        assert_eq!(s.feed_provider, FeedProvider::default());
        assert_eq!(s.amount_of_events, 10);
        assert!(s.enabled_categories.is_empty());
        assert_eq!(s.selection_mode, SelectionMode::Random);
    }

    #[test]
    fn amount_from_value_handles_every_shape() {
        assert_eq!(amount_from_value(&json!(4)), 4);
        assert_eq!(amount_from_value(&json!(-1)), 1);
        assert_eq!(amount_from_value(&json!(u64::MAX)), 10);
        assert_eq!(amount_from_value(&json!(7.9)), 7);
        assert_eq!(amount_from_value(&json!("8")), 8);
        assert_eq!(amount_from_value(&json!("eight")), DEFAULT_AMOUNT_OF_EVENTS);
        assert_eq!(amount_from_value(&json!(null)), DEFAULT_AMOUNT_OF_EVENTS);
    }

    #[test]
    fn non_object_document_yields_defaults() {
        assert_eq!(merge_over_defaults(&json!([1, 2, 3])), Settings::default());
    }

    #[test]
    /// What: Saved settings load back identically through the file store.
    ///
    /// Inputs:
    /// - Non-default settings saved into a temp directory that does not exist yet.
    ///
    /// Output:
    /// - The loaded settings equal the saved ones; the file uses camelCase keys.
    fn json_file_store_round_trips_settings() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonFileStore::new(tmp.path().join("nested").join("data.json"));
        assert_eq!(load(&store), Settings::default());

        let mut s = Settings::default();
        s.amount_of_events = 7;
        s.title_template = "# {{date}}\n".into();
        s.enabled_categories = vec!["births".into()];
        save(&store, &s);

        let raw = fs::read_to_string(store.path()).expect("Failed to read data file");
        assert!(raw.contains("\"amountOfEvents\": 7"));
        assert_eq!(load(&store), s);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let path = tmp.path().join("data.json");
        fs::write(&path, "{ not json").expect("Failed to write data file");
        let store = JsonFileStore::new(&path);
        assert!(store.load_data().is_err());
        assert_eq!(load(&store), Settings::default());
    }
}
