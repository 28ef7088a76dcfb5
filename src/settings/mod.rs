//! Settings model, persistence, and the mutation surface exposed to the host.

mod paths;
mod store;
mod types;

pub use paths::{config_dir, data_path, logs_dir};
pub use store::{
    JsonFileStore, MemoryStore, PluginDataStore, StoreError, load, merge_over_defaults, save,
};
pub use types::{
    AccessToken, DEFAULT_AMOUNT_OF_EVENTS, DEFAULT_ITEM_TEMPLATE, DEFAULT_TITLE_DATE_FORMAT,
    DEFAULT_TITLE_TEMPLATE, MAX_AMOUNT_OF_EVENTS, MIN_AMOUNT_OF_EVENTS, Settings, clamp_amount,
    parse_amount,
};

use crate::render::SelectionMode;
use crate::sources::FeedProvider;

/// Editable view over the session's settings.
///
/// Every setter applies its change and persists the full settings object immediately.
pub struct SettingsSurface<'a> {
    /// Settings being edited.
    settings: &'a mut Settings,
    /// Where changes are written.
    store: &'a dyn PluginDataStore,
}

impl<'a> SettingsSurface<'a> {
    /// Surface editing `settings` and persisting through `store`.
    pub fn new(settings: &'a mut Settings, store: &'a dyn PluginDataStore) -> Self {
        Self { settings, store }
    }

    /// Current values.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &*self.settings
    }

    /// Apply `f` and persist.
    fn update(&mut self, f: impl FnOnce(&mut Settings)) {
        f(&mut *self.settings);
        save(self.store, &*self.settings);
    }

    /// What: Set the number of events from free-form user input.
    ///
    /// Inputs:
    /// - `raw`: Text typed into the amount field.
    ///
    /// Output:
    /// - The stored amount after clamping (or the default when `raw` is not numeric).
    pub fn set_amount_of_events(&mut self, raw: &str) -> u8 {
        let amount = parse_amount(raw);
        tracing::debug!(raw, amount, "amount of events updated");
        self.update(|s| s.amount_of_events = amount);
        amount
    }

    /// Replace the title template.
    pub fn set_title_template(&mut self, template: &str) {
        self.update(|s| s.title_template = template.to_string());
    }

    /// Replace the item template.
    pub fn set_item_template(&mut self, template: &str) {
        self.update(|s| s.item_template = template.to_string());
    }

    /// Replace the title date pattern.
    pub fn set_title_date_format(&mut self, format: &str) {
        self.update(|s| s.title_date_format = format.to_string());
    }

    /// Replace the access token.
    pub fn set_access_token(&mut self, token: AccessToken) {
        self.update(|s| s.access_token = token);
    }

    /// Switch feed provider.
    pub fn set_feed_provider(&mut self, provider: FeedProvider) {
        self.update(|s| s.feed_provider = provider);
    }

    /// Override the provider base URL; empty restores the provider default.
    pub fn set_base_url(&mut self, url: &str) {
        self.update(|s| s.base_url = url.trim().trim_end_matches('/').to_string());
    }

    /// Switch how events are picked.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.update(|s| s.selection_mode = mode);
    }

    /// Replace the categories eligible for random selection. Blank entries are dropped.
    pub fn set_enabled_categories(&mut self, categories: &[String]) {
        let cleaned: Vec<String> = categories
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self.update(|s| s.enabled_categories = cleaned);
    }

    /// What: Destructive reset to defaults, gated by a confirmation prompt.
    ///
    /// Inputs:
    /// - `confirm`: Asked once; the reset only happens when it returns `true`.
    ///
    /// Output:
    /// - `true` when the settings were reset and persisted.
    pub fn reset_to_default(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            tracing::info!("settings reset cancelled");
            return false;
        }
        self.update(|s| *s = Settings::default());
        tracing::info!("settings reset to defaults");
        true
    }
}
