//! `settings` command: the settings surface on the command line.

use onthisday::render::SelectionMode;
use onthisday::settings::{AccessToken, JsonFileStore, Settings};
use onthisday::sources::FeedProvider;
use onthisday::state::Session;

use super::definition::{Result, SettingsAction};
use super::utils::{confirm, unescape};

/// What: Apply one settings action.
///
/// Inputs:
/// - `session`: Loaded session; changes are persisted through its store.
/// - `action`: What to show or change.
///
/// Output:
/// - `Ok(())` after the change was applied and reported.
///
/// # Errors
/// - Unknown provider or mode keys, token prompt failures, JSON rendering failures.
pub fn handle_settings(session: &mut Session<JsonFileStore>, action: SettingsAction) -> Result<()> {
    let mut surface = session.settings_surface();
    match action {
        SettingsAction::Show => {
            println!("{}", render_redacted(surface.settings())?);
        }
        SettingsAction::SetAmount { value } => {
            let stored = surface.set_amount_of_events(&value);
            println!("amountOfEvents = {stored}");
        }
        SettingsAction::SetTitle { template } => {
            surface.set_title_template(&unescape(&template));
            println!("titleTemplate updated");
        }
        SettingsAction::SetItem { template } => {
            surface.set_item_template(&unescape(&template));
            println!("itemTemplate updated");
        }
        SettingsAction::SetDateFormat { format } => {
            surface.set_title_date_format(&format);
            println!("titleDateFormat = {format}");
        }
        SettingsAction::SetToken { token } => {
            let raw = match token {
                Some(t) => t,
                None => rpassword::prompt_password("Access token: ")?,
            };
            let token = AccessToken::new(raw);
            let cleared = token.is_empty();
            surface.set_access_token(token);
            println!("{}", if cleared { "access token cleared" } else { "access token saved" });
        }
        SettingsAction::SetProvider { provider } => {
            let parsed = FeedProvider::from_config_key(&provider).ok_or_else(|| {
                let known: Vec<&str> = FeedProvider::ALL.iter().map(|p| p.as_config_key()).collect();
                format!("unknown provider '{provider}' (expected one of: {})", known.join(", "))
            })?;
            surface.set_feed_provider(parsed);
            println!("feedProvider = {parsed}");
            if parsed.requires_token() && surface.settings().access_token.is_empty() {
                eprintln!("note: {parsed} needs an access token (settings set-token)");
            }
        }
        SettingsAction::SetBaseUrl { url } => {
            surface.set_base_url(&url);
            println!("baseUrl = {}", surface.settings().effective_base_url());
        }
        SettingsAction::SetMode { mode } => {
            let parsed = SelectionMode::from_config_key(&mode)
                .ok_or_else(|| format!("unknown selection mode '{mode}' (expected first or random)"))?;
            surface.set_selection_mode(parsed);
            println!("selectionMode = {}", parsed.as_config_key());
        }
        SettingsAction::SetCategories { categories } => {
            surface.set_enabled_categories(&categories);
            let stored = &surface.settings().enabled_categories;
            if stored.is_empty() {
                println!("enabledCategories = (all)");
            } else {
                println!("enabledCategories = {}", stored.join(", "));
            }
        }
        SettingsAction::Reset { yes } => {
            let reset =
                surface.reset_to_default(|| yes || confirm("Reset all settings to their defaults?"));
            println!("{}", if reset { "settings reset" } else { "reset cancelled" });
        }
    }
    Ok(())
}

/// What: Pretty JSON of `settings` with the access token masked.
///
/// Inputs:
/// - `settings`: Values to print.
///
/// Output:
/// - JSON text in the persisted shape.
///
/// # Errors
/// - Serialization failure.
fn render_redacted(settings: &Settings) -> Result<String> {
    let mut value = serde_json::to_value(settings)?;
    if !settings.access_token.is_empty()
        && let Some(obj) = value.as_object_mut()
    {
        obj.insert(
            "accessToken".to_string(),
            serde_json::Value::String("<redacted>".to_string()),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
