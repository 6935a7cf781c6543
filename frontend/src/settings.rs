use serde::{Deserialize, Serialize};

use crate::money::AmountMode;

/// Prefix for API paths. Empty means same origin as the page.
pub const API_BASE_URL: &str = "";

const SETTINGS_KEY: &str = "settings";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub currency_symbol: String,
    pub amount_mode: AmountMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            currency_symbol: "$".to_string(),
            amount_mode: AmountMode::Decimal,
        }
    }
}

pub fn load_settings() -> AppSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) {
                match serde_json::from_str::<AppSettings>(&raw) {
                    Ok(settings) => return settings,
                    Err(err) => log::warn!("ignoring stored settings: {}", err),
                }
            }
        }
    }
    AppSettings::default()
}

pub fn save_settings(settings: &AppSettings) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(settings) {
                if storage.set_item(SETTINGS_KEY, &raw).is_err() {
                    log::warn!("could not persist settings");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"amount_mode":"integer"}"#).unwrap();
        assert_eq!(
            settings,
            AppSettings {
                currency_symbol: "$".to_string(),
                amount_mode: AmountMode::Integer,
            }
        );
    }
}
