use std::env;

/// Configuration options for the remote PIM connection.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Base URL of the PIM management API (categories, attribute
    /// definitions, category-attribute links).
    pub api_url: String,
    /// Base URL of the notification API (webhooks).
    pub notification_url: String,
    /// Base URL of the global settings API (localization contexts).
    pub settings_url: String,
    /// Ready-to-use bearer token. Credential negotiation happens outside
    /// this crate.
    pub token: String,
    /// When set, every request/response pair is logged at debug level.
    pub debug: bool,
}

/// Returns the environment variable `key`, or `fallback` when unset or
/// empty.
fn getenv(key: &str, fallback: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => fallback.to_string(),
    }
}

impl SyncConfig {
    /// Loads the configuration from the environment, honouring an `.env`
    /// file when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            api_url: getenv("PIM_API_URL", "https://api.bluestonepim.com/pim"),
            notification_url: getenv(
                "PIM_NOTIFICATION_URL",
                "https://api.bluestonepim.com/notification-external",
            ),
            settings_url: getenv(
                "PIM_SETTINGS_URL",
                "https://api.bluestonepim.com/global-settings",
            ),
            token: getenv("PIM_API_TOKEN", ""),
            debug: getenv("PIM_DEBUG", "") == "1",
        }
    }
}
