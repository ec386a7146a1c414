use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV: &str = "QUINTET_API_URL";

/// Environment variable overriding `[api] timeout_secs`.
pub const API_TIMEOUT_ENV: &str = "QUINTET_API_TIMEOUT_SECS";

/// Read `config.toml` and the environment, and store the result in the
/// global `OnceLock`. Safe to call multiple times; only the first call has
/// effect.
///
/// A missing or unparseable file yields the defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();

        let contents = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => Some(contents),
            Err(e) => {
                tracing::info!(path = CONFIG_PATH, error = %e, "config file not found, using defaults");
                None
            }
        };

        let config = resolve_config(
            contents.as_deref(),
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_TIMEOUT_ENV).ok(),
        );
        tracing::info!(base_url = %config.api.base_url, timeout_secs = config.api.timeout_secs, "client config loaded");
        config
    })
}

/// Get the loaded config. Falls back to defaults if `load_config()` has not
/// run yet.
pub fn config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

/// Combine the config file contents with environment overrides.
///
/// Environment values win over the file. Blank or unparseable overrides are
/// ignored.
pub fn resolve_config(
    file_contents: Option<&str>,
    url_override: Option<String>,
    timeout_override: Option<String>,
) -> AppConfig {
    let mut config = match file_contents {
        Some(contents) => toml::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!(path = CONFIG_PATH, error = %e, "failed to parse config file, using defaults");
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    if let Some(url) = url_override.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }

    if let Some(raw) = timeout_override {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.api.timeout_secs = secs,
            Err(_) => tracing::warn!(value = %raw, "ignoring invalid {API_TIMEOUT_ENV}"),
        }
    }

    config
}
