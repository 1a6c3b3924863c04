use shared_types::AppConfig;
use std::path::Path;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml`, apply `API_BASE_URL` / `PRESET_BASE_URL` from the
/// environment (after loading `.env`), and store the result. Only the first
/// call has effect.
pub fn load() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        let config = read_config(Path::new(CONFIG_PATH)).with_overrides(
            std::env::var("API_BASE_URL").ok(),
            std::env::var("PRESET_BASE_URL").ok(),
        );
        tracing::info!(
            base_url = %config.api.base_url,
            presets = config.media.preset_base_url.as_deref().unwrap_or("bundled"),
            "configuration loaded"
        );
        config
    })
}

/// Parse a config file. A missing or unparseable file yields defaults.
pub fn read_config(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config, using defaults"
            );
            AppConfig::default()
        }),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "config file not found, using defaults"
            );
            AppConfig::default()
        }
    }
}
