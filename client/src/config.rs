use anyhow::{anyhow, Context};
use chrono::Locale;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIME_ZONE: &str = "UTC";
pub const DEFAULT_LOCALE: &str = "ro_RO";
pub const DEFAULT_STORAGE_PATH: &str = "./classbook-session.json";
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SCHEDULE_WINDOW_DAYS: usize = 30;

/// Raw, partially filled configuration as it appears in `config.json` or the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
    pub locale: Option<String>,
    pub storage_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub schedule_window_days: Option<usize>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: non_empty_var("CLASSBOOK_API_BASE_URL"),
            time_zone: non_empty_var("CLASSBOOK_TIMEZONE"),
            locale: non_empty_var("CLASSBOOK_LOCALE"),
            storage_path: non_empty_var("CLASSBOOK_STORAGE_PATH"),
            request_timeout_secs: non_empty_var("CLASSBOOK_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok()),
            schedule_window_days: non_empty_var("CLASSBOOK_SCHEDULE_WINDOW_DAYS")
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Reads a runtime config file. A missing file is not an error.
    pub fn from_file(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let parsed = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(Some(parsed))
    }

    /// Fills every unset field from `fallback`.
    pub fn or(self, fallback: RuntimeConfig) -> Self {
        Self {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            time_zone: self.time_zone.or(fallback.time_zone),
            locale: self.locale.or(fallback.locale),
            storage_path: self.storage_path.or(fallback.storage_path),
            request_timeout_secs: self.request_timeout_secs.or(fallback.request_timeout_secs),
            schedule_window_days: self.schedule_window_days.or(fallback.schedule_window_days),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub time_zone: Tz,
    pub locale: Locale,
    pub storage_path: PathBuf,
    pub request_timeout: Duration,
    pub schedule_window_days: usize,
}

impl AppConfig {
    /// Environment first, then the runtime config file, then built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = env::var("CLASSBOOK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let file = RuntimeConfig::from_file(&config_path)?;

        Self::from_sources(RuntimeConfig::from_env(), file)
    }

    pub fn from_sources(env: RuntimeConfig, file: Option<RuntimeConfig>) -> anyhow::Result<Self> {
        let merged = env.or(file.unwrap_or_default());

        let api_base_url = merged
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if api_base_url.is_empty() {
            return Err(anyhow!("API base URL must not be empty"));
        }

        let time_zone_name = merged
            .time_zone
            .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid CLASSBOOK_TIMEZONE value: {}", time_zone_name))?;

        let locale_name = merged.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let locale = Locale::try_from(locale_name.as_str())
            .map_err(|_| anyhow!("Invalid CLASSBOOK_LOCALE value: {}", locale_name))?;

        Ok(AppConfig {
            api_base_url,
            time_zone,
            locale,
            storage_path: PathBuf::from(
                merged
                    .storage_path
                    .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string()),
            ),
            request_timeout: Duration::from_secs(
                merged
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            schedule_window_days: merged
                .schedule_window_days
                .unwrap_or(DEFAULT_SCHEDULE_WINDOW_DAYS),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
