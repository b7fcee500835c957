use std::path::PathBuf;

pub const DEFAULT_SCRAPE_URL: &str = "https://www.adamchoi.co.uk/overs/detailed?country={country}";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const MIN_HTTP_TIMEOUT_SECS: u64 = 5;

/// Runtime settings injected through the environment (optionally from
/// `.env.local` / `.env`). Nothing secret lives in the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scrape_url: String,
    pub http_timeout_secs: u64,
    pub db_path: Option<PathBuf>,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_timeout_secs = get("FOOT_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .max(MIN_HTTP_TIMEOUT_SECS);

        Self {
            scrape_url: get("FOOT_SCRAPE_URL").unwrap_or_else(|| DEFAULT_SCRAPE_URL.to_string()),
            http_timeout_secs,
            db_path: get("FOOT_DB_PATH").map(PathBuf::from),
            notify: NotifyConfig {
                url: get("FOOT_NOTIFY_URL"),
                token: get("FOOT_NOTIFY_TOKEN"),
                from: get("FOOT_NOTIFY_FROM"),
                to: get("FOOT_NOTIFY_TO"),
            },
        }
    }
}
