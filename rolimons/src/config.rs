use crate::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const CSV_PATH: &str = "sale_data_all_items.csv";
pub const API_URL: &str = "https://api.rolimons.com";
pub const WEB_URL: &str = "https://www.rolimons.com";
pub const MAX_ACTIVITY_PAGES: u32 = 2;
pub const ACTIVITY_TARGET: usize = 70;
pub const ACTIVITY_COOLDOWN_SECS: u64 = 45;
pub const CATALOG_COOLDOWN_SECS: u64 = 30;
pub const POLL_INTERVAL_SECS: u64 = 60;

/// Runtime settings. Every field can be overridden with a `ROLIMONS_*`
/// environment variable (or the `.env` file).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub csv_path: PathBuf,
    pub activity_base_url: String,
    pub catalog_base_url: String,
    pub max_activity_pages: u32,
    /// Stop paging once this many activities have been collected.
    pub activity_target: usize,
    pub activity_rate_limit_cooldown: Duration,
    pub catalog_rate_limit_cooldown: Duration,
    pub poll_interval: Duration,
    /// `None` retries a rate limited catalog fetch forever.
    pub catalog_max_retries: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(CSV_PATH),
            activity_base_url: API_URL.to_string(),
            catalog_base_url: WEB_URL.to_string(),
            max_activity_pages: MAX_ACTIVITY_PAGES,
            activity_target: ACTIVITY_TARGET,
            activity_rate_limit_cooldown: Duration::from_secs(ACTIVITY_COOLDOWN_SECS),
            catalog_rate_limit_cooldown: Duration::from_secs(CATALOG_COOLDOWN_SECS),
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            catalog_max_retries: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| -> Result<Duration> {
            Ok(parse(&lookup, key)?.map(Duration::from_secs).unwrap_or(default))
        };

        Ok(Self {
            csv_path: lookup("ROLIMONS_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
            activity_base_url: lookup("ROLIMONS_API_URL").unwrap_or(defaults.activity_base_url),
            catalog_base_url: lookup("ROLIMONS_WEB_URL").unwrap_or(defaults.catalog_base_url),
            max_activity_pages: parse(&lookup, "ROLIMONS_MAX_ACTIVITY_PAGES")?
                .unwrap_or(defaults.max_activity_pages),
            activity_target: parse(&lookup, "ROLIMONS_ACTIVITY_TARGET")?
                .unwrap_or(defaults.activity_target),
            activity_rate_limit_cooldown: secs(
                "ROLIMONS_ACTIVITY_COOLDOWN_SECS",
                defaults.activity_rate_limit_cooldown,
            )?,
            catalog_rate_limit_cooldown: secs(
                "ROLIMONS_CATALOG_COOLDOWN_SECS",
                defaults.catalog_rate_limit_cooldown,
            )?,
            poll_interval: secs("ROLIMONS_POLL_INTERVAL_SECS", defaults.poll_interval)?,
            catalog_max_retries: parse(&lookup, "ROLIMONS_CATALOG_MAX_RETRIES")?,
        })
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{key} has invalid value {value:?}")))
        })
        .transpose()
}
