//! Runtime settings for the FPL agent.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `FPL_*` environment variables, then CLI flags applied by the caller.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use crate::{
    core::retry::RetryPolicy,
    error::FplError,
    Result,
};

#[cfg(test)]
mod tests;

pub const DEFAULT_BASE_URL: &str = "https://fantasy.premierleague.com/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub enable_cache: bool,
    /// Expiry for memoized responses. `None` keeps entries until cleared.
    pub cache_ttl_secs: Option<u64>,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub backoff_multiplier: f64,
    pub backoff_max_ms: u64,
    pub min_request_interval_ms: u64,
    pub rate_limit_cooldown_ms: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            enable_cache: true,
            cache_ttl_secs: None,
            request_timeout_secs: 10,
            max_attempts: 3,
            backoff_base_ms: 2_000,
            backoff_multiplier: 2.0,
            backoff_max_ms: 10_000,
            min_request_interval_ms: 500,
            rate_limit_cooldown_ms: 5_000,
            user_agent: "FPL-Agent/1.0".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Contents of a settings file, or `None` if it cannot be read.
fn read_config_file(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Path: ~/.config/fpl-agent/config.toml
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join("fpl-agent").join("config.toml")
}

impl Settings {
    /// Load settings from an explicit file (which must exist) or the default
    /// location (used only if present), then apply environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut settings = match config_path {
            Some(path) => {
                let contents = read_config_file(path).ok_or_else(|| FplError::Config {
                    message: format!("config file not found: {}", path.display()),
                })?;
                Self::from_toml_str(&contents)?
            }
            None => match read_config_file(&default_config_path()) {
                Some(contents) => Self::from_toml_str(&contents)?,
                None => Self::default(),
            },
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(contents)?;
        settings.cache_ttl_secs = settings.cache_ttl_secs.filter(|&secs| secs > 0);
        Ok(settings)
    }

    /// Apply `FPL_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FPL_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = env_value::<bool, _>(&lookup, "FPL_ENABLE_CACHE")? {
            self.enable_cache = v;
        }
        if let Some(v) = env_value::<u64, _>(&lookup, "FPL_CACHE_TTL_SECS")? {
            self.cache_ttl_secs = if v == 0 { None } else { Some(v) };
        }
        if let Some(v) = env_value(&lookup, "FPL_REQUEST_TIMEOUT_SECS")? {
            self.request_timeout_secs = v;
        }
        if let Some(v) = env_value(&lookup, "FPL_MAX_ATTEMPTS")? {
            self.max_attempts = v;
        }
        if let Some(v) = env_value(&lookup, "FPL_BACKOFF_BASE_MS")? {
            self.backoff_base_ms = v;
        }
        if let Some(v) = env_value(&lookup, "FPL_BACKOFF_MULTIPLIER")? {
            self.backoff_multiplier = v;
        }
        if let Some(v) = env_value(&lookup, "FPL_BACKOFF_MAX_MS")? {
            self.backoff_max_ms = v;
        }
        if let Some(v) = env_value(&lookup, "FPL_MIN_REQUEST_INTERVAL_MS")? {
            self.min_request_interval_ms = v;
        }
        if let Some(v) = env_value(&lookup, "FPL_RATE_LIMIT_COOLDOWN_MS")? {
            self.rate_limit_cooldown_ms = v;
        }
        if let Some(v) = lookup("FPL_USER_AGENT") {
            self.user_agent = v;
        }
        if let Some(v) = lookup("FPL_LOG_LEVEL") {
            self.log_level = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(FplError::Config {
                message: "max_attempts must be at least 1".to_string(),
            });
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(FplError::Config {
                message: "backoff_multiplier must be >= 1.0".to_string(),
            });
        }
        if self.base_url.trim().is_empty() {
            return Err(FplError::Config {
                message: "base_url must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.backoff_base_ms),
            multiplier: self.backoff_multiplier,
            max_delay: Duration::from_millis(self.backoff_max_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn rate_limit_cooldown(&self) -> Duration {
        Duration::from_millis(self.rate_limit_cooldown_ms)
    }

    /// Zero means no expiry, same as unset.
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

fn env_value<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| FplError::Config {
                message: format!("{key}={raw:?} is invalid: {e}"),
            }),
    }
}
