use std::{fs, time::Duration};

use serde::Deserialize;
use shared::protocol::{ACTIVITY_LIMIT, RECOMMENDATION_LIMIT};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const CONFIG_FILE_NAME: &str = "agent_console.toml";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api url must not be empty")]
    EmptyUrl,
    #[error("invalid api url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api url must start with http:// or https://, got {0:?}")]
    UnsupportedScheme(String),
    #[error("failed to parse agent_console.toml: {0}")]
    File(#[from] toml::de::Error),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub recommendation_limit: u32,
    pub activity_limit: u32,
    pub request_timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            recommendation_limit: RECOMMENDATION_LIMIT,
            activity_limit: ACTIVITY_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(raw)?,
            ..Self::default()
        })
    }

    /// Layers defaults, the optional config file, then environment variables.
    pub fn from_sources(
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = file_contents {
            let file_cfg: FileConfig = toml::from_str(raw)?;
            if let Some(v) = file_cfg.api_url {
                config.base_url = normalize_base_url(&v)?;
            }
            if let Some(secs) = file_cfg.request_timeout_secs {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        for name in ["AGENT_API_URL", "APP__API_URL"] {
            if let Some(v) = non_empty(env(name)) {
                config.base_url = normalize_base_url(&v)?;
            }
        }

        if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
            match v.trim().parse::<u64>() {
                Ok(secs) => config.request_timeout = Duration::from_secs(secs),
                Err(err) => tracing::warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS: {err}"),
            }
        }

        Ok(config)
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let file_contents = fs::read_to_string(CONFIG_FILE_NAME).ok();
    ClientConfig::from_sources(file_contents.as_deref(), |name| std::env::var(name).ok())
}

pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::UnsupportedScheme(trimmed.to_string()));
    }
    Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        url: trimmed.to_string(),
        source,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
