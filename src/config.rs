// Use 3rd party
use reqwest::Url;
use thiserror::Error;

// Use built-in library
use std::env;

pub const API_BASE_URL_VAR: &str = "WAVEFORM_API_BASE_URL";
pub const IDENTITY_URL_VAR: &str = "WAVEFORM_IDENTITY_URL";
pub const IDENTITY_API_KEY_VAR: &str = "WAVEFORM_IDENTITY_API_KEY";

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Endpoints and keys of the remote services.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub identity_url: String,
    pub identity_api_key: Option<String>,
}

impl Config {
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            identity_url: DEFAULT_IDENTITY_URL.to_owned(),
            identity_api_key: None,
        }
    }

    pub fn identity(mut self, url: &str, api_key: &str) -> Self {
        self.identity_url = url.trim_end_matches('/').to_owned();
        self.identity_api_key = Some(api_key.to_owned());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(API_BASE_URL_VAR))?;
        let api_base_url = check_url(API_BASE_URL_VAR, &api_base_url)?;

        let mut config = Self::new(&api_base_url);
        if let Some(identity_url) = lookup(IDENTITY_URL_VAR).filter(|value| !value.trim().is_empty()) {
            config.identity_url = check_url(IDENTITY_URL_VAR, &identity_url)?;
        }
        config.identity_api_key = lookup(IDENTITY_API_KEY_VAR).filter(|value| !value.is_empty());
        Ok(config)
    }
}

/// Parses an http(s) URL with a host and returns it without a trailing slash.
fn check_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::InvalidUrl {
        name,
        value: value.to_owned(),
    };
    let url = Url::parse(value).map_err(|_| invalid())?;
    let has_host = url.host_str().map_or(false, |host| !host.is_empty());
    if !matches!(url.scheme(), "http" | "https") || !has_host {
        return Err(invalid());
    }
    Ok(url.as_str().trim_end_matches('/').to_owned())
}
