use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::ClientError;

pub const SETTINGS_FILE: &str = "nomikai.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Where share links point. May carry a path prefix such as
    /// `https://host.example/app`.
    pub public_origin: String,
    pub hash_routing: bool,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            public_origin: "http://localhost:5173".into(),
            hash_routing: false,
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn public_origin_url(&self) -> Result<Url, ClientError> {
        let normalized = normalize_base_url(&self.public_origin)?;
        Url::parse(&normalized).map_err(|err| ClientError::InvalidBaseUrl {
            url: self.public_origin.clone(),
            reason: err.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    public_origin: Option<String>,
    hash_routing: Option<bool>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file (if readable), then environment
/// variables. Later `APP__*` variables win over the short names.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.public_origin {
                    settings.public_origin = v;
                }
                if let Some(v) = file_cfg.hash_routing {
                    settings.hash_routing = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            }
        }
    }

    for key in ["VITE_API_URL", "NOMIKAI_API_URL", "APP__API_BASE_URL"] {
        if let Some(v) = env(key) {
            settings.api_base_url = v;
        }
    }

    for key in ["NOMIKAI_PUBLIC_ORIGIN", "APP__PUBLIC_ORIGIN"] {
        if let Some(v) = env(key) {
            settings.public_origin = v;
        }
    }

    if let Some(v) = env("APP__HASH_ROUTING") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => settings.hash_routing = true,
            "0" | "false" | "no" => settings.hash_routing = false,
            _ => warn!(value = %v, "ignoring invalid APP__HASH_ROUTING"),
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

/// Trims whitespace and trailing slashes so paths can be appended with
/// `format!("{base}{path}")`. Only http(s) URLs are accepted.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("url is empty".into()));
    }

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("url must not carry a query or fragment".into()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
