use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScrapeError;

pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";
pub const BASE_URL_ENV: &str = "CINEMETA_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://imdb236.p.rapidapi.com/api/imdb";

/// Upper bound on a single request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the metadata API. Built once at startup and handed to the
/// source; nothing below this reads the environment.
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub api_key: ConfigSource,
    pub base_url: ConfigSource,
    pub timeout: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    rapidapi: Option<RapidApiConfig>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct RapidApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Config with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load from environment variables and the config file.
    ///
    /// Priority: env vars > config file > defaults. The API key has no
    /// default; a missing key is a configuration error.
    pub fn load() -> Result<Self, ScrapeError> {
        resolve(env_var(API_KEY_ENV), env_var(BASE_URL_ENV), load_config_file())
    }

    /// Apply explicit values (e.g., from CLI args) on top of loaded ones.
    pub fn with_overrides(mut self, api_key: Option<String>, base_url: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn resolve(
    env_key: Option<String>,
    env_base_url: Option<String>,
    file: Option<RapidApiConfig>,
) -> Result<ApiConfig, ScrapeError> {
    let api_key = env_key
        .or_else(|| file.as_ref().and_then(|c| non_empty(c.api_key.clone())))
        .ok_or_else(|| {
            ScrapeError::config(format!(
                "Missing API key. Set {API_KEY_ENV} env var or add api_key to the [rapidapi] section of the config file"
            ))
        })?;

    let base_url = env_base_url
        .or_else(|| file.as_ref().and_then(|c| non_empty(c.base_url.clone())))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout = file
        .as_ref()
        .and_then(|c| c.timeout_secs)
        .filter(|&s| s > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    Ok(ApiConfig {
        api_key,
        base_url,
        timeout,
    })
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinemeta").join("config.toml"))
}

/// Save the config file, creating parent directories as needed.
///
/// Defaults are left out of the file. Returns the path written.
pub fn save_to_file(config: &ApiConfig) -> Result<PathBuf, ScrapeError> {
    let path =
        config_path().ok_or_else(|| ScrapeError::config("Could not determine config directory"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_str = render_config(config)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, toml_str)?;
    std::fs::rename(&tmp, &path)?;
    Ok(path)
}

fn render_config(config: &ApiConfig) -> Result<String, ScrapeError> {
    let file = ConfigFile {
        rapidapi: Some(RapidApiConfig {
            api_key: Some(config.api_key.clone()),
            base_url: (config.base_url != DEFAULT_BASE_URL).then(|| config.base_url.clone()),
            timeout_secs: (config.timeout != DEFAULT_TIMEOUT).then(|| config.timeout.as_secs()),
        }),
    };
    toml::to_string_pretty(&file)
        .map_err(|e| ScrapeError::config(format!("Failed to serialize config: {}", e)))
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let config = load_config_file();

    let api_key = if env_var(API_KEY_ENV).is_some() {
        ConfigSource::EnvVar(API_KEY_ENV)
    } else if config.as_ref().and_then(|c| non_empty(c.api_key.clone())).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Missing
    };

    let base_url = if env_var(BASE_URL_ENV).is_some() {
        ConfigSource::EnvVar(BASE_URL_ENV)
    } else if config.as_ref().and_then(|c| non_empty(c.base_url.clone())).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };

    let timeout = if config.as_ref().and_then(|c| c.timeout_secs).is_some() {
        ConfigSource::ConfigFile
    } else {
        ConfigSource::Default
    };

    ConfigSources {
        api_key,
        base_url,
        timeout,
    }
}

/// `ab****` for display; short secrets are fully masked.
pub fn mask_secret(s: &str) -> String {
    let prefix: String = s.chars().take(2).collect();
    if s.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}

fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn load_config_file() -> Option<RapidApiConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<RapidApiConfig> {
    match toml::from_str::<ConfigFile>(content) {
        Ok(config) => config.rapidapi,
        Err(e) => {
            log::warn!("Ignoring unreadable config file: {}", e);
            None
        }
    }
}
