//! Client configuration models loaded from `cptmc.toml`.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::schedule::{DEFAULT_REFRESH_HOUR, REFERENCE_TIMEZONE, parse_timezone};
use crate::domain::{AppError, ItemId, Provider, ProviderEndpoint, ProviderList};

/// Default name of the process variable holding the deployment environment.
pub const DEFAULT_ENVIRONMENT_VARIABLE: &str = "CPTMC_ENVIRONMENT";

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// The hosting plugin or theme.
    pub item: ItemConfig,
    /// Where the provider list comes from.
    pub source: SourceConfig,
    /// Daily refresh timing.
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Deployment environment detection.
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.source.validate()?;
        self.refresh.validate()?;
        self.http.validate()?;
        self.environment.validate()?;
        Ok(())
    }
}

/// Identity of the hosting item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemConfig {
    pub unique_id: ItemId,
}

/// Provider list source, selected at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Fetch the list from a remote JSON document.
    Remote { url: Url },
    /// Use a fixed list.
    Static { providers: Vec<ProviderConfig> },
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            SourceConfig::Remote { url } => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(AppError::config_error(format!(
                        "source.url must use http or https: {url}"
                    )));
                }
                Ok(())
            }
            SourceConfig::Static { .. } => self.static_providers().map(|_| ()),
        }
    }

    /// Build the validated list of a static source. Remote sources have none.
    pub fn static_providers(&self) -> Result<ProviderList, AppError> {
        match self {
            SourceConfig::Static { providers } => {
                ProviderList::new(providers.iter().map(ProviderConfig::to_provider).collect())
            }
            SourceConfig::Remote { .. } => {
                Err(AppError::config_error("remote sources have no static providers"))
            }
        }
    }
}

/// One statically configured provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub identifier: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub production: EndpointConfig,
    #[serde(default)]
    pub staging: Option<EndpointConfig>,
}

impl ProviderConfig {
    pub fn to_provider(&self) -> Provider {
        let provider = Provider::new(
            self.identifier.clone(),
            self.production.to_endpoint(),
            self.staging.as_ref().map(EndpointConfig::to_endpoint),
        );
        if self.enabled { provider } else { provider.disabled() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub site_url: String,
    pub api_url: String,
    #[serde(default)]
    pub display_text: Option<String>,
}

impl EndpointConfig {
    pub fn to_endpoint(&self) -> ProviderEndpoint {
        ProviderEndpoint::new(&self.site_url, &self.api_url, self.display_text.clone())
    }
}

/// Daily refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshConfig {
    /// Local hour of the daily refresh.
    #[serde(default = "default_refresh_hour")]
    pub hour: u32,
    /// Host time zone. The reference zone is used when absent.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { hour: default_refresh_hour(), timezone: None }
    }
}

impl RefreshConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.hour > 23 {
            return Err(AppError::config_error("refresh.hour must be between 0 and 23"));
        }
        self.timezone()?;
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, AppError> {
        match &self.timezone {
            Some(name) => parse_timezone(name),
            None => Ok(REFERENCE_TIMEZONE),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout() }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("http.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

/// Environment detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Process variable holding `development`, `staging` or `production`.
    #[serde(default = "default_environment_variable")]
    pub variable: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { variable: default_environment_variable() }
    }
}

impl EnvironmentConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.variable.trim().is_empty() {
            return Err(AppError::config_error("environment.variable must not be empty"));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_refresh_hour() -> u32 {
    DEFAULT_REFRESH_HOUR
}

fn default_timeout() -> u64 {
    30
}

fn default_environment_variable() -> String {
    DEFAULT_ENVIRONMENT_VARIABLE.to_string()
}
