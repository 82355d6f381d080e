//! Provider and endpoint value objects.

use serde::Serialize;

/// URLs through which a provider can be reached.
///
/// `site_url` is the selling site shown to humans, `api_url` is queried for
/// version metadata and is usually the same host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEndpoint {
    site_url: String,
    api_url: String,
    display_text: String,
}

impl ProviderEndpoint {
    /// Build an endpoint. `display_text` falls back to `site_url` when absent or empty.
    pub fn new(
        site_url: impl Into<String>,
        api_url: impl Into<String>,
        display_text: Option<String>,
    ) -> Self {
        let site_url = site_url.into();
        let display_text =
            display_text.filter(|text| !text.is_empty()).unwrap_or_else(|| site_url.clone());
        Self { site_url, api_url: api_url.into(), display_text }
    }

    /// Endpoint whose site URL, API URL and display text are all `url`.
    ///
    /// Used to wrap manually supplied override URLs.
    pub fn self_referential(url: impl Into<String>) -> Self {
        let url = url.into();
        Self { site_url: url.clone(), api_url: url.clone(), display_text: url }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.site_url.trim().is_empty() {
            return Err("siteUrl must not be empty".to_string());
        }
        if self.api_url.trim().is_empty() {
            return Err("apiUrl must not be empty".to_string());
        }
        Ok(())
    }
}

/// A vendor offering version metadata for an item.
///
/// Everything except `enabled` is fixed at construction, and `enabled` can only
/// ever go from `true` to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    identifier: String,
    production_endpoint: ProviderEndpoint,
    staging_endpoint: Option<ProviderEndpoint>,
    enabled: bool,
}

impl Provider {
    pub fn new(
        identifier: impl Into<String>,
        production_endpoint: ProviderEndpoint,
        staging_endpoint: Option<ProviderEndpoint>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            production_endpoint,
            staging_endpoint,
            enabled: true,
        }
    }

    /// Stop handling updates for this provider. There is no way back.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Builder-style variant of [`Provider::disable`].
    pub fn disabled(mut self) -> Self {
        self.disable();
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn production_endpoint(&self) -> &ProviderEndpoint {
        &self.production_endpoint
    }

    pub fn staging_endpoint(&self) -> Option<&ProviderEndpoint> {
        self.staging_endpoint.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check the provider is well formed: non-empty identifier and complete endpoints.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.identifier.trim().is_empty() {
            return Err("identifier must not be empty".to_string());
        }
        self.production_endpoint
            .validate()
            .map_err(|reason| format!("production endpoint: {reason}"))?;
        if let Some(staging) = &self.staging_endpoint {
            staging.validate().map_err(|reason| format!("staging endpoint: {reason}"))?;
        }
        Ok(())
    }
}
