//! Endpoint resolution rules.
//!
//! Precedence, highest first:
//! 1. an explicit override URL passed by the caller
//! 2. in development, the persisted override, then the environment override
//! 3. the selected provider (disabled providers resolve to nothing)
//! 4. its staging endpoint when running in staging, else its production endpoint

use std::fmt;

use crate::domain::{Environment, Provider, ProviderEndpoint, select_provider};

/// Why no endpoint could be resolved. Never shown to end users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionMiss {
    /// The provider list is empty or unavailable.
    NoProviders,
    /// Several providers exist and none was chosen.
    NoSelection,
    /// The persisted selection names a provider that is no longer listed.
    SelectionUnavailable { selected: String },
    /// The selected provider was disabled by configuration.
    ProviderDisabled { identifier: String },
}

impl fmt::Display for ResolutionMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMiss::NoProviders => write!(f, "no providers available"),
            ResolutionMiss::NoSelection => write!(f, "no provider selected"),
            ResolutionMiss::SelectionUnavailable { selected } => {
                write!(f, "selected provider '{selected}' is no longer available")
            }
            ResolutionMiss::ProviderDisabled { identifier } => {
                write!(f, "provider '{identifier}' is disabled")
            }
        }
    }
}

/// Where an override URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideSource {
    /// Stored through the override setter.
    Persisted,
    /// Read from a process environment variable.
    Environment,
}

/// Development-only override URLs for one target (update endpoint or providers list).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DevOverrides<'a> {
    pub persisted: Option<&'a str>,
    pub environment: Option<&'a str>,
}

impl<'a> DevOverrides<'a> {
    pub fn new(persisted: Option<&'a str>, environment: Option<&'a str>) -> Self {
        Self { persisted, environment }
    }

    /// First non-empty override, persisted before environment. Always `None`
    /// outside development.
    pub fn pick(&self, environment: Environment) -> Option<(&'a str, OverrideSource)> {
        if !environment.is_development() {
            return None;
        }
        non_empty(self.persisted)
            .map(|url| (url, OverrideSource::Persisted))
            .or_else(|| non_empty(self.environment).map(|url| (url, OverrideSource::Environment)))
    }
}

/// How the resolved endpoint was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointOrigin {
    ExplicitOverride,
    DevelopmentOverride(OverrideSource),
    Staging { provider: String },
    Production { provider: String },
}

impl EndpointOrigin {
    /// Identifier of the provider the endpoint belongs to, if any.
    pub fn provider(&self) -> Option<&str> {
        match self {
            EndpointOrigin::Staging { provider } | EndpointOrigin::Production { provider } => {
                Some(provider)
            }
            EndpointOrigin::ExplicitOverride | EndpointOrigin::DevelopmentOverride(_) => None,
        }
    }
}

/// An endpoint together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub endpoint: ProviderEndpoint,
    pub origin: EndpointOrigin,
}

impl ResolvedEndpoint {
    pub fn api_url(&self) -> &str {
        self.endpoint.api_url()
    }
}

/// Outcome of endpoint resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedEndpoint),
    Miss(ResolutionMiss),
}

impl Resolution {
    /// The API URL to query, or `None` when the update check must be skipped.
    pub fn url(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(resolved) => Some(resolved.api_url()),
            Resolution::Miss(_) => None,
        }
    }

    pub fn resolved(&self) -> Option<&ResolvedEndpoint> {
        match self {
            Resolution::Resolved(resolved) => Some(resolved),
            Resolution::Miss(_) => None,
        }
    }

    pub fn miss(&self) -> Option<&ResolutionMiss> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Miss(miss) => Some(miss),
        }
    }
}

/// Everything resolution depends on.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    pub providers: &'a [Provider],
    pub environment: Environment,
    pub selected_id: Option<&'a str>,
    pub dev_overrides: DevOverrides<'a>,
    pub explicit_override: Option<&'a str>,
}

/// Resolve the single authoritative endpoint.
pub fn resolve_endpoint(request: &ResolutionRequest<'_>) -> Resolution {
    if let Some(url) = non_empty(request.explicit_override) {
        return Resolution::Resolved(ResolvedEndpoint {
            endpoint: ProviderEndpoint::self_referential(url),
            origin: EndpointOrigin::ExplicitOverride,
        });
    }

    if let Some(resolved) = development_override(request.environment, &request.dev_overrides) {
        return Resolution::Resolved(resolved);
    }

    let provider = match select_provider(request.providers, request.selected_id) {
        Ok(provider) => provider,
        Err(miss) => return Resolution::Miss(miss),
    };

    if !provider.is_enabled() {
        return Resolution::Miss(ResolutionMiss::ProviderDisabled {
            identifier: provider.identifier().to_string(),
        });
    }

    Resolution::Resolved(environment_endpoint(provider, request.environment))
}

/// Endpoint a given provider maps to in `environment`, ignoring selection and
/// the enabled flag. Development overrides still win.
pub fn endpoint_for_provider(
    provider: &Provider,
    environment: Environment,
    dev_overrides: &DevOverrides<'_>,
) -> ResolvedEndpoint {
    development_override(environment, dev_overrides)
        .unwrap_or_else(|| environment_endpoint(provider, environment))
}

fn development_override(
    environment: Environment,
    dev_overrides: &DevOverrides<'_>,
) -> Option<ResolvedEndpoint> {
    dev_overrides.pick(environment).map(|(url, source)| ResolvedEndpoint {
        endpoint: ProviderEndpoint::self_referential(url),
        origin: EndpointOrigin::DevelopmentOverride(source),
    })
}

fn environment_endpoint(provider: &Provider, environment: Environment) -> ResolvedEndpoint {
    let identifier = provider.identifier().to_string();
    match (environment, provider.staging_endpoint()) {
        (Environment::Staging, Some(staging)) => ResolvedEndpoint {
            endpoint: staging.clone(),
            origin: EndpointOrigin::Staging { provider: identifier },
        },
        _ => ResolvedEndpoint {
            endpoint: provider.production_endpoint().clone(),
            origin: EndpointOrigin::Production { provider: identifier },
        },
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|url| !url.trim().is_empty())
}
