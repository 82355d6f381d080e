//! Where the provider list comes from.
//!
//! A client is built with exactly one source. Both variants answer the same
//! two questions: which providers are available now, and how to refresh them.

use tracing::{debug, info, warn};
use url::Url;

use crate::app::options::ItemOptions;
use crate::domain::option_keys::PROVIDERS_URL_ENV;
use crate::domain::wire::{
    decode_providers_body, decode_providers_document, encode_providers_document,
};
use crate::domain::{
    AppError, DecodedProviders, DevOverrides, FetchFailure, OptionKeys, Provider, ProviderList,
    RefreshOutcome, SourceConfig,
};
use crate::ports::{EnvironmentSource, HttpFetcher, OptionStore};

/// Provider list source, selected at construction.
#[derive(Debug, Clone)]
pub enum ProviderSource {
    Static(StaticProviderSource),
    Remote(RemoteProviderSource),
}

impl ProviderSource {
    /// Build a static source, validating the list immediately.
    pub fn fixed(providers: Vec<Provider>) -> Result<Self, AppError> {
        Ok(ProviderSource::Static(StaticProviderSource::new(providers)?))
    }

    /// Build a remote source fetching from `url` by default.
    pub fn remote(url: Url) -> Self {
        ProviderSource::Remote(RemoteProviderSource::new(url))
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, AppError> {
        match config {
            SourceConfig::Remote { url } => Ok(Self::remote(url.clone())),
            SourceConfig::Static { .. } => {
                let providers = config.static_providers()?;
                Ok(ProviderSource::Static(StaticProviderSource::from_list(providers)))
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ProviderSource::Remote(_))
    }

    /// Current provider list. A remote source with an empty cache fetches
    /// synchronously first; `None` means no list is available.
    pub fn providers<S, H, E>(
        &self,
        store: &S,
        http: &H,
        environment: &E,
        keys: &OptionKeys,
    ) -> Result<Option<ProviderList>, AppError>
    where
        S: OptionStore,
        H: HttpFetcher,
        E: EnvironmentSource,
    {
        match self {
            ProviderSource::Static(source) => Ok(Some(source.providers().clone())),
            ProviderSource::Remote(source) => source.providers(store, http, environment, keys),
        }
    }

    /// Re-fetch the list. Static sources have nothing to do.
    pub fn refresh<S, H, E>(
        &self,
        store: &S,
        http: &H,
        environment: &E,
        keys: &OptionKeys,
    ) -> Result<RefreshOutcome, AppError>
    where
        S: OptionStore,
        H: HttpFetcher,
        E: EnvironmentSource,
    {
        match self {
            ProviderSource::Static(_) => Ok(RefreshOutcome::Static),
            ProviderSource::Remote(source) => source.refresh(store, http, environment, keys),
        }
    }

    /// Drop any cached list so the next access fetches again.
    pub fn invalidate<S: OptionStore>(&self, store: &S, keys: &OptionKeys) -> Result<(), AppError> {
        match self {
            ProviderSource::Static(_) => Ok(()),
            ProviderSource::Remote(source) => source.invalidate(store, keys),
        }
    }
}

/// Fixed, caller-constructed provider list.
#[derive(Debug, Clone)]
pub struct StaticProviderSource {
    providers: ProviderList,
}

impl StaticProviderSource {
    /// Fails fast on an empty list, a malformed provider, or a repeated identifier.
    pub fn new(providers: Vec<Provider>) -> Result<Self, AppError> {
        Ok(Self::from_list(ProviderList::new(providers)?))
    }

    pub fn from_list(providers: ProviderList) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &ProviderList {
        &self.providers
    }
}

/// State of the locally cached remote list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing cached, or the cache was invalidated.
    Uninitialized,
    Cached(ProviderList),
}

/// Provider list fetched from a remote JSON document and cached in the option store.
#[derive(Debug, Clone)]
pub struct RemoteProviderSource {
    default_url: Url,
}

impl RemoteProviderSource {
    pub fn new(default_url: Url) -> Self {
        Self { default_url }
    }

    pub fn default_url(&self) -> &Url {
        &self.default_url
    }

    /// URL the list is fetched from: in development the persisted override,
    /// then the environment override, then the configured default.
    pub fn providers_url<S, E>(
        &self,
        store: &S,
        environment: &E,
        keys: &OptionKeys,
    ) -> Result<String, AppError>
    where
        S: OptionStore,
        E: EnvironmentSource,
    {
        let persisted = ItemOptions::new(store, keys).providers_url_override()?;
        let from_env = environment.env_var(PROVIDERS_URL_ENV);
        let overrides = DevOverrides::new(persisted.as_deref(), from_env.as_deref());

        Ok(match overrides.pick(environment.environment()) {
            Some((url, source)) => {
                debug!(url, ?source, "Using providers list URL override");
                url.to_string()
            }
            None => self.default_url.to_string(),
        })
    }

    pub fn cache_state<S: OptionStore>(
        &self,
        store: &S,
        keys: &OptionKeys,
    ) -> Result<CacheState, AppError> {
        let Some(document) = ItemOptions::new(store, keys).cached_providers()? else {
            return Ok(CacheState::Uninitialized);
        };
        match decode_providers_document(&document) {
            Ok(decoded) => Ok(CacheState::Cached(decoded.providers)),
            Err(failure) => {
                warn!(
                    key = keys.providers_cache(),
                    error = %failure,
                    "Cached providers list is unusable"
                );
                Ok(CacheState::Uninitialized)
            }
        }
    }

    pub fn providers<S, H, E>(
        &self,
        store: &S,
        http: &H,
        environment: &E,
        keys: &OptionKeys,
    ) -> Result<Option<ProviderList>, AppError>
    where
        S: OptionStore,
        H: HttpFetcher,
        E: EnvironmentSource,
    {
        match self.cache_state(store, keys)? {
            CacheState::Cached(providers) => Ok(Some(providers)),
            CacheState::Uninitialized => {
                Ok(self.fetch_and_store(store, http, environment, keys)?.ok().map(|d| d.providers))
            }
        }
    }

    /// Fetch, validate and cache the list. A rejected document leaves the
    /// previous cache untouched.
    pub fn refresh<S, H, E>(
        &self,
        store: &S,
        http: &H,
        environment: &E,
        keys: &OptionKeys,
    ) -> Result<RefreshOutcome, AppError>
    where
        S: OptionStore,
        H: HttpFetcher,
        E: EnvironmentSource,
    {
        Ok(match self.fetch_and_store(store, http, environment, keys)? {
            Ok(decoded) => RefreshOutcome::Updated {
                providers: decoded.providers.len(),
                skipped: decoded.skipped.len(),
            },
            Err(failure) => RefreshOutcome::Rejected(failure),
        })
    }

    pub fn invalidate<S: OptionStore>(&self, store: &S, keys: &OptionKeys) -> Result<(), AppError> {
        info!(key = keys.providers_cache(), "Invalidating cached providers list");
        ItemOptions::new(store, keys).clear_cached_providers()
    }

    fn fetch_and_store<S, H, E>(
        &self,
        store: &S,
        http: &H,
        environment: &E,
        keys: &OptionKeys,
    ) -> Result<Result<DecodedProviders, FetchFailure>, AppError>
    where
        S: OptionStore,
        H: HttpFetcher,
        E: EnvironmentSource,
    {
        let url = self.providers_url(store, environment, keys)?;

        let decoded = match http
            .get(&url)
            .map_err(|err| FetchFailure::Transport(err.to_string()))
            .and_then(|body| decode_providers_body(&body))
        {
            Ok(decoded) => decoded,
            Err(failure) => {
                warn!(url = %url, error = %failure, "Providers list fetch unsuccessful");
                return Ok(Err(failure));
            }
        };

        for skipped in &decoded.skipped {
            warn!(
                url = %url,
                provider = %skipped.identifier,
                reason = %skipped.reason,
                "Skipping malformed provider entry"
            );
        }
        for identifier in &decoded.dropped_staging {
            warn!(url = %url, provider = %identifier, "Ignoring malformed staging endpoint");
        }

        ItemOptions::new(store, keys)
            .replace_cached_providers(encode_providers_document(&decoded.providers))?;
        info!(
            url = %url,
            providers = decoded.providers.len(),
            skipped = decoded.skipped.len(),
            "Providers list updated"
        );
        Ok(Ok(decoded))
    }
}
