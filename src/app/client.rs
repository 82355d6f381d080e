//! Per-item facade over provider sources, selection and endpoint resolution.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::app::context::AppContext;
use crate::app::endpoint_filters::{EndpointFilters, FilterContext};
use crate::app::options::ItemOptions;
use crate::app::provider_source::ProviderSource;
use crate::app::refresh_schedule::RefreshSchedule;
use crate::domain::option_keys::UPDATE_URL_ENV;
use crate::domain::schedule::{DEFAULT_REFRESH_HOUR, REFERENCE_TIMEZONE};
use crate::domain::{
    AppError, ClientConfig, DevOverrides, Environment, ItemId, OptionKeys, Provider,
    ProviderEndpoint, ProviderList, RefreshOutcome, Resolution, ResolutionRequest, UpdateApiError,
    endpoint_for_provider, is_selectable, resolve_endpoint, resolve_selected_provider,
};
use crate::ports::{EnvironmentSource, HttpFetcher, OptionStore, Scheduler};

/// One row of a provider picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderChoice {
    pub identifier: String,
    pub display_text: String,
    pub selected: bool,
    pub enabled: bool,
}

/// Update-endpoint client for one hosting item.
///
/// All state lives in the option store of the [`AppContext`]; the client
/// itself only holds configuration, so several clients for different items
/// can share one store.
pub struct Client<S, H, E, K>
where
    S: OptionStore,
    H: HttpFetcher,
    E: EnvironmentSource,
    K: Scheduler,
{
    item_id: ItemId,
    keys: OptionKeys,
    source: ProviderSource,
    schedule: RefreshSchedule,
    filters: EndpointFilters,
    ctx: AppContext<S, H, E, K>,
}

impl<S, H, E, K> Client<S, H, E, K>
where
    S: OptionStore,
    H: HttpFetcher,
    E: EnvironmentSource,
    K: Scheduler,
{
    pub fn new(item_id: ItemId, source: ProviderSource, ctx: AppContext<S, H, E, K>) -> Self {
        let keys = OptionKeys::for_item(&item_id);
        let schedule =
            RefreshSchedule::new(keys.refresh_event(), DEFAULT_REFRESH_HOUR, REFERENCE_TIMEZONE);
        Self { item_id, keys, source, schedule, filters: EndpointFilters::new(), ctx }
    }

    pub fn from_config(
        config: &ClientConfig,
        ctx: AppContext<S, H, E, K>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let source = ProviderSource::from_config(&config.source)?;
        Ok(Self::new(config.item.unique_id.clone(), source, ctx)
            .with_refresh_time(config.refresh.hour, config.refresh.timezone()?))
    }

    /// Refresh at `hour:00` in `timezone` instead of the reference time.
    pub fn with_refresh_time(mut self, hour: u32, timezone: chrono_tz::Tz) -> Self {
        self.schedule = RefreshSchedule::new(self.keys.refresh_event(), hour, timezone);
        self
    }

    pub fn with_filters(mut self, filters: EndpointFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn filters_mut(&mut self) -> &mut EndpointFilters {
        &mut self.filters
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn keys(&self) -> &OptionKeys {
        &self.keys
    }

    pub fn source(&self) -> &ProviderSource {
        &self.source
    }

    pub fn schedule(&self) -> &RefreshSchedule {
        &self.schedule
    }

    pub fn context(&self) -> &AppContext<S, H, E, K> {
        &self.ctx
    }

    pub fn environment(&self) -> Environment {
        self.ctx.environment().environment()
    }

    /// Startup hook: make sure the refresh trigger and a provider list exist,
    /// then return the endpoint URL the update check should use.
    pub fn init(&self) -> Result<Option<String>, AppError> {
        self.init_at(Utc::now())
    }

    pub fn init_at(&self, now: DateTime<Utc>) -> Result<Option<String>, AppError> {
        self.init_with_override(now, None)
    }

    /// Like [`Client::init_at`], with a caller override that wins over every
    /// other endpoint source.
    pub fn init_with_override(
        &self,
        now: DateTime<Utc>,
        explicit_override: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        self.ensure_refresh_scheduled(now)?;
        self.providers()?;
        self.endpoint_url_with_override(explicit_override)
    }

    /// Current provider list, fetching it first when a remote cache is empty.
    pub fn providers(&self) -> Result<Option<ProviderList>, AppError> {
        self.source.providers(self.ctx.store(), self.ctx.http(), self.ctx.environment(), &self.keys)
    }

    pub fn selected_provider(&self) -> Result<Option<Provider>, AppError> {
        let Some(providers) = self.providers()? else {
            return Ok(None);
        };
        let selected = self.options().selected_provider()?;
        Ok(resolve_selected_provider(providers.as_slice(), selected.as_deref()).cloned())
    }

    /// Persist `identifier` as the selected provider. Unknown identifiers
    /// are ignored and `false` is returned.
    pub fn set_selected_provider(&self, identifier: &str) -> Result<bool, AppError> {
        let known = match self.providers()? {
            Some(providers) => is_selectable(providers.as_slice(), identifier),
            None => false,
        };
        if !known {
            debug!(item = %self.item_id, provider = identifier, "Ignoring unknown provider");
            return Ok(false);
        }
        self.options().persist_selected_provider(identifier)?;
        info!(item = %self.item_id, provider = identifier, "Selected provider");
        Ok(true)
    }

    pub fn resolve(&self) -> Result<Resolution, AppError> {
        self.resolve_with_override(None)
    }

    /// Resolve the endpoint; a non-empty `explicit_override` wins over everything.
    pub fn resolve_with_override(
        &self,
        explicit_override: Option<&str>,
    ) -> Result<Resolution, AppError> {
        let environment = self.environment();
        let (persisted, from_env) = self.update_overrides()?;
        let dev_overrides = DevOverrides::new(persisted.as_deref(), from_env.as_deref());

        let overridden = explicit_override.is_some_and(|url| !url.trim().is_empty())
            || dev_overrides.pick(environment).is_some();
        let providers = if overridden { None } else { self.providers()? };
        let selected = self.options().selected_provider()?;

        let resolution = resolve_endpoint(&ResolutionRequest {
            providers: providers.as_ref().map(ProviderList::as_slice).unwrap_or_default(),
            environment,
            selected_id: selected.as_deref(),
            dev_overrides,
            explicit_override,
        });

        match &resolution {
            Resolution::Resolved(resolved) => debug!(
                item = %self.item_id,
                url = resolved.api_url(),
                origin = ?resolved.origin,
                "Resolved endpoint"
            ),
            Resolution::Miss(miss) => {
                debug!(item = %self.item_id, reason = %miss, "No endpoint resolved");
            }
        }
        Ok(resolution)
    }

    /// Final URL handed to the update check, after endpoint filters.
    pub fn endpoint_url(&self) -> Result<Option<String>, AppError> {
        self.endpoint_url_with_override(None)
    }

    pub fn endpoint_url_with_override(
        &self,
        explicit_override: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        let resolution = self.resolve_with_override(explicit_override)?;
        Ok(self.filtered_url(&resolution))
    }

    /// Run the endpoint filters over a resolved URL.
    pub fn filtered_url(&self, resolution: &Resolution) -> Option<String> {
        resolution.resolved().map(|resolved| {
            let context = FilterContext {
                item_unique_id: self.item_id.as_str(),
                environment: self.environment(),
                origin: &resolved.origin,
            };
            self.filters.apply(resolved.api_url(), &context)
        })
    }

    /// Endpoint `identifier` maps to in the current environment, whether or
    /// not it is selected or enabled.
    pub fn provider_endpoint(
        &self,
        identifier: &str,
    ) -> Result<Option<ProviderEndpoint>, AppError> {
        let Some(providers) = self.providers()? else {
            return Ok(None);
        };
        let Some(provider) = providers.get(identifier) else {
            return Ok(None);
        };
        let (persisted, from_env) = self.update_overrides()?;
        let overrides = DevOverrides::new(persisted.as_deref(), from_env.as_deref());
        Ok(Some(endpoint_for_provider(provider, self.environment(), &overrides).endpoint))
    }

    /// Rows for a provider picker, in list order.
    pub fn provider_choices(&self) -> Result<Vec<ProviderChoice>, AppError> {
        let Some(providers) = self.providers()? else {
            return Ok(Vec::new());
        };
        let selected = self.options().selected_provider()?;
        let selected = resolve_selected_provider(providers.as_slice(), selected.as_deref())
            .map(Provider::identifier);
        let environment = self.environment();
        let (persisted, from_env) = self.update_overrides()?;
        let overrides = DevOverrides::new(persisted.as_deref(), from_env.as_deref());

        Ok(providers
            .iter()
            .map(|provider| {
                let endpoint = endpoint_for_provider(provider, environment, &overrides).endpoint;
                ProviderChoice {
                    identifier: provider.identifier().to_string(),
                    display_text: endpoint.display_text().to_string(),
                    selected: selected == Some(provider.identifier()),
                    enabled: provider.is_enabled(),
                }
            })
            .collect())
    }

    pub fn update_url_override(&self) -> Result<Option<String>, AppError> {
        self.options().update_url_override()
    }

    /// Store or clear (`None` or blank) the development update URL override.
    pub fn set_update_url_override(&self, url: Option<&str>) -> Result<(), AppError> {
        self.options().set_update_url_override(url)
    }

    pub fn providers_url_override(&self) -> Result<Option<String>, AppError> {
        self.options().providers_url_override()
    }

    /// Store or clear the development providers-list URL override. A changed
    /// value invalidates the cached list.
    pub fn set_providers_url_override(&self, url: Option<&str>) -> Result<(), AppError> {
        let next = url.map(str::trim).filter(|url| !url.is_empty());
        let previous = self.options().providers_url_override()?;
        self.options().set_providers_url_override(next)?;
        if previous.as_deref() != next {
            self.invalidate_providers()?;
        }
        Ok(())
    }

    /// URL the remote list is fetched from, `None` for static sources.
    pub fn providers_url(&self) -> Result<Option<String>, AppError> {
        match &self.source {
            ProviderSource::Remote(remote) => Ok(Some(remote.providers_url(
                self.ctx.store(),
                self.ctx.environment(),
                &self.keys,
            )?)),
            ProviderSource::Static(_) => Ok(None),
        }
    }

    pub fn refresh_providers(&self) -> Result<RefreshOutcome, AppError> {
        self.source.refresh(self.ctx.store(), self.ctx.http(), self.ctx.environment(), &self.keys)
    }

    pub fn invalidate_providers(&self) -> Result<(), AppError> {
        self.source.invalidate(self.ctx.store(), &self.keys)
    }

    pub fn refresh_event(&self) -> &str {
        self.schedule.event()
    }

    /// Register the daily refresh for remote sources. Returns whether a new
    /// trigger was registered.
    pub fn ensure_refresh_scheduled(&self, now: DateTime<Utc>) -> Result<bool, AppError> {
        if !self.source.is_remote() {
            return Ok(false);
        }
        self.schedule.ensure_scheduled(self.ctx.scheduler(), now)
    }

    /// Trigger dispatch: refresh when `event` is this client's refresh event.
    pub fn handle_scheduled_event(&self, event: &str) -> Result<Option<RefreshOutcome>, AppError> {
        if event != self.schedule.event() {
            return Ok(None);
        }
        self.refresh_providers().map(Some)
    }

    /// Deregister the daily refresh. Called by the host on permanent removal.
    pub fn teardown(&self) -> Result<(), AppError> {
        self.schedule.teardown(self.ctx.scheduler())
    }

    /// Error message the update server reported for this item, if `body` is one.
    pub fn api_error(&self, body: &str) -> Option<UpdateApiError> {
        UpdateApiError::from_response_body(body, self.item_id.as_str())
    }

    fn options(&self) -> ItemOptions<'_, S> {
        ItemOptions::new(self.ctx.store(), &self.keys)
    }

    /// Persisted and environment update URL overrides, in that order.
    fn update_overrides(&self) -> Result<(Option<String>, Option<String>), AppError> {
        Ok((self.options().update_url_override()?, self.ctx.environment().env_var(UPDATE_URL_ENV)))
    }
}
