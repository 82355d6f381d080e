//! cptm-client: resolve the update endpoint of a plugin or theme across
//! multiple providers, deployment environments and development overrides.
//!
//! A host builds one [`Client`] per item, injecting an option store, an HTTP
//! fetcher, an environment source and a scheduler through [`AppContext`].

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{
    AppContext, CacheState, Client, EndpointFilters, FilterContext, ProviderChoice,
    ProviderSource, RefreshSchedule,
};
pub use domain::configuration::{load_config, parse_config_content};
pub use domain::{
    AppError, ClientConfig, EndpointOrigin, Environment, FetchFailure, ItemId, OptionKeys,
    Provider, ProviderEndpoint, ProviderList, RefreshOutcome, Resolution, ResolutionMiss,
    ResolvedEndpoint, UpdateApiError,
};
pub use ports::{EnvironmentSource, HttpFetcher, OptionStore, Scheduler};
pub use services::{
    JsonFileOptionStore, MemoryOptionStore, ProcessEnvironment, ReqwestHttpFetcher,
    StoredScheduler,
};
