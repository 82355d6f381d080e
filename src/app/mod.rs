pub mod cli;
mod client;
mod context;
mod endpoint_filters;
mod options;
mod provider_source;
mod refresh_schedule;

pub use client::{Client, ProviderChoice};
pub use context::AppContext;
pub use endpoint_filters::{EndpointFilters, FilterContext};
pub use options::ItemOptions;
pub use provider_source::{
    CacheState, ProviderSource, RemoteProviderSource, StaticProviderSource,
};
pub use refresh_schedule::RefreshSchedule;
