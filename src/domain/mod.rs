pub mod api_error;
pub mod configuration;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod identifiers;
pub mod option_keys;
pub mod provider;
pub mod provider_list;
pub mod resolution;
pub mod schedule;
pub mod selection;
pub mod wire;

pub use api_error::UpdateApiError;
pub use configuration::{
    ClientConfig, EndpointConfig, EnvironmentConfig, HttpConfig, ItemConfig, ProviderConfig,
    RefreshConfig, SourceConfig,
};
pub use environment::Environment;
pub use error::AppError;
pub use fetch::{FetchFailure, RefreshOutcome};
pub use identifiers::ItemId;
pub use option_keys::OptionKeys;
pub use provider::{Provider, ProviderEndpoint};
pub use provider_list::ProviderList;
pub use resolution::{
    DevOverrides, EndpointOrigin, OverrideSource, Resolution, ResolutionMiss, ResolutionRequest,
    ResolvedEndpoint, endpoint_for_provider, resolve_endpoint,
};
pub use selection::{is_selectable, resolve_selected_provider, select_provider};
pub use wire::{DecodedProviders, SkippedEntry, decode_providers_body, decode_providers_document};
