pub mod client_config;
pub mod loader;

pub use client_config::{
    ClientConfig, DEFAULT_ENVIRONMENT_VARIABLE, EndpointConfig, EnvironmentConfig, HttpConfig,
    ItemConfig, ProviderConfig, RefreshConfig, SourceConfig,
};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
