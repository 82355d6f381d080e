mod environment_source;
mod http_fetcher;
mod option_store;
mod scheduler;

pub use environment_source::EnvironmentSource;
pub use http_fetcher::{HttpFetcher, NoopHttpFetcher};
pub use option_store::OptionStore;
pub use scheduler::{NoopScheduler, Scheduler};
