mod adapters;
mod http_fetcher_reqwest;
mod process_environment;

pub use adapters::json_file_option_store::{DEFAULT_STORE_PATH, JsonFileOptionStore};
pub use adapters::memory_option_store::MemoryOptionStore;
pub use adapters::stored_scheduler::{SCHEDULE_KEY, StoredScheduler};
pub use http_fetcher_reqwest::ReqwestHttpFetcher;
pub use process_environment::ProcessEnvironment;
