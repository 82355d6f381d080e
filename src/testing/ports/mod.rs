mod fake_environment;
mod fake_http_fetcher;

pub use self::fake_environment::FakeEnvironment;
pub use self::fake_http_fetcher::FakeHttpFetcher;
