pub mod ports;

#[allow(unused_imports)]
pub use ports::FakeEnvironment;
#[allow(unused_imports)]
pub use ports::FakeHttpFetcher;
