//! Blocking HTTP fetcher implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::domain::{AppError, HttpConfig};
use crate::ports::HttpFetcher;

/// HTTP fetcher backed by a blocking reqwest client.
///
/// Only the transport timeout applies; retries are left to the refresh schedule.
#[derive(Debug, Clone)]
pub struct ReqwestHttpFetcher {
    client: Client,
}

impl ReqwestHttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("cptmc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpFetcher for ReqwestHttpFetcher {
    fn get(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| AppError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let status = status.as_u16();
            return Err(AppError::Http(format!("unexpected status {status} from {url}")));
        }

        response.text().map_err(|e| AppError::Http(format!("Failed to read response: {}", e)))
    }
}
