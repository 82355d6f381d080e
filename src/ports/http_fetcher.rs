//! HTTP fetch port.

use crate::domain::AppError;

/// Port for plain HTTP GET requests.
///
/// Any error is treated by callers as a fetch failure.
pub trait HttpFetcher {
    /// Fetch `url` and return the response body.
    fn get(&self, url: &str) -> Result<String, AppError>;
}

/// Fetcher for hosts that never fetch remotely, such as static provider lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpFetcher;

impl HttpFetcher for NoopHttpFetcher {
    fn get(&self, url: &str) -> Result<String, AppError> {
        Err(AppError::Http(format!("HTTP fetching is not available (requested {url})")))
    }
}
