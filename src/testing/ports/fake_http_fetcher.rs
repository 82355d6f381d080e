use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::HttpFetcher;

/// Fetcher serving canned bodies per URL and recording every request.
///
/// Clones share responses and the request log.
#[derive(Debug, Clone, Default)]
pub struct FakeHttpFetcher {
    responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeHttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, body: &str) -> Self {
        self.set_response(url, Ok(body.to_string()));
        self
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.set_response(url, Err(message.to_string()));
        self
    }

    pub fn set_response(&self, url: &str, response: Result<String, String>) {
        self.responses.lock().unwrap().insert(url.to_string(), response);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpFetcher for FakeHttpFetcher {
    fn get(&self, url: &str) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.lock().unwrap().get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(AppError::Http(message.clone())),
            None => Err(AppError::Http(format!("no canned response for {url}"))),
        }
    }
}
