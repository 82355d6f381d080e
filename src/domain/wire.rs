//! Providers list wire format.
//!
//! A providers document is a JSON object keyed by provider identifier:
//!
//! ```json
//! {
//!   "acme": {
//!     "productionEndpoint": { "siteUrl": "https://a.example", "apiUrl": "https://a.example/api" },
//!     "stagingEndpoint": { "siteUrl": "https://stg.a.example", "apiUrl": "https://stg.a.example/api" },
//!     "enabled": true
//!   }
//! }
//! ```
//!
//! Endpoint fields are also accepted in the legacy lowercase spelling
//! (`siteurl`, `apiurl`, `displaytext`). Malformed entries are skipped one by
//! one; a document that leaves no valid provider is rejected as a whole.

use serde_json::{Map, Value, json};

use crate::domain::{FetchFailure, Provider, ProviderEndpoint, ProviderList};

const PRODUCTION_ENDPOINT: &str = "productionEndpoint";
const STAGING_ENDPOINT: &str = "stagingEndpoint";
const ENABLED: &str = "enabled";

const SITE_URL: [&str; 2] = ["siteUrl", "siteurl"];
const API_URL: [&str; 2] = ["apiUrl", "apiurl"];
const DISPLAY_TEXT: [&str; 2] = ["displayText", "displaytext"];

/// An entry that was dropped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub identifier: String,
    pub reason: String,
}

/// Providers decoded from a document, plus what was discarded on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedProviders {
    pub providers: ProviderList,
    pub skipped: Vec<SkippedEntry>,
    /// Providers kept without their staging endpoint because it was malformed.
    pub dropped_staging: Vec<String>,
}

/// Decode a raw HTTP response body.
pub fn decode_providers_body(body: &str) -> Result<DecodedProviders, FetchFailure> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| FetchFailure::InvalidJson(err.to_string()))?;
    decode_providers_document(&value)
}

/// Decode an already parsed document.
pub fn decode_providers_document(document: &Value) -> Result<DecodedProviders, FetchFailure> {
    let entries = document.as_object().ok_or(FetchFailure::NotAMapping)?;

    let mut providers = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    let mut dropped_staging = Vec::new();

    for (identifier, entry) in entries {
        match decode_entry(identifier, entry) {
            Ok((provider, staging_dropped)) => {
                if staging_dropped {
                    dropped_staging.push(identifier.clone());
                }
                providers.push(provider);
            }
            Err(reason) => skipped.push(SkippedEntry { identifier: identifier.clone(), reason }),
        }
    }

    if providers.is_empty() {
        return Err(FetchFailure::NoValidProviders { skipped: skipped.len() });
    }

    // Object keys are unique and every entry was validated above.
    let providers = ProviderList::new(providers)
        .map_err(|_| FetchFailure::NoValidProviders { skipped: skipped.len() })?;

    Ok(DecodedProviders { providers, skipped, dropped_staging })
}

/// Encode a provider list in the normalized wire form used for the cache.
pub fn encode_providers_document(providers: &ProviderList) -> Value {
    let mut document = Map::with_capacity(providers.len());
    for provider in providers {
        let mut entry = Map::new();
        entry.insert(
            PRODUCTION_ENDPOINT.to_string(),
            encode_endpoint(provider.production_endpoint()),
        );
        if let Some(staging) = provider.staging_endpoint() {
            entry.insert(STAGING_ENDPOINT.to_string(), encode_endpoint(staging));
        }
        entry.insert(ENABLED.to_string(), Value::Bool(provider.is_enabled()));
        document.insert(provider.identifier().to_string(), Value::Object(entry));
    }
    Value::Object(document)
}

fn encode_endpoint(endpoint: &ProviderEndpoint) -> Value {
    json!({
        "siteUrl": endpoint.site_url(),
        "apiUrl": endpoint.api_url(),
        "displayText": endpoint.display_text(),
    })
}

fn decode_entry(identifier: &str, entry: &Value) -> Result<(Provider, bool), String> {
    if identifier.trim().is_empty() {
        return Err("identifier must not be empty".to_string());
    }
    let entry = entry.as_object().ok_or_else(|| "entry is not an object".to_string())?;

    let production = entry
        .get(PRODUCTION_ENDPOINT)
        .ok_or_else(|| format!("missing {PRODUCTION_ENDPOINT}"))
        .and_then(decode_endpoint)
        .map_err(|reason| format!("{PRODUCTION_ENDPOINT}: {reason}"))?;

    let (staging, staging_dropped) = match entry.get(STAGING_ENDPOINT) {
        None | Some(Value::Null) => (None, false),
        Some(value) => match decode_endpoint(value) {
            Ok(endpoint) => (Some(endpoint), false),
            Err(_) => (None, true),
        },
    };

    let enabled = match entry.get(ENABLED) {
        None | Some(Value::Null) => true,
        Some(Value::Bool(enabled)) => *enabled,
        Some(_) => return Err(format!("{ENABLED} must be a boolean")),
    };

    let provider = Provider::new(identifier, production, staging);
    let provider = if enabled { provider } else { provider.disabled() };
    Ok((provider, staging_dropped))
}

fn decode_endpoint(value: &Value) -> Result<ProviderEndpoint, String> {
    let fields = value.as_object().ok_or_else(|| "endpoint is not an object".to_string())?;

    let site_url =
        non_empty_field(fields, &SITE_URL).ok_or("siteUrl must be a non-empty string")?;
    let api_url =
        non_empty_field(fields, &API_URL).ok_or("apiUrl must be a non-empty string")?;
    let display_text = non_empty_field(fields, &DISPLAY_TEXT).map(str::to_string);

    Ok(ProviderEndpoint::new(site_url, api_url, display_text))
}

fn non_empty_field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| fields.get(*name).and_then(Value::as_str))
        .find(|value| !value.trim().is_empty())
}
