//! Error payloads returned by the update server.

use serde::Deserialize;
use serde_json::Value;

/// Value of `type` marking an error produced by the update server itself.
pub const API_ERROR_TYPE: &str = "WCEXCPTM_API_ERROR";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    cpt_item: Option<ErrorItem>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorItem {
    #[serde(default)]
    item_unique_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// A failure the update server reported for a specific item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateApiError {
    pub code: Option<String>,
    pub message: String,
}

impl UpdateApiError {
    /// Decode an error response body addressed to `item_unique_id`.
    ///
    /// Returns `None` for anything else: bodies that are not JSON, errors of
    /// another type, or errors about a different item.
    pub fn from_response_body(body: &str, item_unique_id: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        if envelope.kind.as_deref() != Some(API_ERROR_TYPE) {
            return None;
        }
        let item = envelope.cpt_item?.item_unique_id?;
        if item != item_unique_id {
            return None;
        }
        let error = envelope.error?;
        let message = error.message.filter(|message| !message.is_empty())?;
        Some(Self { code: error.code.and_then(code_text), message })
    }
}

/// Servers send codes as strings or numbers; anything else is dropped.
fn code_text(code: Value) -> Option<String> {
    match code {
        Value::String(code) => Some(code),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
