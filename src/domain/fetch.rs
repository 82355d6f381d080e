//! Outcomes of a providers list refresh.

use thiserror::Error;

/// Why a fetched providers document was not accepted.
///
/// These never propagate as errors: the previous cache stays authoritative and
/// the next scheduled run or empty-cache access tries again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response body is not a JSON object")]
    NotAMapping,

    #[error("response contains no valid providers ({skipped} entries skipped)")]
    NoValidProviders { skipped: usize },
}

/// Result of running a refresh against a provider source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cache was replaced with a freshly fetched list.
    Updated { providers: usize, skipped: usize },
    /// The fetch failed; the cache was left untouched.
    Rejected(FetchFailure),
    /// The source is a fixed in-process list and has nothing to refresh.
    Static,
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }
}
