//! Names of the persisted options and trigger owned by one item.

use crate::domain::ItemId;

pub const SELECTED_PROVIDER_KEY_PREFIX: &str = "cptmc_selected_provider_";
pub const DEV_URL_OVERRIDE_KEY_PREFIX: &str = "cptmc_dev_url_override_";
pub const PROVIDERS_KEY_PREFIX: &str = "cptmc_providers_";
pub const PROVIDERS_URL_OVERRIDE_KEY_PREFIX: &str = "cptmc_providers_url_override_";
pub const UPDATE_PROVIDERS_EVENT_PREFIX: &str = "cptmc_update_providers_";

/// Environment variable consulted for the update URL override in development.
pub const UPDATE_URL_ENV: &str = "CPTM_CLIENT_UPDATE_URL";
/// Environment variable consulted for the providers list URL override in development.
pub const PROVIDERS_URL_ENV: &str = "CPTM_CLIENT_PROVIDERS_URL";

/// Option keys namespaced by item unique id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionKeys {
    selected_provider: String,
    update_url_override: String,
    providers_cache: String,
    providers_url_override: String,
    refresh_event: String,
}

impl OptionKeys {
    pub fn for_item(item: &ItemId) -> Self {
        Self {
            selected_provider: format!("{SELECTED_PROVIDER_KEY_PREFIX}{item}"),
            update_url_override: format!("{DEV_URL_OVERRIDE_KEY_PREFIX}{item}"),
            providers_cache: format!("{PROVIDERS_KEY_PREFIX}{item}"),
            providers_url_override: format!("{PROVIDERS_URL_OVERRIDE_KEY_PREFIX}{item}"),
            refresh_event: format!("{UPDATE_PROVIDERS_EVENT_PREFIX}{item}"),
        }
    }

    pub fn selected_provider(&self) -> &str {
        &self.selected_provider
    }

    pub fn update_url_override(&self) -> &str {
        &self.update_url_override
    }

    pub fn providers_cache(&self) -> &str {
        &self.providers_cache
    }

    pub fn providers_url_override(&self) -> &str {
        &self.providers_url_override
    }

    pub fn refresh_event(&self) -> &str {
        &self.refresh_event
    }
}
