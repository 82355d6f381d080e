//! Typed access to the options one item owns.

use serde_json::Value;

use crate::domain::{AppError, OptionKeys};
use crate::ports::OptionStore;

/// View of an option store restricted to one item's keys.
pub struct ItemOptions<'a, S: OptionStore> {
    store: &'a S,
    keys: &'a OptionKeys,
}

impl<'a, S: OptionStore> ItemOptions<'a, S> {
    pub fn new(store: &'a S, keys: &'a OptionKeys) -> Self {
        Self { store, keys }
    }

    pub fn selected_provider(&self) -> Result<Option<String>, AppError> {
        self.store.get_string(self.keys.selected_provider())
    }

    pub fn persist_selected_provider(&self, identifier: &str) -> Result<(), AppError> {
        self.store.set(self.keys.selected_provider(), Value::String(identifier.to_string()))
    }

    pub fn update_url_override(&self) -> Result<Option<String>, AppError> {
        self.store.get_string(self.keys.update_url_override())
    }

    pub fn set_update_url_override(&self, url: Option<&str>) -> Result<(), AppError> {
        set_or_delete(self.store, self.keys.update_url_override(), url)
    }

    pub fn providers_url_override(&self) -> Result<Option<String>, AppError> {
        self.store.get_string(self.keys.providers_url_override())
    }

    pub fn set_providers_url_override(&self, url: Option<&str>) -> Result<(), AppError> {
        set_or_delete(self.store, self.keys.providers_url_override(), url)
    }

    pub fn cached_providers(&self) -> Result<Option<Value>, AppError> {
        self.store.get(self.keys.providers_cache())
    }

    pub fn replace_cached_providers(&self, document: Value) -> Result<(), AppError> {
        self.store.set(self.keys.providers_cache(), document)
    }

    pub fn clear_cached_providers(&self) -> Result<(), AppError> {
        self.store.delete(self.keys.providers_cache())
    }
}

fn set_or_delete<S: OptionStore>(
    store: &S,
    key: &str,
    value: Option<&str>,
) -> Result<(), AppError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => store.set(key, Value::String(value.to_string())),
        None => store.delete(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use crate::services::MemoryOptionStore;

    #[test]
    fn overrides_clear_on_empty() {
        let store = MemoryOptionStore::new();
        let keys = OptionKeys::for_item(&ItemId::new("demo").unwrap());
        let options = ItemOptions::new(&store, &keys);

        options.set_update_url_override(Some(" http://localhost:8080 ")).unwrap();
        assert_eq!(
            options.update_url_override().unwrap().as_deref(),
            Some("http://localhost:8080")
        );

        options.set_update_url_override(Some("")).unwrap();
        assert_eq!(options.update_url_override().unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn selection_round_trip() {
        let store = MemoryOptionStore::new();
        let keys = OptionKeys::for_item(&ItemId::new("demo").unwrap());
        let options = ItemOptions::new(&store, &keys);

        assert_eq!(options.selected_provider().unwrap(), None);
        options.persist_selected_provider("acme").unwrap();
        assert_eq!(options.selected_provider().unwrap().as_deref(), Some("acme"));
        assert_eq!(store.keys().unwrap(), vec!["cptmc_selected_provider_demo".to_string()]);
    }
}
