use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::AppError;
use crate::ports::OptionStore;

/// In-memory option store.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a client wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    options: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`.
    pub fn with_options<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let options = entries.into_iter().map(|(key, value)| (key.into(), value)).collect();
        Self { options: Arc::new(Mutex::new(options)) }
    }

    pub fn keys(&self) -> Result<Vec<String>, AppError> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Value>>, AppError> {
        self.options.lock().map_err(|_| AppError::Store("option store lock poisoned".to_string()))
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), AppError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), AppError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
