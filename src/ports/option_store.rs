//! Durable key-value option storage port.

use serde_json::Value;

use crate::domain::AppError;

/// Port for reading and writing named options.
///
/// Values are JSON so that scalars (selected provider, override URLs) and the
/// cached providers document share one store. Writes replace the whole value;
/// concurrent writers resolve as last write wins.
pub trait OptionStore {
    /// Read an option, `None` when it was never set or has been deleted.
    fn get(&self, key: &str) -> Result<Option<Value>, AppError>;

    /// Create or replace an option.
    fn set(&self, key: &str, value: Value) -> Result<(), AppError>;

    /// Remove an option. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), AppError>;

    /// Read an option as a non-empty string.
    fn get_string(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .get(key)?
            .and_then(|value| value.as_str().map(str::to_string))
            .filter(|value| !value.is_empty()))
    }
}

impl<T: OptionStore + ?Sized> OptionStore for &T {
    fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), AppError> {
        (**self).delete(key)
    }
}
