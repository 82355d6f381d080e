//! Option store persisted as a single JSON document on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::AppError;
use crate::ports::OptionStore;

/// Default location of the options file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".cptmc/options.json";

/// Thread-safe option store backed by a JSON object file.
///
/// Reads and writes start from the document currently on disk, so separate
/// processes sharing the file keep each other's keys. Every write rewrites the
/// file through a temporary sibling and a rename, so readers never observe a
/// half-written document. There is no cross-process lock: two writers racing
/// between read and rename still resolve last-write-wins for the whole file.
#[derive(Debug)]
pub struct JsonFileOptionStore {
    path: PathBuf,
    options: Mutex<Map<String, Value>>,
}

impl JsonFileOptionStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// document is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let options = load_options(&path)?;
        Ok(Self { path, options: Mutex::new(options) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Map<String, Value>>, AppError> {
        self.options.lock().map_err(|_| AppError::Store("option store lock poisoned".to_string()))
    }

    /// Lock and replace the in-memory copy with the file's current contents.
    fn lock_fresh(&self) -> Result<MutexGuard<'_, Map<String, Value>>, AppError> {
        let mut options = self.lock()?;
        *options = load_options(&self.path)?;
        Ok(options)
    }

    fn save_locked(&self, options: &Map<String, Value>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(options)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl OptionStore for JsonFileOptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.lock_fresh()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), AppError> {
        let mut options = self.lock_fresh()?;
        options.insert(key.to_string(), value);
        self.save_locked(&options)
    }

    fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut options = self.lock_fresh()?;
        if options.remove(key).is_some() {
            self.save_locked(&options)?;
        }
        Ok(())
    }
}

fn load_options(path: &Path) -> Result<Map<String, Value>, AppError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<Value>(&data) {
            Ok(Value::Object(options)) => Ok(options),
            Ok(_) => {
                warn!(path = %path.display(), "Options file is not a JSON object; starting empty");
                Ok(Map::new())
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse options file; starting empty"
                );
                Ok(Map::new())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
        Err(error) => Err(AppError::Io(error)),
    }
}
