//! Deployment environment port.

use crate::domain::Environment;

/// Port reporting the current deployment environment and environment-level values.
pub trait EnvironmentSource {
    fn environment(&self) -> Environment;

    /// Value of an environment variable, `None` when unset.
    fn env_var(&self, name: &str) -> Option<String>;
}
