//! Environment source backed by process environment variables.

use tracing::warn;

use crate::domain::{Environment, EnvironmentConfig};
use crate::ports::EnvironmentSource;

/// Reads the deployment environment from a configurable process variable.
///
/// Unset means production; unrecognized values are logged and also treated as
/// production, so a typo never enables development overrides.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
    variable: String,
}

impl ProcessEnvironment {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self { variable: config.variable.clone() }
    }
}

impl Default for ProcessEnvironment {
    fn default() -> Self {
        Self::new(&EnvironmentConfig::default())
    }
}

impl EnvironmentSource for ProcessEnvironment {
    fn environment(&self) -> Environment {
        match std::env::var(&self.variable) {
            Ok(value) if !value.trim().is_empty() => value.parse().unwrap_or_else(|err| {
                warn!(variable = %self.variable, error = %err, "Ignoring unknown environment");
                Environment::Production
            }),
            _ => Environment::Production,
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VAR: &str = "CPTMC_TEST_ENVIRONMENT";

    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: Option<&str>) -> Self {
            let original = std::env::var(key).ok();
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(original) => unsafe { std::env::set_var(self.key, original) },
                None => unsafe { std::env::remove_var(self.key) },
            }
        }
    }

    fn source() -> ProcessEnvironment {
        ProcessEnvironment::new(&EnvironmentConfig { variable: VAR.to_string() })
    }

    #[test]
    #[serial]
    fn unset_variable_means_production() {
        let _guard = EnvGuard::set(VAR, None);
        assert_eq!(source().environment(), Environment::Production);
    }

    #[test]
    #[serial]
    fn reads_configured_variable() {
        let _guard = EnvGuard::set(VAR, Some("staging"));
        assert_eq!(source().environment(), Environment::Staging);
    }

    #[test]
    #[serial]
    fn unknown_value_falls_back_to_production() {
        let _guard = EnvGuard::set(VAR, Some("qa"));
        assert_eq!(source().environment(), Environment::Production);
    }

    #[test]
    #[serial]
    fn env_var_passes_through() {
        let _guard = EnvGuard::set("CPTMC_TEST_OVERRIDE", Some("http://localhost:8080"));
        assert_eq!(
            source().env_var("CPTMC_TEST_OVERRIDE").as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(source().env_var("CPTMC_TEST_UNSET_VALUE"), None);
    }
}
