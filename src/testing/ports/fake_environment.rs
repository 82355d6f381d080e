use std::collections::HashMap;

use crate::domain::Environment;
use crate::ports::EnvironmentSource;

#[derive(Debug, Clone, Default)]
pub struct FakeEnvironment {
    environment: Environment,
    vars: HashMap<String, String>,
}

impl FakeEnvironment {
    pub fn new(environment: Environment) -> Self {
        Self { environment, vars: HashMap::new() }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvironmentSource for FakeEnvironment {
    fn environment(&self) -> Environment {
        self.environment
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
