//! Shared testing utilities for cptmc integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use cptm_client::{AppError, Environment, EnvironmentSource, HttpFetcher};
use tempfile::TempDir;

pub const ITEM_ID: &str = "wcex-points";

pub const TWO_PROVIDERS: &str = r#"{
    "acme": {
        "productionEndpoint": {"siteUrl": "https://a.example", "apiUrl": "https://a.example/api"},
        "stagingEndpoint": {"siteUrl": "https://stg.a.example", "apiUrl": "https://stg.a.example/api"}
    },
    "globex": {
        "productionEndpoint": {"siteUrl": "https://g.example", "apiUrl": "https://g.example/api"}
    }
}"#;

/// Isolated directory holding a config file and an options file.
pub struct TestContext {
    root: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("cptmc.toml")
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.path().join("state").join("options.json")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Config with a remote source pointing at `url`.
    pub fn write_remote_config(&self, url: &str) {
        self.write_config(&format!(
            "[item]\nunique_id = \"{ITEM_ID}\"\n\n[source]\nkind = \"remote\"\nurl = \"{url}\"\n\n[http]\ntimeout_secs = 5\n"
        ));
    }

    /// Config with a static source holding a single provider.
    pub fn write_single_static_config(&self) {
        self.write_config(&format!(
            r#"[item]
unique_id = "{ITEM_ID}"

[source]
kind = "static"

[[source.providers]]
identifier = "acme"
production = {{ site_url = "https://a.example", api_url = "https://a.example/api" }}
staging = {{ site_url = "https://stg.a.example", api_url = "https://stg.a.example/api" }}
"#
        ));
    }

    /// Parsed contents of the options file.
    pub fn options(&self) -> serde_json::Value {
        let data = fs::read_to_string(self.store_path()).expect("Failed to read options file");
        serde_json::from_str(&data).expect("Options file is not JSON")
    }

    /// `cptmc` invocation bound to this context's files.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("cptmc").expect("Failed to locate cptmc binary");
        cmd.current_dir(self.root())
            .arg("--config")
            .arg(self.config_path())
            .arg("--store")
            .arg(self.store_path())
            .env_remove("CPTMC_ENVIRONMENT")
            .env_remove("CPTM_CLIENT_UPDATE_URL")
            .env_remove("CPTM_CLIENT_PROVIDERS_URL")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Fixed environment with optional variables.
#[derive(Debug, Clone, Default)]
pub struct StubEnvironment {
    pub environment: Environment,
    pub vars: HashMap<String, String>,
}

impl StubEnvironment {
    pub fn new(environment: Environment) -> Self {
        Self { environment, vars: HashMap::new() }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvironmentSource for StubEnvironment {
    fn environment(&self) -> Environment {
        self.environment
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Fetcher returning whatever body is currently configured; clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttp {
    body: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedHttp {
    pub fn serving(body: &str) -> Self {
        let http = Self::default();
        http.serve(body);
        http
    }

    pub fn serve(&self, body: &str) {
        *self.body.lock().unwrap() = Some(body.to_string());
    }

    pub fn go_offline(&self) {
        *self.body.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl HttpFetcher for ScriptedHttp {
    fn get(&self, url: &str) -> Result<String, AppError> {
        *self.calls.lock().unwrap() += 1;
        self.body
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::Http(format!("connection refused: {url}")))
    }
}
