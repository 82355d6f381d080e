//! CLI Adapter.

mod overrides;
mod providers;
mod schedule;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::{AppContext, Client};
use crate::domain::configuration::{DEFAULT_CONFIG_FILE, load_config};
use crate::domain::AppError;
use crate::services::{
    DEFAULT_STORE_PATH, JsonFileOptionStore, ProcessEnvironment, ReqwestHttpFetcher,
    StoredScheduler,
};

/// Client wired to the on-disk option store and real collaborators.
pub(crate) type FileClient<'a> = Client<
    &'a JsonFileOptionStore,
    ReqwestHttpFetcher,
    ProcessEnvironment,
    StoredScheduler<&'a JsonFileOptionStore>,
>;

#[derive(Parser)]
#[command(name = "cptmc")]
#[command(version)]
#[command(
    about = "Resolve and manage the update endpoint of a plugin or theme",
    long_about = None
)]
struct Cli {
    /// Client configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Options file holding selection, overrides, cache and triggers
    #[arg(short, long, global = true, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available providers
    #[clap(visible_alias = "ls")]
    Providers {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the update endpoint URL
    #[clap(visible_alias = "r")]
    Resolve {
        /// Use this URL instead of resolving
        #[arg(long = "override", value_name = "URL")]
        override_url: Option<String>,
    },
    /// Select the provider used for updates
    Select {
        /// Provider identifier
        identifier: String,
    },
    /// Manage development override URLs
    Override {
        #[command(subcommand)]
        target: overrides::OverrideTarget,
    },
    /// Fetch the remote providers list now
    Refresh,
    /// Clear the cached providers list
    Invalidate,
    /// Register the daily refresh if missing and run due triggers
    Tick,
    /// Deregister the daily refresh
    Teardown,
}

/// Entry point for the CLI.
pub fn run() {
    init_tracing();
    let cli = Cli::parse();

    let result = execute(&cli.config, &cli.store, cli.command);

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn execute(config_path: &Path, store_path: &Path, command: Commands) -> Result<i32, AppError> {
    let config = load_config(config_path)?;
    let store = JsonFileOptionStore::open(store_path)?;
    let ctx = AppContext::new(
        &store,
        ReqwestHttpFetcher::new(&config.http)?,
        ProcessEnvironment::new(&config.environment),
        StoredScheduler::new(&store),
    );
    let client = Client::from_config(&config, ctx)?;

    match command {
        Commands::Providers { json } => providers::run_list(&client, json),
        Commands::Resolve { override_url } => providers::run_resolve(&client, override_url),
        Commands::Select { identifier } => providers::run_select(&client, &identifier),
        Commands::Override { target } => overrides::run_override(&client, target).map(|_| 0),
        Commands::Refresh => schedule::run_refresh(&client),
        Commands::Invalidate => schedule::run_invalidate(&client).map(|_| 0),
        Commands::Tick => schedule::run_tick(&client),
        Commands::Teardown => schedule::run_teardown(&client).map(|_| 0),
    }
}
