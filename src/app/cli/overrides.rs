use clap::Subcommand;

use crate::app::cli::FileClient;
use crate::domain::AppError;

#[derive(Subcommand)]
pub(super) enum OverrideTarget {
    /// Update endpoint URL used in development
    Update {
        /// Override URL
        #[arg(required_unless_present = "clear")]
        url: Option<String>,
        /// Remove the override
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },
    /// Providers list URL used in development
    ProvidersUrl {
        /// Override URL
        #[arg(required_unless_present = "clear")]
        url: Option<String>,
        /// Remove the override
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },
}

pub(super) fn run_override(
    client: &FileClient<'_>,
    target: OverrideTarget,
) -> Result<(), AppError> {
    match target {
        OverrideTarget::Update { url, clear } => {
            let url = if clear { None } else { url };
            client.set_update_url_override(url.as_deref())?;
            report("update URL", url.as_deref());
        }
        OverrideTarget::ProvidersUrl { url, clear } => {
            let url = if clear { None } else { url };
            client.set_providers_url_override(url.as_deref())?;
            report("providers list URL", url.as_deref());
        }
    }

    if !client.environment().is_development() {
        eprintln!("Note: overrides only apply in the development environment");
    }
    Ok(())
}

fn report(label: &str, url: Option<&str>) {
    match url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => println!("✅ Set {} override to {}", label, url),
        None => println!("✅ Cleared {} override", label),
    }
}
