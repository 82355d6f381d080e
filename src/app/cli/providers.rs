use crate::app::cli::FileClient;
use crate::domain::{AppError, Resolution};

pub(super) fn run_list(client: &FileClient<'_>, json: bool) -> Result<i32, AppError> {
    let choices = client.provider_choices()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&choices)?);
        return Ok(0);
    }

    if choices.is_empty() {
        eprintln!("No providers available");
        return Ok(1);
    }

    for choice in &choices {
        let marker = if choice.selected { "*" } else { " " };
        let status = if choice.enabled { "" } else { " (disabled)" };
        println!("{} {}  {}{}", marker, choice.identifier, choice.display_text, status);
    }
    Ok(0)
}

pub(super) fn run_resolve(
    client: &FileClient<'_>,
    override_url: Option<String>,
) -> Result<i32, AppError> {
    let resolution = client.resolve_with_override(override_url.as_deref())?;
    if let Resolution::Miss(miss) = &resolution {
        eprintln!("No update endpoint: {}", miss);
        return Ok(1);
    }

    if let Some(url) = client.filtered_url(&resolution) {
        println!("{}", url);
    }
    Ok(0)
}

pub(super) fn run_select(client: &FileClient<'_>, identifier: &str) -> Result<i32, AppError> {
    if client.set_selected_provider(identifier)? {
        println!("✅ Selected provider '{}'", identifier);
        Ok(0)
    } else {
        eprintln!("Provider '{}' is not in the current providers list", identifier);
        Ok(1)
    }
}
