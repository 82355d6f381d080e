//! Which provider is authoritative for an item.

use crate::domain::{Provider, ResolutionMiss};

/// Pick the selected provider given the persisted selection.
///
/// - A single provider is auto-selected when nothing was ever chosen, but a
///   stale selection naming a vanished provider is not silently replaced.
/// - With several providers an explicit, still-present selection is required.
pub fn select_provider<'a>(
    providers: &'a [Provider],
    persisted_selection: Option<&str>,
) -> Result<&'a Provider, ResolutionMiss> {
    let persisted_selection = persisted_selection.filter(|id| !id.is_empty());

    match (providers, persisted_selection) {
        ([], _) => Err(ResolutionMiss::NoProviders),
        ([only], None) => Ok(only),
        ([_, _, ..], None) => Err(ResolutionMiss::NoSelection),
        (providers, Some(selected)) => {
            providers.iter().find(|provider| provider.identifier() == selected).ok_or_else(|| {
                ResolutionMiss::SelectionUnavailable { selected: selected.to_string() }
            })
        }
    }
}

/// [`select_provider`] without the reason for a miss.
pub fn resolve_selected_provider<'a>(
    providers: &'a [Provider],
    persisted_selection: Option<&str>,
) -> Option<&'a Provider> {
    select_provider(providers, persisted_selection).ok()
}

/// Whether `candidate` may be persisted as the selection.
pub fn is_selectable(providers: &[Provider], candidate: &str) -> bool {
    !candidate.is_empty() && providers.iter().any(|provider| provider.identifier() == candidate)
}
