//! Host hooks that may rewrite a resolved endpoint URL.

use std::collections::HashMap;
use std::fmt;

use crate::domain::{EndpointOrigin, Environment};

/// What a filter knows about the URL it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext<'a> {
    pub item_unique_id: &'a str,
    pub environment: Environment,
    pub origin: &'a EndpointOrigin,
}

type EndpointFilter = Box<dyn Fn(&str, &FilterContext<'_>) -> String + Send + Sync>;

/// Filters keyed by item unique id, applied in registration order.
#[derive(Default)]
pub struct EndpointFilters {
    filters: HashMap<String, Vec<EndpointFilter>>,
}

impl EndpointFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, item_unique_id: &str, filter: F)
    where
        F: Fn(&str, &FilterContext<'_>) -> String + Send + Sync + 'static,
    {
        self.filters.entry(item_unique_id.to_string()).or_default().push(Box::new(filter));
    }

    pub fn is_empty(&self) -> bool {
        self.filters.values().all(Vec::is_empty)
    }

    /// Run every filter registered for `context.item_unique_id` over `url`.
    pub fn apply(&self, url: &str, context: &FilterContext<'_>) -> String {
        match self.filters.get(context.item_unique_id) {
            Some(filters) => {
                filters.iter().fold(url.to_string(), |current, filter| filter(&current, context))
            }
            None => url.to_string(),
        }
    }
}

impl fmt::Debug for EndpointFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> =
            self.filters.iter().map(|(id, filters)| (id.as_str(), filters.len())).collect();
        f.debug_struct("EndpointFilters").field("filters", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_chain_per_item() {
        let mut filters = EndpointFilters::new();
        filters.register("demo", |url, _| format!("{url}?a=1"));
        filters.register("demo", |url, ctx| format!("{url}&env={}", ctx.environment));
        filters.register("other", |_, _| "https://hijacked.example".to_string());

        let origin = EndpointOrigin::Production { provider: "acme".to_string() };
        let context = FilterContext {
            item_unique_id: "demo",
            environment: Environment::Staging,
            origin: &origin,
        };
        assert_eq!(
            filters.apply("https://a.example/api", &context),
            "https://a.example/api?a=1&env=staging"
        );

        let untouched = FilterContext { item_unique_id: "none", ..context };
        assert_eq!(filters.apply("https://a.example/api", &untouched), "https://a.example/api");
    }
}
