use crate::ports::{EnvironmentSource, HttpFetcher, OptionStore, Scheduler};

/// Application context holding the host collaborators of one client.
pub struct AppContext<S, H, E, K>
where
    S: OptionStore,
    H: HttpFetcher,
    E: EnvironmentSource,
    K: Scheduler,
{
    store: S,
    http: H,
    environment: E,
    scheduler: K,
}

impl<S, H, E, K> AppContext<S, H, E, K>
where
    S: OptionStore,
    H: HttpFetcher,
    E: EnvironmentSource,
    K: Scheduler,
{
    /// Create a new application context.
    pub fn new(store: S, http: H, environment: E, scheduler: K) -> Self {
        Self { store, http, environment, scheduler }
    }

    /// Get a reference to the option store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the HTTP fetcher.
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Get a reference to the environment source.
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Get a reference to the scheduler.
    pub fn scheduler(&self) -> &K {
        &self.scheduler
    }
}
