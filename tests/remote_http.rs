mod common;

use common::{ITEM_ID, StubEnvironment, TWO_PROVIDERS};
use cptm_client::domain::HttpConfig;
use cptm_client::{
    AppContext, CacheState, Client, Environment, FetchFailure, ItemId, MemoryOptionStore,
    ProviderSource, RefreshOutcome, ReqwestHttpFetcher, StoredScheduler,
};
use url::Url;

type HttpClient = Client<
    MemoryOptionStore,
    ReqwestHttpFetcher,
    StubEnvironment,
    StoredScheduler<MemoryOptionStore>,
>;

fn client_for(url: &str, env: StubEnvironment) -> HttpClient {
    let store = MemoryOptionStore::new();
    let http = ReqwestHttpFetcher::new(&HttpConfig { timeout_secs: 5 }).unwrap();
    let ctx = AppContext::new(store.clone(), http, env, StoredScheduler::new(store));
    let source = ProviderSource::remote(Url::parse(url).unwrap());
    Client::new(ItemId::new(ITEM_ID).unwrap(), source, ctx)
}

fn cache_state(client: &HttpClient) -> CacheState {
    match client.source() {
        ProviderSource::Remote(remote) => {
            remote.cache_state(client.context().store(), client.keys()).unwrap()
        }
        ProviderSource::Static(_) => panic!("expected a remote source"),
    }
}

#[test]
fn first_access_fetches_and_caches() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/providers.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_PROVIDERS)
        .expect(1)
        .create();

    let client = client_for(
        &format!("{}/providers.json", server.url()),
        StubEnvironment::new(Environment::Production),
    );
    assert_eq!(cache_state(&client), CacheState::Uninitialized);

    let providers = client.providers().unwrap().unwrap();
    assert_eq!(providers.identifiers(), vec!["acme", "globex"]);
    assert!(matches!(cache_state(&client), CacheState::Cached(_)));

    client.set_selected_provider("acme").unwrap();
    assert_eq!(client.endpoint_url().unwrap().as_deref(), Some("https://a.example/api"));
    mock.assert();
}

#[test]
fn server_error_is_a_transport_failure() {
    let mut server = mockito::Server::new();
    let _m = server.mock("GET", "/providers.json").with_status(500).create();

    let client = client_for(
        &format!("{}/providers.json", server.url()),
        StubEnvironment::new(Environment::Production),
    );
    assert!(matches!(
        client.refresh_providers().unwrap(),
        RefreshOutcome::Rejected(FetchFailure::Transport(_))
    ));
    assert_eq!(client.providers().unwrap(), None);
    assert_eq!(cache_state(&client), CacheState::Uninitialized);
}

#[test]
fn malformed_entries_are_skipped() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/providers.json")
        .with_status(200)
        .with_body(
            r#"{
                "acme": {"productionEndpoint": {"siteUrl": "https://a.example", "apiUrl": "https://a.example/api"}},
                "broken": {"productionEndpoint": {"siteUrl": "https://b.example"}}
            }"#,
        )
        .create();

    let client = client_for(
        &format!("{}/providers.json", server.url()),
        StubEnvironment::new(Environment::Production),
    );
    assert_eq!(
        client.refresh_providers().unwrap(),
        RefreshOutcome::Updated { providers: 1, skipped: 1 }
    );
    let provider = client.selected_provider().unwrap().unwrap();
    assert_eq!(provider.identifier(), "acme");
    assert!(provider.is_enabled());
    assert!(provider.staging_endpoint().is_none());
}

#[test]
fn development_fetches_from_overridden_list_url() {
    let mut server = mockito::Server::new();
    let default = server.mock("GET", "/providers.json").expect(0).create();
    let local = server
        .mock("GET", "/local.json")
        .with_status(200)
        .with_body(TWO_PROVIDERS)
        .expect(1)
        .create();

    let env = StubEnvironment::new(Environment::Development)
        .with_var("CPTM_CLIENT_PROVIDERS_URL", &format!("{}/local.json", server.url()));
    let client = client_for(&format!("{}/providers.json", server.url()), env);

    assert_eq!(client.providers().unwrap().unwrap().len(), 2);
    default.assert();
    local.assert();
}
