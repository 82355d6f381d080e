mod common;

use common::{ITEM_ID, ScriptedHttp, StubEnvironment, TWO_PROVIDERS};
use cptm_client::ports::NoopScheduler;
use cptm_client::{
    AppContext, AppError, Client, Environment, FetchFailure, ItemId, MemoryOptionStore,
    OptionStore, Provider, ProviderEndpoint, ProviderSource, RefreshOutcome, ResolutionMiss,
    StoredScheduler, parse_config_content,
};
use url::Url;

type RemoteClient =
    Client<MemoryOptionStore, ScriptedHttp, StubEnvironment, StoredScheduler<MemoryOptionStore>>;

fn remote_client(
    store: &MemoryOptionStore,
    http: &ScriptedHttp,
    env: StubEnvironment,
) -> RemoteClient {
    let scheduler = StoredScheduler::new(store.clone());
    let ctx = AppContext::new(store.clone(), http.clone(), env, scheduler);
    Client::new(
        ItemId::new(ITEM_ID).unwrap(),
        ProviderSource::remote(Url::parse("https://providers.example/list.json").unwrap()),
        ctx,
    )
}

#[test]
fn daily_refresh_with_unchanged_document_is_idempotent() {
    let store = MemoryOptionStore::new();
    let http = ScriptedHttp::serving(TWO_PROVIDERS);
    let client = remote_client(&store, &http, StubEnvironment::new(Environment::Production));

    assert!(client.set_selected_provider("globex").unwrap());
    let endpoint = client.endpoint_url().unwrap();
    let selected = client.selected_provider().unwrap();
    assert_eq!(endpoint.as_deref(), Some("https://g.example/api"));

    for _ in 0..3 {
        let outcome = client.handle_scheduled_event(client.refresh_event()).unwrap();
        assert_eq!(outcome, Some(RefreshOutcome::Updated { providers: 2, skipped: 0 }));
        assert_eq!(client.endpoint_url().unwrap(), endpoint);
        assert_eq!(client.selected_provider().unwrap(), selected);
    }
}

#[test]
fn failed_refresh_keeps_serving_previous_list() {
    let store = MemoryOptionStore::new();
    let http = ScriptedHttp::serving(TWO_PROVIDERS);
    let client = remote_client(&store, &http, StubEnvironment::new(Environment::Staging));
    client.set_selected_provider("acme").unwrap();
    let cache = store.get(client.keys().providers_cache()).unwrap();

    http.go_offline();
    assert!(matches!(
        client.refresh_providers().unwrap(),
        RefreshOutcome::Rejected(FetchFailure::Transport(_))
    ));

    http.serve(r#"{"acme": {"productionEndpoint": {"siteUrl": "https://a.example"}}}"#);
    assert_eq!(
        client.refresh_providers().unwrap(),
        RefreshOutcome::Rejected(FetchFailure::NoValidProviders { skipped: 1 })
    );

    http.serve("[1, 2, 3]");
    assert_eq!(
        client.refresh_providers().unwrap(),
        RefreshOutcome::Rejected(FetchFailure::NotAMapping)
    );

    assert_eq!(store.get(client.keys().providers_cache()).unwrap(), cache);
    assert_eq!(client.endpoint_url().unwrap().as_deref(), Some("https://stg.a.example/api"));
}

#[test]
fn vanished_selection_forces_reselection() {
    let store = MemoryOptionStore::new();
    let http = ScriptedHttp::serving(TWO_PROVIDERS);
    let client = remote_client(&store, &http, StubEnvironment::new(Environment::Production));
    client.set_selected_provider("globex").unwrap();

    http.serve(
        r#"{"acme": {"productionEndpoint": {"siteUrl": "https://a.example", "apiUrl": "https://a.example/api"}}}"#,
    );
    assert!(client.refresh_providers().unwrap().is_updated());

    assert_eq!(client.selected_provider().unwrap(), None);
    assert_eq!(
        client.resolve().unwrap().miss(),
        Some(&ResolutionMiss::SelectionUnavailable { selected: "globex".to_string() })
    );

    assert!(client.set_selected_provider("acme").unwrap());
    assert_eq!(client.endpoint_url().unwrap().as_deref(), Some("https://a.example/api"));
}

#[test]
fn clients_for_different_items_share_a_store() {
    let store = MemoryOptionStore::new();
    let http = ScriptedHttp::serving(TWO_PROVIDERS);
    let env = StubEnvironment::new(Environment::Production);
    let first = remote_client(&store, &http, env.clone());
    let scheduler = StoredScheduler::new(store.clone());
    let ctx = AppContext::new(store.clone(), http.clone(), env, scheduler);
    let second = Client::new(
        ItemId::new("other-theme").unwrap(),
        ProviderSource::remote(Url::parse("https://providers.example/list.json").unwrap()),
        ctx,
    );

    first.set_selected_provider("acme").unwrap();
    second.set_selected_provider("globex").unwrap();

    assert_eq!(first.endpoint_url().unwrap().as_deref(), Some("https://a.example/api"));
    assert_eq!(second.endpoint_url().unwrap().as_deref(), Some("https://g.example/api"));
}

#[test]
fn development_overrides_in_precedence_order() {
    let store = MemoryOptionStore::new();
    let http = ScriptedHttp::serving(TWO_PROVIDERS);
    let env = StubEnvironment::new(Environment::Development)
        .with_var("CPTM_CLIENT_UPDATE_URL", "http://env.local/api");
    let client = remote_client(&store, &http, env);

    assert_eq!(client.endpoint_url().unwrap().as_deref(), Some("http://env.local/api"));

    client.set_update_url_override(Some("http://localhost:8080/api")).unwrap();
    assert_eq!(client.endpoint_url().unwrap().as_deref(), Some("http://localhost:8080/api"));

    assert_eq!(
        client.endpoint_url_with_override(Some("https://manual.example")).unwrap().as_deref(),
        Some("https://manual.example")
    );

    client.set_update_url_override(None).unwrap();
    assert_eq!(store.get(client.keys().update_url_override()).unwrap(), None);
    assert_eq!(http.calls(), 0);
}

#[test]
fn static_config_builds_a_working_client() {
    let config = parse_config_content(&format!(
        r#"
[item]
unique_id = "{ITEM_ID}"

[source]
kind = "static"

[[source.providers]]
identifier = "acme"
production = {{ site_url = "https://a.example", api_url = "https://a.example/api" }}

[[source.providers]]
identifier = "globex"
enabled = false
production = {{ site_url = "https://g.example", api_url = "https://g.example/api" }}
"#
    ))
    .unwrap();
    let store = MemoryOptionStore::new();
    let ctx = AppContext::new(
        store.clone(),
        ScriptedHttp::default(),
        StubEnvironment::new(Environment::Production),
        NoopScheduler,
    );
    let client = Client::from_config(&config, ctx).unwrap();

    assert_eq!(client.endpoint_url().unwrap(), None);
    client.set_selected_provider("globex").unwrap();
    assert_eq!(
        client.resolve().unwrap().miss(),
        Some(&ResolutionMiss::ProviderDisabled { identifier: "globex".to_string() })
    );
    client.set_selected_provider("acme").unwrap();
    assert_eq!(client.endpoint_url().unwrap().as_deref(), Some("https://a.example/api"));
}

#[test]
fn static_source_rejects_duplicates_at_construction() {
    let endpoint = ProviderEndpoint::new("https://a.example", "https://a.example/api", None);
    let result = ProviderSource::fixed(vec![
        Provider::new("acme", endpoint.clone(), None),
        Provider::new("acme", endpoint, None),
    ]);
    assert!(matches!(result, Err(AppError::DuplicateProvider(ref id)) if id == "acme"));
}
