//! Shared test helpers for nostalgia-yd integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use nostalgia_common::{DocumentStore, Error, MemoryDocumentStore};
use nostalgia_yd::config::ServiceConfig;
use nostalgia_yd::services::{SourceClient, SourceFetchError};
use nostalgia_yd::{build_router, AppState};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const IDENTITY_HEADER: &str = "x-user-id";

pub const CHART_FIXTURE: &str = r#"
<html><body>
  <ul class="o-chart-results-list-row">
    <li class="o-chart-results-list__item"><h3 class="c-title">Hollaback Girl</h3></li>
    <li class="o-chart-results-list__item"><h3 class="c-title">Let Me Love You</h3></li>
    <li class="o-chart-results-list__item"><h3 class="c-title">Since U Been Gone</h3></li>
  </ul>
</body></html>"#;

pub const ARTICLE_FIXTURE: &str = r#"
<html><body><div id="mw-content-text">
  <p>2005 was a common year starting on Saturday.</p>
  <h2 id="Events">Events</h2>
  <ul>
    <li>February 14 – YouTube is founded.</li>
    <li>July 7 – Bombings in London.</li>
  </ul>
</div></body></html>"#;

pub const SNAPSHOT_FIXTURE: &str = r#"{
  "archived_snapshots": {
    "closest": {"available": true, "url": "http://web.archive.org/web/20050101000000/http://example.com/", "timestamp": "20050101000000"}
  }
}"#;

/// Source client answering from fixtures, counting every call
pub struct StubSourceClient {
    responses: Vec<(&'static str, Result<&'static str, ()>)>,
    calls: AtomicUsize,
}

impl StubSourceClient {
    /// Every source answers with a realistic fixture
    pub fn with_fixtures() -> Self {
        Self {
            responses: vec![
                ("https://www.billboard.com/", Ok(CHART_FIXTURE)),
                ("https://en.wikipedia.org/", Ok(ARTICLE_FIXTURE)),
                ("https://archive.org/wayback/available", Ok(SNAPSHOT_FIXTURE)),
            ],
            calls: AtomicUsize::new(0),
        }
    }

    /// Every source fails
    pub fn unreachable() -> Self {
        Self {
            responses: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceClient for StubSourceClient {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, SourceFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.responses.iter().find(|(prefix, _)| url.starts_with(prefix)) {
            Some((_, Ok(body))) => Ok(body.to_string()),
            _ => Err(SourceFetchError::Network {
                url: url.to_string(),
                message: "stub: unreachable".to_string(),
            }),
        }
    }
}

/// Store that reads as empty and rejects every write
pub struct ReadOnlyStore {
    pub writes: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn new() -> Self {
        Self {
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for ReadOnlyStore {
    fn name(&self) -> &'static str {
        "read-only"
    }

    async fn get(&self, _collection: &str, _key: &str) -> nostalgia_common::Result<Option<Value>> {
        Ok(None)
    }

    async fn put(&self, _collection: &str, _key: &str, _value: &Value) -> nostalgia_common::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }
}

/// Test application with its collaborators exposed for assertions
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub client: Arc<StubSourceClient>,
    pub store: Arc<dyn DocumentStore>,
}

pub fn setup_app(client: StubSourceClient) -> TestApp {
    setup_app_with(ServiceConfig::default(), client, Arc::new(MemoryDocumentStore::new()))
}

pub fn setup_app_with(
    config: ServiceConfig,
    client: StubSourceClient,
    store: Arc<dyn DocumentStore>,
) -> TestApp {
    let client = Arc::new(client);
    let state = AppState::from_config(&config, store.clone(), client.clone())
        .expect("Should build app state");

    TestApp {
        router: build_router(state.clone()),
        state,
        client,
        store,
    }
}

/// GET `uri` as `identity` (or anonymously)
pub fn get_request(uri: &str, identity: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(identity) = identity {
        builder = builder.header(IDENTITY_HEADER, identity);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

pub async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}
