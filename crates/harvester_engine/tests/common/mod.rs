#![allow(dead_code)]

use std::net::TcpListener;
use std::path::Path;
use std::sync::{Arc, Mutex};

use harvester_engine::{
    CachedSession, Engine, EngineEvent, EventSink, FetchSettings, HarvestConfig, MemoryCache,
    ReqwestFetcher,
};
use harvester_core::Discrepancy;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default, Clone)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }

    pub fn discrepancies(&self) -> Vec<Discrepancy> {
        self.take()
            .into_iter()
            .filter_map(|event| match event {
                EngineEvent::Discrepancy(discrepancy) => Some(discrepancy),
                EngineEvent::Progress(_) => None,
            })
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn session() -> CachedSession {
    session_with(FetchSettings::default())
}

/// In-memory session with the given page settings and the default transfer
/// settings, wired the way `Engine::new` wires them.
pub fn session_with(pages: FetchSettings) -> CachedSession {
    CachedSession::new(ReqwestFetcher::new(pages).unwrap(), MemoryCache::new())
        .with_transfer_fetcher(ReqwestFetcher::new(FetchSettings::transfer()).unwrap())
}

/// Engine pointed at the mock server: docs under `/3/`, PEPs under `/peps/`.
pub fn engine(server: &MockServer, root: &Path) -> Engine {
    engine_with(server, root, session())
}

pub fn engine_with(server: &MockServer, root: &Path, session: CachedSession) -> Engine {
    let mut config = HarvestConfig::default_with_root(root.to_path_buf());
    config.main_doc_url = Url::parse(&format!("{}/3/", server.uri())).unwrap();
    config.pep_url = Url::parse(&format!("{}/peps/", server.uri())).unwrap();
    Engine::with_session(config, session)
}

pub async fn serve_html(server: &MockServer, at: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

/// URL on a local port with nothing listening.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/missing")
}
