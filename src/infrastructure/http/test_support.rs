//! Shared setup for route tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::domain::aggregates::PrestigeLedger;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::host::{HostCatalog, InMemoryHost};
use crate::infrastructure::http::create_routes;
use crate::infrastructure::persistence::{connect, SqliteLedgerRepository, SqliteSettingsRepository};
use crate::infrastructure::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub pool: SqlitePool,
}

pub async fn create_app(catalog: HostCatalog) -> TestApp {
    let pool = connect("sqlite::memory:").await.unwrap();
    let settings = SqliteSettingsRepository::new(pool.clone()).await.unwrap();
    let ledger_repository = SqliteLedgerRepository::new(pool.clone()).await.unwrap();
    let ledger = Arc::new(PrestigeLedger::default());
    let host = Arc::new(InMemoryHost::new(catalog, ledger.clone()));
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        catalog_path: None,
        autosave_interval_secs: 0,
        server_port: 0,
    };

    let state = AppState::with_parts(
        config,
        host,
        ledger,
        Arc::new(settings),
        Arc::new(ledger_repository),
    )
    .await
    .unwrap();
    let state = Arc::new(state);

    TestApp {
        router: create_routes().with_state(state.clone()),
        state,
        pool,
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}
