//! In-process mock of the analytics API for integration tests

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Once};
use std::time::Duration;
use syntech_analytics::SourceConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("syntech_analytics=debug")
            .with_test_writer()
            .try_init();
    });
}

/// A canned response for one path
#[derive(Clone)]
pub struct MockRoute {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockRoute {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Routes = Arc<HashMap<String, MockRoute>>;

/// Running mock server; aborted on drop
pub struct MockApi {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub fn source(&self) -> SourceConfig {
        SourceConfig::with_base_url(self.base_url.clone())
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The five default endpoint paths, decoded
pub const TOTAL: &str = "/api/Analytics/Total Analytics";
pub const RED_LISTED: &str = "/api/Analytics/RedListed Analytics";
pub const UNLISTED: &str = "/api/Analytics/UNListed Analytics";
pub const APPROVED: &str = "/api/Analytics/approved";
pub const REJECTED: &str = "/api/Analytics/rejected";

/// Routes serving a small, well-formed data set
pub fn healthy_routes() -> HashMap<String, MockRoute> {
    HashMap::from([
        (
            TOTAL.to_string(),
            MockRoute::json(json!([
                {"date": "2024-01-01T10:00:00Z", "count": 5},
                {"date": "2024-01-02T10:00:00Z", "count": 8},
                {"date": "2024-01-03T10:00:00Z", "count": 13}
            ])),
        ),
        (
            RED_LISTED.to_string(),
            MockRoute::json(json!([
                {"date": "2024-01-01T10:00:00Z", "count": 1},
                {"date": "2024-01-02T10:00:00Z", "count": 0}
            ])),
        ),
        (
            UNLISTED.to_string(),
            MockRoute::json(json!([{"date": "2024-01-02T15:30:00Z", "count": 4}])),
        ),
        (APPROVED.to_string(), MockRoute::json(json!({"count": 42}))),
        (REJECTED.to_string(), MockRoute::json(json!({"count": 7}))),
    ])
}

/// Start a mock API serving `routes` on an ephemeral port
pub async fn spawn_mock(routes: HashMap<String, MockRoute>) -> MockApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(respond).with_state(Arc::new(routes));
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockApi {
        base_url: format!("http://{}", addr),
        handle,
    }
}

async fn respond(
    State(routes): State<Routes>,
    uri: Uri,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = urlencoding::decode(uri.path())
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| uri.path().to_string());

    match routes.get(&path) {
        Some(route) => {
            if !route.delay.is_zero() {
                tokio::time::sleep(route.delay).await;
            }
            let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, "application/json")], route.body.clone())
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            format!("no route for {}", path),
        ),
    }
}
