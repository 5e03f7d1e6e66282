use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use gatehouse_api::routes;
use gatehouse_api::state::AppState;
use gatehouse_checkin::{CheckInEngine, NoopActuator};
use gatehouse_core::types::DbId;
use gatehouse_remote::{BookingUpdate, RemoteBackend, RemoteError, RemoteSnapshot};

pub const TEST_SITE_ID: DbId = 7;

/// Backend double: serves a scripted snapshot (or a 503 when none is
/// loaded) and records every pushed update.
#[derive(Default)]
pub struct ScriptedBackend {
    snapshot: Mutex<Option<RemoteSnapshot>>,
    pub pushes: Mutex<Vec<(DbId, BookingUpdate)>>,
}

impl ScriptedBackend {
    pub fn with_snapshot(value: serde_json::Value) -> Arc<Self> {
        let backend = Arc::new(Self::default());
        backend.load_snapshot(value);
        backend
    }

    pub fn load_snapshot(&self, value: serde_json::Value) {
        let snapshot = serde_json::from_value(value).expect("test snapshot must decode");
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    pub fn pushed(&self) -> Vec<(DbId, BookingUpdate)> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteBackend for ScriptedBackend {
    async fn fetch_snapshot(&self, _site_id: DbId) -> Result<RemoteSnapshot, RemoteError> {
        match self.snapshot.lock().unwrap().clone() {
            Some(snapshot) => Ok(snapshot),
            None => Err(RemoteError::HttpStatus {
                status: 503,
                body: "backend offline".into(),
            }),
        }
    }

    async fn push_update(
        &self,
        booking_id: DbId,
        update: &BookingUpdate,
    ) -> Result<(), RemoteError> {
        self.pushes.lock().unwrap().push((booking_id, update.clone()));
        Ok(())
    }
}

/// Build the application router the way `main.rs` does, against the
/// scripted backend.
pub fn build_test_app(pool: SqlitePool, backend: Arc<ScriptedBackend>) -> Router {
    let backend: Arc<dyn RemoteBackend> = backend;
    let engine = Arc::new(CheckInEngine::new(
        pool.clone(),
        Arc::clone(&backend),
        Arc::new(NoopActuator),
    ));
    routes::app(AppState {
        pool,
        backend,
        engine,
        site_id: TEST_SITE_ID,
    })
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
