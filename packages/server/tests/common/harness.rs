//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests for dramatically
//! improved performance. The container and migrations are initialized once
//! on first test, then reused.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::util::ServiceExt;

use server_core::common::{Capability, OfficeId, UserId};
use server_core::domains::auth::JwtService;
use server_core::domains::office::User;
use server_core::kernel::test_dependencies::{RecordingNotifier, RecordingStorage};
use server_core::kernel::ServerDeps;
use server_core::server::build_app;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    /// Initialize shared infrastructure (container + migrations).
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init() avoids panicking if already set up.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh pool and fresh recording doubles, but reuses the
/// same database container. The database is shared, so tests scope their
/// assertions to the rows they create.
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    pub notifier: Arc<RecordingNotifier>,
    pub storage: Arc<RecordingStorage>,
    pub jwt_service: Arc<JwtService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            notifier: Arc::new(RecordingNotifier::default()),
            storage: Arc::new(RecordingStorage::default()),
            jwt_service: Arc::new(JwtService::new("test_secret", "test_issuer".to_string())),
        })
    }

    /// Harness whose storage backend fails every delete.
    pub async fn with_failing_storage() -> Result<Self> {
        let mut harness = Self::new().await?;
        harness.storage = Arc::new(RecordingStorage::failing());
        Ok(harness)
    }

    /// Build the application router wired with this harness's doubles.
    pub fn app(&self) -> Router {
        let deps = ServerDeps::new(
            self.db_pool.clone(),
            self.notifier.clone(),
            self.storage.clone(),
        );
        build_app(deps, self.jwt_service.clone(), vec![])
    }

    /// Mint a bearer token for the given user.
    pub fn token(&self, user: &User, scopes: Vec<Capability>) -> String {
        self.jwt_service
            .create_token(user.id.as_i64(), user.is_admin, scopes)
            .expect("Failed to create token")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body was not JSON")
        };
        (status, json)
    }

    /// Dispatches recorded for the given office so far.
    pub fn notifications_for(&self, office_id: OfficeId) -> Vec<(UserId, OfficeId)> {
        self.notifier
            .sent
            .lock()
            .expect("notifier mutex poisoned")
            .iter()
            .filter(|(_, o)| *o == office_id)
            .copied()
            .collect()
    }

    /// Wait until the notifier has recorded a dispatch for the given office,
    /// or time out. Notifications are dispatched after the response commits.
    pub async fn wait_for_notification(&self, office_id: OfficeId) -> Vec<(UserId, OfficeId)> {
        for _ in 0..100 {
            let sent = self.notifications_for(office_id);
            if !sent.is_empty() {
                return sent;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }
        Vec::new()
    }

    /// Poll until the dispatch count for the office has been stable for a
    /// while, then return the entries. Unlike a single fixed sleep this
    /// keeps watching for late arrivals, so asserting emptiness (or an
    /// exact count) on the result is meaningful on a loaded runner.
    pub async fn settled_notifications(&self, office_id: OfficeId) -> Vec<(UserId, OfficeId)> {
        let mut last = self.notifications_for(office_id).len();
        let mut quiet_polls = 0;
        for _ in 0..150 {
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
            let current = self.notifications_for(office_id).len();
            if current == last {
                quiet_polls += 1;
                if quiet_polls >= 10 {
                    break;
                }
            } else {
                last = current;
                quiet_polls = 0;
            }
        }
        self.notifications_for(office_id)
    }
}
