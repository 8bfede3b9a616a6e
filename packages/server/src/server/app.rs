//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::middleware::auth_middleware;
use crate::server::routes::{
    create_office, delete_office, get_office, health_handler, list_offices, list_tags,
    update_office,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
pub fn build_app(
    deps: ServerDeps,
    jwt_service: Arc<JwtService>,
    allowed_origins: Vec<String>,
) -> Router {
    let state = AppState {
        db_pool: deps.db_pool.clone(),
        deps,
        jwt_service: jwt_service.clone(),
    };

    let cors = build_cors(allowed_origins);

    let auth_layer = middleware::from_fn(move |request, next| {
        auth_middleware(jwt_service.clone(), request, next)
    });

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/tags", get(list_tags))
        .route("/api/offices", get(list_offices))
        .route("/api/offices", post(create_office))
        .route("/api/offices/:id", get(get_office))
        .route("/api/offices/:id", put(update_office))
        .route("/api/offices/:id", delete(delete_office))
        .layer(auth_layer)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn build_cors(allowed_origins: Vec<String>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
