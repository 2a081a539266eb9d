use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

use store::MemoryStore;

/// Build the full service router over an explicitly owned store. Tests mount
/// this in-process; main binds it to a listener.
pub fn app(store: Arc<MemoryStore>) -> Router {
    let technologies = Router::new()
        .route(
            "/technologies",
            post(handlers::technologies::create).get(handlers::technologies::list),
        )
        .route(
            "/technologies/:id",
            put(handlers::technologies::update).delete(handlers::technologies::delete),
        )
        .route(
            "/technologies/:id/studied",
            patch(handlers::technologies::mark_studied),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            store.clone(),
            middleware::validate_account_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/users", post(handlers::users::create))
        .merge(technologies)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "TechTrack API",
        "version": version,
        "description": "In-memory study-tracking API built with Rust (Axum)",
        "endpoints": {
            "users": "POST /users (public)",
            "technologies": "POST|GET /technologies, PUT /technologies/:id, PATCH /technologies/:id/studied, DELETE /technologies/:id (username header required)",
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
