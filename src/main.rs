use std::sync::Arc;

use techtrack_api::{app, config, store::MemoryStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up PORT overrides
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting TechTrack API in {:?} mode", config.environment);

    // The user directory lives for the whole process; no persistence
    let store = Arc::new(MemoryStore::new());
    let app = app(store);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 TechTrack API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
