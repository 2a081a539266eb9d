use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use techtrack_api::{app, store::MemoryStore};

pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Start the service in-process on a free port with a fresh, empty store.
/// Each test gets its own server so state never leaks between tests.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let store = Arc::new(MemoryStore::new());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind test listener")?;

    tokio::spawn(async move {
        axum::serve(listener, app(store)).await.expect("test server");
    });

    let server = TestServer {
        base_url: format!("http://{}", addr),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// Register a user and return the created record.
pub async fn create_user(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    username: &str,
) -> Result<serde_json::Value> {
    let res = client
        .post(format!("{}/users", base_url))
        .json(&serde_json::json!({ "name": name, "username": username }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "user creation failed with {}",
        res.status()
    );
    Ok(res.json().await?)
}
