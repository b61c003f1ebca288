#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use taskboard_api::app::{router, AppState};
use taskboard_api::auth::BasicCredentials;
use taskboard_api::config::AppConfig;
use taskboard_api::database::DatabaseManager;

/// An in-process server on its own port with its own in-memory database
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.database.url = "sqlite::memory:".to_string();
        config.database.enable_query_logging = false;
        config.api.enable_request_logging = false;
        config.security.password_memory_kib = 1024;
        config.security.password_iterations = 1;

        let db = DatabaseManager::connect(&config.database).await?;
        db.migrate().await?;

        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
        let app = router(AppState::new(db, config)?);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL under the versioned API prefix
    pub fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.api(path))
    }

    pub fn post(&self, path: &str, body: Value) -> RequestBuilder {
        self.client.post(self.api(path)).json(&body)
    }

    pub fn put(&self, path: &str, body: Value) -> RequestBuilder {
        self.client.put(self.api(path)).json(&body)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.api(path))
    }

    /// POST and return the created id, failing unless the server answered 201
    pub async fn create(&self, path: &str, body: Value) -> Result<i64> {
        let res = self.post(path, body).send().await?;
        let status = res.status();
        let created: Value = res.json().await?;
        anyhow::ensure!(status == StatusCode::CREATED, "POST {} -> {}: {}", path, status, created);
        created["id"].as_i64().context("created row has no id")
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Value> {
        let res = self
            .post("/users", json!({"email": email, "password": password}))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());
        Ok(res.json().await?)
    }
}

/// `Authorization: Basic ...` header value
pub fn basic(email: &str, password: &str) -> String {
    BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    }
    .to_header_value()
}

/// Ids of a JSON array of rows, in order
pub fn ids(rows: &Value) -> Vec<i64> {
    rows.as_array()
        .map(|rows| rows.iter().filter_map(|row| row["id"].as_i64()).collect())
        .unwrap_or_default()
}
