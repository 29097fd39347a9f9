use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use chatterforms::config::Config;

/// A running test server with its own temporary storage root.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub storage_root: PathBuf,
    _storage: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn forms_dir(&self) -> PathBuf {
        self.storage_root.join("forms")
    }

    /// Names of all files in the forms directory, sorted. Empty if it does not exist.
    pub fn stored_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.forms_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// POST a raw JSON body to the publish route, return (body, status).
    pub async fn publish_raw(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/publish-form"))
            .json(body)
            .send()
            .await
            .expect("publish request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Publish a schema, wrapping it as `{ "formSchema": schema }`.
    pub async fn publish(&self, schema: &Value) -> (Value, StatusCode) {
        self.publish_raw(&json!({ "formSchema": schema })).await
    }

    /// Publish a schema that must succeed, return the form id.
    pub async fn publish_ok(&self, schema: &Value) -> String {
        let (body, status) = self.publish(schema).await;
        assert_eq!(status, StatusCode::OK, "publish failed: {body}");
        body["formId"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn submit(&self, form_id: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/forms/{form_id}/submissions")))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

fn test_config(storage_root: &Path) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        storage_root: storage_root.to_path_buf(),
        max_body_size: 64 * 1024,
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app storing forms in a fresh temporary directory.
pub async fn spawn_app() -> TestApp {
    let storage = TempDir::new().expect("Failed to create temp dir");
    let root = storage.path().to_path_buf();
    spawn_app_at(storage, root).await
}

/// Spawn a test app whose storage root sits below a regular file, so every
/// attempt to create the forms directory fails.
pub async fn spawn_app_with_broken_storage() -> TestApp {
    let storage = TempDir::new().expect("Failed to create temp dir");
    let blocker = storage.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    spawn_app_at(storage, blocker.join("data")).await
}

async fn spawn_app_at(storage: TempDir, storage_root: PathBuf) -> TestApp {
    let app = chatterforms::build_app(test_config(&storage_root));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        storage_root,
        _storage: storage,
    }
}
