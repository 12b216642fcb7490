#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation; every test binary gets its own
        // server process and therefore its own empty in-memory store
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_blud-api"));
        cmd.env("BLUD_API_PORT", port.to_string())
            // Development preset: seeded admin account and fast bcrypt cost
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Register a fresh account and return its bearer token and user id.
pub async fn register_user(
    server: &TestServer,
    username: &str,
    role: &str,
    department: &str,
) -> Result<(String, i64)> {
    let resp = client()
        .post(format!("{}/api/register", server.base_url))
        .json(&json!({
            "username": username,
            "password": "rahasia123",
            "name": format!("Test {}", username),
            "role": role,
            "department": department
        }))
        .send()
        .await?;
    anyhow::ensure!(
        resp.status() == StatusCode::CREATED,
        "registration of {} failed: {}",
        username,
        resp.status()
    );

    let body: Value = resp.json().await?;
    let token = body["token"].as_str().context("missing token")?.to_string();
    let user_id = body["user"]["id"].as_i64().context("missing user id")?;
    Ok((token, user_id))
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<Value> {
    let resp = client()
        .post(format!("{}/api/login", server.base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(resp.status() == StatusCode::OK, "login failed: {}", resp.status());
    Ok(resp.json().await?)
}

/// Token for the development-seeded administrator account.
pub async fn admin_token(server: &TestServer) -> Result<String> {
    let body = login(server, "admin", "admin123").await?;
    Ok(body["token"].as_str().context("missing admin token")?.to_string())
}

/// Audit rows for one entity, fetched with administrator rights.
pub async fn audit_rows_for(
    server: &TestServer,
    entity_type: &str,
    entity_id: i64,
) -> Result<Vec<Value>> {
    let token = admin_token(server).await?;
    let resp = client()
        .get(format!(
            "{}/api/audit-trails?entityType={}&entityId={}",
            server.base_url, entity_type, entity_id
        ))
        .bearer_auth(token)
        .send()
        .await?;
    anyhow::ensure!(resp.status() == StatusCode::OK, "audit fetch failed: {}", resp.status());
    let rows: Vec<Value> = resp.json().await?;
    Ok(rows)
}
