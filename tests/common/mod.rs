#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use blog_api::auth::{generate_jwt, Claims};
use blog_api::BLOG_MOUNT_PATH;

pub const TEST_SECRET: &str = "integration-test-secret";

/// A server process on a private port, backed by the in-memory store.
/// Killed when dropped.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_blog-api"));
        cmd.args(["serve", "--in-memory", "--port", &port.to_string()])
            .env("JWT_SECRET", TEST_SECRET)
            .env("APP_ENV", "development")
            .env("BLOG_API_HOST", "127.0.0.1")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
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

    /// URL of a route under the blog mount path
    pub fn blog_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, BLOG_MOUNT_PATH, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Signed token whose `id` claim is `user_id`
pub fn token_for(user_id: &str) -> String {
    let claims = Claims::new(user_id, 1).expect("one-hour lifetime is in range");
    generate_jwt(&claims, TEST_SECRET).expect("failed to sign test token")
}

pub fn bearer(user_id: &str) -> String {
    format!("Bearer {}", token_for(user_id))
}
