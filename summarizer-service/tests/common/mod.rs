//! Test helpers: spawn the service against a wiremock upstream.

#![allow(dead_code)]

use reqwest::Url;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::time::Duration;
use summarizer_service::config::{CorsConfig, SummarizerConfig, UpstreamConfig};
use summarizer_service::startup::Application;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const UPSTREAM_PATH: &str = "/v1/chat/completions";
pub const DEV_ORIGIN: &str = "http://localhost:3001";

pub const SAMPLE_TRANSCRIPT: &str = "Lorem Ipsum is simply dummy text of the printing and typesetting industry. \
Lorem Ipsum has been the industry's standard dummy text ever since the 1500s, \
when an unknown printer took a galley of type and scrambled it to make a type specimen book.";

pub fn test_config(api_url: &str) -> SummarizerConfig {
    SummarizerConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
        },
        upstream: UpstreamConfig {
            api_url: Url::parse(api_url).expect("Invalid test upstream URL"),
            api_key: Secret::new(TEST_API_KEY.to_string()),
            timeout: Duration::from_secs(5),
        },
        cors: CorsConfig {
            allowed_origins: vec![DEV_ORIGIN.to_string()],
        },
        otlp_endpoint: None,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with a hook to tweak the config before startup.
    pub async fn spawn_with(customize: impl FnOnce(&mut SummarizerConfig)) -> Self {
        let upstream = MockServer::start().await;
        let mut config = test_config(&format!("{}{}", upstream.uri(), UPSTREAM_PATH));
        customize(&mut config);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            upstream,
            client,
        }
    }

    pub async fn post_summarize(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/summarize", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
