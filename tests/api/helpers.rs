//! Spawns the app on a random port with the email service replaced by a `MockServer`.
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::OnceLock,
};

use anyhow::Result;
use reqwest::{Method, Response};
use secrecy::SecretString;
use serde_json::Value;
use waitlist_mailer::{
    config::{AppConfig, EmailConfig, NetConfig},
    init_dbg_tracing, App,
};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "api-test-key";

pub struct TestApp {
    pub addr: SocketAddr,
    pub email_server: MockServer,
    pub http_client: reqwest::Client,
}
impl TestApp {
    pub fn waitlist_url(&self) -> String {
        format!("http://{}/api/waitlist", self.addr)
    }

    pub async fn post_waitlist(&self, body: &Value) -> Result<Response> {
        let res = self
            .http_client
            .post(self.waitlist_url())
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    /// Sends the body as is, without a `Content-Type` header.
    pub async fn post_waitlist_raw(&self, body: &'static str) -> Result<Response> {
        let res = self
            .http_client
            .post(self.waitlist_url())
            .body(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn preflight_waitlist(&self) -> Result<Response> {
        let res = self
            .http_client
            .request(Method::OPTIONS, self.waitlist_url())
            .header("Origin", "https://studiomind.io")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await?;
        Ok(res)
    }
}

const TEST_HOST: [u8; 4] = [127, 0, 0, 1];

fn _init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        init_dbg_tracing();
    });
}

pub fn test_config(email_url: String, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        net_config: NetConfig {
            host: TEST_HOST,
            // Trying to bind port 0 will trigger an OS scan for an available port
            // which will then be bound to the application.
            app_port: 0,
        },
        email_config: EmailConfig {
            base_url: email_url,
            api_key: api_key.map(|key| SecretString::from(key.to_string())),
            from_addr: None,
            sender_name: "StudioMind".to_string(),
            timeout_millis: 500,
        },
    }
}

/// Spawns the app with an API key configured.
pub async fn spawn_test_app() -> Result<TestApp> {
    spawn_test_app_with_key(Some(TEST_API_KEY)).await
}

pub async fn spawn_test_app_with_key(api_key: Option<&str>) -> Result<TestApp> {
    let email_server = MockServer::start().await;
    let config = test_config(email_server.uri(), api_key);
    spawn_test_app_with_config(config, email_server).await
}

/// A helper function that tries to spawn a separate task to serve our app.
pub async fn spawn_test_app_with_config(
    config: AppConfig,
    email_server: MockServer,
) -> Result<TestApp> {
    // _init_test_subscriber();

    let app = App::build_from_config(config).await?;
    let port = app.listener.local_addr()?.port();

    tokio::spawn(waitlist_mailer::serve(app));

    Ok(TestApp {
        addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::from(TEST_HOST)), port),
        email_server,
        http_client: reqwest::Client::new(),
    })
}

/// An address nothing is listening on.
pub fn refused_url() -> Result<String> {
    let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
