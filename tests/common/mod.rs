//! Shared utilities for integration tests.

use wpt_mock_server::config::{default_fixtures_dir, MockConfig};
use wpt_mock_server::{spawn_mock_server, MockServerHandle};

/// Start a mock server with the default table on a free port.
pub async fn start_server() -> MockServerHandle {
    start_server_with(|_| {}).await
}

/// Start a mock server on a free port after adjusting the default config.
pub async fn start_server_with(adjust: impl FnOnce(&mut MockConfig)) -> MockServerHandle {
    let mut config = MockConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    adjust(&mut config);
    spawn_mock_server(config).await.unwrap()
}

/// A client that sends every http request through the mock server.
pub fn proxied_client(server: &MockServerHandle) -> reqwest::Client {
    reqwest::Client::builder()
        .proxy(reqwest::Proxy::http(server.proxy_url()).unwrap())
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// A client that talks to the mock server's socket directly.
#[allow(dead_code)]
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// Bytes of a bundled fixture.
pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(default_fixtures_dir().join(name)).unwrap()
}
