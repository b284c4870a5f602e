//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mock server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::table::DEFAULT_ROUTES;

/// Base URL the WebPageTest client talks to when no host is given.
pub const DEFAULT_HOST: &str = "http://www.webpagetest.org";

/// Root configuration for the mock server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MockConfig {
    /// Listener and host settings.
    pub server: ServerConfig,

    /// Where fixture files live.
    pub fixtures: FixtureConfig,

    /// Route table. `None` means the embedded default table.
    pub routes: Option<Vec<RouteConfig>>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl MockConfig {
    /// The effective route table: the configured one, or the embedded default.
    pub fn route_table(&self) -> Vec<RouteConfig> {
        match &self.routes {
            Some(routes) => routes.clone(),
            None => DEFAULT_ROUTES.iter().map(RouteConfig::from).collect(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080"). Port 0 picks a free port.
    pub bind_address: String,

    /// Absolute base URL whose requests are intercepted.
    pub host: String,

    /// Serve requests regardless of the authority they were addressed to.
    pub match_any_host: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            host: DEFAULT_HOST.to_string(),
            match_any_host: false,
        }
    }
}

/// Fixture directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Directory fixture names are resolved against.
    pub dir: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            dir: default_fixtures_dir(),
        }
    }
}

/// The fixture directory shipped with this crate.
pub fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("responses")
}

/// One simulated GET request and its canned reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Literal request path, e.g. `/testStatus.php`.
    pub path: String,

    /// Literal (already percent-encoded) query string without the `?`.
    #[serde(default)]
    pub query: String,

    /// Fixture file name. Missing or empty means "reply 404".
    #[serde(default)]
    pub fixture: Option<String>,
}

impl RouteConfig {
    /// The fixture name, treating an empty string as absent.
    pub fn fixture_name(&self) -> Option<&str> {
        self.fixture.as_deref().filter(|name| !name.is_empty())
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_embedded_table() {
        let config = MockConfig::default();
        assert!(config.routes.is_none());
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.route_table().len(), DEFAULT_ROUTES.len());
    }

    #[test]
    fn test_empty_fixture_is_absent() {
        let route = RouteConfig {
            path: "/cancelTest.php".into(),
            query: "test=120816_V2_4".into(),
            fixture: Some(String::new()),
        };
        assert_eq!(route.fixture_name(), None);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: MockConfig = toml::from_str(
            r#"
            [server]
            host = "http://localhost:9000"

            [[routes]]
            path = "/getLocations.php"
            fixture = "locations.xml"

            [[routes]]
            path = "/cancelTest.php"
            query = "test=1"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "http://localhost:9000");
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        let routes = config.route_table();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].query, "");
        assert_eq!(routes[0].fixture_name(), Some("locations.xml"));
        assert_eq!(routes[1].fixture_name(), None);
    }
}
