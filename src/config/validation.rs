//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the bind address and intercepted host
//! - Detect duplicate route keys and relative paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MockConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Fixture files are not checked here; see `MockRegistry::missing_fixtures`

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::MockConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("host '{0}' is not an absolute http(s) URL")]
    Host(String),

    #[error("route path '{0}' must start with '/'")]
    RelativePath(String),

    #[error("duplicate route '{0}'")]
    DuplicateRoute(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &MockConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }

    if !is_absolute_http(&config.server.host) {
        errors.push(ValidationError::Host(config.server.host.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for route in config.route_table() {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath(route.path.clone()));
        }
        let key = if route.query.is_empty() {
            route.path.clone()
        } else {
            format!("{}?{}", route.path, route.query)
        };
        if !seen.insert(key.clone()) {
            errors.push(ValidationError::DuplicateRoute(key));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub(crate) fn is_absolute_http(host: &str) -> bool {
    Url::parse(host)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&MockConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = MockConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.server.host = "www.webpagetest.org".into();
        config.timeouts.request_secs = 0;
        config.routes = Some(vec![
            RouteConfig {
                path: "testStatus.php".into(),
                query: String::new(),
                fixture: None,
            },
            RouteConfig {
                path: "/a".into(),
                query: "x=1".into(),
                fixture: Some("a.json".into()),
            },
            RouteConfig {
                path: "/a".into(),
                query: "x=1".into(),
                fixture: None,
            },
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::DuplicateRoute("/a?x=1".into())));
        assert!(errors.contains(&ValidationError::RelativePath("testStatus.php".into())));
    }

    #[test]
    fn test_same_path_different_query_is_fine() {
        let mut config = MockConfig::default();
        config.routes = Some(vec![
            RouteConfig {
                path: "/a".into(),
                query: "x=1".into(),
                fixture: None,
            },
            RouteConfig {
                path: "/a".into(),
                query: "x=2".into(),
                fixture: None,
            },
        ]);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_host_scheme() {
        assert!(is_absolute_http("http://www.webpagetest.org"));
        assert!(is_absolute_http("https://wpt.example.com:8443/"));
        assert!(!is_absolute_http("ftp://www.webpagetest.org"));
        assert!(!is_absolute_http("/relative"));
    }
}
