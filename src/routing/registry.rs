//! The mock endpoint registry.
//!
//! # Responsibilities
//! - Bind a set of intercepts to one base URL
//! - Register one persistent intercept per route table entry
//! - Dispatch requests, first exact match wins
//!
//! # Design Decisions
//! - Registration is a single synchronous pass; nothing touches disk
//! - Immutable after construction (thread-safe without locks)
//! - Intercepts are never consumed: every match gets the same reply
//! - The table is not validated here; missing fixtures fail at serve time

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use thiserror::Error;
use url::Url;

use crate::config::schema::{MockConfig, RouteConfig};
use crate::config::validation::is_absolute_http;
use crate::http::{content_type, response};
use crate::observability::metrics;
use crate::routing::matcher::{
    AndMatcher, ExactRouteMatcher, HostMatcher, Matcher, MethodMatcher, RequestTarget,
};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid host '{0}': expected an absolute http(s) URL")]
    InvalidHost(String),
}

/// Literal path and query identifying one simulated request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub path: String,
    pub query: String,
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// What an intercept answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 200 with the fixture bytes.
    Fixture {
        name: String,
        path: PathBuf,
        content_type: Option<&'static str>,
    },
    /// 404 with an empty body.
    NotFound,
}

/// A persistent (matcher, reply) pair.
#[derive(Debug)]
pub struct Intercept {
    key: RouteKey,
    matcher: AndMatcher,
    reply: Reply,
}

impl Intercept {
    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn reply(&self) -> &Reply {
        &self.reply
    }

    pub fn matches(&self, target: &RequestTarget) -> bool {
        self.matcher.matches(target)
    }

    /// Build the response for a matched request.
    pub fn respond(&self) -> Response<Body> {
        match &self.reply {
            Reply::Fixture {
                path, content_type, ..
            } => response::fixture(path.clone(), *content_type),
            Reply::NotFound => response::not_found(),
        }
    }
}

/// A fixed set of intercepts bound to one host.
#[derive(Debug)]
pub struct MockRegistry {
    host: Url,
    fixtures_dir: PathBuf,
    intercepts: Vec<Intercept>,
}

/// Build a registry for `host` (or the default WebPageTest host) with the
/// embedded route table. Equivalent to [`MockRegistry::new`].
pub fn mock_registry(host: Option<&str>) -> Result<MockRegistry, RegistryError> {
    MockRegistry::new(host)
}

impl MockRegistry {
    /// Build a registry for `host` (or the default WebPageTest host) with the
    /// embedded route table and the bundled fixture directory.
    pub fn new(host: Option<&str>) -> Result<Self, RegistryError> {
        let mut config = MockConfig::default();
        if let Some(host) = host {
            config.server.host = host.to_string();
        }
        Self::from_config(&config)
    }

    /// Build a registry from explicit configuration.
    pub fn from_config(config: &MockConfig) -> Result<Self, RegistryError> {
        let host = &config.server.host;
        if !is_absolute_http(host) {
            return Err(RegistryError::InvalidHost(host.clone()));
        }
        let host = Url::parse(host).map_err(|_| RegistryError::InvalidHost(host.clone()))?;

        let routes = config.route_table();
        let intercepts = routes
            .iter()
            .map(|route| {
                build_intercept(
                    route,
                    &host,
                    &config.fixtures.dir,
                    config.server.match_any_host,
                )
            })
            .collect::<Vec<_>>();

        tracing::info!(
            host = %host,
            fixtures = %config.fixtures.dir.display(),
            intercepts = intercepts.len(),
            "Mock endpoints registered"
        );

        Ok(Self {
            host,
            fixtures_dir: config.fixtures.dir.clone(),
            intercepts,
        })
    }

    /// The base URL intercepts are bound to.
    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    /// Intercepts in registration order.
    pub fn intercepts(&self) -> &[Intercept] {
        &self.intercepts
    }

    /// Find the first intercept matching the request.
    pub fn find(&self, target: &RequestTarget) -> Option<&Intercept> {
        self.intercepts.iter().find(|i| i.matches(target))
    }

    /// Answer a request: the matched intercept's reply, or the unmatched reply.
    pub fn respond<B>(&self, req: &Request<B>) -> Response<Body> {
        let start = Instant::now();
        let target = RequestTarget::from_request(req);

        let (outcome, response) = match self.find(&target) {
            Some(intercept) => {
                tracing::debug!(
                    route = %intercept.key(),
                    reply = ?intercept.reply(),
                    "Intercepted request"
                );
                let outcome = match intercept.reply() {
                    Reply::Fixture { .. } => "fixture",
                    Reply::NotFound => "absent",
                };
                (outcome, intercept.respond())
            }
            None => {
                tracing::warn!(
                    method = %target.method,
                    authority = ?target.authority,
                    path = %target.path,
                    query = %target.query,
                    "No intercept matched"
                );
                (
                    "unmatched",
                    response::unmatched(target.method.as_str(), &target.path, &target.query),
                )
            }
        };

        metrics::record_request(outcome, response.status().as_u16(), start);
        response
    }

    /// Fixture-backed entries whose file does not exist on disk.
    pub fn missing_fixtures(&self) -> Vec<(&RouteKey, &Path)> {
        self.intercepts
            .iter()
            .filter_map(|i| match &i.reply {
                Reply::Fixture { path, .. } if !path.is_file() => Some((&i.key, path.as_path())),
                _ => None,
            })
            .collect()
    }
}

fn build_intercept(
    route: &RouteConfig,
    host: &Url,
    fixtures_dir: &Path,
    match_any_host: bool,
) -> Intercept {
    let mut matchers: Vec<Box<dyn Matcher>> = vec![
        Box::new(MethodMatcher::get()),
        Box::new(ExactRouteMatcher::new(&route.path, &route.query)),
    ];
    if !match_any_host {
        matchers.push(Box::new(HostMatcher::new(host)));
    }

    let reply = match route.fixture_name() {
        Some(name) => Reply::Fixture {
            name: name.to_string(),
            path: fixtures_dir.join(name),
            content_type: content_type::for_fixture(name),
        },
        None => Reply::NotFound,
    };

    Intercept {
        key: RouteKey {
            path: route.path.clone(),
            query: route.query.clone(),
        },
        matcher: AndMatcher::new(matchers),
        reply,
    }
}
