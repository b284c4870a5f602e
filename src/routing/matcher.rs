//! Request matching logic.
//!
//! # Responsibilities
//! - Match the request method (GET only)
//! - Match the addressed authority against the intercepted host
//! - Match path and raw query string literally
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec), default ports elided
//! - Path and query matching are case-sensitive and byte-exact
//! - No decoding, no parameter reordering, no wildcards

use axum::http::uri::Authority;
use axum::http::{header, Method, Request};
use url::Url;

/// The parts of a request the matchers look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub method: Method,
    /// `host[:port]` from the absolute-form URI, or else the `Host` header.
    pub authority: Option<String>,
    pub path: String,
    /// Raw query string; empty when the request had none.
    pub query: String,
}

impl RequestTarget {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let authority = req
            .uri()
            .authority()
            .map(|a| a.as_str().to_string())
            .or_else(|| {
                req.headers()
                    .get(header::HOST)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string)
            });

        Self {
            method: req.method().clone(),
            authority,
            path: req.uri().path().to_string(),
            query: req.uri().query().unwrap_or_default().to_string(),
        }
    }
}

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, target: &RequestTarget) -> bool;
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    pub fn new(method: Method) -> Self {
        Self { method }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, target: &RequestTarget) -> bool {
        target.method == self.method
    }
}

/// Matches the addressed authority against a base URL.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    expected_host: String,
    expected_port: Option<u16>,
    default_port: Option<u16>,
}

impl HostMatcher {
    /// Create a host matcher for the authority of `base`.
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(base: &Url) -> Self {
        let default_port = match base.scheme() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };
        Self {
            expected_host: base.host_str().unwrap_or_default().to_lowercase(),
            expected_port: base.port_or_known_default(),
            default_port,
        }
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, target: &RequestTarget) -> bool {
        let Some(authority) = target
            .authority
            .as_deref()
            .and_then(|a| a.parse::<Authority>().ok())
        else {
            return false;
        };

        let port = authority.port_u16().or(self.default_port);
        authority.host().eq_ignore_ascii_case(&self.expected_host) && port == self.expected_port
    }
}

/// Matches one literal path and raw query string.
#[derive(Debug, Clone)]
pub struct ExactRouteMatcher {
    path: String,
    query: String,
}

impl ExactRouteMatcher {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }
}

impl Matcher for ExactRouteMatcher {
    fn matches(&self, target: &RequestTarget) -> bool {
        target.path == self.path && target.query == self.query
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, target: &RequestTarget) -> bool {
        self.matchers.iter().all(|m| m.matches(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn target(uri: &str, host: Option<&str>) -> RequestTarget {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header("Host", host);
        }
        RequestTarget::from_request(&builder.body(Body::empty()).unwrap())
    }

    #[test]
    fn test_target_from_absolute_uri() {
        let t = target("http://www.webpagetest.org/getLocations.php", None);
        assert_eq!(t.authority.as_deref(), Some("www.webpagetest.org"));
        assert_eq!(t.path, "/getLocations.php");
        assert_eq!(t.query, "");
    }

    #[test]
    fn test_host_matcher() {
        let matcher = HostMatcher::new(&Url::parse("http://www.webpagetest.org").unwrap());

        assert!(matcher.matches(&target("/", Some("www.webpagetest.org"))));
        assert!(matcher.matches(&target("/", Some("WWW.WebPageTest.org")))); // Case insensitive
        assert!(matcher.matches(&target("/", Some("www.webpagetest.org:80"))));
        assert!(!matcher.matches(&target("/", Some("www.webpagetest.org:8080"))));
        assert!(!matcher.matches(&target("/", Some("other.org"))));
        assert!(!matcher.matches(&target("/", None)));
    }

    #[test]
    fn test_host_matcher_explicit_port() {
        let matcher = HostMatcher::new(&Url::parse("http://localhost:9000/").unwrap());
        assert!(matcher.matches(&target("http://localhost:9000/x", None)));
        assert!(!matcher.matches(&target("http://localhost/x", None)));
    }

    #[test]
    fn test_exact_route_matcher() {
        let matcher = ExactRouteMatcher::new("/testStatus.php", "test=120816_V2_2");

        assert!(matcher.matches(&target("/testStatus.php?test=120816_V2_2", None)));
        assert!(!matcher.matches(&target("/testStatus.php?test=120816_V2_3", None)));
        assert!(!matcher.matches(&target("/testStatus.php?test=120816_V2_2&f=json", None)));
        assert!(!matcher.matches(&target("/testStatus.php", None)));
    }

    #[test]
    fn test_query_is_not_reordered() {
        let matcher = ExactRouteMatcher::new("/waterfall.php", "test=1&run=1");
        assert!(!matcher.matches(&target("/waterfall.php?run=1&test=1", None)));
    }

    #[test]
    fn test_and_matcher_requires_all() {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::get()),
            Box::new(ExactRouteMatcher::new("/getTesters.php", "")),
        ]);
        assert!(matcher.matches(&target("/getTesters.php", None)));

        let post = RequestTarget {
            method: Method::POST,
            ..target("/getTesters.php", None)
        };
        assert!(!matcher.matches(&post));
    }
}
