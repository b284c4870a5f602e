//! WebPageTest mock API server.
//!
//! Registers a fixed table of WebPageTest API requests (path + query) against
//! canned fixture files so a client's test suite can run without network
//! access. Matching requests get the fixture bytes with a 200, table entries
//! without a fixture get an empty 404, everything else is left unanswered
//! (501).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::MockConfig;
pub use http::{spawn_mock_server, HttpServer, MockServerHandle};
pub use lifecycle::Shutdown;
pub use routing::{mock_registry, MockRegistry};
