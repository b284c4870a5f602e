//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (direct, or client using us as its HTTP proxy)
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing::MockRegistry (find intercept)
//!     → response.rs (fixture / 404 / unmatched)
//!     → content_type.rs (fixture Content-Type)
//!     → Send to client
//! ```

pub mod content_type;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use server::{spawn_mock_server, HttpServer, MockServerHandle, ServerError};
