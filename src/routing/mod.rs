//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, authority, path, query)
//!     → registry.rs (scan intercepts in registration order)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: fixture reply, 404 reply, or no match
//!
//! Registration (at startup):
//!     RouteConfig[] (table.rs or config file)
//!     → One intercept per entry
//!     → Freeze as immutable MockRegistry
//! ```
//!
//! # Design Decisions
//! - Intercepts built at startup, immutable at runtime
//! - Literal comparison only, no patterns
//! - Deterministic: same input always matches same intercept
//! - First match wins (registration order)

pub mod matcher;
pub mod registry;
pub mod table;

pub use registry::{mock_registry, Intercept, MockRegistry, RegistryError, Reply, RouteKey};
