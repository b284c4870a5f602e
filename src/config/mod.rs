//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MockConfig (validated, immutable)
//!     → handed to the registry at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - An absent route list means the embedded WebPageTest table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    default_fixtures_dir, FixtureConfig, MockConfig, ObservabilityConfig, RouteConfig,
    ServerConfig, TimeoutConfig, DEFAULT_HOST,
};
pub use validation::ValidationError;
