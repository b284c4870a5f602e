//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → trigger shutdown
//!
//! Shutdown (shutdown.rs):
//!     trigger → server stops accepting → in-flight replies finish → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
