//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → tracing events (startup, shutdown, per-request spans)
//!     → logging.rs subscriber (pretty / compact / JSON to stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID is recorded on every request span

pub mod logging;

pub use logging::{init_logging, LoggingError};
